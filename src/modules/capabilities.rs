//! One trait per chain operation.
//!
//! A module opts into an operation by implementing its trait and registering
//! itself under it. Every argument of the operation is passed to every module;
//! a module ignores the ones it has no use for.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use super::{Capability, Module};
use crate::types::{
    Context, ExistMediaInfo, MediaInfo, MediaType, MetaInfo, SeasonEpisodes, SiteConfig,
    TorrentEntry, TorrentInfo, TorrentStatus, TransferInfo, UserId,
};

/// Rewrites special release names before recognition.
///
/// Returning `(None, None)` leaves the names to the next module.
#[async_trait]
pub trait PrepareRecognize: Module {
    async fn prepare_recognize(
        &self,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<(Option<String>, Option<String>)>;
}

#[async_trait]
pub trait RecognizeMedia: Module {
    async fn recognize_media(
        &self,
        meta: Option<&MetaInfo>,
        mtype: Option<MediaType>,
        tmdbid: Option<i64>,
    ) -> Result<Option<MediaInfo>>;
}

#[async_trait]
pub trait ObtainImage: Module {
    async fn obtain_image(&self, mediainfo: &MediaInfo) -> Result<Option<MediaInfo>>;
}

#[async_trait]
pub trait DoubanInfo: Module {
    async fn douban_info(&self, doubanid: &str) -> Result<Option<Value>>;
}

#[async_trait]
pub trait TvdbInfo: Module {
    async fn tvdb_info(&self, tvdbid: i64) -> Result<Option<Value>>;
}

#[async_trait]
pub trait TmdbInfo: Module {
    async fn tmdb_info(&self, tmdbid: i64, mtype: MediaType) -> Result<Option<Value>>;
}

/// Parses an inbound chat message.
///
/// The returned object carries `userid`, `username` and `text`.
#[async_trait]
pub trait MessageParser: Module {
    async fn message_parser(&self, body: &Value, form: &Value, args: &Value)
        -> Result<Option<Value>>;
}

/// Parses a media server webhook; a message-worthy result carries `title`,
/// `text` and `image`.
#[async_trait]
pub trait WebhookParser: Module {
    async fn webhook_parser(&self, body: &Value, form: &Value, args: &Value)
        -> Result<Option<Value>>;
}

#[async_trait]
pub trait SearchMedias: Module {
    async fn search_medias(&self, meta: &MetaInfo) -> Result<Option<Vec<MediaInfo>>>;
}

/// Searches sites for torrents, by `keyword` when given, else by media name.
#[async_trait]
pub trait SearchTorrents: Module {
    async fn search_torrents(
        &self,
        mediainfo: Option<&MediaInfo>,
        sites: &[SiteConfig],
        keyword: Option<&str>,
    ) -> Result<Option<Vec<TorrentInfo>>>;
}

/// Fetches the newest page of torrents from each site.
#[async_trait]
pub trait RefreshTorrents: Module {
    async fn refresh_torrents(&self, sites: &[SiteConfig]) -> Result<Option<Vec<TorrentInfo>>>;
}

#[async_trait]
pub trait FilterTorrents: Module {
    async fn filter_torrents(
        &self,
        torrent_list: &[TorrentInfo],
        season_episodes: Option<&SeasonEpisodes>,
    ) -> Result<Option<Vec<TorrentInfo>>>;
}

/// Adds a download task; answers `(hash, message)`.
#[async_trait]
pub trait Download: Module {
    async fn download(
        &self,
        torrent_path: &Path,
        cookie: &str,
        episodes: Option<&[u32]>,
    ) -> Result<Option<(Option<String>, String)>>;
}

/// Follow-up after a download was added, such as fetching subtitles.
#[async_trait]
pub trait DownloadAdded: Module {
    async fn download_added(&self, context: &Context, torrent_path: &Path) -> Result<()>;
}

#[async_trait]
pub trait ListTorrents: Module {
    async fn list_torrents(
        &self,
        status: Option<TorrentStatus>,
        hashs: Option<&[String]>,
    ) -> Result<Option<Vec<TorrentEntry>>>;
}

#[async_trait]
pub trait Transfer: Module {
    async fn transfer(&self, path: &Path, mediainfo: &MediaInfo) -> Result<Option<TransferInfo>>;
}

#[async_trait]
pub trait TransferCompleted: Module {
    async fn transfer_completed(&self, hashs: &[String], transinfo: &TransferInfo) -> Result<()>;
}

#[async_trait]
pub trait RemoveTorrents: Module {
    async fn remove_torrents(&self, hashs: &[String]) -> Result<bool>;
}

/// Answers what a media server already has; `None` when nothing exists.
#[async_trait]
pub trait MediaExists: Module {
    async fn media_exists(&self, mediainfo: &MediaInfo) -> Result<Option<ExistMediaInfo>>;
}

#[async_trait]
pub trait RefreshMediaserver: Module {
    async fn refresh_mediaserver(&self, mediainfo: &MediaInfo, file_path: &Path)
        -> Result<Option<bool>>;
}

#[async_trait]
pub trait PostMessage: Module {
    async fn post_message(
        &self,
        title: &str,
        text: Option<&str>,
        image: Option<&str>,
        userid: Option<&UserId>,
    ) -> Result<Option<bool>>;
}

#[async_trait]
pub trait PostMediasMessage: Module {
    async fn post_medias_message(
        &self,
        title: &str,
        items: &[MediaInfo],
        userid: Option<&UserId>,
    ) -> Result<Option<bool>>;
}

#[async_trait]
pub trait PostTorrentsMessage: Module {
    async fn post_torrents_message(
        &self,
        title: &str,
        items: &[Context],
        mediainfo: &MediaInfo,
        userid: Option<&UserId>,
    ) -> Result<Option<bool>>;
}

#[async_trait]
pub trait ScrapeMetadata: Module {
    async fn scrape_metadata(&self, path: &Path, mediainfo: &MediaInfo) -> Result<()>;
}

/// Registers chat menu commands, keyed by command name.
#[async_trait]
pub trait RegisterCommands: Module {
    async fn register_commands(&self, commands: &HashMap<String, Value>) -> Result<()>;
}

#[async_trait]
pub trait DoubanDiscover: Module {
    async fn douban_discover(
        &self,
        mtype: MediaType,
        sort: &str,
        tags: &str,
        start: u32,
        count: u32,
    ) -> Result<Option<Vec<Value>>>;
}

#[async_trait]
pub trait TmdbDiscover: Module {
    async fn tmdb_discover(
        &self,
        mtype: MediaType,
        sort_by: &str,
        with_genres: &str,
        with_original_language: &str,
        page: u32,
    ) -> Result<Option<Vec<Value>>>;
}

#[async_trait]
pub trait MovieTop250: Module {
    async fn movie_top250(&self, page: u32, count: u32) -> Result<Option<Vec<Value>>>;
}

impl Capability for dyn PrepareRecognize {
    const NAME: &'static str = "prepare_recognize";
}

impl Capability for dyn RecognizeMedia {
    const NAME: &'static str = "recognize_media";
}

impl Capability for dyn ObtainImage {
    const NAME: &'static str = "obtain_image";
}

impl Capability for dyn DoubanInfo {
    const NAME: &'static str = "douban_info";
}

impl Capability for dyn TvdbInfo {
    const NAME: &'static str = "tvdb_info";
}

impl Capability for dyn TmdbInfo {
    const NAME: &'static str = "tmdb_info";
}

impl Capability for dyn MessageParser {
    const NAME: &'static str = "message_parser";
}

impl Capability for dyn WebhookParser {
    const NAME: &'static str = "webhook_parser";
}

impl Capability for dyn SearchMedias {
    const NAME: &'static str = "search_medias";
}

impl Capability for dyn SearchTorrents {
    const NAME: &'static str = "search_torrents";
}

impl Capability for dyn RefreshTorrents {
    const NAME: &'static str = "refresh_torrents";
}

impl Capability for dyn FilterTorrents {
    const NAME: &'static str = "filter_torrents";
}

impl Capability for dyn Download {
    const NAME: &'static str = "download";
}

impl Capability for dyn DownloadAdded {
    const NAME: &'static str = "download_added";
}

impl Capability for dyn ListTorrents {
    const NAME: &'static str = "list_torrents";
}

impl Capability for dyn Transfer {
    const NAME: &'static str = "transfer";
}

impl Capability for dyn TransferCompleted {
    const NAME: &'static str = "transfer_completed";
}

impl Capability for dyn RemoveTorrents {
    const NAME: &'static str = "remove_torrents";
}

impl Capability for dyn MediaExists {
    const NAME: &'static str = "media_exists";
}

impl Capability for dyn RefreshMediaserver {
    const NAME: &'static str = "refresh_mediaserver";
}

impl Capability for dyn PostMessage {
    const NAME: &'static str = "post_message";
}

impl Capability for dyn PostMediasMessage {
    const NAME: &'static str = "post_medias_message";
}

impl Capability for dyn PostTorrentsMessage {
    const NAME: &'static str = "post_torrents_message";
}

impl Capability for dyn ScrapeMetadata {
    const NAME: &'static str = "scrape_metadata";
}

impl Capability for dyn RegisterCommands {
    const NAME: &'static str = "register_commands";
}

impl Capability for dyn DoubanDiscover {
    const NAME: &'static str = "douban_discover";
}

impl Capability for dyn TmdbDiscover {
    const NAME: &'static str = "tmdb_discover";
}

impl Capability for dyn MovieTop250 {
    const NAME: &'static str = "movie_top250";
}
