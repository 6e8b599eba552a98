use futures::FutureExt;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::dispatch::Dispatcher;
use super::outcome::Outcome;
use crate::events::EventManager;
use crate::modules::*;
use crate::types::{
    Context, ExistMediaInfo, MediaInfo, MediaType, MetaInfo, SeasonEpisodes, SiteConfig,
    TorrentEntry, TorrentInfo, TorrentStatus, TransferInfo, UserId,
};

/// Typed entry point for every chain operation.
///
/// Each method forwards its arguments to the modules registered for the
/// operation of the same name and merges their answers through the
/// [`Dispatcher`]. Module failures never reach the caller; they read as "no
/// answer".
pub struct ChainBase<R: ModuleRegistry = ModuleManager> {
    dispatcher: Dispatcher<R>,
    events: EventManager,
}

impl<R: ModuleRegistry> std::fmt::Debug for ChainBase<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainBase").finish_non_exhaustive()
    }
}

impl<R: ModuleRegistry> ChainBase<R> {
    pub fn new(registry: Arc<R>, events: EventManager) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
            events,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<R> {
        &self.dispatcher
    }

    pub fn registry(&self) -> &Arc<R> {
        self.dispatcher.registry()
    }

    pub fn event_manager(&self) -> &EventManager {
        &self.events
    }

    /// Rewrites special release names so they can be recognized.
    ///
    /// Returns `(None, None)` when no module changed anything.
    pub async fn prepare_recognize(
        &self,
        title: &str,
        subtitle: Option<&str>,
    ) -> (Option<String>, Option<String>) {
        self.dispatcher
            .run_module::<dyn PrepareRecognize, _, _>(move |module| {
                async move {
                    module
                        .prepare_recognize(title, subtitle)
                        .await
                        .map(|(title, subtitle)| Outcome::pair(title, subtitle))
                }
                .boxed()
            })
            .await
            .into_scalar()
            .unwrap_or((None, None))
    }

    /// Recognizes media from parsed metadata, or directly by TMDB id and type.
    pub async fn recognize_media(
        &self,
        meta: Option<&MetaInfo>,
        mtype: Option<MediaType>,
        tmdbid: Option<i64>,
    ) -> Option<MediaInfo> {
        self.dispatcher
            .run_module::<dyn RecognizeMedia, _, _>(move |module| {
                async move {
                    module.recognize_media(meta, mtype, tmdbid).await.map(Outcome::optional)
                }
                .boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn obtain_image(&self, mediainfo: &MediaInfo) -> Option<MediaInfo> {
        self.dispatcher
            .run_module::<dyn ObtainImage, _, _>(move |module| {
                async move { module.obtain_image(mediainfo).await.map(Outcome::optional) }.boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn douban_info(&self, doubanid: &str) -> Option<Value> {
        self.dispatcher
            .run_module::<dyn DoubanInfo, _, _>(move |module| {
                async move { module.douban_info(doubanid).await.map(Outcome::optional) }.boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn tvdb_info(&self, tvdbid: i64) -> Option<Value> {
        self.dispatcher
            .run_module::<dyn TvdbInfo, _, _>(move |module| {
                async move { module.tvdb_info(tvdbid).await.map(Outcome::optional) }.boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn tmdb_info(&self, tmdbid: i64, mtype: MediaType) -> Option<Value> {
        self.dispatcher
            .run_module::<dyn TmdbInfo, _, _>(move |module| {
                async move { module.tmdb_info(tmdbid, mtype).await.map(Outcome::optional) }
                    .boxed()
            })
            .await
            .into_scalar()
    }

    /// Parses an inbound chat message into `userid`, `username` and `text`.
    pub async fn message_parser(&self, body: &Value, form: &Value, args: &Value) -> Option<Value> {
        self.dispatcher
            .run_module::<dyn MessageParser, _, _>(move |module| {
                async move { module.message_parser(body, form, args).await.map(Outcome::optional) }
                    .boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn webhook_parser(&self, body: &Value, form: &Value, args: &Value) -> Option<Value> {
        self.dispatcher
            .run_module::<dyn WebhookParser, _, _>(move |module| {
                async move { module.webhook_parser(body, form, args).await.map(Outcome::optional) }
                    .boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn search_medias(&self, meta: &MetaInfo) -> Option<Vec<MediaInfo>> {
        self.dispatcher
            .run_module::<dyn SearchMedias, _, _>(move |module| {
                async move { module.search_medias(meta).await.map(Outcome::optional_sequence) }
                    .boxed()
            })
            .await
            .into_sequence()
    }

    /// Searches every site module; results from all of them are concatenated.
    pub async fn search_torrents(
        &self,
        mediainfo: Option<&MediaInfo>,
        sites: &[SiteConfig],
        keyword: Option<&str>,
    ) -> Option<Vec<TorrentInfo>> {
        self.dispatcher
            .run_module::<dyn SearchTorrents, _, _>(move |module| {
                async move {
                    module
                        .search_torrents(mediainfo, sites, keyword)
                        .await
                        .map(Outcome::optional_sequence)
                }
                .boxed()
            })
            .await
            .into_sequence()
    }

    pub async fn refresh_torrents(&self, sites: &[SiteConfig]) -> Option<Vec<TorrentInfo>> {
        self.dispatcher
            .run_module::<dyn RefreshTorrents, _, _>(move |module| {
                async move { module.refresh_torrents(sites).await.map(Outcome::optional_sequence) }
                    .boxed()
            })
            .await
            .into_sequence()
    }

    /// Filters torrents, optionally down to the given seasons and episodes.
    pub async fn filter_torrents(
        &self,
        torrent_list: &[TorrentInfo],
        season_episodes: Option<&SeasonEpisodes>,
    ) -> Option<Vec<TorrentInfo>> {
        self.dispatcher
            .run_module::<dyn FilterTorrents, _, _>(move |module| {
                async move {
                    module
                        .filter_torrents(torrent_list, season_episodes)
                        .await
                        .map(Outcome::optional_sequence)
                }
                .boxed()
            })
            .await
            .into_sequence()
    }

    /// Adds a download task from a torrent file; answers `(hash, message)`.
    pub async fn download(
        &self,
        torrent_path: &Path,
        cookie: &str,
        episodes: Option<&[u32]>,
    ) -> Option<(Option<String>, String)> {
        self.dispatcher
            .run_module::<dyn Download, _, _>(move |module| {
                async move {
                    module.download(torrent_path, cookie, episodes).await.map(Outcome::optional)
                }
                .boxed()
            })
            .await
            .into_scalar()
    }

    /// Runs every module's post-download step.
    pub async fn download_added(&self, context: &Context, torrent_path: &Path) {
        self.dispatcher
            .run_module::<dyn DownloadAdded, (), _>(move |module| {
                async move { module.download_added(context, torrent_path).await.map(Outcome::unit) }
                    .boxed()
            })
            .await;
    }

    pub async fn list_torrents(
        &self,
        status: Option<TorrentStatus>,
        hashs: Option<&[String]>,
    ) -> Option<Vec<TorrentEntry>> {
        self.dispatcher
            .run_module::<dyn ListTorrents, _, _>(move |module| {
                async move {
                    module.list_torrents(status, hashs).await.map(Outcome::optional_sequence)
                }
                .boxed()
            })
            .await
            .into_sequence()
    }

    pub async fn transfer(&self, path: &Path, mediainfo: &MediaInfo) -> Option<TransferInfo> {
        self.dispatcher
            .run_module::<dyn Transfer, _, _>(move |module| {
                async move { module.transfer(path, mediainfo).await.map(Outcome::optional) }
                    .boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn transfer_completed(&self, hashs: &[String], transinfo: &TransferInfo) {
        self.dispatcher
            .run_module::<dyn TransferCompleted, (), _>(move |module| {
                async move {
                    module.transfer_completed(hashs, transinfo).await.map(Outcome::unit)
                }
                .boxed()
            })
            .await;
    }

    /// `false` when no downloader module removed the torrents.
    pub async fn remove_torrents(&self, hashs: &[String]) -> bool {
        self.dispatcher
            .run_module::<dyn RemoveTorrents, _, _>(move |module| {
                async move { module.remove_torrents(hashs).await.map(Outcome::scalar) }.boxed()
            })
            .await
            .into_scalar()
            .unwrap_or(false)
    }

    /// What the media servers already hold; `None` when nothing exists.
    pub async fn media_exists(&self, mediainfo: &MediaInfo) -> Option<ExistMediaInfo> {
        self.dispatcher
            .run_module::<dyn MediaExists, _, _>(move |module| {
                async move { module.media_exists(mediainfo).await.map(Outcome::optional) }.boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn refresh_mediaserver(&self, mediainfo: &MediaInfo, file_path: &Path) -> Option<bool> {
        self.dispatcher
            .run_module::<dyn RefreshMediaserver, _, _>(move |module| {
                async move {
                    module.refresh_mediaserver(mediainfo, file_path).await.map(Outcome::optional)
                }
                .boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn post_message(
        &self,
        title: &str,
        text: Option<&str>,
        image: Option<&str>,
        userid: Option<&UserId>,
    ) -> Option<bool> {
        self.dispatcher
            .run_module::<dyn PostMessage, _, _>(move |module| {
                async move {
                    module.post_message(title, text, image, userid).await.map(Outcome::optional)
                }
                .boxed()
            })
            .await
            .into_scalar()
    }

    /// Sends a list of media for the user to pick from.
    pub async fn post_medias_message(
        &self,
        title: &str,
        items: &[MediaInfo],
        userid: Option<&UserId>,
    ) -> Option<bool> {
        self.dispatcher
            .run_module::<dyn PostMediasMessage, _, _>(move |module| {
                async move {
                    module.post_medias_message(title, items, userid).await.map(Outcome::optional)
                }
                .boxed()
            })
            .await
            .into_scalar()
    }

    /// Sends a list of torrents for the user to pick from.
    pub async fn post_torrents_message(
        &self,
        title: &str,
        items: &[Context],
        mediainfo: &MediaInfo,
        userid: Option<&UserId>,
    ) -> Option<bool> {
        self.dispatcher
            .run_module::<dyn PostTorrentsMessage, _, _>(move |module| {
                async move {
                    module
                        .post_torrents_message(title, items, mediainfo, userid)
                        .await
                        .map(Outcome::optional)
                }
                .boxed()
            })
            .await
            .into_scalar()
    }

    pub async fn scrape_metadata(&self, path: &Path, mediainfo: &MediaInfo) {
        self.dispatcher
            .run_module::<dyn ScrapeMetadata, (), _>(move |module| {
                async move { module.scrape_metadata(path, mediainfo).await.map(Outcome::unit) }
                    .boxed()
            })
            .await;
    }

    pub async fn register_commands(&self, commands: &HashMap<String, Value>) {
        self.dispatcher
            .run_module::<dyn RegisterCommands, (), _>(move |module| {
                async move { module.register_commands(commands).await.map(Outcome::unit) }.boxed()
            })
            .await;
    }

    pub async fn douban_discover(
        &self,
        mtype: MediaType,
        sort: &str,
        tags: &str,
        start: u32,
        count: u32,
    ) -> Option<Vec<Value>> {
        self.dispatcher
            .run_module::<dyn DoubanDiscover, _, _>(move |module| {
                async move {
                    module
                        .douban_discover(mtype, sort, tags, start, count)
                        .await
                        .map(Outcome::optional_sequence)
                }
                .boxed()
            })
            .await
            .into_sequence()
    }

    pub async fn tmdb_discover(
        &self,
        mtype: MediaType,
        sort_by: &str,
        with_genres: &str,
        with_original_language: &str,
        page: u32,
    ) -> Option<Vec<Value>> {
        self.dispatcher
            .run_module::<dyn TmdbDiscover, _, _>(move |module| {
                async move {
                    module
                        .tmdb_discover(mtype, sort_by, with_genres, with_original_language, page)
                        .await
                        .map(Outcome::optional_sequence)
                }
                .boxed()
            })
            .await
            .into_sequence()
    }

    pub async fn movie_top250(&self, page: u32, count: u32) -> Vec<Value> {
        self.dispatcher
            .run_module::<dyn MovieTop250, _, _>(move |module| {
                async move { module.movie_top250(page, count).await.map(Outcome::optional_sequence) }
                    .boxed()
            })
            .await
            .into_sequence()
            .unwrap_or_default()
    }
}
