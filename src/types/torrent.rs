use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::{MediaInfo, MetaInfo};

/// Free-form site definition as loaded from the site store.
pub type SiteConfig = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentInfo {
    pub site_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enclosure: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub seeders: u32,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub episodes: Vec<u32>,
    #[serde(default)]
    pub pri_order: i32,
}

impl TorrentInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Everything known about one download candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub meta_info: Option<MetaInfo>,
    pub media_info: Option<MediaInfo>,
    pub torrent_info: Option<TorrentInfo>,
}

/// A finished download waiting to be transferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTorrent {
    pub title: String,
    pub path: PathBuf,
    pub hash: String,
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadingTorrent {
    pub title: String,
    pub hash: String,
    pub progress: f64,
    pub size: u64,
    pub dlspeed: Option<String>,
    pub upspeed: Option<String>,
}

/// One row of a downloader listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TorrentEntry {
    Transfer(TransferTorrent),
    Downloading(DownloadingTorrent),
}

impl TorrentEntry {
    pub fn hash(&self) -> &str {
        match self {
            TorrentEntry::Transfer(t) => &t.hash,
            TorrentEntry::Downloading(t) => &t.hash,
        }
    }
}
