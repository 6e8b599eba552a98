pub mod media;
pub mod torrent;
pub mod transfer;

pub use media::{ExistMediaInfo, MediaInfo, MetaInfo};
pub use torrent::{Context, DownloadingTorrent, SiteConfig, TorrentEntry, TorrentInfo, TransferTorrent};
pub use transfer::TransferInfo;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Episode numbers keyed by season, e.g. `{1: [1, 2, 3]}`.
pub type SeasonEpisodes = BTreeMap<u32, Vec<u32>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    Tv,
    Unknown,
}

impl MediaType {
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TorrentStatus {
    Transfer,
    Downloading,
}

/// Identifier of the messaging user a reply is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Name(String),
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId::Name(value.to_string())
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId::Numeric(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_forms() {
        assert_eq!(UserId::from(42i64), UserId::Numeric(42));
        assert_eq!(UserId::from("alice"), UserId::Name("alice".to_string()));
        assert_eq!(serde_json::to_string(&UserId::from(42i64)).unwrap(), "42");
    }

    #[test]
    fn test_torrent_entry_tagging() {
        let entry = TorrentEntry::Downloading(DownloadingTorrent {
            title: "Heat 1995".to_string(),
            hash: "abc".to_string(),
            progress: 42.5,
            size: 1 << 30,
            dlspeed: None,
            upspeed: None,
        });
        assert_eq!(entry.hash(), "abc");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "downloading");
        assert_eq!(MediaType::Tv.as_str(), "tv");
    }
}
