use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

use crate::config::FilterConfig;
use crate::error::{ChainError, ChainResult};
use crate::modules::{FilterTorrents, Module};
use crate::types::{SeasonEpisodes, TorrentInfo};

const TOP_PRIORITY: i32 = 100;

/// Filters torrents by title rules and by requested seasons/episodes.
///
/// A torrent is kept when its title matches any include rule (every title does
/// when there are none) and no exclude rule. Earlier include rules rank higher:
/// the first matching rule sets `pri_order`.
pub struct RuleFilterModule {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl RuleFilterModule {
    pub fn new(config: &FilterConfig) -> ChainResult<Self> {
        Ok(Self {
            include: compile(&config.include)?,
            exclude: compile(&config.exclude)?,
        })
    }

    fn rank(&self, title: &str) -> Option<i32> {
        if self.exclude.iter().any(|rule| rule.is_match(title)) {
            return None;
        }
        if self.include.is_empty() {
            return Some(0);
        }
        self.include
            .iter()
            .position(|rule| rule.is_match(title))
            .map(|index| TOP_PRIORITY - index as i32)
    }
}

fn compile(rules: &[String]) -> ChainResult<Vec<Regex>> {
    rules
        .iter()
        .map(|rule| {
            Regex::new(rule).map_err(|source| ChainError::InvalidRule {
                rule: rule.clone(),
                source,
            })
        })
        .collect()
}

fn wanted(torrent: &TorrentInfo, season_episodes: Option<&SeasonEpisodes>) -> bool {
    let Some(season_episodes) = season_episodes else {
        return true;
    };
    let Some(episodes) = torrent.season.and_then(|s| season_episodes.get(&s)) else {
        return false;
    };
    // Season packs, or no particular episodes asked for.
    if episodes.is_empty() || torrent.episodes.is_empty() {
        return true;
    }
    torrent.episodes.iter().any(|e| episodes.contains(e))
}

impl Module for RuleFilterModule {
    fn name(&self) -> &str {
        "rule_filter"
    }
}

#[async_trait]
impl FilterTorrents for RuleFilterModule {
    async fn filter_torrents(
        &self,
        torrent_list: &[TorrentInfo],
        season_episodes: Option<&SeasonEpisodes>,
    ) -> Result<Option<Vec<TorrentInfo>>> {
        let kept: Vec<TorrentInfo> = torrent_list
            .iter()
            .filter(|t| wanted(t, season_episodes))
            .filter_map(|t| {
                self.rank(&t.title).map(|pri_order| TorrentInfo {
                    pri_order,
                    ..t.clone()
                })
            })
            .collect();

        log::debug!("Rule filter kept {} of {} torrents", kept.len(), torrent_list.len());
        Ok(Some(kept))
    }
}
