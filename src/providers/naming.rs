use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::modules::{Module, PrepareRecognize};

static BRACKET_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]|【[^】]*】").expect("bracket pattern is valid"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._]+").expect("separator pattern is valid"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalizes scene-style release names before recognition.
///
/// Drops bracketed group tags, turns `.`/`_` separators into spaces and
/// collapses whitespace. Names that need no change are left to later modules.
pub struct ReleaseNameModule;

impl ReleaseNameModule {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(name: &str) -> String {
        let stripped = BRACKET_TAGS.replace_all(name, " ");
        let spaced = SEPARATORS.replace_all(&stripped, " ");
        WHITESPACE.replace_all(&spaced, " ").trim().to_string()
    }
}

impl Default for ReleaseNameModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for ReleaseNameModule {
    fn name(&self) -> &str {
        "release_name"
    }
}

#[async_trait]
impl PrepareRecognize for ReleaseNameModule {
    async fn prepare_recognize(
        &self,
        title: &str,
        subtitle: Option<&str>,
    ) -> Result<(Option<String>, Option<String>)> {
        let mut new_title = Self::clean(title);
        if new_title.is_empty() {
            new_title = title.to_string();
        }
        let new_subtitle = subtitle.map(Self::clean);

        if new_title == title && new_subtitle.as_deref() == subtitle {
            return Ok((None, None));
        }

        log::debug!("Release name {:?} prepared as {:?}", title, new_title);
        Ok((Some(new_title), new_subtitle))
    }
}
