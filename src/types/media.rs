use serde::{Deserialize, Serialize};

use super::{MediaType, SeasonEpisodes};

/// Metadata parsed from a release name, the input of recognition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaInfo {
    pub title: String,
    pub subtitle: Option<String>,
    pub name: Option<String>,
    pub year: Option<String>,
    pub mtype: Option<MediaType>,
    pub begin_season: Option<u32>,
    pub episodes: Vec<u32>,
}

impl MetaInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// A recognized movie or series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub mtype: MediaType,
    pub title: String,
    pub year: Option<String>,
    pub tmdb_id: Option<i64>,
    pub tvdb_id: Option<i64>,
    pub douban_id: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub seasons: SeasonEpisodes,
}

impl MediaInfo {
    pub fn new(mtype: MediaType, title: impl Into<String>) -> Self {
        Self {
            mtype,
            title: title.into(),
            year: None,
            tmdb_id: None,
            tvdb_id: None,
            douban_id: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            seasons: SeasonEpisodes::new(),
        }
    }

    pub fn with_tmdb_id(mut self, tmdb_id: i64) -> Self {
        self.tmdb_id = Some(tmdb_id);
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Title followed by the year, when known.
    pub fn title_year(&self) -> String {
        match &self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// What a media server already holds for a given media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistMediaInfo {
    pub mtype: MediaType,
    #[serde(default)]
    pub seasons: SeasonEpisodes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_year() {
        let media = MediaInfo::new(MediaType::Movie, "Heat").with_year("1995");
        assert_eq!(media.title_year(), "Heat (1995)");

        let media = MediaInfo::new(MediaType::Tv, "Severance");
        assert_eq!(media.title_year(), "Severance");
    }

    #[test]
    fn test_media_info_serialization() {
        let mut media = MediaInfo::new(MediaType::Tv, "Dark").with_tmdb_id(70523);
        media.seasons.insert(1, vec![1, 2]);

        let json = serde_json::to_string(&media).unwrap();
        let deserialized: MediaInfo = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, media);
    }
}
