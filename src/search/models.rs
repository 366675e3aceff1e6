//! Search data model: tracks, pages, requests and results

use crate::config::SearchSettings;
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Duration;

/// A single upstream item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque upstream identifier, unique within a provider
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Bitrate-like quality figure
    #[serde(default)]
    pub quality: u32,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            quality: 0,
            duration: String::new(),
            artist: None,
            link: None,
        }
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Augment this track with extended info, keeping its identity fields.
    /// An artist already known is kept when the lookup has none.
    pub fn apply_details(&mut self, details: TrackDetails) {
        self.title = details.title;
        if details.artist.is_some() {
            self.artist = details.artist;
        }
        self.link = Some(details.link);
    }
}

/// Extended info returned by a single-item lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDetails {
    pub title: String,
    pub artist: Option<String>,
    pub link: String,
}

/// What a lookup is asked about: a bare identifier or an already-known track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupTarget {
    Id(String),
    Track(Track),
}

impl LookupTarget {
    /// Upstream identifier of the target
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Track(track) => &track.id,
        }
    }

    /// Build the enriched record: a fresh track for identifiers, the original
    /// track augmented in place otherwise.
    pub fn into_enriched(self, details: TrackDetails) -> Track {
        match self {
            Self::Id(id) => {
                let mut track = Track::new(id, String::new());
                track.apply_details(details);
                track
            }
            Self::Track(mut track) => {
                track.apply_details(details);
                track
            }
        }
    }
}

impl From<&str> for LookupTarget {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for LookupTarget {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<Track> for LookupTarget {
    fn from(track: Track) -> Self {
        Self::Track(track)
    }
}

/// A scalar or a sequence; the shape of a lookup's output mirrors its input.
///
/// `Many` is listed first so an untagged JSON array is never read as a
/// single struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

/// One page of raw items from a provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Track>,
    /// Provider's estimate of total matches; not stable across pages
    pub total_count: u64,
}

impl Page {
    pub fn new(items: Vec<Track>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    /// The "no results available" page
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Caller overrides; unset fields fall back to [`SearchDefaults`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub offset: Option<u32>,
    pub results_count: Option<u32>,
    pub min_quality: Option<u32>,
    pub extended_info: Option<bool>,
    pub timeout: Option<Duration>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn results_count(mut self, count: u32) -> Self {
        self.results_count = Some(count);
        self
    }

    pub fn min_quality(mut self, quality: u32) -> Self {
        self.min_quality = Some(quality);
        self
    }

    pub fn extended_info(mut self, enabled: bool) -> Self {
        self.extended_info = Some(enabled);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Default option values and limits owned by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDefaults {
    pub results_count: u32,
    pub offset: u32,
    pub min_quality: u32,
    pub extended_info: bool,
    pub timeout: Duration,
    pub max_timeout: Duration,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            results_count: 10,
            offset: 1,
            min_quality: 0,
            extended_info: false,
            timeout: Duration::from_secs(15),
            max_timeout: Duration::from_secs(60),
        }
    }
}

/// Settings that fail `Settings::validate` fall back to the built-in
/// durations rather than panicking.
impl From<&SearchSettings> for SearchDefaults {
    fn from(settings: &SearchSettings) -> Self {
        let builtin = Self::default();
        Self {
            results_count: settings.results_count,
            offset: settings.offset,
            min_quality: settings.min_quality,
            extended_info: settings.extended_info,
            timeout: Duration::try_from_secs_f64(settings.timeout).unwrap_or(builtin.timeout),
            max_timeout: Duration::try_from_secs_f64(settings.max_timeout)
                .unwrap_or(builtin.max_timeout),
        }
    }
}

/// A fully resolved search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub term: String,
    /// 1-based window index
    pub offset: u32,
    /// Window size
    pub results_count: u32,
    pub min_quality: u32,
    pub extended_info: bool,
    /// Pagination budget, measured from the first page fetch
    pub timeout: Duration,
}

impl SearchRequest {
    /// Merge caller options over defaults field by field and validate
    pub fn resolve(
        term: impl Into<String>,
        options: SearchOptions,
        defaults: &SearchDefaults,
    ) -> Result<Self> {
        let request = Self {
            term: term.into(),
            offset: options.offset.unwrap_or(defaults.offset),
            results_count: options.results_count.unwrap_or(defaults.results_count),
            min_quality: options.min_quality.unwrap_or(defaults.min_quality),
            extended_info: options.extended_info.unwrap_or(defaults.extended_info),
            timeout: options
                .timeout
                .unwrap_or(defaults.timeout)
                .min(defaults.max_timeout),
        };

        if request.offset == 0 {
            return Err(SearchError::InvalidRequest(
                "offset must be at least 1".to_string(),
            ));
        }
        if request.results_count == 0 {
            return Err(SearchError::InvalidRequest(
                "results_count must be at least 1".to_string(),
            ));
        }

        Ok(request)
    }

    /// Absolute index range of the requested window
    pub fn window(&self) -> Range<usize> {
        super::window::window_bounds(self.offset, self.results_count)
    }

    /// Number of filtered items needed before the window is satisfied
    pub fn requested_tracks_count(&self) -> usize {
        self.window().end
    }

    /// Raw provider totals are only meaningful for unfiltered searches
    pub fn reports_total(&self) -> bool {
        self.min_quality == 0
    }
}

/// Shaped result of a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    pub tracks: Vec<Track>,
}

impl SearchResult {
    /// Result for a term with no upstream matches
    pub fn empty() -> Self {
        Self {
            total_count: Some(0),
            tracks: vec![],
        }
    }
}
