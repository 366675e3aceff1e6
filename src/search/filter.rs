//! Quality filtering

use super::models::Track;

/// Keeps tracks whose quality is at least `min_quality`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityFilter {
    min_quality: u32,
}

impl QualityFilter {
    pub fn new(min_quality: u32) -> Self {
        Self { min_quality }
    }

    pub fn matches(&self, track: &Track) -> bool {
        track.quality >= self.min_quality
    }

    /// Order-preserving filter
    pub fn apply(&self, tracks: Vec<Track>) -> Vec<Track> {
        tracks.into_iter().filter(|t| self.matches(t)).collect()
    }
}
