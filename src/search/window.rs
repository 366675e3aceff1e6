//! Window slicing: turning (offset, results_count) into an absolute slice

use super::models::{SearchRequest, SearchResult, Track};
use std::ops::Range;

/// Absolute `[start, end)` range of a 1-based window. `offset` is expected
/// to be at least 1; arithmetic saturates instead of overflowing.
pub fn window_bounds(offset: u32, results_count: u32) -> Range<usize> {
    let count = results_count as usize;
    let start = (offset.saturating_sub(1) as usize).saturating_mul(count);
    let end = (offset as usize).saturating_mul(count);
    start..end
}

/// Half-open slice of `tracks`; bounds past the end truncate
pub fn slice_window(mut tracks: Vec<Track>, window: Range<usize>) -> Vec<Track> {
    let end = window.end.min(tracks.len());
    let start = window.start.min(end);
    tracks.truncate(end);
    tracks.drain(..start);
    tracks
}

/// Cut the requested window out of the accumulated tracks and shape the
/// result, attaching the provider total only for unfiltered searches.
pub fn shape_result(tracks: Vec<Track>, total_count: u64, request: &SearchRequest) -> SearchResult {
    SearchResult {
        total_count: request.reports_total().then_some(total_count),
        tracks: slice_window(tracks, request.window()),
    }
}
