//! Reading time and completion tracking for the open comic.
//!
//! Time spent accumulates across sessions: the backend stores the running
//! total and this tracker adds the current session's delta on top. The
//! thresholds below are behavioral contract carried over from long-standing
//! reader behavior; treat them as tunables, not derived values.

use std::time::Instant;

/// Sessions shorter than this many seconds count as accidental previews and
/// contribute zero reading time.
pub const PREVIEW_SESSION_SECS: f64 = 10.0;
/// Viewed-page percentage at or above which a comic classifies as read.
pub const NEARLY_COMPLETE_PERCENT: f64 = 90.0;
/// Being on one of the last pages in this window also classifies as read.
pub const COMPLETION_PAGE_WINDOW: i64 = 3;

#[derive(Debug)]
pub struct ProgressTracker {
    accumulated_secs: f64,
    session_start: Instant,
    highest_page_viewed: usize,
}

impl ProgressTracker {
    /// `accumulated_secs` is the backend's stored total for this comic.
    pub fn new(accumulated_secs: f64) -> Self {
        Self {
            accumulated_secs: accumulated_secs.max(0.0),
            session_start: Instant::now(),
            highest_page_viewed: 0,
        }
    }

    pub fn record_page_view(&mut self, index: usize) {
        self.highest_page_viewed = self.highest_page_viewed.max(index);
    }

    pub fn highest_page_viewed(&self) -> usize {
        self.highest_page_viewed
    }

    /// Seconds spent in this session, with the preview clamp applied.
    pub fn session_elapsed_secs(&self) -> f64 {
        effective_session_secs(self.session_start.elapsed().as_secs_f64())
    }

    /// Total seconds to persist: prior sessions plus this one, rounded.
    pub fn total_time_spent(&self) -> u64 {
        (self.accumulated_secs + self.session_elapsed_secs()).round() as u64
    }

    /// Whether closing now should mark the comic read rather than bookmark
    /// it: either 90% of pages were viewed, or the reader is on one of the
    /// last pages (even after jumping straight there).
    pub fn is_nearly_complete(&self, current_page: usize, page_count: usize) -> bool {
        if page_count == 0 {
            return false;
        }
        let viewed_percent =
            ((self.highest_page_viewed + 1) as f64 / page_count as f64) * 100.0;
        viewed_percent >= NEARLY_COMPLETE_PERCENT
            || current_page as i64 > page_count as i64 - COMPLETION_PAGE_WINDOW
    }
}

/// Preview clamp: raw session time below the threshold contributes nothing.
pub fn effective_session_secs(raw_secs: f64) -> f64 {
    if raw_secs < PREVIEW_SESSION_SECS {
        0.0
    } else {
        raw_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sessions_contribute_nothing() {
        assert_eq!(effective_session_secs(4.0), 0.0);
        assert_eq!(effective_session_secs(9.9), 0.0);
        assert_eq!(effective_session_secs(11.0), 11.0);
    }

    #[test]
    fn high_water_mark_is_monotonic() {
        let mut tracker = ProgressTracker::new(0.0);
        tracker.record_page_view(5);
        tracker.record_page_view(2);
        assert_eq!(tracker.highest_page_viewed(), 5);
        tracker.record_page_view(7);
        assert_eq!(tracker.highest_page_viewed(), 7);
    }

    #[test]
    fn last_pages_classify_as_complete_even_after_a_jump() {
        // Page 19 of 20 reached directly: 95% viewed and inside the window.
        let mut tracker = ProgressTracker::new(0.0);
        tracker.record_page_view(18);
        assert!(tracker.is_nearly_complete(18, 20));
    }

    #[test]
    fn halfway_is_partial() {
        let mut tracker = ProgressTracker::new(0.0);
        tracker.record_page_view(10);
        // 11/20 = 55% and index 10 is not within the last pages.
        assert!(!tracker.is_nearly_complete(10, 20));
    }

    #[test]
    fn ninety_percent_viewed_is_complete_regardless_of_position() {
        let mut tracker = ProgressTracker::new(0.0);
        tracker.record_page_view(17);
        // 18/20 = 90%, reader navigated back to the start.
        assert!(tracker.is_nearly_complete(0, 20));
    }

    #[test]
    fn empty_comic_is_never_complete() {
        let tracker = ProgressTracker::new(0.0);
        assert!(!tracker.is_nearly_complete(0, 0));
    }

    #[test]
    fn accumulated_time_survives_a_preview_session() {
        let tracker = ProgressTracker::new(120.4);
        // Fresh session, elapsed well under the clamp.
        assert_eq!(tracker.total_time_spent(), 120);
    }
}
