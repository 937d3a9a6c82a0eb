use std::time::Instant;

use crate::pages::PageStore;
use crate::zoom::ZoomState;

use super::constants::DOUBLE_TAP_WINDOW;

/// Pager model for the open comic.
pub struct ReaderState {
    pub(in crate::app) pages: PageStore,
    pub(in crate::app) current_page: usize,
    pub(in crate::app) zoom: ZoomState,
    pub(in crate::app) chrome_visible: bool,
    pub(in crate::app) pending_tap: Option<Instant>,
    pub(in crate::app) last_wheel_nav: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::app) enum TapKind {
    Single,
    Double,
}

impl ReaderState {
    pub(in crate::app) fn new(page_count: usize) -> Self {
        Self {
            pages: PageStore::new(page_count),
            current_page: 0,
            zoom: ZoomState::new(),
            chrome_visible: true,
            pending_tap: None,
            last_wheel_nav: None,
        }
    }

    pub(in crate::app) fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Classify a tap against the double-tap window. A second tap inside the
    /// window consumes the pending one so the armed chrome toggle never
    /// fires.
    pub(in crate::app) fn register_tap(&mut self, now: Instant) -> TapKind {
        if let Some(previous) = self.pending_tap.take() {
            if now.duration_since(previous) <= DOUBLE_TAP_WINDOW {
                return TapKind::Double;
            }
        }
        self.pending_tap = Some(now);
        TapKind::Single
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn rapid_second_tap_is_a_double_tap() {
        let mut reader = ReaderState::new(10);
        let start = Instant::now();
        assert_eq!(reader.register_tap(start), TapKind::Single);
        assert_eq!(
            reader.register_tap(start + Duration::from_millis(150)),
            TapKind::Double
        );
        assert!(reader.pending_tap.is_none());
    }

    #[test]
    fn slow_second_tap_arms_a_new_single_tap() {
        let mut reader = ReaderState::new(10);
        let start = Instant::now();
        assert_eq!(reader.register_tap(start), TapKind::Single);
        assert_eq!(
            reader.register_tap(start + Duration::from_millis(800)),
            TapKind::Single
        );
        assert!(reader.pending_tap.is_some());
    }
}
