use std::time::Duration;

use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Tunables for the paging engine. The radii and debounce windows are
/// behavioral contract; change them deliberately, not in passing.
pub(crate) const READ_AHEAD_AFTER: usize = 2;
pub(crate) const READ_AHEAD_BEFORE: usize = 1;
pub(crate) const KEEP_RADIUS: usize = 5;

/// A second tap within this window is a double tap.
pub(crate) const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
/// Wheel navigation ignores further wheel events for this long.
pub(crate) const WHEEL_NAV_DEBOUNCE: Duration = Duration::from_millis(50);
/// Scale a double tap zooms to; the middle of the step table so a further
/// step in still has headroom.
pub(crate) const DOUBLE_TAP_ZOOM: f32 = 2.33;
/// Cadence of the timer that resolves pending single taps.
pub(crate) const TAP_TICK_INTERVAL: Duration = Duration::from_millis(50);

pub(crate) static PAGE_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("page-scroll"));
