use std::time::Instant;

use tracing::debug;

use super::Effect;
use super::super::state::{App, DOUBLE_TAP_WINDOW, SessionPhase, TapKind, WHEEL_NAV_DEBOUNCE};

impl App {
    /// First tap arms the chrome toggle; a second tap inside the window
    /// cancels it and toggles zoom instead, so double-tap-to-zoom never
    /// also flips chrome visibility.
    pub(super) fn handle_page_surface_tapped(&mut self) {
        let Some(reader) = &mut self.reader else {
            return;
        };
        match reader.register_tap(Instant::now()) {
            TapKind::Double => self.toggle_tap_zoom(),
            TapKind::Single => {
                if reader.zoom.is_zoomed() {
                    // Taps while zoomed belong to panning.
                    reader.pending_tap = None;
                }
            }
        }
    }

    /// Resolve a pending single tap once the double-tap window has passed.
    pub(super) fn handle_tick(&mut self, now: Instant) {
        let Some(reader) = &mut self.reader else {
            return;
        };
        if let Some(started) = reader.pending_tap {
            if now.duration_since(started) >= DOUBLE_TAP_WINDOW {
                reader.pending_tap = None;
                reader.chrome_visible = !reader.chrome_visible;
                debug!(visible = reader.chrome_visible, "Toggled chrome");
            }
        }
    }

    pub(super) fn handle_toggle_chrome(&mut self) {
        if let Some(reader) = &mut self.reader {
            reader.chrome_visible = !reader.chrome_visible;
        }
    }

    /// Wheel input pages only while un-zoomed; zoomed wheel input pans and
    /// is captured by the scroll surface before it gets here. The debounce
    /// keeps one physical scroll gesture from skipping several pages.
    pub(super) fn handle_wheel_scrolled(&mut self, delta_y: f32, effects: &mut Vec<Effect>) {
        if self.session.phase != SessionPhase::Open {
            return;
        }
        let Some(reader) = &mut self.reader else {
            return;
        };
        if reader.zoom.is_zoomed() || delta_y == 0.0 {
            return;
        }
        let now = Instant::now();
        if reader
            .last_wheel_nav
            .is_some_and(|last| now.duration_since(last) < WHEEL_NAV_DEBOUNCE)
        {
            return;
        }
        reader.last_wheel_nav = Some(now);
        if delta_y < 0.0 {
            self.handle_next_page(effects);
        } else {
            self.handle_previous_page(effects);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use std::time::Duration;

    #[test]
    fn tick_toggles_chrome_after_the_window_passes() {
        let mut app = testing::opened("series/B.cbz", 10, None, Vec::new());
        app.handle_page_surface_tapped();
        let started = app.reader.as_ref().unwrap().pending_tap.unwrap();

        // Inside the window nothing happens yet.
        app.handle_tick(started + Duration::from_millis(100));
        assert!(app.reader.as_ref().unwrap().chrome_visible);

        app.handle_tick(started + Duration::from_millis(350));
        let reader = app.reader.as_ref().unwrap();
        assert!(!reader.chrome_visible);
        assert!(reader.pending_tap.is_none());
    }

    #[test]
    fn double_tap_zooms_instead_of_toggling_chrome() {
        let mut app = testing::opened("series/B.cbz", 10, None, Vec::new());
        app.handle_page_surface_tapped();
        app.handle_page_surface_tapped();

        let reader = app.reader.as_ref().unwrap();
        assert!(reader.zoom.is_zoomed());
        assert!(reader.pending_tap.is_none());
        assert!(reader.chrome_visible);
    }

    #[test]
    fn wheel_navigation_ignores_input_while_zoomed() {
        let mut app = testing::opened("series/B.cbz", 10, None, Vec::new());
        app.reader.as_mut().unwrap().zoom.step_in();
        let mut effects = Vec::new();
        app.handle_wheel_scrolled(-1.0, &mut effects);
        assert_eq!(app.reader.as_ref().unwrap().current_page, 0);
    }

    #[test]
    fn wheel_navigation_is_debounced() {
        let mut app = testing::opened("series/B.cbz", 10, None, Vec::new());
        let mut effects = Vec::new();
        app.handle_wheel_scrolled(-1.0, &mut effects);
        app.handle_wheel_scrolled(-1.0, &mut effects);
        app.handle_wheel_scrolled(-1.0, &mut effects);
        // Only the first event of the burst navigates.
        assert_eq!(app.reader.as_ref().unwrap().current_page, 1);
    }
}
