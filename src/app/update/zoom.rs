use tracing::debug;

use super::super::state::{App, DOUBLE_TAP_ZOOM};

impl App {
    pub(super) fn handle_zoom_in(&mut self) {
        if let Some(reader) = &mut self.reader {
            reader.zoom.step_in();
            debug!(scale = reader.zoom.scale(), "Zoom in");
        }
    }

    pub(super) fn handle_zoom_out(&mut self) {
        if let Some(reader) = &mut self.reader {
            reader.zoom.step_out();
            debug!(scale = reader.zoom.scale(), "Zoom out");
        }
    }

    /// Double-tap toggles between un-zoomed and a fixed comfortable scale.
    pub(super) fn toggle_tap_zoom(&mut self) {
        if let Some(reader) = &mut self.reader {
            if reader.zoom.is_zoomed() {
                reader.zoom.reset();
            } else {
                reader.zoom.set_scale(DOUBLE_TAP_ZOOM);
            }
            debug!(scale = reader.zoom.scale(), "Double-tap zoom");
        }
    }
}
