use iced::keyboard::{Key, Modifiers, key};

use super::super::super::messages::Message;
use super::super::super::state::App;

impl App {
    /// Map raw key input to reader messages. Arrow left/right page only
    /// while un-zoomed, arrow up/down always step zoom, and Space always
    /// advances.
    pub(in crate::app::update) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        if modifiers.control() || modifiers.alt() || modifiers.logo() {
            return None;
        }
        let zoomed = self
            .reader
            .as_ref()
            .is_some_and(|reader| reader.zoom.is_zoomed());

        match key.as_ref() {
            Key::Named(key::Named::Space) => Some(Message::NextPage),
            Key::Named(key::Named::ArrowRight) if !zoomed => Some(Message::NextPage),
            Key::Named(key::Named::ArrowLeft) if !zoomed => Some(Message::PreviousPage),
            Key::Named(key::Named::ArrowUp) => Some(Message::ZoomIn),
            Key::Named(key::Named::ArrowDown) => Some(Message::ZoomOut),
            Key::Named(key::Named::Escape) => self.escape_message(),
            Key::Character(pressed) => self.character_shortcut(pressed),
            _ => None,
        }
    }

    /// Escape peels UI layers back one at a time: prompt, overlay, comic.
    fn escape_message(&self) -> Option<Message> {
        if self.session.resume_prompt.is_some() {
            Some(Message::ResumeDeclined)
        } else if self.session.next_issue_shown {
            Some(Message::NextIssueDismissed)
        } else if self.reader.is_some() {
            Some(Message::CloseComic)
        } else {
            None
        }
    }

    fn character_shortcut(&self, pressed: &str) -> Option<Message> {
        let pressed = pressed.to_ascii_lowercase();
        if key_matches(&self.config.key_save_position, "b", &pressed) {
            Some(Message::SaveReadingPosition)
        } else if key_matches(&self.config.key_toggle_chrome, "h", &pressed) {
            Some(Message::ToggleChrome)
        } else if key_matches(&self.config.key_quit, "q", &pressed) {
            Some(Message::Quit)
        } else {
            None
        }
    }
}

/// A configured binding is a single character; a blank entry falls back to
/// the built-in default.
fn key_matches(configured: &str, fallback: &str, pressed: &str) -> bool {
    let configured = configured.trim().to_ascii_lowercase();
    let wanted = if configured.is_empty() {
        fallback
    } else {
        configured.as_str()
    };
    pressed == wanted
}
