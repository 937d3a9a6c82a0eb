use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;

impl App {
    pub(in crate::app::update) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::OpenPathInputChanged(value) => self.open_path_input = value,
            Message::OpenPathRequested => self.handle_open_path_requested(&mut effects),
            Message::OpenRecentComic(path) => self.handle_open_comic(path, &mut effects),
            Message::SessionOpened {
                epoch,
                path,
                page_count,
                saved_page,
                time_spent,
                siblings,
            } => self.handle_session_opened(
                epoch,
                path,
                page_count,
                saved_page,
                time_spent,
                siblings,
                &mut effects,
            ),
            Message::SessionOpenFailed { epoch, path, error } => {
                self.handle_session_open_failed(epoch, path, error)
            }
            Message::PageLoaded {
                epoch,
                index,
                result,
            } => self.handle_page_loaded(epoch, index, result),
            Message::PositionSaved {
                epoch,
                path,
                result,
            } => self.handle_position_saved(epoch, path, result),
            Message::BackgroundTaskDone {
                action,
                path,
                result,
            } => Self::handle_background_task_done(action, &path, result),
            Message::NextPage => self.handle_next_page(&mut effects),
            Message::PreviousPage => self.handle_previous_page(&mut effects),
            Message::NavigateToPage(index) => self.navigate_to(index, &mut effects),
            Message::RetryPage(index) => self.handle_retry_page(index, &mut effects),
            Message::ZoomIn => self.handle_zoom_in(),
            Message::ZoomOut => self.handle_zoom_out(),
            Message::PageSurfaceTapped => self.handle_page_surface_tapped(),
            Message::WheelScrolled { delta_y } => {
                self.handle_wheel_scrolled(delta_y, &mut effects)
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Tick(now) => self.handle_tick(now),
            Message::ToggleChrome => self.handle_toggle_chrome(),
            Message::ResumeAccepted => self.handle_resume_accepted(&mut effects),
            Message::ResumeDeclined => self.handle_resume_declined(),
            Message::NextIssueAccepted => self.handle_next_issue_accepted(&mut effects),
            Message::NextIssueDismissed => self.handle_next_issue_dismissed(),
            Message::SaveReadingPosition => self.handle_save_reading_position(&mut effects),
            Message::CloseComic => self.handle_close_comic(&mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects)
            }
            Message::WindowMoved { x, y } => self.handle_window_moved(x, y, &mut effects),
            Message::Quit => self.handle_quit(&mut effects),
        }

        effects
    }
}
