use tracing::{debug, error, info, warn};

use crate::progress::ProgressTracker;
use crate::siblings::{self, Sibling};

use super::{Effect, FinalAction};
use super::super::state::{App, ReaderState, SessionPhase};

impl App {
    pub(super) fn handle_open_path_requested(&mut self, effects: &mut Vec<Effect>) {
        let path = self.open_path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        self.handle_open_comic(path, effects);
    }

    pub(super) fn handle_open_comic(&mut self, path: String, effects: &mut Vec<Effect>) {
        self.open_comic(path, None, effects);
    }

    fn open_comic(
        &mut self,
        path: String,
        known_siblings: Option<Vec<Sibling>>,
        effects: &mut Vec<Effect>,
    ) {
        if self.session.phase == SessionPhase::Opening {
            warn!(path = %path, "Ignoring open request while another open is in flight");
            return;
        }
        if self.session.phase == SessionPhase::Open {
            self.handle_close_comic(effects);
        }
        self.session.open_error = None;
        self.session.status = None;
        self.session.phase = SessionPhase::Opening;
        let epoch = self.session.next_epoch();
        info!(path = %path, "Opening comic");
        effects.push(Effect::OpenComic {
            path,
            epoch,
            siblings: known_siblings,
        });
    }

    /// Both fetches of the open join resolved: build the session and
    /// initialize the pager at page zero. A saved position only arms the
    /// resume prompt; the user's choice drives the first real navigation.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn handle_session_opened(
        &mut self,
        epoch: u64,
        path: String,
        page_count: usize,
        saved_page: Option<u32>,
        time_spent: f64,
        siblings: Vec<Sibling>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.session.is_current(epoch) {
            debug!(path = %path, "Dropping open completion from a previous session");
            return;
        }
        if self.session.phase != SessionPhase::Opening {
            return;
        }

        let sibling_index = siblings::locate(&siblings, &path);
        self.session.phase = SessionPhase::Open;
        self.session.comic_path = Some(path.clone());
        self.session.progress = Some(ProgressTracker::new(time_spent));
        self.session.saved_page = saved_page;
        self.session.bookmark_saved = saved_page.is_some();
        self.session.siblings = siblings;
        self.session.sibling_index = sibling_index;
        self.session.next_issue_shown = false;
        self.session.resume_prompt = saved_page.filter(|_| page_count > 0);
        self.reader = Some(ReaderState::new(page_count));
        if let Some(progress) = &mut self.session.progress {
            progress.record_page_view(0);
        }
        self.request_read_ahead(0, effects);
        effects.push(Effect::RememberRecent(path.clone()));
        info!(
            path = %path,
            pages = page_count,
            resume = ?self.session.resume_prompt,
            siblings = self.session.siblings.len(),
            "Comic open"
        );
    }

    pub(super) fn handle_session_open_failed(&mut self, epoch: u64, path: String, error: String) {
        if !self.session.is_current(epoch) || self.session.phase != SessionPhase::Opening {
            return;
        }
        error!(path = %path, %error, "Failed to open comic");
        self.session.phase = SessionPhase::Closed;
        self.session.open_error = Some(error);
    }

    pub(super) fn handle_resume_accepted(&mut self, effects: &mut Vec<Effect>) {
        let Some(page_number) = self.session.resume_prompt.take() else {
            return;
        };
        let target = page_number.saturating_sub(1) as usize;
        self.navigate_to(target, effects);
        info!(page = page_number, "Resumed from saved position");
    }

    pub(super) fn handle_resume_declined(&mut self) {
        if self.session.resume_prompt.take().is_some() {
            debug!("Restarting from the first page");
        }
    }

    /// Continuing implies finishing: the current issue is always marked
    /// read (which drops its bookmark), then the next sibling opens with
    /// the already-computed sibling list.
    pub(super) fn handle_next_issue_accepted(&mut self, effects: &mut Vec<Effect>) {
        if self.session.phase != SessionPhase::Open {
            return;
        }
        let Some(next) = self.session.next_sibling().cloned() else {
            return;
        };
        if let (Some(path), Some(progress), Some(reader)) = (
            &self.session.comic_path,
            &self.session.progress,
            &self.reader,
        ) {
            effects.push(Effect::FinalizeRead {
                path: path.clone(),
                page_count: reader.page_count() as u32,
                time_spent: progress.total_time_spent(),
            });
        }
        info!(next = %next.path, "Continuing to next issue");
        let siblings = std::mem::take(&mut self.session.siblings);
        self.teardown();
        self.open_comic(next.path, Some(siblings), effects);
    }

    pub(super) fn handle_next_issue_dismissed(&mut self) {
        self.session.next_issue_shown = false;
    }

    /// The explicit bookmark action: the only persistence path with
    /// user-visible feedback.
    pub(super) fn handle_save_reading_position(&mut self, effects: &mut Vec<Effect>) {
        if self.session.phase != SessionPhase::Open {
            return;
        }
        let (Some(path), Some(progress), Some(reader)) = (
            &self.session.comic_path,
            &self.session.progress,
            &self.reader,
        ) else {
            return;
        };
        effects.push(Effect::SavePosition {
            path: path.clone(),
            page_number: reader.current_page as u32 + 1,
            total_pages: reader.page_count() as u32,
            time_spent: progress.total_time_spent(),
            explicit: true,
            epoch: self.session.epoch,
        });
    }

    pub(super) fn handle_position_saved(
        &mut self,
        epoch: u64,
        path: String,
        result: Result<(), String>,
    ) {
        if !self.session.is_current(epoch)
            || self.session.comic_path.as_deref() != Some(path.as_str())
        {
            debug!(path = %path, "Dropping bookmark result from a previous session");
            return;
        }
        match result {
            Ok(()) => {
                let page = self
                    .reader
                    .as_ref()
                    .map(|reader| reader.current_page as u32 + 1);
                self.session.saved_page = page;
                self.session.bookmark_saved = true;
                self.session.status = Some("Reading position saved".to_string());
                info!(?page, "Saved reading position");
            }
            Err(error) => {
                self.session.status = Some(format!("Could not save position: {error}"));
                warn!(%error, "Explicit position save failed");
            }
        }
    }

    pub(super) fn handle_background_task_done(
        action: &'static str,
        path: &str,
        result: Result<(), String>,
    ) {
        match result {
            Ok(()) => debug!(action, path, "Background persistence finished"),
            Err(error) => warn!(action, path, %error, "Background persistence failed"),
        }
    }

    pub(super) fn handle_close_comic(&mut self, effects: &mut Vec<Effect>) {
        match self.session.phase {
            SessionPhase::Open => {}
            SessionPhase::Opening => {
                // Abort an in-flight open; the epoch bump in teardown drops
                // its completion when it lands.
                self.teardown();
                return;
            }
            SessionPhase::Closed | SessionPhase::Closing => return,
        }
        self.session.phase = SessionPhase::Closing;
        match self.close_persistence() {
            Some(FinalAction::MarkRead {
                path,
                page_count,
                time_spent,
            }) => effects.push(Effect::FinalizeRead {
                path,
                page_count,
                time_spent,
            }),
            Some(FinalAction::SavePosition {
                path,
                page_number,
                total_pages,
                time_spent,
            }) => effects.push(Effect::SavePosition {
                path,
                page_number,
                total_pages,
                time_spent,
                explicit: false,
                epoch: self.session.epoch,
            }),
            None => {}
        }
        self.teardown();
    }

    pub(super) fn handle_quit(&mut self, effects: &mut Vec<Effect>) {
        let action = if self.session.phase == SessionPhase::Open {
            self.session.phase = SessionPhase::Closing;
            self.close_persistence()
        } else {
            None
        };
        self.teardown();
        info!("Quitting");
        effects.push(Effect::Quit(action));
    }

    /// The close-time decision: exactly one of mark-read, silent auto-save,
    /// or nothing. Finishing marks the comic read, stopping partway
    /// bookmarks the page, and closing on the first page leaves no trace.
    fn close_persistence(&self) -> Option<FinalAction> {
        let path = self.session.comic_path.as_ref()?;
        let progress = self.session.progress.as_ref()?;
        let reader = self.reader.as_ref()?;
        let page_count = reader.page_count();
        if progress.is_nearly_complete(reader.current_page, page_count) {
            Some(FinalAction::MarkRead {
                path: path.clone(),
                page_count: page_count as u32,
                time_spent: progress.total_time_spent(),
            })
        } else if reader.current_page > 0 {
            Some(FinalAction::SavePosition {
                path: path.clone(),
                page_number: reader.current_page as u32 + 1,
                total_pages: page_count as u32,
                time_spent: progress.total_time_spent(),
            })
        } else {
            None
        }
    }

    fn teardown(&mut self) {
        self.reader = None;
        self.session.phase = SessionPhase::Closed;
        self.session.comic_path = None;
        self.session.progress = None;
        self.session.saved_page = None;
        self.session.bookmark_saved = false;
        self.session.siblings.clear();
        self.session.sibling_index = None;
        self.session.resume_prompt = None;
        self.session.next_issue_shown = false;
        self.session.status = None;
        self.session.next_epoch();
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.config.window_width = width;
            self.config.window_height = height;
            effects.push(Effect::SaveConfig);
        }
    }

    pub(super) fn handle_window_moved(&mut self, x: f32, y: f32, effects: &mut Vec<Effect>) {
        if x.is_finite() && y.is_finite() {
            self.config.window_pos_x = Some(x);
            self.config.window_pos_y = Some(y);
            effects.push(Effect::SaveConfig);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use super::*;

    fn persistence_effects(effects: &[Effect]) -> (usize, usize) {
        let finalizes = effects
            .iter()
            .filter(|effect| matches!(effect, Effect::FinalizeRead { .. }))
            .count();
        let saves = effects
            .iter()
            .filter(|effect| matches!(effect, Effect::SavePosition { .. }))
            .count();
        (finalizes, saves)
    }

    #[test]
    fn open_failure_returns_to_closed_with_an_error() {
        let mut app = testing::app();
        let mut effects = Vec::new();
        app.handle_open_comic("series/B.cbz".to_string(), &mut effects);
        assert_eq!(app.session.phase, SessionPhase::Opening);

        let epoch = app.session.epoch;
        app.handle_session_open_failed(epoch, "series/B.cbz".to_string(), "boom".to_string());
        assert_eq!(app.session.phase, SessionPhase::Closed);
        assert_eq!(app.session.open_error.as_deref(), Some("boom"));
        assert!(app.reader.is_none());
    }

    #[test]
    fn stale_open_completion_is_dropped() {
        let mut app = testing::app();
        let mut effects = Vec::new();
        app.handle_open_comic("series/B.cbz".to_string(), &mut effects);
        let old_epoch = app.session.epoch;
        app.handle_close_comic(&mut effects);

        app.handle_session_opened(
            old_epoch,
            "series/B.cbz".to_string(),
            10,
            None,
            0.0,
            Vec::new(),
            &mut effects,
        );
        assert_eq!(app.session.phase, SessionPhase::Closed);
        assert!(app.reader.is_none());
    }

    #[test]
    fn saved_position_arms_the_resume_prompt_and_gates_navigation() {
        let mut app = testing::opened("series/B.cbz", 50, Some(30), Vec::new());
        assert_eq!(app.session.resume_prompt, Some(30));
        assert!(app.session.bookmark_saved);

        // Navigation is inert until the prompt is answered.
        let mut effects = Vec::new();
        app.navigate_to(5, &mut effects);
        assert_eq!(app.reader.as_ref().unwrap().current_page, 0);

        app.handle_resume_accepted(&mut effects);
        assert_eq!(app.session.resume_prompt, None);
        assert_eq!(app.reader.as_ref().unwrap().current_page, 29);
    }

    #[test]
    fn declining_the_prompt_stays_on_the_first_page() {
        let mut app = testing::opened("series/B.cbz", 50, Some(30), Vec::new());
        app.handle_resume_declined();
        assert_eq!(app.session.resume_prompt, None);
        assert_eq!(app.reader.as_ref().unwrap().current_page, 0);
    }

    #[test]
    fn no_saved_position_means_no_prompt() {
        let app = testing::opened("series/B.cbz", 50, None, Vec::new());
        assert_eq!(app.session.resume_prompt, None);
        assert!(!app.session.bookmark_saved);
    }

    #[test]
    fn closing_partway_saves_exactly_one_position() {
        let mut app = testing::opened("series/B.cbz", 20, None, Vec::new());
        let mut effects = Vec::new();
        app.navigate_to(10, &mut effects);

        let mut effects = Vec::new();
        app.handle_close_comic(&mut effects);
        let (finalizes, saves) = persistence_effects(&effects);
        assert_eq!((finalizes, saves), (0, 1));
        match &effects[0] {
            Effect::SavePosition {
                page_number,
                total_pages,
                explicit,
                ..
            } => {
                assert_eq!(*page_number, 11);
                assert_eq!(*total_pages, 20);
                assert!(!explicit);
            }
            other => panic!("unexpected effect: {other:?}"),
        }
        assert_eq!(app.session.phase, SessionPhase::Closed);
    }

    #[test]
    fn closing_near_the_end_marks_read_and_nothing_else() {
        let mut app = testing::opened("series/B.cbz", 20, None, Vec::new());
        let mut effects = Vec::new();
        app.navigate_to(18, &mut effects);

        let mut effects = Vec::new();
        app.handle_close_comic(&mut effects);
        let (finalizes, saves) = persistence_effects(&effects);
        assert_eq!((finalizes, saves), (1, 0));
    }

    #[test]
    fn closing_on_the_first_page_persists_nothing() {
        let mut app = testing::opened("series/B.cbz", 20, None, Vec::new());
        let mut effects = Vec::new();
        app.handle_close_comic(&mut effects);
        let (finalizes, saves) = persistence_effects(&effects);
        assert_eq!((finalizes, saves), (0, 0));
    }

    #[test]
    fn continuing_marks_read_and_reuses_the_sibling_list() {
        let siblings = vec![
            testing::sibling("A.cbz"),
            testing::sibling("B.cbz"),
            testing::sibling("C.cbz"),
        ];
        let mut app = testing::opened("series/B.cbz", 10, None, siblings.clone());
        let mut effects = Vec::new();
        app.navigate_to(9, &mut effects);
        assert!(app.session.next_issue_shown);

        let mut effects = Vec::new();
        app.handle_next_issue_accepted(&mut effects);
        let (finalizes, _) = persistence_effects(&effects);
        assert_eq!(finalizes, 1);
        assert_eq!(app.session.phase, SessionPhase::Opening);

        // The preserved sibling list arrives with the new open effect.
        let reused = effects.iter().find_map(|effect| match effect {
            Effect::OpenComic { path, siblings, .. } => Some((path.clone(), siblings.clone())),
            _ => None,
        });
        let (path, reused) = reused.expect("an open effect for the next issue");
        assert_eq!(path, "series/C.cbz");
        assert_eq!(reused, Some(siblings));

        // Completing the open locates the new comic in the same list.
        let epoch = app.session.epoch;
        app.handle_session_opened(
            epoch,
            "series/C.cbz".to_string(),
            12,
            None,
            0.0,
            reused.unwrap(),
            &mut Vec::new(),
        );
        assert_eq!(app.session.sibling_index, Some(2));
        assert_eq!(app.reader.as_ref().unwrap().current_page, 0);
    }

    #[test]
    fn explicit_save_reports_back_and_updates_the_indicator() {
        let mut app = testing::opened("series/B.cbz", 20, None, Vec::new());
        let mut effects = Vec::new();
        app.navigate_to(4, &mut effects);

        let mut effects = Vec::new();
        app.handle_save_reading_position(&mut effects);
        let Some(Effect::SavePosition {
            page_number,
            explicit,
            epoch,
            ..
        }) = effects.first()
        else {
            panic!("expected a save effect");
        };
        assert_eq!(*page_number, 5);
        assert!(*explicit);

        app.handle_position_saved(*epoch, "series/B.cbz".to_string(), Ok(()));
        assert!(app.session.bookmark_saved);
        assert_eq!(app.session.saved_page, Some(5));
        assert_eq!(
            app.session.status.as_deref(),
            Some("Reading position saved")
        );
    }

    #[test]
    fn bookmark_result_for_another_comic_is_ignored() {
        let mut app = testing::opened("series/B.cbz", 20, None, Vec::new());
        let epoch = app.session.epoch;
        app.handle_position_saved(epoch, "series/OTHER.cbz".to_string(), Ok(()));
        assert!(!app.session.bookmark_saved);
    }
}
