use tracing::{debug, info, warn};

use super::Effect;
use super::super::messages::LoadedPage;
use super::super::state::{App, KEEP_RADIUS, READ_AHEAD_AFTER, READ_AHEAD_BEFORE, SessionPhase};

impl App {
    pub(super) fn handle_next_page(&mut self, effects: &mut Vec<Effect>) {
        if let Some(reader) = &self.reader {
            let target = reader.current_page.saturating_add(1);
            self.navigate_to(target, effects);
        }
    }

    pub(super) fn handle_previous_page(&mut self, effects: &mut Vec<Effect>) {
        if let Some(reader) = &self.reader {
            let target = reader.current_page.saturating_sub(1);
            self.navigate_to(target, effects);
        }
    }

    /// One navigation step: clamp into range, ignore no-ops, reset zoom,
    /// record the view, schedule the read-ahead window, evict distant pages
    /// and drive the next-issue overlay when the last page is reached.
    pub(super) fn navigate_to(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if self.session.phase != SessionPhase::Open || self.session.resume_prompt.is_some() {
            return;
        }
        let Some(reader) = &mut self.reader else {
            return;
        };
        let page_count = reader.page_count();
        if page_count == 0 {
            return;
        }
        let target = index.min(page_count - 1);
        if target == reader.current_page {
            return;
        }

        reader.current_page = target;
        reader.zoom.reset();
        if let Some(progress) = &mut self.session.progress {
            progress.record_page_view(target);
        }
        self.request_read_ahead(target, effects);
        if let Some(reader) = &mut self.reader {
            reader.pages.evict_distant(target, KEEP_RADIUS);
        }
        info!(page = target + 1, "Navigated to page");

        if target + 1 == page_count {
            if !self.session.next_issue_shown && self.session.next_sibling().is_some() {
                self.session.next_issue_shown = true;
                debug!("Showing next-issue overlay");
            }
        } else {
            self.session.next_issue_shown = false;
        }
    }

    /// Schedule loads for the window around `center`: the page itself, two
    /// ahead, one behind. Only slots that actually transitioned to loading
    /// produce fetches, so overlapping windows never double-fetch.
    pub(super) fn request_read_ahead(&mut self, center: usize, effects: &mut Vec<Effect>) {
        let Some(path) = self.session.comic_path.clone() else {
            return;
        };
        let epoch = self.session.epoch;
        let Some(reader) = &mut self.reader else {
            return;
        };
        for index in read_ahead_indices(center, reader.page_count()) {
            if reader.pages.begin_load(index) {
                effects.push(Effect::LoadPage {
                    path: path.clone(),
                    index,
                    epoch,
                });
            }
        }
    }

    pub(super) fn handle_retry_page(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(path) = self.session.comic_path.clone() else {
            return;
        };
        let epoch = self.session.epoch;
        let Some(reader) = &mut self.reader else {
            return;
        };
        if reader.pages.begin_load(index) {
            effects.push(Effect::LoadPage { path, index, epoch });
        }
    }

    pub(super) fn handle_page_loaded(
        &mut self,
        epoch: u64,
        index: usize,
        result: Result<LoadedPage, String>,
    ) {
        if !self.session.is_current(epoch) {
            debug!(index, "Dropping page load from a previous session");
            return;
        }
        let Some(reader) = &mut self.reader else {
            return;
        };
        match result {
            Ok(page) => reader.pages.finish_load(index, page.handle, page.edge_color),
            Err(error) => {
                warn!(index, %error, "Page load failed");
                reader.pages.fail_load(index);
            }
        }
    }
}

fn read_ahead_indices(center: usize, page_count: usize) -> Vec<usize> {
    let mut indices = vec![center];
    for offset in 1..=READ_AHEAD_AFTER {
        if center + offset < page_count {
            indices.push(center + offset);
        }
    }
    for offset in 1..=READ_AHEAD_BEFORE {
        if center >= offset {
            indices.push(center - offset);
        }
    }
    indices
}
