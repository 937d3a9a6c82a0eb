mod core;
mod input;
mod navigation;
mod session;
mod zoom;

use crate::siblings::Sibling;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug)]
pub(super) enum Effect {
    OpenComic {
        path: String,
        epoch: u64,
        siblings: Option<Vec<Sibling>>,
    },
    LoadPage {
        path: String,
        index: usize,
        epoch: u64,
    },
    SavePosition {
        path: String,
        page_number: u32,
        total_pages: u32,
        time_spent: u64,
        explicit: bool,
        epoch: u64,
    },
    /// Mark the comic read and drop its bookmark; finishing and pausing are
    /// mutually exclusive.
    FinalizeRead {
        path: String,
        page_count: u32,
        time_spent: u64,
    },
    RememberRecent(String),
    SaveConfig,
    Quit(Option<FinalAction>),
}

/// Persistence decided when a session ends: exactly one of these, or none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum FinalAction {
    MarkRead {
        path: String,
        page_count: u32,
        time_spent: u64,
    },
    SavePosition {
        path: String,
        page_number: u32,
        total_pages: u32,
        time_spent: u64,
    },
}

#[cfg(test)]
mod testing {
    use crate::api::ApiClient;
    use crate::config::AppConfig;
    use crate::siblings::Sibling;

    use super::super::state::{App, SessionState};

    pub(super) fn app() -> App {
        App {
            config: AppConfig::default(),
            api: ApiClient::new("http://127.0.0.1:1").unwrap(),
            session: SessionState::new(),
            reader: None,
            open_path_input: String::new(),
            recent: Vec::new(),
        }
    }

    pub(super) fn sibling(name: &str) -> Sibling {
        Sibling {
            path: format!("series/{name}"),
            display_name: name.trim_end_matches(".cbz").to_string(),
            thumbnail_ref: None,
        }
    }

    /// An app with `path` opened: drives the real open flow and then feeds
    /// the completion message the runtime would produce.
    pub(super) fn opened(
        path: &str,
        page_count: usize,
        saved_page: Option<u32>,
        siblings: Vec<Sibling>,
    ) -> App {
        let mut app = app();
        let mut effects = Vec::new();
        app.handle_open_comic(path.to_string(), &mut effects);
        let epoch = app.session.epoch;
        app.handle_session_opened(
            epoch,
            path.to_string(),
            page_count,
            saved_page,
            0.0,
            siblings,
            &mut Vec::new(),
        );
        app
    }
}
