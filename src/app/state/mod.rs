mod constants;
mod reader;
mod session;

pub(crate) use constants::*;
pub(in crate::app) use reader::{ReaderState, TapKind};
pub(in crate::app) use session::SessionState;
pub(crate) use session::SessionPhase;

use iced::Task;

use crate::api::ApiClient;
use crate::cache::{self, RecentComic};
use crate::config::AppConfig;

use super::messages::Message;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) api: ApiClient,
    pub(super) session: SessionState,
    pub(super) reader: Option<ReaderState>,
    pub(super) open_path_input: String,
    pub(super) recent: Vec<RecentComic>,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        api: ApiClient,
        initial_comic: Option<String>,
    ) -> (App, Task<Message>) {
        let mut app = App {
            config,
            api,
            session: SessionState::new(),
            reader: None,
            open_path_input: String::new(),
            recent: cache::list_recent(),
        };
        let task = match initial_comic {
            Some(path) => app.update(Message::OpenRecentComic(path)),
            None => Task::none(),
        };
        (app, task)
    }
}
