use std::path::Path;

use iced::event::{self, Event};
use iced::widget::image::Handle;
use iced::{Task, keyboard, mouse, window};
use tracing::warn;

use crate::api::ApiClient;
use crate::siblings::{self, Sibling};
use crate::{cache, config, pages};

use super::super::super::messages::{LoadedPage, Message};
use super::super::super::state::App;
use super::super::{Effect, FinalAction};

const CONFIG_PATH: &str = "conf/config.toml";

impl App {
    pub(in crate::app::update) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::OpenComic {
                path,
                epoch,
                siblings,
            } => {
                let api = self.api.clone();
                Task::perform(open_session(api, path, epoch, siblings), |message| message)
            }
            Effect::LoadPage { path, index, epoch } => {
                let api = self.api.clone();
                Task::perform(load_page(api, path, index, epoch), |message| message)
            }
            Effect::SavePosition {
                path,
                page_number,
                total_pages,
                time_spent,
                explicit,
                epoch,
            } => {
                let api = self.api.clone();
                Task::perform(
                    async move {
                        let result = api
                            .save_position(&path, page_number, total_pages, time_spent)
                            .await
                            .map_err(|err| err.to_string());
                        if explicit {
                            Message::PositionSaved {
                                epoch,
                                path,
                                result,
                            }
                        } else {
                            Message::BackgroundTaskDone {
                                action: "auto-save position",
                                path,
                                result,
                            }
                        }
                    },
                    |message| message,
                )
            }
            Effect::FinalizeRead {
                path,
                page_count,
                time_spent,
            } => {
                let api = self.api.clone();
                Task::perform(
                    async move {
                        let result = finalize_read(&api, &path, page_count, time_spent)
                            .await
                            .map_err(|err| err.to_string());
                        Message::BackgroundTaskDone {
                            action: "mark read",
                            path,
                            result,
                        }
                    },
                    |message| message,
                )
            }
            Effect::RememberRecent(path) => {
                cache::remember(&path);
                self.recent = cache::list_recent();
                Task::none()
            }
            Effect::SaveConfig => {
                config::save_config(Path::new(CONFIG_PATH), &self.config);
                Task::none()
            }
            Effect::Quit(action) => {
                let api = self.api.clone();
                Task::future(async move {
                    match action {
                        Some(FinalAction::MarkRead {
                            path,
                            page_count,
                            time_spent,
                        }) => {
                            if let Err(err) =
                                finalize_read(&api, &path, page_count, time_spent).await
                            {
                                warn!(path = %path, "Final mark-read on quit failed: {err}");
                            }
                        }
                        Some(FinalAction::SavePosition {
                            path,
                            page_number,
                            total_pages,
                            time_spent,
                        }) => {
                            if let Err(err) = api
                                .save_position(&path, page_number, total_pages, time_spent)
                                .await
                            {
                                warn!(path = %path, "Final position save on quit failed: {err}");
                            }
                        }
                        None => {}
                    }
                })
                .discard()
                .chain(iced::exit())
            }
        }
    }
}

/// Join the comic metadata and saved-position fetches; the session only
/// opens once both resolve. The sibling listing rides along in the same
/// join but is non-fatal: without it only next-issue navigation is lost.
async fn open_session(
    api: ApiClient,
    path: String,
    epoch: u64,
    known_siblings: Option<Vec<Sibling>>,
) -> Message {
    let dir = siblings::parent_dir(&path).to_string();
    let sibling_future = async {
        match known_siblings {
            Some(list) => list,
            None => match api.list_directory(&dir).await {
                Ok(entries) => siblings::siblings_from_listing(&entries),
                Err(err) => {
                    warn!(dir = %dir, "Directory listing failed; next-issue navigation disabled: {err}");
                    Vec::new()
                }
            },
        }
    };
    let (info, position, siblings) = tokio::join!(
        api.comic_info(&path),
        api.load_position(&path),
        sibling_future
    );
    let (info, position) = match (info, position) {
        (Ok(info), Ok(position)) => (info, position),
        (Err(err), _) | (_, Err(err)) => {
            return Message::SessionOpenFailed {
                epoch,
                path,
                error: err.to_string(),
            };
        }
    };
    Message::SessionOpened {
        epoch,
        path,
        page_count: info.page_count as usize,
        saved_page: position.page_number,
        time_spent: position.time_spent,
        siblings,
    }
}

async fn load_page(api: ApiClient, path: String, index: usize, epoch: u64) -> Message {
    let result = match api.fetch_page(&path, index).await {
        Ok(bytes) => match image::load_from_memory(&bytes) {
            Ok(decoded) => {
                let edge_color = pages::edge_color_of(&decoded);
                Ok(LoadedPage {
                    handle: Handle::from_bytes(bytes),
                    edge_color,
                })
            }
            Err(err) => Err(format!("decode page image: {err}")),
        },
        Err(err) => Err(err.to_string()),
    };
    Message::PageLoaded {
        epoch,
        index,
        result,
    }
}

async fn finalize_read(
    api: &ApiClient,
    path: &str,
    page_count: u32,
    time_spent: u64,
) -> anyhow::Result<()> {
    api.mark_read(path, page_count, time_spent).await?;
    api.clear_position(path).await?;
    Ok(())
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            let delta_y = match delta {
                mouse::ScrollDelta::Lines { y, .. } => y,
                mouse::ScrollDelta::Pixels { y, .. } => y,
            };
            Some(Message::WheelScrolled { delta_y })
        }
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Window(window::Event::Moved(position)) => Some(Message::WindowMoved {
            x: position.x,
            y: position.y,
        }),
        _ => None,
    }
}
