use std::time::Instant;

use iced::keyboard::{Key, Modifiers};

use crate::pages::EdgeColor;
use crate::siblings::Sibling;

/// Messages emitted by the UI and by completed background work. Async
/// completions carry the session epoch they were issued under; the reducer
/// drops anything from a torn-down session.
#[derive(Debug, Clone)]
pub enum Message {
    // Open screen
    OpenPathInputChanged(String),
    OpenPathRequested,
    OpenRecentComic(String),
    // Session lifecycle completions
    SessionOpened {
        epoch: u64,
        path: String,
        page_count: usize,
        saved_page: Option<u32>,
        time_spent: f64,
        siblings: Vec<Sibling>,
    },
    SessionOpenFailed {
        epoch: u64,
        path: String,
        error: String,
    },
    PageLoaded {
        epoch: u64,
        index: usize,
        result: Result<LoadedPage, String>,
    },
    PositionSaved {
        epoch: u64,
        path: String,
        result: Result<(), String>,
    },
    BackgroundTaskDone {
        action: &'static str,
        path: String,
        result: Result<(), String>,
    },
    // Navigation and zoom
    NextPage,
    PreviousPage,
    NavigateToPage(usize),
    RetryPage(usize),
    ZoomIn,
    ZoomOut,
    // Raw input
    PageSurfaceTapped,
    WheelScrolled { delta_y: f32 },
    KeyPressed { key: Key, modifiers: Modifiers },
    Tick(Instant),
    ToggleChrome,
    // Prompts and explicit actions
    ResumeAccepted,
    ResumeDeclined,
    NextIssueAccepted,
    NextIssueDismissed,
    SaveReadingPosition,
    CloseComic,
    // Window bookkeeping
    WindowResized { width: f32, height: f32 },
    WindowMoved { x: f32, y: f32 },
    Quit,
}

/// A fetched and decoded page ready for the store.
#[derive(Debug, Clone)]
pub struct LoadedPage {
    pub handle: iced::widget::image::Handle,
    pub edge_color: EdgeColor,
}
