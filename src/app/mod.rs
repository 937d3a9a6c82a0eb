mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use iced::{Point, Size, window};

use crate::api::ApiClient;
use crate::config::AppConfig;

/// Launch the GUI. `initial_comic` (from the command line) opens right after
/// startup.
pub fn run_app(
    config: AppConfig,
    api: ApiClient,
    initial_comic: Option<String>,
) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        position: match (config.window_pos_x, config.window_pos_y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                window::Position::Specific(Point::new(x, y))
            }
            _ => window::Position::Default,
        },
        ..window::Settings::default()
    };

    iced::application("Comic Viewer", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| crate::theme::Theme::from(app.config.theme).into())
        .run_with(move || App::bootstrap(config, api, initial_comic))
}
