pub(crate) fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

pub(crate) fn default_window_width() -> f32 {
    900.0
}

pub(crate) fn default_window_height() -> f32 {
    1200.0
}

pub(crate) fn default_log_level() -> super::LogLevel {
    super::LogLevel::Info
}

pub(crate) fn default_key_save_position() -> String {
    "b".to_string()
}

pub(crate) fn default_key_toggle_chrome() -> String {
    "h".to_string()
}

pub(crate) fn default_key_quit() -> String {
    "q".to_string()
}
