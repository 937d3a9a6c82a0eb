use serde::{Deserialize, Serialize};

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub window_pos_x: Option<f32>,
    #[serde(default)]
    pub window_pos_y: Option<f32>,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_save_position")]
    pub key_save_position: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_chrome")]
    pub key_toggle_chrome: String,
    #[serde(default = "crate::config::defaults::default_key_quit")]
    pub key_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server_url: crate::config::defaults::default_server_url(),
            theme: ThemeMode::default(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            window_pos_x: None,
            window_pos_y: None,
            log_level: crate::config::defaults::default_log_level(),
            key_save_position: crate::config::defaults::default_key_save_position(),
            key_toggle_chrome: crate::config::defaults::default_key_toggle_chrome(),
            key_quit: crate::config::defaults::default_key_quit(),
        }
    }
}

/// Theme mode for the reader chrome.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Night
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
