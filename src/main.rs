//! Entry point for the comic viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Initialize logging with a reloadable filter.
//! - Load user configuration from `conf/config.toml`.
//! - Construct the backend client from the configured server URL.
//! - Launch the GUI, optionally opening a comic passed on the command line.

mod api;
mod app;
mod cache;
mod config;
mod pages;
mod progress;
mod siblings;
mod theme;
mod zoom;

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

use crate::api::ApiClient;
use crate::app::run_app;
use crate::config::load_config;

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());

    let initial_comic = env::args().nth(1);
    info!(
        server = %config.server_url,
        comic = ?initial_comic,
        "Starting comic viewer"
    );

    let api = ApiClient::new(&config.server_url)
        .context("backend client setup; check server_url in conf/config.toml")?;
    run_app(config, api, initial_comic).context("Failed to start the GUI")?;
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
