// TokenDeck - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Config loading and API client construction
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use tokendeck::api;
pub use tokendeck::app;
pub use tokendeck::core;
pub use tokendeck::platform;
pub use tokendeck::ui;
pub use tokendeck::util;

use crate::api::client::{ApiClient, ApiConfig};
use crate::api::worker::ApiWorker;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

/// TokenDeck - Desktop console for token and usage-log administration.
///
/// Point TokenDeck at a backend to browse usage logs and manage API
/// tokens in paginated, searchable tables.
#[derive(Parser, Debug)]
#[command(name = "TokenDeck", version, about)]
struct Cli {
    /// Backend base URL (overrides config.toml).
    #[arg(short = 's', long = "server")]
    server: Option<String>,

    /// Access token for Bearer authentication (overrides config.toml).
    #[arg(short = 't', long = "token")]
    token: Option<String>,

    /// Display name shown in the navigation bar.
    #[arg(short = 'u', long = "user")]
    user: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging init so the
    // configured level can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "TokenDeck starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    // CLI overrides take precedence over config.toml.
    let api_config = ApiConfig {
        base_url: cli.server.unwrap_or_else(|| config.base_url.clone()),
        access_token: cli.token.or_else(|| config.access_token.clone()),
        timeout: Duration::from_secs(config.timeout_secs),
    };

    let client = match ApiClient::new(&api_config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to construct HTTP client");
            eprintln!("Error: could not set up the HTTP client: {e}");
            std::process::exit(1);
        }
    };
    let worker = ApiWorker::new(Arc::new(client));

    // Create application state and stage the initial loads for both tables.
    let mut state = app::state::AppState::new(config.page_size, cli.user);
    let plan = state.logs.begin_load(0);
    state.request_logs_plan(plan);
    let plan = state.tokens.begin_load(0);
    state.request_tokens_plan(plan);

    let dark_mode = config.dark_mode;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(gui::TokenDeckApp::new(state, worker)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch TokenDeck GUI: {e}");
        std::process::exit(1);
    }
}
