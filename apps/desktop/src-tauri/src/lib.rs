mod commands;
mod db;
mod speech;
mod state;

use anyhow::Context;
use db::{SettingsRepository, SqliteRepository};
use match_core::{Game, GameSettings};
use state::AppState;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn get_db_path() -> PathBuf {
    // Use app data directory for production, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("word-match")
        .join("word-match.db")
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_game() -> anyhow::Result<Game<SqliteRepository>> {
    let db_path = get_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let repository = SqliteRepository::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    let settings = repository.get_settings().unwrap_or_else(|e| {
        tracing::warn!("Using default settings: {}", e);
        GameSettings::default()
    });
    tracing::info!("Database opened at {}", db_path.display());

    Ok(Game::open(repository, settings))
}

fn start() -> anyhow::Result<()> {
    let app_state = AppState::new(open_game()?);

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // Word commands
            commands::words::import_csv,
            commands::words::import_directory,
            commands::words::list_words,
            // Game commands
            commands::game::generate_game,
            commands::game::click_item,
            commands::game::stop_game,
            // Progress commands
            commands::progress::get_progress,
            commands::progress::reset_learned,
            commands::progress::reset_all,
            // Settings commands
            commands::settings::get_settings,
            commands::settings::save_settings,
            // Speech commands
            commands::speech::pronounce,
        ])
        .run(tauri::generate_context!())
        .context("error while running tauri application")
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    if let Err(e) = start() {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
