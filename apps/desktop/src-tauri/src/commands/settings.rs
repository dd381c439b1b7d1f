//! Settings-related Tauri commands.

use crate::db::SettingsRepository;
use crate::state::AppState;
use match_core::GameSettings;
use tauri::State;

use super::words::CommandError;

/// Get game settings.
#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<GameSettings, CommandError> {
    let game = state.game.lock().expect("game lock");
    Ok(game.settings().clone())
}

/// Save game settings. They apply from the next generated game.
#[tauri::command]
pub async fn save_settings(
    settings: GameSettings,
    state: State<'_, AppState>,
) -> Result<(), CommandError> {
    let mut game = state.game.lock().expect("game lock");
    game.backend().save_settings(&settings)?;
    game.set_settings(settings).map_err(Into::into)
}
