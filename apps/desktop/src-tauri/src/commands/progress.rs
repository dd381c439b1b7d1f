//! Progress and reset commands.

use crate::state::AppState;
use match_core::ProgressSummary;
use tauri::State;

use super::words::CommandError;

/// Progress panel contents.
#[derive(Debug, serde::Serialize)]
pub struct ProgressView {
    pub summary: ProgressSummary,
    pub message: Option<String>,
    pub mismatched_label: String,
    pub mastered: bool,
}

impl From<ProgressSummary> for ProgressView {
    fn from(summary: ProgressSummary) -> Self {
        Self {
            message: summary.message(),
            mismatched_label: summary.mismatched_label(),
            mastered: summary.is_mastered(),
            summary,
        }
    }
}

/// Get overall learning progress.
#[tauri::command]
pub async fn get_progress(state: State<'_, AppState>) -> Result<ProgressView, CommandError> {
    let game = state.game.lock().expect("game lock");
    Ok(game.progress().into())
}

/// Forget which words have been learned.
#[tauri::command]
pub async fn reset_learned(state: State<'_, AppState>) -> Result<ProgressView, CommandError> {
    let mut game = state.game.lock().expect("game lock");
    game.reset_learned();
    Ok(game.progress().into())
}

/// Delete every word and all progress.
#[tauri::command]
pub async fn reset_all(state: State<'_, AppState>) -> Result<ProgressView, CommandError> {
    let mut game = state.game.lock().expect("game lock");
    game.reset_all();
    Ok(game.progress().into())
}
