//! Game-play commands.

use crate::state::AppState;
use match_core::{BoardLayout, ClickOutcome, PendingReset, ProgressSummary, Settlement, SlotRef};
use tauri::{AppHandle, Emitter, Manager, State};

use super::words::CommandError;

pub const MISMATCH_RESET_EVENT: &str = "mismatch-reset";

/// Response to a click on the board.
#[derive(Debug, serde::Serialize)]
pub struct ClickResponse {
    pub outcome: ClickOutcome,
    pub status: String,
    pub progress: ProgressSummary,
}

/// Payload of the `mismatch-reset` event.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MismatchReset {
    pub term_slot: SlotRef,
    pub definition_slot: SlotRef,
    /// Absent when a match has been made since the mismatch.
    pub prompt: Option<String>,
}

/// Start a new game.
#[tauri::command]
pub async fn generate_game(
    cards_per_game: Option<usize>,
    state: State<'_, AppState>,
) -> Result<BoardLayout, CommandError> {
    let mut game = state.game.lock().expect("game lock");
    game.generate(cards_per_game).map_err(Into::into)
}

/// Handle a click on a term or definition.
#[tauri::command]
pub async fn click_item(
    slot: SlotRef,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<ClickResponse, CommandError> {
    let mut game = state.game.lock().expect("game lock");
    let outcome = game.click(&slot);

    if let ClickOutcome::Mismatched { reset, .. } = &outcome {
        schedule_reset(app, reset.clone());
    }

    Ok(ClickResponse {
        status: outcome.status_message().to_string(),
        progress: game.progress(),
        outcome,
    })
}

/// Stop the game in progress.
#[tauri::command]
pub async fn stop_game(state: State<'_, AppState>) -> Result<Option<Settlement>, CommandError> {
    let mut game = state.game.lock().expect("game lock");
    Ok(game.stop())
}

/// Release a mismatched pair once its delay has passed.
fn schedule_reset(app: AppHandle, reset: PendingReset) {
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(reset.delay()).await;

        let state = app.state::<AppState>();
        let (live, prompt) = {
            let mut game = state.game.lock().expect("game lock");
            (game.apply_reset(&reset), game.prompt_after_reset(&reset))
        };
        if !live {
            tracing::debug!("Dropping stale mismatch reset {}", reset.token);
            return;
        }

        let payload = MismatchReset {
            term_slot: reset.term_slot,
            definition_slot: reset.definition_slot,
            prompt: prompt.map(str::to_string),
        };
        if let Err(e) = app.emit(MISMATCH_RESET_EVENT, payload) {
            tracing::warn!("Failed to emit mismatch reset: {}", e);
        }
    });
}
