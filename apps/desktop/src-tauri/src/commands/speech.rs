//! Pronunciation command.

use crate::speech::WebviewPronouncer;
use crate::state::AppState;
use match_core::pronounce::language_or_default;
use match_core::{Muted, Pronouncer};
use tauri::{AppHandle, State};

use super::words::CommandError;

/// Speak a term in the configured language. Returns whether it was spoken.
#[tauri::command]
pub async fn pronounce(
    text: String,
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<bool, CommandError> {
    let language = {
        let game = state.game.lock().expect("game lock");
        game.settings().speech_language.clone()
    };

    let pronouncer = WebviewPronouncer::new(app);
    if !pronouncer.is_supported() {
        Muted.pronounce(&text, &language);
        return Ok(false);
    }
    pronouncer.pronounce(&text, language_or_default(&language));
    Ok(true)
}
