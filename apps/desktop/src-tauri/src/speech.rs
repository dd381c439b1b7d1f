//! Speech output through the webview's speech synthesis.

use match_core::Pronouncer;
use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};

pub const PRONOUNCE_EVENT: &str = "pronounce";

const RATE: f32 = 0.8;
const VOLUME: f32 = 0.8;
const PITCH: f32 = 1.0;

/// Payload of the `pronounce` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub volume: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            lang: language.to_string(),
            rate: RATE,
            volume: VOLUME,
            pitch: PITCH,
        }
    }
}

/// Hands utterances to the frontend, which speaks them.
pub struct WebviewPronouncer {
    app: AppHandle,
}

impl WebviewPronouncer {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Pronouncer for WebviewPronouncer {
    fn is_supported(&self) -> bool {
        !self.app.webview_windows().is_empty()
    }

    fn pronounce(&self, text: &str, language: &str) {
        if text.trim().is_empty() {
            return;
        }
        if let Err(e) = self.app.emit(PRONOUNCE_EVENT, Utterance::new(text, language)) {
            tracing::warn!("Failed to emit pronounce event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_utterance_uses_fixed_voice() {
        let utterance = Utterance::new("hola", "es-ES");
        assert_eq!(utterance.text, "hola");
        assert_eq!(utterance.lang, "es-ES");
        assert_eq!((utterance.rate, utterance.volume, utterance.pitch), (0.8, 0.8, 1.0));

        let json = serde_json::to_value(&utterance).unwrap();
        assert_eq!(json["lang"], "es-ES");
    }
}
