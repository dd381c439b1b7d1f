//! Text-to-speech seam. Pronunciation never affects matching.

/// Best-effort speech output.
pub trait Pronouncer: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Speak `text` in `language` (BCP 47 tag). Fire-and-forget.
    fn pronounce(&self, text: &str, language: &str);
}

/// Pronouncer for hosts without speech output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl Pronouncer for Muted {
    fn is_supported(&self) -> bool {
        false
    }

    fn pronounce(&self, text: &str, _language: &str) {
        tracing::warn!("Speech synthesis not supported, cannot pronounce {:?}", text);
    }
}

/// Language used when the requested tag is blank.
pub fn language_or_default(language: &str) -> &str {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        "en-US"
    } else {
        trimmed
    }
}
