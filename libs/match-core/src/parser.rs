//! CSV importer for word lists.
//!
//! # Format
//! ```text
//! Term,Definition
//! gato,cat
//! "perro","dog"
//! casa,house, home
//! ```
//!
//! The first line is always treated as a header. Rows are read one line at a
//! time. Everything after the first field is the definition, so unquoted
//! commas in definitions survive as written.

use crate::types::{WordList, WordPair};
use serde::{Deserialize, Serialize};

/// Outcome of importing one CSV document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported_count: usize,
    pub skipped_count: usize,
    pub new_words: Vec<WordPair>,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_words_message: Option<String>,
}

/// Parse CSV content into word pairs that are not yet in `existing`.
///
/// Duplicates (against `existing` or earlier rows of the same document) and
/// invalid rows are counted in `skipped_count` and never returned.
pub fn parse_csv(content: &str, source_label: &str, existing: &WordList) -> ImportReport {
    let body = match content.find('\n') {
        Some(index) => {
            tracing::debug!("Skipping CSV header row from {}", source_label);
            &content[index + 1..]
        }
        None => "",
    };

    let mut batch = WordList::new();
    let mut skipped_count = 0;

    for line in body.split('\n').map(str::trim) {
        if line.is_empty() {
            continue;
        }

        let Some((term, definition)) = parse_line(line) else {
            tracing::warn!(
                "Skipping malformed CSV line (no valid comma separator) from {}: {}",
                source_label,
                line
            );
            skipped_count += 1;
            continue;
        };

        if term.is_empty() || definition.is_empty() {
            tracing::warn!(
                "Skipping CSV line due to empty term or definition from {}: {}",
                source_label,
                line
            );
            skipped_count += 1;
            continue;
        }

        if existing.contains_term(&term) || !batch.push_unique(WordPair { term, definition }) {
            skipped_count += 1;
        }
    }

    let imported_count = batch.len();
    let effectively_empty = body.lines().all(|line| line.trim().is_empty());

    let message = if imported_count > 0 {
        format!(
            "{}: {} new words added. {} duplicates/invalid.",
            source_label, imported_count, skipped_count
        )
    } else if effectively_empty {
        format!("{}: File is empty or contains only a header.", source_label)
    } else {
        format!(
            "{}: No new words added. {} duplicates/invalid found.",
            source_label, skipped_count
        )
    };

    let total = existing.len() + imported_count;
    let total_words_message = (total > 0).then(|| format!("Total words: {}.", total));

    ImportReport {
        imported_count,
        skipped_count,
        success: imported_count > 0,
        new_words: batch.as_slice().to_vec(),
        message,
        total_words_message,
    }
}

/// Split one line into term and definition.
///
/// Each line gets its own reader, so a stray quote cannot run into the next
/// row. Fields after the first are rejoined as written.
fn parse_line(line: &str) -> Option<(String, String)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = reader.records().next()?.ok()?;
    if record.len() < 2 {
        return None;
    }

    let term = record[0].trim().to_string();
    let definition = record
        .iter()
        .skip(1)
        .collect::<Vec<_>>()
        .join(",")
        .trim()
        .to_string();
    Some((term, definition))
}
