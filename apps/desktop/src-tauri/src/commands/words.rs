//! Word import and listing commands.

use crate::state::AppState;
use match_core::{Game, GameError, ImportReport, KeyValueStore, ListName, WordPair};
use std::fs;
use std::path::{Path, PathBuf};
use tauri::State;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<GameError> for CommandError {
    fn from(e: GameError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self { message: e.to_string() }
    }
}

/// Outcome of importing every CSV file in a directory.
#[derive(Debug, serde::Serialize)]
pub struct DirectoryImport {
    pub imported: usize,
    pub reports: Vec<ImportReport>,
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string()
}

/// CSV files directly inside `dir`, sorted by name.
pub(crate) fn csv_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Import a CSV word list.
#[tauri::command]
pub async fn import_csv(
    file_path: String,
    state: State<'_, AppState>,
) -> Result<ImportReport, CommandError> {
    let path = Path::new(&file_path);
    let content = fs::read_to_string(path)?;

    let mut game = state.game.lock().expect("game lock");
    Ok(game.import_csv(&content, &source_label(path)))
}

/// Import all CSV files from a directory.
#[tauri::command]
pub async fn import_directory(
    dir_path: String,
    state: State<'_, AppState>,
) -> Result<DirectoryImport, CommandError> {
    let files = csv_files(Path::new(&dir_path))?;
    tracing::info!("Importing {} CSV files from {}", files.len(), dir_path);

    let mut reports = Vec::with_capacity(files.len());
    let mut game = state.game.lock().expect("game lock");
    for path in files {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        reports.push(game.import_csv(&content, &source_label(&path)));
    }

    Ok(DirectoryImport {
        imported: reports.iter().map(|r| r.imported_count).sum(),
        reports,
    })
}

/// Get one of the persisted word lists.
#[tauri::command]
pub async fn list_words(
    list: ListName,
    state: State<'_, AppState>,
) -> Result<Vec<WordPair>, CommandError> {
    let game = state.game.lock().expect("game lock");
    Ok(sorted_words(&game, list))
}

/// A persisted list in display order, sorted by term.
pub(crate) fn sorted_words<K: KeyValueStore>(game: &Game<K>, list: ListName) -> Vec<WordPair> {
    game.list(list).sorted()
}
