//! Application state.

use crate::db::SqliteRepository;
use match_core::Game;
use std::sync::{Arc, Mutex};

/// Global application state.
pub struct AppState {
    pub game: Arc<Mutex<Game<SqliteRepository>>>,
}

impl AppState {
    pub fn new(game: Game<SqliteRepository>) -> Self {
        Self {
            game: Arc::new(Mutex::new(game)),
        }
    }
}
