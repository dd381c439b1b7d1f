//! Tauri commands exposed to the frontend.

pub mod game;
pub mod progress;
pub mod settings;
pub mod speech;
pub mod words;
