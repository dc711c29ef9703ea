//! Shelfmark Personal Reading Tracker
//!
//! A Rust implementation of the Shelfmark reading-tracker server:
//! authenticated users manage their shelf of books, attach reading notes,
//! and view per-year reading statistics.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
