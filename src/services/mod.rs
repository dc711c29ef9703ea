//! Business logic services

pub mod accounts;
pub mod library;
pub mod stats;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub accounts: accounts::AccountsService,
    pub library: library::LibraryService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, session_config: SessionConfig) -> Self {
        Self {
            accounts: accounts::AccountsService::new(repository.clone(), session_config),
            library: library::LibraryService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}

/// Trim a required text field, rejecting empty or whitespace-only input
pub(crate) fn non_blank<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}
