//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A tracked book. `finished` is true exactly when `finish_date` is set.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub finished: bool,
    pub finish_date: Option<NaiveDate>,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Shelf filter for book listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFilter {
    All,
    CurrentlyReading,
    Finished,
}

impl BookFilter {
    /// The `finished` value this filter selects, if it selects one at all
    pub fn finished(self) -> Option<bool> {
        match self {
            BookFilter::All => None,
            BookFilter::CurrentlyReading => Some(false),
            BookFilter::Finished => Some(true),
        }
    }
}

/// Add-book form payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddBookForm {
    #[validate(length(max = 80, message = "Title must be at most 80 characters"))]
    pub title: String,
    #[validate(length(max = 80, message = "Author must be at most 80 characters"))]
    pub author: String,
}
