//! Note model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A reading note attached to a book. Chapter and page are optional
/// positions within the book.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Note {
    pub id: i32,
    pub chapter: Option<i32>,
    pub page: Option<i32>,
    pub content: String,
    pub book_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Book-detail form payload. The page posts several forms to the same URL;
/// `form_id` tells them apart. Chapter and page arrive as free-form text
/// where a blank field means absent.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NoteForm {
    pub form_id: String,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    pub content: String,
}
