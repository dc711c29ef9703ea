//! Notes repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::note::Note,
};

const NOTE_COLUMNS: &str = "id, chapter, page, content, book_id, user_id, created_at";

#[derive(Clone)]
pub struct NotesRepository {
    pool: Pool<Postgres>,
}

impl NotesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a book's notes, newest first
    pub async fn list_for_book(&self, user_id: i32, book_id: i32) -> AppResult<Vec<Note>> {
        let query = format!(
            "SELECT {} FROM notes WHERE book_id = $1 AND user_id = $2 ORDER BY id DESC",
            NOTE_COLUMNS
        );
        let notes = sqlx::query_as::<_, Note>(&query)
            .bind(book_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(notes)
    }

    /// Create a note attached to a book. Callers verify book ownership
    /// before inserting.
    pub async fn create(
        &self,
        user_id: i32,
        book_id: i32,
        chapter: Option<i32>,
        page: Option<i32>,
        content: &str,
    ) -> AppResult<Note> {
        let query = format!(
            r#"
            INSERT INTO notes (chapter, page, content, book_id, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            NOTE_COLUMNS
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(chapter)
            .bind(page)
            .bind(content)
            .bind(book_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(note)
    }

    /// Delete one of the user's notes and return its parent book id, used
    /// by the caller to redirect back to the book's detail view.
    pub async fn delete(&self, user_id: i32, note_id: i32) -> AppResult<i32> {
        let book_id: Option<i32> = sqlx::query_scalar(
            "DELETE FROM notes WHERE id = $1 AND user_id = $2 RETURNING book_id",
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        book_id.ok_or_else(|| AppError::NotFound(format!("Note with id {} not found", note_id)))
    }
}
