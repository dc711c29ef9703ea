//! Library service: ownership-scoped book and note operations

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{AddBookForm, Book, BookFilter},
        note::{Note, NoteForm},
    },
    repository::Repository,
    services::non_blank,
};

/// Parse an optional integer form field. A missing or blank field means
/// absent; anything else must be a whole number. Normalizing here keeps
/// empty-string sentinels out of storage.
fn parse_optional_int(value: Option<&str>, field: &str) -> AppResult<Option<i32>> {
    let trimmed = match value {
        Some(v) => v.trim(),
        None => return Ok(None),
    };
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("{} must be a whole number", field)))
}

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List the caller's books, newest-created first
    pub async fn list_books(&self, user_id: i32, filter: BookFilter) -> AppResult<Vec<Book>> {
        self.repository.books.list(user_id, filter).await
    }

    /// Add a book to the caller's shelf
    pub async fn add_book(&self, user_id: i32, form: &AddBookForm) -> AppResult<Book> {
        form.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let title = non_blank(&form.title, "Title")?;
        let author = non_blank(&form.author, "Author")?;

        self.repository.books.create(user_id, title, author).await
    }

    /// Get one of the caller's books together with its notes
    pub async fn get_book_with_notes(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> AppResult<(Book, Vec<Note>)> {
        let book = self.repository.books.get(user_id, book_id).await?;
        let notes = self.repository.notes.list_for_book(user_id, book_id).await?;
        Ok((book, notes))
    }

    /// Delete one of the caller's books, cascading to its notes
    pub async fn delete_book(&self, user_id: i32, book_id: i32) -> AppResult<()> {
        self.repository.books.delete(user_id, book_id).await?;
        tracing::info!(user_id, book_id, "Deleted book and its notes");
        Ok(())
    }

    /// Mark a book finished (stamping today as the finish date) or back to
    /// currently reading (clearing it)
    pub async fn set_finished(
        &self,
        user_id: i32,
        book_id: i32,
        finished: bool,
    ) -> AppResult<Book> {
        let finish_date = finished.then(|| Utc::now().date_naive());
        self.repository
            .books
            .set_finished(user_id, book_id, finished, finish_date)
            .await
    }

    /// Attach a note to one of the caller's books
    pub async fn add_note(&self, user_id: i32, book_id: i32, form: &NoteForm) -> AppResult<Note> {
        // Ownership check before the insert; a foreign book is NotFound.
        self.repository.books.get(user_id, book_id).await?;

        let content = non_blank(&form.content, "Content")?;
        let chapter = parse_optional_int(form.chapter.as_deref(), "Chapter")?;
        let page = parse_optional_int(form.page.as_deref(), "Page")?;

        self.repository
            .notes
            .create(user_id, book_id, chapter, page, content)
            .await
    }

    /// Delete one of the caller's notes, returning the parent book id
    pub async fn delete_note(&self, user_id: i32, note_id: i32) -> AppResult<i32> {
        self.repository.notes.delete(user_id, note_id).await
    }
}
