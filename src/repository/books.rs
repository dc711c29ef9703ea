//! Books repository for database operations
//!
//! Every query is scoped by the owning user's id; a book id alone is never
//! enough to read or mutate a record.

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter},
};

const BOOK_COLUMNS: &str = "id, title, author, finished, finish_date, user_id, created_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List a user's books, newest-created first
    pub async fn list(&self, user_id: i32, filter: BookFilter) -> AppResult<Vec<Book>> {
        let books = match filter.finished() {
            Some(finished) => {
                let query = format!(
                    "SELECT {} FROM books WHERE user_id = $1 AND finished = $2 ORDER BY id DESC",
                    BOOK_COLUMNS
                );
                sqlx::query_as::<_, Book>(&query)
                    .bind(user_id)
                    .bind(finished)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {} FROM books WHERE user_id = $1 ORDER BY id DESC",
                    BOOK_COLUMNS
                );
                sqlx::query_as::<_, Book>(&query)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(books)
    }

    /// Get one of the user's books by id
    pub async fn get(&self, user_id: i32, book_id: i32) -> AppResult<Book> {
        let query = format!(
            "SELECT {} FROM books WHERE id = $1 AND user_id = $2",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        Ok(book)
    }

    /// Create a new book, unfinished by default
    pub async fn create(&self, user_id: i32, title: &str, author: &str) -> AppResult<Book> {
        let query = format!(
            "INSERT INTO books (title, author, user_id) VALUES ($1, $2, $3) RETURNING {}",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(title)
            .bind(author)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(book)
    }

    /// Set the finished flag and finish date together. A single statement
    /// keeps the finished <-> finish_date pairing from ever being observed
    /// half-applied.
    pub async fn set_finished(
        &self,
        user_id: i32,
        book_id: i32,
        finished: bool,
        finish_date: Option<NaiveDate>,
    ) -> AppResult<Book> {
        let query = format!(
            "UPDATE books SET finished = $3, finish_date = $4 WHERE id = $1 AND user_id = $2 RETURNING {}",
            BOOK_COLUMNS
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book_id)
            .bind(user_id)
            .bind(finished)
            .bind(finish_date)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        Ok(book)
    }

    /// Delete a book and all of its notes in one transaction. Missing or
    /// foreign books surface as NotFound, never a silent no-op.
    pub async fn delete(&self, user_id: i32, book_id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM notes WHERE book_id = $1 AND user_id = $2")
            .bind(book_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM books WHERE id = $1 AND user_id = $2")
            .bind(book_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}
