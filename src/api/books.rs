//! Book endpoints: shelf listings, detail view and status changes

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{AddBookForm, Book, BookFilter},
        note::{Note, NoteForm},
    },
    AppState,
};

use super::SessionUser;

/// Book detail view: the book plus its notes, newest first
#[derive(Serialize, ToSchema)]
pub struct BookDetails {
    pub book: Book,
    pub notes: Vec<Note>,
}

/// All books on the caller's shelf
#[utoipa::path(
    get,
    path = "/home",
    tag = "books",
    responses(
        (status = 200, description = "Books, newest-created first", body = Vec<Book>),
        (status = 303, description = "No session, redirected to login")
    )
)]
pub async fn list_all(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .library
        .list_books(session.user_id, BookFilter::All)
        .await?;
    Ok(Json(books))
}

/// Books currently being read
#[utoipa::path(
    get,
    path = "/current",
    tag = "books",
    responses(
        (status = 200, description = "Unfinished books, newest-created first", body = Vec<Book>),
        (status = 303, description = "No session, redirected to login")
    )
)]
pub async fn list_current(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .library
        .list_books(session.user_id, BookFilter::CurrentlyReading)
        .await?;
    Ok(Json(books))
}

/// Finished books
#[utoipa::path(
    get,
    path = "/finished",
    tag = "books",
    responses(
        (status = 200, description = "Finished books, newest-created first", body = Vec<Book>),
        (status = 303, description = "No session, redirected to login")
    )
)]
pub async fn list_finished(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state
        .services
        .library
        .list_books(session.user_id, BookFilter::Finished)
        .await?;
    Ok(Json(books))
}

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/addb",
    tag = "books",
    request_body(content = AddBookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book added, redirected home"),
        (status = 400, description = "Empty title or author")
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Form(form): Form<AddBookForm>,
) -> AppResult<Redirect> {
    state.services.library.add_book(session.user_id, &form).await?;
    Ok(Redirect::to("/home"))
}

/// Delete a book and its notes
#[utoipa::path(
    get,
    path = "/deleteb/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book deleted, redirected home"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    state.services.library.delete_book(session.user_id, id).await?;
    Ok(Redirect::to("/home"))
}

/// Book detail view with notes
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_details(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let (book, notes) = state
        .services
        .library
        .get_book_with_notes(session.user_id, id)
        .await?;
    Ok(Json(BookDetails { book, notes }))
}

/// Detail-page form post. Only the note form exists today; `form_id`
/// keeps the door open for others.
#[utoipa::path(
    post,
    path = "/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Note added, redirected to the book"),
        (status = 400, description = "Empty content or unparsable chapter/page"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn add_note(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Path(id): Path<i32>,
    Form(form): Form<NoteForm>,
) -> AppResult<Redirect> {
    if form.form_id != "note" {
        return Err(AppError::Validation(format!(
            "Unknown form '{}'",
            form.form_id
        )));
    }

    state
        .services
        .library
        .add_note(session.user_id, id, &form)
        .await?;
    Ok(Redirect::to(&format!("/book/{}", id)))
}

/// Mark a book as finished today
#[utoipa::path(
    post,
    path = "/book/{id}/finish",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book finished, redirected to the book"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn mark_finished(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    state
        .services
        .library
        .set_finished(session.user_id, id, true)
        .await?;
    Ok(Redirect::to(&format!("/book/{}", id)))
}

/// Mark a book as currently reading again
#[utoipa::path(
    post,
    path = "/book/{id}/current",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book back to reading, redirected to the book"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn mark_current(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    state
        .services
        .library
        .set_finished(session.user_id, id, false)
        .await?;
    Ok(Redirect::to(&format!("/book/{}", id)))
}
