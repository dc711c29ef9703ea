//! Note endpoints

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::{error::AppResult, AppState};

use super::SessionUser;

/// Delete a note and return to its book's detail view
#[utoipa::path(
    get,
    path = "/deleten/{id}",
    tag = "notes",
    params(("id" = i32, Path, description = "Note ID")),
    responses(
        (status = 303, description = "Note deleted, redirected to its book"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    let book_id = state.services.library.delete_note(session.user_id, id).await?;
    Ok(Redirect::to(&format!("/book/{}", book_id)))
}
