//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, notes, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelfmark API",
        version = "0.1.0",
        description = "Personal reading tracker HTTP API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register_page,
        auth::register,
        auth::login_page,
        auth::login,
        auth::logout,
        // Books
        books::list_all,
        books::list_current,
        books::list_finished,
        books::add_book,
        books::delete_book,
        books::book_details,
        books::add_note,
        books::mark_finished,
        books::mark_current,
        // Notes
        notes::delete_note,
        // Stats
        stats::yearly_stats,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::RegisterForm,
            crate::models::user::LoginForm,
            // Books
            crate::models::book::Book,
            crate::models::book::AddBookForm,
            books::BookDetails,
            // Notes
            crate::models::note::Note,
            crate::models::note::NoteForm,
            // Stats
            stats::YearlyStatsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and session endpoints"),
        (name = "books", description = "Shelf and book management"),
        (name = "notes", description = "Reading notes"),
        (name = "stats", description = "Reading statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
