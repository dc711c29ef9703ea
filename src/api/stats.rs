//! Reading statistics endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, models::book::Book, AppState};

use super::SessionUser;

/// Query parameters for the stats dashboard
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StatsQuery {
    /// Reference year (e.g. 2024); defaults to the current year
    pub year: Option<String>,
}

/// Yearly reading statistics
#[derive(Serialize, ToSchema)]
pub struct YearlyStatsResponse {
    /// The year the stats cover
    pub year: i32,
    /// Selectable years for the dashboard, most recent first
    pub years: Vec<i32>,
    /// Month labels, January first
    pub labels: Vec<String>,
    /// Finished-book count per month, January first; always 12 entries
    pub monthly_counts: Vec<i64>,
    /// Number of books finished in the year
    pub total: i64,
    /// The finished books themselves, newest-created first
    pub books: Vec<Book>,
}

/// Resolve the year parameter. Missing and malformed values both fall
/// back to the current year; no implicit string/number coercion.
fn resolve_year(raw: Option<&str>, current_year: i32) -> i32 {
    raw.and_then(|y| y.trim().parse::<i32>().ok())
        .unwrap_or(current_year)
}

/// Reading statistics for the selected year
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Monthly and total finished-book counts", body = YearlyStatsResponse),
        (status = 303, description = "No session, redirected to login")
    )
)]
pub async fn yearly_stats(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<YearlyStatsResponse>> {
    let current_year = Utc::now().year();
    let year = resolve_year(query.year.as_deref(), current_year);

    let stats = state
        .services
        .stats
        .yearly_stats(session.user_id, year, current_year)
        .await?;
    Ok(Json(stats))
}
