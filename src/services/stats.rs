//! Reading statistics service

use chrono::Datelike;

use crate::{
    api::stats::YearlyStatsResponse,
    error::AppResult,
    models::book::Book,
    repository::Repository,
};

/// Month labels for the dashboard chart, January first
pub const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How many years the year selector offers
const YEAR_WINDOW: i32 = 10;

/// The selectable years, most recent first, starting at the current year
pub fn available_years(current_year: i32) -> Vec<i32> {
    (0..YEAR_WINDOW).map(|i| current_year - i).collect()
}

/// Bucket finished books by finish month. The result is dense: months
/// without a finished book report 0. Books without a finish date are
/// skipped, never counted or crashed on.
pub fn monthly_counts(books: &[Book]) -> [i64; 12] {
    let mut counts = [0i64; 12];
    for book in books {
        if let Some(date) = book.finish_date {
            counts[date.month0() as usize] += 1;
        }
    }
    counts
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Per-month and total finished-book counts for one of the caller's
    /// reading years, with the matching books newest-created first.
    pub async fn yearly_stats(
        &self,
        user_id: i32,
        year: i32,
        current_year: i32,
    ) -> AppResult<YearlyStatsResponse> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, finished, finish_date, user_id, created_at
            FROM books
            WHERE user_id = $1
              AND finished = TRUE
              AND finish_date IS NOT NULL
              AND EXTRACT(YEAR FROM finish_date)::int = $2
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .bind(year)
        .fetch_all(&self.repository.pool)
        .await?;

        let counts = monthly_counts(&books);

        Ok(YearlyStatsResponse {
            year,
            years: available_years(current_year),
            labels: MONTH_LABELS.iter().map(|l| l.to_string()).collect(),
            monthly_counts: counts.to_vec(),
            total: books.len() as i64,
            books,
        })
    }
}
