//! Repository for the `terms` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::term::Term;

/// Column list for `terms` queries.
const COLUMNS: &str = "id, name, year, starts_on, ends_on, is_active, created_at, updated_at";

/// Read access to academic terms plus the expiry sweep.
pub struct TermRepo;

impl TermRepo {
    /// List the terms whose date range covers `date` and are still active.
    pub async fn list_covering(pool: &PgPool, date: NaiveDate) -> Result<Vec<Term>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM terms
             WHERE is_active AND $1 BETWEEN starts_on AND ends_on
             ORDER BY starts_on ASC"
        );
        sqlx::query_as::<_, Term>(&query)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Deactivate terms whose date range has fully elapsed. Idempotent;
    /// returns the number of terms deactivated.
    pub async fn deactivate_elapsed(pool: &PgPool, today: NaiveDate) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE terms SET is_active = FALSE, updated_at = NOW()
             WHERE is_active AND ends_on < $1",
        )
        .bind(today)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
