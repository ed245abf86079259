//! Periodic no-show sweep and term expiry.
//!
//! Approved reservations whose window has fully passed without a check-in
//! transition to NoShow; terms whose end date has passed are deactivated
//! so their section meetings stop blocking availability. Both operations
//! are idempotent single statements, so overlapping runs (including the
//! manual admin sweep) are harmless.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use roomkey_core::catalog::CivilClock;
use roomkey_db::repositories::{ReservationRepo, TermRepo};

/// Run the no-show sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, clock: CivilClock, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "No-show sweep started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("No-show sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let now = Utc::now();
                match ReservationRepo::sweep_no_shows(&pool, now).await {
                    Ok(swept) if swept > 0 => {
                        tracing::info!(swept, "No-show sweep: reservations transitioned");
                    }
                    Ok(_) => {
                        tracing::debug!("No-show sweep: nothing to do");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "No-show sweep failed");
                    }
                }
                match TermRepo::deactivate_elapsed(&pool, clock.civil_date(now)).await {
                    Ok(deactivated) if deactivated > 0 => {
                        tracing::info!(deactivated, "Term expiry: terms deactivated");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "Term expiry failed");
                    }
                }
            }
        }
    }
}
