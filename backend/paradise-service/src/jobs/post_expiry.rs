//! Post Expiry Background Job
//!
//! Deletes posts older than the retention window. Runs one cycle immediately
//! at startup, then once per tick. Likes are removed with their post by the
//! cascade, so a sweep never leaves orphaned like rows.
//!
//! A failed cycle is logged and retried on the next tick only; the job never
//! blocks request serving and may race harmlessly with creates at the window
//! boundary.

use crate::db::post_repo;
use crate::metrics::post_expiry as metrics;
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tokio::time::sleep;

pub async fn start_post_expiry(db: PgPool, window_hours: i32, interval: Duration) {
    tracing::info!(
        "Starting post expiry background job (interval={}s, window={}h)",
        interval.as_secs(),
        window_hours
    );

    loop {
        let cycle_start = Instant::now();

        match post_repo::delete_expired_posts(&db, window_hours).await {
            Ok(deleted) => {
                metrics::record_sweep_run("success");
                metrics::record_sweep_duration(cycle_start.elapsed());
                if deleted > 0 {
                    metrics::record_posts_deleted(deleted);
                }
                tracing::info!(
                    deleted,
                    duration_ms = cycle_start.elapsed().as_millis() as u64,
                    "Post expiry cycle completed"
                );
            }
            Err(e) => {
                metrics::record_sweep_run("error");
                metrics::record_sweep_duration(cycle_start.elapsed());
                tracing::error!(error = %e, "Post expiry cycle failed; retrying next tick");
            }
        }

        sleep(interval).await;
    }
}
