//! Prometheus metrics for the post expiry background job

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};
use std::time::Duration;

/// Total number of sweep cycles run (success/error)
static SWEEP_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "post_expiry_runs_total",
        "Total number of post expiry cycles (success/error)",
        &["status"]
    )
    .expect("failed to register post_expiry_runs_total")
});

/// Duration of sweep cycles
static SWEEP_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "post_expiry_duration_seconds",
        "Duration of post expiry cycles",
        vec![0.001, 0.01, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("failed to register post_expiry_duration_seconds")
});

/// Total posts deleted by the sweep
static POSTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "post_expiry_deleted_posts_total",
        "Total posts deleted past the retention window"
    )
    .expect("failed to register post_expiry_deleted_posts_total")
});

/// Record a sweep cycle completion
pub fn record_sweep_run(status: &str) {
    SWEEP_RUNS_TOTAL.with_label_values(&[status]).inc();
}

/// Record sweep cycle duration
pub fn record_sweep_duration(duration: Duration) {
    SWEEP_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record deleted posts
pub fn record_posts_deleted(count: u64) {
    POSTS_DELETED_TOTAL.inc_by(count);
}
