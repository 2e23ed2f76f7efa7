// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::{collections::BTreeMap, sync::LazyLock};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TEXT_FORMAT, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};
use shared_types::HolderClass;
use tracing::error;

/// Total number of API requests received, labeled by endpoint.
pub static REQUESTS_BY_ENDPOINT: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "supply_api_requests_total",
        "Total number of API requests, labeled by endpoint",
        &["endpoint"]
    )
    .expect("Failed to create supply_api_requests_total counter vec")
});

/// Histogram for token resolution durations in seconds.
pub static RESOLUTION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "supply_api_resolution_duration_seconds",
        "Token descriptor resolution durations in seconds",
        &["result"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create resolution duration histogram")
});

/// Histogram for circulating supply estimation durations in seconds.
pub static ESTIMATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "supply_api_estimation_duration_seconds",
        "Circulating supply estimation durations in seconds",
        &["outcome"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]
    )
    .expect("Failed to create estimation duration histogram")
});

/// Classified holders, labeled by classification.
pub static HOLDER_CLASSIFICATIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "supply_api_holder_classifications_total",
        "Total number of classified top holders, labeled by classification",
        &["classification"]
    )
    .expect("Failed to create holder classifications counter vec")
});

/// Increment the requests counter with `endpoint` label
pub fn inc_requests(endpoint: &str) {
    REQUESTS_BY_ENDPOINT.with_label_values(&[endpoint]).inc();
}

/// Observe the duration of a token resolution
///
/// # Arguments
/// * `result` - `success`, `invalid_address` or `unavailable`
/// * `duration_secs` - The duration of the resolution in seconds
pub fn observe_resolution_duration(result: &str, duration_secs: f64) {
    RESOLUTION_DURATION
        .with_label_values(&[result])
        .observe(duration_secs);
}

/// Observe the duration of a circulating supply estimate
///
/// # Arguments
/// * `outcome` - `computed` or `fallback`
/// * `duration_secs` - The duration of the estimate in seconds
pub fn observe_estimation_duration(outcome: &str, duration_secs: f64) {
    ESTIMATION_DURATION
        .with_label_values(&[outcome])
        .observe(duration_secs);
}

/// Record how many holders landed in each classification
pub fn record_classifications(counts: &BTreeMap<HolderClass, usize>) {
    for (class, count) in counts {
        HOLDER_CLASSIFICATIONS
            .with_label_values(&[class.label()])
            .inc_by(u64::try_from(*count).unwrap_or(u64::MAX));
    }
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    ([(header::CONTENT_TYPE, TEXT_FORMAT)], buffer).into_response()
}
