//! Telemetry metric name constants.
//!
//! Centralised metric names for sightseer operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `sightseer_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `provider`: provider name (e.g. "google_places")
//! - `operation`: call made against the provider (e.g. "search_text", "fetch_photo")
//! - `status`: outcome: "ok" or "error"
//! - `cache`: cache instance: "place" or "image"
//! - `kind`: failure kind, see [`SightseerError::kind()`](crate::SightseerError::kind)

/// Total provider round trips.
///
/// Labels: `provider`, `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "sightseer_requests_total";

/// Total place-resolution retries (not counting the initial attempt).
///
/// Labels: `provider`.
pub const RETRIES_TOTAL: &str = "sightseer_retries_total";

/// Total cache hits.
///
/// Labels: `cache`.
pub const CACHE_HITS_TOTAL: &str = "sightseer_cache_hits_total";

/// Total cache misses.
///
/// Labels: `cache`.
pub const CACHE_MISSES_TOTAL: &str = "sightseer_cache_misses_total";

/// Total terminal orchestrator failures.
///
/// Labels: `kind`.
pub const FETCH_FAILURES_TOTAL: &str = "sightseer_fetch_failures_total";
