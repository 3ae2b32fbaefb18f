//! Fixed-window rate limiting
//!
//! Keyed by API key, never by network address. Windows are wall-clock
//! aligned and counters reset to zero at each boundary; short bursts at
//! window edges are an accepted tradeoff of the fixed-window scheme.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tutor_common::{AppError, RateLimitConfig};

use crate::middleware::{short_circuit, API_KEY_HEADER};
use crate::state::AppState;

/// Rate-limit key for requests without an API key
const ANONYMOUS_KEY: &str = "anonymous";

/// Per-key counter for the current window
#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    window: u64,
    count: u32,
}

/// Fixed-window rate limiter
#[derive(Debug)]
pub struct RateLimiter {
    requests: u32,
    period_secs: u64,
    counters: DashMap<String, WindowCounter>,
}

impl RateLimiter {
    /// Create a limiter from configuration
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            requests: config.requests.max(1),
            period_secs: config.period_secs.max(1),
            counters: DashMap::new(),
        }
    }

    /// Check one request against the window, counting it when admitted
    ///
    /// Returns `Err(retry_after_secs)` when the budget is exhausted.
    pub fn check(&self, key: &str, now_secs: u64) -> Result<(), u64> {
        let window = now_secs / self.period_secs;

        let mut counter = self
            .counters
            .entry(key.to_string())
            .or_insert(WindowCounter { window, count: 0 });

        if counter.window != window {
            counter.window = window;
            counter.count = 0;
        }

        if counter.count >= self.requests {
            let retry_after = ((window + 1) * self.period_secs).saturating_sub(now_secs);
            return Err(retry_after.max(1));
        }

        counter.count += 1;
        Ok(())
    }

    /// Check against the current wall clock
    pub fn check_now(&self, key: &str) -> Result<(), u64> {
        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.check(key, now_secs)
    }
}

/// Rate-limiting pipeline stage
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_KEY);

    if let Err(retry_after_secs) = state.rate_limiter().check_now(key) {
        tracing::debug!(key, retry_after_secs, "Rate limit exceeded");
        let err = AppError::RateLimited { retry_after_secs };
        return short_circuit(&err, request.headers());
    }

    next.run(request).await
}
