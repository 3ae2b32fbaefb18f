//! Circuit breaker for protected downstreams
//!
//! State machine: CLOSED counts failures in a fixed time window; reaching
//! the threshold opens the circuit. OPEN short-circuits every call until
//! the recovery timeout elapses, then HALF_OPEN admits exactly one trial
//! call. Trial success closes the circuit; trial failure reopens it and
//! restarts the recovery timer.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tutor_common::BreakerConfig;

/// Circuit state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, calls pass through
    Closed,
    /// Calls fail fast without reaching the downstream
    Open,
    /// One trial call is probing the downstream
    HalfOpen,
}

/// Error returned by a protected call
#[derive(Debug, thiserror::Error)]
pub enum CircuitBreakerError<E> {
    #[error("circuit open; call short-circuited")]
    Open,
    #[error("{0}")]
    Inner(E),
}

struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    window_start: Instant,
    opened_at: Instant,
    trial_in_flight: bool,
}

/// Circuit breaker guarding one downstream
#[derive(Clone)]
pub struct CircuitBreaker {
    name: &'static str,
    failure_threshold: u32,
    window: Duration,
    recovery: Duration,
    inner: Arc<Mutex<BreakerInner>>,
}

impl CircuitBreaker {
    /// Create a breaker in the CLOSED state
    pub fn new(name: &'static str, config: &BreakerConfig) -> Self {
        let now = Instant::now();
        Self {
            name,
            failure_threshold: config.failure_threshold.max(1),
            window: Duration::from_secs(config.window_secs),
            recovery: Duration::from_secs(config.recovery_secs),
            inner: Arc::new(Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                window_start: now,
                opened_at: now,
                trial_in_flight: false,
            })),
        }
    }

    /// Execute a call under the breaker
    ///
    /// `is_transient` classifies errors: only transient (downstream)
    /// failures count toward opening the circuit; other errors are passed
    /// through and treated as a responsive downstream.
    pub async fn call<F, Fut, T, E>(
        &self,
        f: F,
        is_transient: impl Fn(&E) -> bool,
    ) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.try_acquire() {
            return Err(CircuitBreakerError::Open);
        }

        match f().await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(e) => {
                if is_transient(&e) {
                    self.record_failure();
                } else {
                    self.record_success();
                }
                Err(CircuitBreakerError::Inner(e))
            }
        }
    }

    /// Get the current circuit state
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    fn try_acquire(&self) -> bool {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                if inner.opened_at.elapsed() >= self.recovery {
                    info!(breaker = self.name, "Circuit breaker: OPEN -> HALF_OPEN");
                    inner.state = CircuitState::HalfOpen;
                    inner.trial_in_flight = true;
                    true
                } else {
                    false
                }
            }
            // Exactly one trial call is admitted in HALF_OPEN
            CircuitState::HalfOpen => {
                if inner.trial_in_flight {
                    false
                } else {
                    inner.trial_in_flight = true;
                    true
                }
            }
        }
    }

    fn record_success(&self) {
        let mut inner = self.inner.lock();
        if inner.state == CircuitState::HalfOpen {
            info!(breaker = self.name, "Circuit breaker: HALF_OPEN -> CLOSED");
            inner.state = CircuitState::Closed;
        }
        inner.failure_count = 0;
        inner.window_start = Instant::now();
        inner.trial_in_flight = false;
    }

    fn record_failure(&self) {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => {
                if inner.window_start.elapsed() > self.window {
                    inner.failure_count = 0;
                    inner.window_start = Instant::now();
                }
                inner.failure_count += 1;
                if inner.failure_count >= self.failure_threshold {
                    warn!(
                        breaker = self.name,
                        failures = inner.failure_count,
                        "Circuit breaker: CLOSED -> OPEN"
                    );
                    inner.state = CircuitState::Open;
                    inner.opened_at = Instant::now();
                }
            }
            CircuitState::HalfOpen => {
                warn!(breaker = self.name, "Circuit breaker: HALF_OPEN -> OPEN");
                inner.state = CircuitState::Open;
                inner.opened_at = Instant::now();
                inner.trial_in_flight = false;
            }
            CircuitState::Open => {}
        }
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}
