//! Application state
//!
//! Shared state for the Axum application: the service context, the
//! configuration, and the protection-layer structures (rate limiter and
//! circuit breakers).

use std::future::Future;
use std::sync::Arc;

use tutor_common::{AppConfig, AppError};
use tutor_service::{ServiceContext, ServiceError};

use crate::breaker::{CircuitBreaker, CircuitBreakerError};
use crate::middleware::RateLimiter;
use crate::response::ApiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Fixed-window rate limiter keyed by API key
    rate_limiter: Arc<RateLimiter>,
    /// Breaker for calls into the message/thread store
    store_breaker: CircuitBreaker,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));
        let store_breaker = CircuitBreaker::new("store", &config.breaker);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            rate_limiter,
            store_breaker,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the rate limiter
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Get the store circuit breaker
    pub fn store_breaker(&self) -> &CircuitBreaker {
        &self.store_breaker
    }

    /// Run a store-backed service call under the circuit breaker
    ///
    /// Only server-side failures count against the breaker; rejections the
    /// store produced on purpose (not-found, forbidden, validation) pass
    /// through as successful downstream responses.
    pub async fn protect_store<T>(
        &self,
        fut: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ApiError> {
        let result = self
            .store_breaker
            .call(|| fut, |e: &ServiceError| e.status_code() >= 500)
            .await;

        match result {
            Ok(value) => Ok(value),
            Err(CircuitBreakerError::Open) => {
                Err(ApiError::App(AppError::CircuitOpen { downstream: "store" }))
            }
            Err(CircuitBreakerError::Inner(e)) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store_breaker", &self.store_breaker.state())
            .finish()
    }
}
