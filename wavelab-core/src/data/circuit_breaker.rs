//! Shared request gate for the CoinGecko source.
//!
//! A ban (HTTP 403) closes the gate at once; `failure_threshold` consecutive
//! failed requests close it too. While closed, every fetch fails fast with
//! `CircuitBreakerTripped` until the cooldown runs out. One breaker is shared
//! by all `scan` workers.

use crate::config::SourceConfig;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Gate {
    /// Requests are refused until this instant.
    blocked_until: Option<Instant>,
    failures_in_row: u32,
    trips: u32,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    gate: Mutex<Gate>,
    cooldown: Duration,
    failure_threshold: u32,
}

impl CircuitBreaker {
    pub fn new(cooldown: Duration, failure_threshold: u32) -> Self {
        Self {
            gate: Mutex::new(Gate::default()),
            cooldown,
            failure_threshold: failure_threshold.max(1),
        }
    }

    /// Breaker sized from the `[source]` settings.
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(
            Duration::from_secs(config.breaker_cooldown_secs),
            config.breaker_failure_threshold,
        )
    }

    // Poisoning only means a worker panicked between two counter updates.
    fn gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn close_gate(&self, gate: &mut Gate) {
        gate.blocked_until = Some(Instant::now() + self.cooldown);
        gate.failures_in_row = 0;
        gate.trips += 1;
    }

    /// Whether a request may go out now. An expired block is cleared.
    pub fn is_allowed(&self) -> bool {
        let mut gate = self.gate();
        match gate.blocked_until {
            Some(until) if Instant::now() < until => false,
            Some(_) => {
                tracing::info!("circuit breaker cooldown over, requests resumed");
                gate.blocked_until = None;
                true
            }
            None => true,
        }
    }

    pub fn record_success(&self) {
        self.gate().failures_in_row = 0;
    }

    pub fn record_failure(&self) {
        let mut gate = self.gate();
        gate.failures_in_row += 1;
        if gate.failures_in_row >= self.failure_threshold {
            tracing::warn!(
                failures = gate.failures_in_row,
                cooldown_secs = self.cooldown.as_secs(),
                "too many failed requests, circuit breaker tripped"
            );
            self.close_gate(&mut gate);
        }
    }

    /// Block immediately, e.g. after the provider answered 403.
    pub fn trip(&self) {
        tracing::warn!(
            cooldown_secs = self.cooldown.as_secs(),
            "provider refused access, circuit breaker tripped"
        );
        let mut gate = self.gate();
        self.close_gate(&mut gate);
    }

    pub fn remaining_cooldown(&self) -> Duration {
        self.gate()
            .blocked_until
            .map(|until| until.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    /// How many times the breaker has tripped since it was created.
    pub fn trip_count(&self) -> u32 {
        self.gate().trips
    }
}
