//! Request deadlines for store calls.
//!
//! A [`Deadline`] is fixed when the request arrives and every store call the handler
//! makes races against it. The budget comes from the caller's `grpc-timeout` header when
//! present, otherwise from the configured default.

use crate::store::StoreError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tonic::metadata::MetadataMap;

pub const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Absolute point in time after which store calls are abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
        }
    }

    /// Uses the caller's `grpc-timeout` if it sent a valid one, else `default_budget`.
    pub fn from_metadata(metadata: &MetadataMap, default_budget: Duration) -> Self {
        let budget = metadata
            .get(GRPC_TIMEOUT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_grpc_timeout)
            .unwrap_or(default_budget);
        Self::after(budget)
    }

    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Runs a store call, failing with [`StoreError::DeadlineExceeded`] if it outlives the
    /// deadline. The call is dropped (cancelled) in that case.
    pub async fn run<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout_at(self.expires_at, call)
            .await
            .map_err(|_| StoreError::DeadlineExceeded)?
    }
}

/// Parses a `grpc-timeout` value: up to 8 ASCII digits followed by a unit
/// (`H`, `M`, `S`, `m`, `u`, `n`).
pub fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || !value.is_ascii() {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;
    let duration = match unit {
        "H" => Duration::from_secs(amount * 3600),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(duration)
}
