// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Retry policy for transient ledger reads.

use core::time::Duration;

use crate::config::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_MS};

/// Bounded exponential backoff without jitter.
///
/// Attempt `i` (0-based) that fails is followed by a sleep of `base_delay * 2^i`,
/// except after the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts, base_delay }
    }

    /// Delay to wait after the failed attempt `attempt`, or `None` if it was the last one.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        Some(self.base_delay.saturating_mul(factor))
    }

    /// Full sleep schedule of a run where every attempt fails.
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts).filter_map(|a| self.delay_after(a)).collect()
    }
}

/// Tagged result of a retried operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome<T, E> {
    Succeeded { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_error: E },
}

impl<T, E> RetryOutcome<T, E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryOutcome::Succeeded { attempts, .. } | RetryOutcome::Exhausted { attempts, .. } => *attempts,
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            RetryOutcome::Succeeded { value, .. } => Ok(value),
            RetryOutcome::Exhausted { last_error, .. } => Err(last_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let p = RetryPolicy::default();
        assert_eq!(p.schedule(), vec![Duration::from_millis(1000), Duration::from_millis(2000)]);
        assert_eq!(p.delay_after(2), None);
    }

    #[test]
    fn test_longer_schedule_doubles() {
        let p = RetryPolicy::new(5, Duration::from_millis(1000));
        let ms: Vec<u128> = p.schedule().iter().map(|d| d.as_millis()).collect();
        assert_eq!(ms, vec![1000, 2000, 4000, 8000]);
    }

    #[test]
    fn test_single_attempt_never_sleeps() {
        assert!(RetryPolicy::new(1, Duration::from_secs(1)).schedule().is_empty());
    }

    #[test]
    fn test_outcome_accessors() {
        let ok: RetryOutcome<u8, String> = RetryOutcome::Succeeded { value: 1, attempts: 3 };
        assert_eq!(ok.attempts(), 3);
        assert_eq!(ok.into_result(), Ok(1));
        let err: RetryOutcome<u8, String> = RetryOutcome::Exhausted { attempts: 3, last_error: "x".into() };
        assert_eq!(err.into_result(), Err("x".to_string()));
    }
}
