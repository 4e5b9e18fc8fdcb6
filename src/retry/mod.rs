//! Bounded retry with fixed backoff delays
//!
//! The schedule fixes the number of attempts up front: one attempt per
//! delay entry, sleeping the entry's delay only when a retry follows. The
//! final entry's delay is never consumed.

use crate::error::ApiError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Ordered, fixed sequence of backoff delays
#[derive(Debug, Clone, PartialEq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::new(vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
        ])
    }
}

impl RetrySchedule {
    /// Create a schedule from explicit delays
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// Total number of attempts; an empty schedule still makes one attempt
    pub fn attempts(&self) -> usize {
        self.delays.len().max(1)
    }

    /// Delay to sleep after the given zero-indexed attempt fails
    pub fn delay(&self, attempt: usize) -> Duration {
        self.delays.get(attempt).copied().unwrap_or_default()
    }
}

/// Run `op` until it succeeds, fails terminally, or the schedule is exhausted
///
/// Attempts are strictly sequential: the next attempt starts only after the
/// previous outcome is known and its backoff delay has elapsed. An error
/// that is not retryable aborts immediately with the remaining attempts
/// unused.
pub async fn with_backoff<T, F, Fut>(
    schedule: &RetrySchedule,
    label: &str,
    mut op: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let attempts = schedule.attempts();
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < attempts => {
                let delay = schedule.delay(attempt - 1);
                warn!(
                    "{} failed ({}), retrying in {:?} (attempt {}/{})",
                    label, err, delay, attempt, attempts
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_schedule() -> RetrySchedule {
        RetrySchedule::new(vec![
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(40),
        ])
    }

    fn retryable() -> ApiError {
        ApiError::Status {
            status: 503,
            url: "http://localhost:8000/api/search".to_string(),
        }
    }

    fn terminal() -> ApiError {
        ApiError::Status {
            status: 404,
            url: "http://localhost:8000/api/search".to_string(),
        }
    }

    #[test]
    fn test_default_schedule() {
        let schedule = RetrySchedule::default();
        assert_eq!(schedule.attempts(), 3);
        assert_eq!(schedule.delay(0), Duration::from_secs(1));
        assert_eq!(schedule.delay(1), Duration::from_secs(2));
        assert_eq!(schedule.delay(2), Duration::from_secs(4));
    }

    #[test]
    fn test_empty_schedule_still_attempts_once() {
        let schedule = RetrySchedule::new(vec![]);
        assert_eq!(schedule.attempts(), 1);
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let result = with_backoff(&fast_schedule(), "test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ApiError>("ok")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let start = std::time::Instant::now();
        let result = with_backoff(&fast_schedule(), "test", || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(retryable())
                } else {
                    Ok("ok")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        // First two delays must have elapsed: 10ms + 20ms
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_exhausts_schedule() {
        let counter = Arc::new(AtomicU32::new(0));
        let result = with_backoff(&fast_schedule(), "test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(retryable())
            }
        })
        .await;

        assert!(result.is_err());
        // No fourth attempt beyond the schedule
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_terminal_error_aborts_immediately() {
        let counter = Arc::new(AtomicU32::new(0));
        let result = with_backoff(&fast_schedule(), "test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(terminal())
            }
        })
        .await;

        assert_eq!(result.unwrap_err().status(), Some(404));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
