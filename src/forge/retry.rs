//! Exponential backoff for forge requests.
use color_eyre::eyre::Report;
use log::*;
use serde::Deserialize;
use std::{future::Future, sync::Mutex, time::Duration};
use tokio_retry::RetryIf;

use crate::{
    Result,
    error::{ForgeError, RelnotesError},
};

/// Backoff settings, loadable from the `[retry]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: usize,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 10000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }

    /// Delay before retry `n` (0-based): `initial * multiplier^n`, capped
    /// at `max_delay_ms`.
    pub fn delay_for(&self, n: usize) -> Duration {
        let exponent = i32::try_from(n).unwrap_or(i32::MAX);
        let millis = self.initial_delay_ms as f64
            * self.backoff_multiplier.powi(exponent);
        let capped = millis.min(self.max_delay_ms as f64).max(0.0);
        Duration::from_millis(capped as u64)
    }

    /// The delays between attempts. One fewer than the attempt count.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let policy = *self;
        (0..policy.attempts() - 1).map(move |n| policy.delay_for(n))
    }

    /// Run `action` until it succeeds, fails with a non-retryable error or
    /// runs out of attempts.
    pub async fn retry<T, F, Fut>(&self, label: &str, action: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        let attempts = self.attempts();
        self.retry_observed(action, |delay, error| {
            attempt += 1;
            warn!(
                "{label}: attempt {attempt}/{attempts} failed: {error}. Retrying in {}ms",
                delay.as_millis()
            );
        })
        .await
    }

    /// Same as [`RetryPolicy::retry`] but reports every backoff delay and
    /// the error that caused it to `on_backoff` before sleeping.
    pub async fn retry_observed<T, F, Fut, O>(
        &self,
        action: F,
        mut on_backoff: O,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        O: FnMut(Duration, &str),
    {
        // The condition sees each error right before the next delay is drawn.
        let last_error = Mutex::new(String::new());

        let delays = self.delays().inspect(|delay| {
            if let Ok(error) = last_error.lock() {
                on_backoff(*delay, &error);
            }
        });

        let result = RetryIf::spawn(delays, action, |err: &Report| {
            if let Ok(mut last) = last_error.lock() {
                *last = err.to_string();
            }

            let retryable = is_retryable_error(err);
            if !retryable {
                debug!("error is not retryable: {err}");
            } else {
                debug!("retryable error: {err}");
            }
            retryable
        })
        .await;

        match result {
            Ok(value) => Ok(value),
            Err(err) if is_retryable_error(&err) => {
                Err(RelnotesError::RetryExhausted {
                    attempts: self.attempts(),
                    last_error: err.to_string(),
                }
                .into())
            }
            Err(err) => Err(err),
        }
    }
}

/// Decide whether a failed forge call is worth another attempt.
///
/// Typed [`ForgeError`]s decide by HTTP semantics. Anything else falls
/// back to the error message: auth, permission and not-found failures are
/// permanent, rate limits, network trouble and 500s are transient.
pub fn is_retryable_error(err: &Report) -> bool {
    if let Some(forge_err) = err.downcast_ref::<ForgeError>() {
        return forge_err.is_retryable();
    }

    is_retryable_message(&err.to_string())
}

fn is_retryable_message(message: &str) -> bool {
    let message = message.to_lowercase();
    let rate_limited = message.contains("rate limit");

    if message.contains("401") || message.contains("unauthorized") {
        return false;
    }

    if message.contains("403") && !rate_limited {
        return false;
    }

    if message.contains("404") || message.contains("not found") {
        return false;
    }

    rate_limited
        || message.contains("timeout")
        || message.contains("econnreset")
        || message.contains("econnrefused")
        || message.contains("network")
        || message.contains("500")
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay_ms: 1,
            max_delay_ms: 10,
            backoff_multiplier: 2.0,
        }
    }

    #[test]
    fn default_delays_double_until_capped() {
        let policy = RetryPolicy {
            max_attempts: 6,
            ..Default::default()
        };

        let delays: Vec<u128> = policy.delays().map(|d| d.as_millis()).collect();

        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 10000]);
        assert_eq!(RetryPolicy::default().delays().count(), 2);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(policy.delays().count(), 0);
    }

    #[test]
    fn classifies_messages() {
        assert!(is_retryable_message("HTTP 500 Internal Server Error"));
        assert!(is_retryable_message("API rate limit exceeded"));
        assert!(is_retryable_message("403: rate limit exceeded"));
        assert!(is_retryable_message("request timeout"));
        assert!(is_retryable_message("read ECONNRESET"));
        assert!(is_retryable_message("network is unreachable"));

        assert!(!is_retryable_message("401 Bad credentials"));
        assert!(!is_retryable_message("Unauthorized"));
        assert!(!is_retryable_message("403 Forbidden"));
        assert!(!is_retryable_message("404"));
        assert!(!is_retryable_message("Not Found"));
        assert!(!is_retryable_message("invalid payload"));
    }

    #[test]
    fn classifies_typed_forge_errors() {
        let err: Report = ForgeError::Server {
            status: 502,
            message: "bad gateway".into(),
        }
        .into();
        assert!(is_retryable_error(&err));

        let err: Report = ForgeError::Forbidden("nope".into()).into();
        assert!(!is_retryable_error(&err));
    }

    #[tokio::test]
    async fn succeeds_after_two_server_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut delays = vec![];

        let result = fast_policy()
            .retry_observed(
                || {
                    let calls = Arc::clone(&calls);
                    async move {
                        if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                            Err(eyre!("500 internal server error"))
                        } else {
                            Ok("done")
                        }
                    }
                },
                |delay, _| delays.push(delay),
            )
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            delays,
            vec![Duration::from_millis(1), Duration::from_millis(2)]
        );
    }

    #[tokio::test]
    async fn auth_failure_is_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut delays = vec![];

        let result: Result<()> = fast_policy()
            .retry_observed(
                || {
                    let calls = Arc::clone(&calls);
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(eyre!("401 Bad credentials"))
                    }
                },
                |delay, _| delays.push(delay),
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "401 Bad credentials");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(delays.is_empty());
    }

    #[tokio::test]
    async fn backoff_observer_sees_failing_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut seen = vec![];

        let result = fast_policy()
            .retry_observed(
                || {
                    let calls = Arc::clone(&calls);
                    async move {
                        let n = calls.fetch_add(1, Ordering::SeqCst);
                        if n < 2 {
                            Err(eyre!("500 on call {n}"))
                        } else {
                            Ok(n)
                        }
                    }
                },
                |_, error| seen.push(error.to_string()),
            )
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(seen, vec!["500 on call 0", "500 on call 1"]);
    }

    #[test_log::test(tokio::test)]
    async fn exhaustion_reports_last_error() {
        let calls = Arc::new(AtomicUsize::new(0));

        let result: Result<()> = fast_policy()
            .retry("list tags", || {
                let calls = Arc::clone(&calls);
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    Err(eyre!("network error on call {n}"))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            err.to_string(),
            "Failed after 3 attempts. Last error: network error on call 2"
        );
        assert!(matches!(
            err.downcast_ref::<RelnotesError>(),
            Some(RelnotesError::RetryExhausted { attempts: 3, .. })
        ));
    }
}
