use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg(feature = "config")]
use core_config::{env_parse, ConfigError, FromEnv};

/// How hard startup tries to reach Postgres before giving up.
///
/// Only the initial connect is retried, so the service can boot alongside
/// its database (compose, k8s). Queries on the request path are not.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl RetryConfig {
    /// Wait before the `n`th retry (1-based): `base_delay * 2^(n-1)`, capped.
    fn backoff(&self, n: u32) -> Duration {
        let doubled = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(n.saturating_sub(1)));
        let delay = doubled.min(self.max_delay);

        if self.jitter { jittered(delay) } else { delay }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 6,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

/// - `DB_CONNECT_ATTEMPTS` (default 6)
/// - `DB_RETRY_BASE_DELAY_MS` (default 200)
/// - `DB_RETRY_MAX_DELAY_MS` (default 5000)
#[cfg(feature = "config")]
impl FromEnv for RetryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let attempts: u32 = env_parse("DB_CONNECT_ATTEMPTS", "6")?;
        if attempts == 0 {
            return Err(ConfigError::Invalid(
                "DB_CONNECT_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            attempts,
            base_delay: Duration::from_millis(env_parse("DB_RETRY_BASE_DELAY_MS", "200")?),
            max_delay: Duration::from_millis(env_parse("DB_RETRY_MAX_DELAY_MS", "5000")?),
            jitter: true,
        })
    }
}

/// Awaits `operation` up to `config.attempts` times, sleeping with
/// exponential backoff in between. The last error is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: &RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Connected after retrying");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if attempt >= config.attempts {
            warn!(attempts = attempt, error = %err, "Giving up");
            return Err(err);
        }

        let wait = config.backoff(attempt);
        warn!(attempt, of = config.attempts, ?wait, error = %err, "Attempt failed, retrying");
        tokio::time::sleep(wait).await;
        attempt += 1;
    }
}

/// Scales `delay` into [50%, 100%) so restarted replicas don't reconnect in lockstep.
fn jittered(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = 50 + (RandomState::new().hash_one(std::time::Instant::now()) % 50) as u32;
    delay * percent / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(attempts: u32) -> RetryConfig {
        RetryConfig {
            attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            jitter: false,
        }
    }

    #[tokio::test]
    async fn test_succeeds_once_the_database_comes_up() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(
            || async {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => Err("connection refused"),
                    _ => Ok("connected"),
                }
            },
            &quick(5),
        )
        .await;

        assert_eq!(result, Ok("connected"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stops_after_configured_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = retry_with_backoff(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(format!("attempt {n}"))
            },
            &quick(3),
        )
        .await;

        assert_eq!(result, Err("attempt 2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_backoff_doubles_up_to_the_cap() {
        let config = RetryConfig {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
            jitter: false,
            ..RetryConfig::default()
        };

        assert_eq!(config.backoff(1), Duration::from_millis(100));
        assert_eq!(config.backoff(2), Duration::from_millis(200));
        assert_eq!(config.backoff(3), Duration::from_millis(350));
        assert_eq!(config.backoff(40), Duration::from_millis(350));
    }

    #[test]
    fn test_jitter_keeps_at_least_half_the_delay() {
        for _ in 0..20 {
            let wait = jittered(Duration::from_millis(1000));
            assert!(wait >= Duration::from_millis(500) && wait < Duration::from_millis(1000));
        }
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_rejects_zero_attempts() {
        temp_env::with_var("DB_CONNECT_ATTEMPTS", Some("0"), || {
            assert!(RetryConfig::from_env().is_err());
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(
            [
                "DB_CONNECT_ATTEMPTS",
                "DB_RETRY_BASE_DELAY_MS",
                "DB_RETRY_MAX_DELAY_MS",
            ],
            || {
                assert_eq!(RetryConfig::from_env().unwrap(), RetryConfig::default());
            },
        );
    }
}
