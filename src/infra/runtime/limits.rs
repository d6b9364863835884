use std::time::Duration;

use crate::infra::config::GithubConfig;

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Build a reqwest client with default timeouts.
pub fn make_http_client() -> reqwest::Result<reqwest::Client> {
    make_http_client_with(&GithubConfig::default())
}

/// Build a reqwest client honoring the configured timeouts.
pub fn make_http_client_with(cfg: &GithubConfig) -> reqwest::Result<reqwest::Client> {
    let connect = cfg.connect_timeout_ms.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS);
    let total = cfg.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(connect))
        .timeout(Duration::from_millis(total))
        .build()
}

/// Exponential backoff for async ops: up to `attempts` retries after the
/// first try, 50ms doubling to a 1s cap. `retryable` decides per error.
pub async fn retry_async<T, E, Fut, F, R>(mut attempts: u32, mut op: F, retryable: R) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let mut try_num: u32 = 0;
    let mut delay_ms: u64 = 50;
    loop {
        match op(try_num).await {
            Ok(v) => return Ok(v),
            Err(e) => {
                if attempts == 0 || !retryable(&e) {
                    return Err(e);
                }
                attempts -= 1;
                tracing::debug!(attempt = try_num + 1, delay_ms, "retrying");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                delay_ms = (delay_ms * 2).min(1_000);
                try_num += 1;
            }
        }
    }
}
