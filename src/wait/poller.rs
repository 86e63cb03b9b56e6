// src/wait/poller.rs

//! URL readiness polling.
//!
//! A URL counts as ready as soon as it is *reachable*; the response status
//! is irrelevant. A 500 from a warming-up server still proves the server is
//! accepting connections, which is all the pipeline needs before moving on.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::errors::{PipelineError, Result};

/// Interval between poll attempts.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Whether a `wait-on` value is a URL rather than a readiness command.
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Split a `wait-on` value into individual URLs.
///
/// URLs are comma-separated; entries are trimmed and empty entries dropped.
pub fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Poll `url` until it is reachable or `timeout` has elapsed.
pub async fn poll_url(client: &reqwest::Client, url: &str, timeout: Duration) -> Result<()> {
    poll_url_every(client, url, timeout, RETRY_INTERVAL).await
}

/// Poll each URL in turn, each with the full `timeout` budget.
///
/// Polling is strictly sequential so log output stays deterministic; the
/// total wait therefore scales with the number of URLs. A timeout on any
/// URL aborts the remaining ones.
pub async fn poll_all(
    client: &reqwest::Client,
    urls: &[String],
    timeout: Duration,
) -> Result<()> {
    poll_all_every(client, urls, timeout, RETRY_INTERVAL).await
}

/// [`poll_url`] with an explicit retry interval.
///
/// Exposed for tests, which use a much shorter interval than the production
/// default.
pub async fn poll_url_every(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;

    loop {
        // Cap each attempt at the retry interval so a hung connection cannot
        // stall the loop far past its deadline.
        match tokio::time::timeout(interval, client.get(url).send()).await {
            Ok(Ok(response)) => {
                info!(url, status = %response.status(), "url is ready");
                return Ok(());
            }
            Ok(Err(err)) if connection_was_made(&err) => {
                info!(url, error = %err, "url answered (non-HTTP response), treating as ready");
                return Ok(());
            }
            Ok(Err(err)) => {
                debug!(url, error = %err, "url not ready yet");
            }
            Err(_) => {
                debug!(url, "poll attempt timed out");
            }
        }

        if Instant::now() >= deadline {
            return Err(PipelineError::WaitTimeout {
                url: url.to_string(),
                timeout,
            });
        }

        sleep(interval).await;
    }
}

/// [`poll_all`] with an explicit retry interval.
pub async fn poll_all_every(
    client: &reqwest::Client,
    urls: &[String],
    timeout: Duration,
    interval: Duration,
) -> Result<()> {
    for url in urls {
        info!(url = %url, timeout_secs = timeout.as_secs_f64(), "waiting for url");
        poll_url_every(client, url, timeout, interval).await?;
    }
    Ok(())
}

/// True when the error proves a connection was established, e.g. the peer
/// answered with something that is not valid HTTP. Builder errors (such as
/// a malformed URL) never reached the network and do not count.
fn connection_was_made(err: &reqwest::Error) -> bool {
    !err.is_connect() && !err.is_timeout() && !err.is_builder()
}
