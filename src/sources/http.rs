//! Blocking HTTP client shared by the network sources
//!
//! Retries network errors, server errors and 429 responses with exponential
//! backoff. Authentication and not-found responses fail immediately.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::config::HttpConfig;
use crate::{CityScoutError, Result};

/// Upper bound for a server-requested `Retry-After` wait
const MAX_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CityScoutError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
        })
    }

    /// GET `url`, optionally with a bearer token, returning the first successful response
    #[instrument(skip(self, bearer))]
    pub fn get(&self, url: &str, bearer: Option<&str>) -> Result<Response> {
        let max_attempts = self.max_retries + 1;
        let request_start = Instant::now();

        for attempt in 0..max_attempts {
            let is_last = attempt + 1 == max_attempts;
            debug!("Making HTTP request (attempt {}/{})", attempt + 1, max_attempts);

            let mut request = self.client.get(url);
            if let Some(token) = bearer {
                request = request.bearer_auth(token);
            }

            match request.send() {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        info!(
                            "Successful request in {:.3}s (attempt {})",
                            request_start.elapsed().as_secs_f64(),
                            attempt + 1
                        );
                        return Ok(response);
                    }

                    if matches!(
                        status,
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
                    ) {
                        error!("Request rejected with {}", status);
                        return Err(CityScoutError::fetch(format!(
                            "{url} answered with {status}"
                        )));
                    }

                    if is_last {
                        error!("Request failed after {} attempts: {}", max_attempts, status);
                        return Err(CityScoutError::fetch(format!(
                            "{url} answered with {status} after {max_attempts} attempts"
                        )));
                    }

                    let wait = if status == StatusCode::TOO_MANY_REQUESTS {
                        retry_after(response.headers()).unwrap_or_else(|| backoff_delay(attempt))
                    } else {
                        backoff_delay(attempt)
                    };
                    warn!(
                        "HTTP {} on attempt {}, retrying in {:.1}s",
                        status,
                        attempt + 1,
                        wait.as_secs_f64()
                    );
                    thread::sleep(wait);
                }
                Err(e) => {
                    if is_last {
                        error!("Network error after {} attempts: {}", max_attempts, e);
                        return Err(CityScoutError::fetch(format!(
                            "Network error after {max_attempts} attempts: {e}"
                        )));
                    }

                    let wait = backoff_delay(attempt);
                    warn!(
                        "Network error on attempt {}: {}, retrying in {:.1}s",
                        attempt + 1,
                        e,
                        wait.as_secs_f64()
                    );
                    thread::sleep(wait);
                }
            }
        }

        Err(CityScoutError::fetch("Request failed after all retry attempts"))
    }
}

/// Exponential backoff: 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * 2_u64.pow(attempt.min(6)))
}

/// Seconds from a `Retry-After` header, capped
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECS)))
}
