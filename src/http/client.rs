//! `RequestExecutor` — shared request execution with auth attachment,
//! outcome classification, and a bounded retry loop.
//!
//! All three domain clients hand their prepared [`ApiRequest`]s to one of
//! these. The executor attaches the service's auth header, sends the request
//! through the injected [`Transport`], classifies the result, and retries
//! rate limits and transient failures with backoff until attempts run out.
//! The total number of transport calls per logical request is bounded by
//! [`RetryConfig::max_attempts`]; permanent failures and successes are never
//! retried.

use serde::de::DeserializeOwned;

use crate::auth::{AuthScheme, Credential};
use crate::error::HttpError;
use crate::http::retry::{classify, Outcome, RetryConfig};
use crate::http::transport::{ApiRequest, Sleep, Transport};

pub struct RequestExecutor<T, S> {
    transport: T,
    sleeper: S,
    scheme: AuthScheme,
    credential: Credential,
    retry: RetryConfig,
    /// Static headers attached to every request (`Accept`, `User-Agent`, …).
    default_headers: Vec<(String, String)>,
}

impl<T: Transport, S: Sleep> RequestExecutor<T, S> {
    pub fn new(
        transport: T,
        sleeper: S,
        scheme: AuthScheme,
        credential: Credential,
        retry: RetryConfig,
    ) -> Self {
        Self {
            transport,
            sleeper,
            scheme,
            credential,
            retry,
            default_headers: Vec::new(),
        }
    }

    pub fn with_default_headers(
        mut self,
        headers: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.default_headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Execute a request and decode the successful body as `R`.
    ///
    /// Empty bodies (204-style responses) decode as JSON `null`, so `()` and
    /// `Option<_>` work as result types.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<R, HttpError> {
        let body = self.execute_raw(request).await?;
        let text = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(text).map_err(HttpError::Decode)
    }

    /// Execute a request and return the successful body text.
    pub async fn execute_raw(&self, mut request: ApiRequest) -> Result<String, HttpError> {
        let (auth_name, auth_value) = self.scheme.header(&self.credential);
        request.headers.push((auth_name.to_string(), auth_value));
        for (name, value) in &self.default_headers {
            request.headers.push((name.clone(), value.clone()));
        }

        let max = self.retry.max_attempts.max(1);
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.transport.send(&request).await {
                Ok(raw) => match classify(raw.status, raw.retry_after) {
                    Outcome::Success => return Ok(raw.body),
                    Outcome::RateLimited { retry_after } => {
                        if attempt >= max {
                            return Err(HttpError::RateLimited {
                                retry_after,
                                body: raw.body,
                            });
                        }
                        // Honor the server's hint; fall back to backoff.
                        let delay =
                            retry_after.unwrap_or_else(|| self.retry.delay_for_attempt(attempt));
                        tracing::debug!(
                            attempt,
                            max,
                            delay_ms = delay.as_millis() as u64,
                            url = %request.url,
                            "rate limited, waiting before retry"
                        );
                        self.sleeper.sleep(delay).await;
                    }
                    Outcome::Transient { status } => {
                        if attempt >= max {
                            return Err(HttpError::ServerError {
                                status,
                                body: raw.body,
                            });
                        }
                        let delay = self.retry.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt,
                            max,
                            status,
                            delay_ms = delay.as_millis() as u64,
                            url = %request.url,
                            "transient server error, retrying"
                        );
                        self.sleeper.sleep(delay).await;
                    }
                    Outcome::Permanent { status } => {
                        return Err(permanent_error(status, raw.body));
                    }
                },
                Err(e) if e.is_retryable() && attempt < max => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::debug!(
                        attempt,
                        max,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        url = %request.url,
                        "transport failure, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(e) => return Err(HttpError::Transport(e)),
            }
        }
    }
}

/// Map a permanently failed status onto the error taxonomy.
fn permanent_error(status: u16, body: String) -> HttpError {
    match status {
        401 | 403 => HttpError::Unauthorized { status, body },
        404 => HttpError::NotFound(body),
        _ => HttpError::ClientError { status, body },
    }
}
