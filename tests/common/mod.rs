//! Shared test doubles: a scripted transport and a recording clock.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tridesk::auth::{AuthScheme, Credential};
use tridesk::error::TransportError;
use tridesk::http::{
    ApiRequest, RawResponse, RequestExecutor, RetryConfig, Sleep, Transport,
};

/// Transport that replays a scripted sequence of responses and counts calls.
/// Panics if the executor asks for more responses than were scripted.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Arc<FakeInner>,
}

#[derive(Default)]
struct FakeInner {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Ok(RawResponse {
            status,
            retry_after: None,
            body: body.to_string(),
        }));
        self
    }

    /// Queue a response carrying a `Retry-After` hint.
    pub fn respond_with_retry_after(self, status: u16, secs: u64, body: &str) -> Self {
        self.push(Ok(RawResponse {
            status,
            retry_after: Some(Duration::from_secs(secs)),
            body: body.to_string(),
        }));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.inner.urls.lock().unwrap().clone()
    }

    fn push(&self, entry: Result<RawResponse, TransportError>) {
        self.inner.script.lock().unwrap().push_back(entry);
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        request: &ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.urls.lock().unwrap().push(request.url.clone());
        let next = self
            .inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more times than scripted");
        std::future::ready(next)
    }
}

/// Clock that records requested delays and returns immediately.
#[derive(Clone, Default)]
pub struct RecordingSleep {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.delays.lock().unwrap().push(duration);
        std::future::ready(())
    }
}

/// Executor over the fakes with a fixed bearer credential and no jitter.
pub fn executor(
    transport: FakeTransport,
    sleeper: RecordingSleep,
    retry: RetryConfig,
) -> RequestExecutor<FakeTransport, RecordingSleep> {
    RequestExecutor::new(
        transport,
        sleeper,
        AuthScheme::Bearer,
        Credential::new("test-token-0123456789"),
        retry,
    )
}

/// Three attempts, 10 ms base delay, no jitter. Keeps retry tests fast and
/// the recorded delays exact.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(80),
        jitter: false,
    }
}
