//! HTTP layer — `RequestExecutor` with credential attachment, outcome
//! classification, and bounded retries.

pub mod client;
pub mod retry;
pub mod transport;

pub use client::RequestExecutor;
pub use retry::{classify, Outcome, RetryConfig};
pub use transport::{
    ApiRequest, HttpTransport, Method, RawResponse, Sleep, TimerSleep, Transport, DEFAULT_TIMEOUT,
};
