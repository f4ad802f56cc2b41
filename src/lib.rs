//! # Tridesk
//!
//! Typed Rust clients for Coda, GitHub, and Google Calendar with shared
//! retry and credential plumbing.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Errors, network constants
//! 2. **Auth** — Credential resolution (explicit override → env var), token
//!    shape checks, Google OAuth token refresh
//! 3. **HTTP** — `RequestExecutor` with outcome classification and bounded
//!    retry over pluggable transports
//! 4. **Domain clients** — Vertical slices per service: typed methods, wire
//!    types, conversions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tridesk::prelude::*;
//!
//! let coda = CodaClient::from_env()?;
//! let docs = coda.list_docs(Some(10)).await?;
//!
//! let github = GitHubClient::from_env()?;
//! let me = github.authenticated_user().await?;
//!
//! let calendar = CalendarClient::from_env().await?;
//! let events = calendar.list_events("primary", None, None, 25).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified error types.
pub mod error;

/// Service base-URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Credential resolution, token shape checks, Google OAuth.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Request executor: transport abstraction, classification, retry.
pub mod http;

// ── Layer 4: Domain clients ──────────────────────────────────────────────────

/// Domain modules (vertical slices): clients, types, wire types, conversions.
pub mod domain;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError, TransportError};

    // Auth
    pub use crate::auth::{Credential, CredentialSource, Service};

    // HTTP plumbing
    pub use crate::http::{ApiRequest, Method, RequestExecutor, RetryConfig};

    // Coda
    pub use crate::domain::coda::{
        CodaClient, CodaClientBuilder, Doc, Row, RowInsertReceipt, RowUpdateReceipt, Table,
    };

    // GitHub
    pub use crate::domain::github::{
        Account, GitHubClient, GitHubClientBuilder, Issue, IssueFilter, IssueState, NewIssue,
        NewRepository, Repository,
    };

    // Google Calendar
    pub use crate::domain::calendar::{
        CalendarClient, CalendarClientBuilder, CalendarInfo, Event, EventPatch, EventTime,
        NewEvent,
    };

    // Network constants
    pub use crate::network::{CODA_API_URL, GITHUB_API_URL, GOOGLE_CALENDAR_API_URL};
}
