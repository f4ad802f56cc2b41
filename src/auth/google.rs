//! Google Calendar OAuth credential loading.
//!
//! The Calendar API authenticates with a short-lived OAuth access token
//! rather than a static secret. `GOOGLE_CALENDAR_CREDENTIALS_FILE` points at
//! the OAuth client-secrets file; a previously authorized user token is read
//! from `GOOGLE_CALENDAR_TOKEN_FILE` (default `token.json`). If the stored
//! access token has expired and the bundle carries a refresh token, a fresh
//! one is requested from the token endpoint. The interactive consent flow
//! that produces the token file in the first place is outside this crate.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::auth::{Credential, CredentialSource, Service};
use crate::error::AuthError;

/// Environment variable naming the stored authorized-user token file.
pub const TOKEN_FILE_VAR: &str = "GOOGLE_CALENDAR_TOKEN_FILE";

/// Token file path used when [`TOKEN_FILE_VAR`] is unset.
pub const DEFAULT_TOKEN_FILE: &str = "token.json";

/// OAuth scope required for calendar and event management.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Expiry skew: tokens this close to expiring are refreshed eagerly.
const EXPIRY_SKEW: Duration = Duration::from_secs(60);

/// Default bound on the refresh round-trip.
const REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

fn refresh_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to build HTTP client")
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// A stored authorized-user token bundle, as written by Google's OAuth
/// tooling (`token`, `refresh_token`, `token_uri`, client pair, `expiry`).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenBundle {
    #[serde(alias = "access_token")]
    token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    token_uri: String,
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default, deserialize_with = "deserialize_expiry")]
    expiry: Option<DateTime<Utc>>,
}

/// Google writes expiry either as RFC 3339 or as a naive UTC timestamp
/// without an offset. Accept both.
fn deserialize_expiry<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else { return Ok(None) };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

/// Loaded Google Calendar credentials, ready to mint an access token.
#[derive(Debug, Clone)]
pub struct GoogleAuth {
    bundle: TokenBundle,
    http: reqwest::Client,
}

impl GoogleAuth {
    /// Load credentials using `source` for path resolution.
    ///
    /// `credentials_file` overrides `GOOGLE_CALENDAR_CREDENTIALS_FILE`; the
    /// file must exist even though only the token bundle is read here, so a
    /// misconfigured path fails at construction rather than at first refresh.
    pub fn load(
        source: &CredentialSource,
        credentials_file: Option<&str>,
    ) -> Result<Self, AuthError> {
        let credentials_path =
            PathBuf::from(source.resolve(Service::GoogleCalendar, credentials_file)?.expose());
        if !credentials_path.exists() {
            return Err(AuthError::CredentialFile {
                path: credentials_path,
            });
        }

        let token_path = PathBuf::from(
            source
                .var(TOKEN_FILE_VAR)
                .unwrap_or_else(|| DEFAULT_TOKEN_FILE.to_string()),
        );
        let raw = std::fs::read_to_string(&token_path).map_err(|source| AuthError::TokenFile {
            path: token_path,
            source,
        })?;
        let bundle: TokenBundle = serde_json::from_str(&raw).map_err(AuthError::TokenBundle)?;

        Ok(Self::from_bundle(bundle))
    }

    /// Build directly from a parsed bundle.
    pub fn from_bundle(bundle: TokenBundle) -> Self {
        Self {
            bundle,
            http: refresh_client(REFRESH_TIMEOUT),
        }
    }

    /// Bound the refresh round-trip. The token endpoint gets the same
    /// timeout discipline as every other outbound request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = refresh_client(timeout);
        self
    }

    /// Whether the stored access token is still usable without a refresh.
    pub fn is_fresh(&self) -> bool {
        match self.bundle.expiry {
            None => true,
            Some(expiry) => Utc::now() + EXPIRY_SKEW < expiry,
        }
    }

    /// Produce a usable access token, refreshing over HTTP if the stored one
    /// has expired. The refreshed token is not written back to disk.
    pub async fn access_token(&self) -> Result<Credential, AuthError> {
        if self.is_fresh() {
            return Ok(Credential::new(self.bundle.token.clone()));
        }
        let (Some(refresh_token), Some(client_id), Some(client_secret)) = (
            self.bundle.refresh_token.as_deref(),
            self.bundle.client_id.as_deref(),
            self.bundle.client_secret.as_deref(),
        ) else {
            return Err(AuthError::TokenExpired);
        };
        self.refresh(refresh_token, client_id, client_secret).await
    }

    async fn refresh(
        &self,
        refresh_token: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Credential, AuthError> {
        tracing::debug!(token_uri = %self.bundle.token_uri, "refreshing Google access token");

        let response = self
            .http
            .post(&self.bundle.token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Refresh(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Refresh(format!("{status}: {body}")));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Refresh(e.to_string()))?;
        Ok(Credential::new(refreshed.access_token))
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}
