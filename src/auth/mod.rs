//! Credential resolution — services, secrets, and header schemes.
//!
//! ## Security Model
//!
//! - A [`Credential`] is an opaque secret. `Debug` and `Display` are
//!   redacted, so tokens cannot leak through logging or error formatting.
//!   The raw value is only reachable via [`Credential::expose`].
//! - Resolution happens once, at client construction. The resolved
//!   credential is immutable for the client's lifetime.
//! - [`CredentialSource`] never reads ambient process state directly: the
//!   environment lookup is an injected capability, so tests can resolve
//!   against a fixed map instead of real variables.

pub mod google;
pub mod scheme;

pub use scheme::AuthScheme;

use std::fmt;
use std::sync::Arc;

use crate::error::AuthError;

// ─── Service ─────────────────────────────────────────────────────────────────

/// One of the three supported external services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Coda,
    GitHub,
    GoogleCalendar,
}

impl Service {
    /// The environment variable the credential is resolved from.
    ///
    /// For Coda and GitHub the value is the token itself; for Google
    /// Calendar it is a filesystem path to the OAuth client-secrets file.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Coda => "CODA_API_TOKEN",
            Self::GitHub => "GITHUB_TOKEN",
            Self::GoogleCalendar => "GOOGLE_CALENDAR_CREDENTIALS_FILE",
        }
    }

    /// How this service expects the credential attached to requests.
    pub fn scheme(&self) -> AuthScheme {
        match self {
            Self::Coda | Self::GoogleCalendar => AuthScheme::Bearer,
            Self::GitHub => AuthScheme::Token,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coda => "coda",
            Self::GitHub => "github",
            Self::GoogleCalendar => "google-calendar",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Credential ──────────────────────────────────────────────────────────────

/// An opaque secret used to authenticate outbound requests to one service.
///
/// Redacted in `Debug` and `Display` output. Cloning is cheap enough for the
/// handful of clients a process constructs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the raw secret. Only the header-attachment path should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<&str> for Credential {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Credential {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── CredentialSource ────────────────────────────────────────────────────────

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves credentials with explicit-override-first, environment-second
/// semantics.
///
/// The environment lookup is injected at construction so resolution is
/// testable without touching real process state.
#[derive(Clone)]
pub struct CredentialSource {
    lookup: Lookup,
}

impl CredentialSource {
    /// Resolve against the real process environment.
    pub fn from_env() -> Self {
        Self {
            lookup: Arc::new(|var| std::env::var(var).ok()),
        }
    }

    /// Resolve against an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Resolve against a fixed set of variables. Intended for tests.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: std::collections::HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_lookup(move |var| map.get(var).cloned())
    }

    /// Resolve the credential for `service`.
    ///
    /// A non-empty `explicit` override always wins; otherwise the service's
    /// named variable is consulted; otherwise this fails. Empty strings are
    /// treated as absent in both positions — an empty credential is never
    /// returned.
    pub fn resolve(
        &self,
        service: Service,
        explicit: Option<&str>,
    ) -> Result<Credential, AuthError> {
        if let Some(value) = explicit.filter(|v| !v.is_empty()) {
            return Ok(Credential::new(value));
        }
        match (self.lookup)(service.env_var()).filter(|v| !v.is_empty()) {
            Some(value) => Ok(Credential::new(value)),
            None => Err(AuthError::MissingCredential {
                service,
                var: service.env_var(),
            }),
        }
    }

    /// Raw variable lookup, for secondary settings like the Google token
    /// file path. Empty values are treated as absent.
    pub fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.is_empty())
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSource").finish_non_exhaustive()
    }
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::from_env()
    }
}

// ─── Token format checks ─────────────────────────────────────────────────────

/// Cheap plausibility check on a resolved token, applied at client
/// construction so an obviously mangled secret fails before any network call.
///
/// Unknown services pass unconditionally.
pub fn plausible_token(service: Service, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    match service {
        // Coda tokens are long alphanumeric strings (dashes allowed).
        Service::Coda => {
            token.len() >= 20
                && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        // Classic GitHub tokens are 40 hex chars; newer tokens carry a
        // recognizable prefix.
        Service::GitHub => {
            let classic =
                token.len() == 40 && token.chars().all(|c| c.is_ascii_hexdigit());
            let prefixed = ["ghp_", "gho_", "ghs_", "github_pat_"]
                .iter()
                .any(|p| token.starts_with(p));
            classic || prefixed
        }
        // The Google "credential" is a file path; real validation happens
        // when the bundle is loaded.
        Service::GoogleCalendar => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_override_wins() {
        let source =
            CredentialSource::from_vars([("CODA_API_TOKEN", "from-environment-0123456789")]);
        let cred = source.resolve(Service::Coda, Some("explicit-value")).unwrap();
        assert_eq!(cred.expose(), "explicit-value");
    }

    #[test]
    fn test_resolve_falls_back_to_env() {
        let source = CredentialSource::from_vars([("GITHUB_TOKEN", "abc123")]);
        let cred = source.resolve(Service::GitHub, None).unwrap();
        assert_eq!(cred.expose(), "abc123");
    }

    #[test]
    fn test_resolve_missing_everywhere_fails_typed() {
        let source = CredentialSource::from_vars::<_, String, String>([]);
        for service in [Service::Coda, Service::GitHub, Service::GoogleCalendar] {
            let err = source.resolve(service, None).unwrap_err();
            match err {
                AuthError::MissingCredential { service: s, var } => {
                    assert_eq!(s, service);
                    assert_eq!(var, service.env_var());
                }
                other => panic!("expected MissingCredential, got {other}"),
            }
        }
    }

    #[test]
    fn test_resolve_empty_override_falls_through() {
        let source = CredentialSource::from_vars([("CODA_API_TOKEN", "envtoken-0123456789ab")]);
        let cred = source.resolve(Service::Coda, Some("")).unwrap();
        assert_eq!(cred.expose(), "envtoken-0123456789ab");
    }

    #[test]
    fn test_resolve_empty_env_value_is_missing() {
        let source = CredentialSource::from_vars([("GITHUB_TOKEN", "")]);
        assert!(matches!(
            source.resolve(Service::GitHub, None),
            Err(AuthError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("super-secret-token-value");
        let debug = format!("{:?}", cred);
        let display = format!("{}", cred);
        assert!(!debug.contains("super-secret"));
        assert!(!display.contains("super-secret"));
    }

    #[test]
    fn test_plausible_token_coda() {
        assert!(plausible_token(Service::Coda, "0123456789abcdef0123-xyz"));
        assert!(!plausible_token(Service::Coda, "short"));
        assert!(!plausible_token(Service::Coda, "has spaces in the token value"));
    }

    #[test]
    fn test_plausible_token_github() {
        assert!(plausible_token(
            Service::GitHub,
            "0123456789abcdef0123456789abcdef01234567"
        ));
        assert!(plausible_token(Service::GitHub, "ghp_16charstoken00"));
        assert!(plausible_token(Service::GitHub, "github_pat_longfinegrained"));
        assert!(!plausible_token(Service::GitHub, "not-a-token"));
    }
}
