//! Per-service authorization header schemes.

use crate::auth::Credential;

/// How a credential is attached to an outbound request.
///
/// One variant per scheme used by the supported services; selected by
/// [`Service::scheme`](crate::auth::Service::scheme) at client construction
/// rather than branched on inline per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <secret>` — Coda and Google Calendar.
    Bearer,
    /// `Authorization: token <secret>` — GitHub.
    Token,
}

impl AuthScheme {
    /// Produce the `(name, value)` header pair for `credential`.
    pub fn header(&self, credential: &Credential) -> (&'static str, String) {
        let value = match self {
            Self::Bearer => format!("Bearer {}", credential.expose()),
            Self::Token => format!("token {}", credential.expose()),
        };
        ("Authorization", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let (name, value) = AuthScheme::Bearer.header(&Credential::new("abc"));
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer abc");
    }

    #[test]
    fn test_token_header() {
        let (name, value) = AuthScheme::Token.header(&Credential::new("abc"));
        assert_eq!(name, "Authorization");
        assert_eq!(value, "token abc");
    }
}
