//! Base URL constants for the supported services.

/// Default Coda REST API base URL.
pub const CODA_API_URL: &str = "https://coda.io/apis/v1";

/// Default GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Default Google Calendar REST API base URL.
pub const GOOGLE_CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";
