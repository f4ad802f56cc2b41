//! Google Calendar client — calendars and events.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::auth::google::GoogleAuth;
use crate::auth::{Credential, CredentialSource, Service};
use crate::domain::calendar::wire::{
    AttendeeWire, CalendarListResponse, CalendarWire, EventInsertRequest, EventTimeWire,
    EventWire, EventsResponse,
};
use crate::domain::calendar::{CalendarInfo, Event, EventPatch, NewEvent};
use crate::domain::require_id;
use crate::error::SdkError;
use crate::http::{
    ApiRequest, HttpTransport, Method, RequestExecutor, RetryConfig, Sleep, TimerSleep, Transport,
    DEFAULT_TIMEOUT,
};
use crate::network::GOOGLE_CALENDAR_API_URL;

/// Default event listing window when no bounds are given.
const DEFAULT_WINDOW: chrono::Duration = chrono::Duration::days(7);

/// Client for the Google Calendar API.
///
/// Construction is async because the OAuth access token may need a refresh
/// round-trip: [`CalendarClient::from_env`] resolves
/// `GOOGLE_CALENDAR_CREDENTIALS_FILE`, loads the stored token bundle, and
/// refreshes if it has expired.
pub struct CalendarClient<T = HttpTransport, S = TimerSleep> {
    http: RequestExecutor<T, S>,
    base_url: String,
}

impl CalendarClient {
    /// Build with defaults, loading credentials from the environment.
    pub async fn from_env() -> Result<Self, SdkError> {
        Self::builder().build().await
    }

    pub fn builder() -> CalendarClientBuilder {
        CalendarClientBuilder::default()
    }
}

impl<T: Transport, S: Sleep> CalendarClient<T, S> {
    /// Build around a custom executor (custom transport, test fakes).
    pub fn with_executor(http: RequestExecutor<T, S>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Calendars visible to the authenticated user.
    pub async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, SdkError> {
        let url = format!("{}/users/me/calendarList", self.base_url);
        let resp: CalendarListResponse =
            self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.items.into_iter().map(CalendarInfo::from).collect())
    }

    /// One calendar by id. `"primary"` addresses the user's main calendar.
    pub async fn get_calendar(&self, calendar_id: &str) -> Result<CalendarInfo, SdkError> {
        require_id(calendar_id, "calendar id")?;
        let url = format!(
            "{}/calendars/{}",
            self.base_url,
            urlencoding::encode(calendar_id)
        );
        let resp: CalendarWire = self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.into())
    }

    /// Events in a window, expanded to single occurrences and ordered by
    /// start time. Window defaults to now .. now + 7 days.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        time_min: Option<DateTime<Utc>>,
        time_max: Option<DateTime<Utc>>,
        max_results: u32,
    ) -> Result<Vec<Event>, SdkError> {
        require_id(calendar_id, "calendar id")?;
        if max_results < 1 {
            return Err(SdkError::Validation(
                "max_results must be at least 1".to_string(),
            ));
        }
        let time_min = time_min.unwrap_or_else(Utc::now);
        let time_max = time_max.unwrap_or(time_min + DEFAULT_WINDOW);
        let url = format!(
            "{}/calendars/{}/events?timeMin={}&timeMax={}&maxResults={}&singleEvents=true&orderBy=startTime",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(&time_min.to_rfc3339()),
            urlencoding::encode(&time_max.to_rfc3339()),
            max_results
        );
        let resp: EventsResponse = self.http.execute(ApiRequest::new(Method::Get, url)).await?;
        Ok(resp.items.into_iter().map(Event::from).collect())
    }

    /// One event by id.
    pub async fn get_event(&self, calendar_id: &str, event_id: &str) -> Result<Event, SdkError> {
        Ok(self.get_event_wire(calendar_id, event_id).await?.into())
    }

    /// Create an event. Missing times default to start = now + 1 h,
    /// end = start + 1 h.
    pub async fn create_event(
        &self,
        calendar_id: &str,
        new: NewEvent,
    ) -> Result<Event, SdkError> {
        require_id(calendar_id, "calendar id")?;
        require_id(&new.summary, "event summary")?;
        let start = new.start.unwrap_or_else(|| Utc::now() + chrono::Duration::hours(1));
        let end = new.end.unwrap_or(start + chrono::Duration::hours(1));
        let body = EventInsertRequest {
            summary: new.summary,
            description: new.description,
            start: EventTimeWire::moment(start),
            end: EventTimeWire::moment(end),
            attendees: new
                .attendees
                .into_iter()
                .map(|email| AttendeeWire {
                    email,
                    response_status: None,
                })
                .collect(),
        };
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id)
        );
        let resp: EventWire = self
            .http
            .execute(ApiRequest::new(Method::Post, url).json(serde_json::to_value(&body)?))
            .await?;
        Ok(resp.into())
    }

    /// Update fields of an existing event: read the stored event, merge the
    /// patch, write the whole event back.
    pub async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        patch: EventPatch,
    ) -> Result<Event, SdkError> {
        require_id(calendar_id, "calendar id")?;
        require_id(event_id, "event id")?;
        if patch.is_empty() {
            return Err(SdkError::Validation(
                "event patch must change at least one field".to_string(),
            ));
        }

        let mut event = self.get_event_wire(calendar_id, event_id).await?;
        if let Some(summary) = patch.summary {
            event.summary = Some(summary);
        }
        if let Some(description) = patch.description {
            event.description = Some(description);
        }
        if let Some(start) = patch.start {
            event.start = EventTimeWire::moment(start);
        }
        if let Some(end) = patch.end {
            event.end = EventTimeWire::moment(end);
        }

        let url = format!(
            "{}/calendars/{}/events/{}",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        );
        let resp: EventWire = self
            .http
            .execute(ApiRequest::new(Method::Put, url).json(serde_json::to_value(&event)?))
            .await?;
        Ok(resp.into())
    }

    /// Delete an event. The API answers 204 with no body.
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), SdkError> {
        require_id(calendar_id, "calendar id")?;
        require_id(event_id, "event id")?;
        let url = format!(
            "{}/calendars/{}/events/{}",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        );
        self.http
            .execute::<()>(ApiRequest::new(Method::Delete, url))
            .await?;
        Ok(())
    }

    /// Cheap connectivity check: list calendars once.
    pub async fn ping(&self) -> bool {
        self.list_calendars().await.is_ok()
    }

    async fn get_event_wire(
        &self,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<EventWire, SdkError> {
        require_id(calendar_id, "calendar id")?;
        require_id(event_id, "event id")?;
        let url = format!(
            "{}/calendars/{}/events/{}",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        );
        Ok(self.http.execute(ApiRequest::new(Method::Get, url)).await?)
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

pub struct CalendarClientBuilder {
    credentials_file: Option<String>,
    access_token: Option<String>,
    base_url: String,
    source: CredentialSource,
    retry: RetryConfig,
    timeout: Duration,
}

impl Default for CalendarClientBuilder {
    fn default() -> Self {
        Self {
            credentials_file: None,
            access_token: None,
            base_url: GOOGLE_CALENDAR_API_URL.to_string(),
            source: CredentialSource::from_env(),
            retry: RetryConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CalendarClientBuilder {
    /// Explicit OAuth client-secrets file path; takes precedence over
    /// `GOOGLE_CALENDAR_CREDENTIALS_FILE`.
    pub fn credentials_file(mut self, path: &str) -> Self {
        self.credentials_file = Some(path.to_string());
        self
    }

    /// Use a ready access token directly, skipping the token-bundle flow.
    pub fn access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Lookup used for `GOOGLE_CALENDAR_CREDENTIALS_FILE` and
    /// `GOOGLE_CALENDAR_TOKEN_FILE` when no explicit paths are set.
    pub fn credentials(mut self, source: CredentialSource) -> Self {
        self.source = source;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn build(self) -> Result<CalendarClient, SdkError> {
        let credential = match self.access_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => Credential::new(token),
            None => {
                GoogleAuth::load(&self.source, self.credentials_file.as_deref())?
                    .with_timeout(self.timeout)
                    .access_token()
                    .await?
            }
        };
        let http = RequestExecutor::new(
            HttpTransport::new(self.timeout),
            TimerSleep,
            Service::GoogleCalendar.scheme(),
            credential,
            self.retry,
        )
        .with_default_headers([("Accept", "application/json")]);
        Ok(CalendarClient::with_executor(http, &self.base_url))
    }
}
