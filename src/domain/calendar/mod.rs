//! Google Calendar domain — calendars and events.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use client::{CalendarClient, CalendarClientBuilder};

/// A calendar the authenticated user can see.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarInfo {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub time_zone: Option<String>,
    /// Whether this is the user's primary calendar.
    pub primary: bool,
}

/// When an event starts or ends: a point in time, or a whole day for
/// all-day events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum EventTime {
    Moment(DateTime<Utc>),
    AllDay(NaiveDate),
}

/// A calendar event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// `confirmed`, `tentative`, or `cancelled`.
    pub status: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    /// Attendee email addresses.
    pub attendees: Vec<String>,
    pub html_link: Option<String>,
}

/// Payload for creating an event.
///
/// Times default the way the API's quick-add flows do: start one hour from
/// now, end one hour after start.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub summary: String,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub attendees: Vec<String>,
}

/// Partial update for an existing event. `None` fields keep their current
/// value (read-merge-write against the stored event).
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }
}
