//! Conversions from wire types to domain types for Google Calendar.

use chrono::Utc;

use super::wire::{CalendarWire, EventTimeWire, EventWire};
use super::{CalendarInfo, Event, EventTime};

impl From<CalendarWire> for CalendarInfo {
    fn from(c: CalendarWire) -> Self {
        Self {
            id: c.id,
            summary: c.summary,
            description: c.description,
            time_zone: c.time_zone,
            primary: c.primary,
        }
    }
}

impl From<EventTimeWire> for EventTime {
    fn from(t: EventTimeWire) -> Self {
        if let Some(at) = t.date_time {
            EventTime::Moment(at)
        } else if let Some(day) = t.date {
            EventTime::AllDay(day)
        } else {
            // The API always sets one of the two; degrade rather than fail.
            EventTime::Moment(Utc::now())
        }
    }
}

impl From<EventWire> for Event {
    fn from(e: EventWire) -> Self {
        Self {
            id: e.id,
            summary: e.summary,
            description: e.description,
            status: e.status,
            start: e.start.into(),
            end: e.end.into(),
            attendees: e.attendees.into_iter().map(|a| a.email).collect(),
            html_link: e.html_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_timed_event_conversion() {
        let wire: EventWire = serde_json::from_str(
            r#"{
                "id": "evt_123",
                "status": "confirmed",
                "summary": "Team Meeting",
                "start": {"dateTime": "2024-03-01T10:00:00Z", "timeZone": "UTC"},
                "end": {"dateTime": "2024-03-01T11:00:00Z", "timeZone": "UTC"},
                "attendees": [{"email": "team@example.com", "responseStatus": "accepted"}],
                "htmlLink": "https://www.google.com/calendar/event?eid=abc"
            }"#,
        )
        .unwrap();
        let event: Event = wire.into();
        assert_eq!(event.id, "evt_123");
        assert_eq!(event.attendees, vec!["team@example.com"]);
        assert!(matches!(event.start, EventTime::Moment(_)));
    }

    #[test]
    fn test_all_day_event_conversion() {
        let wire: EventWire = serde_json::from_str(
            r#"{
                "id": "evt_456",
                "summary": "Company Holiday",
                "start": {"date": "2024-07-04"},
                "end": {"date": "2024-07-05"}
            }"#,
        )
        .unwrap();
        let event: Event = wire.into();
        assert_eq!(
            event.start,
            EventTime::AllDay(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap())
        );
        assert!(event.attendees.is_empty());
    }

    #[test]
    fn test_event_wire_round_trips() {
        let raw = r#"{"id":"evt_789","summary":"Sync","start":{"dateTime":"2024-03-01T10:00:00Z"},"end":{"dateTime":"2024-03-01T10:30:00Z"}}"#;
        let wire: EventWire = serde_json::from_str(raw).unwrap();
        let back = serde_json::to_value(&wire).unwrap();
        assert_eq!(back["id"], "evt_789");
        assert_eq!(back["start"]["dateTime"], "2024-03-01T10:00:00Z");
        // Absent fields stay absent, so a merge-and-PUT does not invent nulls.
        assert!(back.get("description").is_none());
    }
}
