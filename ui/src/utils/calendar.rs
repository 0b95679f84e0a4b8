//! "Add to calendar" links for an event.

use jiff::{SignedDuration, Timestamp, tz::TimeZone};
use payloads::Event;
use reqwest::Url;

pub const GOOGLE_CALENDAR_URL: &str =
    "https://calendar.google.com/calendar/render";

/// The details a calendar entry needs, with missing times filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub title: String,
    pub details: String,
    pub location: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl CalendarEntry {
    /// A missing start falls back to `now`, a missing end to one hour after
    /// the start.
    pub fn for_event(event: &Event, now: Timestamp) -> Self {
        Self::for_event_in(event, now, &TimeZone::system())
    }

    /// Like [`CalendarEntry::for_event`], reading offset-less times as local
    /// to `tz`.
    pub fn for_event_in(event: &Event, now: Timestamp, tz: &TimeZone) -> Self {
        let start = event.start_timestamp_in(tz).unwrap_or(now);
        let end = event.end_timestamp_in(tz).unwrap_or_else(|| {
            start
                .checked_add(SignedDuration::from_hours(1))
                .unwrap_or(start)
        });
        Self {
            title: event.title.clone(),
            details: event.description.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            start,
            end,
        }
    }

    /// Google Calendar "create event" deep link.
    pub fn google_calendar_url(&self) -> String {
        let dates = format!(
            "{}/{}",
            calendar_stamp(self.start),
            calendar_stamp(self.end)
        );
        let params = [
            ("action", "TEMPLATE"),
            ("text", self.title.as_str()),
            ("details", self.details.as_str()),
            ("location", self.location.as_str()),
            ("dates", dates.as_str()),
        ];
        match Url::parse_with_params(GOOGLE_CALENDAR_URL, &params) {
            Ok(url) => url.into(),
            Err(e) => {
                tracing::error!("Failed to build calendar link: {e}");
                GOOGLE_CALENDAR_URL.to_string()
            }
        }
    }
}

/// `YYYYMMDDTHHMMSSZ` in UTC.
fn calendar_stamp(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::EventId;

    fn heat() -> Event {
        Event {
            id: EventId::from("heat"),
            title: "Heat & Dust".into(),
            description: Some("A 35mm print".into()),
            location: Some("Screen 2".into()),
            start: Some("2030-07-01T19:00:00Z".into()),
            end: Some("2030-07-01T22:00:00Z".into()),
            movie_id: None,
            price_type: None,
            price_pence: None,
            capacity: None,
            is_paid: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn google_link_carries_template_action_and_encoded_title() {
        let now: Timestamp = "2030-01-01T00:00:00Z".parse().unwrap();
        let url = CalendarEntry::for_event(&heat(), now).google_calendar_url();
        assert!(url.starts_with(GOOGLE_CALENDAR_URL));
        assert!(url.contains("action=TEMPLATE"));
        assert!(url.contains("text=Heat+%26+Dust"));
        assert!(url.contains("location=Screen+2"));
        assert!(url.contains("dates=20300701T190000Z%2F20300701T220000Z"));
    }

    #[test]
    fn missing_times_fall_back_to_now_plus_an_hour() {
        let now: Timestamp = "2030-01-01T12:00:00Z".parse().unwrap();
        let event = Event {
            start: None,
            end: None,
            ..heat()
        };
        let entry = CalendarEntry::for_event(&event, now);
        assert_eq!(entry.start, now);
        assert_eq!(entry.end, "2030-01-01T13:00:00Z".parse().unwrap());
    }

    #[test]
    fn missing_end_is_one_hour_after_start() {
        let now: Timestamp = "2030-01-01T12:00:00Z".parse().unwrap();
        let event = Event {
            end: None,
            ..heat()
        };
        let entry = CalendarEntry::for_event(&event, now);
        assert_eq!(entry.end, "2030-07-01T20:00:00Z".parse().unwrap());
    }

    #[test]
    fn offsetless_times_keep_the_event_dates() {
        let now: Timestamp = "2030-01-01T00:00:00Z".parse().unwrap();
        let event = Event {
            start: Some("2025-06-07T19:00".into()),
            end: Some("2025-06-07T21:00".into()),
            ..heat()
        };
        let bst = TimeZone::fixed(jiff::tz::offset(1));
        let url = CalendarEntry::for_event_in(&event, now, &bst)
            .google_calendar_url();
        assert!(url.contains("dates=20250607T180000Z%2F20250607T200000Z"));
    }

    #[test]
    fn missing_end_at_the_end_of_time_does_not_overflow() {
        let event = Event {
            start: None,
            end: None,
            ..heat()
        };
        let entry = CalendarEntry::for_event(&event, Timestamp::MAX);
        assert_eq!(entry.start, Timestamp::MAX);
        assert_eq!(entry.end, Timestamp::MAX);
    }
}
