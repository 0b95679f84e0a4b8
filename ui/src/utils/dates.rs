//! Display formatting for backend timestamps and `datetime-local` inputs.

use jiff::tz::TimeZone;
use payloads::parse_timestamp_in;
use payloads::requests::local_datetime_to_timestamp;

pub const DATE_TBA: &str = "Date TBA";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Saturday, 7 June 2025 at 19:00"
    Full,
    /// "7 Jun 2025, 19:00"
    Short,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::Full => "%A, %-d %B %Y at %H:%M",
            Self::Short => "%-d %b %Y, %H:%M",
        }
    }
}

/// Format a backend timestamp in the browser's time zone, or "Date TBA".
pub fn format_date_time(value: Option<&str>) -> String {
    format_in(value, &TimeZone::system(), DateStyle::Full)
}

pub fn format_date_time_short(value: Option<&str>) -> String {
    format_in(value, &TimeZone::system(), DateStyle::Short)
}

pub fn format_in(value: Option<&str>, tz: &TimeZone, style: DateStyle) -> String {
    let Some(timestamp) = value.and_then(|value| parse_timestamp_in(value, tz))
    else {
        return DATE_TBA.to_string();
    };
    timestamp
        .to_zoned(tz.clone())
        .strftime(style.pattern())
        .to_string()
}

/// Convert a `datetime-local` value into an absolute timestamp string, or
/// an empty string when the input is blank or malformed.
pub fn local_input_to_iso(value: &str) -> String {
    local_input_to_iso_in(value, &TimeZone::system())
}

pub fn local_input_to_iso_in(value: &str, tz: &TimeZone) -> String {
    local_datetime_to_timestamp(value, tz)
        .map(|timestamp| timestamp.to_string())
        .unwrap_or_default()
}

/// Live preview of a `datetime-local` field in short form.
pub fn preview_local_input(value: &str) -> String {
    let iso = local_input_to_iso(value);
    format_date_time_short(Some(&iso))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bst() -> TimeZone {
        TimeZone::fixed(jiff::tz::offset(1))
    }

    #[test]
    fn missing_or_malformed_dates_read_tba() {
        assert_eq!(format_in(None, &bst(), DateStyle::Full), DATE_TBA);
        assert_eq!(format_in(Some(""), &bst(), DateStyle::Short), DATE_TBA);
        assert_eq!(
            format_in(Some("next tuesday"), &bst(), DateStyle::Full),
            DATE_TBA
        );
    }

    #[test]
    fn formats_in_the_given_zone() {
        let value = Some("2025-06-07T18:00:00Z");
        assert_eq!(
            format_in(value, &bst(), DateStyle::Full),
            "Saturday, 7 June 2025 at 19:00"
        );
        assert_eq!(
            format_in(value, &bst(), DateStyle::Short),
            "7 Jun 2025, 19:00"
        );
    }

    #[test]
    fn offsetless_values_are_local_and_bare_dates_are_utc_midnight() {
        assert_eq!(
            format_in(Some("2025-06-07T19:00"), &bst(), DateStyle::Full),
            "Saturday, 7 June 2025 at 19:00"
        );
        assert_eq!(
            format_in(Some("2025-06-07"), &bst(), DateStyle::Short),
            "7 Jun 2025, 01:00"
        );
    }

    #[test]
    fn local_input_converts_to_utc() {
        assert_eq!(
            local_input_to_iso_in("2025-06-07T19:00", &bst()),
            "2025-06-07T18:00:00Z"
        );
        assert_eq!(local_input_to_iso_in("", &bst()), "");
        assert_eq!(local_input_to_iso_in("tomorrow", &bst()), "");
    }
}
