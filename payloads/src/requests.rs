use crate::{Event, EventId, MovieId, PriceType, price};
use jiff::{Timestamp, civil, tz::TimeZone};
use serde::{Deserialize, Serialize};

pub const TITLE_MIN_LEN: usize = 1;
pub const DESCRIPTION_MIN_LEN: usize = 10;
pub const LOCATION_MIN_LEN: usize = 2;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email";
pub const AMOUNT_INVALID: &str = "Invalid amount";

/// Body of `POST /events`. The admin passcode travels in a header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    /// Absolute timestamp, e.g. `2025-06-01T18:30:00Z`.
    pub start: String,
    pub end: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<MovieId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<PriceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_pence: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

/// Body of `POST /signups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignup {
    pub event_id: EventId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_pence: Option<i64>,
}

/// Body of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCheckout {
    pub event_title: String,
    pub amount_pence: i64,
}

/// Loose `text@text.text` check, the same shape browsers accept for a
/// quick sanity pass. Not RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    email.char_indices().any(|(at, c)| {
        if c != '@' {
            return false;
        }
        let before_ok = email[..at]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace());
        let domain: Vec<char> = email[at + 1..]
            .chars()
            .take_while(|c| !c.is_whitespace())
            .collect();
        let dot_ok = domain
            .iter()
            .enumerate()
            .any(|(i, c)| *c == '.' && i >= 1 && i + 1 < domain.len());
        before_ok && dot_ok
    })
}

/// Inline errors for the signup form. Empty means the form can be sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub amount: Option<&'static str>,
}

impl SignupErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.amount.is_none()
    }

    /// Messages in display order.
    pub fn messages(&self) -> Vec<&'static str> {
        [self.name, self.email, self.amount]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// In-progress values of the signup form on the event detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    /// Pounds, only used for pay-what-you-feel events.
    pub amount: String,
}

impl SignupForm {
    pub fn validate(&self) -> SignupErrors {
        let mut errors = SignupErrors::default();
        if self.name.trim().is_empty() {
            errors.name = Some(NAME_REQUIRED);
        }
        if self.email.trim().is_empty() {
            errors.email = Some(EMAIL_REQUIRED);
        } else if !is_valid_email(&self.email) {
            errors.email = Some(EMAIL_INVALID);
        }
        if !self.amount.trim().is_empty()
            && price::parse_pounds(&self.amount).is_err()
        {
            errors.amount = Some(AMOUNT_INVALID);
        }
        errors
    }

    /// Validate and build the request for `event`.
    ///
    /// Fixed-price events are charged their listed price; a typed amount is
    /// only honoured for pay-what-you-feel events.
    pub fn to_request(&self, event: &Event) -> Result<CreateSignup, SignupErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        let amount_pence = match event.effective_price_type() {
            PriceType::Free => None,
            PriceType::Fixed => event.fixed_price_pence(),
            PriceType::Donation if self.amount.trim().is_empty() => None,
            PriceType::Donation => price::parse_pounds(&self.amount)
                .ok()
                .filter(|pence| *pence > 0),
        };
        Ok(CreateSignup {
            event_id: event.id.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            amount_pence,
        })
    }
}

/// Convert a `datetime-local` value (e.g. `2025-06-01T18:30`) in `tz` into
/// an absolute timestamp.
pub fn local_datetime_to_timestamp(
    value: &str,
    tz: &TimeZone,
) -> Option<Timestamp> {
    let datetime: civil::DateTime = value.trim().parse().ok()?;
    datetime.to_zoned(tz.clone()).ok().map(|zoned| zoned.timestamp())
}

/// Inline errors for the create-event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFormErrors {
    pub title: Option<&'static str>,
    pub description: Option<&'static str>,
    pub location: Option<&'static str>,
    pub start: Option<&'static str>,
    pub end: Option<&'static str>,
    pub movie_id: Option<&'static str>,
    pub price: Option<&'static str>,
    pub capacity: Option<&'static str>,
    pub passcode: Option<&'static str>,
}

impl EventFormErrors {
    pub fn is_empty(&self) -> bool {
        [
            self.title,
            self.description,
            self.location,
            self.start,
            self.end,
            self.movie_id,
            self.price,
            self.capacity,
            self.passcode,
        ]
        .iter()
        .all(Option::is_none)
    }
}

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESCRIPTION_TOO_SHORT: &str =
    "Description must be at least 10 characters";
pub const LOCATION_TOO_SHORT: &str = "Location must be at least 2 characters";
pub const START_REQUIRED: &str = "Start is required";
pub const END_REQUIRED: &str = "End is required";
pub const DATE_INVALID: &str = "Enter a valid date and time";
pub const END_NOT_AFTER_START: &str = "End must be after start";
pub const MOVIE_ID_NOT_NUMERIC: &str = "Movie ID must be numeric";
pub const PRICE_REQUIRED: &str = "Enter a price greater than zero";
pub const CAPACITY_INVALID: &str = "Capacity must be a positive whole number";
pub const PASSCODE_REQUIRED: &str = "Admin passcode is required";

/// In-progress values of the admin create-event form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub location: String,
    /// `datetime-local` value, interpreted in the browser's time zone.
    pub start: String,
    pub end: String,
    pub movie_id: String,
    pub price_type: PriceType,
    /// Pounds, only used for fixed-price events.
    pub price: String,
    pub capacity: String,
    pub passcode: String,
}

impl EventForm {
    pub fn validate(&self) -> EventFormErrors {
        let mut errors = EventFormErrors::default();

        if self.title.trim().chars().count() < TITLE_MIN_LEN {
            errors.title = Some(TITLE_REQUIRED);
        }
        if self.description.trim().chars().count() < DESCRIPTION_MIN_LEN {
            errors.description = Some(DESCRIPTION_TOO_SHORT);
        }
        if self.location.trim().chars().count() < LOCATION_MIN_LEN {
            errors.location = Some(LOCATION_TOO_SHORT);
        }

        let start = parse_local(&self.start);
        let end = parse_local(&self.end);
        match start {
            LocalInput::Missing => errors.start = Some(START_REQUIRED),
            LocalInput::Invalid => errors.start = Some(DATE_INVALID),
            LocalInput::Valid(_) => {}
        }
        match (start, end) {
            (_, LocalInput::Missing) => errors.end = Some(END_REQUIRED),
            (_, LocalInput::Invalid) => errors.end = Some(DATE_INVALID),
            (LocalInput::Valid(start), LocalInput::Valid(end))
                if end <= start =>
            {
                errors.end = Some(END_NOT_AFTER_START)
            }
            _ => {}
        }

        let movie_id = self.movie_id.trim();
        if !movie_id.is_empty() && !MovieId(movie_id.to_string()).is_numeric()
        {
            errors.movie_id = Some(MOVIE_ID_NOT_NUMERIC);
        }

        if self.price_type == PriceType::Fixed
            && !matches!(price::parse_pounds(&self.price), Ok(pence) if pence > 0)
        {
            errors.price = Some(PRICE_REQUIRED);
        }

        let capacity = self.capacity.trim();
        if !capacity.is_empty()
            && !matches!(capacity.parse::<u32>(), Ok(n) if n > 0)
        {
            errors.capacity = Some(CAPACITY_INVALID);
        }

        if self.passcode.trim().is_empty() {
            errors.passcode = Some(PASSCODE_REQUIRED);
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validate and build the request body, converting the local start and
    /// end into absolute timestamps in `tz`.
    pub fn to_request(&self, tz: &TimeZone) -> Result<CreateEvent, EventFormErrors> {
        let mut errors = self.validate();
        let start = local_datetime_to_timestamp(&self.start, tz);
        let end = local_datetime_to_timestamp(&self.end, tz);
        if start.is_none() && errors.start.is_none() {
            errors.start = Some(DATE_INVALID);
        }
        if end.is_none() && errors.end.is_none() {
            errors.end = Some(DATE_INVALID);
        }
        let (Some(start), Some(end)) = (start, end) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let movie_id = self.movie_id.trim();
        let price_pence = match self.price_type {
            PriceType::Fixed => price::parse_pounds(&self.price).ok(),
            _ => None,
        };
        Ok(CreateEvent {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            start: start.to_string(),
            end: end.to_string(),
            location: self.location.trim().to_string(),
            movie_id: (!movie_id.is_empty())
                .then(|| MovieId(movie_id.to_string())),
            price_type: Some(self.price_type),
            price_pence,
            capacity: self.capacity.trim().parse().ok(),
            is_paid: Some(self.price_type != PriceType::Free),
        })
    }
}

#[derive(Clone, Copy)]
enum LocalInput {
    Missing,
    Invalid,
    Valid(civil::DateTime),
}

fn parse_local(value: &str) -> LocalInput {
    let value = value.trim();
    if value.is_empty() {
        return LocalInput::Missing;
    }
    match value.parse() {
        Ok(datetime) => LocalInput::Valid(datetime),
        Err(_) => LocalInput::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> EventForm {
        EventForm {
            title: "Friday Night Noir".into(),
            description: "Double bill of classic noir.".into(),
            location: "Hall B".into(),
            start: "2025-06-06T19:00".into(),
            end: "2025-06-06T23:00".into(),
            passcode: "letmein".into(),
            ..Default::default()
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("contact me at x@y.io please"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn empty_signup_yields_two_required_messages() {
        let errors = SignupForm::default().validate();
        assert_eq!(errors.messages(), vec![NAME_REQUIRED, EMAIL_REQUIRED]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = SignupForm {
            name: "Test User".into(),
            email: "not-an-email".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().messages(), vec![EMAIL_INVALID]);
    }

    #[test]
    fn signup_amount_follows_price_type() {
        let mut event: Event = serde_json::from_str(
            r#"{"id":"e1","title":"Heat","priceType":"fixed","pricePence":500}"#,
        )
        .unwrap();
        let form = SignupForm {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
            amount: "20".into(),
        };
        let request = form.to_request(&event).unwrap();
        assert_eq!(request.name, "Ada");
        assert_eq!(request.amount_pence, Some(500));

        event.price_type = Some(PriceType::Donation);
        assert_eq!(form.to_request(&event).unwrap().amount_pence, Some(2000));

        event.price_type = Some(PriceType::Free);
        assert_eq!(form.to_request(&event).unwrap().amount_pence, None);
    }

    #[test]
    fn bad_donation_amount_blocks_signup() {
        let form = SignupForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            amount: "lots".into(),
        };
        assert_eq!(form.validate().amount, Some(AMOUNT_INVALID));
    }

    #[test]
    fn complete_event_form_is_valid() {
        assert!(complete_form().is_valid());
    }

    #[test]
    fn short_description_or_location_blocks_submission() {
        let mut form = complete_form();
        form.description = "too short".into();
        assert!(!form.is_valid());
        assert_eq!(form.validate().description, Some(DESCRIPTION_TOO_SHORT));

        let mut form = complete_form();
        form.location = " B ".into();
        assert!(!form.is_valid());
        assert_eq!(form.validate().location, Some(LOCATION_TOO_SHORT));
    }

    #[test]
    fn secondary_validations() {
        let mut form = complete_form();
        form.end = form.start.clone();
        assert_eq!(form.validate().end, Some(END_NOT_AFTER_START));

        let mut form = complete_form();
        form.movie_id = "tt0111161".into();
        assert_eq!(form.validate().movie_id, Some(MOVIE_ID_NOT_NUMERIC));

        let mut form = complete_form();
        form.price_type = PriceType::Fixed;
        assert_eq!(form.validate().price, Some(PRICE_REQUIRED));
        form.price = "6.50".into();
        assert!(form.is_valid());

        let mut form = complete_form();
        form.capacity = "0".into();
        assert_eq!(form.validate().capacity, Some(CAPACITY_INVALID));
    }

    #[test]
    fn blank_passcode_blocks_submission() {
        let mut form = complete_form();
        form.passcode = "   ".into();
        assert_eq!(form.validate().passcode, Some(PASSCODE_REQUIRED));
    }

    #[test]
    fn to_request_converts_local_times() {
        let tz = TimeZone::fixed(jiff::tz::offset(1));
        let mut form = complete_form();
        form.movie_id = " 27205 ".into();
        let request = form.to_request(&tz).unwrap();
        assert_eq!(request.start, "2025-06-06T18:00:00Z");
        assert_eq!(request.end, "2025-06-06T22:00:00Z");
        assert_eq!(request.movie_id, Some(MovieId("27205".into())));
        assert_eq!(request.price_type, Some(PriceType::Free));
        assert_eq!(request.is_paid, Some(false));
    }

    #[test]
    fn create_event_uses_camel_case() {
        let body = serde_json::to_value(CreateEvent {
            title: "t".into(),
            description: "d".into(),
            start: "s".into(),
            end: "e".into(),
            location: "l".into(),
            movie_id: Some(MovieId("1".into())),
            price_type: Some(PriceType::Donation),
            price_pence: None,
            capacity: None,
            is_paid: Some(true),
        })
        .unwrap();
        assert_eq!(body["movieId"], "1");
        assert_eq!(body["priceType"], "donation");
        assert_eq!(body["isPaid"], true);
        assert!(body.get("pricePence").is_none());
    }
}
