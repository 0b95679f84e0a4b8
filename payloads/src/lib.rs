pub mod api_client;
pub mod price;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

use jiff::{Timestamp, civil, tz::TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifier for an event. Opaque to the frontend.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct EventId(pub String);

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Reference to a movie in the external movie database.
///
/// The backend stores this as a string, but movie search results carry
/// numeric ids, so both forms are accepted on the wire.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl MovieId {
    /// Movie database ids are numeric; anything else is a typo.
    pub fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => MovieId(text),
            Raw::Number(number) => MovieId::from(number),
        })
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[default]
    Free,
    Fixed,
    /// Pay what you feel.
    Donation,
}

impl PriceType {
    pub const ALL: [PriceType; 3] =
        [PriceType::Free, PriceType::Fixed, PriceType::Donation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Fixed => "fixed",
            Self::Donation => "donation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Fixed => "Fixed price",
            Self::Donation => "Pay what you feel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

/// A scheduled screening or gathering, as returned by the backend.
///
/// Timestamps are kept as the strings the backend sent. A missing or
/// malformed value is displayed as "Date TBA" rather than failing the whole
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Event {
    /// Start time, reading offset-less values as local to the system zone.
    pub fn start_timestamp(&self) -> Option<Timestamp> {
        self.start_timestamp_in(&TimeZone::system())
    }

    pub fn end_timestamp(&self) -> Option<Timestamp> {
        self.end_timestamp_in(&TimeZone::system())
    }

    pub fn start_timestamp_in(&self, tz: &TimeZone) -> Option<Timestamp> {
        parse_timestamp_in(self.start.as_deref()?, tz)
    }

    pub fn end_timestamp_in(&self, tz: &TimeZone) -> Option<Timestamp> {
        parse_timestamp_in(self.end.as_deref()?, tz)
    }

    /// The linked movie, ignoring blank references.
    pub fn movie(&self) -> Option<&MovieId> {
        self.movie_id.as_ref().filter(|id| !id.0.trim().is_empty())
    }

    pub fn effective_price_type(&self) -> PriceType {
        match self.price_type {
            Some(price_type) => price_type,
            None if self.is_paid == Some(true) => PriceType::Fixed,
            None => PriceType::Free,
        }
    }

    /// Amount a fixed-price signup is charged, in pence.
    pub fn fixed_price_pence(&self) -> Option<i64> {
        match self.effective_price_type() {
            PriceType::Fixed => self.price_pence.filter(|p| *p > 0),
            _ => None,
        }
    }

    /// Short price description for display, e.g. "Free" or "£7.50".
    pub fn price_label(&self) -> String {
        match self.effective_price_type() {
            PriceType::Free => PriceType::Free.label().to_string(),
            PriceType::Fixed => match self.fixed_price_pence() {
                Some(pence) => price::format_pence(pence),
                None => PriceType::Fixed.label().to_string(),
            },
            PriceType::Donation => PriceType::Donation.label().to_string(),
        }
    }
}

/// Parse a backend date the way a browser's `Date` would.
///
/// Values with an offset are absolute. A date and time without an offset is
/// local to `tz`, and a bare date is midnight UTC.
pub fn parse_timestamp_in(value: &str, tz: &TimeZone) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp);
    }
    if value.contains(['T', 't', ' ']) {
        let datetime: civil::DateTime = value.parse().ok()?;
        return datetime.to_zoned(tz.clone()).ok().map(|z| z.timestamp());
    }
    let date: civil::Date = value.parse().ok()?;
    date.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
}

/// Poster size buckets offered by the movie database image CDN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
pub enum PosterSize {
    #[display("w185")]
    W185,
    #[default]
    #[display("w342")]
    W342,
    #[display("w500")]
    W500,
}

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Build a poster URL from a path such as `/abc123.jpg`.
pub fn poster_url(poster_path: Option<&str>, size: PosterSize) -> Option<String> {
    poster_path
        .filter(|path| !path.is_empty())
        .map(|path| format!("{POSTER_BASE_URL}/{size}{path}"))
}

/// Movie metadata from the backend's movie database proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl MovieSummary {
    pub fn poster_url(&self, size: PosterSize) -> Option<String> {
        poster_url(self.poster_path.as_deref(), size)
    }

    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

/// A single movie search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSearchHit {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieSearchHit {
    pub fn movie_id(&self) -> MovieId {
        MovieId::from(self.id)
    }

    /// "Title (1999-03-31)", or "Title (n/a)" without a release date.
    pub fn display_label(&self) -> String {
        let release = self
            .release_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .unwrap_or("n/a");
        format!("{} ({release})", self.title)
    }
}
