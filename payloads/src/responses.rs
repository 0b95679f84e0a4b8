use crate::{Event, MovieSearchHit};
use serde::{Deserialize, Serialize};

/// `GET /events` returns either a bare array or `{"events": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventList {
    Bare(Vec<Event>),
    Wrapped { events: Vec<Event> },
}

impl EventList {
    pub fn into_events(self) -> Vec<Event> {
        match self {
            Self::Bare(events) | Self::Wrapped { events } => events,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieSearchResults {
    #[serde(default)]
    pub results: Vec<MovieSearchHit>,
}

/// Acknowledgement for `POST /signups`. The backend may send more; only the
/// optional message is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupConfirmation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Hosted checkout page to redirect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

/// Error body sent by the backend on failure. `error` may be any JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_list_accepts_both_shapes() {
        let bare: EventList =
            serde_json::from_str(r#"[{"id":"a","title":"A"}]"#).unwrap();
        let wrapped: EventList =
            serde_json::from_str(r#"{"events":[{"id":"a","title":"A"}]}"#)
                .unwrap();
        assert_eq!(bare.into_events(), wrapped.into_events());
    }
}
