//! Realistic seed data shared by the dev-server and the api client tests.
//!
//! The dataset covers the states the frontend has to render:
//! - a free screening linked to a movie
//! - a fixed-price screening with limited capacity
//! - a pay-what-you-feel event without a movie
//! - an event whose dates are not yet known

use crate::TestApp;
use jiff::{Span, Timestamp};
use payloads::{Event, EventId, MovieId, MovieSummary, PriceType};

pub const INCEPTION_ID: u64 = 27205;
pub const HEAT_ID: u64 = 949;
pub const THIRD_MAN_ID: u64 = 1092;

pub fn movies() -> Vec<MovieSummary> {
    vec![
        MovieSummary {
            id: INCEPTION_ID,
            title: "Inception".into(),
            overview: Some(
                "A thief who steals corporate secrets through dream-sharing \
                 technology is given the inverse task of planting an idea."
                    .into(),
            ),
            runtime: Some(148),
            release_date: Some("2010-07-15".into()),
            poster_path: Some("/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg".into()),
            genres: vec!["Action".into(), "Science Fiction".into()],
        },
        MovieSummary {
            id: HEAT_ID,
            title: "Heat".into(),
            overview: Some(
                "Obsessive master thief Neil McCauley leads a top-notch crew \
                 on various daring heists throughout Los Angeles."
                    .into(),
            ),
            runtime: Some(170),
            release_date: Some("1995-12-15".into()),
            poster_path: Some("/umSVjVdbVwtx5ryCA2QXL44Durm.jpg".into()),
            genres: vec!["Crime".into(), "Drama".into()],
        },
        MovieSummary {
            id: THIRD_MAN_ID,
            title: "The Third Man".into(),
            overview: Some(
                "In postwar Vienna, Holly Martins investigates the death of \
                 his old friend Harry Lime."
                    .into(),
            ),
            runtime: Some(104),
            release_date: Some("1949-08-31".into()),
            poster_path: None,
            genres: vec!["Mystery".into(), "Thriller".into()],
        },
    ]
}

/// An event starting `days` from `now` at the same time of day, lasting
/// `hours`.
pub fn event_in(
    id: &str,
    title: &str,
    now: Timestamp,
    days: i64,
    hours: i64,
) -> Event {
    let start = now + Span::new().hours(days * 24);
    let end = start + Span::new().hours(hours);
    Event {
        id: EventId(id.into()),
        title: title.into(),
        description: None,
        location: None,
        start: Some(start.to_string()),
        end: Some(end.to_string()),
        movie_id: None,
        price_type: None,
        price_pence: None,
        capacity: None,
        is_paid: None,
        created_at: Some(now.to_string()),
        updated_at: Some(now.to_string()),
    }
}

/// Development dataset with a handful of events in different states.
pub struct DevDataset {
    pub free_screening: Event,
    pub paid_screening: Event,
    pub donation_event: Event,
    pub undated_event: Event,
}

impl DevDataset {
    pub fn create(app: &TestApp) -> Self {
        let now = Timestamp::now();

        let free_screening = Event {
            description: Some(
                "Community screening of Inception, followed by a chat.".into(),
            ),
            location: Some("Main Hall".into()),
            movie_id: Some(MovieId::from(INCEPTION_ID)),
            price_type: Some(PriceType::Free),
            ..event_in("inception-night", "Inception Night", now, 3, 3)
        };
        let paid_screening = Event {
            description: Some("Michael Mann's Heat on the big screen.".into()),
            location: Some("Screen 2, The Picturehouse".into()),
            movie_id: Some(MovieId::from(HEAT_ID)),
            price_type: Some(PriceType::Fixed),
            price_pence: Some(750),
            capacity: Some(40),
            is_paid: Some(true),
            ..event_in("heat-35mm", "Heat in 35mm", now, 7, 3)
        };
        let donation_event = Event {
            description: Some(
                "Bring a short film, watch a short film. Pay what you feel."
                    .into(),
            ),
            location: Some("The Annexe".into()),
            price_type: Some(PriceType::Donation),
            is_paid: Some(true),
            ..event_in("shorts-open-mic", "Shorts Open Mic", now, 10, 2)
        };
        let undated_event = Event {
            description: Some("Date to be confirmed.".into()),
            movie_id: Some(MovieId::from(THIRD_MAN_ID)),
            start: None,
            end: None,
            ..event_in("third-man", "The Third Man (TBC)", now, 0, 0)
        };

        {
            let mut store = app.state.store();
            for movie in movies() {
                store.insert_movie(movie);
            }
            for event in [
                &free_screening,
                &paid_screening,
                &donation_event,
                &undated_event,
            ] {
                store.insert_event(event.clone());
            }
        }

        Self {
            free_screening,
            paid_screening,
            donation_event,
            undated_event,
        }
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Seeded events:");
        for event in [
            &self.free_screening,
            &self.paid_screening,
            &self.donation_event,
            &self.undated_event,
        ] {
            tracing::info!(
                "   /events/{} - {} ({})",
                event.id,
                event.title,
                event.price_label()
            );
        }
    }
}
