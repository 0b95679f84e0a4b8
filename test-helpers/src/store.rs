//! In-memory state behind the mock backend.

use payloads::{
    Event, EventId, MovieSearchHit, MovieSummary, requests, responses,
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Event not found")]
    EventNotFound,
    #[error("Movie not found")]
    MovieNotFound,
    #[error("Event is full")]
    EventFull,
}

/// A request as seen by the mock, for asserting on traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Default)]
pub struct Store {
    /// Insertion order is kept so listings are stable.
    events: Vec<Event>,
    signups: Vec<requests::CreateSignup>,
    movies: HashMap<u64, MovieSummary>,
    pub requests: Vec<RecordedRequest>,
}

impl Store {
    pub fn list_events(&self) -> Vec<Event> {
        self.events.clone()
    }

    pub fn get_event(&self, id: &EventId) -> Result<Event, StoreError> {
        self.events
            .iter()
            .find(|event| &event.id == id)
            .cloned()
            .ok_or(StoreError::EventNotFound)
    }

    pub fn create_event(
        &mut self,
        details: requests::CreateEvent,
        now: jiff::Timestamp,
    ) -> Event {
        let event = Event {
            id: EventId(Uuid::new_v4().to_string()),
            title: details.title,
            description: Some(details.description),
            location: Some(details.location),
            start: Some(details.start),
            end: Some(details.end),
            movie_id: details.movie_id,
            price_type: details.price_type,
            price_pence: details.price_pence,
            capacity: details.capacity,
            is_paid: details.is_paid,
            created_at: Some(now.to_string()),
            updated_at: Some(now.to_string()),
        };
        self.events.push(event.clone());
        event
    }

    /// Insert an event exactly as given, bypassing validation. Used to seed
    /// awkward records such as events without dates.
    pub fn insert_event(&mut self, event: Event) {
        self.events.retain(|existing| existing.id != event.id);
        self.events.push(event);
    }

    pub fn delete_event(&mut self, id: &EventId) -> Result<(), StoreError> {
        let before = self.events.len();
        self.events.retain(|event| &event.id != id);
        if self.events.len() == before {
            return Err(StoreError::EventNotFound);
        }
        self.signups.retain(|signup| &signup.event_id != id);
        Ok(())
    }

    pub fn create_signup(
        &mut self,
        signup: requests::CreateSignup,
    ) -> Result<responses::SignupConfirmation, StoreError> {
        let event = self.get_event(&signup.event_id)?;
        let taken = self
            .signups
            .iter()
            .filter(|existing| existing.event_id == event.id)
            .count();
        if let Some(capacity) = event.capacity
            && taken >= capacity as usize
        {
            return Err(StoreError::EventFull);
        }
        self.signups.push(signup);
        Ok(responses::SignupConfirmation {
            message: Some(format!("Signed up for {}", event.title)),
        })
    }

    pub fn signups(&self) -> &[requests::CreateSignup] {
        &self.signups
    }

    pub fn insert_movie(&mut self, movie: MovieSummary) {
        self.movies.insert(movie.id, movie);
    }

    pub fn get_movie(&self, id: u64) -> Result<MovieSummary, StoreError> {
        self.movies.get(&id).cloned().ok_or(StoreError::MovieNotFound)
    }

    /// Case-insensitive title search, ordered by title.
    pub fn search_movies(&self, query: &str) -> Vec<MovieSearchHit> {
        let query = query.to_lowercase();
        let mut hits: Vec<MovieSearchHit> = self
            .movies
            .values()
            .filter(|movie| movie.title.to_lowercase().contains(&query))
            .map(|movie| MovieSearchHit {
                id: movie.id,
                title: movie.title.clone(),
                release_date: movie.release_date.clone(),
                poster_path: movie.poster_path.clone(),
            })
            .collect();
        hits.sort_by(|a, b| a.title.cmp(&b.title));
        hits
    }
}
