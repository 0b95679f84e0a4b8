pub mod use_event;
pub mod use_events;
pub mod use_fetch;
pub mod use_movie;
pub mod use_title;

pub use use_event::use_event;
pub use use_events::{EventsHookReturn, use_events};
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_movie::use_movie;
pub use use_title::use_title;

use std::cell::Cell;
use std::rc::Rc;

/// Distinguishes "not fetched yet" from a fetched value, which matters when
/// the value itself can be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(value) => Some(value),
        }
    }
}

/// Per-hook counter guarding against stale responses.
///
/// Each request takes a [`RequestTicket`]. Bumping the generation, which
/// fetching hooks do from their effect destructor, makes every outstanding
/// ticket stale so its response is dropped instead of applied.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration(Rc<Cell<u64>>);

impl RequestGeneration {
    pub fn begin(&self) -> RequestTicket {
        let issued = self.0.get().wrapping_add(1);
        self.0.set(issued);
        RequestTicket {
            generation: self.0.clone(),
            issued,
        }
    }

    pub fn invalidate(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }
}

#[derive(Debug)]
pub struct RequestTicket {
    generation: Rc<Cell<u64>>,
    issued: u64,
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.generation.get() == self.issued
    }
}
