//! Page state machines, kept free of browser APIs so they can be tested
//! natively.

use payloads::requests::{
    CreateSignup, EventForm, SignupErrors, SignupForm, StartCheckout,
};
use payloads::{Event, EventId, MovieSearchHit, PriceType};
use std::collections::BTreeSet;
use std::rc::Rc;
use yew::prelude::*;

pub const SIGNUP_THANKS: &str = "Thanks for signing up!";
pub const EVENT_CREATED: &str = "Event created";

/// Progress of a form submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Failed(String),
    Succeeded,
}

impl SubmitStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Events list: `Loading -> Failed | Loaded`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EventsListState {
    #[default]
    Loading,
    Failed(String),
    Loaded {
        events: Vec<Event>,
        /// Rows with a delete request in flight.
        deleting: BTreeSet<EventId>,
    },
}

pub enum EventsListAction {
    Loaded(Vec<Event>),
    Failed(String),
    DeleteStarted(EventId),
    /// Remove the row locally; the list is not refetched.
    Deleted(EventId),
    DeleteFailed(EventId),
}

impl EventsListState {
    pub fn is_deleting(&self, id: &EventId) -> bool {
        match self {
            Self::Loaded { deleting, .. } => deleting.contains(id),
            _ => false,
        }
    }
}

impl Reducible for EventsListState {
    type Action = EventsListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match (action, (*self).clone()) {
            (EventsListAction::Loaded(events), _) => Self::Loaded {
                events,
                deleting: BTreeSet::new(),
            },
            (EventsListAction::Failed(message), _) => Self::Failed(message),
            (
                EventsListAction::DeleteStarted(id),
                Self::Loaded {
                    events,
                    mut deleting,
                },
            ) => {
                deleting.insert(id);
                Self::Loaded { events, deleting }
            }
            (
                EventsListAction::Deleted(id),
                Self::Loaded {
                    mut events,
                    mut deleting,
                },
            ) => {
                events.retain(|event| event.id != id);
                deleting.remove(&id);
                Self::Loaded { events, deleting }
            }
            (
                EventsListAction::DeleteFailed(id),
                Self::Loaded {
                    events,
                    mut deleting,
                },
            ) => {
                deleting.remove(&id);
                Self::Loaded { events, deleting }
            }
            // Deletes only make sense against a loaded list.
            (_, _) => return self,
        };
        Rc::new(next)
    }
}

/// Passcode to delete with, if the admin confirmed and typed one.
pub fn delete_passcode(confirmed: bool, entered: Option<String>) -> Option<String> {
    if !confirmed {
        return None;
    }
    entered
        .map(|passcode| passcode.trim().to_string())
        .filter(|passcode| !passcode.is_empty())
}

pub fn delete_confirmation(title: &str) -> String {
    format!("Delete event \"{title}\"? This cannot be undone.")
}

/// What the detail page shows for the current fetch outcome.
#[derive(Debug, PartialEq)]
pub enum DetailView<'a> {
    Loading,
    NotFound,
    Loaded(&'a Event),
}

impl<'a> DetailView<'a> {
    /// Any failure to resolve the event is terminal and renders not-found.
    pub fn from_fetch(event: Option<&'a Event>, error: Option<&str>) -> Self {
        match (event, error) {
            (Some(event), _) => Self::Loaded(event),
            (None, Some(_)) => Self::NotFound,
            (None, None) => Self::Loading,
        }
    }
}

/// Signup form on the detail page: `Idle -> Submitting -> Failed | Succeeded`.
///
/// A paid signup that was recorded but whose checkout could not be started
/// keeps the checkout in `pending_checkout`, so a retry only pays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignupState {
    pub form: SignupForm,
    pub errors: SignupErrors,
    pub status: SubmitStatus,
    pub pending_checkout: Option<StartCheckout>,
}

pub enum SignupAction {
    Name(String),
    Email(String),
    Amount(String),
    Rejected(SignupErrors),
    Submitting,
    Failed(String),
    CheckoutFailed {
        checkout: StartCheckout,
        message: String,
    },
    Succeeded,
}

/// What pressing "Sign Up" should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupStep {
    Signup(CreateSignup),
    Checkout(StartCheckout),
}

impl SignupState {
    /// Calendar links are offered once a signup went through.
    pub fn signed_up(&self) -> bool {
        self.status == SubmitStatus::Succeeded
    }

    pub fn next_step(&self, event: &Event) -> Result<SignupStep, SignupErrors> {
        match &self.pending_checkout {
            Some(checkout) => Ok(SignupStep::Checkout(checkout.clone())),
            None => self.form.to_request(event).map(SignupStep::Signup),
        }
    }
}

impl Reducible for SignupState {
    type Action = SignupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            SignupAction::Name(name) => next.form.name = name,
            SignupAction::Email(email) => next.form.email = email,
            SignupAction::Amount(amount) => next.form.amount = amount,
            SignupAction::Rejected(errors) => {
                next.errors = errors;
                next.status = SubmitStatus::Idle;
            }
            SignupAction::Submitting => {
                next.errors = SignupErrors::default();
                next.status = SubmitStatus::Submitting;
            }
            // Field values are kept so the attendee can retry.
            SignupAction::Failed(message) => {
                next.status = SubmitStatus::Failed(message)
            }
            SignupAction::CheckoutFailed { checkout, message } => {
                next.pending_checkout = Some(checkout);
                next.status = SubmitStatus::Failed(message);
            }
            SignupAction::Succeeded => {
                next.form = SignupForm::default();
                next.errors = SignupErrors::default();
                next.status = SubmitStatus::Succeeded;
                next.pending_checkout = None;
            }
        }
        Rc::new(next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Title,
    Description,
    Location,
    Start,
    End,
    MovieId,
    Price,
    Capacity,
    Passcode,
}

/// Movie search on the admin page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieSearch {
    pub query: String,
    pub results: Vec<MovieSearchHit>,
    pub searching: bool,
}

/// Admin create-event page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateEventState {
    pub form: EventForm,
    pub search: MovieSearch,
    pub status: SubmitStatus,
    /// The most recently created event, linked from the success message.
    pub created: Option<EventId>,
}

pub enum CreateEventAction {
    Edit(EventField, String),
    PriceType(PriceType),
    SearchQuery(String),
    SearchStarted,
    SearchFinished(Vec<MovieSearchHit>),
    SelectMovie(MovieSearchHit),
    Submitting,
    Created(Event),
    Failed(String),
}

impl CreateEventState {
    pub fn can_submit(&self) -> bool {
        !self.status.is_submitting() && self.form.is_valid()
    }
}

impl Reducible for CreateEventState {
    type Action = CreateEventAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CreateEventAction::Edit(field, value) => {
                let form = &mut next.form;
                let slot = match field {
                    EventField::Title => &mut form.title,
                    EventField::Description => &mut form.description,
                    EventField::Location => &mut form.location,
                    EventField::Start => &mut form.start,
                    EventField::End => &mut form.end,
                    EventField::MovieId => &mut form.movie_id,
                    EventField::Price => &mut form.price,
                    EventField::Capacity => &mut form.capacity,
                    EventField::Passcode => &mut form.passcode,
                };
                *slot = value;
            }
            CreateEventAction::PriceType(price_type) => {
                next.form.price_type = price_type
            }
            CreateEventAction::SearchQuery(query) => next.search.query = query,
            CreateEventAction::SearchStarted => next.search.searching = true,
            CreateEventAction::SearchFinished(results) => {
                next.search.results = results;
                next.search.searching = false;
            }
            CreateEventAction::SelectMovie(hit) => {
                next.form.movie_id = hit.movie_id().to_string();
                next.search.query = hit.title;
                next.search.results.clear();
            }
            CreateEventAction::Submitting => {
                next.status = SubmitStatus::Submitting;
                next.created = None;
            }
            CreateEventAction::Created(event) => {
                next = Self {
                    status: SubmitStatus::Succeeded,
                    created: Some(event.id),
                    ..Self::default()
                };
            }
            CreateEventAction::Failed(message) => {
                next.status = SubmitStatus::Failed(message)
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::requests::{EMAIL_INVALID, NAME_REQUIRED};

    fn event(id: &str) -> Event {
        Event {
            id: EventId::from(id),
            title: format!("Event {id}"),
            description: None,
            location: None,
            start: None,
            end: None,
            movie_id: None,
            price_type: None,
            price_pence: None,
            capacity: None,
            is_paid: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(ids: &[&str]) -> Rc<EventsListState> {
        Rc::new(EventsListState::default())
            .reduce(EventsListAction::Loaded(ids.iter().map(|id| event(id)).collect()))
    }

    fn ids(state: &EventsListState) -> Vec<String> {
        match state {
            EventsListState::Loaded { events, .. } => {
                events.iter().map(|event| event.id.to_string()).collect()
            }
            other => panic!("Expected a loaded list, got {other:?}"),
        }
    }

    #[test]
    fn deleting_removes_exactly_that_event() {
        let state = loaded(&["a", "b", "c"])
            .reduce(EventsListAction::DeleteStarted(EventId::from("b")));
        assert!(state.is_deleting(&EventId::from("b")));
        assert!(!state.is_deleting(&EventId::from("a")));

        let state = state.reduce(EventsListAction::Deleted(EventId::from("b")));
        assert_eq!(ids(&state), vec!["a", "c"]);
        assert!(!state.is_deleting(&EventId::from("b")));
    }

    #[test]
    fn failed_delete_keeps_the_list() {
        let state = loaded(&["a", "b"])
            .reduce(EventsListAction::DeleteStarted(EventId::from("a")))
            .reduce(EventsListAction::DeleteFailed(EventId::from("a")));
        assert_eq!(ids(&state), vec!["a", "b"]);
        assert!(!state.is_deleting(&EventId::from("a")));
    }

    #[test]
    fn delete_actions_are_ignored_until_loaded() {
        let state = Rc::new(EventsListState::default())
            .reduce(EventsListAction::Deleted(EventId::from("a")));
        assert_eq!(*state, EventsListState::Loading);
    }

    #[test]
    fn delete_needs_confirmation_and_a_passcode() {
        assert_eq!(delete_passcode(false, Some("letmein".into())), None);
        assert_eq!(delete_passcode(true, None), None);
        assert_eq!(delete_passcode(true, Some("   ".into())), None);
        assert_eq!(
            delete_passcode(true, Some(" letmein ".into())),
            Some("letmein".into())
        );
    }

    #[test]
    fn delete_confirmation_names_the_event() {
        assert_eq!(
            delete_confirmation("Heat"),
            "Delete event \"Heat\"? This cannot be undone."
        );
    }

    #[test]
    fn missing_event_is_not_found() {
        let heat = event("heat");
        assert_eq!(DetailView::from_fetch(None, None), DetailView::Loading);
        assert_eq!(
            DetailView::from_fetch(None, Some("Event not found")),
            DetailView::NotFound
        );
        assert_eq!(
            DetailView::from_fetch(Some(&heat), None),
            DetailView::Loaded(&heat)
        );
    }

    #[test]
    fn rejected_signup_shows_errors_and_stays_idle() {
        let state = Rc::new(SignupState::default())
            .reduce(SignupAction::Email("not-an-email".into()));
        let errors = state.form.validate();
        assert_eq!(errors.name, Some(NAME_REQUIRED));
        assert_eq!(errors.email, Some(EMAIL_INVALID));

        let state = state.reduce(SignupAction::Rejected(errors.clone()));
        assert_eq!(state.errors, errors);
        assert_eq!(state.status, SubmitStatus::Idle);
        assert!(!state.signed_up());
    }

    #[test]
    fn successful_signup_clears_the_form() {
        let state = Rc::new(SignupState::default())
            .reduce(SignupAction::Name("Ada".into()))
            .reduce(SignupAction::Email("ada@example.com".into()))
            .reduce(SignupAction::Submitting);
        assert!(state.status.is_submitting());

        let state = state.reduce(SignupAction::Succeeded);
        assert_eq!(state.form, SignupForm::default());
        assert!(state.signed_up());
    }

    #[test]
    fn failed_signup_keeps_field_values() {
        let state = Rc::new(SignupState::default())
            .reduce(SignupAction::Name("Ada".into()))
            .reduce(SignupAction::Submitting)
            .reduce(SignupAction::Failed("Event is full".into()));
        assert_eq!(state.form.name, "Ada");
        assert_eq!(state.status.error(), Some("Event is full"));
    }

    #[test]
    fn failed_checkout_retries_payment_without_signing_up_again() {
        let mut heat = event("heat");
        heat.price_type = Some(PriceType::Fixed);
        heat.price_pence = Some(750);

        let state = Rc::new(SignupState::default())
            .reduce(SignupAction::Name("Ada".into()))
            .reduce(SignupAction::Email("ada@example.com".into()));
        let Ok(SignupStep::Signup(signup)) = state.next_step(&heat) else {
            panic!("expected a signup request");
        };
        assert_eq!(signup.amount_pence, Some(750));

        let checkout = StartCheckout {
            event_title: heat.title.clone(),
            amount_pence: 750,
        };
        let state = state.reduce(SignupAction::Submitting).reduce(
            SignupAction::CheckoutFailed {
                checkout: checkout.clone(),
                message: "Checkout unavailable".into(),
            },
        );
        assert_eq!(state.status.error(), Some("Checkout unavailable"));
        assert_eq!(
            state.next_step(&heat),
            Ok(SignupStep::Checkout(checkout.clone()))
        );

        // Still only a payment after another failed attempt.
        let state = state.reduce(SignupAction::Submitting).reduce(
            SignupAction::Failed("Checkout unavailable".into()),
        );
        assert_eq!(state.next_step(&heat), Ok(SignupStep::Checkout(checkout)));
    }

    fn filled_form() -> Rc<CreateEventState> {
        [
            (EventField::Title, "Heat"),
            (EventField::Description, "Michael Mann on film"),
            (EventField::Location, "Screen 2"),
            (EventField::Start, "2030-07-01T19:00"),
            (EventField::End, "2030-07-01T22:00"),
            (EventField::Passcode, "letmein"),
        ]
        .into_iter()
        .fold(Rc::new(CreateEventState::default()), |state, (field, value)| {
            state.reduce(CreateEventAction::Edit(field, value.into()))
        })
    }

    #[test]
    fn short_description_blocks_submission() {
        let state = filled_form()
            .reduce(CreateEventAction::Edit(EventField::Description, "too short".into()));
        assert!(!state.can_submit());
    }

    #[test]
    fn submission_is_disabled_while_in_flight() {
        let state = filled_form();
        assert!(state.can_submit());
        let state = state.reduce(CreateEventAction::Submitting);
        assert!(!state.can_submit());
    }

    #[test]
    fn selecting_a_movie_fills_reference_and_query() {
        let hit = MovieSearchHit {
            id: 949,
            title: "Heat".into(),
            release_date: Some("1995-12-15".into()),
            poster_path: None,
        };
        let state = Rc::new(CreateEventState::default())
            .reduce(CreateEventAction::SearchQuery("hea".into()))
            .reduce(CreateEventAction::SearchStarted)
            .reduce(CreateEventAction::SearchFinished(vec![hit.clone()]));
        assert!(!state.search.searching);

        let state = state.reduce(CreateEventAction::SelectMovie(hit));
        assert_eq!(state.form.movie_id, "949");
        assert_eq!(state.search.query, "Heat");
        assert!(state.search.results.is_empty());
    }

    #[test]
    fn created_event_resets_the_form() {
        let state = filled_form()
            .reduce(CreateEventAction::SearchQuery("heat".into()))
            .reduce(CreateEventAction::Submitting)
            .reduce(CreateEventAction::Created(event("new")));
        assert_eq!(state.form, EventForm::default());
        assert_eq!(state.search, MovieSearch::default());
        assert_eq!(state.created, Some(EventId::from("new")));
        assert_eq!(state.status, SubmitStatus::Succeeded);
    }
}
