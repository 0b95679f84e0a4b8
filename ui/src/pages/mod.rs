pub mod create_event;
pub mod event_detail;
pub mod events;
pub mod not_found;
pub mod thanks;

pub use create_event::CreateEventPage;
pub use event_detail::EventDetailPage;
pub use events::EventsPage;
pub use not_found::NotFoundPage;
pub use thanks::ThanksPage;
