pub mod calendar_links;
pub mod event_list_item;
pub mod layout;
pub mod movie_details;
pub mod movie_preview;
pub mod movie_search;
pub mod signup_form;
pub mod toast;

pub use calendar_links::CalendarLinks;
pub use event_list_item::EventListItem;
pub use layout::MainLayout;
pub use movie_details::MovieDetails;
pub use movie_preview::MoviePreview;
pub use movie_search::MovieSearch;
pub use signup_form::SignupForm;
pub use toast::ToastContainer;
