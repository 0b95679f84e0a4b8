pub mod calendar;
pub mod dates;
