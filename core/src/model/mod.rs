pub mod calendar;
pub mod rating;
pub mod stats;
