#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod progress;
pub mod time;

pub use catalog::{CategoryFilter, FilterCriteria, LevelFilter, filter_courses};
pub use error::Error;
pub use progress::{CourseProgressMap, aggregate_progress};
pub use time::Clock;
