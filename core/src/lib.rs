pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{ProgressError, ProgressResult};
pub use input::{expand_key, parse_rating};
pub use model::calendar::{generate_grid, CalendarCell, DisplayMonth, MonthMembership, GRID_CELLS, WEEKDAY_HEADER};
pub use model::rating::{Rating, INACTIVE_COLOR, PICKER_ROWS};
pub use model::stats::{RatingCounts, RatingMap};
pub use repository::{FileKeyValueStore, KeyValueStore, MarksRepository, MemoryKeyValueStore, MARKS_KEY};
pub use service::progress_service::{PickerState, ProgressCalendar};
pub use time::{parse_month, parse_month_from};
