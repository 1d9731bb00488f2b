use tracing::{debug, warn};

use crate::error::{ProgressError, ProgressResult};
use crate::model::calendar::{CalendarCell, DisplayMonth};
use crate::model::rating::{Rating, INACTIVE_COLOR};
use crate::model::stats::{RatingCounts, RatingMap};
use crate::repository::{KeyValueStore, MarksRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    Open { day: u32 },
}

/// One session of the progress screen: the month on display, the ratings for
/// its days, and whether the rating overlay is open.
pub struct ProgressCalendar<S: KeyValueStore> {
    repo: MarksRepository<S>,
    month: DisplayMonth,
    days_in_month: u32,
    marks: RatingMap,
    picker: PickerState,
}

impl<S: KeyValueStore> ProgressCalendar<S> {
    /// Creates the session with no ratings. Call `load_state` to read the store.
    pub fn new(store: S, month: DisplayMonth) -> ProgressResult<Self> {
        let days_in_month = month.days_in_month()?;
        Ok(Self {
            repo: MarksRepository::for_month(store, month),
            month,
            days_in_month,
            marks: RatingMap::new(),
            picker: PickerState::Closed,
        })
    }

    /// `new` followed by `load_state`.
    pub fn open(store: S, month: DisplayMonth) -> ProgressResult<Self> {
        let mut calendar = Self::new(store, month)?;
        calendar.load_state();
        Ok(calendar)
    }

    pub fn load_state(&mut self) {
        self.marks = self.repo.load(self.days_in_month);
        debug!(
            key = self.repo.key(),
            rated = self.marks.len(),
            "Loaded ratings for {}",
            self.month.title()
        );
    }

    pub fn month(&self) -> DisplayMonth {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    pub fn marks(&self) -> &RatingMap {
        &self.marks
    }

    pub fn picker(&self) -> PickerState {
        self.picker
    }

    pub fn selected_day(&self) -> Option<u32> {
        match self.picker {
            PickerState::Open { day } => Some(day),
            PickerState::Closed => None,
        }
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker != PickerState::Closed
    }

    pub fn store(&self) -> &S {
        self.repo.store()
    }

    pub fn grid(&self) -> Vec<CalendarCell> {
        // The month was validated in `new`.
        self.month.grid().unwrap_or_default()
    }

    pub fn rating_for(&self, day: u32) -> Option<Rating> {
        self.marks.get(&day).copied()
    }

    /// Background color for a grid cell.
    pub fn cell_color(&self, cell: &CalendarCell) -> &'static str {
        if !cell.is_current() {
            return INACTIVE_COLOR;
        }
        self.rating_for(cell.day).unwrap_or_default().color()
    }

    /// Opens the overlay for `day`. Days outside the month are ignored and
    /// return `false`.
    pub fn select_day(&mut self, day: u32) -> bool {
        if !(1..=self.days_in_month).contains(&day) {
            debug!(day, "Ignoring selection outside {}", self.month.title());
            return false;
        }
        self.picker = PickerState::Open { day };
        true
    }

    /// Day-tap entry point: only cells of the displayed month react.
    pub fn select_cell(&mut self, cell: &CalendarCell) -> bool {
        if !cell.is_current() {
            debug!(?cell, "Ignoring tap on inactive cell");
            return false;
        }
        self.select_day(cell.day)
    }

    pub fn dismiss_picker(&mut self) {
        self.picker = PickerState::Closed;
    }

    /// Rates the selected day, persists the whole map and closes the overlay.
    ///
    /// On a failed write the new rating stays in memory and
    /// `ProgressError::PersistenceWrite` is returned.
    pub fn apply_rating(&mut self, rating: Rating) -> ProgressResult<()> {
        let day = self.selected_day().ok_or(ProgressError::NoDaySelected)?;

        let mut new_marks = self.marks.clone();
        new_marks.insert(day, rating);
        self.marks = new_marks;
        self.picker = PickerState::Closed;
        debug!(day, rating = rating.label(), "Rated day");

        self.repo.save(&self.marks).map_err(|err| {
            warn!("Failed to persist rating for day {}: {:#}", day, err);
            ProgressError::PersistenceWrite(err)
        })
    }

    /// Same as picking the color on the overlay by its identifier.
    pub fn apply_color(&mut self, color: &str) -> ProgressResult<Option<Rating>> {
        match Rating::from_color(color) {
            Some(rating) => self.apply_rating(rating).map(|_| Some(rating)),
            None => {
                debug!(color, "Ignoring unknown rating color");
                Ok(None)
            }
        }
    }

    pub fn aggregate_counts(&self) -> RatingCounts {
        RatingCounts::aggregate(&self.marks, self.days_in_month)
    }

    pub fn month_title(&self) -> String {
        self.month.title()
    }

    /// Question shown on the overlay, e.g. "How do you rate your workout on June 12?"
    pub fn picker_prompt(&self) -> Option<String> {
        self.selected_day().map(|day| {
            format!(
                "How do you rate your workout on {} {}?",
                self.month.month_name(),
                day
            )
        })
    }
}
