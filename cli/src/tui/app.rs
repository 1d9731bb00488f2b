use wellness_core::{
    CalendarCell, FileKeyValueStore, KeyValueStore, PickerState, ProgressCalendar, ProgressError,
    Rating, PICKER_ROWS,
};

const PICKER_COLUMNS: usize = 3;
const SWATCHES: usize = 6;

pub enum InputMode {
    Normal,
    Picking,
}

pub struct App<S: KeyValueStore = FileKeyValueStore> {
    pub calendar: ProgressCalendar<S>,
    pub grid: Vec<CalendarCell>,
    /// Index into `grid`; always points at a day of the displayed month.
    pub cursor: usize,
    /// Index into the flattened swatch rows.
    pub swatch: usize,
    pub status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(calendar: ProgressCalendar<S>) -> App<S> {
        let grid = calendar.grid();
        let cursor = grid.iter().position(CalendarCell::is_current).unwrap_or(0);
        App {
            calendar,
            grid,
            cursor,
            swatch: 0,
            status: None,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        match self.calendar.picker() {
            PickerState::Open { .. } => InputMode::Picking,
            PickerState::Closed => InputMode::Normal,
        }
    }

    pub fn cursor_cell(&self) -> Option<&CalendarCell> {
        self.grid.get(self.cursor)
    }

    fn move_cursor(&mut self, delta: isize) {
        let target = self.cursor as isize + delta;
        if target < 0 {
            return;
        }
        if let Some(cell) = self.grid.get(target as usize) {
            if cell.is_current() {
                self.cursor = target as usize;
            }
        }
    }

    pub fn next(&mut self) {
        self.move_cursor(1);
    }

    pub fn previous(&mut self) {
        self.move_cursor(-1);
    }

    pub fn down(&mut self) {
        self.move_cursor(7);
    }

    pub fn up(&mut self) {
        self.move_cursor(-7);
    }

    /// Taps the day under the cursor.
    pub fn open_picker(&mut self) {
        let Some(cell) = self.grid.get(self.cursor).copied() else {
            return;
        };
        if self.calendar.select_cell(&cell) {
            self.status = None;
            self.swatch = self
                .calendar
                .rating_for(cell.day)
                .and_then(|r| PICKER_ROWS.iter().flatten().position(|s| *s == r))
                .unwrap_or(0);
        }
    }

    pub fn close_picker(&mut self) {
        self.calendar.dismiss_picker();
    }

    pub fn next_swatch(&mut self) {
        self.swatch = (self.swatch + 1) % SWATCHES;
    }

    pub fn previous_swatch(&mut self) {
        self.swatch = (self.swatch + SWATCHES - 1) % SWATCHES;
    }

    pub fn toggle_swatch_row(&mut self) {
        self.swatch = (self.swatch + PICKER_COLUMNS) % SWATCHES;
    }

    pub fn selected_swatch(&self) -> Rating {
        PICKER_ROWS[self.swatch / PICKER_COLUMNS][self.swatch % PICKER_COLUMNS]
    }

    pub fn pick_selected(&mut self) {
        self.pick(self.selected_swatch());
    }

    pub fn pick_score(&mut self, score: u8) {
        if let Some(rating) = Rating::from_score(score) {
            self.pick(rating);
        }
    }

    fn pick(&mut self, rating: Rating) {
        let day = self.calendar.selected_day();
        match self.calendar.apply_rating(rating) {
            Ok(()) => {
                if let Some(day) = day {
                    self.status = Some(format!("Day {}: {}", day, rating.label()));
                }
            }
            Err(err @ ProgressError::PersistenceWrite(_)) => {
                self.status = Some(format!("{} (kept until restart)", err));
            }
            Err(err) => {
                self.status = Some(err.to_string());
            }
        }
    }
}
