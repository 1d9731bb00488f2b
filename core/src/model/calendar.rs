use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, ProgressResult};

/// Six weeks of seven days.
pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_HEADER: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthMembership {
    Previous,
    Current,
    Next,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u32,
    pub membership: MonthMembership,
}

impl CalendarCell {
    fn new(day: u32, membership: MonthMembership) -> Self {
        Self { day, membership }
    }

    pub fn is_current(&self) -> bool {
        self.membership == MonthMembership::Current
    }
}

/// The month shown by the progress screen. `month0` is zero-based (0 = January).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMonth {
    pub year: i32,
    pub month0: u32,
}

impl Default for DisplayMonth {
    // June 2025
    fn default() -> Self {
        Self { year: 2025, month0: 5 }
    }
}

impl DisplayMonth {
    pub fn new(year: i32, month0: u32) -> ProgressResult<Self> {
        let month = Self { year, month0 };
        month.first_day()?;
        Ok(month)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn first_day(&self) -> ProgressResult<NaiveDate> {
        self.month0
            .checked_add(1)
            .and_then(|month| NaiveDate::from_ymd_opt(self.year, month, 1))
            .ok_or(ProgressError::InvalidMonth {
                year: self.year,
                month0: self.month0,
            })
    }

    pub fn previous(&self) -> Self {
        if self.month0 == 0 {
            Self { year: self.year - 1, month0: 11 }
        } else {
            Self { year: self.year, month0: self.month0 - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month0 >= 11 {
            Self { year: self.year + 1, month0: 0 }
        } else {
            Self { year: self.year, month0: self.month0 + 1 }
        }
    }

    pub fn days_in_month(&self) -> ProgressResult<u32> {
        self.first_day()?;
        let first_of_next = self.next().first_day()?;
        Ok((first_of_next - Duration::days(1)).day())
    }

    /// Weekday of the 1st with Monday = 0.
    pub fn first_weekday_monday_origin(&self) -> ProgressResult<u32> {
        let sunday_origin = self.first_day()?.weekday().num_days_from_sunday();
        Ok((sunday_origin + 6) % 7)
    }

    pub fn month_name(&self) -> String {
        self.first_day()
            .map(|d| d.format("%B").to_string())
            .unwrap_or_default()
    }

    /// e.g. "June 2025"
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    pub fn grid(&self) -> ProgressResult<Vec<CalendarCell>> {
        generate_grid(self.year, self.month0)
    }
}

/// Lays out a month as 42 cells starting on a Monday, padded with the tail of
/// the previous month and the head of the next one.
pub fn generate_grid(year: i32, month0: u32) -> ProgressResult<Vec<CalendarCell>> {
    let month = DisplayMonth::new(year, month0)?;
    let days_in_month = month.days_in_month()?;
    let shift = month.first_weekday_monday_origin()?;
    let days_in_prev_month = month.previous().days_in_month()?;

    let mut cells = Vec::with_capacity(GRID_CELLS);

    for i in 0..shift {
        let day = days_in_prev_month - shift + i + 1;
        cells.push(CalendarCell::new(day, MonthMembership::Previous));
    }

    for day in 1..=days_in_month {
        cells.push(CalendarCell::new(day, MonthMembership::Current));
    }

    let remaining = GRID_CELLS - cells.len();
    for day in 1..=remaining as u32 {
        cells.push(CalendarCell::new(day, MonthMembership::Next));
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(cells: &[CalendarCell], membership: MonthMembership) -> usize {
        cells.iter().filter(|c| c.membership == membership).count()
    }

    #[test]
    fn test_june_2025_grid() {
        let cells = generate_grid(2025, 5).unwrap();
        assert_eq!(cells.len(), 42);

        let prev: Vec<u32> = cells[..6].iter().map(|c| c.day).collect();
        assert_eq!(prev, vec![25, 26, 27, 28, 29, 30]);
        assert!(cells[..6].iter().all(|c| c.membership == MonthMembership::Previous));

        let current: Vec<u32> = cells[6..36].iter().map(|c| c.day).collect();
        assert_eq!(current, (1..=30).collect::<Vec<_>>());
        assert!(cells[6..36].iter().all(CalendarCell::is_current));

        let next: Vec<u32> = cells[36..].iter().map(|c| c.day).collect();
        assert_eq!(next, vec![1, 2, 3, 4, 5, 6]);
        assert!(cells[36..].iter().all(|c| c.membership == MonthMembership::Next));
    }

    #[test]
    fn test_every_month_has_42_cells() {
        for year in [1999, 2000, 2024, 2025, 2100] {
            for month0 in 0..12 {
                let month = DisplayMonth::new(year, month0).unwrap();
                let cells = generate_grid(year, month0).unwrap();
                assert_eq!(cells.len(), GRID_CELLS, "{}-{}", year, month0);
                assert_eq!(
                    count(&cells, MonthMembership::Current) as u32,
                    month.days_in_month().unwrap()
                );
                assert_eq!(
                    count(&cells, MonthMembership::Previous) as u32,
                    month.first_weekday_monday_origin().unwrap()
                );
            }
        }
    }

    #[test]
    fn test_month_starting_on_monday_has_no_leading_cells() {
        // September 2025 starts on a Monday.
        let cells = generate_grid(2025, 8).unwrap();
        assert_eq!(cells[0], CalendarCell::new(1, MonthMembership::Current));
        assert_eq!(count(&cells, MonthMembership::Next), 12);
    }

    #[test]
    fn test_february_leap_year() {
        let feb_2024 = DisplayMonth::new(2024, 1).unwrap();
        assert_eq!(feb_2024.days_in_month().unwrap(), 29);
        let feb_2025 = DisplayMonth::new(2025, 1).unwrap();
        assert_eq!(feb_2025.days_in_month().unwrap(), 28);
    }

    #[test]
    fn test_january_pads_with_december() {
        // January 2025 starts on a Wednesday.
        let cells = generate_grid(2025, 0).unwrap();
        assert_eq!(cells[0], CalendarCell::new(30, MonthMembership::Previous));
        assert_eq!(cells[1], CalendarCell::new(31, MonthMembership::Previous));
        assert_eq!(cells[2], CalendarCell::new(1, MonthMembership::Current));
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            generate_grid(2025, 12),
            Err(ProgressError::InvalidMonth { year: 2025, month0: 12 })
        ));
    }

    #[test]
    fn test_title_and_neighbours() {
        let june = DisplayMonth::default();
        assert_eq!(june.title(), "June 2025");
        assert_eq!(june.previous(), DisplayMonth { year: 2025, month0: 4 });
        let dec = DisplayMonth::new(2024, 11).unwrap();
        assert_eq!(dec.next(), DisplayMonth { year: 2025, month0: 0 });
        assert_eq!(dec.next().previous(), dec);
    }
}
