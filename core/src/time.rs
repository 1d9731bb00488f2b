use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};

use crate::model::calendar::DisplayMonth;

/// Parses the month to display, relative to `today` for keywords.
///
/// Accepts `YYYY-MM`, `this`, `prev`/`last`, `next`, and `+N`/`-N` month offsets.
pub fn parse_month_from(input: &str, today: NaiveDate) -> Result<DisplayMonth> {
    let input = input.trim();
    let this = DisplayMonth::from_date(today);

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "this" | "now" | "current" => return Ok(this),
        "prev" | "previous" | "last" => return Ok(this.previous()),
        "next" => return Ok(this.next()),
        _ => {}
    }

    // 2. Relative offsets
    if let Some(rest) = input.strip_prefix('+').or_else(|| input.strip_prefix('-')) {
        let count: u32 = rest.parse().map_err(|_| anyhow!("Invalid month offset: {}", input))?;
        return offset_month(this, count, input.starts_with('+'))
            .ok_or_else(|| anyhow!("Month offset out of range: {}", input));
    }

    // 3. YYYY-MM
    let (year_str, month_str) = input
        .split_once('-')
        .ok_or_else(|| anyhow!("Could not parse month: {}", input))?;
    let year: i32 = year_str.parse().map_err(|_| anyhow!("Invalid year: {}", year_str))?;
    let month: u32 = month_str.parse().map_err(|_| anyhow!("Invalid month: {}", month_str))?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("Month must be 1-12, got {}", month));
    }
    Ok(DisplayMonth::new(year, month - 1)?)
}

fn offset_month(month: DisplayMonth, count: u32, forward: bool) -> Option<DisplayMonth> {
    let base = i64::from(month.year) * 12 + i64::from(month.month0);
    let total = if forward {
        base.checked_add(i64::from(count))?
    } else {
        base.checked_sub(i64::from(count))?
    };
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month0 = u32::try_from(total.rem_euclid(12)).ok()?;
    DisplayMonth::new(year, month0).ok()
}

pub fn parse_month(input: &str) -> Result<DisplayMonth> {
    parse_month_from(input, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_parse_year_month() {
        let m = parse_month_from("2025-06", anchor()).unwrap();
        assert_eq!(m, DisplayMonth { year: 2025, month0: 5 });
        let m = parse_month_from("1999-12", anchor()).unwrap();
        assert_eq!(m, DisplayMonth { year: 1999, month0: 11 });
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_month_from("this", anchor()).unwrap(), DisplayMonth { year: 2025, month0: 0 });
        assert_eq!(parse_month_from("prev", anchor()).unwrap(), DisplayMonth { year: 2024, month0: 11 });
        assert_eq!(parse_month_from("NEXT", anchor()).unwrap(), DisplayMonth { year: 2025, month0: 1 });
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse_month_from("+13", anchor()).unwrap(), DisplayMonth { year: 2026, month0: 1 });
        assert_eq!(parse_month_from("-1", anchor()).unwrap(), DisplayMonth { year: 2024, month0: 11 });
        assert_eq!(parse_month_from("-25", anchor()).unwrap(), DisplayMonth { year: 2022, month0: 11 });
        assert_eq!(parse_month_from("+0", anchor()).unwrap(), DisplayMonth { year: 2025, month0: 0 });
    }

    #[test]
    fn test_parse_huge_offsets() {
        assert_eq!(
            parse_month_from("+1200", anchor()).unwrap(),
            DisplayMonth { year: 2125, month0: 0 }
        );
        assert!(parse_month_from("+4000000000", anchor()).is_err());
        assert!(parse_month_from("-4000000000", anchor()).is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_month_from("2025-13", anchor()).is_err());
        assert!(parse_month_from("2025-00", anchor()).is_err());
        assert!(parse_month_from("june", anchor()).is_err());
        assert!(parse_month_from("+x", anchor()).is_err());
    }
}
