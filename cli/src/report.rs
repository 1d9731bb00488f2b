use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use wellness_core::{CalendarCell, KeyValueStore, ProgressCalendar, Rating, WEEKDAY_HEADER};

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "Rating")]
    label: &'static str,
    #[tabled(rename = "Days")]
    days: u32,
}

/// One grid cell as text: `12*5` is day 12 rated 5, `(30)` is outside the month.
fn cell_text<S: KeyValueStore>(calendar: &ProgressCalendar<S>, cell: &CalendarCell) -> String {
    if !cell.is_current() {
        return format!("({})", cell.day);
    }
    match calendar.rating_for(cell.day) {
        Some(Rating::Unrated) => format!("{}*-", cell.day),
        Some(rating) => format!("{}*{}", cell.day, rating.score()),
        None => cell.day.to_string(),
    }
}

pub fn render_grid<S: KeyValueStore>(calendar: &ProgressCalendar<S>) -> String {
    let mut builder = Builder::default();
    builder.push_record(WEEKDAY_HEADER);
    for week in calendar.grid().chunks(7) {
        builder.push_record(week.iter().map(|cell| cell_text(calendar, cell)));
    }

    let mut table = builder.build();
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn render_counters<S: KeyValueStore>(calendar: &ProgressCalendar<S>) -> String {
    let rows: Vec<CounterRow> = calendar
        .aggregate_counts()
        .buckets()
        .into_iter()
        .map(|(rating, days)| CounterRow {
            label: rating.label(),
            days,
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn show<S: KeyValueStore>(calendar: &ProgressCalendar<S>) {
    println!("\n\x1b[1;36m{}\x1b[0m", calendar.month_title());
    println!("{}", render_grid(calendar));
    println!("  N*s = rated s, N*- = rated neutral, (N) = other month\n");
    println!("{}", render_counters(calendar));
}

pub fn stats<S: KeyValueStore>(calendar: &ProgressCalendar<S>) {
    println!("\n\x1b[1;36mYour workout ratings, {}\x1b[0m", calendar.month_title());
    println!("{}", render_counters(calendar));
}
