mod logging;
mod report;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use wellness_core::repository::data_dir;
use wellness_core::{parse_month, parse_rating, DisplayMonth, FileKeyValueStore, ProgressCalendar};

#[derive(Parser)]
#[command(name = "wellness")]
#[command(about = "Rate your workouts on a monthly progress calendar", long_about = None)]
struct Cli {
    /// Month to display: YYYY-MM, this, prev, next, +N or -N (default: 2025-06)
    #[arg(long, global = true, allow_hyphen_values = true)]
    month: Option<String>,

    /// Directory holding storage.json and wellness.log (default: ~/.wellness)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive calendar
    Tui,
    /// Print the calendar grid and the rating summary
    Show,
    /// Rate a day (usage: rate 12 5, rate 12 excellent, rate 3 not)
    Rate {
        /// Day of the displayed month
        day: u32,
        /// 0-5, a label such as "good", or a unique prefix of one
        rating: String,
    },
    /// Print the rating summary
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dir = data_dir(cli.data_dir)?;
    logging::init_logging(&dir)?;

    let month = match cli.month.as_deref() {
        Some(m) => parse_month(m)?,
        None => DisplayMonth::default(),
    };
    let store = FileKeyValueStore::new(Some(dir))?;
    let mut calendar = ProgressCalendar::open(store, month)?;

    match cli.command {
        Some(Commands::Show) => report::show(&calendar),
        Some(Commands::Stats) => report::stats(&calendar),
        Some(Commands::Rate { day, rating }) => {
            let rating = parse_rating(&rating)?;
            if !calendar.select_day(day) {
                return Err(anyhow!(
                    "{} has no day {} (1-{})",
                    calendar.month_title(),
                    day,
                    calendar.days_in_month()
                ));
            }
            calendar.apply_rating(rating)?;
            println!("{} {}: {}", calendar.month().month_name(), day, rating.label());
        }
        Some(Commands::Tui) | None => tui::run(calendar)?,
    }
    Ok(())
}
