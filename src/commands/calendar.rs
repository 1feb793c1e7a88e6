use std::collections::BTreeSet;

use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::Args;

use crate::config::{Config, WeekStart};
use crate::storage::StorageBackend;
use crate::store::WishStore;

use super::list::OutputFormat;

#[derive(Args)]
pub struct CalendarCommand {
    /// Month to show (YYYY-MM), defaults to the current month
    pub month: Option<String>,
}

impl CalendarCommand {
    pub fn run<S: StorageBackend>(
        &self,
        store: &WishStore<S>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let today = Local::now().date_naive();
        let first = match &self.month {
            Some(m) => parse_month(m)?,
            None => NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .ok_or("could not determine the current month")?,
        };

        let marked = store.dates_with_entries();
        print!(
            "{}",
            render_month(first, config.week_start.value, &marked, today)
        );

        Ok(())
    }
}

#[derive(Args)]
pub struct DayCommand {
    /// Date (YYYY-MM-DD)
    pub date: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl DayCommand {
    pub fn run<S: StorageBackend>(
        &self,
        store: &WishStore<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", self.date))?;

        let records = store.entries_on_date(date);

        if records.is_empty() {
            println!("No entries on {}", date);
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
            OutputFormat::Text => {
                println!("{}", date);
                println!("{}", "-".repeat(60));

                for record in &records {
                    println!(
                        "  {}  [{}] {}",
                        record.entry.timestamp.format("%H:%M"),
                        record.entry.kind,
                        record.wish_goal
                    );
                    println!("         {}", record.entry.content);
                }

                println!();
                println!("Total: {} entr{}", records.len(), plural_y(records.len()));
            }
        }

        Ok(())
    }
}

fn plural_y(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}

fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month '{}'. Use YYYY-MM.", s))
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_month
        .map(|d| d - Duration::days(1))
        .unwrap_or(first)
}

/// Days between the start of the configured week and `date`'s weekday.
fn week_offset(date: NaiveDate, week_start: WeekStart) -> i64 {
    match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday() as i64,
        WeekStart::Monday => date.weekday().num_days_from_monday() as i64,
    }
}

/// Full weeks covering the month, padded on both sides to the week start.
fn month_grid(first_of_month: NaiveDate, week_start: WeekStart) -> Vec<Vec<NaiveDate>> {
    let last = last_of_month(first_of_month);
    let start = first_of_month - Duration::days(week_offset(first_of_month, week_start));
    let end = last + Duration::days(6 - week_offset(last, week_start));

    let mut weeks = Vec::new();
    let mut day = start;
    while day <= end {
        weeks.push((0..7).map(|i| day + Duration::days(i)).collect());
        day = day + Duration::days(7);
    }
    weeks
}

fn weekday_header(week_start: WeekStart) -> &'static str {
    match week_start {
        WeekStart::Sunday => " Su  Mo  Tu  We  Th  Fr  Sa",
        WeekStart::Monday => " Mo  Tu  We  Th  Fr  Sa  Su",
    }
}

/// Renders the month grid: days outside the month are blank, days with
/// entries get a `*`, today is bracketed.
fn render_month(
    first_of_month: NaiveDate,
    week_start: WeekStart,
    marked: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("      {}\n", first_of_month.format("%B %Y")));
    out.push_str(weekday_header(week_start));
    out.push('\n');

    for week in month_grid(first_of_month, week_start) {
        for day in week {
            if day.month() != first_of_month.month() {
                out.push_str("    ");
            } else if day == today {
                out.push_str(&format!("[{:>2}]", day.day()));
            } else if marked.contains(&day) {
                out.push_str(&format!(" {:>2}*", day.day()));
            } else {
                out.push_str(&format!(" {:>2} ", day.day()));
            }
        }
        out.push('\n');
    }

    out.push_str("\n* = day with entries\n");
    out
}
