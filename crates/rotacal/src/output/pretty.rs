//! Pretty output formatting.

use rotacal_core::calendar::{DateSummary, DayCell, MonthGrid, NoteSummary};
use rotacal_core::feeds::{FeedItem, FeedSource};
use rotacal_core::notes::MergeReport;
use rotacal_core::settings::{NotificationSettings, Reminder};

use crate::cache::PrewarmReport;
use crate::news::LoadedFeed;
use crate::service::{Cutoff, DayNotes};

const COLUMN: usize = 8;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn rule() -> String {
    "-".repeat(40)
}

fn time(t: chrono::NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Day-of-month text of a grid cell: `*` marks today, `+` marks notes,
/// parentheses mark the neighbouring months.
fn cell_day(cell: &DayCell) -> String {
    let mut text = if cell.in_month {
        cell.day.to_string()
    } else {
        format!("({})", cell.day)
    };
    if cell.is_today {
        text.push('*');
    }
    if cell.has_notes() {
        text.push('+');
    }
    text
}

/// Format a month grid as 6 weeks of day, lunar and shift rows.
pub fn format_month_grid(grid: &MonthGrid) -> String {
    let title = grid
        .cells
        .iter()
        .find(|cell| cell.in_month)
        .map(|cell| cell.date.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", grid.year, grid.month));

    let mut output = format!("{title}\n");
    output.push_str(&"-".repeat(COLUMN * 7));
    output.push('\n');
    for name in WEEKDAYS {
        output.push_str(&format!("{name:<COLUMN$}"));
    }

    for week in grid.weeks() {
        output.push('\n');
        let rows: [Vec<String>; 3] = [
            week.iter().map(cell_day).collect(),
            week.iter().map(|c| c.lunar_label.clone()).collect(),
            week.iter().map(|c| c.shift.label().to_string()).collect(),
        ];
        for row in rows {
            output.push('\n');
            let line: String = row
                .iter()
                .map(|text| format!("{text:<COLUMN$}"))
                .collect();
            output.push_str(line.trim_end());
        }
    }

    output.push_str("\n\n* today  + notes  (n) other month  d/m lunar month start");
    output
}

/// Format one day cell.
pub fn format_day_cell(cell: &DayCell) -> String {
    let mut output = format!(
        "{} ({})\n  Shift: {}\n  Lunar: {}/{}/{}{}",
        cell.date,
        cell.date.format("%A"),
        cell.shift.display_name(),
        cell.lunar.day,
        cell.lunar.month,
        cell.lunar.year,
        if cell.lunar.is_leap { " (leap month)" } else { "" },
    );
    if cell.is_today {
        output.push_str("\n  Today");
    }
    if cell.notes.is_empty() {
        output.push_str("\n  No notes.");
    }
    for (index, note) in cell.notes.iter().enumerate() {
        output.push_str(&format!("\n  [{index}] {note}"));
    }
    output
}

/// Format a by-date monthly summary.
pub fn format_date_summaries(summaries: &[DateSummary]) -> String {
    if summaries.is_empty() {
        return "No notes found.".to_string();
    }
    let mut output = format!("NOTES BY DATE ({})\n", summaries.len());
    output.push_str(&rule());
    for summary in summaries {
        output.push_str(&format!(
            "\n{} {} [{}]",
            summary.weekday,
            summary.display,
            summary.shift.display_name()
        ));
        for note in &summary.notes {
            output.push_str(&format!("\n  - {note}"));
        }
    }
    output
}

/// Format a by-note monthly summary.
pub fn format_note_summaries(summaries: &[NoteSummary]) -> String {
    if summaries.is_empty() {
        return "No notes found.".to_string();
    }
    let mut output = format!("NOTES BY TEXT ({})\n", summaries.len());
    output.push_str(&rule());
    for summary in summaries {
        let days: Vec<String> = summary.days.iter().map(u32::to_string).collect();
        output.push_str(&format!("\n{}: {}", summary.note, days.join(", ")));
    }
    output
}

/// Format stored notes grouped by date.
pub fn format_day_notes(days: &[DayNotes]) -> String {
    if days.is_empty() {
        return "No notes found.".to_string();
    }
    let mut output = format!("NOTES ({})\n", days.len());
    output.push_str(&rule());
    for day in days {
        output.push_str(&format!("\n{}", day.date));
        for (index, note) in day.notes.iter().enumerate() {
            output.push_str(&format!("\n  [{index}] {note}"));
        }
    }
    output
}

/// Format the outcome of a note import.
pub fn format_merge_report(report: &MergeReport) -> String {
    let mut output = format!(
        "Imported {} note(s), skipped {}",
        report.applied,
        report.skipped.len()
    );
    for skipped in &report.skipped {
        output.push_str(&format!(
            "\n  {:?} {:?}: {}",
            skipped.update.date, skipped.update.note, skipped.reason
        ));
    }
    output
}

/// Format the feed sources, marking the active one.
pub fn format_feed_sources(sources: &[FeedSource], active: &FeedSource) -> String {
    if sources.is_empty() {
        return "No sources found.".to_string();
    }
    let mut output = format!("SOURCES ({})\n", sources.len());
    output.push_str(&rule());
    for source in sources {
        let marker = if source == active { "*" } else { " " };
        output.push_str(&format!("\n{marker} {}\n    {}", source.name, source.url));
    }
    output
}

fn format_item(item: &FeedItem) -> String {
    let mut output = item.title.clone();
    if let Some(date) = &item.pub_date {
        output.push_str(&format!("\n  {date}"));
    }
    if !item.summary.is_empty() {
        output.push_str(&format!("\n  {}", item.summary));
    }
    if let Some(link) = &item.link {
        output.push_str(&format!("\n  {link}"));
    }
    output
}

/// Format up to `limit` articles of a loaded feed.
pub fn format_feed(loaded: &LoadedFeed, limit: usize) -> String {
    let feed = &loaded.feed;
    let mut output = format!("{} - {} ({})\n", loaded.source.name, feed.title, feed.len());
    output.push_str(&rule());
    for item in feed.items.iter().take(limit) {
        output.push_str(&format!("\n{}\n", format_item(item)));
    }
    if feed.len() > limit {
        output.push_str(&format!("\n... {} more", feed.len() - limit));
    }
    output
}

/// Format the outcome of a background prewarm.
pub fn format_prewarm_report(report: &PrewarmReport) -> String {
    let mut output = format!(
        "Prewarmed {}, already cached {}, failed {}",
        report.warmed.len(),
        report.skipped.len(),
        report.failed.len()
    );
    for failure in &report.failed {
        output.push_str(&format!("\n  {}: {}", failure.key, failure.error));
    }
    output
}

/// Format the reminder cutoff of a date.
pub fn format_cutoff(cutoff: &Cutoff) -> String {
    format!(
        "{} ({})\n  Reminder at: {}",
        cutoff.date,
        cutoff.shift.display_name(),
        time(cutoff.time)
    )
}

/// Format a due reminder, or the absence of one.
pub fn format_reminder(reminder: Option<&Reminder>) -> String {
    match reminder {
        Some(reminder) => format!("Due: {}: {}", reminder.title, reminder.body),
        None => "Not due.".to_string(),
    }
}

/// Format notification settings.
pub fn format_settings(settings: &NotificationSettings) -> String {
    format!(
        "Reminder cutoffs\n  Day shift: {}\n  Night shift: {}\n  Other days: {}",
        time(settings.day),
        time(settings.night),
        time(settings.off)
    )
}
