//! rotacal CLI entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rotacal::cache::MemoryCache;
use rotacal::cli::feeds::FeedsAction;
use rotacal::cli::notes::NotesAction;
use rotacal::cli::settings::SettingsAction;
use rotacal::cli::{Cli, Commands, OutputFormat, SummaryKind};
use rotacal::config::Config;
use rotacal::feeds::{FeedFetcher, HttpFetcher, ProxyFetcher};
use rotacal::news::NewsService;
use rotacal::output::{format_output, pretty};
use rotacal::service::CalendarService;
use rotacal::storage::JsonFileRepository;
use rotacal_core::feeds::FeedCatalog;
use rotacal_core::notes::NoteUpdate;

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

fn print<T: Serialize>(format: OutputFormat, value: &T, render: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Json => println!("{}", format_output(value, format)),
        OutputFormat::Pretty => println!("{}", render(value)),
    }
}

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.quiet { "rotacal=warn" } else { "rotacal=info" };
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into()),
    );

    // Logs go to stderr so JSON output on stdout stays parseable.
    if cli.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn read_updates(path: &std::path::Path) -> Result<Vec<NoteUpdate>> {
    let raw = if path.as_os_str() == "-" {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        raw
    } else {
        tokio::fs::read_to_string(path).await?
    };
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let mut config = Config::from_env()?;
    if let Some(path) = cli.notes_path.clone() {
        config.notes_path = path;
    }
    tracing::debug!(?config, "Loaded configuration");

    let today = Local::now().date_naive();
    let format = cli.format;

    // Only awaited by the commands that read the note store.
    let calendar = open_calendar(&config);

    match cli.command {
        Commands::Feeds(feeds_cmd) => {
            run_feeds(feeds_cmd.action, &config, format, cli.quiet).await?;
        }
        Commands::Month { year, month } => {
            let calendar = calendar.await?;
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            let grid = calendar.month_grid(year, month, today).await?;
            print(format, &grid, pretty::format_month_grid);
        }
        Commands::Summary { year, month, by } => {
            let calendar = calendar.await?;
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            match by {
                SummaryKind::Date => {
                    let summary = calendar.summary_by_date(year, month).await?;
                    print(format, &summary, |s| pretty::format_date_summaries(s));
                }
                SummaryKind::Note => {
                    let summary = calendar.summary_by_note(year, month).await?;
                    print(format, &summary, |s| pretty::format_note_summaries(s));
                }
            }
        }
        Commands::Day { date } => {
            let calendar = calendar.await?;
            let cell = calendar.day_cell(date.unwrap_or(today), today).await?;
            print(format, &cell, pretty::format_day_cell);
        }
        Commands::Notes(notes_cmd) => {
            let calendar = calendar.await?;
            run_notes(notes_cmd.action, &calendar, format, cli.quiet).await?;
        }
        Commands::Cutoff { date, at } => {
            let calendar = calendar.await?;
            let date = date.unwrap_or(today);
            let cutoff = calendar.cutoff_for(date).await?;
            match at {
                None => print(format, &cutoff, pretty::format_cutoff),
                Some(time) => {
                    let reminder = calendar.reminder_at(date.and_time(time)).await?;
                    match format {
                        OutputFormat::Json => println!(
                            "{}",
                            format_output(
                                &serde_json::json!({ "cutoff": cutoff, "reminder": reminder }),
                                format
                            )
                        ),
                        OutputFormat::Pretty => println!(
                            "{}\n{}",
                            pretty::format_cutoff(&cutoff),
                            pretty::format_reminder(reminder.as_ref())
                        ),
                    }
                }
            }
        }
        Commands::Settings(settings_cmd) => {
            let calendar = calendar.await?;
            match settings_cmd.action {
                SettingsAction::Show => {
                    let settings = calendar.settings().await?;
                    print(format, &settings, pretty::format_settings);
                }
                SettingsAction::Set { day, night, off } => {
                    let mut settings = calendar.settings().await?;
                    settings.day = day.unwrap_or(settings.day);
                    settings.night = night.unwrap_or(settings.night);
                    settings.off = off.unwrap_or(settings.off);
                    calendar.update_settings(settings).await?;
                    print(format, &settings, pretty::format_settings);
                }
            }
        }
    }

    Ok(())
}

async fn open_calendar(config: &Config) -> Result<CalendarService<JsonFileRepository>> {
    let repository = Arc::new(
        JsonFileRepository::new(&config.notes_path).with_default_settings(config.notifications),
    );
    Ok(CalendarService::load(repository, config.scheduler()).await?)
}

async fn run_notes(
    action: NotesAction,
    calendar: &CalendarService<JsonFileRepository>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match action {
        NotesAction::List { from, to } => {
            let from = from.unwrap_or(NaiveDate::MIN);
            let to = to.unwrap_or(NaiveDate::MAX);
            let notes = calendar.notes_between(from, to).await;
            print(format, &notes, |n| pretty::format_day_notes(n));
        }
        NotesAction::Add { date, text } => {
            calendar.add_note(date, &text).await?;
            if !quiet {
                println!("Added note to {date}");
            }
        }
        NotesAction::Edit { date, index, text } => {
            calendar.edit_note(date, index, &text).await?;
            if !quiet {
                println!("Updated note [{index}] on {date}");
            }
        }
        NotesAction::Remove { date, index } => {
            let removed = calendar.remove_note(date, index).await?;
            if !quiet {
                println!("Removed note {removed:?} from {date}");
            }
        }
        NotesAction::Clear { date } => {
            let cleared = calendar.clear_notes(date).await?;
            if !quiet {
                println!("Cleared {cleared} note(s) from {date}");
            }
        }
        NotesAction::Import { file } => {
            let updates = read_updates(&file).await?;
            let report = calendar.import_updates(&updates).await?;
            print(format, &report, pretty::format_merge_report);
        }
    }

    Ok(())
}

async fn run_feeds(
    action: FeedsAction,
    config: &Config,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let http = HttpFetcher::with_timeout(HTTP_TIMEOUT)?;
    let proxy = ProxyFetcher::new(
        Arc::new(http),
        Arc::new(MemoryCache::new(config.cache_max_entries)),
        config.proxy_ttl(),
    );
    let catalog = FeedCatalog::new(config.feeds.clone())?;
    let news = NewsService::new(catalog, FeedFetcher::new(Arc::new(proxy)));

    match action {
        FeedsAction::List => {
            let sources = news.sources().await;
            let active = news.active().await;
            match format {
                OutputFormat::Json => println!("{}", format_output(&sources, format)),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_feed_sources(&sources, &active))
                }
            }
        }
        FeedsAction::Show {
            name,
            force,
            prewarm,
            limit,
        } => {
            if let Some(name) = name {
                news.activate(&name).await?;
            }
            let loaded = news.show_active(force).await?;
            let background = if prewarm {
                Some(news.spawn_prewarm_inactive().await)
            } else {
                None
            };

            if format == OutputFormat::Pretty {
                println!("{}", pretty::format_feed(&loaded, limit));
            }

            let report = match background {
                Some(handle) => Some(handle.await?),
                None => None,
            };

            match format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(
                        &serde_json::json!({ "feed": loaded, "prewarm": report }),
                        format
                    )
                ),
                OutputFormat::Pretty => {
                    if let (Some(report), false) = (&report, quiet) {
                        eprintln!("{}", pretty::format_prewarm_report(report));
                    }
                }
            }
        }
    }

    Ok(())
}
