//! Command-line entry point for roadmap documents.
//!
//! # Responsibility
//! - Run date normalization and document passes without the Flutter shell.
//! - Resolve document path and logging from flags first, then environment.

use clap::{Args, Parser, Subcommand};
use log::info;
use roadmap_core::{
    init_logging_from_config, normalize, CalendarDate, DocumentService, RoadmapConfig,
    SearchQuery, Section,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "roadmap", version, about = "Roadmap document tools")]
struct Cli {
    /// Roadmap JSON document (defaults to ROADMAP_DATA_PATH or roadmap.json).
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize a typed date to YYYY-MM-DD.
    Normalize {
        text: String,
        #[command(flatten)]
        today: TodayArg,
    },
    /// Float every enabled item forward and save the document.
    Float {
        #[command(flatten)]
        today: TodayArg,
        /// Report what would change without writing the file.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the records of a section as JSON.
    List { section: Section },
    /// Case-insensitive substring search in a section.
    Search {
        section: Section,
        term: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Print the next generated ID for a section.
    NextId { section: Section },
    /// Print the next pursuit ID (`PUR<n>`) for a funding opportunity.
    NextPursuitId { opportunity_id: String },
}

#[derive(Debug, Args)]
struct TodayArg {
    /// Override the local date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_today)]
    today: Option<CalendarDate>,
}

impl TodayArg {
    fn resolve(&self) -> CalendarDate {
        self.today.unwrap_or_else(CalendarDate::today)
    }
}

fn parse_today(value: &str) -> Result<CalendarDate, String> {
    CalendarDate::parse_canonical(value).map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> RoadmapConfig {
    let mut config = RoadmapConfig::from_env();
    if let Some(file) = &cli.file {
        config.data_path = file.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    config
}

/// Opens the document without creating it; a missing file reads as empty.
fn open_for_reading(config: &RoadmapConfig) -> Result<DocumentService, String> {
    let (service, report) =
        DocumentService::open_read_only(&config.data_path).map_err(|err| err.to_string())?;
    if report.missing {
        eprintln!(
            "warning: {} does not exist; treating it as empty",
            config.data_path.display()
        );
    }
    Ok(service)
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli);
    init_logging_from_config(&config)?;

    match cli.command {
        Command::Normalize { text, today } => {
            match normalize(&text) {
                Ok(Some(date)) => println!("{date}"),
                Ok(None) => println!(),
                Err(err) => match err.fallback(today.resolve()) {
                    Some(fallback) => {
                        eprintln!("warning: {err}; using {fallback}");
                        println!("{fallback}");
                    }
                    None => return Err(err.to_string()),
                },
            }
            Ok(())
        }
        Command::Float { today, dry_run } => {
            let mut service = if dry_run {
                open_for_reading(&config)?
            } else {
                DocumentService::open(&config.data_path)
                    .map_err(|err| err.to_string())?
                    .0
            };
            let today = today.resolve();
            let summary = if dry_run {
                service.prepare_save(today)
            } else {
                service.save(today).map_err(|err| err.to_string())?
            };
            info!(
                "event=cli_float module=cli status=ok dry_run={} items={} shifted={}",
                dry_run, summary.items, summary.shifted
            );
            let rendered = serde_json::to_string(&summary).map_err(|err| err.to_string())?;
            println!("{rendered}");
            Ok(())
        }
        Command::List { section } => {
            let service = open_for_reading(&config)?;
            let records = service.document().records(section);
            let rendered = serde_json::to_string_pretty(records).map_err(|err| err.to_string())?;
            println!("{rendered}");
            Ok(())
        }
        Command::Search {
            section,
            term,
            limit,
        } => {
            let mut service = open_for_reading(&config)?;
            let query = SearchQuery {
                limit,
                ..SearchQuery::new(term)
            };
            let hits = service
                .records(section)
                .search(&query)
                .map_err(|err| err.to_string())?;
            for hit in hits {
                match hit.matched_field {
                    Some(field) => println!("{}\t{}\t{}", hit.id, hit.name, field),
                    None => println!("{}\t{}", hit.id, hit.name),
                }
            }
            Ok(())
        }
        Command::NextId { section } => {
            let mut service = open_for_reading(&config)?;
            let id = service
                .records(section)
                .next_id()
                .map_err(|err| err.to_string())?;
            println!("{id}");
            Ok(())
        }
        Command::NextPursuitId { opportunity_id } => {
            let mut service = open_for_reading(&config)?;
            let id = service
                .records(Section::FundingOpps)
                .next_pursuit_id(&opportunity_id)
                .map_err(|err| err.to_string())?;
            println!("{id}");
            Ok(())
        }
    }
}
