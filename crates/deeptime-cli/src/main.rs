//! deeptime CLI: explore deep time from the terminal

use clap::{Parser, Subcommand};
use deeptime_engine::config::{CONFIG_DIR, CONFIG_FILE};
use deeptime_engine::date::{format_calendar, format_relative};
use deeptime_engine::{
    era_at, format_span, now_minutes, parse_date, Config, DateParseError, Era, Minutes,
    TimelineOptions, TimelineState, UNKNOWN_ERA,
};
use deeptime_tui::GlyphMode;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Dual-slider explorer for dates from the Big Bang to the far future
#[derive(Parser)]
#[command(name = "deeptime")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the timeline TUI (default when no command specified)
    Tui {
        /// Selection start (e.g. "1969-07-20 20:17", "66 Ma", "now-1d")
        #[arg(long, allow_hyphen_values = true)]
        start: Option<String>,

        /// Selection end
        #[arg(long, allow_hyphen_values = true)]
        end: Option<String>,

        /// Config file (default: .deeptime/config.json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Draw with ASCII glyphs only
        #[arg(long)]
        ascii: bool,

        /// Write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the era a date falls in
    Era {
        #[arg(allow_hyphen_values = true)]
        date: String,
    },

    /// Show a date as minutes, calendar text and distance from now
    Convert {
        #[arg(allow_hyphen_values = true)]
        date: String,
    },

    /// Normalize a selection the way the timeline would
    Range {
        #[arg(allow_hyphen_values = true)]
        start: String,
        #[arg(allow_hyphen_values = true)]
        end: String,
    },

    /// Write a default config to .deeptime/config.json
    Init,
}

/// Log filter variable.
const LOG_ENV: &str = "DEEPTIME_LOG";

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_tui(None, None, None, false, None),
        Some(Commands::Tui {
            start,
            end,
            config,
            ascii,
            log_file,
        }) => cmd_tui(start, end, config, ascii, log_file.as_deref()),
        Some(Commands::Era { date }) => {
            init_stderr_logging();
            cmd_era(&date, cli.json)
        }
        Some(Commands::Convert { date }) => {
            init_stderr_logging();
            cmd_convert(&date, cli.json)
        }
        Some(Commands::Range { start, end }) => {
            init_stderr_logging();
            cmd_range(&start, &end, cli.json)
        }
        Some(Commands::Init) => {
            init_stderr_logging();
            cmd_init(Path::new("."))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(log_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// The TUI owns the terminal, so it only logs when given a file.
fn init_file_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(log_filter())
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

fn cmd_tui(
    start: Option<String>,
    end: Option<String>,
    config_path: Option<PathBuf>,
    ascii: bool,
    log_file: Option<&Path>,
) -> CliResult {
    if let Some(path) = log_file {
        init_file_logging(path)?;
    }

    let config_path = match config_path {
        Some(path) => path,
        None => Config::path_in(&std::env::current_dir()?),
    };
    let mut config = Config::load_or_default(&config_path)?;
    if let Some(start) = start {
        config.initial_start = start;
    }
    if let Some(end) = end {
        config.initial_end = end;
    }

    let options = config.to_options(now_minutes())?;
    let glyphs = if ascii || config.ascii {
        GlyphMode::Ascii
    } else {
        GlyphMode::Unicode
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(deeptime_tui::run_tui(&options, glyphs))
}

/// One parsed date, as printed by `convert` and `era`.
#[derive(Debug, Serialize)]
struct DateReport {
    minutes: Minutes,
    calendar: String,
    relative: String,
    era: Option<&'static Era>,
}

impl DateReport {
    fn era_name(&self) -> &'static str {
        self.era.map_or(UNKNOWN_ERA, |era| era.name)
    }
}

fn describe_date(text: &str, now: Minutes) -> Result<DateReport, DateParseError> {
    let minutes = parse_date(text, now)?;
    Ok(DateReport {
        minutes,
        calendar: format_calendar(minutes),
        relative: format_relative(minutes, now),
        era: era_at(minutes),
    })
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_era(date: &str, json: bool) -> CliResult {
    let report = describe_date(date, now_minutes())?;

    if json {
        return print_json(&report);
    }

    match report.era {
        Some(era) => {
            let range = era.range();
            println!(
                "{} ({} to {})",
                era.name,
                format_calendar(range.start()),
                format_calendar(range.end())
            );
        }
        None => println!("{UNKNOWN_ERA}"),
    }
    Ok(())
}

fn cmd_convert(date: &str, json: bool) -> CliResult {
    let report = describe_date(date, now_minutes())?;

    if json {
        return print_json(&report);
    }

    println!("Minutes:  {}", report.minutes);
    println!("Calendar: {}", report.calendar);
    println!("Relative: {}", report.relative);
    println!("Era:      {}", report.era_name());
    Ok(())
}

/// A selection after normalization.
#[derive(Debug, Serialize)]
struct RangeReport {
    start: Minutes,
    end: Minutes,
    span: String,
    text: String,
    era: String,
}

fn describe_range(start: &str, end: &str, now: Minutes) -> Result<RangeReport, DateParseError> {
    let start = parse_date(start, now)?;
    let end = parse_date(end, now)?;
    let state = TimelineState::new(&TimelineOptions {
        initial_start: Some(start),
        initial_end: Some(end),
        now,
        ..TimelineOptions::default()
    });
    let range = state.date_range();
    Ok(RangeReport {
        start: range.start(),
        end: range.end(),
        span: format_span(range.len()),
        text: state.range_text(),
        era: state.era_text(),
    })
}

fn cmd_range(start: &str, end: &str, json: bool) -> CliResult {
    let report = describe_range(start, end, now_minutes())?;

    if json {
        return print_json(&report);
    }

    println!("{}", report.text);
    println!("Era: {}", report.era);
    Ok(())
}

fn cmd_init(root: &Path) -> CliResult {
    let config_path = Config::path_in(root);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    Config::default().save(&config_path)?;
    println!("Created {}/{}", CONFIG_DIR, CONFIG_FILE);
    Ok(())
}
