//! `tablebook` CLI - check table availability from the command line.
//!
//! Restaurant settings and bookings are JSON files shaped like the dashboard's
//! `/restaurant/settings`, `/bookings` and `/tables` resources. Results go to
//! stdout as JSON; logs go to stderr.
//!
//! ## Usage
//!
//! ```sh
//! # Can table 3 take a two-hour booking at 21:00?
//! tablebook check -c settings.json -b bookings.json --table 3 \
//!     --start 2024-01-15T21:00 --duration 120
//!
//! # Open hourly slots for table 3
//! tablebook slots -c settings.json -b bookings.json --table 3 --date 2024-01-15
//!
//! # Free windows of table 3 across the day
//! tablebook free -c settings.json -b bookings.json --table 3 --date 2024-01-15
//!
//! # Pick tables for a party of 6
//! tablebook select -c settings.json -t tables.json -b bookings.json \
//!     --start 2024-01-15T20:00 --party 6
//!
//! # Time picker options and margin text
//! tablebook times -c settings.json
//! tablebook margin --minutes 90
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use booking_engine::hours::DEFAULT_TIME_OPTION_STEP;
use booking_engine::slots::DEFAULT_SLOT_MINUTES;
use booking_engine::{
    bookings_for_table, format_time_margin, time_margin_description, RestaurantConfig, Table,
    TableBooking, TimeInterval,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tablebook",
    version,
    about = "Restaurant table availability and slot finder"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Sources {
    /// Restaurant settings JSON (openingHours, timezone, bookingRules)
    #[arg(short, long)]
    config: String,
    /// Bookings JSON array (restaurant-wide; filtered per table)
    #[arg(short, long)]
    bookings: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether one table can take a booking
    Check {
        #[command(flatten)]
        sources: Sources,
        /// Table id
        #[arg(long)]
        table: String,
        /// Start time, RFC 3339 or local "YYYY-MM-DDTHH:MM" in the restaurant timezone
        #[arg(long)]
        start: String,
        /// Booking length in minutes
        #[arg(long, default_value_t = DEFAULT_SLOT_MINUTES)]
        duration: u32,
    },
    /// List available slot starts for one table on a day
    Slots {
        #[command(flatten)]
        sources: Sources,
        #[arg(long)]
        table: String,
        /// Day to enumerate (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Slot length in minutes
        #[arg(long, default_value_t = DEFAULT_SLOT_MINUTES)]
        slot: u32,
    },
    /// List free windows for one table on a day
    Free {
        #[command(flatten)]
        sources: Sources,
        #[arg(long)]
        table: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Choose one or more tables for a party
    Select {
        #[command(flatten)]
        sources: Sources,
        /// Tables JSON array
        #[arg(short, long)]
        tables: String,
        #[arg(long)]
        start: String,
        #[arg(long, default_value_t = DEFAULT_SLOT_MINUTES)]
        duration: u32,
        /// Number of guests
        #[arg(long)]
        party: u32,
    },
    /// Show the booking form's time options
    Times {
        #[arg(short, long)]
        config: String,
        /// Step between options in minutes
        #[arg(long, default_value_t = DEFAULT_TIME_OPTION_STEP)]
        step: u32,
    },
    /// Describe a booking time margin
    Margin {
        /// Margin in minutes
        #[arg(long, conflicts_with = "config", required_unless_present = "config")]
        minutes: Option<u32>,
        /// Read the margin from restaurant settings instead
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    table_id: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    available: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blocked_by: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    earliest_start: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectReport {
    party_size: u32,
    candidates: Vec<booking_engine::AvailableTableCandidate>,
    selected: Option<Vec<String>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            sources,
            table,
            start,
            duration,
        } => {
            let (config, bookings) = load_sources(&sources)?;
            let own = bookings_for_table(&bookings, &table);
            let margin = config.margin_minutes();
            let requested = requested_interval(&start, duration, config.timezone)?;

            let blocked_by: Vec<String> =
                booking_engine::blocking_bookings(&requested, &own, margin)
                    .into_iter()
                    .map(|b| b.id().to_string())
                    .collect();
            let report = CheckReport {
                table_id: table,
                start: requested.start(),
                end: requested.end(),
                available: booking_engine::is_available(&requested, &own, margin),
                earliest_start: booking_engine::earliest_free_start(&requested, &own, margin),
                blocked_by,
            };
            print_json(&report)?;
        }
        Commands::Slots {
            sources,
            table,
            date,
            slot,
        } => {
            if slot == 0 {
                anyhow::bail!("--slot must be greater than zero");
            }
            let (config, bookings) = load_sources(&sources)?;
            let own = bookings_for_table(&bookings, &table);
            let window = config
                .opening_window(date)
                .with_context(|| format!("No opening window on {}", date))?;
            let slots: Vec<DateTime<Utc>> =
                booking_engine::enumerate_slots_in(window, &own, config.margin_minutes(), slot)
                    .collect();
            debug!(table = %table, count = slots.len(), "enumerated slots");
            print_json(&slots)?;
        }
        Commands::Free {
            sources,
            table,
            date,
        } => {
            let (config, bookings) = load_sources(&sources)?;
            let own = bookings_for_table(&bookings, &table);
            let window = config
                .opening_window(date)
                .with_context(|| format!("No opening window on {}", date))?;
            let free = booking_engine::free_windows(&window, &own, config.margin_minutes());
            print_json(&free)?;
        }
        Commands::Select {
            sources,
            tables,
            start,
            duration,
            party,
        } => {
            let (config, bookings) = load_sources(&sources)?;
            config
                .booking_rules
                .check_party_size(party)
                .context("Party size rejected by booking rules")?;
            let tables: Vec<Table> = read_json(&tables)?;
            let requested = requested_interval(&start, duration, config.timezone)?;

            let candidates = booking_engine::find_candidates(
                &tables,
                &bookings,
                &requested,
                config.margin_minutes(),
                party,
            )
            .context("Failed to collect table candidates")?;
            let selected = booking_engine::select_tables(&candidates, party);
            if selected.is_none() {
                tracing::warn!(
                    party,
                    "no combination of available tables can accommodate the party"
                );
            }
            print_json(&SelectReport {
                party_size: party,
                candidates,
                selected,
            })?;
        }
        Commands::Times { config, step } => {
            let config = load_config(&config)?;
            let options: Vec<String> = config
                .opening_hours
                .time_options(step)
                .context("Invalid time option step")?
                .into_iter()
                .map(|t| t.format("%H:%M").to_string())
                .collect();
            print_json(&options)?;
        }
        Commands::Margin { minutes, config } => match (minutes, config) {
            (Some(minutes), _) => println!("{}", format_time_margin(minutes)),
            (None, Some(path)) => {
                let config = load_config(&path)?;
                println!("{}", time_margin_description(&config.booking_rules));
            }
            (None, None) => unreachable!("clap requires --minutes or --config"),
        },
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "tablebook=warn,booking_engine=warn",
        1 => "tablebook=debug,booking_engine=debug",
        _ => "tablebook=trace,booking_engine=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_sources(sources: &Sources) -> Result<(RestaurantConfig, Vec<TableBooking>)> {
    let config = load_config(&sources.config)?;
    let bookings: Vec<TableBooking> = match sources.bookings.as_deref() {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    debug!(
        restaurant = %config.name,
        bookings = bookings.len(),
        margin = config.margin_minutes(),
        "loaded sources"
    );
    Ok((config, bookings))
}

fn load_config(path: &str) -> Result<RestaurantConfig> {
    let json = read_input(path)?;
    RestaurantConfig::from_json(&json)
        .with_context(|| format!("Invalid restaurant settings in {}", path))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let json = read_input(path)?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse JSON in {}", path))
}

/// Read a file, or stdin when the path is `-`.
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn requested_interval(start: &str, duration: u32, tz: Tz) -> Result<TimeInterval> {
    let start = parse_start(start, tz)?;
    TimeInterval::starting_at(start, duration)
        .with_context(|| format!("Invalid booking length: {} minutes", duration))
}

/// Accept RFC 3339, or a local time without offset read in the restaurant
/// timezone.
fn parse_start(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let local = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("Invalid start time '{}'", s))?;
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Start time '{}' does not exist in {}", s, tz.name()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
