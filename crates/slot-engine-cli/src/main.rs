//! `slots` CLI — compute vendor appointment availability from JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Full slot grid for a 60-minute service
//! slots availability --vendor salon.json --bookings monday.json \
//!     --date 2026-03-16 --duration 60
//!
//! # Only the bookable slots, written to a file
//! slots availability --vendor salon.json --date 2026-03-16 --available-only -o slots.json
//!
//! # Earliest bookable slot, judged against a fixed clock
//! slots next --vendor salon.json --date 2026-03-16 --now 2026-03-16T13:05:00Z
//! ```
//!
//! Defaults come from `SLOTS_DEFAULT_DURATION` and `SLOTS_TIMEZONE`. Logs go to
//! stderr and are controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use slot_engine::{
    AvailabilityRequest, AvailabilityService, InMemoryStore, ServiceConfig, SlotError,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Vendor appointment availability CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the slot grid for one vendor-day as JSON
    Availability {
        #[command(flatten)]
        query: QueryArgs,
        /// Drop unavailable slots from the output
        #[arg(long)]
        available_only: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the earliest available slot as JSON (`null` if none)
    Next {
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Vendor document (JSON with `id`, `schedule`, optional `timezone`); `-` for stdin
    #[arg(long)]
    vendor: String,
    /// JSON array of booking records for the date
    #[arg(long)]
    bookings: Option<String>,
    /// Calendar date, YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// Service duration in minutes (default: SLOTS_DEFAULT_DURATION or 30)
    #[arg(long)]
    duration: Option<u32>,
    /// Vendor id to query (default: the vendor document's `id`)
    #[arg(long)]
    vendor_id: Option<String>,
    /// Current time as RFC 3339 (default: the system clock)
    #[arg(long)]
    now: Option<String>,
    /// Fallback IANA timezone for vendors without one
    #[arg(long)]
    timezone: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slot_engine=warn,slots=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Availability {
            query,
            available_only,
            output,
        } => {
            let (service, request, now) = build_query(&query)?;
            let mut slots = service
                .availability(&request, now)
                .map_err(surface)
                .context("Failed to compute availability")?;
            if available_only {
                slots.retain(|s| s.available);
            }
            let json = serde_json::to_string_pretty(&slots)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Next { query } => {
            let (service, request, now) = build_query(&query)?;
            let slot = service
                .first_available(&request, now)
                .map_err(surface)
                .context("Failed to find next available slot")?;
            println!("{}", serde_json::to_string_pretty(&slot)?);
        }
    }

    Ok(())
}

/// Load the documents named on the command line into an in-memory store and
/// build the request against it.
fn build_query(
    args: &QueryArgs,
) -> Result<(AvailabilityService<InMemoryStore>, AvailabilityRequest, DateTime<Utc>)> {
    let vendor: Value = serde_json::from_str(&read_input(&args.vendor)?)
        .with_context(|| format!("Vendor document is not valid JSON: {}", args.vendor))?;

    let vendor_id = match &args.vendor_id {
        Some(id) => id.clone(),
        None => vendor
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .context("Vendor document has no `id`; pass --vendor-id")?,
    };

    let date = slot_engine::time::parse_date(&args.date)
        .with_context(|| format!("Invalid --date: {}", args.date))?;

    let bookings: Vec<Value> = match &args.bookings {
        Some(path) => serde_json::from_str(&read_input(path)?)
            .with_context(|| format!("Bookings file must be a JSON array: {}", path))?,
        None => Vec::new(),
    };

    let now = match &args.now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now (expected RFC 3339): {}", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut config = ServiceConfig::from_env();
    if let Some(tz) = &args.timezone {
        config.default_timezone = tz.clone();
    }

    // The vendor document is stored under its own id; querying a different
    // --vendor-id exercises the not-found path.
    let stored_id = vendor
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(vendor_id.as_str())
        .to_string();
    tracing::debug!(
        vendor_id = %stored_id,
        %date,
        bookings = bookings.len(),
        "loaded vendor documents"
    );
    let mut store = InMemoryStore::new();
    store.insert_bookings(stored_id.clone(), date, bookings);
    store.insert_vendor(stored_id, vendor);

    let mut request = AvailabilityRequest::new(vendor_id, args.date.clone());
    request.service_duration_minutes = args.duration;

    Ok((AvailabilityService::new(store, config), request, now))
}

/// Keep the engine error as the cause, with its user-facing message on top.
fn surface(err: SlotError) -> anyhow::Error {
    let message = err.public_message();
    anyhow::Error::new(err).context(message)
}

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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
