//! `rooms` CLI: check a reservation against a room's day and list free slots.
//!
//! ## Usage
//!
//! ```sh
//! # Check a candidate against the day's existing bookings
//! rooms check --start 10:00 --end 11:00 --subject "Design review" -i day.json
//!
//! # Re-check an edit, ignoring the booking being edited
//! rooms check --start 10:00 --end 11:30 --subject "Design review" -i day.json --exclude r1
//!
//! # Read existing bookings from stdin and print the verdict as JSON
//! cat day.json | rooms check --start 9:00 --end 9:30 --subject Standup -i - --json
//!
//! # Free slots of at least 30 minutes
//! rooms free -i day.json --min 30
//!
//! # Normalize a time to HH:MM
//! rooms normalize 9:05
//! ```
//!
//! Existing bookings are a JSON array of `{"id", "start", "end"}` objects.
//! Business hours come from `--config` (JSON) and `ROOMS_*` variables.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use room_scheduler::{
    decide, free_slots, BookedSlot, Candidate, Decision, FreeSlot,
    ReservationId, SchedulerConfig, TimeOfDay,
};
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

/// Exit status for a rejected candidate.
const EXIT_REJECTED: i32 = 2;

#[derive(Parser)]
#[command(name = "rooms", version, about = "Meeting-room reservation checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scheduler config file (JSON); ROOMS_* variables override it
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a reservation may be added to a room's day
    Check {
        /// Start time, H:MM or HH:MM
        #[arg(long)]
        start: String,
        /// End time, H:MM or HH:MM
        #[arg(long)]
        end: String,
        /// Reason for the booking
        #[arg(long)]
        subject: String,
        /// Existing bookings file ("-" for stdin; none if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Id of the booking being edited, skipped during the overlap check
        #[arg(long)]
        exclude: Option<String>,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// List free slots within business hours
    Free {
        /// Existing bookings file ("-" for stdin; none if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only show slots at least this many minutes long
        #[arg(long)]
        min: Option<u16>,
        /// Print the slots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a time in normalized HH:MM form
    Normalize {
        /// Time to normalize, H:MM or HH:MM
        time: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        })
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            start,
            end,
            subject,
            input,
            exclude,
            json,
        } => {
            let existing = read_slots(input.as_deref())?;
            let exclude = exclude.map(ReservationId::new);
            let candidate = Candidate::new(start, end, subject);

            let decision = decide(&candidate, &existing, exclude.as_ref(), &config.hours);
            debug!(existing = existing.len(), ?decision, "decided");

            if json {
                println!("{}", serde_json::to_string(&decision)?);
            } else {
                match decision {
                    Decision::Accepted { start, end } => println!("ACCEPTED {}-{}", start, end),
                    Decision::Rejected { reason } => {
                        println!("REJECTED {}", reason.code());
                        eprintln!("{}", reason);
                    }
                }
            }
            if !decision.is_accepted() {
                process::exit(EXIT_REJECTED);
            }
        }
        Commands::Free { input, min, json } => {
            let existing = read_slots(input.as_deref())?;
            let slots: Vec<FreeSlot> = free_slots(&existing, &config.hours)
                .into_iter()
                .filter(|slot| slot.duration_minutes >= min.unwrap_or(0))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                for slot in &slots {
                    println!("{}-{} ({} min)", slot.start, slot.end, slot.duration_minutes);
                }
            }
        }
        Commands::Normalize { time } => {
            let parsed: TimeOfDay = time
                .parse()
                .with_context(|| format!("Invalid time '{}', expected H:MM or HH:MM", time))?;
            println!("{}", parsed);
        }
    }

    Ok(())
}

/// Load the scheduler config from `path` (or defaults), then apply `ROOMS_*`.
fn load_config(path: Option<&str>) -> Result<SchedulerConfig> {
    let base = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            SchedulerConfig::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => SchedulerConfig::default(),
    };
    base.with_env().context("Invalid ROOMS_* environment override")
}

/// Read existing bookings as a JSON array of `{id, start, end}` objects.
fn read_slots(path: Option<&str>) -> Result<Vec<BookedSlot>> {
    let json = match path {
        None => return Ok(Vec::new()),
        Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
    };
    serde_json::from_str(&json).context("Failed to parse existing bookings JSON")
}
