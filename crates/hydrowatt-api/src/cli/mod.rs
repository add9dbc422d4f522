//! CLI command definitions for the `hwatt` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod context;
pub mod record;
pub mod status;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Ask questions about your household water and electricity usage.
#[derive(Parser)]
#[command(name = "hwatt", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat with the assistant.
    Chat,

    /// Ask a single question and print the reply.
    Ask {
        /// The question (or a slash command such as /usage).
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the usage, billing and device summaries the assistant sees.
    Context,

    /// Show configuration and provider status.
    Status,

    /// Record usage data into the local database.
    Record {
        #[command(subcommand)]
        resource: RecordResource,
    },

    /// Start the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RecordResource {
    /// A meter reading for one room and day.
    Reading {
        /// Room the reading belongs to.
        #[arg(long)]
        room: String,

        /// Water used, in liters.
        #[arg(long, default_value = "0")]
        water: f64,

        /// Electricity used, in kWh.
        #[arg(long, default_value = "0")]
        electricity: f64,

        /// Day of the reading (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// A billing period.
    Bill {
        /// Amount due for the period.
        #[arg(long)]
        total: f64,

        #[arg(long, default_value = "0")]
        water: f64,

        #[arg(long, default_value = "0")]
        electricity: f64,

        /// First day of the period (YYYY-MM-DD).
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the period (YYYY-MM-DD).
        #[arg(long)]
        to: NaiveDate,
    },

    /// A device; an existing id is updated in place.
    Device {
        /// Display name.
        #[arg(long)]
        name: String,

        #[arg(long)]
        room: Option<String>,

        /// Device id. A new one is generated when omitted.
        #[arg(long)]
        id: Option<String>,

        /// Mark the device as switched off.
        #[arg(long)]
        inactive: bool,
    },
}
