use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for the Wochenbericht export engine
#[derive(Parser)]
#[command(
    name = "wochenbericht",
    version = env!("CARGO_PKG_VERSION"),
    about = "Weekly timesheet export: fill the Wochenbericht template from daily entries",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or custom setups)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for problems")]
        check: bool,
    },

    /// Show the dates and month segments of an ISO week
    Week {
        /// Report year
        #[arg(long, value_name = "YEAR")]
        year: i32,

        /// ISO calendar week (KW)
        #[arg(long = "week", value_name = "KW")]
        week: u32,
    },

    /// Export a week's reports through the configured backend
    Export {
        /// Report year
        #[arg(long, value_name = "YEAR")]
        year: i32,

        /// ISO calendar week (KW)
        #[arg(long = "week", value_name = "KW")]
        week: u32,

        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        /// Week data file (profile, entries keyed by date, car usage)
        #[arg(long = "week-file", value_name = "FILE")]
        week_file: String,

        /// Directory for inline artifacts (default: export_dir)
        #[arg(long, value_name = "DIR")]
        out: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
