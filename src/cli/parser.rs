use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for vision-eval
#[derive(Parser)]
#[command(
    name = "vision-eval",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build evaluation pairs from vision-model contact results and track annotation sessions",
    long_about = None
)]
pub struct Cli {
    /// Override the database endpoint (path, sqlite://path or :memory:)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Inspect or upgrade the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,
    },

    /// Database maintenance
    Db {
        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Turn an inference results file into evaluation pairs
    Pairs {
        /// Inference results (JSON object keyed by image id)
        #[arg(long, short = 'i', value_name = "FILE")]
        input: PathBuf,

        /// Keep only the pairs of one model (original, llama4_scout, gemini)
        #[arg(long)]
        model: Option<String>,

        /// Shuffle the pairs
        #[arg(long)]
        shuffle: bool,

        /// Seed for a reproducible shuffle (implies --shuffle)
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<PathBuf>,

        /// Overwrite the output file without asking
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print a freshly generated annotator id
    UserId,

    /// Start an annotation session over a results file
    Session {
        #[arg(long, short = 'i', value_name = "FILE")]
        input: PathBuf,

        /// Annotator id (generated when omitted)
        #[arg(long)]
        user: Option<String>,

        /// Seed for a reproducible pair order
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the session's pairs (JSON, in presentation order)
        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// List annotation sessions and their progress
    Sessions {
        #[arg(long)]
        user: Option<String>,
    },

    /// Record the evaluation of one pair
    Score {
        #[arg(long)]
        user: String,

        #[arg(long, short = 'i', value_name = "FILE")]
        input: PathBuf,

        #[arg(long)]
        image: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        score: Option<f64>,

        #[arg(long)]
        checks: Option<i64>,

        #[arg(long)]
        xs: Option<i64>,

        #[arg(long = "missed", help = "Number of missed interactions")]
        missed: Option<i64>,
    },

    /// List recorded evaluations
    Evaluations {
        #[arg(long)]
        user: Option<String>,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
