use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::value::Kind;

/// Testlet - assertion harness for runtime conformance tests
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Harness configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the built-in testlets that exercise the harness itself
    ///
    /// Prints one line per outcome and a summary. Exits with status 1 if
    /// any check failed or any todo check unexpectedly passed.
    Selftest {
        /// Only run testlets whose name contains this string
        #[arg(long, short)]
        filter: Option<String>,
    },

    /// Evaluate a single check from the command line
    ///
    /// Values are parsed according to --kind. For objects, `null` is the
    /// absent object.
    Compare {
        /// Kind of the two values
        #[arg(long, short, value_enum)]
        kind: Kind,

        /// Actual value
        #[arg(value_name = "RESULT", allow_hyphen_values = true)]
        result: String,

        /// Expected value
        #[arg(value_name = "EXPECTED", allow_hyphen_values = true)]
        expected: String,

        /// Treat the check as known to fail
        #[arg(long)]
        todo: bool,

        /// Note to attach to the check
        #[arg(long, short)]
        note: Option<String>,
    },
}
