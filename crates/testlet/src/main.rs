use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::path::Path;
use std::process::ExitCode;
use testlet_lib::cli::commands::{Cli, Commands};
use testlet_lib::{
    run_testlet, selftest, version, HarnessConfig, Kind, LogReporter, Outcome, Reporter, Tally,
    TestHarness, Value,
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => HarnessConfig::default(),
    };

    // Command line wins over config file, which wins over "info"
    let level = cli
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or("info");
    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", level));

    let failures = match cli.command {
        Commands::Selftest { filter } => cmd_selftest(filter.as_deref(), &config),
        Commands::Compare {
            kind,
            result,
            expected,
            todo,
            note,
        } => cmd_compare(kind, &result, &expected, todo, note, &config)?,
    };

    if failures > 0 {
        error!("{} check(s) failed", failures);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config(path: &Path) -> Result<HarnessConfig> {
    let config = HarnessConfig::load(path)
        .with_context(|| format!("Failed to load config {:?}", path))?;
    info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Prints every outcome, logs it, and keeps a tally.
struct ConsoleReporter {
    tally: Tally,
    log: LogReporter,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self {
            tally: Tally::new(),
            log: LogReporter,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn record(&mut self, outcome: Outcome, note: Option<&str>) {
        println!("{}: {}", outcome, note.unwrap_or(""));
        self.log.record(outcome, note);
        self.tally.record(outcome, note);
    }

    fn debug(&mut self, msg: &str) {
        println!("    {}", msg);
        self.log.debug(msg);
        self.tally.debug(msg);
    }
}

/// Run the built-in testlets; returns the number of failures.
fn cmd_selftest(filter: Option<&str>, config: &HarnessConfig) -> usize {
    let testlets = match filter {
        Some(filter) => selftest::matching(filter),
        None => selftest::all(),
    };
    if testlets.is_empty() {
        println!("No testlets matched");
        return 0;
    }

    println!("testlet {} selftest", version());
    let mut reporter = ConsoleReporter::new();
    for testlet in &testlets {
        run_testlet(testlet.as_ref(), &mut reporter, config);
    }

    let tally = &reporter.tally;
    println!();
    println!(
        "{} testlet(s), {} check(s): {} passed, {} failed, {} expected failures, {} unexpected passes",
        testlets.len(),
        tally.total(),
        tally.count(Outcome::Pass),
        tally.count(Outcome::Fail),
        tally.count(Outcome::TodoFail),
        tally.count(Outcome::TodoPass),
    );
    tally.failures()
}

/// Evaluate one check; returns 1 on failure, 0 otherwise.
fn cmd_compare(
    kind: Kind,
    result: &str,
    expected: &str,
    todo: bool,
    note: Option<String>,
    config: &HarnessConfig,
) -> Result<usize> {
    let result = Value::parse(kind, result).context("Invalid RESULT")?;
    let expected = Value::parse(kind, expected).context("Invalid EXPECTED")?;

    let mut harness = TestHarness::with_config(ConsoleReporter::new(), config);
    if let Some(note) = note {
        harness.set_note(note);
    }
    let outcome = if todo {
        harness.todo_eq(result, expected)
    } else {
        harness.check_eq(result, expected)
    };

    Ok(usize::from(outcome.is_failure()))
}
