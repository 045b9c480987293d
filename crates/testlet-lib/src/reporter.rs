//! Outcome sinks.
//!
//! The harness never decides what to do with an outcome; it hands each one
//! to a [`Reporter`] together with the current note. Two reporters ship
//! with the crate:
//!
//! - [`Tally`]: keeps every outcome and debug message in memory
//! - [`LogReporter`]: forwards to the `log` facade

use log::{debug, info, warn};

use crate::outcome::Outcome;

/// Sink for check outcomes and diagnostics.
pub trait Reporter {
    /// Record the outcome of one check, labelled with the current note.
    fn record(&mut self, outcome: Outcome, note: Option<&str>);

    /// Emit a diagnostic message.
    fn debug(&mut self, msg: &str);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record(&mut self, outcome: Outcome, note: Option<&str>) {
        (**self).record(outcome, note)
    }

    fn debug(&mut self, msg: &str) {
        (**self).debug(msg)
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn record(&mut self, outcome: Outcome, note: Option<&str>) {
        (**self).record(outcome, note)
    }

    fn debug(&mut self, msg: &str) {
        (**self).debug(msg)
    }
}

/// A recorded outcome and the note it was recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub outcome: Outcome,
    pub note: Option<String>,
}

/// Anything the harness reported, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Outcome(Record),
    Debug(String),
}

/// In-memory reporter that keeps everything it is given.
#[derive(Debug, Default, Clone)]
pub struct Tally {
    events: Vec<Event>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in the order they were reported.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded outcomes, in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.events.iter().filter_map(|e| match e {
            Event::Outcome(r) => Some(r),
            Event::Debug(_) => None,
        })
    }

    /// Debug messages, in order.
    pub fn debug_messages(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            Event::Debug(msg) => Some(msg.as_str()),
            Event::Outcome(_) => None,
        })
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.records().map(|r| r.outcome).collect()
    }

    /// Number of times `outcome` was recorded.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.records().filter(|r| r.outcome == outcome).count()
    }

    /// Number of `Fail` and `TodoPass` outcomes.
    pub fn failures(&self) -> usize {
        self.records().filter(|r| r.outcome.is_failure()).count()
    }

    pub fn total(&self) -> usize {
        self.records().count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Reporter for Tally {
    fn record(&mut self, outcome: Outcome, note: Option<&str>) {
        self.events.push(Event::Outcome(Record {
            outcome,
            note: note.map(str::to_string),
        }));
    }

    fn debug(&mut self, msg: &str) {
        self.events.push(Event::Debug(msg.to_string()));
    }
}

/// Reporter that writes through the `log` facade.
///
/// Passes and expected todo failures are logged at `info`, failures and
/// unexpected todo passes at `warn`, diagnostics at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn record(&mut self, outcome: Outcome, note: Option<&str>) {
        let note = note.unwrap_or("");
        if outcome.is_failure() {
            warn!("{}: {}", outcome, note);
        } else {
            info!("{}: {}", outcome, note);
        }
    }

    fn debug(&mut self, msg: &str) {
        debug!("{}", msg);
    }
}
