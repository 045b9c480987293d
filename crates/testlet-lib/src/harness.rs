//! The assertion harness handed to every testlet.
//!
//! A [`TestHarness`] classifies checks into [`Outcome`]s and hands them to
//! its [`Reporter`]. Apart from the reporter, its only state is the current
//! note, which labels every outcome until it is replaced.
//!
//! A harness is driven from a single thread (`&mut self` everywhere). The
//! only piece meant to cross threads is the [`Interrupt`] handle used to
//! cancel [`TestHarness::await_visible_state`].
//!
//! # Example
//!
//! ```
//! use testlet_lib::{Outcome, Tally, TestHarness};
//!
//! let mut harness = TestHarness::new(Tally::new());
//! harness.check_eq_noted(0.0f64, -0.0, "signed zero");
//! harness.check_eq(f64::NAN, f64::NAN);
//! harness.todo(false);
//!
//! let tally = harness.into_reporter();
//! assert_eq!(
//!     tally.outcomes(),
//!     vec![Outcome::Fail, Outcome::Pass, Outcome::TodoFail]
//! );
//! assert_eq!(
//!     tally.debug_messages().collect::<Vec<_>>(),
//!     vec!["got (0.0), expected (-0.0)"]
//! );
//! ```

use std::fmt;
use std::time::Duration;

use log::debug;

use crate::config::HarnessConfig;
use crate::outcome::Outcome;
use crate::reporter::Reporter;
use crate::screen::Interrupt;
use crate::value::Checkable;

/// Note recorded when [`TestHarness::await_visible_state`] is interrupted.
pub const INTERRUPTED: &str = "INTERRUPTED";

/// Assertion harness reporting to `R`.
pub struct TestHarness<R: Reporter> {
    reporter: R,

    /// Label attached to every outcome until replaced.
    note: Option<String>,

    /// Sleep between polls in `await_visible_state`.
    poll_interval: Duration,

    interrupt: Interrupt,
}

impl<R: Reporter> TestHarness<R> {
    /// Create a harness with the default configuration.
    pub fn new(reporter: R) -> Self {
        Self::with_config(reporter, &HarnessConfig::default())
    }

    pub fn with_config(reporter: R, config: &HarnessConfig) -> Self {
        Self {
            reporter,
            note: None,
            poll_interval: config.poll_interval(),
            interrupt: Interrupt::new(),
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Handle that cancels a running `await_visible_state` from another thread.
    pub fn interrupt_handle(&self) -> Interrupt {
        self.interrupt.clone()
    }

    pub(crate) fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    // =========================================================================
    // Notes
    // =========================================================================

    /// Replace the current note.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = Some(note.into());
    }

    /// Mark a checkpoint; same as [`set_note`](Self::set_note).
    pub fn checkpoint(&mut self, note: impl Into<String>) {
        self.set_note(note);
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn debug(&mut self, msg: &str) {
        self.reporter.debug(msg);
    }

    // =========================================================================
    // Checks
    // =========================================================================

    /// Record `Pass` if `ok`, else `Fail`.
    pub fn check(&mut self, ok: bool) -> Outcome {
        let outcome = Outcome::from_check(ok);
        self.reporter.record(outcome, self.note.as_deref());
        outcome
    }

    pub fn check_noted(&mut self, ok: bool, note: impl Into<String>) -> Outcome {
        self.set_note(note);
        self.check(ok)
    }

    /// Compare `result` against `expected` and record the outcome.
    ///
    /// On mismatch emits `got (<result>), expected (<expected>)`.
    pub fn check_eq<T: Checkable>(&mut self, result: T, expected: T) -> Outcome {
        let ok = result.matches(&expected);
        let outcome = self.check(ok);
        if !ok {
            let msg = format!(
                "got ({}), expected ({})",
                result.render(),
                expected.render()
            );
            self.debug(&msg);
        }
        outcome
    }

    pub fn check_eq_noted<T: Checkable>(
        &mut self,
        result: T,
        expected: T,
        note: impl Into<String>,
    ) -> Outcome {
        self.set_note(note);
        self.check_eq(result, expected)
    }

    // =========================================================================
    // Todo checks
    // =========================================================================

    /// Record a check that is known to fail: `TodoFail` if `!ok`,
    /// `TodoPass` if it unexpectedly passed.
    ///
    /// An unexpected pass is reported as `got (true)`.
    pub fn todo(&mut self, ok: bool) -> Outcome {
        self.todo_eq(ok, true)
    }

    fn record_todo(&mut self, ok: bool) -> Outcome {
        let outcome = Outcome::from_todo(ok);
        self.reporter.record(outcome, self.note.as_deref());
        outcome
    }

    pub fn todo_noted(&mut self, ok: bool, note: impl Into<String>) -> Outcome {
        self.set_note(note);
        self.todo(ok)
    }

    /// Todo variant of [`check_eq`](Self::check_eq).
    ///
    /// Only an unexpected match is reported, as `got (<result>)`.
    pub fn todo_eq<T: Checkable>(&mut self, result: T, expected: T) -> Outcome {
        let ok = result.matches(&expected);
        let outcome = self.record_todo(ok);
        if ok {
            let msg = format!("got ({})", result.render());
            self.debug(&msg);
        }
        outcome
    }

    pub fn todo_eq_noted<T: Checkable>(
        &mut self,
        result: T,
        expected: T,
        note: impl Into<String>,
    ) -> Outcome {
        self.set_note(note);
        self.todo_eq(result, expected)
    }

    // =========================================================================
    // Shorthands
    // =========================================================================

    pub fn pass(&mut self) -> Outcome {
        self.check(true)
    }

    pub fn pass_noted(&mut self, note: impl Into<String>) -> Outcome {
        self.check_noted(true, note)
    }

    pub fn fail(&mut self) -> Outcome {
        self.check(false)
    }

    /// Record a failure, using the textual form of `note` as the note.
    pub fn fail_noted(&mut self, note: impl fmt::Display) -> Outcome {
        debug!("TestHarness::fail_noted: {}", note);
        self.check_noted(false, note.to_string())
    }
}

impl<R: Reporter + Default> Default for TestHarness<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}
