//! Screen collaborators and the visual checks built on them.
//!
//! The harness does not capture or draw anything itself. It relies on:
//! - [`PixelDiff`]: counts pixels differing from a reference image
//! - [`Screen`]: makes a target current and reports whether it is shown
//!
//! Waiting for a screen is a sleep-poll loop that can be cancelled through
//! an [`Interrupt`] handle from another thread.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, warn};
use thiserror::Error;

use crate::harness::{TestHarness, INTERRUPTED};
use crate::outcome::Outcome;
use crate::reporter::Reporter;

/// Compares the current visual output against a reference image.
pub trait PixelDiff {
    /// Number of pixels differing from the reference identified by
    /// `reference_id`. The value is opaque to the harness.
    fn count_differing_pixels(&self, reference_id: &str) -> i32;
}

impl<F> PixelDiff for F
where
    F: Fn(&str) -> i32,
{
    fn count_differing_pixels(&self, reference_id: &str) -> i32 {
        self(reference_id)
    }
}

/// Display that can show one target at a time.
pub trait Screen {
    type Target: ?Sized;

    /// Ask the display to make `target` the current one.
    fn set_current(&mut self, target: &Self::Target);

    /// Whether `target` is both shown and the current one.
    fn is_displayed(&self, target: &Self::Target) -> bool;
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("interrupted")]
pub struct Interrupted;

struct InterruptState {
    pending: Mutex<bool>,
    wake: Condvar,
}

/// Cancellation handle for interruptible sleeps.
///
/// Clones share state. An interrupt stays pending until a sleep observes
/// it; observing it clears it.
#[derive(Clone)]
pub struct Interrupt {
    state: Arc<InterruptState>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self {
            state: Arc::new(InterruptState {
                pending: Mutex::new(false),
                wake: Condvar::new(),
            }),
        }
    }

    /// Interrupt the current (or next) sleep.
    pub fn interrupt(&self) {
        let mut pending = self.lock();
        *pending = true;
        drop(pending); // Release lock before notify
        self.state.wake.notify_all();
    }

    pub fn is_pending(&self) -> bool {
        *self.lock()
    }

    /// Sleep for `duration` unless interrupted first.
    pub fn sleep(&self, duration: Duration) -> Result<(), Interrupted> {
        let deadline = Instant::now() + duration;
        let mut pending = self.lock();
        loop {
            if *pending {
                *pending = false;
                return Err(Interrupted);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            let (guard, _) = self
                .state
                .wake
                .wait_timeout(pending, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            pending = guard;
        }
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.state
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interrupt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interrupt")
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<R: Reporter> TestHarness<R> {
    /// Check that the screen differs from a reference image in at most
    /// `max_differing_pixels` pixels.
    ///
    /// The note is always `"<message>. <count> > <max>"`, whether or not
    /// the check passes.
    pub fn compare_visual_state<P: PixelDiff + ?Sized>(
        &mut self,
        pixels: &P,
        reference_id: &str,
        max_differing_pixels: i32,
        message: &str,
    ) -> Outcome {
        let differing = pixels.count_differing_pixels(reference_id);
        debug!(
            "TestHarness::compare_visual_state(reference={}, differing={}, max={})",
            reference_id, differing, max_differing_pixels
        );
        self.check_noted(
            differing <= max_differing_pixels,
            format!("{}. {} > {}", message, differing, max_differing_pixels),
        )
    }

    /// Make `target` current and block until the screen shows it.
    ///
    /// Polls every [`poll_interval`](TestHarness::poll_interval). If the
    /// wait is interrupted, records a failure noted `INTERRUPTED` and
    /// returns `false`. Records nothing when the target shows up.
    pub fn await_visible_state<S: Screen + ?Sized>(
        &mut self,
        screen: &mut S,
        target: &S::Target,
    ) -> bool {
        screen.set_current(target);
        let mut polls: u64 = 0;
        while !screen.is_displayed(target) {
            if self.interrupt().sleep(self.poll_interval()).is_err() {
                warn!(
                    "TestHarness::await_visible_state: interrupted after {} polls",
                    polls
                );
                self.fail_noted(INTERRUPTED);
                return false;
            }
            polls += 1;
        }
        debug!(
            "TestHarness::await_visible_state: visible after {} polls",
            polls
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use crate::reporter::Tally;
    use std::cell::Cell;
    use std::thread;

    /// Screen that becomes visible after a fixed number of polls.
    struct DelayedScreen {
        current: Option<String>,
        polls_left: Cell<u32>,
    }

    impl DelayedScreen {
        fn new(polls: u32) -> Self {
            Self {
                current: None,
                polls_left: Cell::new(polls),
            }
        }
    }

    impl Screen for DelayedScreen {
        type Target = str;

        fn set_current(&mut self, target: &str) {
            self.current = Some(target.to_string());
        }

        fn is_displayed(&self, target: &str) -> bool {
            let left = self.polls_left.get();
            if left > 0 {
                self.polls_left.set(left - 1);
                return false;
            }
            self.current.as_deref() == Some(target)
        }
    }

    fn fast_harness() -> TestHarness<Tally> {
        let config = HarnessConfig {
            poll_interval_ms: 1,
            ..HarnessConfig::default()
        };
        TestHarness::with_config(Tally::new(), &config)
    }

    #[test]
    fn test_compare_visual_state_pass_keeps_message() {
        let mut h = fast_harness();
        let outcome = h.compare_visual_state(&|_: &str| 3, "ref.png", 5, "m");
        assert_eq!(outcome, Outcome::Pass);

        let record = h.reporter().records().next().unwrap();
        assert_eq!(record.note.as_deref(), Some("m. 3 > 5"));
    }

    #[test]
    fn test_compare_visual_state_fail() {
        let mut h = fast_harness();
        let seen = Cell::new(String::new());
        let diff = |reference: &str| {
            seen.set(reference.to_string());
            12
        };
        assert_eq!(
            h.compare_visual_state(&diff, "gfx/ref.png", 10, "circle"),
            Outcome::Fail
        );
        assert_eq!(seen.take(), "gfx/ref.png");
        assert_eq!(
            h.reporter().records().next().unwrap().note.as_deref(),
            Some("circle. 12 > 10")
        );
    }

    #[test]
    fn test_compare_visual_state_boundary() {
        let mut h = fast_harness();
        assert_eq!(
            h.compare_visual_state(&|_: &str| 10, "r", 10, "edge"),
            Outcome::Pass
        );
    }

    #[test]
    fn test_await_visible_state_records_nothing_on_success() {
        let mut h = fast_harness();
        let mut screen = DelayedScreen::new(3);
        assert!(h.await_visible_state(&mut screen, "main"));
        assert_eq!(screen.current.as_deref(), Some("main"));
        assert_eq!(h.reporter().total(), 0);
    }

    #[test]
    fn test_await_visible_state_interrupted() {
        let mut h = fast_harness();
        let mut screen = DelayedScreen::new(u32::MAX);
        h.interrupt_handle().interrupt();

        assert!(!h.await_visible_state(&mut screen, "main"));

        let tally = h.reporter();
        assert_eq!(tally.outcomes(), vec![Outcome::Fail]);
        assert_eq!(
            tally.records().next().unwrap().note.as_deref(),
            Some(INTERRUPTED)
        );
        assert!(!h.interrupt_handle().is_pending());
    }

    #[test]
    fn test_await_visible_state_interrupted_from_other_thread() {
        let config = HarnessConfig {
            poll_interval_ms: 10_000,
            ..HarnessConfig::default()
        };
        let mut h = TestHarness::with_config(Tally::new(), &config);
        let handle = h.interrupt_handle();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.interrupt();
        });

        let mut screen = DelayedScreen::new(u32::MAX);
        let started = Instant::now();
        assert!(!h.await_visible_state(&mut screen, "main"));
        assert!(started.elapsed() < Duration::from_secs(5));
        canceller.join().unwrap();

        assert_eq!(h.reporter().count(Outcome::Fail), 1);
        assert_eq!(h.reporter().total(), 1);
    }

    #[test]
    fn test_interrupt_sleep_completes_without_interrupt() {
        let interrupt = Interrupt::new();
        assert_eq!(interrupt.sleep(Duration::from_millis(1)), Ok(()));
        interrupt.interrupt();
        assert!(interrupt.is_pending());
        assert_eq!(interrupt.sleep(Duration::from_secs(60)), Err(Interrupted));
        assert!(!interrupt.is_pending());
    }
}
