//! Common test utilities for testlet-lib
//!
//! Scripted screen collaborators and harness constructors shared by the
//! integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use testlet_lib::{HarnessConfig, Screen, Tally, TestHarness};

/// Harness with a 1ms poll interval, reporting to a `Tally`.
pub fn fast_harness() -> TestHarness<Tally> {
    let config = HarnessConfig {
        poll_interval_ms: 1,
        ..HarnessConfig::default()
    };
    TestHarness::with_config(Tally::new(), &config)
}

/// Screen that shows a target only after `delay` polls, and records every
/// `set_current` call.
pub struct ScriptedScreen {
    pub current: Option<String>,
    pub requested: Vec<String>,
    delay: u32,
    polls: Cell<u32>,
}

impl ScriptedScreen {
    pub fn new(delay: u32) -> Self {
        Self {
            current: None,
            requested: Vec::new(),
            delay,
            polls: Cell::new(0),
        }
    }

    /// A screen that never shows anything.
    pub fn stuck() -> Self {
        Self::new(u32::MAX)
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl Screen for ScriptedScreen {
    type Target = str;

    fn set_current(&mut self, target: &str) {
        self.requested.push(target.to_string());
        self.current = Some(target.to_string());
    }

    fn is_displayed(&self, target: &str) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        polls > self.delay && self.current.as_deref() == Some(target)
    }
}

/// Pixel differences keyed by reference id; unknown references count as
/// entirely different.
pub struct ReferenceImages {
    diffs: HashMap<String, i32>,
    pub lookups: RefCell<Vec<String>>,
}

impl ReferenceImages {
    pub fn new(diffs: &[(&str, i32)]) -> Self {
        Self {
            diffs: diffs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            lookups: RefCell::new(Vec::new()),
        }
    }
}

impl testlet_lib::PixelDiff for ReferenceImages {
    fn count_differing_pixels(&self, reference_id: &str) -> i32 {
        self.lookups.borrow_mut().push(reference_id.to_string());
        self.diffs.get(reference_id).copied().unwrap_or(i32::MAX)
    }
}
