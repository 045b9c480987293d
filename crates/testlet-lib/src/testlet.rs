//! Testlets: individual tests that drive a harness.

use log::info;

use crate::config::HarnessConfig;
use crate::harness::TestHarness;
use crate::reporter::Reporter;

/// Harness type handed to testlets.
pub type DynHarness<'r> = TestHarness<&'r mut dyn Reporter>;

/// A single test run against a harness.
pub trait Testlet {
    fn name(&self) -> &str;

    fn test(&self, harness: &mut DynHarness<'_>);
}

/// Testlet backed by a plain function.
#[derive(Clone, Copy)]
pub struct FnTestlet {
    name: &'static str,
    body: fn(&mut DynHarness<'_>),
}

impl FnTestlet {
    pub const fn new(name: &'static str, body: fn(&mut DynHarness<'_>)) -> Self {
        Self { name, body }
    }
}

impl Testlet for FnTestlet {
    fn name(&self) -> &str {
        self.name
    }

    fn test(&self, harness: &mut DynHarness<'_>) {
        (self.body)(harness)
    }
}

impl std::fmt::Debug for FnTestlet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTestlet").field("name", &self.name).finish()
    }
}

/// Run one testlet on a fresh harness reporting to `reporter`.
///
/// The note starts out as the testlet's name.
pub fn run_testlet(testlet: &dyn Testlet, reporter: &mut dyn Reporter, config: &HarnessConfig) {
    info!("Running testlet {}", testlet.name());
    let mut harness = TestHarness::with_config(reporter, config);
    harness.set_note(testlet.name());
    testlet.test(&mut harness);
}
