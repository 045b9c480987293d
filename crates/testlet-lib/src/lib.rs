pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod outcome;
pub mod reporter;
pub mod screen;
pub mod selftest;
pub mod testlet;
pub mod value;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use harness::{TestHarness, INTERRUPTED};
pub use outcome::Outcome;
pub use reporter::{LogReporter, Reporter, Tally};
pub use screen::{Interrupt, Interrupted, PixelDiff, Screen};
pub use testlet::{run_testlet, DynHarness, FnTestlet, Testlet};
pub use value::{Checkable, Kind, Value};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
