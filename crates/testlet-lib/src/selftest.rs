//! Built-in testlets that exercise the harness's own equality rules.
//!
//! These run through the same [`Testlet`] path as any other test, so a
//! broken float or object comparison shows up as a failing outcome.

use crate::testlet::{DynHarness, FnTestlet, Testlet};
use crate::value::{Checkable, Value};

const TESTLETS: &[FnTestlet] = &[
    FnTestlet::new("primitives", primitives),
    FnTestlet::new("float-zero", float_zero),
    FnTestlet::new("float-nan", float_nan),
    FnTestlet::new("objects", objects),
    FnTestlet::new("todo", todo),
];

/// All built-in testlets, in run order.
pub fn all() -> Vec<Box<dyn Testlet>> {
    TESTLETS
        .iter()
        .map(|t| Box::new(*t) as Box<dyn Testlet>)
        .collect()
}

/// Built-in testlets whose name contains `filter`.
pub fn matching(filter: &str) -> Vec<Box<dyn Testlet>> {
    all()
        .into_iter()
        .filter(|t| t.name().contains(filter))
        .collect()
}

fn primitives(h: &mut DynHarness<'_>) {
    h.check_eq_noted(true, true, "bool");
    h.check_eq(false, false);
    h.check_eq_noted(i32::MAX, i32::MAX, "int");
    h.check_eq(i32::MIN, i32::MIN);
    h.check_eq_noted(i64::MIN, i64::MIN, "long");
    h.check_eq_noted(1i32.matches(&2), false, "int mismatch");
    h.check_eq_noted(
        (i64::from(i32::MAX) + 1).matches(&i64::from(i32::MIN)),
        false,
        "long does not wrap",
    );
}

fn float_zero(h: &mut DynHarness<'_>) {
    h.check_eq_noted(0.0f64, 0.0, "double +0");
    h.check_eq_noted(-0.0f64, -0.0, "double -0");
    h.check_eq_noted(0.0f32, 0.0, "float +0");
    h.check_eq_noted(0.0f64.matches(&-0.0), false, "double +0 vs -0");
    h.check_eq_noted((-0.0f32).matches(&0.0), false, "float -0 vs +0");
    h.check_eq_noted(1.0f64 / -0.0, f64::NEG_INFINITY, "reciprocal of -0");
    h.check_eq_noted(1.0f64.matches(&2.0), false, "distinct values");
}

fn float_nan(h: &mut DynHarness<'_>) {
    h.check_eq_noted(f64::NAN, f64::NAN, "double NaN");
    h.check_eq_noted(f32::NAN, f32::NAN, "float NaN");
    h.check_eq_noted(f64::NAN.matches(&1.0), false, "NaN vs 1.0");
    h.check_eq_noted(1.0f64.matches(&f64::NAN), false, "1.0 vs NaN");
    h.check_eq_noted((-1.0f64).sqrt(), f64::NAN, "sqrt(-1)");
}

fn objects(h: &mut DynHarness<'_>) {
    h.check_eq_noted(Value::object(&1234), Value::object("1234"), "textual form");
    h.check_eq_noted(Value::absent(), Value::absent(), "absent");
    h.check_eq_noted(
        Value::absent().matches(&Value::object("null")),
        false,
        "absent vs \"null\"",
    );
    h.check_eq_noted(Some("a").matches(&Some("b")), false, "distinct text");
}

fn todo(h: &mut DynHarness<'_>) {
    h.todo_eq_noted(1i64, 2, "expected failure");
    h.todo_noted(false, "expected failure");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use crate::outcome::Outcome;
    use crate::reporter::Tally;
    use crate::testlet::run_testlet;

    #[test]
    fn test_selftests_pass() {
        let mut tally = Tally::new();
        for testlet in all() {
            run_testlet(testlet.as_ref(), &mut tally, &HarnessConfig::default());
        }
        assert_eq!(tally.failures(), 0, "{:?}", tally.events());
        assert_eq!(tally.count(Outcome::TodoFail), 2);
        assert_eq!(tally.debug_messages().count(), 0);
    }

    #[test]
    fn test_matching() {
        let names: Vec<_> = matching("float")
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["float-zero", "float-nan"]);
        assert!(matching("nothing").is_empty());
        assert_eq!(all().len(), 5);
    }
}
