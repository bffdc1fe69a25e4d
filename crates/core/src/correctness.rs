//! Lightweight precondition checks used at construction boundaries.
//!
//! Predicate helpers that turn an invalid-argument bug into an early,
//! descriptive `Err` rather than a panic or silent corruption.

use anyhow::{bail, Result};

pub const FAILED: &str = "Condition failed";

pub fn check_predicate_true(predicate: bool, fail_msg: &str) -> Result<()> {
    if !predicate {
        bail!("{FAILED}: {fail_msg}");
    }
    Ok(())
}

pub fn check_predicate_false(predicate: bool, fail_msg: &str) -> Result<()> {
    check_predicate_true(!predicate, fail_msg)
}

pub fn check_non_negative(value: f64, param: &str) -> Result<()> {
    check_predicate_true(value >= 0.0, &format!("`{param}` was negative: {value}"))
}

pub fn check_positive(value: f64, param: &str) -> Result<()> {
    check_predicate_true(value > 0.0, &format!("`{param}` was not positive: {value}"))
}

pub fn check_valid_precision(precision: u8, param: &str) -> Result<()> {
    const MAX_PRECISION: u8 = 28;
    check_predicate_true(
        precision <= MAX_PRECISION,
        &format!("`{param}` precision {precision} exceeds max {MAX_PRECISION}"),
    )
}
