//! Validation utilities for cryptographic primitives

use super::{Error, Result};

/// Validate a parameter condition
#[inline(always)]
pub fn parameter(condition: bool, name: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::param(name, reason));
    }
    Ok(())
}

/// Validate a length
#[inline(always)]
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::Length {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate a minimum length
#[inline(always)]
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::Length {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Validate that `actual` is a whole number of `block`-sized blocks
///
/// The reported expectation is the next aligned length.
#[inline(always)]
pub fn block_multiple(context: &'static str, actual: usize, block: usize) -> Result<()> {
    if actual % block != 0 {
        return Err(Error::Length {
            context,
            expected: (actual / block + 1) * block,
            actual,
        });
    }
    Ok(())
}

/// Validate that an object is still usable
#[inline(always)]
pub fn state(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::state(context, reason));
    }
    Ok(())
}
