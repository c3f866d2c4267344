//! Sealed traits for preventing trait implementation outside the crate

/// Sealed trait to prevent trait implementation outside the crate
pub trait Sealed {}

impl<const N: usize> Sealed for [u8; N] {}
