//! Public API traits and types for the chunkcrypt library
//!
//! This crate provides the public API surface shared by the chunkcrypt
//! crates: the error type, the parameter protocol used to configure modes of
//! operation without per-mode call signatures, secret byte containers, and
//! the object-safe [`CipherMode`] trait used for name-driven dispatch.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod params;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use params::{ParamKind, ParamSet, ParamSetMut};
pub use traits::CipherMode;
pub use types::SecretBytes;
