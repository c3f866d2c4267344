//! Internal utilities for the chunkcrypt library
//!
//! Byte-level helpers shared by the block cipher modes. Nothing here is part
//! of the public API surface; the crate is published only so the workspace
//! members can depend on it.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod constant_time;
pub mod endian;
pub mod xor;
