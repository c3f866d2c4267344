//! Constant values for the chunkcrypt library
//!
//! Sizes, parallel widths and naming constants shared by the block cipher
//! implementations and the modes of operation. Everything here is `const`,
//! so the crate is always `no_std`.

#![no_std]

pub mod utils;
