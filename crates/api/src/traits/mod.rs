//! Trait definitions for the chunkcrypt public API

pub mod mode;

pub use mode::CipherMode;
