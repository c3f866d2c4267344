//! Constant values for chunkcrypt cryptographic operations

pub mod modes;
pub mod symmetric;
