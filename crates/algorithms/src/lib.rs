//! Block ciphers and streaming modes of operation
//!
//! This crate turns fixed-block ciphers into byte-stream processors. The
//! chunked transform engine behind every mode accepts input split at
//! arbitrary points and produces output identical to a one-shot call.
//!
//! - [`block::aes`]: AES-128/192/256 with batched multi-block calls
//! - [`block::sm4`]: SM4 (GB/T 32907)
//! - [`block::modes`]: ECB, CBC, CFB, OFB and CTR over any [`BlockCipher`]
//! - [`block::padding`]: PKCS#7, for callers of the block-aligned modes
//!
//! The engine and modes work without `std`; the interned mode names and the
//! name-driven registry need it.
//!
//! # Security
//!
//! None of the modes authenticate. Key schedules, chaining registers and
//! buffered bytes are zeroized on drop.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Block ciphers and modes
pub mod block;
pub use block::aes::{Aes128Algorithm, Aes192Algorithm, Aes256Algorithm};
pub use block::sm4::Sm4Algorithm;
pub use block::modes::{
    BlockMode, CbcDecryptor, CbcEncryptor, CfbDecryptor, CfbEncryptor, Ctr, CtrDecryptor,
    CtrEncryptor, EcbDecryptor, EcbEncryptor, Ofb, OfbDecryptor, OfbEncryptor,
};
pub use block::{
    Aes128, Aes192, Aes256, BlockCipher, CipherAlgorithm, CipherConformance, Direction, Sm4,
};

// Type system
pub mod types;
pub use types::{ByteArray, KeyBytes, SecretBytes};
