//! # chunkcrypt
//!
//! Streaming block cipher modes for Rust: AES and SM4 under ECB, CBC, CFB,
//! OFB and CTR, fed in chunks of any size.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! chunkcrypt = "0.3"
//! ```
//!
//! ```
//! use chunkcrypt::prelude::*;
//!
//! let key = SecretBytes::new([0x2b; 16]);
//! let counter = [0u8; 16];
//!
//! let mut enc = Ctr::<Aes128>::new(&key, &counter);
//! let mut out = [0u8; 21];
//! let n = enc.update(&mut out, b"attack at ").unwrap();
//! let m = enc.do_final(&mut out[n..], b"dawn, east").unwrap();
//! assert_eq!(n + m, 20);
//!
//! let mut dec = Ctr::<Aes128>::new(&key, &counter);
//! let pt = dec.process(&out[..20]).unwrap();
//! assert_eq!(pt, b"attack at dawn, east");
//! assert_eq!(hex::encode(&pt[..6]), "61747461636b");
//! ```
//!
//! ## Features
//!
//! - `std` (default): the name-driven registry
//! - `alloc`: one-shot `process` and PKCS#7 padding
//! - `rand`: re-exports `rand` for key generation
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`api`]: errors, the parameter protocol and the object-safe `CipherMode`
//! - [`algorithms`]: AES, SM4, the chunked transform engine and the five modes
//! - [`params`]: algorithm constants and mode name suffixes
//! - [`internal`]: constant-time, endian and XOR helpers

#![cfg_attr(not(feature = "std"), no_std)]

pub use chunkcrypt_algorithms as algorithms;
pub use chunkcrypt_api as api;
pub use chunkcrypt_internal as internal;
pub use chunkcrypt_params as params;

#[cfg(feature = "rand")]
pub use rand;
pub use zeroize;

/// Common imports for chunkcrypt users
pub mod prelude {
    pub use crate::api::{CipherMode, Error, ParamKind, ParamSet, ParamSetMut, Result};

    pub use crate::algorithms::{
        Aes128, Aes192, Aes256, BlockCipher, BlockMode, CbcDecryptor, CbcEncryptor,
        CfbDecryptor, CfbEncryptor, Ctr, CtrDecryptor, CtrEncryptor, Direction, EcbDecryptor,
        EcbEncryptor, Ofb, OfbDecryptor, OfbEncryptor, SecretBytes, Sm4,
    };

    #[cfg(feature = "alloc")]
    pub use crate::algorithms::block::padding::pkcs7;

    #[cfg(feature = "std")]
    pub use crate::algorithms::block::modes::registry;
}
