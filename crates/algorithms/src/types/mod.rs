//! Fixed-size byte containers used by block ciphers and modes
//!
//! Block ciphers describe their block, batch and key storage through
//! associated types rather than runtime lengths. Modes use those types to
//! keep chaining state and batch scratch on the stack.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{validate, Result};

// Sealed trait module (not public)
pub(crate) mod sealed;

pub use chunkcrypt_api::types::SecretBytes;

/// A plain byte array of statically known length
///
/// Implemented for `[u8; N]` only. Modes size their chaining registers by a
/// cipher's `Block` type and their batch scratch by its `Batch` type.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Copy + Zeroize + Send + Sync + 'static + sealed::Sealed
{
    /// Length in bytes
    const LEN: usize;

    /// An all-zero value
    fn zeroed() -> Self;

    /// Copy from a slice of exactly `LEN` bytes
    fn from_slice(context: &'static str, bytes: &[u8]) -> Result<Self> {
        validate::length(context, bytes.len(), Self::LEN)?;
        let mut out = Self::zeroed();
        out.as_mut().copy_from_slice(bytes);
        Ok(out)
    }
}

impl<const N: usize> ByteArray for [u8; N] {
    const LEN: usize = N;

    #[inline(always)]
    fn zeroed() -> Self {
        [0u8; N]
    }
}

/// Key material accepted by a block cipher
pub trait KeyBytes: AsRef<[u8]> + Clone + Zeroize + Sized {
    /// Key length in bytes
    const LEN: usize;

    /// Copy a key from a slice of exactly `LEN` bytes
    fn from_slice(bytes: &[u8]) -> Result<Self>;

    /// Generate a fresh random key
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self;
}

impl<const N: usize> KeyBytes for SecretBytes<N> {
    const LEN: usize = N;

    fn from_slice(bytes: &[u8]) -> Result<Self> {
        validate::length("cipher key", bytes.len(), N)?;
        let mut data = [0u8; N];
        data.copy_from_slice(bytes);
        let key = SecretBytes::new(data);
        data.zeroize();
        Ok(key)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        SecretBytes::random(rng)
    }
}
