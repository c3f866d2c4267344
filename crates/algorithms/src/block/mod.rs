//! Block ciphers and their modes of operation
//!
//! A block cipher is described by two traits. [`CipherAlgorithm`] carries
//! the compile-time constants (name, sizes, batch width, strength) and
//! [`BlockCipher`] the keyed transform itself. Modes are generic over
//! `BlockCipher` and check the pairing with [`CipherConformance`] before
//! they are composed.

use core::marker::PhantomData;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::types::{ByteArray, KeyBytes};

pub mod aes;
pub mod conformance;
pub mod modes;
#[cfg(feature = "alloc")]
pub mod padding;
pub mod sm4;

pub use aes::{Aes128, Aes192, Aes256};
pub use sm4::Sm4;

/// Which way a key schedule will be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward transform only
    Encrypt,
    /// Inverse transform only
    Decrypt,
}

/// Type-level constants for a block cipher
pub trait CipherAlgorithm {
    /// Cipher name used as the prefix of composite mode names
    const NAME: &'static str;

    /// Key size in bytes
    const KEY_SIZE: usize;

    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Number of blocks one batched call is tuned for
    ///
    /// A throughput hint only. Batched and single-block calls must give
    /// byte-identical results.
    const PARALLEL_NUM: usize;

    /// Security strength in bits
    const SECURITY_STRENGTH: usize;

    /// Returns the algorithm name
    fn name() -> &'static str {
        Self::NAME
    }
}

/// A keyed block cipher
///
/// The cipher is keyed for one [`Direction`]. Calling the transform for the
/// other direction is a [`State`](crate::Error::State) error, so a mode that
/// only needs the forward transform never pays for an inverse schedule.
pub trait BlockCipher: Zeroize + Sized {
    /// Constants describing the algorithm
    type Algorithm: CipherAlgorithm;

    /// Key type, exactly `Algorithm::KEY_SIZE` bytes
    type Key: KeyBytes;

    /// One block, exactly `Algorithm::BLOCK_SIZE` bytes
    type Block: ByteArray;

    /// Scratch for one batch, `BLOCK_SIZE * PARALLEL_NUM` bytes
    type Batch: ByteArray;

    /// Creates a cipher keyed for `direction`
    fn new(key: &Self::Key, direction: Direction) -> Self;

    /// Replaces the key schedule
    fn set_key(&mut self, key: &Self::Key, direction: Direction);

    /// Direction the current key schedule was prepared for
    fn direction(&self) -> Direction;

    /// Encrypts a single block in place
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypts a single block in place
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Encrypts any whole number of contiguous blocks in place
    fn encrypt_blocks(&self, blocks: &mut [u8]) -> Result<()> {
        validate::block_multiple("batch encrypt", blocks.len(), Self::block_size())?;
        for block in blocks.chunks_exact_mut(Self::block_size()) {
            self.encrypt_block(block)?;
        }
        Ok(())
    }

    /// Decrypts any whole number of contiguous blocks in place
    fn decrypt_blocks(&self, blocks: &mut [u8]) -> Result<()> {
        validate::block_multiple("batch decrypt", blocks.len(), Self::block_size())?;
        for block in blocks.chunks_exact_mut(Self::block_size()) {
            self.decrypt_block(block)?;
        }
        Ok(())
    }

    /// Returns the key size in bytes
    fn key_size() -> usize {
        Self::Algorithm::KEY_SIZE
    }

    /// Returns the block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Returns the batch width in blocks
    fn parallel_num() -> usize {
        Self::Algorithm::PARALLEL_NUM
    }

    /// Returns the security strength in bits
    fn security_strength() -> usize {
        Self::Algorithm::SECURITY_STRENGTH
    }

    /// Returns the algorithm name
    fn name() -> &'static str {
        Self::Algorithm::NAME
    }

    /// Generates a random key
    fn generate_key<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Key {
        <Self::Key as KeyBytes>::random(rng)
    }
}

/// Compile-time check that a cipher's constants and storage types agree
///
/// Evaluating [`CipherConformance::OK`] for a mismatched cipher fails the
/// build. Every mode constructor evaluates it.
pub struct CipherConformance<C>(PhantomData<C>);

impl<C: BlockCipher> CipherConformance<C> {
    /// Unit constant whose evaluation performs the checks
    pub const OK: () = {
        assert!(
            !<C::Algorithm as CipherAlgorithm>::NAME.is_empty(),
            "cipher name must not be empty"
        );
        assert!(
            <C::Algorithm as CipherAlgorithm>::BLOCK_SIZE > 0,
            "block size must be positive"
        );
        assert!(
            <C::Algorithm as CipherAlgorithm>::KEY_SIZE > 0,
            "key size must be positive"
        );
        assert!(
            <C::Algorithm as CipherAlgorithm>::PARALLEL_NUM > 0,
            "batch width must be positive"
        );
        assert!(
            <C::Block as ByteArray>::LEN == <C::Algorithm as CipherAlgorithm>::BLOCK_SIZE,
            "Block type length must equal BLOCK_SIZE"
        );
        assert!(
            <C::Batch as ByteArray>::LEN
                == <C::Algorithm as CipherAlgorithm>::BLOCK_SIZE
                    * <C::Algorithm as CipherAlgorithm>::PARALLEL_NUM,
            "Batch type length must equal BLOCK_SIZE * PARALLEL_NUM"
        );
        assert!(
            <C::Key as KeyBytes>::LEN == <C::Algorithm as CipherAlgorithm>::KEY_SIZE,
            "Key type length must equal KEY_SIZE"
        );
    };
}
