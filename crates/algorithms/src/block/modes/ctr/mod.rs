//! Counter (CTR) mode
//!
//! The keystream is the forward transform of successive counter blocks. The
//! whole block is the counter: it is incremented as one big-endian integer
//! and wraps modulo 2^(8·BLOCK_SIZE). Callers wanting a nonce‖counter layout
//! build the initial block that way.
//!
//! `PARALLEL_NUM` counter blocks are staged on the stack and transformed with
//! one batched call. Encryption and decryption are the same operation.
//!
//! # Security
//!
//! A (key, counter) pair must never be used twice. [`Ctr::reset`] refuses
//! the starting block the object was last armed with; keeping counter ranges
//! of different messages disjoint is the caller's duty.

use chunkcrypt_api::{ParamKind, ParamSet, ParamSetMut};
use chunkcrypt_internal::endian::increment_be;
use chunkcrypt_internal::xor::xor_in_place;
use chunkcrypt_params::utils::modes::CTR_SUFFIX;
use tracing::debug;
use zeroize::Zeroize;

use super::engine::{BlockProcessor, ChunkBuffer};
use super::params::{self, ReuseGuard};
use super::BlockMode;
use crate::block::{BlockCipher, CipherConformance, Direction};
use crate::error::Result;
use crate::types::ByteArray;

struct CtrCore<C: BlockCipher> {
    cipher: C,
    counter: C::Block,
}

impl<C: BlockCipher> BlockProcessor for CtrCore<C> {
    const ALIGNED: bool = false;

    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()> {
        let mut keystream = C::Batch::zeroed();

        for run in blocks.chunks_mut(C::Batch::LEN) {
            let ks = &mut keystream.as_mut()[..run.len()];
            for slot in ks.chunks_exact_mut(C::block_size()) {
                slot.copy_from_slice(self.counter.as_ref());
                increment_be(self.counter.as_mut());
            }
            self.cipher.encrypt_blocks(ks)?;
            xor_in_place(run, ks);
        }
        keystream.zeroize();
        Ok(())
    }

    fn process_tail(&mut self, tail: &mut [u8]) -> Result<()> {
        let mut ks = self.counter;
        increment_be(self.counter.as_mut());
        self.cipher.encrypt_block(ks.as_mut())?;
        xor_in_place(tail, ks.as_ref());
        ks.zeroize();
        Ok(())
    }
}

/// CTR mode; the same transform encrypts and decrypts
pub struct Ctr<C: BlockCipher> {
    core: CtrCore<C>,
    engine: ChunkBuffer<C::Block>,
    guard: ReuseGuard<C::Key, C::Block>,
}

/// CTR used for encryption
pub type CtrEncryptor<C> = Ctr<C>;

/// CTR used for decryption
pub type CtrDecryptor<C> = Ctr<C>;

impl<C: BlockCipher> Ctr<C> {
    /// Creates the mode keyed with `key`, counting from `counter`
    pub fn new(key: &C::Key, counter: &C::Block) -> Self {
        let () = CipherConformance::<C>::OK;
        let engine = ChunkBuffer::new(Self::canonical_name());
        debug!(mode = engine.name(), "mode initialised");
        Self {
            core: CtrCore {
                cipher: C::new(key, Direction::Encrypt),
                counter: *counter,
            },
            engine,
            guard: ReuseGuard::new(key, counter),
        }
    }

    /// Re-keys and re-arms from `params` (KEY and IV required)
    ///
    /// Under a new key any starting counter is accepted. Under the key already
    /// in use the counter the object was last armed with is rejected, leaving
    /// the object unchanged.
    pub fn init(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
        let key = params::key::<C>(params)?;
        let counter = params::iv::<C>(params)?;
        self.guard.rekey(self.engine.name(), &key, &counter)?;
        self.core.cipher.set_key(&key, Direction::Encrypt);
        self.core.counter = counter;
        self.engine.rearm();
        debug!(mode = self.engine.name(), "mode re-keyed");
        Ok(Self::REQUIRED)
    }

    /// Re-arms with a new starting counter if `params` carries an IV
    pub fn set(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
        match params::optional_iv::<C>(params)? {
            Some(counter) => {
                self.reset(&counter)?;
                Ok(ParamKind::IV)
            }
            None => Ok(ParamKind::empty()),
        }
    }

    /// Writes the next unused counter block into the IV slot
    pub fn get(&self, params: &mut ParamSetMut<'_>) -> Result<ParamKind> {
        params::write_iv(params, self.core.counter.as_ref())
    }

    /// Starts a new message counting from `counter`
    ///
    /// Fails with a parameter error, leaving the object unchanged, if
    /// `counter` equals the block the object was last armed with.
    pub fn reset(&mut self, counter: &C::Block) -> Result<()> {
        self.guard.rearm(self.engine.name(), counter)?;
        self.core.counter = *counter;
        self.engine.rearm();
        debug!(mode = self.engine.name(), "mode reset");
        Ok(())
    }
}

impl<C: BlockCipher> BlockMode for Ctr<C> {
    type Cipher = C;
    const REQUIRED: ParamKind = ParamKind::KEY.union(ParamKind::IV);
    const SUFFIX: &'static str = CTR_SUFFIX;

    fn from_params(params: &ParamSet<'_>) -> Result<Self> {
        let key = params::key::<C>(params)?;
        let counter = params::iv::<C>(params)?;
        Ok(Self::new(&key, &counter))
    }
}

impl<C: BlockCipher> Drop for Ctr<C> {
    fn drop(&mut self) {
        self.core.counter.zeroize();
    }
}

impl_cipher_mode!(Ctr);
