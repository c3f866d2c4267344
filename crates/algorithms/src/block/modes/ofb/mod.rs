//! Output Feedback (OFB) mode
//!
//! The keystream is the forward transform iterated on the IV:
//! `o_i = E(o_{i-1})`, `o_0 = E(iv)`. Encryption and decryption are the same
//! operation, so one type serves both directions. Generation is strictly
//! serial and never batched.
//!
//! # Security
//!
//! A (key, IV) pair must never be used for two messages. [`Ofb::reset`]
//! refuses the IV the object was last armed with; uniqueness beyond that is
//! the caller's duty.

use chunkcrypt_api::{ParamKind, ParamSet, ParamSetMut};
use chunkcrypt_internal::xor::xor_in_place;
use chunkcrypt_params::utils::modes::OFB_SUFFIX;
use tracing::debug;
use zeroize::Zeroize;

use super::engine::{BlockProcessor, ChunkBuffer};
use super::params::{self, ReuseGuard};
use super::BlockMode;
use crate::block::{BlockCipher, CipherConformance, Direction};
use crate::error::Result;

struct OfbCore<C: BlockCipher> {
    cipher: C,
    register: C::Block,
}

impl<C: BlockCipher> BlockProcessor for OfbCore<C> {
    const ALIGNED: bool = false;

    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()> {
        for block in blocks.chunks_exact_mut(C::block_size()) {
            self.cipher.encrypt_block(self.register.as_mut())?;
            xor_in_place(block, self.register.as_ref());
        }
        Ok(())
    }

    fn process_tail(&mut self, tail: &mut [u8]) -> Result<()> {
        self.cipher.encrypt_block(self.register.as_mut())?;
        xor_in_place(tail, self.register.as_ref());
        Ok(())
    }
}

/// OFB mode; the same transform encrypts and decrypts
pub struct Ofb<C: BlockCipher> {
    core: OfbCore<C>,
    engine: ChunkBuffer<C::Block>,
    guard: ReuseGuard<C::Key, C::Block>,
}

/// OFB used for encryption
pub type OfbEncryptor<C> = Ofb<C>;

/// OFB used for decryption
pub type OfbDecryptor<C> = Ofb<C>;

impl<C: BlockCipher> Ofb<C> {
    /// Creates the mode keyed with `key`, starting from `iv`
    pub fn new(key: &C::Key, iv: &C::Block) -> Self {
        let () = CipherConformance::<C>::OK;
        let engine = ChunkBuffer::new(Self::canonical_name());
        debug!(mode = engine.name(), "mode initialised");
        Self {
            core: OfbCore {
                cipher: C::new(key, Direction::Encrypt),
                register: *iv,
            },
            engine,
            guard: ReuseGuard::new(key, iv),
        }
    }

    /// Re-keys and re-arms from `params` (KEY and IV required)
    ///
    /// Under a new key any IV is accepted. Under the key already in use the
    /// IV the object was last armed with is rejected, leaving the object
    /// unchanged.
    pub fn init(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
        let key = params::key::<C>(params)?;
        let iv = params::iv::<C>(params)?;
        self.guard.rekey(self.engine.name(), &key, &iv)?;
        self.core.cipher.set_key(&key, Direction::Encrypt);
        self.core.register = iv;
        self.engine.rearm();
        debug!(mode = self.engine.name(), "mode re-keyed");
        Ok(Self::REQUIRED)
    }

    /// Re-arms with a new IV if `params` carries one
    pub fn set(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
        match params::optional_iv::<C>(params)? {
            Some(iv) => {
                self.reset(&iv)?;
                Ok(ParamKind::IV)
            }
            None => Ok(ParamKind::empty()),
        }
    }

    /// Writes the current output register into the IV slot
    ///
    /// The value lets a caller continue the keystream in another object; it
    /// is keystream material and must not be used as a fresh IV.
    pub fn get(&self, params: &mut ParamSetMut<'_>) -> Result<ParamKind> {
        params::write_iv(params, self.core.register.as_ref())
    }

    /// Starts a new message from `iv`
    ///
    /// Fails with a parameter error, leaving the object unchanged, if `iv`
    /// equals the IV the object was last armed with.
    pub fn reset(&mut self, iv: &C::Block) -> Result<()> {
        self.guard.rearm(self.engine.name(), iv)?;
        self.core.register = *iv;
        self.engine.rearm();
        debug!(mode = self.engine.name(), "mode reset");
        Ok(())
    }
}

impl<C: BlockCipher> BlockMode for Ofb<C> {
    type Cipher = C;
    const REQUIRED: ParamKind = ParamKind::KEY.union(ParamKind::IV);
    const SUFFIX: &'static str = OFB_SUFFIX;

    fn from_params(params: &ParamSet<'_>) -> Result<Self> {
        let key = params::key::<C>(params)?;
        let iv = params::iv::<C>(params)?;
        Ok(Self::new(&key, &iv))
    }
}

impl<C: BlockCipher> Drop for Ofb<C> {
    fn drop(&mut self) {
        self.core.register.zeroize();
    }
}

impl_cipher_mode!(Ofb);
