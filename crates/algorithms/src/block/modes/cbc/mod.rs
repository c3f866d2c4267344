//! Cipher Block Chaining (CBC) mode
//!
//! Each plaintext block is XORed with the previous ciphertext block (the IV
//! for the first) before encryption. Encryption is strictly sequential.
//! Decryption batches: a run of ciphertext blocks is captured, decrypted
//! with one batched call, and each result is XORed with the ciphertext block
//! that preceded it.
//!
//! The message length must be a multiple of the block size. No padding is
//! applied; see [`crate::block::padding`].

use chunkcrypt_api::{ParamKind, ParamSet, ParamSetMut};
use chunkcrypt_internal::xor::xor_in_place;
use chunkcrypt_params::utils::modes::{CBC_DEC_SUFFIX, CBC_ENC_SUFFIX};
use tracing::debug;
use zeroize::Zeroize;

use super::engine::{BlockProcessor, ChunkBuffer};
use super::{params, BlockMode};
use crate::block::{BlockCipher, CipherConformance, Direction};
use crate::error::{Error, Result};
use crate::types::ByteArray;

struct CbcEncryptCore<C: BlockCipher> {
    cipher: C,
    chain: C::Block,
}

impl<C: BlockCipher> BlockProcessor for CbcEncryptCore<C> {
    const ALIGNED: bool = true;

    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()> {
        for block in blocks.chunks_exact_mut(C::block_size()) {
            xor_in_place(block, self.chain.as_ref());
            self.cipher.encrypt_block(block)?;
            self.chain.as_mut().copy_from_slice(block);
        }
        Ok(())
    }

    fn process_tail(&mut self, _tail: &mut [u8]) -> Result<()> {
        Err(Error::state("CBC", "partial final block"))
    }
}

struct CbcDecryptCore<C: BlockCipher> {
    cipher: C,
    chain: C::Block,
}

impl<C: BlockCipher> BlockProcessor for CbcDecryptCore<C> {
    const ALIGNED: bool = true;

    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()> {
        let bs = C::block_size();
        let mut saved = C::Batch::zeroed();

        for run in blocks.chunks_mut(C::Batch::LEN) {
            let n = run.len();
            let ciphertext = &mut saved.as_mut()[..n];
            ciphertext.copy_from_slice(run);

            self.cipher.decrypt_blocks(run)?;
            xor_in_place(&mut run[..bs], self.chain.as_ref());
            xor_in_place(&mut run[bs..], &ciphertext[..n - bs]);
            self.chain.as_mut().copy_from_slice(&ciphertext[n - bs..]);
        }
        Ok(())
    }

    fn process_tail(&mut self, _tail: &mut [u8]) -> Result<()> {
        Err(Error::state("CBC", "partial final block"))
    }
}

macro_rules! cbc_mode {
    ($(#[$meta:meta])* $mode:ident, $core:ident, $direction:expr, $suffix:expr) => {
        $(#[$meta])*
        pub struct $mode<C: BlockCipher> {
            core: $core<C>,
            engine: ChunkBuffer<C::Block>,
        }

        impl<C: BlockCipher> $mode<C> {
            /// Creates the mode keyed with `key`, chaining from `iv`
            pub fn new(key: &C::Key, iv: &C::Block) -> Self {
                let () = CipherConformance::<C>::OK;
                let engine = ChunkBuffer::new(Self::canonical_name());
                debug!(mode = engine.name(), "mode initialised");
                Self {
                    core: $core {
                        cipher: C::new(key, $direction),
                        chain: *iv,
                    },
                    engine,
                }
            }

            /// Re-keys and re-arms from `params` (KEY and IV required)
            ///
            /// Nothing changes unless both parameters are valid.
            pub fn init(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
                let key = params::key::<C>(params)?;
                let iv = params::iv::<C>(params)?;
                self.core.cipher.set_key(&key, $direction);
                self.core.chain = iv;
                self.engine.rearm();
                debug!(mode = self.engine.name(), "mode re-keyed");
                Ok(Self::REQUIRED)
            }

            /// Re-arms with a new IV if `params` carries one
            pub fn set(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
                match params::optional_iv::<C>(params)? {
                    Some(iv) => {
                        self.reset(&iv);
                        Ok(ParamKind::IV)
                    }
                    None => Ok(ParamKind::empty()),
                }
            }

            /// Writes the current chaining value into the IV slot
            pub fn get(&self, params: &mut ParamSetMut<'_>) -> Result<ParamKind> {
                params::write_iv(params, self.core.chain.as_ref())
            }

            /// Discards buffered bytes and starts a new message from `iv`
            pub fn reset(&mut self, iv: &C::Block) {
                self.core.chain = *iv;
                self.engine.rearm();
                debug!(mode = self.engine.name(), "mode reset");
            }
        }

        impl<C: BlockCipher> BlockMode for $mode<C> {
            type Cipher = C;
            const REQUIRED: ParamKind = ParamKind::KEY.union(ParamKind::IV);
            const SUFFIX: &'static str = $suffix;

            fn from_params(params: &ParamSet<'_>) -> Result<Self> {
                let key = params::key::<C>(params)?;
                let iv = params::iv::<C>(params)?;
                Ok(Self::new(&key, &iv))
            }
        }

        impl<C: BlockCipher> Drop for $mode<C> {
            fn drop(&mut self) {
                self.core.chain.zeroize();
            }
        }

        impl_cipher_mode!($mode);
    };
}

cbc_mode! {
    /// CBC encryption
    CbcEncryptor, CbcEncryptCore, Direction::Encrypt, CBC_ENC_SUFFIX
}

cbc_mode! {
    /// CBC decryption
    ///
    /// Blocks are decrypted in batches of the cipher's `PARALLEL_NUM`; the
    /// output does not depend on the batch width.
    CbcDecryptor, CbcDecryptCore, Direction::Decrypt, CBC_DEC_SUFFIX
}
