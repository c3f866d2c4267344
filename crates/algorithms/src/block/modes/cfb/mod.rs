//! Cipher Feedback (CFB) mode, full-block feedback (CFB-128 for AES)
//!
//! The keystream for each block is the forward transform of the previous
//! ciphertext block (the IV for the first). Only the forward transform is
//! ever used, in both directions.
//!
//! Decryption batches: the keystream inputs `[chain, c0, c1, ...]` are all
//! known up front, so a run of keystream blocks comes from one batched call.
//! A trailing partial block is XORed with the first bytes of one more
//! keystream block.

use chunkcrypt_api::{ParamKind, ParamSet, ParamSetMut};
use chunkcrypt_internal::xor::xor_in_place;
use chunkcrypt_params::utils::modes::{CFB_DEC_SUFFIX, CFB_ENC_SUFFIX};
use tracing::debug;
use zeroize::Zeroize;

use super::engine::{BlockProcessor, ChunkBuffer};
use super::{params, BlockMode};
use crate::block::{BlockCipher, CipherConformance, Direction};
use crate::error::Result;
use crate::types::ByteArray;

/// XOR `tail` with the first bytes of E(chain); the chain itself is kept
fn keystream_tail<C: BlockCipher>(cipher: &C, chain: &C::Block, tail: &mut [u8]) -> Result<()> {
    let mut ks = *chain;
    cipher.encrypt_block(ks.as_mut())?;
    xor_in_place(tail, ks.as_ref());
    ks.zeroize();
    Ok(())
}

struct CfbEncryptCore<C: BlockCipher> {
    cipher: C,
    chain: C::Block,
}

impl<C: BlockCipher> BlockProcessor for CfbEncryptCore<C> {
    const ALIGNED: bool = false;

    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()> {
        for block in blocks.chunks_exact_mut(C::block_size()) {
            self.cipher.encrypt_block(self.chain.as_mut())?;
            xor_in_place(block, self.chain.as_ref());
            self.chain.as_mut().copy_from_slice(block);
        }
        Ok(())
    }

    fn process_tail(&mut self, tail: &mut [u8]) -> Result<()> {
        keystream_tail(&self.cipher, &self.chain, tail)
    }
}

struct CfbDecryptCore<C: BlockCipher> {
    cipher: C,
    chain: C::Block,
}

impl<C: BlockCipher> BlockProcessor for CfbDecryptCore<C> {
    const ALIGNED: bool = false;

    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()> {
        let bs = C::block_size();
        let mut scratch = C::Batch::zeroed();

        for run in blocks.chunks_mut(C::Batch::LEN) {
            let n = run.len();
            let ks = &mut scratch.as_mut()[..n];
            ks[..bs].copy_from_slice(self.chain.as_ref());
            ks[bs..].copy_from_slice(&run[..n - bs]);
            self.chain.as_mut().copy_from_slice(&run[n - bs..]);

            self.cipher.encrypt_blocks(ks)?;
            xor_in_place(run, ks);
        }
        scratch.zeroize();
        Ok(())
    }

    fn process_tail(&mut self, tail: &mut [u8]) -> Result<()> {
        keystream_tail(&self.cipher, &self.chain, tail)
    }
}

macro_rules! cfb_mode {
    ($(#[$meta:meta])* $mode:ident, $core:ident, $suffix:expr) => {
        $(#[$meta])*
        pub struct $mode<C: BlockCipher> {
            core: $core<C>,
            engine: ChunkBuffer<C::Block>,
        }

        impl<C: BlockCipher> $mode<C> {
            /// Creates the mode keyed with `key`, feeding back from `iv`
            pub fn new(key: &C::Key, iv: &C::Block) -> Self {
                let () = CipherConformance::<C>::OK;
                let engine = ChunkBuffer::new(Self::canonical_name());
                debug!(mode = engine.name(), "mode initialised");
                Self {
                    core: $core {
                        cipher: C::new(key, Direction::Encrypt),
                        chain: *iv,
                    },
                    engine,
                }
            }

            /// Re-keys and re-arms from `params` (KEY and IV required)
            pub fn init(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
                let key = params::key::<C>(params)?;
                let iv = params::iv::<C>(params)?;
                self.core.cipher.set_key(&key, Direction::Encrypt);
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

            /// Writes the current feedback register into the IV slot
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

cfb_mode! {
    /// CFB encryption
    CfbEncryptor, CfbEncryptCore, CFB_ENC_SUFFIX
}

cfb_mode! {
    /// CFB decryption
    ///
    /// Keystream blocks are generated in batches of the cipher's
    /// `PARALLEL_NUM`; the output does not depend on the batch width.
    CfbDecryptor, CfbDecryptCore, CFB_DEC_SUFFIX
}
