//! Electronic Codebook (ECB) mode
//!
//! Every block is transformed independently under the same key.
//!
//! # Security
//!
//! ECB leaks block-level equality: identical plaintext blocks produce
//! identical ciphertext blocks, and nothing diffuses across block
//! boundaries. It is provided for interoperability and as a building block,
//! not for protecting structured data.
//!
//! The message length must be a multiple of the block size. No padding is
//! applied; see [`crate::block::padding`].

use chunkcrypt_api::{ParamKind, ParamSet, ParamSetMut};
use chunkcrypt_params::utils::modes::{ECB_DEC_SUFFIX, ECB_ENC_SUFFIX};
use tracing::debug;

use super::engine::{BlockProcessor, ChunkBuffer};
use super::{params, BlockMode};
use crate::block::{BlockCipher, CipherConformance, Direction};
use crate::error::{Error, Result};

struct EcbCore<C: BlockCipher> {
    cipher: C,
}

impl<C: BlockCipher> BlockProcessor for EcbCore<C> {
    const ALIGNED: bool = true;

    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()> {
        match self.cipher.direction() {
            Direction::Encrypt => self.cipher.encrypt_blocks(blocks),
            Direction::Decrypt => self.cipher.decrypt_blocks(blocks),
        }
    }

    fn process_tail(&mut self, _tail: &mut [u8]) -> Result<()> {
        Err(Error::state("ECB", "partial final block"))
    }
}

macro_rules! ecb_mode {
    ($(#[$meta:meta])* $mode:ident, $direction:expr, $suffix:expr) => {
        $(#[$meta])*
        pub struct $mode<C: BlockCipher> {
            core: EcbCore<C>,
            engine: ChunkBuffer<C::Block>,
        }

        impl<C: BlockCipher> $mode<C> {
            /// Creates the mode keyed with `key`
            pub fn new(key: &C::Key) -> Self {
                let () = CipherConformance::<C>::OK;
                let engine = ChunkBuffer::new(Self::canonical_name());
                debug!(mode = engine.name(), "mode initialised");
                Self {
                    core: EcbCore {
                        cipher: C::new(key, $direction),
                    },
                    engine,
                }
            }

            /// Re-keys from `params` (KEY required) and starts a new message
            pub fn init(&mut self, params: &ParamSet<'_>) -> Result<ParamKind> {
                let key = params::key::<C>(params)?;
                self.core.cipher.set_key(&key, $direction);
                self.engine.rearm();
                debug!(mode = self.engine.name(), "mode re-keyed");
                Ok(Self::REQUIRED)
            }

            /// ECB has no parameters that change under a fixed key
            pub fn set(&mut self, _params: &ParamSet<'_>) -> Result<ParamKind> {
                Ok(ParamKind::empty())
            }

            /// ECB exposes no parameters
            pub fn get(&self, _params: &mut ParamSetMut<'_>) -> Result<ParamKind> {
                Ok(ParamKind::empty())
            }

            /// Discards buffered bytes and starts a new message
            pub fn reset(&mut self) {
                self.engine.rearm();
                debug!(mode = self.engine.name(), "mode reset");
            }
        }

        impl<C: BlockCipher> BlockMode for $mode<C> {
            type Cipher = C;
            const REQUIRED: ParamKind = ParamKind::KEY;
            const SUFFIX: &'static str = $suffix;

            fn from_params(params: &ParamSet<'_>) -> Result<Self> {
                Ok(Self::new(&params::key::<C>(params)?))
            }
        }

        impl_cipher_mode!($mode);
    };
}

ecb_mode! {
    /// ECB encryption
    EcbEncryptor, Direction::Encrypt, ECB_ENC_SUFFIX
}

ecb_mode! {
    /// ECB decryption
    EcbDecryptor, Direction::Decrypt, ECB_DEC_SUFFIX
}
