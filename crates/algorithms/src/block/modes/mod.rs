//! Block cipher modes of operation
//!
//! Five confidentiality modes from NIST SP 800-38A, each generic over a
//! [`BlockCipher`] and built on the shared chunked transform engine:
//!
//! | Mode | Types | Final block |
//! |------|-------|-------------|
//! | ECB  | [`EcbEncryptor`], [`EcbDecryptor`] | message must be block aligned |
//! | CBC  | [`CbcEncryptor`], [`CbcDecryptor`] | message must be block aligned |
//! | CFB  | [`CfbEncryptor`], [`CfbDecryptor`] | partial block allowed |
//! | OFB  | [`Ofb`] | partial block allowed |
//! | CTR  | [`Ctr`] | partial block allowed |
//!
//! The streaming operations (`update`, `do_final`, in-place variants) come
//! from [`CipherMode`]. None of the modes pad, authenticate or embed the IV in
//! their output.

use chunkcrypt_api::{CipherMode, ParamKind, ParamSet};

use crate::block::BlockCipher;
use crate::error::Result;

/// Implements the object-safe [`CipherMode`] for a mode type with `core`
/// and `engine` fields and inherent `init`/`set`/`get`.
macro_rules! impl_cipher_mode {
    ($mode:ident) => {
        impl<C: $crate::block::BlockCipher> chunkcrypt_api::CipherMode for $mode<C> {
            fn name(&self) -> &'static str {
                self.engine.name()
            }

            fn block_size(&self) -> usize {
                C::block_size()
            }

            fn key_len(&self) -> usize {
                C::key_size()
            }

            fn pending(&self) -> usize {
                self.engine.pending()
            }

            fn update_len(&self, input_len: usize) -> usize {
                self.engine.update_len(input_len)
            }

            fn final_len(&self, input_len: usize) -> usize {
                self.engine.final_len(input_len)
            }

            fn update(&mut self, out: &mut [u8], input: &[u8]) -> chunkcrypt_api::Result<usize> {
                Ok(self.engine.update(&mut self.core, out, input)?)
            }

            fn do_final(&mut self, out: &mut [u8], input: &[u8]) -> chunkcrypt_api::Result<usize> {
                Ok(self.engine.finish(&mut self.core, out, input)?)
            }

            fn update_in_place(&mut self, data: &mut [u8]) -> chunkcrypt_api::Result<()> {
                Ok(self.engine.update_in_place(&mut self.core, data)?)
            }

            fn finish_in_place(&mut self, data: &mut [u8]) -> chunkcrypt_api::Result<()> {
                Ok(self.engine.finish_in_place(&mut self.core, data)?)
            }

            fn init(
                &mut self,
                params: &chunkcrypt_api::ParamSet<'_>,
            ) -> chunkcrypt_api::Result<chunkcrypt_api::ParamKind> {
                Ok($mode::init(self, params)?)
            }

            fn set(
                &mut self,
                params: &chunkcrypt_api::ParamSet<'_>,
            ) -> chunkcrypt_api::Result<chunkcrypt_api::ParamKind> {
                Ok($mode::set(self, params)?)
            }

            fn get(
                &self,
                params: &mut chunkcrypt_api::ParamSetMut<'_>,
            ) -> chunkcrypt_api::Result<chunkcrypt_api::ParamKind> {
                Ok($mode::get(self, params)?)
            }
        }
    };
}

pub(crate) mod engine;
pub(crate) mod params;
#[cfg(test)]
pub(crate) mod vectors;

pub mod cbc;
pub mod cfb;
pub mod ctr;
pub mod ecb;
pub mod name;
pub mod ofb;
#[cfg(feature = "std")]
pub mod registry;

pub use cbc::{CbcDecryptor, CbcEncryptor};
pub use cfb::{CfbDecryptor, CfbEncryptor};
pub use ctr::{Ctr, CtrDecryptor, CtrEncryptor};
pub use ecb::{EcbDecryptor, EcbEncryptor};
pub use ofb::{Ofb, OfbDecryptor, OfbEncryptor};

/// A concrete mode bound to a block cipher type
pub trait BlockMode: CipherMode + Sized {
    /// The underlying block cipher
    type Cipher: BlockCipher;

    /// Parameter kinds `init` requires and consumes
    const REQUIRED: ParamKind;

    /// Suffix appended to the cipher name, e.g. `"/CBC-ENC"`
    const SUFFIX: &'static str;

    /// Canonical composite name, e.g. `"AES-128/CBC-ENC"`
    fn canonical_name() -> &'static str {
        name::composite(<Self::Cipher as BlockCipher>::name(), Self::SUFFIX)
    }

    /// Construct from a parameter set holding at least [`Self::REQUIRED`]
    fn from_params(params: &ParamSet<'_>) -> Result<Self>;
}
