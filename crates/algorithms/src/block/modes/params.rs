//! Parameter protocol helpers shared by the modes

use chunkcrypt_api::{ParamKind, ParamSet, ParamSetMut};
use chunkcrypt_internal::constant_time::ct_eq;
use tracing::warn;
use zeroize::Zeroize;

use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};
use crate::types::{ByteArray, KeyBytes};

fn required<'a>(params: &ParamSet<'a>, kind: ParamKind, len: usize) -> Result<&'a [u8]> {
    let value = params
        .get(kind)
        .ok_or_else(|| Error::param(kind.label(), "required parameter is missing"))?;
    validate::parameter(value.len() == len, kind.label(), "parameter has the wrong length")?;
    Ok(value)
}

/// The key, present and exactly `KEY_SIZE` bytes
pub(crate) fn key<C: BlockCipher>(params: &ParamSet<'_>) -> Result<C::Key> {
    let bytes = required(params, ParamKind::KEY, C::key_size())?;
    <C::Key as KeyBytes>::from_slice(bytes)
}

/// The IV, present and exactly `BLOCK_SIZE` bytes
pub(crate) fn iv<C: BlockCipher>(params: &ParamSet<'_>) -> Result<C::Block> {
    let bytes = required(params, ParamKind::IV, C::block_size())?;
    <C::Block as ByteArray>::from_slice("iv", bytes)
}

/// The IV if one was supplied; a supplied IV must still have the right length
pub(crate) fn optional_iv<C: BlockCipher>(params: &ParamSet<'_>) -> Result<Option<C::Block>> {
    match params.get(ParamKind::IV) {
        Some(_) => iv::<C>(params).map(Some),
        None => Ok(None),
    }
}

/// Copy `value` into the IV slot if the caller provided one
pub(crate) fn write_iv(params: &mut ParamSetMut<'_>, value: &[u8]) -> Result<ParamKind> {
    match params.slot_mut(ParamKind::IV) {
        Some(slot) => {
            validate::parameter(
                slot.len() == value.len(),
                "iv",
                "output slot has the wrong length",
            )?;
            slot.copy_from_slice(value);
            Ok(ParamKind::IV)
        }
        None => Ok(ParamKind::empty()),
    }
}

/// Remembers the key and starting value a keystream mode was last armed with
///
/// Re-arming with the same value under the same key would replay the
/// keystream, so [`ReuseGuard::rearm`] and [`ReuseGuard::rekey`] refuse it.
pub(crate) struct ReuseGuard<K: KeyBytes, B: ByteArray> {
    key: K,
    last: B,
}

impl<K: KeyBytes, B: ByteArray> ReuseGuard<K, B> {
    pub(crate) fn new(key: &K, start: &B) -> Self {
        Self {
            key: key.clone(),
            last: *start,
        }
    }

    /// Record `key` and `start` for a fresh init
    ///
    /// Under an unchanged key this is a re-arm and a repeated `start` is
    /// rejected. Nothing is recorded on failure.
    pub(crate) fn rekey(&mut self, name: &'static str, key: &K, start: &B) -> Result<()> {
        if ct_eq(self.key.as_ref(), key.as_ref()) {
            return self.rearm(name, start);
        }
        self.key.zeroize();
        self.key = key.clone();
        self.last = *start;
        Ok(())
    }

    /// Record `start` under the current key, rejecting a repeat
    pub(crate) fn rearm(&mut self, name: &'static str, start: &B) -> Result<()> {
        if ct_eq(self.last.as_ref(), start.as_ref()) {
            warn!(mode = name, "starting value reused under the same key");
            return Err(Error::param("iv", "starting value reused under the same key"));
        }
        self.last = *start;
        Ok(())
    }
}

impl<K: KeyBytes, B: ByteArray> Drop for ReuseGuard<K, B> {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
