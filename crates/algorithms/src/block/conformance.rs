//! Run-time conformance check for block cipher implementations
//!
//! [`CipherConformance`](super::CipherConformance) catches mismatched
//! constants at compile time. [`check`] exercises a keyed instance and
//! confirms the behavioural half of the contract: a batched call equals the
//! concatenation of single-block calls, and decryption inverts encryption.

use super::{BlockCipher, CipherConformance, Direction};
use crate::error::{validate, Result};
use crate::types::ByteArray;

/// Verify that `C` keyed with `key` honours the block cipher contract
pub fn check<C: BlockCipher>(key: &C::Key) -> Result<()> {
    let () = CipherConformance::<C>::OK;

    let enc = C::new(key, Direction::Encrypt);
    let dec = C::new(key, Direction::Decrypt);
    validate::state(
        enc.direction() == Direction::Encrypt && dec.direction() == Direction::Decrypt,
        C::name(),
        "cipher does not report the direction it was keyed for",
    )?;

    let mut plain = C::Batch::zeroed();
    for (i, b) in plain.as_mut().iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(31).wrapping_add(7);
    }

    let mut batched = plain;
    enc.encrypt_blocks(batched.as_mut())?;
    let mut single = plain;
    for block in single.as_mut().chunks_exact_mut(C::block_size()) {
        enc.encrypt_block(block)?;
    }
    validate::parameter(
        batched.as_ref() == single.as_ref(),
        C::name(),
        "batched encryption differs from single-block encryption",
    )?;
    validate::parameter(
        batched.as_ref() != plain.as_ref(),
        C::name(),
        "encryption left the input unchanged",
    )?;

    dec.decrypt_blocks(batched.as_mut())?;
    for block in single.as_mut().chunks_exact_mut(C::block_size()) {
        dec.decrypt_block(block)?;
    }
    validate::parameter(
        batched.as_ref() == single.as_ref(),
        C::name(),
        "batched decryption differs from single-block decryption",
    )?;
    validate::parameter(
        batched.as_ref() == plain.as_ref(),
        C::name(),
        "decryption does not invert encryption",
    )?;

    Ok(())
}
