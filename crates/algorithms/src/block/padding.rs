//! Padding helpers for the modes that require block-aligned input
//!
//! No mode applies padding on its own. Callers that need to encrypt
//! arbitrary-length messages under ECB or CBC pad before `do_final` and
//! unpad after decryption.

/// PKCS#7 padding (RFC 5652, section 6.3)
pub mod pkcs7 {
    use alloc::vec::Vec;

    use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

    use crate::error::{validate, Error, Result};

    fn check_block_size(block_size: usize) -> Result<()> {
        validate::parameter(
            (1..=255).contains(&block_size),
            "block_size",
            "must be between 1 and 255",
        )
    }

    /// Copies `data` and appends 1..=`block_size` bytes, each holding the
    /// pad length
    ///
    /// A block-aligned input gains a full block of padding.
    pub fn pad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
        check_block_size(block_size)?;
        let pad_len = block_size - data.len() % block_size;
        let mut out = Vec::with_capacity(data.len() + pad_len);
        out.extend_from_slice(data);
        out.resize(data.len() + pad_len, pad_len as u8);
        Ok(out)
    }

    /// Strips and checks the padding added by [`pad`]
    ///
    /// The whole final block is examined regardless of the pad value, so
    /// the time taken does not depend on where the padding starts.
    pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8]> {
        check_block_size(block_size)?;
        validate::parameter(!data.is_empty(), "padded data", "must not be empty")?;
        validate::block_multiple("padded data", data.len(), block_size)?;

        let last_block = &data[data.len() - block_size..];
        let pad = last_block[block_size - 1];

        let mut valid = !pad.ct_eq(&0) & !pad.ct_gt(&(block_size as u8));
        for (i, &b) in last_block.iter().rev().enumerate() {
            let in_pad: Choice = (i as u8).ct_lt(&pad);
            valid &= !in_pad | b.ct_eq(&pad);
        }

        if bool::from(valid) {
            Ok(&data[..data.len() - pad as usize])
        } else {
            Err(Error::param("padding", "invalid PKCS#7 padding"))
        }
    }

}
