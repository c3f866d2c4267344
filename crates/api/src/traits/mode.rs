//! Object-safe interface over streaming block cipher modes
//!
//! Concrete modes are generic over their block cipher and are normally used
//! directly. This trait exists for the boundaries that pick a mode by name at
//! run time and therefore need `Box<dyn CipherMode>`.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

use crate::params::{ParamKind, ParamSet, ParamSetMut};
use crate::Result;

/// A streaming cipher mode: keyed block cipher plus chaining discipline
///
/// The lifecycle is construction (or [`init`](Self::init)), zero or more
/// [`update`](Self::update) calls with arbitrarily sized chunks, and exactly
/// one [`do_final`](Self::do_final). The object is then exhausted until it is
/// re-armed with `set` or `init`.
///
/// Output produced is independent of how the input is split across calls.
pub trait CipherMode {
    /// Canonical display name, e.g. `"AES-128/CBC-ENC"`
    fn name(&self) -> &'static str;

    /// Block size of the underlying cipher in bytes
    fn block_size(&self) -> usize;

    /// Key length of the underlying cipher in bytes
    fn key_len(&self) -> usize;

    /// Number of bytes currently buffered, always below `block_size()`
    fn pending(&self) -> usize;

    /// Bytes the next `update` with `input_len` bytes of input will write
    fn update_len(&self, input_len: usize) -> usize;

    /// Bytes the next `do_final` with `input_len` bytes of input will write
    fn final_len(&self, input_len: usize) -> usize;

    /// Consume `input`, writing every completed block to `out`
    ///
    /// Returns the number of bytes written.
    fn update(&mut self, out: &mut [u8], input: &[u8]) -> Result<usize>;

    /// Consume `input` and flush the buffered tail
    ///
    /// Returns the number of bytes written.
    fn do_final(&mut self, out: &mut [u8], input: &[u8]) -> Result<usize>;

    /// Transform `data` in place; it must be block aligned and nothing may
    /// be buffered
    fn update_in_place(&mut self, data: &mut [u8]) -> Result<()>;

    /// Transform `data` in place and finish the message
    fn finish_in_place(&mut self, data: &mut [u8]) -> Result<()>;

    /// Re-key and re-arm from `params`; returns the kinds consumed
    fn init(&mut self, params: &ParamSet<'_>) -> Result<ParamKind>;

    /// Update parameters that can change under the current key; returns the
    /// kinds consumed
    fn set(&mut self, params: &ParamSet<'_>) -> Result<ParamKind>;

    /// Write current parameters into the provided slots; returns the kinds
    /// written
    fn get(&self, params: &mut ParamSetMut<'_>) -> Result<ParamKind>;

    /// Transform a whole message in one call
    #[cfg(feature = "alloc")]
    fn process(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.final_len(input.len())];
        let n = self.do_final(&mut out, input)?;
        out.truncate(n);
        Ok(out)
    }
}
