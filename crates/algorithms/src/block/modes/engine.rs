//! Chunked transform engine
//!
//! Turns a per-block transform into a byte-stream processor that accepts
//! input split at arbitrary points. Between calls at most `BLOCK_SIZE - 1`
//! bytes are held back; the moment the buffer would fill it is flushed
//! through the transform.
//!
//! Whole blocks are copied to the caller's output and transformed there in
//! place, so a mode only has to supply an in-place [`BlockProcessor`].

use tracing::{trace, warn};
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::types::ByteArray;

/// Per-block step and final-block policy supplied by a mode
pub(crate) trait BlockProcessor {
    /// Whether the total message length must be a whole number of blocks
    const ALIGNED: bool;

    /// Transform whole blocks in place, advancing the chaining state
    fn process_blocks(&mut self, blocks: &mut [u8]) -> Result<()>;

    /// Transform a trailing partial block in place (`0 < len < BLOCK_SIZE`)
    ///
    /// Never called when `ALIGNED` is set.
    fn process_tail(&mut self, tail: &mut [u8]) -> Result<()>;
}

/// Leftover buffer plus lifecycle flag shared by every mode
pub(crate) struct ChunkBuffer<B: ByteArray> {
    name: &'static str,
    buf: B,
    len: usize,
    finished: bool,
}

impl<B: ByteArray> ChunkBuffer<B> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            buf: B::zeroed(),
            len: 0,
            finished: false,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn pending(&self) -> usize {
        self.len
    }

    pub(crate) fn update_len(&self, input_len: usize) -> usize {
        (self.len + input_len) / B::LEN * B::LEN
    }

    pub(crate) fn final_len(&self, input_len: usize) -> usize {
        self.len + input_len
    }

    /// Drop buffered bytes and accept a new message
    pub(crate) fn rearm(&mut self) {
        self.buf.zeroize();
        self.len = 0;
        self.finished = false;
    }

    fn ensure_live(&self) -> Result<()> {
        validate::state(
            !self.finished,
            self.name,
            "message already finished; reset before reuse",
        )
    }

    fn ensure_unbuffered(&self) -> Result<()> {
        validate::state(
            self.len == 0,
            self.name,
            "in-place processing needs an empty leftover buffer",
        )
    }

    fn ensure_aligned<P: BlockProcessor>(&self, context: &'static str, total: usize) -> Result<()> {
        if P::ALIGNED && total % B::LEN != 0 {
            warn!(mode = self.name, total, "final input is not block aligned");
            return validate::block_multiple(context, total, B::LEN);
        }
        Ok(())
    }

    pub(crate) fn update<P: BlockProcessor>(
        &mut self,
        processor: &mut P,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize> {
        self.ensure_live()?;
        validate::min_length("output buffer", out.len(), self.update_len(input.len()))?;
        self.absorb(processor, out, input)
    }

    pub(crate) fn finish<P: BlockProcessor>(
        &mut self,
        processor: &mut P,
        out: &mut [u8],
        input: &[u8],
    ) -> Result<usize> {
        self.ensure_live()?;
        let total = self.final_len(input.len());
        self.ensure_aligned::<P>("final input", total)?;
        validate::min_length("output buffer", out.len(), total)?;

        // the tail lands right after whatever this call's update step wrote,
        // which is offset 0 when `input` is empty
        let written = self.absorb(processor, out, input)?;
        let tail = self.len;
        if tail > 0 {
            let dst = &mut out[written..written + tail];
            dst.copy_from_slice(&self.buf.as_ref()[..tail]);
            processor.process_tail(dst)?;
        }

        self.buf.zeroize();
        self.len = 0;
        self.finished = true;
        trace!(mode = self.name, written, tail, "message finished");
        Ok(written + tail)
    }

    pub(crate) fn update_in_place<P: BlockProcessor>(
        &mut self,
        processor: &mut P,
        data: &mut [u8],
    ) -> Result<()> {
        self.ensure_live()?;
        self.ensure_unbuffered()?;
        validate::block_multiple("in-place update", data.len(), B::LEN)?;
        processor.process_blocks(data)
    }

    pub(crate) fn finish_in_place<P: BlockProcessor>(
        &mut self,
        processor: &mut P,
        data: &mut [u8],
    ) -> Result<()> {
        self.ensure_live()?;
        self.ensure_unbuffered()?;
        self.ensure_aligned::<P>("in-place final", data.len())?;

        let whole = data.len() / B::LEN * B::LEN;
        let (blocks, tail) = data.split_at_mut(whole);
        processor.process_blocks(blocks)?;
        if !tail.is_empty() {
            processor.process_tail(tail)?;
        }

        self.finished = true;
        trace!(mode = self.name, len = whole + tail.len(), "message finished in place");
        Ok(())
    }

    /// Buffer `input`, writing every completed block to `out`
    fn absorb<P: BlockProcessor>(
        &mut self,
        processor: &mut P,
        out: &mut [u8],
        mut input: &[u8],
    ) -> Result<usize> {
        let bs = B::LEN;
        let mut written = 0;

        if self.len > 0 {
            let need = bs - self.len;
            if input.len() < need {
                self.buf.as_mut()[self.len..self.len + input.len()].copy_from_slice(input);
                self.len += input.len();
                return Ok(0);
            }
            self.buf.as_mut()[self.len..].copy_from_slice(&input[..need]);
            input = &input[need..];

            let dst = &mut out[..bs];
            dst.copy_from_slice(self.buf.as_ref());
            self.len = 0;
            processor.process_blocks(dst)?;
            written = bs;
        }

        let whole = input.len() / bs * bs;
        if whole > 0 {
            let dst = &mut out[written..written + whole];
            dst.copy_from_slice(&input[..whole]);
            processor.process_blocks(dst)?;
            written += whole;
        }

        let rest = &input[whole..];
        self.buf.as_mut()[..rest.len()].copy_from_slice(rest);
        self.len = rest.len();
        Ok(written)
    }
}

impl<B: ByteArray> Drop for ChunkBuffer<B> {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}
