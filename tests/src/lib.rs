//! Shared helpers for the chunkcrypt cross-crate test suites

use chunkcrypt_algorithms::block::{Aes128, BlockCipher, CipherAlgorithm, Direction};
use chunkcrypt_algorithms::error::Result;
use chunkcrypt_api::CipherMode;
use zeroize::Zeroize;

/// Constants for [`NarrowAes128`]
pub enum NarrowAes128Algorithm {}

impl CipherAlgorithm for NarrowAes128Algorithm {
    const NAME: &'static str = "AES-128-NARROW";
    const KEY_SIZE: usize = 16;
    const BLOCK_SIZE: usize = 16;
    const PARALLEL_NUM: usize = 1;
    const SECURITY_STRENGTH: usize = 128;
}

/// AES-128 restricted to a batch width of one block
///
/// Modes built on this cipher never take the batched path, so comparing
/// them with modes over [`Aes128`] checks that batching changes nothing.
#[derive(Clone, Zeroize)]
pub struct NarrowAes128 {
    inner: Aes128,
}

impl BlockCipher for NarrowAes128 {
    type Algorithm = NarrowAes128Algorithm;
    type Key = <Aes128 as BlockCipher>::Key;
    type Block = [u8; 16];
    type Batch = [u8; 16];

    fn new(key: &Self::Key, direction: Direction) -> Self {
        Self {
            inner: Aes128::new(key, direction),
        }
    }

    fn set_key(&mut self, key: &Self::Key, direction: Direction) {
        self.inner.set_key(key, direction);
    }

    fn direction(&self) -> Direction {
        self.inner.direction()
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        self.inner.encrypt_block(block)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        self.inner.decrypt_block(block)
    }
}

/// Splits `len` bytes at the given cut points, clamped and sorted
pub fn cut_points(len: usize, cuts: &[usize]) -> Vec<usize> {
    let mut points: Vec<usize> = cuts.iter().map(|&c| c.min(len)).collect();
    points.sort_unstable();
    points
}

/// Feeds `input` through `mode` in the chunks given by `cuts`, then
/// finalizes with an empty call
pub fn run_chunked<M: CipherMode + ?Sized>(mode: &mut M, input: &[u8], cuts: &[usize]) -> Vec<u8> {
    let mut out = vec![0u8; input.len()];
    let mut written = 0;
    let mut start = 0;
    for cut in cut_points(input.len(), cuts) {
        written += mode
            .update(&mut out[written..], &input[start..cut])
            .expect("update");
        assert!(mode.pending() < mode.block_size());
        start = cut;
    }
    written += mode
        .do_final(&mut out[written..], &input[start..])
        .expect("do_final");
    assert_eq!(written, input.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkcrypt_algorithms::block::conformance;
    use chunkcrypt_algorithms::SecretBytes;

    #[test]
    fn narrow_cipher_is_conformant() {
        conformance::check::<NarrowAes128>(&SecretBytes::new([0x2B; 16])).unwrap();
        assert_eq!(NarrowAes128::parallel_num(), 1);
    }

    #[test]
    fn cut_points_are_clamped_and_sorted() {
        assert_eq!(cut_points(10, &[12, 3, 7]), vec![3, 7, 10]);
        assert!(cut_points(0, &[]).is_empty());
    }
}
