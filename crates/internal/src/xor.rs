//! XOR helpers for keystream and chaining operations

/// `dst[i] ^= src[i]` over the common prefix of the two slices
#[inline]
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}
