//! Big-endian counter arithmetic over byte strings

/// Increment `counter` by one, treating the whole slice as a big-endian
/// unsigned integer.
///
/// The value wraps modulo 2^(8·len): an all-`0xFF` counter becomes all zero.
/// The carry walk does not short-circuit, so the running time depends only on
/// the slice length.
pub fn increment_be(counter: &mut [u8]) {
    let mut carry = 1u16;
    for byte in counter.iter_mut().rev() {
        let sum = *byte as u16 + carry;
        *byte = sum as u8;
        carry = sum >> 8;
    }
}
