//! Ciphertext tampering, block-level leakage and keystream properties

use chunkcrypt_algorithms::block::{BlockCipher, Direction};
use chunkcrypt_algorithms::{
    Aes128, CbcDecryptor, CbcEncryptor, CfbDecryptor, CfbEncryptor, Ctr, EcbEncryptor,
    SecretBytes,
};
use chunkcrypt_api::CipherMode;
use proptest::prelude::*;

const BLOCKS: usize = 6;

/// Indices of the 16-byte blocks where `a` and `b` differ
fn differing_blocks(a: &[u8], b: &[u8]) -> Vec<usize> {
    a.chunks(16)
        .zip(b.chunks(16))
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    #[test]
    fn cbc_bit_flip_corrupts_two_blocks(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        pt in prop::collection::vec(any::<u8>(), BLOCKS * 16),
        block in 0usize..BLOCKS - 1,
        bit in 0usize..128,
    ) {
        let key = SecretBytes::new(key);
        let mut ct = CbcEncryptor::<Aes128>::new(&key, &iv).process(&pt).unwrap();
        let pos = block * 16 + bit / 8;
        ct[pos] ^= 1 << (bit % 8);

        let recovered = CbcDecryptor::<Aes128>::new(&key, &iv).process(&ct).unwrap();
        prop_assert_eq!(differing_blocks(&pt, &recovered), vec![block, block + 1]);
        // the following block differs in exactly the flipped bit
        let next = pos + 16;
        prop_assert_eq!(recovered[next] ^ pt[next], 1 << (bit % 8));
        let mut rest = recovered[(block + 1) * 16..(block + 2) * 16].to_vec();
        rest[bit / 8] ^= 1 << (bit % 8);
        prop_assert_eq!(&rest[..], &pt[(block + 1) * 16..(block + 2) * 16]);
    }

    #[test]
    fn cfb_bit_flip_corrupts_two_blocks(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        pt in prop::collection::vec(any::<u8>(), BLOCKS * 16),
        block in 0usize..BLOCKS - 1,
        bit in 0usize..128,
    ) {
        let key = SecretBytes::new(key);
        let mut ct = CfbEncryptor::<Aes128>::new(&key, &iv).process(&pt).unwrap();
        let pos = block * 16 + bit / 8;
        ct[pos] ^= 1 << (bit % 8);

        let recovered = CfbDecryptor::<Aes128>::new(&key, &iv).process(&ct).unwrap();
        prop_assert_eq!(differing_blocks(&pt, &recovered), vec![block, block + 1]);
        // in CFB the flipped bit lands in the same block
        prop_assert_eq!(recovered[pos] ^ pt[pos], 1 << (bit % 8));
    }

    #[test]
    fn ecb_repeats_identical_blocks(
        key in any::<[u8; 16]>(),
        block in any::<[u8; 16]>(),
    ) {
        let key = SecretBytes::new(key);
        let mut pt = block.to_vec();
        pt.extend_from_slice(&block);
        let ct = EcbEncryptor::<Aes128>::new(&key).process(&pt).unwrap();
        prop_assert_eq!(&ct[..16], &ct[16..]);
    }

    #[test]
    fn ctr_keystream_is_deterministic(
        key in any::<[u8; 16]>(),
        counter in any::<[u8; 16]>(),
        len in 0usize..300,
    ) {
        let key = SecretBytes::new(key);
        let zeros = vec![0u8; len];
        let a = Ctr::<Aes128>::new(&key, &counter).process(&zeros).unwrap();
        let b = Ctr::<Aes128>::new(&key, &counter).process(&zeros).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn ctr_33_zero_bytes_use_counters_zero_one_two() {
    let key = SecretBytes::new([0u8; 16]);
    let ct = Ctr::<Aes128>::new(&key, &[0u8; 16]).process(&[0u8; 33]).unwrap();

    let cipher = Aes128::new(&key, Direction::Encrypt);
    let mut keystream = Vec::new();
    for i in 0..3u8 {
        let mut counter = [0u8; 16];
        counter[15] = i;
        cipher.encrypt_block(&mut counter).unwrap();
        keystream.extend_from_slice(&counter);
    }
    assert_eq!(ct, keystream[..33]);
}
