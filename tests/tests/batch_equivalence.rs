//! Batched cipher calls must not change any mode's output

use chunkcrypt_algorithms::{
    Aes128, CbcDecryptor, CbcEncryptor, CfbDecryptor, CfbEncryptor, Ctr, EcbDecryptor,
    EcbEncryptor, Ofb, SecretBytes,
};
use chunkcrypt_api::CipherMode;
use chunkcrypt_tests::{run_chunked, NarrowAes128};
use proptest::prelude::*;

proptest! {
    #[test]
    fn streaming_modes_match_single_block_cipher(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..400),
        cuts in prop::collection::vec(0usize..400, 0..6),
    ) {
        let key = SecretBytes::new(key);

        let wide = CfbEncryptor::<Aes128>::new(&key, &iv).process(&data).unwrap();
        let mut narrow = CfbEncryptor::<NarrowAes128>::new(&key, &iv);
        prop_assert_eq!(run_chunked(&mut narrow, &data, &cuts), wide.clone());

        let wide = CfbDecryptor::<Aes128>::new(&key, &iv).process(&data).unwrap();
        let narrow = CfbDecryptor::<NarrowAes128>::new(&key, &iv).process(&data).unwrap();
        prop_assert_eq!(narrow, wide);

        let wide = Ofb::<Aes128>::new(&key, &iv).process(&data).unwrap();
        let narrow = Ofb::<NarrowAes128>::new(&key, &iv).process(&data).unwrap();
        prop_assert_eq!(narrow, wide);

        let wide = Ctr::<Aes128>::new(&key, &iv).process(&data).unwrap();
        let mut narrow = Ctr::<NarrowAes128>::new(&key, &iv);
        prop_assert_eq!(run_chunked(&mut narrow, &data, &cuts), wide);
    }

    #[test]
    fn aligned_modes_match_single_block_cipher(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        blocks in 0usize..25,
        seed in any::<u8>(),
    ) {
        let key = SecretBytes::new(key);
        let data: Vec<u8> = (0..blocks * 16).map(|i| seed.wrapping_mul(i as u8 | 1)).collect();

        let wide = EcbEncryptor::<Aes128>::new(&key).process(&data).unwrap();
        prop_assert_eq!(EcbEncryptor::<NarrowAes128>::new(&key).process(&data).unwrap(), wide.clone());
        prop_assert_eq!(EcbDecryptor::<NarrowAes128>::new(&key).process(&wide).unwrap(), data.clone());

        let wide = CbcEncryptor::<Aes128>::new(&key, &iv).process(&data).unwrap();
        prop_assert_eq!(CbcEncryptor::<NarrowAes128>::new(&key, &iv).process(&data).unwrap(), wide.clone());

        let wide_pt = CbcDecryptor::<Aes128>::new(&key, &iv).process(&wide).unwrap();
        let narrow_pt = CbcDecryptor::<NarrowAes128>::new(&key, &iv).process(&wide).unwrap();
        prop_assert_eq!(&wide_pt, &data);
        prop_assert_eq!(narrow_pt, wide_pt);
    }
}

#[test]
fn narrow_names_use_their_own_cipher_name() {
    let key = SecretBytes::new([0u8; 16]);
    assert_eq!(Ctr::<NarrowAes128>::new(&key, &[0u8; 16]).name(), "AES-128-NARROW/CTR");
    assert_eq!(Ctr::<Aes128>::new(&key, &[0u8; 16]).name(), "AES-128/CTR");
}
