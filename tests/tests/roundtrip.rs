//! Decryption inverts encryption for every key size and mode

use chunkcrypt_algorithms::block::modes::registry;
use chunkcrypt_algorithms::block::padding::pkcs7;
use chunkcrypt_api::{CipherMode, ParamKind, ParamSet};
use chunkcrypt_params::utils::symmetric::{
    AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE, SM4_KEY_SIZE,
};
use proptest::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn roundtrip(cipher: &str, enc: &str, dec: &str, key: &[u8], iv: &[u8; 16], data: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let params = ParamSet::new().with_key(key).with_iv(iv);
    let (mut e, _) = registry::create(&format!("{cipher}{enc}"), &params).unwrap();
    let (mut d, _) = registry::create(&format!("{cipher}{dec}"), &params).unwrap();
    let ct = e.process(data).unwrap();
    let pt = d.process(&ct).unwrap();
    (ct, pt)
}

fn sized_key(len: usize, key: &[u8; 32]) -> &[u8] {
    &key[..len]
}

proptest! {
    #[test]
    fn streaming_modes_roundtrip_any_length(
        key in any::<[u8; 32]>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        for (cipher, len) in [("AES-128", 16), ("AES-192", 24), ("AES-256", 32), ("SM4", 16)] {
            let k = sized_key(len, &key);
            for (enc, dec) in [("/CFB-ENC", "/CFB-DEC"), ("/OFB", "/OFB"), ("/CTR", "/CTR")] {
                let (ct, pt) = roundtrip(cipher, enc, dec, k, &iv, &data);
                prop_assert_eq!(ct.len(), data.len());
                prop_assert_eq!(&pt, &data);
            }
        }
    }

    #[test]
    fn aligned_modes_roundtrip_with_padding(
        key in any::<[u8; 32]>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let padded = pkcs7::pad(&data, 16).unwrap();
        for (cipher, len) in [("AES-128", 16), ("AES-192", 24), ("AES-256", 32), ("SM4", 16)] {
            let k = sized_key(len, &key);
            for (enc, dec) in [("/ECB-ENC", "/ECB-DEC"), ("/CBC-ENC", "/CBC-DEC")] {
                let (ct, pt) = roundtrip(cipher, enc, dec, k, &iv, &padded);
                prop_assert_eq!(ct.len(), padded.len());
                prop_assert_eq!(pkcs7::unpad(&pt, 16).unwrap(), &data[..]);
            }
        }
    }
}

#[test]
fn misaligned_final_is_rejected_for_ecb_and_cbc() {
    let key = [1u8; 16];
    let iv = [2u8; 16];
    let params = ParamSet::new().with_key(&key).with_iv(&iv);
    for name in ["AES-128/ECB-ENC", "AES-128/ECB-DEC", "AES-128/CBC-ENC", "AES-128/CBC-DEC"] {
        let (mut mode, _) = registry::create(name, &params).unwrap();
        let mut out = [0u8; 32];
        assert_eq!(mode.update(&mut out, &[0u8; 20]).unwrap(), 16);
        assert!(matches!(
            mode.do_final(&mut out[16..], &[0u8; 3]),
            Err(chunkcrypt_api::Error::InvalidLength { .. })
        ));
    }
}

fn key_len(name: &str) -> usize {
    match name.split('/').next() {
        Some("AES-192") => AES192_KEY_SIZE,
        Some("AES-256") => AES256_KEY_SIZE,
        Some("SM4") => SM4_KEY_SIZE,
        _ => AES128_KEY_SIZE,
    }
}

#[test]
fn every_registered_name_roundtrips_random_keys() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5EED);
    let mut data = [0u8; 6 * AES_BLOCK_SIZE];
    rng.fill_bytes(&mut data);

    for name in registry::names() {
        if name.ends_with("-DEC") {
            continue;
        }
        let inverse = name.replace("-ENC", "-DEC");

        let mut key = vec![0u8; key_len(name)];
        let mut iv = [0u8; AES_BLOCK_SIZE];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut iv);
        let params = ParamSet::new().with_key(&key).with_iv(&iv);

        let (mut enc, _) = registry::create(name, &params).unwrap();
        let (mut dec, _) = registry::create(&inverse, &params).unwrap();
        assert_eq!(enc.key_len(), key.len(), "{name}");
        assert_eq!(enc.block_size(), AES_BLOCK_SIZE, "{name}");

        let ct = enc.process(&data).unwrap();
        assert_ne!(&ct[..], &data[..], "{name}");
        assert_eq!(dec.process(&ct).unwrap(), data, "{inverse}");
    }
}

#[test]
fn sm4_through_registry_matches_gbt_32907() {
    let key = hex::decode("0123456789abcdeffedcba9876543210").unwrap();
    let params = ParamSet::new().with_key(&key);

    let (mut enc, consumed) = registry::create("SM4/ECB-ENC", &params).unwrap();
    assert_eq!(consumed, ParamKind::KEY);
    let ct = enc.process(&key).unwrap();
    assert_eq!(hex::encode(&ct), "681edf34d206965e86b3e94f536e4246");

    let (mut dec, _) = registry::create("SM4/ECB-DEC", &params).unwrap();
    assert_eq!(dec.process(&ct).unwrap(), key);
}
