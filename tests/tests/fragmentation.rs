//! Output must not depend on how the input is split across `update` calls

use chunkcrypt_algorithms::block::modes::registry;
use chunkcrypt_api::{CipherMode, ParamSet};
use chunkcrypt_tests::run_chunked;
use proptest::prelude::*;

const ALIGNED: [&str; 4] = ["/ECB-ENC", "/ECB-DEC", "/CBC-ENC", "/CBC-DEC"];
const STREAMING: [&str; 4] = ["/CFB-ENC", "/CFB-DEC", "/OFB", "/CTR"];

fn create(name: &str, key: &[u8], iv: &[u8; 16]) -> Box<dyn CipherMode> {
    registry::create(name, &ParamSet::new().with_key(key).with_iv(iv))
        .unwrap()
        .0
}

fn one_shot(name: &str, key: &[u8], iv: &[u8; 16], data: &[u8]) -> Vec<u8> {
    create(name, key, iv).process(data).unwrap()
}

fn key_for(cipher: &str, seed: u8) -> Vec<u8> {
    let len = match cipher {
        "AES-128" | "SM4" => 16,
        "AES-192" => 24,
        _ => 32,
    };
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}

proptest! {
    #[test]
    fn streaming_modes_ignore_fragmentation(
        seed in any::<u8>(),
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..300),
        cuts in prop::collection::vec(0usize..300, 0..12),
    ) {
        for cipher in ["AES-128", "AES-192", "AES-256", "SM4"] {
            let key = key_for(cipher, seed);
            for suffix in STREAMING {
                let name = format!("{cipher}{suffix}");
                let whole = one_shot(&name, &key, &iv, &data);
                let mut mode = create(&name, &key, &iv);
                prop_assert_eq!(run_chunked(&mut *mode, &data, &cuts), whole);
            }
        }
    }

    #[test]
    fn aligned_modes_ignore_fragmentation(
        key in any::<[u8; 16]>(),
        iv in any::<[u8; 16]>(),
        blocks in 0usize..20,
        fill in any::<u8>(),
        cuts in prop::collection::vec(0usize..320, 0..12),
    ) {
        let data: Vec<u8> = (0..blocks * 16).map(|i| fill ^ (i as u8)).collect();
        for cipher in ["AES-128", "SM4"] {
            for suffix in ALIGNED {
                let name = format!("{cipher}{suffix}");
                let whole = one_shot(&name, &key, &iv, &data);
                let mut mode = create(&name, &key, &iv);
                prop_assert_eq!(run_chunked(&mut *mode, &data, &cuts), whole);
            }
        }
    }

    #[test]
    fn byte_at_a_time_matches_one_shot(
        iv in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..80),
    ) {
        let key = [0x5Cu8; 32];
        let cuts: Vec<usize> = (0..data.len()).collect();
        for suffix in STREAMING {
            let name = format!("AES-256{suffix}");
            let mut mode = create(&name, &key, &iv);
            prop_assert_eq!(
                run_chunked(&mut *mode, &data, &cuts),
                one_shot(&name, &key, &iv, &data)
            );
        }
    }
}

#[test]
fn update_output_is_whole_blocks_only() {
    let key = [7u8; 16];
    let iv = [9u8; 16];
    let mut mode = create("AES-128/CTR", &key, &iv);
    let mut out = [0u8; 64];

    assert_eq!(mode.update_len(15), 0);
    assert_eq!(mode.update(&mut out, &[0u8; 15]).unwrap(), 0);
    assert_eq!(mode.pending(), 15);

    assert_eq!(mode.update_len(1), 16);
    assert_eq!(mode.update(&mut out, &[0u8; 1]).unwrap(), 16);
    assert_eq!(mode.pending(), 0);

    assert_eq!(mode.final_len(5), 5);
    assert_eq!(mode.do_final(&mut out[16..], &[0u8; 5]).unwrap(), 5);
}
