//! Finalizing with no new input flushes exactly the buffered bytes

use chunkcrypt_algorithms::block::modes::registry;
use chunkcrypt_api::{CipherMode, ParamSet};

fn create(name: &str) -> Box<dyn CipherMode> {
    let key = [0x11u8; 16];
    let iv = [0x22u8; 16];
    registry::create(name, &ParamSet::new().with_key(&key).with_iv(&iv))
        .unwrap()
        .0
}

#[test]
fn empty_message_produces_empty_output() {
    for suffix in ["/ECB-ENC", "/CBC-DEC", "/CFB-ENC", "/OFB", "/CTR"] {
        let mut mode = create(&format!("AES-128{suffix}"));
        assert_eq!(mode.final_len(0), 0);
        assert_eq!(mode.do_final(&mut [], &[]).unwrap(), 0);
    }
}

#[test]
fn leftover_is_written_at_start_of_final_output() {
    let data: Vec<u8> = (0..21).collect();
    for suffix in ["/CFB-ENC", "/CFB-DEC", "/OFB", "/CTR"] {
        let name = format!("AES-128{suffix}");
        let expected = create(&name).process(&data).unwrap();

        let mut mode = create(&name);
        let mut head = [0u8; 16];
        assert_eq!(mode.update(&mut head, &data).unwrap(), 16);
        assert_eq!(mode.pending(), 5);

        let mut tail = [0xAAu8; 8];
        assert_eq!(mode.do_final(&mut tail, &[]).unwrap(), 5);
        assert_eq!(head[..], expected[..16]);
        assert_eq!(tail[..5], expected[16..]);
        assert_eq!(tail[5..], [0xAA; 3]);
    }
}

#[test]
fn aligned_modes_finish_cleanly_after_whole_blocks() {
    let data = [0x33u8; 48];
    for suffix in ["/ECB-ENC", "/ECB-DEC", "/CBC-ENC", "/CBC-DEC"] {
        let name = format!("AES-128{suffix}");
        let expected = create(&name).process(&data).unwrap();

        let mut mode = create(&name);
        let mut out = [0u8; 48];
        assert_eq!(mode.update(&mut out, &data).unwrap(), 48);
        assert_eq!(mode.do_final(&mut [], &[]).unwrap(), 0);
        assert_eq!(out[..], expected[..]);
    }
}

#[test]
fn finished_mode_rejects_further_input_until_reinitialised() {
    let key = [0x11u8; 16];
    let iv = [0x44u8; 16];
    let mut mode = create("AES-128/CBC-ENC");
    mode.process(&[0u8; 16]).unwrap();

    let mut out = [0u8; 16];
    assert!(matches!(
        mode.update(&mut out, &[0u8; 16]),
        Err(chunkcrypt_api::Error::InvalidState { .. })
    ));

    mode.init(&ParamSet::new().with_key(&key).with_iv(&iv)).unwrap();
    assert_eq!(mode.update(&mut out, &[0u8; 16]).unwrap(), 16);
}
