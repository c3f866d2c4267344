//! NIST SP 800-38A AES-128 vectors (appendix F) shared by the mode tests

use crate::block::{Aes128, BlockCipher};
use crate::types::KeyBytes;

pub const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
pub const IV: &str = "000102030405060708090a0b0c0d0e0f";
pub const CTR_INIT: &str = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";

pub const PLAINTEXT: &str = concat!(
    "6bc1bee22e409f96e93d7e117393172a",
    "ae2d8a571e03ac9c9eb76fac45af8e51",
    "30c81c46a35ce411e5fbc1191a0a52ef",
    "f69f2445df4f9b17ad2b417be66c3710",
);

pub const ECB: &str = concat!(
    "3ad77bb40d7a3660a89ecaf32466ef97",
    "f5d3d58503b9699de785895a96fdbaaf",
    "43b1cd7f598ece23881b00e3ed030688",
    "7b0c785e27e8ad3f8223207104725dd4",
);

pub const CBC: &str = concat!(
    "7649abac8119b246cee98e9b12e9197d",
    "5086cb9b507219ee95db113a917678b2",
    "73bed6b8e3c1743b7116e69e22229516",
    "3ff1caa1681fac09120eca307586e1a7",
);

pub const CFB: &str = concat!(
    "3b3fd92eb72dad20333449f8e83cfb4a",
    "c8a64537a0b3a93fcde3cdad9f1ce58b",
    "26751f67a3cbb140b1808cf187a4f4df",
    "c04b05357c5d1c0eeac4c66f9ff7f2e6",
);

pub const OFB: &str = concat!(
    "3b3fd92eb72dad20333449f8e83cfb4a",
    "7789508d16918f03f53c52dac54ed825",
    "9740051e9c5fecf64344f7a82260edcc",
    "304c6528f659c77866a510d9c1d6ae5e",
);

pub const CTR: &str = concat!(
    "874d6191b620e3261bef6864990db6ce",
    "9806f66b7970fdff8617187bb9fffdff",
    "5ae4df3edbd5d35e5b4f09020db03eab",
    "1e031dda2fbe03d1792170a0f3009cee",
);

pub fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

pub fn key() -> <Aes128 as BlockCipher>::Key {
    KeyBytes::from_slice(&bytes(KEY)).unwrap()
}

pub fn block(hex_str: &str) -> [u8; 16] {
    bytes(hex_str).try_into().unwrap()
}

/// Feed `input` through `mode` in chunks of the given sizes (cycled), then
/// finish with an empty final call
pub fn chunked<M: chunkcrypt_api::CipherMode>(mode: &mut M, input: &[u8], sizes: &[usize]) -> Vec<u8> {
    let mut out = vec![0u8; input.len() + mode.block_size()];
    let mut written = 0;
    let mut pos = 0;
    for size in sizes.iter().cycle() {
        if pos >= input.len() {
            break;
        }
        let end = (pos + size).min(input.len());
        written += mode.update(&mut out[written..], &input[pos..end]).unwrap();
        pos = end;
    }
    written += mode.do_final(&mut out[written..], &[]).unwrap();
    out.truncate(written);
    out
}
