//! AES block cipher implementations
//!
//! This module implements the Advanced Encryption Standard (AES) block cipher
//! as specified in FIPS 197.
//!
//! ## Constant-Time Guarantees
//!
//! - GF(2^8) arithmetic is branchless
//! - S-boxes are computed (inversion plus affine map), never looked up
//! - Memory access patterns do not depend on key or data
//!
//! ## Batching
//!
//! `encrypt_blocks`/`decrypt_blocks` interleave the rounds of up to
//! [`AES_PARALLEL_NUM`] blocks. The result is byte-identical to processing
//! the blocks one at a time.

use byteorder::{BigEndian, ByteOrder};
#[cfg(not(feature = "std"))]
use portable_atomic::{compiler_fence, Ordering};
#[cfg(feature = "std")]
use std::sync::atomic::{compiler_fence, Ordering};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{BlockCipher, CipherAlgorithm, Direction};
use crate::error::{validate, Result};
use crate::types::SecretBytes;
use chunkcrypt_params::utils::symmetric::{
    AES128_KEY_SIZE, AES128_SCHEDULE_SIZE, AES128_SECURITY_STRENGTH, AES192_KEY_SIZE,
    AES192_SCHEDULE_SIZE, AES192_SECURITY_STRENGTH, AES256_KEY_SIZE, AES256_SCHEDULE_SIZE,
    AES256_SECURITY_STRENGTH, AES_BATCH_SIZE, AES_BLOCK_SIZE, AES_PARALLEL_NUM,
};

/// Round constants for AES key expansion
const RCON: [u32; 11] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000,
    0x40000000, 0x80000000, 0x1b000000, 0x36000000,
];

/// Multiply two bytes in GF(2⁸) with AES's reduction poly x⁸ + x⁴ + x³ + x + 1
#[inline(always)]
fn gf_mul(a: u8, b: u8) -> u8 {
    let mut p = 0u8;
    let mut a = a;
    let mut b = b;
    for _ in 0..8 {
        let mask = (b & 1).wrapping_neg();
        p ^= a & mask;
        let carry = (a >> 7).wrapping_neg();
        a = (a << 1) ^ (carry & 0x1B);
        b >>= 1;
    }
    p
}

/// b⁻¹ in GF(2⁸) as b²⁵⁴, with 0 mapping to 0
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    // square-and-multiply over the fixed exponent 254 = 0b1111_1110
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);
    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    gf_mul(y, x2)
}

/// AES forward S-box: inv(x) ⊕ ROTL(inv(x),1–4) ⊕ 0x63
#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

/// AES inverse S-box: undo the affine map, then invert
#[inline(always)]
fn inv_sbox(x: u8) -> u8 {
    let y = x ^ 0x63;
    gf_inv(y.rotate_left(1) ^ y.rotate_left(3) ^ y.rotate_left(6))
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let b = word.to_be_bytes();
    u32::from_be_bytes([sbox(b[0]), sbox(b[1]), sbox(b[2]), sbox(b[3])])
}

/// FIPS 197 key expansion into `schedule`, whose length fixes the round count
fn expand_key(key: &[u8], schedule: &mut [u8]) {
    let nk = key.len() / 4;
    let total = schedule.len() / 4;
    let mut w = [0u32; AES256_SCHEDULE_SIZE / 4];

    for (i, word) in key.chunks_exact(4).enumerate() {
        w[i] = BigEndian::read_u32(word);
    }
    for i in nk..total {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }
    BigEndian::write_u32_into(&w[..total], schedule);
    w.zeroize();
}

#[inline(always)]
fn mul2(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7) * 0x1B)
}

fn add_round_key(state: &mut [u8], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key) {
        *s ^= *k;
    }
}

fn sub_bytes(state: &mut [u8]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
    compiler_fence(Ordering::SeqCst);
}

fn inv_sub_bytes(state: &mut [u8]) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
    compiler_fence(Ordering::SeqCst);
}

/// Row r of the column-major state rotates left by r
fn shift_rows(state: &mut [u8]) {
    let mut t = [0u8; AES_BLOCK_SIZE];
    t.copy_from_slice(state);
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = t[4 * ((c + r) % 4) + r];
        }
    }
}

fn inv_shift_rows(state: &mut [u8]) {
    let mut t = [0u8; AES_BLOCK_SIZE];
    t.copy_from_slice(state);
    for c in 0..4 {
        for r in 1..4 {
            state[4 * ((c + r) % 4) + r] = t[4 * c + r];
        }
    }
}

fn mix_columns(state: &mut [u8]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = mul2(s0) ^ mul2(s1) ^ s1 ^ s2 ^ s3;
        col[1] = s0 ^ mul2(s1) ^ mul2(s2) ^ s2 ^ s3;
        col[2] = s0 ^ s1 ^ mul2(s2) ^ mul2(s3) ^ s3;
        col[3] = mul2(s0) ^ s0 ^ s1 ^ s2 ^ mul2(s3);
    }
}

fn inv_mix_columns(state: &mut [u8]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = gf_mul(s0, 14) ^ gf_mul(s1, 11) ^ gf_mul(s2, 13) ^ gf_mul(s3, 9);
        col[1] = gf_mul(s0, 9) ^ gf_mul(s1, 14) ^ gf_mul(s2, 11) ^ gf_mul(s3, 13);
        col[2] = gf_mul(s0, 13) ^ gf_mul(s1, 9) ^ gf_mul(s2, 14) ^ gf_mul(s3, 11);
        col[3] = gf_mul(s0, 11) ^ gf_mul(s1, 13) ^ gf_mul(s2, 9) ^ gf_mul(s3, 14);
    }
}

/// Forward cipher over a run of whole blocks, rounds interleaved
///
/// `blocks` holds at most one batch; `round_keys` holds `rounds + 1` keys.
fn encrypt_run(blocks: &mut [u8], round_keys: &[u8]) {
    let rounds = round_keys.len() / AES_BLOCK_SIZE - 1;
    let key = |r: usize| &round_keys[r * AES_BLOCK_SIZE..(r + 1) * AES_BLOCK_SIZE];

    for state in blocks.chunks_exact_mut(AES_BLOCK_SIZE) {
        add_round_key(state, key(0));
    }
    for round in 1..rounds {
        for state in blocks.chunks_exact_mut(AES_BLOCK_SIZE) {
            sub_bytes(state);
            shift_rows(state);
            mix_columns(state);
            add_round_key(state, key(round));
        }
    }
    for state in blocks.chunks_exact_mut(AES_BLOCK_SIZE) {
        sub_bytes(state);
        shift_rows(state);
        add_round_key(state, key(rounds));
    }
}

/// Inverse cipher over a run of whole blocks, rounds interleaved
fn decrypt_run(blocks: &mut [u8], round_keys: &[u8]) {
    let rounds = round_keys.len() / AES_BLOCK_SIZE - 1;
    let key = |r: usize| &round_keys[r * AES_BLOCK_SIZE..(r + 1) * AES_BLOCK_SIZE];

    for state in blocks.chunks_exact_mut(AES_BLOCK_SIZE) {
        add_round_key(state, key(rounds));
    }
    for round in (1..rounds).rev() {
        for state in blocks.chunks_exact_mut(AES_BLOCK_SIZE) {
            inv_shift_rows(state);
            inv_sub_bytes(state);
            add_round_key(state, key(round));
            inv_mix_columns(state);
        }
    }
    for state in blocks.chunks_exact_mut(AES_BLOCK_SIZE) {
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, key(0));
    }
}

fn check_direction(keyed: Direction, wanted: Direction) -> Result<()> {
    validate::state(
        keyed == wanted,
        "AES",
        "key schedule prepared for the other direction",
    )
}

macro_rules! aes_cipher {
    (
        $(#[$meta:meta])*
        $cipher:ident, $algorithm:ident, $name:literal,
        key = $key_size:expr, schedule = $schedule_size:expr, strength = $strength:expr
    ) => {
        #[doc = concat!("Type-level constants for ", $name)]
        pub enum $algorithm {}

        impl CipherAlgorithm for $algorithm {
            const NAME: &'static str = $name;
            const KEY_SIZE: usize = $key_size;
            const BLOCK_SIZE: usize = AES_BLOCK_SIZE;
            const PARALLEL_NUM: usize = AES_PARALLEL_NUM;
            const SECURITY_STRENGTH: usize = $strength;
        }

        $(#[$meta])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $cipher {
            round_keys: [u8; $schedule_size],
            #[zeroize(skip)]
            direction: Direction,
        }

        impl BlockCipher for $cipher {
            type Algorithm = $algorithm;
            type Key = SecretBytes<$key_size>;
            type Block = [u8; AES_BLOCK_SIZE];
            type Batch = [u8; AES_BATCH_SIZE];

            fn new(key: &Self::Key, direction: Direction) -> Self {
                let mut round_keys = [0u8; $schedule_size];
                expand_key(key.as_ref(), &mut round_keys);
                Self {
                    round_keys,
                    direction,
                }
            }

            fn set_key(&mut self, key: &Self::Key, direction: Direction) {
                expand_key(key.as_ref(), &mut self.round_keys);
                self.direction = direction;
            }

            fn direction(&self) -> Direction {
                self.direction
            }

            fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
                validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;
                check_direction(self.direction, Direction::Encrypt)?;
                encrypt_run(block, &self.round_keys);
                Ok(())
            }

            fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
                validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;
                check_direction(self.direction, Direction::Decrypt)?;
                decrypt_run(block, &self.round_keys);
                Ok(())
            }

            fn encrypt_blocks(&self, blocks: &mut [u8]) -> Result<()> {
                validate::block_multiple("AES batch", blocks.len(), AES_BLOCK_SIZE)?;
                check_direction(self.direction, Direction::Encrypt)?;
                for run in blocks.chunks_mut(AES_BATCH_SIZE) {
                    encrypt_run(run, &self.round_keys);
                }
                Ok(())
            }

            fn decrypt_blocks(&self, blocks: &mut [u8]) -> Result<()> {
                validate::block_multiple("AES batch", blocks.len(), AES_BLOCK_SIZE)?;
                check_direction(self.direction, Direction::Decrypt)?;
                for run in blocks.chunks_mut(AES_BATCH_SIZE) {
                    decrypt_run(run, &self.round_keys);
                }
                Ok(())
            }
        }
    };
}

aes_cipher! {
    /// AES-128 block cipher (10 rounds)
    Aes128, Aes128Algorithm, "AES-128",
    key = AES128_KEY_SIZE, schedule = AES128_SCHEDULE_SIZE, strength = AES128_SECURITY_STRENGTH
}

aes_cipher! {
    /// AES-192 block cipher (12 rounds)
    Aes192, Aes192Algorithm, "AES-192",
    key = AES192_KEY_SIZE, schedule = AES192_SCHEDULE_SIZE, strength = AES192_SECURITY_STRENGTH
}

aes_cipher! {
    /// AES-256 block cipher (14 rounds)
    Aes256, Aes256Algorithm, "AES-256",
    key = AES256_KEY_SIZE, schedule = AES256_SCHEDULE_SIZE, strength = AES256_SECURITY_STRENGTH
}
