//! Constants for symmetric block ciphers

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;

/// AES-192 key size in bytes
pub const AES192_KEY_SIZE: usize = 24;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// Number of AES blocks handed to one batched encrypt/decrypt call.
///
/// A throughput hint only; the modes produce identical output for any width.
pub const AES_PARALLEL_NUM: usize = 8;

/// Bytes of scratch a mode needs to stage one AES batch
pub const AES_BATCH_SIZE: usize = AES_BLOCK_SIZE * AES_PARALLEL_NUM;

/// AES-128 security strength in bits
pub const AES128_SECURITY_STRENGTH: usize = 128;

/// AES-192 security strength in bits
pub const AES192_SECURITY_STRENGTH: usize = 192;

/// AES-256 security strength in bits
pub const AES256_SECURITY_STRENGTH: usize = 256;

/// AES-128 round key schedule size in bytes (11 round keys)
pub const AES128_SCHEDULE_SIZE: usize = 176;

/// AES-192 round key schedule size in bytes (13 round keys)
pub const AES192_SCHEDULE_SIZE: usize = 208;

/// AES-256 round key schedule size in bytes (15 round keys)
pub const AES256_SCHEDULE_SIZE: usize = 240;

/// SM4 key size in bytes
pub const SM4_KEY_SIZE: usize = 16;

/// SM4 block size in bytes
pub const SM4_BLOCK_SIZE: usize = 16;

/// Number of SM4 blocks handed to one batched encrypt/decrypt call
pub const SM4_PARALLEL_NUM: usize = 4;

/// Bytes of scratch a mode needs to stage one SM4 batch
pub const SM4_BATCH_SIZE: usize = SM4_BLOCK_SIZE * SM4_PARALLEL_NUM;

/// SM4 round count, one 32-bit round key per round
pub const SM4_ROUNDS: usize = 32;

/// SM4 security strength in bits
pub const SM4_SECURITY_STRENGTH: usize = 128;
