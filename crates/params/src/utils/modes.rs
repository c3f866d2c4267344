//! Naming constants for block cipher modes of operation
//!
//! A composite name is the cipher name followed by one of these suffixes,
//! e.g. `"AES-128" + ECB_ENC_SUFFIX == "AES-128/ECB-ENC"`. Names are for
//! diagnostics and registry lookup only; they never appear on the wire.

/// ECB encryption
pub const ECB_ENC_SUFFIX: &str = "/ECB-ENC";

/// ECB decryption
pub const ECB_DEC_SUFFIX: &str = "/ECB-DEC";

/// CBC encryption
pub const CBC_ENC_SUFFIX: &str = "/CBC-ENC";

/// CBC decryption
pub const CBC_DEC_SUFFIX: &str = "/CBC-DEC";

/// CFB encryption
pub const CFB_ENC_SUFFIX: &str = "/CFB-ENC";

/// CFB decryption
pub const CFB_DEC_SUFFIX: &str = "/CFB-DEC";

/// OFB (same transform in both directions)
pub const OFB_SUFFIX: &str = "/OFB";

/// CTR (same transform in both directions)
pub const CTR_SUFFIX: &str = "/CTR";
