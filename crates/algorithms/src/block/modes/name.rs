//! Canonical composite names such as `"AES-128/CBC-ENC"`
//!
//! Names for the built-in ciphers come from a fixed table, so they are
//! available without an allocator. Any other cipher's names are built once
//! per cipher/suffix pair and interned for the life of the process (`std`
//! only), so modes can hand out `&'static str`.

#[cfg(feature = "std")]
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

#[cfg(feature = "std")]
use once_cell::sync::Lazy;

/// Every mode suffix for each listed cipher name
macro_rules! composites {
    ($($cipher:literal),* $(,)?) => {
        [$(
            concat!($cipher, "/ECB-ENC"),
            concat!($cipher, "/ECB-DEC"),
            concat!($cipher, "/CBC-ENC"),
            concat!($cipher, "/CBC-DEC"),
            concat!($cipher, "/CFB-ENC"),
            concat!($cipher, "/CFB-DEC"),
            concat!($cipher, "/OFB"),
            concat!($cipher, "/CTR"),
        )*]
    };
}

static BUILT_IN: [&str; 32] = composites!("AES-128", "AES-192", "AES-256", "SM4");

fn built_in(cipher: &str, suffix: &str) -> Option<&'static str> {
    BUILT_IN.iter().copied().find(|name| {
        name.len() == cipher.len() + suffix.len()
            && name.starts_with(cipher)
            && name.ends_with(suffix)
    })
}

#[cfg(feature = "std")]
type NameKey = (&'static str, &'static str);

#[cfg(feature = "std")]
static NAMES: Lazy<Mutex<HashMap<NameKey, &'static str>>> = Lazy::new(Default::default);

#[cfg(feature = "std")]
fn interned(cipher: &'static str, suffix: &'static str) -> &'static str {
    let mut names = NAMES.lock().unwrap_or_else(PoisonError::into_inner);
    names
        .entry((cipher, suffix))
        .or_insert_with(|| Box::leak(format!("{cipher}{suffix}").into_boxed_str()))
}

/// Without an allocator a cipher outside the table keeps its bare name
#[cfg(not(feature = "std"))]
fn interned(cipher: &'static str, _suffix: &'static str) -> &'static str {
    cipher
}

/// `cipher` followed by `suffix`
pub fn composite(cipher: &'static str, suffix: &'static str) -> &'static str {
    built_in(cipher, suffix).unwrap_or_else(|| interned(cipher, suffix))
}
