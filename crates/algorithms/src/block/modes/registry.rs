//! Name-driven construction of block cipher modes
//!
//! AES-128/192/256 and SM4 are each registered with every mode under the
//! canonical composite name (`"AES-128/CBC-ENC"`, `"SM4/CTR"`, ...). A
//! dispatcher that only knows a name and a [`ParamSet`] can build a ready
//! mode without any per-mode knowledge.

use std::collections::HashMap;

use chunkcrypt_api::{CipherMode, ParamKind, ParamSet};
use once_cell::sync::Lazy;
use tracing::warn;

use super::{
    BlockMode, CbcDecryptor, CbcEncryptor, CfbDecryptor, CfbEncryptor, Ctr, EcbDecryptor,
    EcbEncryptor, Ofb,
};
use crate::block::{Aes128, Aes192, Aes256, BlockCipher, Sm4};

/// Builds a boxed mode from a parameter set
pub type Factory = fn(&ParamSet<'_>) -> chunkcrypt_api::Result<Box<dyn CipherMode>>;

static REGISTRY: Lazy<HashMap<&'static str, (Factory, ParamKind)>> = Lazy::new(|| {
    let mut m = HashMap::new();
    register::<Aes128>(&mut m);
    register::<Aes192>(&mut m);
    register::<Aes256>(&mut m);
    register::<Sm4>(&mut m);
    m
});

fn build<M: BlockMode + 'static>(params: &ParamSet<'_>) -> chunkcrypt_api::Result<Box<dyn CipherMode>> {
    Ok(Box::new(M::from_params(params)?))
}

fn insert<M: BlockMode + 'static>(map: &mut HashMap<&'static str, (Factory, ParamKind)>) {
    map.insert(M::canonical_name(), (build::<M> as Factory, M::REQUIRED));
}

fn register<C: BlockCipher + 'static>(map: &mut HashMap<&'static str, (Factory, ParamKind)>) {
    insert::<EcbEncryptor<C>>(map);
    insert::<EcbDecryptor<C>>(map);
    insert::<CbcEncryptor<C>>(map);
    insert::<CbcDecryptor<C>>(map);
    insert::<CfbEncryptor<C>>(map);
    insert::<CfbDecryptor<C>>(map);
    insert::<Ofb<C>>(map);
    insert::<Ctr<C>>(map);
}

/// Builds the mode registered as `name`, keyed and armed from `params`
///
/// Also returns the parameter kinds the mode consumed, so a composing layer
/// knows which kinds remain for it.
pub fn create(
    name: &str,
    params: &ParamSet<'_>,
) -> chunkcrypt_api::Result<(Box<dyn CipherMode>, ParamKind)> {
    match REGISTRY.get(name) {
        Some((factory, required)) => Ok((factory(params)?, *required)),
        None => {
            warn!(name, "unknown block cipher mode requested");
            Err(chunkcrypt_api::Error::NotImplemented {
                feature: "block cipher mode",
            })
        }
    }
}

/// Parameter kinds the mode registered as `name` requires
pub fn required(name: &str) -> Option<ParamKind> {
    REGISTRY.get(name).map(|(_, required)| *required)
}

/// All registered composite names, sorted
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}
