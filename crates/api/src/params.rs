//! Parameter protocol for configuring modes of operation
//!
//! A mode is initialised from a [`ParamSet`], a small tagged options
//! structure that associates each [`ParamKind`] with a borrowed byte slice.
//! Every `init`/`set`/`get` call reports the kinds it consumed as a
//! [`ParamKind`] bitmask, so a composing layer (an authenticated wrapper, for
//! instance) knows which kinds are left for it to handle.

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// The closed set of parameter kinds understood by the modes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParamKind: u32 {
        /// Initialisation vector or initial counter block
        const IV = 0b0001;
        /// Cipher key
        const KEY = 0b0010;
        /// Additional authenticated data
        const AAD = 0b0100;
        /// Authentication tag
        const TAG = 0b1000;
    }
}

const SLOTS: usize = 4;

impl ParamKind {
    /// Slot index of a single kind, `None` for empty or combined sets
    fn slot(self) -> Option<usize> {
        let bits = self.bits();
        if bits.count_ones() == 1 && Self::all().contains(self) {
            Some(bits.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Human-readable name of a single kind
    pub fn label(self) -> &'static str {
        match self.slot() {
            Some(0) => "iv",
            Some(1) => "key",
            Some(2) => "aad",
            Some(3) => "tag",
            _ => "param",
        }
    }
}

/// Read-only parameters handed to `init` and `set`
#[derive(Clone, Copy, Default)]
pub struct ParamSet<'a> {
    slots: [Option<&'a [u8]>; SLOTS],
}

impl<'a> ParamSet<'a> {
    /// An empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `value` under a single `kind`; combined kinds are ignored
    pub fn with(mut self, kind: ParamKind, value: &'a [u8]) -> Self {
        if let Some(i) = kind.slot() {
            self.slots[i] = Some(value);
        }
        self
    }

    /// Attach a key
    pub fn with_key(self, key: &'a [u8]) -> Self {
        self.with(ParamKind::KEY, key)
    }

    /// Attach an IV or initial counter block
    pub fn with_iv(self, iv: &'a [u8]) -> Self {
        self.with(ParamKind::IV, iv)
    }

    /// Attach additional authenticated data
    pub fn with_aad(self, aad: &'a [u8]) -> Self {
        self.with(ParamKind::AAD, aad)
    }

    /// Attach an authentication tag
    pub fn with_tag(self, tag: &'a [u8]) -> Self {
        self.with(ParamKind::TAG, tag)
    }

    /// The value stored under a single `kind`
    pub fn get(&self, kind: ParamKind) -> Option<&'a [u8]> {
        kind.slot().and_then(|i| self.slots[i])
    }

    /// All kinds present in the set
    pub fn kinds(&self) -> ParamKind {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some())
            .fold(ParamKind::empty(), |acc, (i, _)| {
                acc | ParamKind::from_bits_truncate(1 << i)
            })
    }
}

impl fmt::Debug for ParamSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // lengths only, values may be secret
        let mut s = f.debug_struct("ParamSet");
        for kind in ParamKind::all().iter() {
            if let Some(v) = self.get(kind) {
                s.field(kind.label(), &v.len());
            }
        }
        s.finish()
    }
}

/// Writable parameter slots handed to `get`
#[derive(Default)]
pub struct ParamSetMut<'a> {
    slots: [Option<&'a mut [u8]>; SLOTS],
}

impl<'a> ParamSetMut<'a> {
    /// An empty set of output slots
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an output slot for a single `kind`
    pub fn with(mut self, kind: ParamKind, slot: &'a mut [u8]) -> Self {
        if let Some(i) = kind.slot() {
            self.slots[i] = Some(slot);
        }
        self
    }

    /// Provide an output slot for the IV
    pub fn with_iv(self, slot: &'a mut [u8]) -> Self {
        self.with(ParamKind::IV, slot)
    }

    /// The output slot for a single `kind`, if one was provided
    pub fn slot_mut(&mut self, kind: ParamKind) -> Option<&mut [u8]> {
        match kind.slot() {
            Some(i) => self.slots[i].as_deref_mut(),
            None => None,
        }
    }

    /// All kinds that have an output slot
    pub fn kinds(&self) -> ParamKind {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some())
            .fold(ParamKind::empty(), |acc, (i, _)| {
                acc | ParamKind::from_bits_truncate(1 << i)
            })
    }
}

impl fmt::Debug for ParamSetMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSetMut")
            .field("kinds", &self.kinds())
            .finish()
    }
}
