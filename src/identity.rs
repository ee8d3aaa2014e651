//! Node identities
//!
//! Opaque 128-bit identifiers for graph nodes. Identities are minted
//! elsewhere; this module only combines them with a seed (and reverts
//! that combination) so a whole graph can be re-keyed.
//!
//! Author: Moroya Sakamoto

use std::fmt;

use uuid::Uuid;

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Identity(Uuid);

impl Identity {
    /// The all-zero identity
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub const fn from_u128(v: u128) -> Self {
        Self(Uuid::from_u128(v))
    }

    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Derive a new identity by adding `seed` word-wise (wrapping).
    ///
    /// The same seed applied to distinct identities never collides, and
    /// [`revert_combination_with_seed`](Self::revert_combination_with_seed)
    /// undoes it exactly.
    pub fn combine_with_seed(&self, seed: &Identity) -> Self {
        let (a_lo, a_hi) = self.halves();
        let (s_lo, s_hi) = seed.halves();
        Self::from_halves(a_lo.wrapping_add(s_lo), a_hi.wrapping_add(s_hi))
    }

    /// Inverse of [`combine_with_seed`](Self::combine_with_seed)
    pub fn revert_combination_with_seed(&self, seed: &Identity) -> Self {
        let (a_lo, a_hi) = self.halves();
        let (s_lo, s_hi) = seed.halves();
        Self::from_halves(a_lo.wrapping_sub(s_lo), a_hi.wrapping_sub(s_hi))
    }

    fn halves(&self) -> (u64, u64) {
        let bytes = self.0.as_bytes();
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&bytes[..8]);
        hi.copy_from_slice(&bytes[8..]);
        (u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }

    fn from_halves(lo: u64, hi: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&lo.to_le_bytes());
        bytes[8..].copy_from_slice(&hi.to_le_bytes());
        Self(Uuid::from_bytes(bytes))
    }
}

impl From<Uuid> for Identity {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Identity> for Uuid {
    fn from(id: Identity) -> Self {
        id.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}
