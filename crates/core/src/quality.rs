// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Quality bitmask codec.
//!
//! A combined quality is a `u32` whose low half is the "allowed" set and whose
//! high half is the "preferred" set, each an OR of single-bit quality flags:
//!
//! ```text
//!  31            16 15             0
//! ┌────────────────┬────────────────┐
//! │   preferred    │    allowed     │
//! └────────────────┴────────────────┘
//! ```
//!
//! The flag values themselves come from the server (see [`QualityVocabulary`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single quality flag: one power-of-two bit in the low 16 bits.
pub type Quality = u32;

const HALF_MASK: u32 = 0x0000_FFFF;
const PREFERRED_SHIFT: u32 = 16;

/// Packs allowed and preferred flag lists into one combined value.
///
/// Duplicates and ordering in the inputs do not matter. Bits above the low
/// half of an input flag are discarded so the two halves never bleed into
/// each other.
pub fn combine(allowed: &[Quality], preferred: &[Quality]) -> u32 {
    let low = allowed.iter().fold(0u32, |acc, q| acc | (q & HALF_MASK));
    let high = preferred
        .iter()
        .fold(0u32, |acc, q| acc | ((q & HALF_MASK) << PREFERRED_SHIFT));
    low | high
}

/// Allowed and preferred quality sets, in ascending flag order when produced
/// by [`QualityVocabulary::split`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualities {
    #[serde(default)]
    pub allowed: Vec<Quality>,
    #[serde(default)]
    pub preferred: Vec<Quality>,
}

impl Qualities {
    pub fn new(allowed: Vec<Quality>, preferred: Vec<Quality>) -> Self {
        Qualities { allowed, preferred }
    }

    /// Packs these sets with [`combine`].
    pub fn combined(&self) -> u32 {
        combine(&self.allowed, &self.preferred)
    }

    pub fn is_allowed(&self, quality: Quality) -> bool {
        self.allowed.contains(&quality)
    }

    pub fn is_preferred(&self, quality: Quality) -> bool {
        self.preferred.contains(&quality)
    }
}

/// One quality tier as described by the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityTier {
    pub value: Quality,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
}

impl QualityTier {
    pub fn new(value: Quality, key: impl Into<String>, name: impl Into<String>) -> Self {
        QualityTier {
            value,
            key: key.into(),
            name: name.into(),
        }
    }

    /// A tier is usable only if it is exactly one bit in the low half.
    fn is_flag(&self) -> bool {
        self.value.is_power_of_two() && self.value <= HALF_MASK
    }
}

/// The set of known quality flags, kept in ascending value order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityVocabulary {
    tiers: Vec<QualityTier>,
}

impl QualityVocabulary {
    /// Builds a vocabulary, dropping tiers that are not a single low-half bit
    /// and collapsing duplicate values (first one wins).
    pub fn new(tiers: impl IntoIterator<Item = QualityTier>) -> Self {
        let mut kept: Vec<QualityTier> = Vec::new();
        for tier in tiers {
            if !tier.is_flag() {
                tracing::debug!(
                    "ignoring quality tier '{}' with non-flag value {}",
                    tier.key,
                    tier.value
                );
                continue;
            }
            if kept.iter().any(|t| t.value == tier.value) {
                continue;
            }
            kept.push(tier);
        }
        kept.sort_by_key(|t| t.value);
        QualityVocabulary { tiers: kept }
    }

    /// Builds an anonymous vocabulary from bare flag values.
    pub fn from_flags(flags: &[Quality]) -> Self {
        Self::new(
            flags
                .iter()
                .map(|&v| QualityTier::new(v, String::new(), String::new())),
        )
    }

    /// Reads the `qualities.values` list out of the server's `consts` config
    /// section. Anything unreadable yields an empty vocabulary.
    pub fn from_consts(consts: &Value) -> Self {
        let values = consts
            .get("qualities")
            .and_then(|q| q.get("values"))
            .and_then(Value::as_array);

        let Some(values) = values else {
            return Self::default();
        };

        Self::new(
            values
                .iter()
                .filter_map(|v| serde_json::from_value::<QualityTier>(v.clone()).ok()),
        )
    }

    /// Known flag values in ascending order.
    pub fn flags(&self) -> impl Iterator<Item = Quality> + '_ {
        self.tiers.iter().map(|t| t.value)
    }

    pub fn tiers(&self) -> &[QualityTier] {
        &self.tiers
    }

    pub fn get(&self, value: Quality) -> Option<&QualityTier> {
        self.tiers.iter().find(|t| t.value == value)
    }

    /// Display name for a flag, if known.
    pub fn name(&self, value: Quality) -> Option<&str> {
        self.get(value).map(|t| t.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Unpacks a combined value into ascending allowed and preferred lists.
    ///
    /// Bits that do not correspond to a known flag are ignored.
    pub fn split(&self, combined: u32) -> Qualities {
        let allowed = self.flags().filter(|v| v & combined != 0).collect();
        let preferred = self
            .flags()
            .filter(|v| (v << PREFERRED_SHIFT) & combined != 0)
            .collect();
        Qualities { allowed, preferred }
    }
}

#[cfg(test)]
#[path = "quality_tests.rs"]
mod tests;
