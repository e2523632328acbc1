// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Overview status classification for episodes.

use std::fmt;

use crate::quality::{Qualities, Quality};

/// Coarse status shown in episode overviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverviewStatus {
    Unaired,
    Skipped,
    Wanted,
    Snatched,
    Preferred,
    Allowed,
    /// Any raw status without a coarser label, passed through unchanged.
    Other(String),
}

impl OverviewStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OverviewStatus::Unaired => "Unaired",
            OverviewStatus::Skipped => "Skipped",
            OverviewStatus::Wanted => "Wanted",
            OverviewStatus::Snatched => "Snatched",
            OverviewStatus::Preferred => "Preferred",
            OverviewStatus::Allowed => "Allowed",
            OverviewStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for OverviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an episode from its raw status, its quality, and the show's
/// configured quality sets. Rules are checked in order; first match wins.
pub fn classify(raw_status: &str, quality: Quality, configured: &Qualities) -> OverviewStatus {
    match raw_status {
        "Unset" | "Unaired" => OverviewStatus::Unaired,
        "Skipped" | "Ignored" => OverviewStatus::Skipped,
        "Wanted" | "Failed" => OverviewStatus::Wanted,
        "Snatched" | "Snatched (Proper)" | "Snatched (Best)" => OverviewStatus::Snatched,
        "Downloaded" => classify_downloaded(quality, configured),
        other => OverviewStatus::Other(other.to_string()),
    }
}

fn classify_downloaded(quality: Quality, configured: &Qualities) -> OverviewStatus {
    // With no preferred tier, anything allowed counts as the preferred outcome.
    if !configured.allowed.is_empty()
        && configured.preferred.is_empty()
        && configured.is_allowed(quality)
    {
        return OverviewStatus::Preferred;
    }
    if configured.is_preferred(quality) {
        OverviewStatus::Preferred
    } else if configured.is_allowed(quality) {
        OverviewStatus::Allowed
    } else {
        OverviewStatus::Wanted
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
