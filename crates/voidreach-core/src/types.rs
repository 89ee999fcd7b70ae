//! Core type aliases used throughout the crate.

use serde::{Deserialize, Serialize};

/// Canonical string key for a hex coordinate ("x,y,z").
///
/// Every per-hex table in the galaxy is keyed by this form so that
/// serialized state stays plain JSON objects (JSON requires string keys).
pub type HexId = String;

/// Credit balance or price. Signed so arithmetic can detect shortfalls
/// before clamping; persisted balances are never negative.
pub type Credits = i64;

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// Galaxy size presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GalaxySize {
    Compact,
    #[default]
    Standard,
    Vast,
}

impl GalaxySize {
    /// Get the grid dimensions (columns, rows) for this galaxy size.
    pub const fn dimensions(&self) -> (u32, u32) {
        match self {
            GalaxySize::Compact => (40, 30),
            GalaxySize::Standard => (64, 48),
            GalaxySize::Vast => (96, 72),
        }
    }

    /// Get the target number of generated star systems for this size.
    pub const fn target_systems(&self) -> u32 {
        match self {
            GalaxySize::Compact => 22,
            GalaxySize::Standard => 40,
            GalaxySize::Vast => 75,
        }
    }

    /// Get the target number of resource sites for this size.
    pub const fn target_sites(&self) -> u32 {
        match self {
            GalaxySize::Compact => 40,
            GalaxySize::Standard => 70,
            GalaxySize::Vast => 130,
        }
    }

    /// Get all galaxy size variants.
    pub const fn all() -> &'static [GalaxySize] {
        &[GalaxySize::Compact, GalaxySize::Standard, GalaxySize::Vast]
    }
}

impl std::fmt::Display for GalaxySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.dimensions();
        match self {
            GalaxySize::Compact => write!(f, "Compact ({}x{})", w, h),
            GalaxySize::Standard => write!(f, "Standard ({}x{})", w, h),
            GalaxySize::Vast => write!(f, "Vast ({}x{})", w, h),
        }
    }
}

/// Exploration state of a single hex.
///
/// States only ever progress in rank order; a hex never moves backward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexState {
    #[default]
    Unknown,
    Scanned,
    Visited,
    Claimed,
}

impl HexState {
    /// Get the progression rank (0-3). Higher states take priority when
    /// membership sets disagree.
    pub const fn rank(&self) -> u8 {
        match self {
            HexState::Unknown => 0,
            HexState::Scanned => 1,
            HexState::Visited => 2,
            HexState::Claimed => 3,
        }
    }

    /// Get all hex state variants.
    pub const fn all() -> &'static [HexState] {
        &[
            HexState::Unknown,
            HexState::Scanned,
            HexState::Visited,
            HexState::Claimed,
        ]
    }
}

impl std::fmt::Display for HexState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HexState::Unknown => write!(f, "unknown"),
            HexState::Scanned => write!(f, "scanned"),
            HexState::Visited => write!(f, "visited"),
            HexState::Claimed => write!(f, "claimed"),
        }
    }
}
