//! Galaxy settings and configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Credits, GalaxySize};

/// Configuration for a galaxy and the pilot starting in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalaxySettings {
    /// Display name for the galaxy.
    pub name: String,
    /// Grid size preset; also fixes the system and site targets.
    pub size: GalaxySize,
    /// Minimum hex distance between two generated systems.
    pub min_system_spacing: u32,
    /// Minimum hex distance between two resource sites.
    pub min_site_spacing: u32,
    /// Wormhole pairs to thread through empty space.
    pub wormhole_pairs: u32,
    /// Chance that first arrival at an empty hex turns up a resource site.
    pub site_discovery_chance: f32,
    /// Credits the pilot starts with.
    pub starting_credits: Credits,
    /// Cargo hold size in units.
    pub cargo_capacity: u32,
    /// Action point pool per day.
    pub max_action_points: u32,
}

impl GalaxySettings {
    /// Create default settings for a new galaxy.
    pub fn new(name: String) -> Self {
        Self {
            name,
            size: GalaxySize::Standard,
            min_system_spacing: 3,
            min_site_spacing: 2,
            wormhole_pairs: 3,
            site_discovery_chance: 0.25,
            starting_credits: 1247,
            cargo_capacity: 20,
            max_action_points: 10,
        }
    }

    /// Create settings for a quick compact galaxy.
    pub fn compact(name: String) -> Self {
        Self {
            size: GalaxySize::Compact,
            wormhole_pairs: 2,
            ..Self::new(name)
        }
    }

    /// Validate settings and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.name.is_empty() {
            return Err(SettingsError::EmptyName);
        }
        if self.name.len() > 64 {
            return Err(SettingsError::NameTooLong);
        }
        if self.min_system_spacing == 0 || self.min_site_spacing == 0 {
            return Err(SettingsError::ZeroSpacing);
        }
        if !(0.0..=1.0).contains(&self.site_discovery_chance) {
            return Err(SettingsError::ChanceOutOfRange);
        }
        let (columns, rows) = self.size.dimensions();
        let area = columns * rows;
        let targets = self.size.target_systems() + self.size.target_sites() + self.wormhole_pairs * 2;
        if targets > area / 4 {
            return Err(SettingsError::TargetsTooDenseForGrid);
        }
        if self.starting_credits < 0 {
            return Err(SettingsError::NegativeCredits);
        }
        if self.cargo_capacity == 0 {
            return Err(SettingsError::ZeroCargoCapacity);
        }
        if self.max_action_points == 0 {
            return Err(SettingsError::ZeroActionPoints);
        }
        Ok(())
    }

    /// Get the grid dimensions based on settings.
    pub fn dimensions(&self) -> (u32, u32) {
        self.size.dimensions()
    }
}

impl Default for GalaxySettings {
    fn default() -> Self {
        Self::new("New Galaxy".to_string())
    }
}

/// Errors from invalid galaxy settings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Galaxy name cannot be empty")]
    EmptyName,
    #[error("Galaxy name must be 64 characters or less")]
    NameTooLong,
    #[error("Placement spacing must be at least 1")]
    ZeroSpacing,
    #[error("Site discovery chance must be between 0 and 1")]
    ChanceOutOfRange,
    #[error("Too many systems and sites for this grid size")]
    TargetsTooDenseForGrid,
    #[error("Starting credits cannot be negative")]
    NegativeCredits,
    #[error("Cargo capacity must be at least 1")]
    ZeroCargoCapacity,
    #[error("Action point pool must be at least 1")]
    ZeroActionPoints,
}
