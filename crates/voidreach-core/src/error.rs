//! Error types for the core engine.
//!
//! Every expected rule violation is a [`CoreError`] value carried back to the
//! caller; the engine never panics on bad player input. Interdiction is *not*
//! an error: a caught smuggling run is a normal trade outcome reported by the
//! market module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resource::{Equipment, ResourceKind};
use crate::types::{Credits, HexId, HexState};

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Top-level error type for all core engine operations.
///
/// Serializable so command reports can carry refusals verbatim to the
/// rendering layer.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum CoreError {
    /// Coordinate that is malformed or outside the galaxy grid.
    #[error("Invalid hex coordinate: {0}")]
    InvalidCoordinate(String),

    /// Action point cost exceeds the player's remaining pool.
    #[error("Insufficient action points: need {required}, have {available}")]
    InsufficientActionPoints {
        /// Points the operation costs.
        required: u32,
        /// Points remaining.
        available: u32,
    },

    /// Purchase or fine exceeds the player's balance.
    #[error("Insufficient credits: need {required}, have {available}")]
    InsufficientCredits {
        /// Credits the operation costs.
        required: Credits,
        /// Credits held.
        available: Credits,
    },

    /// Cargo hold cannot fit the incoming units.
    #[error("Insufficient cargo space: need {required}, have {available} free")]
    InsufficientCargoSpace {
        /// Units of space needed.
        required: u32,
        /// Units of space free.
        available: u32,
    },

    /// Market stock cannot cover a buy order.
    #[error("Market has {available} {resource} in stock, requested {requested}")]
    InsufficientInventory {
        /// Resource being bought.
        resource: ResourceKind,
        /// Units requested.
        requested: u32,
        /// Units the market holds.
        available: u32,
    },

    /// Player cargo cannot cover a sell order.
    #[error("Cargo holds {held} {resource}, requested {requested}")]
    InsufficientGoods {
        /// Resource being sold.
        resource: ResourceKind,
        /// Units offered for sale.
        requested: u32,
        /// Units actually held.
        held: u32,
    },

    /// Extraction attempted without the required equipment.
    #[error("Extracting {resource} requires {equipment}")]
    MissingEquipment {
        /// Resource that needs the tool.
        resource: ResourceKind,
        /// Equipment the player lacks.
        equipment: Equipment,
    },

    /// Extractable pool is empty.
    #[error("{resource} at {hex} is depleted")]
    ResourceDepleted {
        /// Hex holding the site.
        hex: HexId,
        /// Depleted resource.
        resource: ResourceKind,
    },

    /// Operation re-applies a state the hex already holds.
    #[error("Hex {hex} is already {state}")]
    AlreadyInState {
        /// Hex in question.
        hex: HexId,
        /// State it already holds.
        state: HexState,
    },

    /// Requested state change skips or reverses the progression order.
    #[error("Hex {hex} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Hex in question.
        hex: HexId,
        /// Current state.
        from: HexState,
        /// Requested state.
        to: HexState,
    },

    /// Trade or purchase attempted away from any star system.
    #[error("No star system at {0}")]
    NoSystemAt(HexId),

    /// Collection or extraction attempted away from any resource site.
    #[error("No resource site at {0}")]
    NoSiteAt(HexId),

    /// Equipment purchase the player already owns.
    #[error("{0} is already owned")]
    EquipmentOwned(Equipment),
}
