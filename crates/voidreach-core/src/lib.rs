//! Voidreach Core Library
//!
//! This crate contains the core game logic for Voidreach, a hex-grid space
//! exploration and trading game built around a procedurally generated
//! galaxy and a two-tier resource economy.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: This crate is purely game logic
//! - **Deterministic**: The same seed always produces the same galaxy
//! - **Serializable**: All state can be saved/loaded via serde
//! - **Recoverable**: Rule violations are values, never panics, and
//!   restoring a snapshot re-validates every invariant

// Core modules
pub mod error;
pub mod hex;
pub mod rng;
pub mod types;

// Catalogs
pub mod resource;
pub mod site;
pub mod system;

// Galaxy state
pub mod discovery;
pub mod galaxy;
pub mod player;
pub mod settings;

// Galaxy generation
pub mod placement;

// Economy
pub mod market;
pub mod regen;

// Command surface and persistence
pub mod engine;
pub mod snapshot;

// Re-exports for convenience
pub use discovery::{DiscoveryEntry, DiscoveryKind, DiscoveryLog};
pub use engine::{ArrivalReport, GameEngine, TradeReport, EXTRACT_AP_COST, SCAN_AP_COST};
pub use error::{CoreError, CoreResult};
pub use galaxy::{Galaxy, HexNote, NoteLabel, ScanReading};
pub use hex::{CubeCoord, Direction, DIRECTIONS};
pub use market::{Market, MarketEntry, TradeLineOutcome, TradeOrder};
pub use placement::{PlacementConfig, PlacementReport};
pub use player::{CargoHold, Player};
pub use regen::{RegenReport, RegenSchedule, SECONDS_PER_DAY};
pub use resource::{Equipment, ResourceCategory, ResourceKind};
pub use rng::SeededRng;
pub use settings::{GalaxySettings, SettingsError};
pub use site::{ResourcePool, ResourceSite, SiteKind};
pub use snapshot::{GameSnapshot, RestoreReport};
pub use system::{Provenance, SecurityLevel, SystemKind, SystemRecord};
pub use types::*;
