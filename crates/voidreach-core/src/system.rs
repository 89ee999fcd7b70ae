//! Star systems and their security classification.

use serde::{Deserialize, Serialize};

use crate::hex::CubeCoord;
use crate::rng::SeededRng;
use crate::types::Timestamp;

/// Every kind of star system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    Homeworld,
    Outpost,
    TradeHub,
    Industrial,
    Mining,
    Frontier,
    Pirate,
    Nexus,
    BlackHole,
    Research,
    SpaceStation,
    Empty,
}

impl SystemKind {
    /// Get the weighted-generation weight. Weights sum to 100.
    /// Homeworld and Empty carry no weight: the first exists only in the
    /// known table, the second only marks charted space with nothing in it.
    pub const fn weight(&self) -> u32 {
        match self {
            SystemKind::Homeworld => 0,
            SystemKind::Outpost => 18,
            SystemKind::TradeHub => 10,
            SystemKind::Industrial => 14,
            SystemKind::Mining => 16,
            SystemKind::Frontier => 18,
            SystemKind::Pirate => 8,
            SystemKind::Nexus => 2,
            SystemKind::BlackHole => 2,
            SystemKind::Research => 6,
            SystemKind::SpaceStation => 6,
            SystemKind::Empty => 0,
        }
    }

    /// Get the security level enforced in this system's space.
    pub const fn security_level(&self) -> SecurityLevel {
        match self {
            SystemKind::Homeworld | SystemKind::Nexus => SecurityLevel::Core,
            SystemKind::Industrial | SystemKind::Mining | SystemKind::SpaceStation => {
                SecurityLevel::Industrial
            }
            SystemKind::Pirate => SecurityLevel::Pirate,
            SystemKind::Outpost
            | SystemKind::TradeHub
            | SystemKind::Frontier
            | SystemKind::BlackHole
            | SystemKind::Research
            | SystemKind::Empty => SecurityLevel::Frontier,
        }
    }

    /// Get the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            SystemKind::Homeworld => "Homeworld",
            SystemKind::Outpost => "Outpost",
            SystemKind::TradeHub => "Trade Hub",
            SystemKind::Industrial => "Industrial",
            SystemKind::Mining => "Mining",
            SystemKind::Frontier => "Frontier",
            SystemKind::Pirate => "Pirate",
            SystemKind::Nexus => "Nexus",
            SystemKind::BlackHole => "Black Hole",
            SystemKind::Research => "Research",
            SystemKind::SpaceStation => "Space Station",
            SystemKind::Empty => "Empty",
        }
    }

    /// Get all system kind variants.
    pub const fn all() -> &'static [SystemKind] {
        &[
            SystemKind::Homeworld,
            SystemKind::Outpost,
            SystemKind::TradeHub,
            SystemKind::Industrial,
            SystemKind::Mining,
            SystemKind::Frontier,
            SystemKind::Pirate,
            SystemKind::Nexus,
            SystemKind::BlackHole,
            SystemKind::Research,
            SystemKind::SpaceStation,
            SystemKind::Empty,
        ]
    }

    /// Pick a generated system kind by weighted roll.
    pub fn roll(rng: &mut SeededRng) -> SystemKind {
        let total: u32 = SystemKind::all().iter().map(|k| k.weight()).sum();
        let mut pick = rng.next_range(total);
        for kind in SystemKind::all() {
            if kind.weight() == 0 {
                continue;
            }
            if pick < kind.weight() {
                return *kind;
            }
            pick -= kind.weight();
        }
        SystemKind::Frontier
    }
}

impl std::fmt::Display for SystemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How hard local authorities lean on contraband, and how contraband
/// prices respond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityLevel {
    Core,
    Industrial,
    Frontier,
    Pirate,
}

impl SecurityLevel {
    /// Probability that a trade touching illegal goods is interdicted.
    pub const fn catch_rate(&self) -> f32 {
        match self {
            SecurityLevel::Core => 0.50,
            SecurityLevel::Industrial => 0.25,
            SecurityLevel::Frontier => 0.10,
            SecurityLevel::Pirate => 0.02,
        }
    }

    /// Price adjustment applied to illegal goods: scarcity premium in
    /// policed space, glut discount in pirate space.
    pub const fn illegal_price_modifier(&self) -> f32 {
        match self {
            SecurityLevel::Core => 0.50,
            SecurityLevel::Industrial => 0.25,
            SecurityLevel::Frontier => 0.0,
            SecurityLevel::Pirate => -0.30,
        }
    }

    /// Get the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            SecurityLevel::Core => "Core",
            SecurityLevel::Industrial => "Industrial",
            SecurityLevel::Frontier => "Frontier",
            SecurityLevel::Pirate => "Pirate",
        }
    }

    /// Get all security level variants.
    pub const fn all() -> &'static [SecurityLevel] {
        &[
            SecurityLevel::Core,
            SecurityLevel::Industrial,
            SecurityLevel::Frontier,
            SecurityLevel::Pirate,
        ]
    }
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a system record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Hand-placed, present in every galaxy.
    Known,
    /// Placed by the generation pass.
    Generated,
}

/// One star system pinned to a hex. Created once and never deleted;
/// only `name` defaults and `discovered_at` are ever filled in later.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub coord: CubeCoord,
    pub kind: SystemKind,
    pub name: String,
    pub provenance: Provenance,
    /// When the player first arrived, if ever.
    pub discovered_at: Option<Timestamp>,
}

impl SystemRecord {
    /// Create an undiscovered system record.
    pub fn new(coord: CubeCoord, kind: SystemKind, name: &str, provenance: Provenance) -> Self {
        Self {
            coord,
            kind,
            name: name.to_string(),
            provenance,
            discovered_at: None,
        }
    }

    /// Display name, falling back to a sector designation for unnamed systems.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            let (col, row) = self.coord.to_offset();
            format!("Sector {}-{}", col, row)
        } else {
            self.name.clone()
        }
    }
}

/// The hand-placed systems present in every galaxy, homeworld first.
pub const fn known_systems() -> [(CubeCoord, SystemKind, &'static str); 5] {
    [
        (CubeCoord::origin(), SystemKind::Homeworld, "Meridian"),
        (CubeCoord::from_offset(7, 4), SystemKind::TradeHub, "Kessler Hub"),
        (CubeCoord::from_offset(3, 10), SystemKind::Outpost, "Farpoint"),
        (CubeCoord::from_offset(12, 8), SystemKind::Pirate, "Redclaw Den"),
        (CubeCoord::from_offset(10, 1), SystemKind::Research, "Halcyon Array"),
    ]
}

/// Name roots for generated systems.
const NAME_ROOTS: [&str; 20] = [
    "Cygnus", "Vela", "Altair", "Rigel", "Procyon", "Deneb", "Auriga", "Lyra", "Castor",
    "Pollux", "Mira", "Antares", "Izar", "Sargas", "Thuban", "Nashira", "Alcor", "Mizar",
    "Kraz", "Subra",
];

/// Roll a name for a generated system, e.g. "Cygnus-517".
pub fn roll_system_name(rng: &mut SeededRng) -> String {
    let root = NAME_ROOTS[rng.next_range(NAME_ROOTS.len() as u32) as usize];
    format!("{}-{}", root, rng.next_between(100, 999))
}
