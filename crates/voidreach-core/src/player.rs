//! Player state: wallet, action points, cargo, equipment, position.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::hex::CubeCoord;
use crate::resource::{Equipment, ResourceKind};
use crate::settings::GalaxySettings;
use crate::types::Credits;

/// Bounded cargo hold.
///
/// Used space is always the sum of the contents; it is derived rather than
/// stored so the bookkeeping cannot drift.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoHold {
    /// Total units the hold can carry.
    pub capacity: u32,
    /// Units held per resource. Entries at zero are removed.
    pub contents: BTreeMap<ResourceKind, u32>,
}

impl CargoHold {
    /// Create an empty hold.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            contents: BTreeMap::new(),
        }
    }

    /// Units of space in use.
    pub fn space_used(&self) -> u32 {
        self.contents.values().sum()
    }

    /// Units of space still free.
    pub fn space_free(&self) -> u32 {
        self.capacity.saturating_sub(self.space_used())
    }

    /// Units held of one resource.
    pub fn quantity(&self, kind: ResourceKind) -> u32 {
        self.contents.get(&kind).copied().unwrap_or(0)
    }

    /// Check whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Add units, rejecting any load that would overflow the hold.
    pub fn add(&mut self, kind: ResourceKind, quantity: u32) -> CoreResult<()> {
        let free = self.space_free();
        if quantity > free {
            return Err(CoreError::InsufficientCargoSpace {
                required: quantity,
                available: free,
            });
        }
        *self.contents.entry(kind).or_insert(0) += quantity;
        Ok(())
    }

    /// Remove units, rejecting shortfalls.
    pub fn remove(&mut self, kind: ResourceKind, quantity: u32) -> CoreResult<()> {
        let held = self.quantity(kind);
        if quantity > held {
            return Err(CoreError::InsufficientGoods {
                resource: kind,
                requested: quantity,
                held,
            });
        }
        if held == quantity {
            self.contents.remove(&kind);
        } else if let Some(slot) = self.contents.get_mut(&kind) {
            *slot -= quantity;
        }
        Ok(())
    }
}

/// The pilot: wallet, daily action points, cargo, tools, and position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Pilot callsign.
    pub callsign: String,
    /// Credit balance. Never negative; fines saturate at zero.
    pub credits: Credits,
    /// Action points remaining today.
    pub action_points: u32,
    /// Daily action point pool.
    pub max_action_points: u32,
    /// Current hex.
    pub location: CubeCoord,
    /// Cargo hold.
    pub cargo: CargoHold,
    /// Extraction equipment owned.
    pub equipment: BTreeSet<Equipment>,
}

impl Player {
    /// Create a fresh pilot at the given location with the settings'
    /// starting loadout.
    pub fn new(callsign: &str, settings: &GalaxySettings, location: CubeCoord) -> Self {
        Self {
            callsign: callsign.to_string(),
            credits: settings.starting_credits,
            action_points: settings.max_action_points,
            max_action_points: settings.max_action_points,
            location,
            cargo: CargoHold::new(settings.cargo_capacity),
            equipment: BTreeSet::new(),
        }
    }

    /// Check whether the wallet covers a cost.
    pub fn can_afford(&self, cost: Credits) -> bool {
        self.credits >= cost
    }

    /// Debit the wallet, rejecting overdrafts.
    pub fn spend_credits(&mut self, cost: Credits) -> CoreResult<()> {
        if !self.can_afford(cost) {
            return Err(CoreError::InsufficientCredits {
                required: cost,
                available: self.credits,
            });
        }
        self.credits -= cost;
        Ok(())
    }

    /// Credit the wallet.
    pub fn add_credits(&mut self, amount: Credits) {
        self.credits += amount;
    }

    /// Levy a fine, taking no more than the wallet holds.
    /// Returns what was actually collected.
    pub fn fine_credits(&mut self, amount: Credits) -> Credits {
        let collected = amount.min(self.credits).max(0);
        self.credits -= collected;
        collected
    }

    /// Spend action points, rejecting overdrafts.
    pub fn spend_action_points(&mut self, cost: u32) -> CoreResult<()> {
        if cost > self.action_points {
            return Err(CoreError::InsufficientActionPoints {
                required: cost,
                available: self.action_points,
            });
        }
        self.action_points -= cost;
        Ok(())
    }

    /// Refill action points to the daily pool. Called by the daily driver,
    /// not by the resource regeneration pass.
    pub fn restore_action_points(&mut self) {
        self.action_points = self.max_action_points;
    }

    /// Check whether a piece of equipment is owned.
    pub fn has_equipment(&self, equipment: Equipment) -> bool {
        self.equipment.contains(&equipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        let settings = GalaxySettings::default();
        Player::new("Drifter", &settings, CubeCoord::origin())
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.credits, 1247);
        assert_eq!(p.action_points, 10);
        assert_eq!(p.cargo.capacity, 20);
        assert!(p.cargo.is_empty());
        assert!(p.equipment.is_empty());
        assert_eq!(p.location, CubeCoord::origin());
    }

    #[test]
    fn test_spend_credits_rejects_overdraft() {
        let mut p = player();
        assert!(p.spend_credits(1247).is_ok());
        assert_eq!(p.credits, 0);
        assert_eq!(
            p.spend_credits(1),
            Err(CoreError::InsufficientCredits {
                required: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_fine_saturates_at_zero() {
        let mut p = player();
        let collected = p.fine_credits(2000);
        assert_eq!(collected, 1247);
        assert_eq!(p.credits, 0);
        assert_eq!(p.fine_credits(50), 0);
        assert_eq!(p.credits, 0);
    }

    #[test]
    fn test_action_points_spend_and_restore() {
        let mut p = player();
        assert!(p.spend_action_points(4).is_ok());
        assert_eq!(p.action_points, 6);
        assert_eq!(
            p.spend_action_points(7),
            Err(CoreError::InsufficientActionPoints {
                required: 7,
                available: 6
            })
        );
        p.restore_action_points();
        assert_eq!(p.action_points, 10);
    }

    #[test]
    fn test_cargo_space_accounting() {
        let mut hold = CargoHold::new(10);
        hold.add(ResourceKind::FerriteOre, 4).unwrap();
        hold.add(ResourceKind::WaterIce, 3).unwrap();
        assert_eq!(hold.space_used(), 7);
        assert_eq!(hold.space_free(), 3);

        let err = hold.add(ResourceKind::Helium3, 4);
        assert_eq!(
            err,
            Err(CoreError::InsufficientCargoSpace {
                required: 4,
                available: 3
            })
        );
        // Failed add must not change the hold.
        assert_eq!(hold.space_used(), 7);
    }

    #[test]
    fn test_cargo_used_equals_content_sum() {
        let mut hold = CargoHold::new(20);
        hold.add(ResourceKind::FerriteOre, 5).unwrap();
        hold.add(ResourceKind::SpiceExtract, 2).unwrap();
        hold.remove(ResourceKind::FerriteOre, 3).unwrap();
        let sum: u32 = hold.contents.values().sum();
        assert_eq!(hold.space_used(), sum);
        assert_eq!(sum, 4);
    }

    #[test]
    fn test_cargo_remove_clears_empty_entries() {
        let mut hold = CargoHold::new(10);
        hold.add(ResourceKind::VoidOpals, 2).unwrap();
        hold.remove(ResourceKind::VoidOpals, 2).unwrap();
        assert!(hold.is_empty());
        assert_eq!(
            hold.remove(ResourceKind::VoidOpals, 1),
            Err(CoreError::InsufficientGoods {
                resource: ResourceKind::VoidOpals,
                requested: 1,
                held: 0
            })
        );
    }

    #[test]
    fn test_player_serialization() {
        let mut p = player();
        p.cargo.add(ResourceKind::RareEarths, 3).unwrap();
        p.equipment.insert(Equipment::MiningLaser);
        let json = serde_json::to_string(&p).unwrap();
        let restored: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, p);
    }
}
