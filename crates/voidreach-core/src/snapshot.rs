//! Save/restore snapshots with invariant revalidation.
//!
//! A [`GameSnapshot`] is a plain serde image of one running game. Taking
//! one never fails; restoring one distrusts every field. Snapshots cross a
//! serialization boundary and may come back from old versions, hand edits,
//! or partial writes, so restore walks the whole structure and drops or
//! repairs anything that violates an invariant instead of aborting. The
//! [`RestoreReport`] says exactly what had to be fixed; a clean save
//! restores with an all-zero report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::GameEngine;
use crate::galaxy::Galaxy;
use crate::hex::CubeCoord;
use crate::player::Player;
use crate::regen;
use crate::types::HexId;

/// Serializable image of a complete game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub galaxy: Galaxy,
    pub player: Player,
}

/// Counts of what restore had to discard or fix. All zero for a clean
/// snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreReport {
    /// Map and set keys that failed to parse as canonical cube
    /// coordinates; their records were dropped.
    pub dropped_keys: u32,
    /// Sites dropped because a system occupies the same hex.
    pub misplaced_sites: u32,
    /// Pools pulled back to `current <= max`.
    pub clamped_pools: u32,
    /// One-time site pools whose regen rate was forced to zero.
    pub zeroed_regen_rates: u32,
    /// Hexes removed from lower-priority state sets to restore
    /// disjointness.
    pub demoted_states: u32,
    /// Wormhole links dropped or re-paired to restore symmetry.
    pub repaired_wormholes: u32,
    /// Duplicate journal entries discarded while rebuilding dedup sets.
    pub dropped_discoveries: u32,
    /// Player fields (location, credits, action points, cargo) pulled
    /// back into range.
    pub repaired_player: u32,
    /// True when the regeneration schedule had to be re-armed.
    pub rearmed_schedule: bool,
}

impl RestoreReport {
    /// Check whether the snapshot restored without a single repair.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl GameSnapshot {
    /// Capture the current game.
    pub fn capture(engine: &GameEngine) -> Self {
        Self {
            galaxy: engine.galaxy.clone(),
            player: engine.player.clone(),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string. Structural corruption fails here;
    /// semantic corruption is handled by [`GameSnapshot::restore`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Rebuild a running game, re-validating every invariant on the way
    /// in. Offending records are dropped or repaired, never trusted.
    pub fn restore(self) -> (GameEngine, RestoreReport) {
        let GameSnapshot {
            mut galaxy,
            mut player,
        } = self;
        let mut report = RestoreReport::default();

        scrub_keys(&mut galaxy, &mut report);
        restore_state_disjointness(&mut galaxy, &mut report);
        repair_sites(&mut galaxy, &mut report);
        repair_wormholes(&mut galaxy, &mut report);

        let entries_before = galaxy.discoveries.len();
        galaxy.discoveries.rebuild_sets();
        report.dropped_discoveries += (entries_before - galaxy.discoveries.len()) as u32;

        if galaxy.regen.next_fire <= galaxy.regen.last_run {
            galaxy.regen.next_fire = regen::next_boundary(galaxy.regen.last_run);
            report.rearmed_schedule = true;
        }

        repair_player(&galaxy, &mut player, &mut report);

        if !report.is_clean() {
            tracing::warn!(
                dropped_keys = report.dropped_keys,
                clamped_pools = report.clamped_pools,
                zeroed_regen_rates = report.zeroed_regen_rates,
                demoted_states = report.demoted_states,
                repaired_wormholes = report.repaired_wormholes,
                dropped_discoveries = report.dropped_discoveries,
                repaired_player = report.repaired_player,
                rearmed_schedule = report.rearmed_schedule,
                "Snapshot restored with repairs"
            );
        }

        (GameEngine { galaxy, player }, report)
    }
}

/// A key is valid only if it parses and round-trips to itself, so
/// non-canonical spellings of a real coordinate are treated as corrupt.
fn valid_key(key: &str) -> bool {
    key.parse::<CubeCoord>()
        .map(|coord| coord.id() == key)
        .unwrap_or(false)
}

fn scrub_keys(galaxy: &mut Galaxy, report: &mut RestoreReport) {
    let mut dropped = 0u32;

    let mut drop_bad = |ok: bool| {
        if !ok {
            dropped += 1;
        }
        ok
    };

    galaxy
        .systems
        .retain(|key, record| drop_bad(valid_key(key) && record.coord.id() == *key));
    galaxy.sites.retain(|key, _| drop_bad(valid_key(key)));
    galaxy.markets.retain(|key, _| drop_bad(valid_key(key)));
    galaxy.readings.retain(|key, _| drop_bad(valid_key(key)));
    galaxy.notes.retain(|key, _| drop_bad(valid_key(key)));
    galaxy
        .wormholes
        .retain(|key, exit| drop_bad(valid_key(key) && valid_key(exit)));

    galaxy.scanned.retain(|key| drop_bad(valid_key(key)));
    galaxy.visited.retain(|key| drop_bad(valid_key(key)));
    galaxy.claimed.retain(|key| drop_bad(valid_key(key)));

    report.dropped_keys += dropped;
}

/// Re-disjoint the three state sets, higher priority winning: claimed
/// beats visited beats scanned.
fn restore_state_disjointness(galaxy: &mut Galaxy, report: &mut RestoreReport) {
    let claimed: Vec<HexId> = galaxy.claimed.iter().cloned().collect();
    for id in &claimed {
        if galaxy.visited.remove(id) {
            report.demoted_states += 1;
        }
        if galaxy.scanned.remove(id) {
            report.demoted_states += 1;
        }
    }
    let visited: Vec<HexId> = galaxy.visited.iter().cloned().collect();
    for id in &visited {
        if galaxy.scanned.remove(id) {
            report.demoted_states += 1;
        }
    }
}

fn repair_sites(galaxy: &mut Galaxy, report: &mut RestoreReport) {
    // A system hex is served by a market; a site on it is corrupt.
    let Galaxy { systems, sites, .. } = galaxy;
    sites.retain(|key, _| {
        if systems.contains_key(key) {
            report.misplaced_sites += 1;
            false
        } else {
            true
        }
    });

    for site in galaxy.sites.values_mut() {
        let one_time = site.is_one_time();
        for pool in site
            .tradable
            .values_mut()
            .chain(site.extractable.values_mut())
        {
            if pool.current > pool.max {
                pool.current = pool.max;
                report.clamped_pools += 1;
            }
            if one_time && pool.regen_rate != 0 {
                pool.regen_rate = 0;
                report.zeroed_regen_rates += 1;
            }
        }
    }
}

/// Rebuild the wormhole map as a symmetric pairing. Self-links and
/// conflicting links are dropped; missing reverse links are re-inserted.
fn repair_wormholes(galaxy: &mut Galaxy, report: &mut RestoreReport) {
    let mut rebuilt: BTreeMap<HexId, HexId> = BTreeMap::new();
    for (a, b) in &galaxy.wormholes {
        if a == b {
            report.repaired_wormholes += 1;
            continue;
        }
        match rebuilt.get(a) {
            Some(existing) if existing == b => continue,
            Some(_) => {
                report.repaired_wormholes += 1;
                continue;
            }
            None => {}
        }
        if rebuilt.contains_key(b) {
            report.repaired_wormholes += 1;
            continue;
        }
        if galaxy.wormholes.get(b) != Some(a) {
            // One-sided link; adopt it and restore the reverse.
            report.repaired_wormholes += 1;
        }
        rebuilt.insert(a.clone(), b.clone());
        rebuilt.insert(b.clone(), a.clone());
    }
    galaxy.wormholes = rebuilt;
}

fn repair_player(galaxy: &Galaxy, player: &mut Player, report: &mut RestoreReport) {
    let (columns, rows) = galaxy.settings.dimensions();
    if !player.location.in_bounds(columns, rows) {
        // Strand recovery: put the pilot back at the homeworld.
        player.location = CubeCoord::origin();
        report.repaired_player += 1;
    }
    if player.credits < 0 {
        player.credits = 0;
        report.repaired_player += 1;
    }
    if player.max_action_points == 0 {
        player.max_action_points = galaxy.settings.max_action_points;
        report.repaired_player += 1;
    }
    if player.action_points > player.max_action_points {
        player.action_points = player.max_action_points;
        report.repaired_player += 1;
    }

    // Shed cargo that exceeds the hold, largest keys first.
    let mut excess = player
        .cargo
        .space_used()
        .saturating_sub(player.cargo.capacity);
    if excess > 0 {
        report.repaired_player += 1;
        while excess > 0 {
            let Some((kind, quantity)) = player.cargo.contents.pop_last() else {
                break;
            };
            if quantity > excess {
                player.cargo.contents.insert(kind, quantity - excess);
                excess = 0;
            } else {
                excess -= quantity;
            }
        }
    }
}
