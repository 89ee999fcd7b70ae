//! Daily resource regeneration.
//!
//! The schedule is pure data; an external driver (game loop, timer, test)
//! asks whether a pass is due and applies it. Regeneration boundaries are
//! fixed calendar points (midnight UTC), so restored saves agree with live
//! processes on when the next pass happens. However many boundaries a
//! dormant save missed, catching up is a single pass; the capacity clamp
//! makes repeated passes converge anyway.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::site::ResourceSite;
use crate::types::{HexId, Timestamp};

/// Seconds per regeneration cycle.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Steady-state ceiling for tradable pools by resource rarity.
pub const fn tradable_capacity(rarity: u8) -> u32 {
    match rarity {
        1 => 24,
        2 => 18,
        3 => 12,
        4 => 8,
        5 => 5,
        _ => 3,
    }
}

/// Steady-state ceiling for extractable pools; roughly 30% under the
/// tradable table at every tier.
pub const fn extractable_capacity(rarity: u8) -> u32 {
    match rarity {
        1 => 17,
        2 => 13,
        3 => 8,
        4 => 6,
        5 => 3,
        _ => 2,
    }
}

/// Units a tradable pool regains per pass.
pub const fn tradable_regen_rate(rarity: u8) -> u32 {
    match rarity {
        1 | 2 => 3,
        3 | 4 => 2,
        _ => 1,
    }
}

/// Units an extractable pool regains per pass. Rarer and gated
/// resources come back slower.
pub const fn extractable_regen_rate(rarity: u8) -> u32 {
    match rarity {
        1 | 2 => 2,
        _ => 1,
    }
}

/// Persisted timer state for the daily pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenSchedule {
    /// When the last pass ran.
    pub last_run: Timestamp,
    /// The next boundary a pass should fire at.
    pub next_fire: Timestamp,
}

impl RegenSchedule {
    /// Create a schedule armed for the first boundary after `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            last_run: now,
            next_fire: next_boundary(now),
        }
    }

    /// Check whether a pass is due.
    pub fn is_due(&self, now: Timestamp) -> bool {
        now >= self.next_fire
    }

    /// Count the daily boundaries crossed since the last pass. More than
    /// one means the process slept through some; the driver still runs a
    /// single pass.
    pub fn boundaries_missed(&self, now: Timestamp) -> i64 {
        let crossed = now.div_euclid(SECONDS_PER_DAY) - self.last_run.div_euclid(SECONDS_PER_DAY);
        crossed.max(0)
    }

    /// Record a completed pass and re-arm from `now`.
    pub fn mark_run(&mut self, now: Timestamp) {
        self.last_run = now;
        self.next_fire = next_boundary(now);
    }
}

/// The first daily boundary strictly after `now`.
pub fn next_boundary(now: Timestamp) -> Timestamp {
    (now.div_euclid(SECONDS_PER_DAY) + 1) * SECONDS_PER_DAY
}

/// Summary of one regeneration pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenReport {
    /// Sites that gained at least one unit.
    pub sites_touched: u32,
    /// Total units restored across all pools.
    pub units_restored: u32,
    /// One-time sites that were skipped.
    pub skipped_one_time: u32,
}

/// Apply one regeneration pass to every site.
///
/// One-time sites are skipped outright. Every other pool regains its
/// per-pass rate up to the larger of its own max and the rarity
/// capacity table, so small rolls climb toward the table value and big
/// rolls refill all the way back to their own max.
pub fn run_pass(sites: &mut BTreeMap<HexId, ResourceSite>, now: Timestamp) -> RegenReport {
    let mut report = RegenReport::default();

    for site in sites.values_mut() {
        if site.is_one_time() {
            report.skipped_one_time += 1;
            continue;
        }

        let mut restored = 0;
        for (kind, pool) in site.tradable.iter_mut() {
            if pool.regen_rate > 0 {
                restored += pool.add_clamped(pool.regen_rate, tradable_capacity(kind.rarity()));
            }
        }
        for (kind, pool) in site.extractable.iter_mut() {
            if pool.regen_rate > 0 {
                restored += pool.add_clamped(pool.regen_rate, extractable_capacity(kind.rarity()));
            }
        }

        if restored > 0 {
            site.last_update = now;
            report.sites_touched += 1;
            report.units_restored += restored;
        }
    }

    tracing::debug!(
        sites_touched = report.sites_touched,
        units_restored = report.units_restored,
        "Regeneration pass complete"
    );

    report
}
