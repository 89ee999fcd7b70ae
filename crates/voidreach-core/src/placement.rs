//! Procedural placement of systems, sites, and wormholes.
//!
//! Generation runs once per galaxy and fills the grid in phases: seed the
//! hand-placed systems, scatter generated systems, scatter resource sites,
//! then thread wormhole pairs through the remaining empty space.
//!
//! Spacing is enforced with a two-pass strategy. The primary pass divides
//! the grid into super-cells sized so roughly one candidate lands per cell,
//! which spreads entities without thousands of rejection rolls. Whatever
//! the primary pass could not fit, a bounded fallback pass places at a
//! relaxed minimum distance so a dense grid under-fills gracefully instead
//! of looping forever.

use serde::{Deserialize, Serialize};

use crate::galaxy::Galaxy;
use crate::hex::CubeCoord;
use crate::settings::GalaxySettings;
use crate::system::{self, Provenance, SystemKind, SystemRecord};
use crate::types::Timestamp;

/// Candidate rolls per super-cell in the primary pass.
const CELL_ATTEMPTS: u32 = 8;

/// Fallback attempt budget, per entity still missing from the target.
const FALLBACK_ATTEMPTS_PER_TARGET: u32 = 20;

/// Attempts to find one valid wormhole pair before giving up on it.
const WORMHOLE_ATTEMPTS: u32 = 40;

/// Minimum hex span between the two mouths of a wormhole.
const WORMHOLE_MIN_SPAN: u32 = 8;

/// Placement parameters, resolved from the galaxy settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub columns: u32,
    pub rows: u32,
    pub target_systems: u32,
    pub target_sites: u32,
    pub min_system_spacing: u32,
    pub min_site_spacing: u32,
    pub wormhole_pairs: u32,
}

impl PlacementConfig {
    /// Resolve the placement parameters for a galaxy.
    pub fn from_settings(settings: &GalaxySettings) -> Self {
        let (columns, rows) = settings.dimensions();
        Self {
            columns,
            rows,
            target_systems: settings.size.target_systems(),
            target_sites: settings.size.target_sites(),
            min_system_spacing: settings.min_system_spacing,
            min_site_spacing: settings.min_site_spacing,
            wormhole_pairs: settings.wormhole_pairs,
        }
    }

    /// Super-cell edge length for a target count on this grid.
    fn cell_size(&self, target: u32) -> u32 {
        let area = (self.columns * self.rows) as f32;
        let cell = (area / target.max(1) as f32).sqrt().ceil() as u32;
        cell.max(1)
    }
}

/// The loosened spacing used by the fallback pass, never below one.
pub const fn relaxed_spacing(min: u32) -> u32 {
    if min > 1 {
        min - 1
    } else {
        1
    }
}

/// What one generation run produced, split by pass so callers can tell
/// cleanly-spaced placements from relaxed ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// True when the galaxy was already generated and nothing was done.
    pub skipped: bool,
    /// Systems placed at the full minimum spacing.
    pub systems_placed: Vec<CubeCoord>,
    /// Systems placed by the fallback pass at relaxed spacing.
    pub systems_relaxed: Vec<CubeCoord>,
    /// Sites placed at the full minimum spacing.
    pub sites_placed: Vec<CubeCoord>,
    /// Sites placed by the fallback pass at relaxed spacing.
    pub sites_relaxed: Vec<CubeCoord>,
    /// Wormhole pairs threaded through empty space.
    pub wormholes: Vec<(CubeCoord, CubeCoord)>,
}

impl PlacementReport {
    /// Total generated systems across both passes.
    pub fn systems_total(&self) -> usize {
        self.systems_placed.len() + self.systems_relaxed.len()
    }

    /// Total generated sites across both passes.
    pub fn sites_total(&self) -> usize {
        self.sites_placed.len() + self.sites_relaxed.len()
    }
}

/// Populate an empty galaxy. Re-invoking on a generated galaxy is a no-op
/// so restored saves never regenerate on top of themselves.
pub fn generate(galaxy: &mut Galaxy, now: Timestamp) -> PlacementReport {
    let config = PlacementConfig::from_settings(&galaxy.settings);

    if galaxy.has_generated_systems() {
        tracing::debug!(
            galaxy = %galaxy.settings.name,
            "Galaxy already generated, skipping placement"
        );
        return PlacementReport {
            skipped: true,
            ..PlacementReport::default()
        };
    }

    let mut report = PlacementReport::default();

    seed_known_systems(galaxy);
    place_systems(galaxy, &config, &mut report);
    place_sites(galaxy, &config, &mut report, now);
    place_wormholes(galaxy, &config, &mut report);

    tracing::info!(
        galaxy = %galaxy.settings.name,
        systems = report.systems_total(),
        systems_relaxed = report.systems_relaxed.len(),
        sites = report.sites_total(),
        sites_relaxed = report.sites_relaxed.len(),
        wormholes = report.wormholes.len(),
        "Galaxy generated"
    );

    report
}

/// Insert the hand-placed systems, skipping any hex already occupied.
fn seed_known_systems(galaxy: &mut Galaxy) {
    for (coord, kind, name) in system::known_systems() {
        let id = coord.id();
        if !galaxy.systems.contains_key(&id) {
            galaxy
                .systems
                .insert(id, SystemRecord::new(coord, kind, name, Provenance::Known));
        }
    }
}

fn place_systems(galaxy: &mut Galaxy, config: &PlacementConfig, report: &mut PlacementReport) {
    let target = config.target_systems as usize;
    // Spacing is checked against every system, known ones included.
    let mut placed: Vec<CubeCoord> = galaxy.systems.values().map(|s| s.coord).collect();

    // Primary pass: roughly one candidate per super-cell, row-major.
    let cell = config.cell_size(config.target_systems);
    let cells_x = config.columns.div_ceil(cell);
    let cells_y = config.rows.div_ceil(cell);
    'cells: for cy in 0..cells_y {
        for cx in 0..cells_x {
            if report.systems_total() >= target {
                break 'cells;
            }
            for _ in 0..CELL_ATTEMPTS {
                let col = cx * cell + galaxy.rng.next_range(cell);
                let row = cy * cell + galaxy.rng.next_range(cell);
                if col >= config.columns || row >= config.rows {
                    continue;
                }
                let coord = CubeCoord::from_offset(col as i32, row as i32);
                if spaced(&coord, &placed, config.min_system_spacing) {
                    insert_generated_system(galaxy, coord);
                    placed.push(coord);
                    report.systems_placed.push(coord);
                    break;
                }
            }
        }
    }

    // Fallback pass: bounded random rolls at relaxed spacing.
    let relaxed = relaxed_spacing(config.min_system_spacing);
    let budget = config.target_systems * FALLBACK_ATTEMPTS_PER_TARGET;
    let mut attempts = 0;
    while report.systems_total() < target && attempts < budget {
        attempts += 1;
        let coord = random_coord(galaxy, config);
        if spaced(&coord, &placed, relaxed) {
            insert_generated_system(galaxy, coord);
            placed.push(coord);
            report.systems_relaxed.push(coord);
        }
    }
}

fn place_sites(
    galaxy: &mut Galaxy,
    config: &PlacementConfig,
    report: &mut PlacementReport,
    now: Timestamp,
) {
    let target = config.target_sites as usize;
    let mut placed: Vec<CubeCoord> = Vec::new();

    let cell = config.cell_size(config.target_sites);
    let cells_x = config.columns.div_ceil(cell);
    let cells_y = config.rows.div_ceil(cell);
    'cells: for cy in 0..cells_y {
        for cx in 0..cells_x {
            if report.sites_total() >= target {
                break 'cells;
            }
            for _ in 0..CELL_ATTEMPTS {
                let col = cx * cell + galaxy.rng.next_range(cell);
                let row = cy * cell + galaxy.rng.next_range(cell);
                if col >= config.columns || row >= config.rows {
                    continue;
                }
                let coord = CubeCoord::from_offset(col as i32, row as i32);
                if site_fits(galaxy, &coord, &placed, config.min_site_spacing) {
                    galaxy.ensure_site(&coord.id(), now);
                    placed.push(coord);
                    report.sites_placed.push(coord);
                    break;
                }
            }
        }
    }

    let relaxed = relaxed_spacing(config.min_site_spacing);
    let budget = config.target_sites * FALLBACK_ATTEMPTS_PER_TARGET;
    let mut attempts = 0;
    while report.sites_total() < target && attempts < budget {
        attempts += 1;
        let coord = random_coord(galaxy, config);
        if site_fits(galaxy, &coord, &placed, relaxed) {
            galaxy.ensure_site(&coord.id(), now);
            placed.push(coord);
            report.sites_relaxed.push(coord);
        }
    }
}

fn place_wormholes(galaxy: &mut Galaxy, config: &PlacementConfig, report: &mut PlacementReport) {
    for _ in 0..config.wormhole_pairs {
        let mut linked = false;
        for _ in 0..WORMHOLE_ATTEMPTS {
            let a = random_coord(galaxy, config);
            let b = random_coord(galaxy, config);
            if a.distance(&b) < WORMHOLE_MIN_SPAN {
                continue;
            }
            if occupied(galaxy, &a) || occupied(galaxy, &b) {
                continue;
            }
            galaxy.link_wormhole(a, b);
            report.wormholes.push((a, b));
            linked = true;
            break;
        }
        if !linked {
            // Grid too crowded for more spans; keep what we have.
            break;
        }
    }
}

fn insert_generated_system(galaxy: &mut Galaxy, coord: CubeCoord) {
    let kind = SystemKind::roll(&mut galaxy.rng);
    let name = system::roll_system_name(&mut galaxy.rng);
    galaxy.systems.insert(
        coord.id(),
        SystemRecord::new(coord, kind, &name, Provenance::Generated),
    );
}

fn random_coord(galaxy: &mut Galaxy, config: &PlacementConfig) -> CubeCoord {
    let col = galaxy.rng.next_range(config.columns);
    let row = galaxy.rng.next_range(config.rows);
    CubeCoord::from_offset(col as i32, row as i32)
}

fn spaced(coord: &CubeCoord, placed: &[CubeCoord], min: u32) -> bool {
    placed.iter().all(|p| coord.distance(p) >= min)
}

fn site_fits(galaxy: &Galaxy, coord: &CubeCoord, placed: &[CubeCoord], min: u32) -> bool {
    !galaxy.systems.contains_key(&coord.id()) && spaced(coord, placed, min)
}

fn occupied(galaxy: &Galaxy, coord: &CubeCoord) -> bool {
    let id = coord.id();
    galaxy.systems.contains_key(&id)
        || galaxy.sites.contains_key(&id)
        || galaxy.wormholes.contains_key(&id)
}
