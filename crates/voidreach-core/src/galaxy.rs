//! Root galaxy state containing all world data.
//!
//! The [`Galaxy`] owns everything the player does not: the hex-state sets,
//! scan readings and notes, star systems, resource sites, markets, wormhole
//! links, the discovery journal, and the regeneration schedule. All of it
//! lives in string-keyed BTree maps so iteration order is deterministic and
//! serialized state stays plain JSON objects.
//!
//! Mutation goes through the operations defined here; the rendering and
//! input layers read the accessors and call the command surface in
//! [`engine`](crate::engine). The three hex-state sets are kept private so
//! nothing outside this module can break their disjointness.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::discovery::{self, DiscoveryEntry, DiscoveryKind, DiscoveryLog};
use crate::error::{CoreError, CoreResult};
use crate::hex::{CubeCoord, Direction};
use crate::market::Market;
use crate::regen::{self, RegenReport, RegenSchedule};
use crate::rng::SeededRng;
use crate::settings::GalaxySettings;
use crate::site::{ResourceSite, SiteKind};
use crate::system::{Provenance, SystemRecord};
use crate::types::{HexId, HexState, Timestamp};

/// Scanner signal bands (low, high) by what actually occupies the hex.
/// Systems return a strong echo, wormholes and sites a weaker one, and
/// empty space reads as noise.
const SYSTEM_SIGNAL: (f32, f32) = (0.75, 0.95);
const WORMHOLE_SIGNAL: (f32, f32) = (0.55, 0.85);
const SITE_SIGNAL: (f32, f32) = (0.45, 0.80);
const NOISE_SIGNAL: (f32, f32) = (0.0, 0.30);

/// How far the scanner looks for a system to point its heading hint at.
const SCAN_HINT_RADIUS: u32 = 6;

/// One cached scanner return for a hex.
///
/// Rolled once when the hex is first scanned and kept forever; re-reading
/// the same hex never changes the estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanReading {
    /// Estimated probability that the hex holds something worth a visit.
    pub chance: f32,
    /// Coarse guess at what the echo is, if the signal is clean enough.
    pub hint: Option<DiscoveryKind>,
    /// Heading toward the nearest system within scanner range, if any.
    pub direction: Option<Direction>,
}

/// Category tag for a player note on a hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NoteLabel {
    #[default]
    General,
    Waypoint,
    Hazard,
    Avoid,
}

impl std::fmt::Display for NoteLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteLabel::General => write!(f, "general"),
            NoteLabel::Waypoint => write!(f, "waypoint"),
            NoteLabel::Hazard => write!(f, "hazard"),
            NoteLabel::Avoid => write!(f, "avoid"),
        }
    }
}

/// A free-form player annotation pinned to a hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexNote {
    pub label: NoteLabel,
    pub text: String,
}

/// The complete state of a galaxy at any point in time.
///
/// Designed to be fully serializable for save/load, reconstructable from a
/// snapshot with every invariant re-validated (see
/// [`snapshot`](crate::snapshot)), and comparable for determinism checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    /// Galaxy configuration (immutable after creation).
    pub settings: GalaxySettings,
    /// The seed this galaxy was created from.
    pub seed: [u8; 32],
    /// Live RNG state; serializes so a restored save resumes the sequence.
    pub rng: SeededRng,
    /// Hexes the player has scanned but not yet visited.
    pub(crate) scanned: BTreeSet<HexId>,
    /// Hexes the player has arrived at.
    pub(crate) visited: BTreeSet<HexId>,
    /// Hexes the player has claimed.
    pub(crate) claimed: BTreeSet<HexId>,
    /// Cached scanner returns per hex.
    pub readings: BTreeMap<HexId, ScanReading>,
    /// Player annotations per hex.
    pub notes: BTreeMap<HexId, HexNote>,
    /// Star systems by hex. Created once, never deleted.
    pub systems: BTreeMap<HexId, SystemRecord>,
    /// Resource sites by hex. Never on a system hex.
    pub sites: BTreeMap<HexId, ResourceSite>,
    /// Markets by system hex, created lazily on first trade.
    pub markets: BTreeMap<HexId, Market>,
    /// Wormhole links, stored in both directions.
    pub wormholes: BTreeMap<HexId, HexId>,
    /// The exploration journal and its dedup sets.
    pub discoveries: DiscoveryLog,
    /// Daily regeneration timer state.
    pub regen: RegenSchedule,
}

impl Galaxy {
    /// Create an empty galaxy. Systems and sites arrive through the
    /// placement engine; nothing is populated here.
    pub fn new(settings: GalaxySettings, seed: [u8; 32], now: Timestamp) -> Self {
        Self {
            settings,
            seed,
            rng: SeededRng::from_seed(&seed),
            scanned: BTreeSet::new(),
            visited: BTreeSet::new(),
            claimed: BTreeSet::new(),
            readings: BTreeMap::new(),
            notes: BTreeMap::new(),
            systems: BTreeMap::new(),
            sites: BTreeMap::new(),
            markets: BTreeMap::new(),
            wormholes: BTreeMap::new(),
            discoveries: DiscoveryLog::new(),
            regen: RegenSchedule::new(now),
        }
    }

    // ------------------------------------------------------------------
    // Hex state machine
    // ------------------------------------------------------------------

    /// Get the exploration state of a hex. Claimed outranks visited
    /// outranks scanned; anything untracked is unknown.
    pub fn hex_state(&self, id: &str) -> HexState {
        if self.claimed.contains(id) {
            HexState::Claimed
        } else if self.visited.contains(id) {
            HexState::Visited
        } else if self.scanned.contains(id) {
            HexState::Scanned
        } else {
            HexState::Unknown
        }
    }

    /// Scan a hex: only valid from unknown. Rolls (or re-uses) the cached
    /// reading and moves the hex into the scanned set.
    pub fn mark_scanned(&mut self, id: &str) -> CoreResult<ScanReading> {
        let coord: CubeCoord = id.parse()?;
        let key = coord.id();
        let state = self.hex_state(&key);
        if state != HexState::Unknown {
            return Err(CoreError::AlreadyInState { hex: key, state });
        }
        let reading = match self.readings.get(&key) {
            Some(cached) => *cached,
            None => {
                let rolled = self.roll_reading(&coord, &key);
                self.readings.insert(key.clone(), rolled);
                rolled
            }
        };
        self.scanned.insert(key);
        Ok(reading)
    }

    /// Record arrival at a hex. Returns true when the hex was newly
    /// visited; arriving at a visited or claimed hex is a state no-op.
    pub fn mark_visited(&mut self, id: &str) -> CoreResult<bool> {
        let coord: CubeCoord = id.parse()?;
        let key = coord.id();
        match self.hex_state(&key) {
            HexState::Visited | HexState::Claimed => Ok(false),
            HexState::Scanned => {
                self.scanned.remove(&key);
                self.visited.insert(key);
                Ok(true)
            }
            HexState::Unknown => {
                self.visited.insert(key);
                Ok(true)
            }
        }
    }

    /// Claim a hex: only valid from visited. The rule for *when* a claim
    /// is allowed belongs to the outer layer; only the state slot is here.
    pub fn claim(&mut self, id: &str) -> CoreResult<()> {
        let coord: CubeCoord = id.parse()?;
        let key = coord.id();
        match self.hex_state(&key) {
            HexState::Claimed => Err(CoreError::AlreadyInState {
                hex: key,
                state: HexState::Claimed,
            }),
            HexState::Visited => {
                self.visited.remove(&key);
                self.claimed.insert(key);
                Ok(())
            }
            state => Err(CoreError::InvalidTransition {
                hex: key,
                from: state,
                to: HexState::Claimed,
            }),
        }
    }

    /// Hexes currently in the scanned set.
    pub fn scanned_hexes(&self) -> &BTreeSet<HexId> {
        &self.scanned
    }

    /// Hexes currently in the visited set.
    pub fn visited_hexes(&self) -> &BTreeSet<HexId> {
        &self.visited
    }

    /// Hexes currently in the claimed set.
    pub fn claimed_hexes(&self) -> &BTreeSet<HexId> {
        &self.claimed
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Get the cached scan reading for a hex, if one was ever taken.
    pub fn reading(&self, id: &str) -> Option<&ScanReading> {
        self.readings.get(id)
    }

    /// Get the system at a hex.
    pub fn system(&self, id: &str) -> Option<&SystemRecord> {
        self.systems.get(id)
    }

    /// Get the resource site at a hex.
    pub fn site(&self, id: &str) -> Option<&ResourceSite> {
        self.sites.get(id)
    }

    /// Get the market at a system hex, if it has opened.
    pub fn market(&self, id: &str) -> Option<&Market> {
        self.markets.get(id)
    }

    /// Get the far mouth of a wormhole terminus.
    pub fn wormhole_exit(&self, id: &str) -> Option<&HexId> {
        self.wormholes.get(id)
    }

    /// Get the player note on a hex.
    pub fn note(&self, id: &str) -> Option<&HexNote> {
        self.notes.get(id)
    }

    /// Check whether the placement engine has already populated this
    /// galaxy. Guards restored saves against silent regeneration.
    pub fn has_generated_systems(&self) -> bool {
        self.systems
            .values()
            .any(|s| s.provenance == Provenance::Generated)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Pin a note to a hex, replacing any previous one.
    pub fn set_note(&mut self, id: &str, note: HexNote) -> CoreResult<()> {
        let coord: CubeCoord = id.parse()?;
        self.notes.insert(coord.id(), note);
        Ok(())
    }

    /// Remove and return the note on a hex.
    pub fn clear_note(&mut self, id: &str) -> Option<HexNote> {
        self.notes.remove(id)
    }

    /// Link two hexes as a wormhole pair, in both directions.
    pub fn link_wormhole(&mut self, a: CubeCoord, b: CubeCoord) {
        self.wormholes.insert(a.id(), b.id());
        self.wormholes.insert(b.id(), a.id());
    }

    /// Idempotent market accessor: returns the existing market for a
    /// system hex, or rolls one on first use. Fails if no system is there.
    pub fn ensure_market(&mut self, id: &str) -> CoreResult<&Market> {
        let Galaxy {
            systems,
            markets,
            rng,
            ..
        } = self;
        let security = systems
            .get(id)
            .map(|s| s.kind.security_level())
            .ok_or_else(|| CoreError::NoSystemAt(id.to_string()))?;
        Ok(markets.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(hex = id, security = %security, "Market opened");
            Market::generate(security, rng)
        }))
    }

    /// Idempotent site accessor: returns the existing site, or generates
    /// one for an empty hex. System hexes never get a site; they are
    /// served by markets instead.
    pub fn ensure_site(&mut self, id: &str, now: Timestamp) -> Option<&ResourceSite> {
        if self.systems.contains_key(id) {
            return None;
        }
        let Galaxy { sites, rng, .. } = self;
        Some(sites.entry(id.to_string()).or_insert_with(|| {
            let kind = SiteKind::roll(rng);
            tracing::debug!(hex = id, kind = %kind, "Resource site generated");
            ResourceSite::generate(kind, rng, now)
        }))
    }

    /// Roll the first-visit site discovery chance for an empty hex.
    /// Returns the new site only when one was created by this call.
    pub fn roll_first_visit_site(&mut self, id: &str, now: Timestamp) -> Option<&ResourceSite> {
        if self.systems.contains_key(id) || self.sites.contains_key(id) {
            return None;
        }
        if !self.rng.chance(self.settings.site_discovery_chance) {
            return None;
        }
        self.ensure_site(id, now)
    }

    /// Evaluate discoveries on arrival at a hex. First match wins, in
    /// priority order system, wormhole, then resource, so each arrival
    /// produces at most one journal entry. A hex holding several
    /// discoverables reveals them across successive arrivals.
    pub fn evaluate_arrival(&mut self, id: &str, now: Timestamp) -> Option<DiscoveryEntry> {
        if let Some(system) = self.systems.get_mut(id) {
            if !self.discoveries.is_discovered(DiscoveryKind::System, id) {
                if system.discovered_at.is_none() {
                    system.discovered_at = Some(now);
                }
                let entry = discovery::system_entry(system, now);
                self.discoveries.record(entry.clone());
                return Some(entry);
            }
        }
        if let Some(exit) = self.wormholes.get(id) {
            if !self.discoveries.is_discovered(DiscoveryKind::Wormhole, id) {
                let entry = discovery::wormhole_entry(id, exit, now);
                self.discoveries.record(entry.clone());
                return Some(entry);
            }
        }
        if let Some(site) = self.sites.get(id) {
            if !self.discoveries.is_discovered(DiscoveryKind::Resource, id) {
                let entry = discovery::site_entry(id, site, now);
                self.discoveries.record(entry.clone());
                return Some(entry);
            }
        }
        None
    }

    /// Run one regeneration pass over every site and re-arm the schedule.
    pub fn run_regeneration(&mut self, now: Timestamp) -> RegenReport {
        let report = regen::run_pass(&mut self.sites, now);
        self.regen.mark_run(now);
        report
    }

    /// Roll the scanner return for a hex from what actually occupies it.
    fn roll_reading(&mut self, coord: &CubeCoord, key: &str) -> ScanReading {
        let Galaxy {
            systems,
            sites,
            wormholes,
            rng,
            ..
        } = self;

        let ((lo, hi), hint) = if systems.contains_key(key) {
            (SYSTEM_SIGNAL, Some(DiscoveryKind::System))
        } else if wormholes.contains_key(key) {
            (WORMHOLE_SIGNAL, Some(DiscoveryKind::Wormhole))
        } else if sites.contains_key(key) {
            (SITE_SIGNAL, Some(DiscoveryKind::Resource))
        } else {
            (NOISE_SIGNAL, None)
        };

        // Point the heading hint at the closest system in scanner range.
        // BTree iteration makes ties resolve the same way every time.
        let mut nearest: Option<(u32, CubeCoord)> = None;
        for system in systems.values() {
            let d = coord.distance(&system.coord);
            if d == 0 || d > SCAN_HINT_RADIUS {
                continue;
            }
            if nearest.map_or(true, |(best, _)| d < best) {
                nearest = Some((d, system.coord));
            }
        }
        let direction = nearest.and_then(|(_, target)| coord.direction_to(&target));

        ScanReading {
            chance: rng.next_f32_between(lo, hi),
            hint,
            direction,
        }
    }
}
