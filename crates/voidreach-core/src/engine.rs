//! The command surface tying galaxy and player together.
//!
//! [`GameEngine`] owns one [`Galaxy`] and one [`Player`] and exposes every
//! action the outer layers may take: scan, navigate, trade, collect,
//! extract, buy equipment, and drive regeneration. Each command validates
//! everything up front and only then mutates, so a failed command leaves
//! both halves of the state untouched.

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryEntry;
use crate::error::{CoreError, CoreResult};
use crate::galaxy::{Galaxy, ScanReading};
use crate::hex::CubeCoord;
use crate::market::{self, Market, TradeLineOutcome, TradeOrder};
use crate::placement;
use crate::player::Player;
use crate::regen::RegenReport;
use crate::resource::{Equipment, ResourceKind};
use crate::settings::{GalaxySettings, SettingsError};
use crate::site::ResourceSite;
use crate::system::SystemRecord;
use crate::types::{Credits, HexId, HexState, Timestamp};

/// Action points one scan costs.
pub const SCAN_AP_COST: u32 = 1;

/// Action points one extraction costs.
pub const EXTRACT_AP_COST: u32 = 1;

/// What a completed jump produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalReport {
    /// Where the player ended up.
    pub destination: CubeCoord,
    /// Action points the jump cost (one per hex of distance).
    pub spent_ap: u32,
    /// True when this was the first arrival at the hex.
    pub newly_visited: bool,
    /// True when first arrival turned up a brand-new resource site.
    pub site_found: bool,
    /// The journal entry this arrival produced, if any.
    pub discovery: Option<DiscoveryEntry>,
}

/// Per-line results of one trade session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeReport {
    /// The market hex the session ran at.
    pub hex: HexId,
    /// One outcome per submitted order, in order.
    pub outcomes: Vec<TradeLineOutcome>,
}

impl TradeReport {
    /// Count the lines that completed as asked.
    pub fn filled(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_filled()).count()
    }

    /// Check whether every line completed.
    pub fn all_filled(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_filled())
    }
}

/// A running game: one galaxy, one pilot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    pub galaxy: Galaxy,
    pub player: Player,
}

impl GameEngine {
    /// Start a new game: validate settings, generate the galaxy, and dock
    /// the pilot at the homeworld.
    pub fn new_game(
        settings: GalaxySettings,
        callsign: &str,
        seed: [u8; 32],
        now: Timestamp,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut galaxy = Galaxy::new(settings, seed, now);
        placement::generate(&mut galaxy, now);

        let home = CubeCoord::origin();
        let player = Player::new(callsign, &galaxy.settings, home);
        let mut engine = Self { galaxy, player };

        // The pilot starts docked, so the homeworld opens the journal.
        let home_id = home.id();
        let _ = engine.galaxy.mark_visited(&home_id);
        engine.galaxy.evaluate_arrival(&home_id, now);

        tracing::info!(
            galaxy = %engine.galaxy.settings.name,
            callsign = %engine.player.callsign,
            "New game started"
        );
        Ok(engine)
    }

    // ------------------------------------------------------------------
    // Exploration
    // ------------------------------------------------------------------

    /// Scan a hex for one action point. Only unknown hexes can be
    /// scanned; the reading is rolled once and cached.
    pub fn scan_hex(&mut self, id: &str) -> CoreResult<ScanReading> {
        let coord = self.parse_in_bounds(id)?;
        if self.player.action_points < SCAN_AP_COST {
            return Err(CoreError::InsufficientActionPoints {
                required: SCAN_AP_COST,
                available: self.player.action_points,
            });
        }
        let reading = self.galaxy.mark_scanned(&coord.id())?;
        // Checked above; the scan cannot overdraw.
        let _ = self.player.spend_action_points(SCAN_AP_COST);
        Ok(reading)
    }

    /// Jump to a hex, paying one action point per hex of distance. First
    /// arrival marks the hex visited and may turn up a resource site;
    /// every arrival runs discovery evaluation, so a hex stacking several
    /// finds reveals them one per landing.
    pub fn navigate_to(&mut self, id: &str, now: Timestamp) -> CoreResult<ArrivalReport> {
        let destination = self.parse_in_bounds(id)?;
        let key = destination.id();
        let distance = self.player.location.distance(&destination);
        if distance == 0 {
            let state = self.galaxy.hex_state(&key);
            return Err(CoreError::AlreadyInState { hex: key, state });
        }
        self.player.spend_action_points(distance)?;
        self.player.location = destination;

        // The key is canonical, so marking cannot fail.
        let newly_visited = self.galaxy.mark_visited(&key).unwrap_or(false);
        let mut site_found = false;
        if newly_visited {
            site_found = self.galaxy.roll_first_visit_site(&key, now).is_some();
        }
        let discovery = self.galaxy.evaluate_arrival(&key, now);

        Ok(ArrivalReport {
            destination,
            spent_ap: distance,
            newly_visited,
            site_found,
            discovery,
        })
    }

    // ------------------------------------------------------------------
    // Economy
    // ------------------------------------------------------------------

    /// Run a trade session at the current hex. Requires a system; the
    /// market opens lazily on first trade. Every line settles atomically
    /// on its own, and a refused or interdicted line never stops the rest
    /// of the session.
    pub fn trade(&mut self, orders: &[TradeOrder]) -> CoreResult<TradeReport> {
        let key = self.player.location.id();
        self.galaxy.ensure_market(&key)?;

        let Galaxy { markets, rng, .. } = &mut self.galaxy;
        let Some(market) = markets.get_mut(&key) else {
            // ensure_market above either created it or bailed.
            return Err(CoreError::NoSystemAt(key));
        };

        let mut outcomes = Vec::with_capacity(orders.len());
        for order in orders {
            let outcome = match *order {
                TradeOrder::Buy { resource, quantity } => {
                    market::execute_buy(market, &mut self.player, rng, resource, quantity)
                }
                TradeOrder::Sell { resource, quantity } => {
                    market::execute_sell(market, &mut self.player, rng, resource, quantity)
                }
            };
            outcomes.push(outcome);
        }

        Ok(TradeReport { hex: key, outcomes })
    }

    /// Pick up one unit of tradable stock at the current site. Free of
    /// action points and equipment; only cargo space gates it.
    pub fn collect(&mut self, kind: ResourceKind) -> CoreResult<u32> {
        let key = self.player.location.id();
        let Some(site) = self.galaxy.sites.get_mut(&key) else {
            return Err(CoreError::NoSiteAt(key));
        };
        let Some(pool) = site.tradable.get_mut(&kind) else {
            return Err(CoreError::ResourceDepleted {
                hex: key,
                resource: kind,
            });
        };
        if pool.is_empty() {
            return Err(CoreError::ResourceDepleted {
                hex: key,
                resource: kind,
            });
        }
        let free = self.player.cargo.space_free();
        if free < 1 {
            return Err(CoreError::InsufficientCargoSpace {
                required: 1,
                available: free,
            });
        }
        let taken = pool.take(1);
        // Space checked above.
        let _ = self.player.cargo.add(kind, taken);
        Ok(taken)
    }

    /// Extract one unit of equipment-gated stock at the current site for
    /// one action point.
    pub fn extract(&mut self, kind: ResourceKind) -> CoreResult<u32> {
        let key = self.player.location.id();
        let Some(site) = self.galaxy.sites.get_mut(&key) else {
            return Err(CoreError::NoSiteAt(key));
        };
        let Some(pool) = site.extractable.get_mut(&kind) else {
            return Err(CoreError::ResourceDepleted {
                hex: key,
                resource: kind,
            });
        };
        if pool.is_empty() {
            return Err(CoreError::ResourceDepleted {
                hex: key,
                resource: kind,
            });
        }
        if let Some(equipment) = kind.required_equipment() {
            if !self.player.has_equipment(equipment) {
                return Err(CoreError::MissingEquipment {
                    resource: kind,
                    equipment,
                });
            }
        }
        let free = self.player.cargo.space_free();
        if free < 1 {
            return Err(CoreError::InsufficientCargoSpace {
                required: 1,
                available: free,
            });
        }
        self.player.spend_action_points(EXTRACT_AP_COST)?;
        let taken = pool.take(1);
        // Space checked above.
        let _ = self.player.cargo.add(kind, taken);
        Ok(taken)
    }

    /// Buy a piece of extraction equipment at a system. Returns the price
    /// paid.
    pub fn purchase_equipment(&mut self, equipment: Equipment) -> CoreResult<Credits> {
        let key = self.player.location.id();
        if !self.galaxy.systems.contains_key(&key) {
            return Err(CoreError::NoSystemAt(key));
        }
        if self.player.has_equipment(equipment) {
            return Err(CoreError::EquipmentOwned(equipment));
        }
        let price = equipment.price();
        self.player.spend_credits(price)?;
        self.player.equipment.insert(equipment);
        tracing::debug!(equipment = %equipment, price, "Equipment purchased");
        Ok(price)
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Run one daily regeneration pass now and re-arm the schedule.
    pub fn run_regeneration_tick(&mut self, now: Timestamp) -> RegenReport {
        self.galaxy.run_regeneration(now)
    }

    /// Catch up after downtime. However many daily boundaries the process
    /// slept through, a single pass brings every pool to its post-boundary
    /// level; regeneration does not accrue per missed day.
    pub fn catch_up(&mut self, now: Timestamp) -> Option<RegenReport> {
        let missed = self.galaxy.regen.boundaries_missed(now);
        if missed == 0 {
            return None;
        }
        if missed > 1 {
            tracing::info!(missed, "Catching up regeneration after downtime");
        }
        Some(self.galaxy.run_regeneration(now))
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Get the exploration state of a hex.
    pub fn hex_state(&self, id: &str) -> HexState {
        self.galaxy.hex_state(id)
    }

    /// Get the journal, oldest entry first.
    pub fn discovery_log(&self) -> &[DiscoveryEntry] {
        self.galaxy.discoveries.entries()
    }

    /// Get the system at the player's hex, if any.
    pub fn current_system(&self) -> Option<&SystemRecord> {
        self.galaxy.system(&self.player.location.id())
    }

    /// Get the resource site at the player's hex, if any.
    pub fn current_site(&self) -> Option<&ResourceSite> {
        self.galaxy.site(&self.player.location.id())
    }

    /// Get the market at the player's hex, if it has opened.
    pub fn current_market(&self) -> Option<&Market> {
        self.galaxy.market(&self.player.location.id())
    }

    /// Parse a hex id and reject anything outside the grid.
    fn parse_in_bounds(&self, id: &str) -> CoreResult<CubeCoord> {
        let coord: CubeCoord = id.parse()?;
        let (columns, rows) = self.galaxy.settings.dimensions();
        if !coord.in_bounds(columns, rows) {
            return Err(CoreError::InvalidCoordinate(id.to_string()));
        }
        Ok(coord)
    }
}
