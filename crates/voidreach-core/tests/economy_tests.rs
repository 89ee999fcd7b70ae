//! Integration tests for the resource economy.
//!
//! These tests verify markets, harvesting, regeneration, and persistence:
//! - Lazy market generation and quote persistence
//! - Atomic order lines, exact settlement, and refusal isolation
//! - Interdiction odds, seizures, and fines by security level
//! - Collection, equipment-gated extraction, and cargo limits
//! - Daily regeneration, one-time sites, and downtime catch-up
//! - Snapshot round trips and corruption repair

use std::collections::BTreeMap;

use voidreach_core::{
    engine::GameEngine,
    error::CoreError,
    hex::CubeCoord,
    market::{Market, MarketEntry, TradeLineOutcome, TradeOrder},
    resource::{Equipment, ResourceKind},
    rng::SeededRng,
    settings::GalaxySettings,
    site::{ResourcePool, ResourceSite, SiteKind},
    snapshot::GameSnapshot,
    system::SecurityLevel,
    types::{Credits, Timestamp},
    SECONDS_PER_DAY,
};

const NOW: Timestamp = 1_722_000_000;
const HOME: &str = "0,0,0";

// =============================================================================
// Test Helpers
// =============================================================================

fn engine(seed: u8) -> GameEngine {
    let settings = GalaxySettings::compact("Trade Lanes".to_string());
    GameEngine::new_game(settings, "Corsair", [seed; 32], NOW).unwrap()
}

/// In-bounds hex at exactly `distance` from the homeworld with nothing on it.
///
/// Generated systems keep their spacing away from the origin, so a
/// system-free hex always exists at these ranges. Any site or wormhole
/// squatting on the pick is cleared out first.
fn empty_hex_at(engine: &mut GameEngine, distance: u32) -> CubeCoord {
    let (columns, rows) = engine.galaxy.settings.size.dimensions();
    let origin = CubeCoord::origin();
    let coord = origin
        .hexes_in_radius(distance)
        .into_iter()
        .find(|c| {
            origin.distance(c) == distance
                && c.in_bounds(columns, rows)
                && !engine.galaxy.systems.contains_key(&c.id())
        })
        .expect("no system-free hex at this range");
    let key = coord.id();
    engine.galaxy.sites.remove(&key);
    if let Some(exit) = engine.galaxy.wormholes.remove(&key) {
        engine.galaxy.wormholes.remove(&exit);
    }
    coord
}

/// A pilot parked one hex off the homeworld, on empty space.
fn engine_off_system(seed: u8) -> GameEngine {
    let mut engine = engine(seed);
    engine.galaxy.settings.site_discovery_chance = 0.0;
    let target = empty_hex_at(&mut engine, 1);
    engine.navigate_to(&target.id(), NOW).unwrap();
    engine
}

/// Pin the homeworld quote for one resource so settlement math is exact.
fn fix_home_quote(
    engine: &mut GameEngine,
    resource: ResourceKind,
    buy: Credits,
    sell: Credits,
    stock: u32,
) {
    engine.trade(&[]).unwrap();
    let market = engine.galaxy.markets.get_mut(HOME).unwrap();
    market.entries.insert(
        resource,
        MarketEntry {
            buy_price: buy,
            sell_price: sell,
            stock,
        },
    );
}

/// Drop a hand-built site under the pilot's current position.
fn plant_site_here(engine: &mut GameEngine) -> String {
    let key = engine.player.location.id();
    let mut tradable = BTreeMap::new();
    tradable.insert(ResourceKind::FerriteOre, ResourcePool::new(3, 4, 1));
    let mut extractable = BTreeMap::new();
    extractable.insert(ResourceKind::RareEarths, ResourcePool::new(2, 3, 1));
    engine.galaxy.sites.insert(
        key.clone(),
        ResourceSite {
            kind: SiteKind::AsteroidField,
            tradable,
            extractable,
            last_update: NOW,
        },
    );
    key
}

// =============================================================================
// Markets
// =============================================================================

#[test]
fn test_market_opens_lazily_with_a_full_catalog() {
    let mut engine = engine(1);
    assert!(engine.galaxy.market(HOME).is_none());

    engine.trade(&[]).unwrap();

    let market = engine.galaxy.market(HOME).expect("market did not open");
    assert_eq!(market.security, SecurityLevel::Core);
    assert_eq!(market.entries.len(), ResourceKind::all().len());
    for entry in market.entries.values() {
        assert!(entry.buy_price >= 2);
        assert!(entry.sell_price < entry.buy_price);
        assert!(entry.sell_price >= 1);
        assert!((1..=10).contains(&entry.stock));
    }
}

#[test]
fn test_quotes_persist_between_sessions() {
    let mut engine = engine(2);
    engine.trade(&[]).unwrap();
    let first = engine.galaxy.market(HOME).unwrap().clone();

    engine.trade(&[]).unwrap();
    assert_eq!(engine.galaxy.market(HOME), Some(&first));
}

#[test]
fn test_trade_away_from_any_system_is_rejected() {
    let mut engine = engine_off_system(3);
    let here = engine.player.location.id();

    let err = engine.trade(&[]).unwrap_err();
    assert_eq!(err, CoreError::NoSystemAt(here));
}

#[test]
fn test_buy_settles_wallet_hold_and_stock_exactly() {
    let mut engine = engine(4);
    fix_home_quote(&mut engine, ResourceKind::RareEarths, 80, 60, 10);

    let report = engine
        .trade(&[TradeOrder::Buy {
            resource: ResourceKind::RareEarths,
            quantity: 5,
        }])
        .unwrap();

    assert!(report.all_filled());
    assert_eq!(
        report.outcomes[0],
        TradeLineOutcome::Filled {
            order: TradeOrder::Buy {
                resource: ResourceKind::RareEarths,
                quantity: 5,
            },
            unit_price: 80,
            total: 400,
        }
    );
    assert_eq!(engine.player.credits, 1247 - 400);
    assert_eq!(engine.player.cargo.quantity(ResourceKind::RareEarths), 5);
    let entry = engine.galaxy.market(HOME).unwrap().entry(ResourceKind::RareEarths);
    assert_eq!(entry.unwrap().stock, 5);
}

#[test]
fn test_sell_pays_out_and_returns_stock() {
    let mut engine = engine(5);
    fix_home_quote(&mut engine, ResourceKind::RareEarths, 80, 60, 10);
    engine
        .trade(&[TradeOrder::Buy {
            resource: ResourceKind::RareEarths,
            quantity: 5,
        }])
        .unwrap();

    let report = engine
        .trade(&[TradeOrder::Sell {
            resource: ResourceKind::RareEarths,
            quantity: 3,
        }])
        .unwrap();

    assert!(report.all_filled());
    assert_eq!(engine.player.credits, 1247 - 400 + 180);
    assert_eq!(engine.player.cargo.quantity(ResourceKind::RareEarths), 2);
    let entry = engine.galaxy.market(HOME).unwrap().entry(ResourceKind::RareEarths);
    assert_eq!(entry.unwrap().stock, 8);
}

#[test]
fn test_refused_line_does_not_stop_the_session() {
    let mut engine = engine(6);
    fix_home_quote(&mut engine, ResourceKind::FerriteOre, 10, 8, 10);

    let report = engine
        .trade(&[
            TradeOrder::Buy {
                resource: ResourceKind::FerriteOre,
                quantity: 4,
            },
            TradeOrder::Buy {
                resource: ResourceKind::FerriteOre,
                quantity: 40,
            },
            TradeOrder::Sell {
                resource: ResourceKind::FerriteOre,
                quantity: 2,
            },
        ])
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.filled(), 2);
    assert!(!report.all_filled());
    assert!(matches!(
        report.outcomes[1],
        TradeLineOutcome::Refused {
            reason: CoreError::InsufficientInventory { .. },
            ..
        }
    ));
    // First and third lines settled around the refusal.
    assert_eq!(engine.player.credits, 1247 - 40 + 16);
    assert_eq!(engine.player.cargo.quantity(ResourceKind::FerriteOre), 2);
}

#[test]
fn test_buy_refusals_leave_no_trace() {
    let mut engine = engine(7);

    // Stock shortfall.
    fix_home_quote(&mut engine, ResourceKind::WaterIce, 10, 7, 10);
    let report = engine
        .trade(&[TradeOrder::Buy {
            resource: ResourceKind::WaterIce,
            quantity: 11,
        }])
        .unwrap();
    assert!(matches!(
        report.outcomes[0],
        TradeLineOutcome::Refused {
            reason: CoreError::InsufficientInventory { .. },
            ..
        }
    ));

    // Hold shortfall.
    fix_home_quote(&mut engine, ResourceKind::WaterIce, 10, 7, 25);
    let report = engine
        .trade(&[TradeOrder::Buy {
            resource: ResourceKind::WaterIce,
            quantity: 25,
        }])
        .unwrap();
    assert!(matches!(
        report.outcomes[0],
        TradeLineOutcome::Refused {
            reason: CoreError::InsufficientCargoSpace { .. },
            ..
        }
    ));

    // Wallet shortfall.
    fix_home_quote(&mut engine, ResourceKind::WaterIce, 1000, 700, 10);
    let report = engine
        .trade(&[TradeOrder::Buy {
            resource: ResourceKind::WaterIce,
            quantity: 2,
        }])
        .unwrap();
    assert!(matches!(
        report.outcomes[0],
        TradeLineOutcome::Refused {
            reason: CoreError::InsufficientCredits { .. },
            ..
        }
    ));

    assert_eq!(engine.player.credits, 1247);
    assert!(engine.player.cargo.contents.is_empty());
}

#[test]
fn test_selling_goods_not_held_is_refused() {
    let mut engine = engine(8);
    engine.trade(&[]).unwrap();

    let report = engine
        .trade(&[TradeOrder::Sell {
            resource: ResourceKind::Helium3,
            quantity: 1,
        }])
        .unwrap();

    assert!(matches!(
        report.outcomes[0],
        TradeLineOutcome::Refused {
            reason: CoreError::InsufficientGoods { .. },
            ..
        }
    ));
}

// =============================================================================
// Interdiction
// =============================================================================

#[test]
fn test_core_space_interdicts_half_the_smuggling_runs() {
    let mut engine = engine(9);
    fix_home_quote(&mut engine, ResourceKind::SpiceExtract, 80, 50, 5);
    engine.player.credits = 1_000_000;

    let mut caught = 0u32;
    for _ in 0..1000 {
        engine
            .player
            .cargo
            .add(ResourceKind::SpiceExtract, 1)
            .unwrap();
        let report = engine
            .trade(&[TradeOrder::Sell {
                resource: ResourceKind::SpiceExtract,
                quantity: 1,
            }])
            .unwrap();
        match &report.outcomes[0] {
            TradeLineOutcome::Interdicted {
                confiscated, fine, ..
            } => {
                caught += 1;
                assert_eq!(*confiscated, 1);
                // Fines always exceed the goods' value.
                assert!(*fine >= 75 && *fine <= 150, "fine {fine} out of band");
            }
            TradeLineOutcome::Filled { total, .. } => assert_eq!(*total, 50),
            other => panic!("unexpected outcome {other:?}"),
        }
        // Sold or seized, the hold is empty either way.
        assert_eq!(engine.player.cargo.quantity(ResourceKind::SpiceExtract), 0);
    }

    // Core space catches 50%; allow wide statistical slack.
    assert!((400..=600).contains(&caught), "caught {caught} of 1000");
}

#[test]
fn test_pirate_space_rarely_interdicts() {
    let mut engine = engine(10);
    fix_home_quote(&mut engine, ResourceKind::SpiceExtract, 80, 50, 5);
    engine.galaxy.markets.get_mut(HOME).unwrap().security = SecurityLevel::Pirate;
    engine.player.credits = 1_000_000;

    let mut caught = 0u32;
    for _ in 0..1000 {
        engine
            .player
            .cargo
            .add(ResourceKind::SpiceExtract, 1)
            .unwrap();
        let report = engine
            .trade(&[TradeOrder::Sell {
                resource: ResourceKind::SpiceExtract,
                quantity: 1,
            }])
            .unwrap();
        if matches!(report.outcomes[0], TradeLineOutcome::Interdicted { .. }) {
            caught += 1;
        }
    }

    // A 2% catch rate stays far below the Core figure.
    assert!(caught <= 60, "caught {caught} of 1000");
}

#[test]
fn test_legal_goods_are_never_interdicted() {
    let mut engine = engine(11);
    fix_home_quote(&mut engine, ResourceKind::FerriteOre, 10, 8, 1);

    for _ in 0..200 {
        engine.player.cargo.add(ResourceKind::FerriteOre, 1).unwrap();
        let report = engine
            .trade(&[TradeOrder::Sell {
                resource: ResourceKind::FerriteOre,
                quantity: 1,
            }])
            .unwrap();
        assert!(report.all_filled());
    }
}

#[test]
fn test_contraband_premium_tracks_security() {
    // Identical rolls, different jurisdictions.
    let mut core_rng = SeededRng::from_seed(&[42u8; 32]);
    let mut pirate_rng = SeededRng::from_seed(&[42u8; 32]);
    let core = Market::generate(SecurityLevel::Core, &mut core_rng);
    let pirate = Market::generate(SecurityLevel::Pirate, &mut pirate_rng);

    for &kind in ResourceKind::all() {
        let core_buy = core.entry(kind).unwrap().buy_price;
        let pirate_buy = pirate.entry(kind).unwrap().buy_price;
        if kind.is_illegal() {
            assert!(core_buy > pirate_buy, "{kind:?} not marked up in core space");
        } else {
            assert_eq!(core_buy, pirate_buy);
        }
    }
}

#[test]
fn test_interdicted_buy_seizes_nothing_but_fines() {
    let mut engine = engine(12);

    let mut saw_interdiction = false;
    for _ in 0..200 {
        fix_home_quote(&mut engine, ResourceKind::SpiceExtract, 100, 70, 10);
        engine.player.cargo.contents.clear();
        engine.player.credits = 10_000;

        let report = engine
            .trade(&[TradeOrder::Buy {
                resource: ResourceKind::SpiceExtract,
                quantity: 1,
            }])
            .unwrap();

        if let TradeLineOutcome::Interdicted {
            confiscated, fine, ..
        } = &report.outcomes[0]
        {
            saw_interdiction = true;
            // The goods were never delivered, so nothing is seized and
            // the shelf keeps its stock; only the fine lands.
            assert_eq!(*confiscated, 0);
            assert_eq!(engine.player.cargo.quantity(ResourceKind::SpiceExtract), 0);
            let market = engine.galaxy.market(HOME).unwrap();
            assert_eq!(market.entry(ResourceKind::SpiceExtract).unwrap().stock, 10);
            assert_eq!(engine.player.credits, 10_000 - fine);
            break;
        }
    }
    assert!(saw_interdiction, "no catch in 200 core-space buys");
}

// =============================================================================
// Collection and Extraction
// =============================================================================

#[test]
fn test_collection_draws_down_the_free_pool() {
    let mut engine = engine_off_system(13);
    let key = plant_site_here(&mut engine);
    let ap_before = engine.player.action_points;

    for held in 1..=3u32 {
        assert_eq!(engine.collect(ResourceKind::FerriteOre).unwrap(), 1);
        assert_eq!(engine.player.cargo.quantity(ResourceKind::FerriteOre), held);
    }
    // Collection is free of charge.
    assert_eq!(engine.player.action_points, ap_before);

    let err = engine.collect(ResourceKind::FerriteOre).unwrap_err();
    assert_eq!(
        err,
        CoreError::ResourceDepleted {
            hex: key,
            resource: ResourceKind::FerriteOre,
        }
    );
}

#[test]
fn test_extraction_needs_the_right_tool_and_a_point() {
    let mut engine = engine(14);
    engine.purchase_equipment(Equipment::MiningLaser).unwrap();
    assert_eq!(engine.player.credits, 1247 - 400);

    engine.galaxy.settings.site_discovery_chance = 0.0;
    let target = empty_hex_at(&mut engine, 1);
    engine.navigate_to(&target.id(), NOW).unwrap();
    plant_site_here(&mut engine);

    assert_eq!(engine.extract(ResourceKind::RareEarths).unwrap(), 1);
    assert_eq!(engine.player.cargo.quantity(ResourceKind::RareEarths), 1);
    // One point for the jump, one for the extraction.
    assert_eq!(engine.player.action_points, 8);
}

#[test]
fn test_extraction_without_equipment_is_refused() {
    let mut engine = engine_off_system(15);
    plant_site_here(&mut engine);
    let ap_before = engine.player.action_points;

    let err = engine.extract(ResourceKind::RareEarths).unwrap_err();
    assert_eq!(
        err,
        CoreError::MissingEquipment {
            resource: ResourceKind::RareEarths,
            equipment: Equipment::MiningLaser,
        }
    );
    assert_eq!(engine.player.action_points, ap_before);
}

#[test]
fn test_empty_pool_reports_before_missing_equipment() {
    let mut engine = engine_off_system(16);
    let key = plant_site_here(&mut engine);
    engine
        .galaxy
        .sites
        .get_mut(&key)
        .unwrap()
        .extractable
        .get_mut(&ResourceKind::RareEarths)
        .unwrap()
        .current = 0;

    // No equipment owned, but the depletion is what gets reported.
    let err = engine.extract(ResourceKind::RareEarths).unwrap_err();
    assert!(matches!(err, CoreError::ResourceDepleted { .. }));
}

#[test]
fn test_harvesting_unknown_kinds_reads_as_depleted() {
    let mut engine = engine_off_system(17);
    plant_site_here(&mut engine);

    assert!(matches!(
        engine.collect(ResourceKind::WaterIce),
        Err(CoreError::ResourceDepleted { .. })
    ));
    assert!(matches!(
        engine.extract(ResourceKind::WaterIce),
        Err(CoreError::ResourceDepleted { .. })
    ));
}

#[test]
fn test_harvesting_off_site_is_rejected() {
    let mut engine = engine(18);

    assert!(matches!(
        engine.collect(ResourceKind::FerriteOre),
        Err(CoreError::NoSiteAt(_))
    ));
    assert!(matches!(
        engine.extract(ResourceKind::FerriteOre),
        Err(CoreError::NoSiteAt(_))
    ));
}

#[test]
fn test_full_hold_blocks_collection() {
    let mut engine = engine_off_system(19);
    let key = plant_site_here(&mut engine);
    let capacity = engine.player.cargo.capacity;
    engine.player.cargo.add(ResourceKind::WaterIce, capacity).unwrap();

    let err = engine.collect(ResourceKind::FerriteOre).unwrap_err();
    assert!(matches!(err, CoreError::InsufficientCargoSpace { .. }));
    // The pool was not touched.
    let pool = &engine.galaxy.site(&key).unwrap().tradable[&ResourceKind::FerriteOre];
    assert_eq!(pool.current, 3);
}

#[test]
fn test_equipment_is_bought_once_at_systems_only() {
    let mut engine = engine(20);

    assert_eq!(engine.purchase_equipment(Equipment::MiningLaser), Ok(400));
    assert_eq!(
        engine.purchase_equipment(Equipment::MiningLaser),
        Err(CoreError::EquipmentOwned(Equipment::MiningLaser))
    );
    assert_eq!(
        engine.purchase_equipment(Equipment::QuantumHarvester),
        Err(CoreError::InsufficientCredits {
            required: 1500,
            available: 847,
        })
    );

    let mut drifting = engine_off_system(21);
    let here = drifting.player.location.id();
    assert_eq!(
        drifting.purchase_equipment(Equipment::GasSiphon),
        Err(CoreError::NoSystemAt(here))
    );
}

// =============================================================================
// Regeneration
// =============================================================================

#[test]
fn test_daily_pass_tops_up_harvested_pools() {
    let mut engine = engine_off_system(22);
    let key = plant_site_here(&mut engine);
    for _ in 0..3 {
        engine.collect(ResourceKind::FerriteOre).unwrap();
    }

    let report = engine.run_regeneration_tick(NOW + 120);

    assert!(report.sites_touched >= 1);
    assert!(report.units_restored >= 1);
    let site = engine.galaxy.site(&key).unwrap();
    assert_eq!(site.tradable[&ResourceKind::FerriteOre].current, 1);
    // The untouched extractable pool climbed a tick too.
    assert_eq!(site.extractable[&ResourceKind::RareEarths].current, 3);
    assert_eq!(engine.galaxy.regen.last_run, NOW + 120);
}

#[test]
fn test_one_time_sites_stay_depleted() {
    let mut engine = engine_off_system(23);
    let key = engine.player.location.id();
    let mut tradable = BTreeMap::new();
    tradable.insert(ResourceKind::VoidOpals, ResourcePool::new(2, 2, 0));
    engine.galaxy.sites.insert(
        key.clone(),
        ResourceSite {
            kind: SiteKind::DerelictShip,
            tradable,
            extractable: BTreeMap::new(),
            last_update: NOW,
        },
    );

    engine.collect(ResourceKind::VoidOpals).unwrap();
    engine.collect(ResourceKind::VoidOpals).unwrap();

    let report = engine.run_regeneration_tick(NOW + 240);

    assert!(report.skipped_one_time >= 1);
    let pool = &engine.galaxy.site(&key).unwrap().tradable[&ResourceKind::VoidOpals];
    assert_eq!(pool.current, 0);
}

#[test]
fn test_catch_up_runs_one_pass_however_long_the_sleep() {
    let mut engine = engine_off_system(24);
    let key = plant_site_here(&mut engine);
    for _ in 0..3 {
        engine.collect(ResourceKind::FerriteOre).unwrap();
    }

    // Same day: nothing due.
    assert!(engine.catch_up(NOW + 60).is_none());

    // Five days later: one pass, not five.
    let later = NOW + 5 * SECONDS_PER_DAY;
    let report = engine.catch_up(later).expect("pass not run");
    assert!(report.units_restored >= 1);
    let pool = &engine.galaxy.site(&key).unwrap().tradable[&ResourceKind::FerriteOre];
    assert_eq!(pool.current, 1);

    // The schedule re-armed; the same day stays quiet.
    assert!(engine.catch_up(later + 60).is_none());
}

#[test]
fn test_regeneration_refills_big_rolls_to_their_own_max() {
    let mut engine = engine_off_system(25);
    let key = engine.player.location.id();
    let mut tradable = BTreeMap::new();
    // Exotic Crystals table out at 5 units; this vein rolled bigger.
    tradable.insert(ResourceKind::ExoticCrystals, ResourcePool::new(0, 9, 1));
    engine.galaxy.sites.insert(
        key.clone(),
        ResourceSite {
            kind: SiteKind::CrystalGrotto,
            tradable,
            extractable: BTreeMap::new(),
            last_update: NOW,
        },
    );

    for day in 1..=20 {
        engine.run_regeneration_tick(NOW + day * SECONDS_PER_DAY);
    }

    // Capacity is the larger of the pool's own max and the table, so
    // the vein climbs back to 9 instead of stalling at 5.
    let pool = &engine.galaxy.site(&key).unwrap().tradable[&ResourceKind::ExoticCrystals];
    assert_eq!(pool.current, 9);
    assert_eq!(pool.max, 9);
}

#[test]
fn test_regeneration_grows_small_pools_toward_the_table() {
    let mut engine = engine_off_system(29);
    let key = engine.player.location.id();
    let mut tradable = BTreeMap::new();
    // Helium-3 tables out at 18; this pocket rolled a max of 4.
    tradable.insert(ResourceKind::Helium3, ResourcePool::new(4, 4, 3));
    engine.galaxy.sites.insert(
        key.clone(),
        ResourceSite {
            kind: SiteKind::GasCloud,
            tradable,
            extractable: BTreeMap::new(),
            last_update: NOW,
        },
    );

    for day in 1..=10 {
        engine.run_regeneration_tick(NOW + day * SECONDS_PER_DAY);
    }

    // The table is the floor on capacity, and the recorded max keeps
    // up with the growth.
    let pool = &engine.galaxy.site(&key).unwrap().tradable[&ResourceKind::Helium3];
    assert_eq!(pool.current, 18);
    assert_eq!(pool.max, 18);
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_round_trip_preserves_the_session() {
    let mut engine = engine(26);
    fix_home_quote(&mut engine, ResourceKind::Helium3, 40, 30, 10);
    engine
        .trade(&[TradeOrder::Buy {
            resource: ResourceKind::Helium3,
            quantity: 4,
        }])
        .unwrap();

    let target = empty_hex_at(&mut engine, 2).id();

    let json = GameSnapshot::capture(&engine).to_json().unwrap();
    let (mut restored, report) = GameSnapshot::from_json(&json).unwrap().restore();

    assert!(report.is_clean(), "clean save repaired: {report:?}");
    assert_eq!(restored, engine);

    // The random stream resumes in lockstep with the live game.
    let live = engine.scan_hex(&target).unwrap();
    let loaded = restored.scan_hex(&target).unwrap();
    assert_eq!(live, loaded);
}

#[test]
fn test_restore_repairs_a_tampered_save() {
    let engine = engine(27);
    let json = GameSnapshot::capture(&engine).to_json().unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["player"]["credits"] = serde_json::json!(-300);
    value["player"]["action_points"] = serde_json::json!(99);
    value["galaxy"]["scanned"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!("garbage"));

    let snapshot = GameSnapshot::from_json(&value.to_string()).unwrap();
    let (restored, report) = snapshot.restore();

    assert!(!report.is_clean());
    assert!(report.dropped_keys >= 1);
    assert!(report.repaired_player >= 2);
    assert_eq!(restored.player.credits, 0);
    assert_eq!(restored.player.action_points, 10);
    assert!(!restored.galaxy.scanned_hexes().contains("garbage"));
}

#[test]
fn test_restore_reestablishes_wormhole_symmetry() {
    let engine = engine(28);
    let json = GameSnapshot::capture(&engine).to_json().unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    // Replace the network with a single one-sided link.
    value["galaxy"]["wormholes"] = serde_json::json!({ "20,-20,0": "5,-14,9" });

    let snapshot = GameSnapshot::from_json(&value.to_string()).unwrap();
    let (restored, report) = snapshot.restore();

    assert!(report.repaired_wormholes >= 1);
    assert_eq!(
        restored.galaxy.wormhole_exit("20,-20,0").map(String::as_str),
        Some("5,-14,9")
    );
    assert_eq!(
        restored.galaxy.wormhole_exit("5,-14,9").map(String::as_str),
        Some("20,-20,0")
    );
}
