//! Per-system markets: price generation, trading, and interdiction.
//!
//! Prices and stock roll once when a market is first touched and persist
//! afterward. Every order line validates completely before anything moves,
//! so a refused line leaves player and market exactly as they were.
//! Interdiction is an outcome, not an error: a caught smuggling run reports
//! what was seized and fined, and the rest of the order keeps processing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::player::Player;
use crate::resource::ResourceKind;
use crate::rng::SeededRng;
use crate::system::SecurityLevel;
use crate::types::Credits;

/// Sell prices sit in this band below buy prices.
const SELL_RATIO_MIN: f32 = 0.70;
const SELL_RATIO_MAX: f32 = 0.90;

/// Interdiction fines are the trade value times this band.
const FINE_MULTIPLIER_MIN: f32 = 1.5;
const FINE_MULTIPLIER_MAX: f32 = 3.0;

/// Initial stock rolls in this range per resource.
const STOCK_MIN: u32 = 1;
const STOCK_MAX: u32 = 10;

/// One market's quote and stock for a single resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEntry {
    /// Price the player pays per unit.
    pub buy_price: Credits,
    /// Price the player receives per unit. Always below `buy_price`.
    pub sell_price: Credits,
    /// Units the market has on hand.
    pub stock: u32,
}

/// The market attached to one system hex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Security level copied from the host system at creation.
    pub security: SecurityLevel,
    /// Quotes and stock for every catalog resource.
    pub entries: BTreeMap<ResourceKind, MarketEntry>,
}

impl Market {
    /// Roll a full market for the given security level.
    pub fn generate(security: SecurityLevel, rng: &mut SeededRng) -> Self {
        let mut entries = BTreeMap::new();
        for &kind in ResourceKind::all() {
            entries.insert(kind, roll_entry(kind, security, rng));
        }
        Self { security, entries }
    }

    /// Get the quote for one resource.
    pub fn entry(&self, kind: ResourceKind) -> Option<&MarketEntry> {
        self.entries.get(&kind)
    }

    /// Get a mutable quote, rolling a fresh one if a snapshot lost it.
    pub fn quote_mut(&mut self, kind: ResourceKind, rng: &mut SeededRng) -> &mut MarketEntry {
        let security = self.security;
        self.entries
            .entry(kind)
            .or_insert_with(|| roll_entry(kind, security, rng))
    }
}

/// Roll one quote: buy uniform in the base range, sell at 70-90% of buy,
/// both scaled by the security level's contraband modifier for illegal
/// goods, stock 1-10.
fn roll_entry(kind: ResourceKind, security: SecurityLevel, rng: &mut SeededRng) -> MarketEntry {
    let (min, max) = kind.base_price_range();
    let mut buy = rng.next_between(min as u32, max as u32) as Credits;
    let ratio = rng.next_f32_between(SELL_RATIO_MIN, SELL_RATIO_MAX);
    let mut sell = ((buy as f32) * ratio).round() as Credits;

    if kind.is_illegal() {
        let factor = 1.0 + security.illegal_price_modifier();
        buy = (((buy as f32) * factor).round() as Credits).max(1);
        sell = (((sell as f32) * factor).round() as Credits).max(1);
    }

    let buy = buy.max(2);
    let sell = sell.clamp(1, buy - 1);

    MarketEntry {
        buy_price: buy,
        sell_price: sell,
        stock: rng.next_between(STOCK_MIN, STOCK_MAX),
    }
}

/// One line of a trade order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOrder {
    /// Buy `quantity` units from the market.
    Buy {
        resource: ResourceKind,
        quantity: u32,
    },
    /// Sell `quantity` units to the market.
    Sell {
        resource: ResourceKind,
        quantity: u32,
    },
}

impl TradeOrder {
    /// The resource this line touches.
    pub const fn resource(&self) -> ResourceKind {
        match self {
            TradeOrder::Buy { resource, .. } | TradeOrder::Sell { resource, .. } => *resource,
        }
    }

    /// The quantity this line moves.
    pub const fn quantity(&self) -> u32 {
        match self {
            TradeOrder::Buy { quantity, .. } | TradeOrder::Sell { quantity, .. } => *quantity,
        }
    }
}

/// What happened to one order line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TradeLineOutcome {
    /// Goods and credits moved.
    Filled {
        order: TradeOrder,
        unit_price: Credits,
        total: Credits,
    },
    /// Security caught the contraband: the line was cancelled, offered
    /// cargo was seized, and a fine above the goods' value was levied.
    Interdicted {
        resource: ResourceKind,
        quantity: u32,
        /// Units taken out of the player's hold (zero on a buy; the goods
        /// were simply never delivered).
        confiscated: u32,
        /// Fine demanded. Collection saturates at the player's balance.
        fine: Credits,
    },
    /// The line failed validation; nothing moved.
    Refused {
        order: TradeOrder,
        reason: CoreError,
    },
}

impl TradeLineOutcome {
    /// Check whether the line completed as asked.
    pub const fn is_filled(&self) -> bool {
        matches!(self, TradeLineOutcome::Filled { .. })
    }
}

/// Execute one buy line against a market.
pub fn execute_buy(
    market: &mut Market,
    player: &mut Player,
    rng: &mut SeededRng,
    resource: ResourceKind,
    quantity: u32,
) -> TradeLineOutcome {
    let order = TradeOrder::Buy { resource, quantity };
    let security = market.security;
    let entry = market.quote_mut(resource, rng);

    // Validate everything before moving anything.
    if quantity > entry.stock {
        return TradeLineOutcome::Refused {
            order,
            reason: CoreError::InsufficientInventory {
                resource,
                requested: quantity,
                available: entry.stock,
            },
        };
    }
    let free = player.cargo.space_free();
    if quantity > free {
        return TradeLineOutcome::Refused {
            order,
            reason: CoreError::InsufficientCargoSpace {
                required: quantity,
                available: free,
            },
        };
    }
    let total = entry.buy_price * quantity as Credits;
    if !player.can_afford(total) {
        return TradeLineOutcome::Refused {
            order,
            reason: CoreError::InsufficientCredits {
                required: total,
                available: player.credits,
            },
        };
    }

    if resource.is_illegal() {
        if let Some(fine) = roll_interdiction(security, total, rng) {
            player.fine_credits(fine);
            return TradeLineOutcome::Interdicted {
                resource,
                quantity,
                confiscated: 0,
                fine,
            };
        }
    }

    entry.stock -= quantity;
    let unit_price = entry.buy_price;
    // Checked above; cargo and wallet cannot fail here.
    let _ = player.spend_credits(total);
    let _ = player.cargo.add(resource, quantity);

    TradeLineOutcome::Filled {
        order,
        unit_price,
        total,
    }
}

/// Execute one sell line against a market.
pub fn execute_sell(
    market: &mut Market,
    player: &mut Player,
    rng: &mut SeededRng,
    resource: ResourceKind,
    quantity: u32,
) -> TradeLineOutcome {
    let order = TradeOrder::Sell { resource, quantity };
    let held = player.cargo.quantity(resource);
    if quantity > held {
        return TradeLineOutcome::Refused {
            order,
            reason: CoreError::InsufficientGoods {
                resource,
                requested: quantity,
                held,
            },
        };
    }

    let security = market.security;
    let entry = market.quote_mut(resource, rng);
    let total = entry.sell_price * quantity as Credits;

    if resource.is_illegal() {
        if let Some(fine) = roll_interdiction(security, total, rng) {
            // The offered cargo is seized along with the fine.
            let _ = player.cargo.remove(resource, quantity);
            player.fine_credits(fine);
            return TradeLineOutcome::Interdicted {
                resource,
                quantity,
                confiscated: quantity,
                fine,
            };
        }
    }

    let unit_price = entry.sell_price;
    entry.stock += quantity;
    let _ = player.cargo.remove(resource, quantity);
    player.add_credits(total);

    TradeLineOutcome::Filled {
        order,
        unit_price,
        total,
    }
}

/// Roll the security dice on a contraband trade. Returns the fine on a
/// catch; the multiplier band keeps every fine strictly above the goods'
/// market value.
fn roll_interdiction(
    security: SecurityLevel,
    value: Credits,
    rng: &mut SeededRng,
) -> Option<Credits> {
    if !rng.chance(security.catch_rate()) {
        return None;
    }
    let multiplier = rng.next_f32_between(FINE_MULTIPLIER_MIN, FINE_MULTIPLIER_MAX);
    Some(((value as f32) * multiplier).ceil() as Credits)
}
