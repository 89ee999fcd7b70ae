//! Resource sites and their two-tier pools.
//!
//! A site splits its rolled yield between a tradable pool (collected for
//! free) and an extractable pool (needs equipment and action points). Pool
//! mutation always preserves `current <= max`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::regen;
use crate::resource::ResourceKind;
use crate::rng::SeededRng;
use crate::types::Timestamp;

/// Every kind of resource site the galaxy can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteKind {
    AsteroidField,
    IceField,
    GasCloud,
    CrystalGrotto,
    DerelictShip,
    AncientCache,
    OrganicBloom,
}

impl SiteKind {
    /// Get the weighted-selection weight. Weights sum to 100.
    pub const fn weight(&self) -> u32 {
        match self {
            SiteKind::AsteroidField => 24,
            SiteKind::IceField => 20,
            SiteKind::GasCloud => 16,
            SiteKind::CrystalGrotto => 10,
            SiteKind::DerelictShip => 12,
            SiteKind::AncientCache => 6,
            SiteKind::OrganicBloom => 12,
        }
    }

    /// Get the resources this site can yield.
    pub const fn yields(&self) -> &'static [ResourceKind] {
        match self {
            SiteKind::AsteroidField => &[ResourceKind::FerriteOre, ResourceKind::RareEarths],
            SiteKind::IceField => &[ResourceKind::WaterIce],
            SiteKind::GasCloud => &[ResourceKind::Helium3],
            SiteKind::CrystalGrotto => {
                &[ResourceKind::ExoticCrystals, ResourceKind::VoidOpals]
            }
            SiteKind::DerelictShip => &[
                ResourceKind::FerriteOre,
                ResourceKind::ShadowTech,
                ResourceKind::MedicalNanites,
            ],
            SiteKind::AncientCache => &[
                ResourceKind::Antimatter,
                ResourceKind::ShadowTech,
                ResourceKind::GravWeapons,
            ],
            SiteKind::OrganicBloom => {
                &[ResourceKind::MedicalNanites, ResourceKind::SpiceExtract]
            }
        }
    }

    /// Share of a rolled quantity that lands in the tradable pool;
    /// the remainder is extractable.
    pub const fn trade_ratio(&self) -> f32 {
        match self {
            SiteKind::AsteroidField => 0.4,
            SiteKind::IceField => 0.5,
            SiteKind::GasCloud => 0.3,
            SiteKind::CrystalGrotto => 0.25,
            SiteKind::DerelictShip => 0.6,
            SiteKind::AncientCache => 0.5,
            SiteKind::OrganicBloom => 0.5,
        }
    }

    /// Check if working this site is hazardous (colors scan readings and
    /// discovery narration; the hazard roll itself lives in the outer layer).
    pub const fn is_dangerous(&self) -> bool {
        matches!(self, SiteKind::CrystalGrotto | SiteKind::DerelictShip)
    }

    /// Check if this site is a finite find that never regenerates.
    pub const fn is_one_time(&self) -> bool {
        matches!(self, SiteKind::DerelictShip | SiteKind::AncientCache)
    }

    /// Check if this site rolls a random subset of its yield list
    /// instead of all of it.
    pub const fn is_variable(&self) -> bool {
        matches!(
            self,
            SiteKind::DerelictShip | SiteKind::AncientCache | SiteKind::OrganicBloom
        )
    }

    /// Get the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            SiteKind::AsteroidField => "Asteroid Field",
            SiteKind::IceField => "Ice Field",
            SiteKind::GasCloud => "Gas Cloud",
            SiteKind::CrystalGrotto => "Crystal Grotto",
            SiteKind::DerelictShip => "Derelict Ship",
            SiteKind::AncientCache => "Ancient Cache",
            SiteKind::OrganicBloom => "Organic Bloom",
        }
    }

    /// Get all site kind variants.
    pub const fn all() -> &'static [SiteKind] {
        &[
            SiteKind::AsteroidField,
            SiteKind::IceField,
            SiteKind::GasCloud,
            SiteKind::CrystalGrotto,
            SiteKind::DerelictShip,
            SiteKind::AncientCache,
            SiteKind::OrganicBloom,
        ]
    }

    /// Pick a site kind by weighted roll.
    pub fn roll(rng: &mut SeededRng) -> SiteKind {
        let total: u32 = SiteKind::all().iter().map(|k| k.weight()).sum();
        let mut pick = rng.next_range(total);
        for kind in SiteKind::all() {
            if pick < kind.weight() {
                return *kind;
            }
            pick -= kind.weight();
        }
        // Unreachable while weights sum to `total`; keep a sane fallback.
        SiteKind::AsteroidField
    }
}

impl std::fmt::Display for SiteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A bounded, regenerating stock of one resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    /// Units currently available. Never exceeds `max`.
    pub current: u32,
    /// Capacity ceiling. Rises if a regeneration pass carries the pool
    /// past it.
    pub max: u32,
    /// Units restored per regeneration pass; zero for one-time finds.
    pub regen_rate: u32,
}

impl ResourcePool {
    /// Create a full pool.
    pub fn new(initial: u32, max: u32, regen_rate: u32) -> Self {
        Self {
            current: initial.min(max),
            max,
            regen_rate,
        }
    }

    /// Take up to `amount` units; returns how many were actually taken.
    pub fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Add units up to the larger of `cap` and the pool's own `max`;
    /// returns how many were actually added. `max` rises with the fill
    /// so `current <= max` keeps holding.
    pub fn add_clamped(&mut self, amount: u32, cap: u32) -> u32 {
        let ceiling = cap.max(self.max);
        if self.current >= ceiling {
            return 0;
        }
        let added = amount.min(ceiling - self.current);
        self.current += added;
        if self.current > self.max {
            self.max = self.current;
        }
        added
    }

    /// Check whether the pool is exhausted.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

/// A resource site occupying one hex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceSite {
    /// What kind of site this is; flags and yield lists derive from it.
    pub kind: SiteKind,
    /// Free-to-collect stock per resource.
    pub tradable: BTreeMap<ResourceKind, ResourcePool>,
    /// Equipment-gated stock per resource.
    pub extractable: BTreeMap<ResourceKind, ResourcePool>,
    /// When this site was last created or regenerated.
    pub last_update: Timestamp,
}

impl ResourceSite {
    /// Generate a fresh site of the given kind.
    ///
    /// Each yielded resource rolls a base quantity of 2-7 units, split
    /// between the pools by the kind's trade ratio. Variable kinds keep
    /// their first listed resource and include the rest with 60%
    /// probability, so a site never generates empty. One-time kinds get
    /// zero regen; everyone else regenerates at the rarity-table rate.
    pub fn generate(kind: SiteKind, rng: &mut SeededRng, now: Timestamp) -> Self {
        let mut tradable = BTreeMap::new();
        let mut extractable = BTreeMap::new();

        for (i, &resource) in kind.yields().iter().enumerate() {
            if kind.is_variable() && i > 0 && !rng.chance(0.6) {
                continue;
            }

            let quantity = rng.next_between(2, 7);
            let trade_share = ((quantity as f32) * kind.trade_ratio()).round() as u32;
            let trade_share = trade_share.min(quantity);
            let extract_share = quantity - trade_share;
            let rarity = resource.rarity();

            if trade_share > 0 {
                let rate = if kind.is_one_time() {
                    0
                } else {
                    regen::tradable_regen_rate(rarity)
                };
                let max = trade_share.max(regen::tradable_capacity(rarity));
                tradable.insert(resource, ResourcePool::new(trade_share, max, rate));
            }
            if extract_share > 0 {
                let rate = if kind.is_one_time() {
                    0
                } else {
                    regen::extractable_regen_rate(rarity)
                };
                let max = extract_share.max(regen::extractable_capacity(rarity));
                extractable.insert(resource, ResourcePool::new(extract_share, max, rate));
            }
        }

        Self {
            kind,
            tradable,
            extractable,
            last_update: now,
        }
    }

    /// Check if working this site is hazardous.
    pub const fn is_dangerous(&self) -> bool {
        self.kind.is_dangerous()
    }

    /// Check if this site never regenerates.
    pub const fn is_one_time(&self) -> bool {
        self.kind.is_one_time()
    }

    /// Total units remaining across both pools.
    pub fn total_units(&self) -> u32 {
        self.tradable
            .values()
            .chain(self.extractable.values())
            .map(|p| p.current)
            .sum()
    }
}
