//! Resource and equipment catalogs.
//!
//! Both catalogs are closed enums with `const fn` lookup tables; there is no
//! runtime registry. The per-resource `catch_rate` is baseline flavor data
//! for the catalog screen; interdiction odds at trade time come from the
//! market's security level.

use serde::{Deserialize, Serialize};

use crate::types::Credits;

/// Legal standing of a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    /// Freely tradable at any market.
    Legal,
    /// Contraband; trading risks interdiction and carries security-scaled prices.
    Illegal,
}

/// Every resource in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    // Legal tier
    FerriteOre,
    WaterIce,
    Helium3,
    RareEarths,
    MedicalNanites,
    ExoticCrystals,
    Antimatter,
    // Illegal tier
    SpiceExtract,
    NeuralStims,
    VoidOpals,
    ShadowTech,
    GravWeapons,
}

impl ResourceKind {
    /// Get the legal category for this resource.
    pub const fn category(&self) -> ResourceCategory {
        match self {
            ResourceKind::FerriteOre
            | ResourceKind::WaterIce
            | ResourceKind::Helium3
            | ResourceKind::RareEarths
            | ResourceKind::MedicalNanites
            | ResourceKind::ExoticCrystals
            | ResourceKind::Antimatter => ResourceCategory::Legal,
            ResourceKind::SpiceExtract
            | ResourceKind::NeuralStims
            | ResourceKind::VoidOpals
            | ResourceKind::ShadowTech
            | ResourceKind::GravWeapons => ResourceCategory::Illegal,
        }
    }

    /// Check if this resource is contraband.
    pub const fn is_illegal(&self) -> bool {
        matches!(self.category(), ResourceCategory::Illegal)
    }

    /// Get the rarity tier (1 = common, 6 = near-mythical).
    pub const fn rarity(&self) -> u8 {
        match self {
            ResourceKind::FerriteOre | ResourceKind::WaterIce => 1,
            ResourceKind::Helium3 | ResourceKind::SpiceExtract => 2,
            ResourceKind::RareEarths | ResourceKind::NeuralStims => 3,
            ResourceKind::MedicalNanites | ResourceKind::VoidOpals => 4,
            ResourceKind::ExoticCrystals | ResourceKind::ShadowTech => 5,
            ResourceKind::Antimatter | ResourceKind::GravWeapons => 6,
        }
    }

    /// Get the base market price range (min, max) in credits per unit.
    pub const fn base_price_range(&self) -> (Credits, Credits) {
        match self {
            ResourceKind::FerriteOre => (8, 20),
            ResourceKind::WaterIce => (5, 14),
            ResourceKind::Helium3 => (25, 60),
            ResourceKind::RareEarths => (60, 140),
            ResourceKind::MedicalNanites => (150, 320),
            ResourceKind::ExoticCrystals => (350, 700),
            ResourceKind::Antimatter => (900, 1800),
            ResourceKind::SpiceExtract => (40, 90),
            ResourceKind::NeuralStims => (90, 200),
            ResourceKind::VoidOpals => (220, 450),
            ResourceKind::ShadowTech => (500, 950),
            ResourceKind::GravWeapons => (1200, 2400),
        }
    }

    /// Get the baseline interdiction rate printed in the catalog.
    /// Legal goods are never interdicted.
    pub const fn catch_rate(&self) -> f32 {
        match self {
            ResourceKind::SpiceExtract => 0.15,
            ResourceKind::NeuralStims => 0.25,
            ResourceKind::VoidOpals => 0.35,
            ResourceKind::ShadowTech => 0.45,
            ResourceKind::GravWeapons => 0.60,
            _ => 0.0,
        }
    }

    /// Equipment needed to extract this resource from a site, if any.
    /// Common resources can be worked by hand.
    pub const fn required_equipment(&self) -> Option<Equipment> {
        match self {
            ResourceKind::Helium3 => Some(Equipment::GasSiphon),
            ResourceKind::RareEarths => Some(Equipment::MiningLaser),
            ResourceKind::VoidOpals => Some(Equipment::MiningLaser),
            ResourceKind::ExoticCrystals => Some(Equipment::CryoExtractor),
            ResourceKind::Antimatter => Some(Equipment::QuantumHarvester),
            _ => None,
        }
    }

    /// Get the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            ResourceKind::FerriteOre => "Ferrite Ore",
            ResourceKind::WaterIce => "Water Ice",
            ResourceKind::Helium3 => "Helium-3",
            ResourceKind::RareEarths => "Rare Earths",
            ResourceKind::MedicalNanites => "Medical Nanites",
            ResourceKind::ExoticCrystals => "Exotic Crystals",
            ResourceKind::Antimatter => "Antimatter",
            ResourceKind::SpiceExtract => "Spice Extract",
            ResourceKind::NeuralStims => "Neural Stims",
            ResourceKind::VoidOpals => "Void Opals",
            ResourceKind::ShadowTech => "Shadow Tech",
            ResourceKind::GravWeapons => "Grav Weapons",
        }
    }

    /// Get the catalog description.
    pub const fn description(&self) -> &'static str {
        match self {
            ResourceKind::FerriteOre => "Bulk structural metal scraped from asteroid crust",
            ResourceKind::WaterIce => "Frozen volatiles; life support and cheap reaction mass",
            ResourceKind::Helium3 => "Fusion fuel skimmed from gas clouds",
            ResourceKind::RareEarths => "Laser-cut lanthanides for drive cores",
            ResourceKind::MedicalNanites => "Self-replicating surgical machines",
            ResourceKind::ExoticCrystals => "Metastable lattices grown in deep vacuum",
            ResourceKind::Antimatter => "Bottled annihilation; handle with intent",
            ResourceKind::SpiceExtract => "Euphoric distillate banned in core space",
            ResourceKind::NeuralStims => "Unlicensed cognition boosters",
            ResourceKind::VoidOpals => "Gem-grade opals cut from dark nebulae",
            ResourceKind::ShadowTech => "Salvaged military hardware of unknown origin",
            ResourceKind::GravWeapons => "Graviton shear weapons; possession is a capital offense",
        }
    }

    /// Get all resource variants.
    pub const fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::FerriteOre,
            ResourceKind::WaterIce,
            ResourceKind::Helium3,
            ResourceKind::RareEarths,
            ResourceKind::MedicalNanites,
            ResourceKind::ExoticCrystals,
            ResourceKind::Antimatter,
            ResourceKind::SpiceExtract,
            ResourceKind::NeuralStims,
            ResourceKind::VoidOpals,
            ResourceKind::ShadowTech,
            ResourceKind::GravWeapons,
        ]
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Extraction equipment purchasable at any system market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Equipment {
    MiningLaser,
    GasSiphon,
    CryoExtractor,
    QuantumHarvester,
}

impl Equipment {
    /// Get the purchase price in credits.
    pub const fn price(&self) -> Credits {
        match self {
            Equipment::MiningLaser => 400,
            Equipment::GasSiphon => 650,
            Equipment::CryoExtractor => 900,
            Equipment::QuantumHarvester => 1500,
        }
    }

    /// Get the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Equipment::MiningLaser => "Mining Laser",
            Equipment::GasSiphon => "Gas Siphon",
            Equipment::CryoExtractor => "Cryo Extractor",
            Equipment::QuantumHarvester => "Quantum Harvester",
        }
    }

    /// Get all equipment variants.
    pub const fn all() -> &'static [Equipment] {
        &[
            Equipment::MiningLaser,
            Equipment::GasSiphon,
            Equipment::CryoExtractor,
            Equipment::QuantumHarvester,
        ]
    }
}

impl std::fmt::Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete() {
        assert_eq!(ResourceKind::all().len(), 12);
        let legal = ResourceKind::all()
            .iter()
            .filter(|r| r.category() == ResourceCategory::Legal)
            .count();
        assert_eq!(legal, 7);
    }

    #[test]
    fn test_rarity_in_range() {
        for kind in ResourceKind::all() {
            assert!((1..=6).contains(&kind.rarity()), "{}", kind);
        }
    }

    #[test]
    fn test_price_ranges_well_formed() {
        for kind in ResourceKind::all() {
            let (min, max) = kind.base_price_range();
            assert!(min >= 1, "{} floor", kind);
            assert!(min < max, "{} range", kind);
        }
    }

    #[test]
    fn test_legal_goods_have_no_catch_rate() {
        for kind in ResourceKind::all() {
            match kind.category() {
                ResourceCategory::Legal => assert_eq!(kind.catch_rate(), 0.0),
                ResourceCategory::Illegal => assert!(kind.catch_rate() > 0.0),
            }
        }
    }

    #[test]
    fn test_common_resources_need_no_equipment() {
        for kind in ResourceKind::all() {
            if kind.rarity() == 1 {
                assert_eq!(kind.required_equipment(), None, "{}", kind);
            }
        }
    }

    #[test]
    fn test_equipment_prices_positive() {
        assert_eq!(Equipment::all().len(), 4);
        for eq in Equipment::all() {
            assert!(eq.price() > 0);
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ResourceKind::Helium3.to_string(), "Helium-3");
        assert_eq!(Equipment::MiningLaser.to_string(), "Mining Laser");
    }
}
