//! Discovery tracking and the exploration journal.
//!
//! Three membership sets guarantee at most one journal entry per
//! (kind, hex) pair for the life of a galaxy; the entries themselves are an
//! append-only narrative log the UI renders verbatim.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::site::ResourceSite;
use crate::system::SystemRecord;
use crate::types::{HexId, Timestamp};

/// What class of thing was discovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscoveryKind {
    System,
    Resource,
    Wormhole,
}

impl std::fmt::Display for DiscoveryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryKind::System => write!(f, "system"),
            DiscoveryKind::Resource => write!(f, "resource"),
            DiscoveryKind::Wormhole => write!(f, "wormhole"),
        }
    }
}

/// One journal entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryEntry {
    pub kind: DiscoveryKind,
    pub hex: HexId,
    pub timestamp: Timestamp,
    /// Short headline for notification toasts.
    pub title: String,
    /// Narrative body for the journal screen.
    pub body: String,
    /// Structured details (system name, unit counts, exit hex, ...).
    pub metadata: BTreeMap<String, String>,
}

/// The journal plus its dedup sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryLog {
    systems: BTreeSet<HexId>,
    resources: BTreeSet<HexId>,
    wormholes: BTreeSet<HexId>,
    entries: Vec<DiscoveryEntry>,
}

impl DiscoveryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a (kind, hex) pair has already been logged.
    pub fn is_discovered(&self, kind: DiscoveryKind, hex: &str) -> bool {
        self.set_for(kind).contains(hex)
    }

    /// Record an entry. Returns false (and drops the entry) if this
    /// (kind, hex) pair was already logged.
    pub fn record(&mut self, entry: DiscoveryEntry) -> bool {
        if !self.set_for_mut(entry.kind).insert(entry.hex.clone()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// All journal entries in discovery order.
    pub fn entries(&self) -> &[DiscoveryEntry] {
        &self.entries
    }

    /// Number of entries logged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing has been discovered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild the dedup sets from the entry list. Used when restoring a
    /// snapshot whose sets disagree with its entries.
    pub fn rebuild_sets(&mut self) {
        self.systems.clear();
        self.resources.clear();
        self.wormholes.clear();
        let entries = std::mem::take(&mut self.entries);
        for entry in entries {
            if self.set_for_mut(entry.kind).insert(entry.hex.clone()) {
                self.entries.push(entry);
            }
        }
    }

    fn set_for(&self, kind: DiscoveryKind) -> &BTreeSet<HexId> {
        match kind {
            DiscoveryKind::System => &self.systems,
            DiscoveryKind::Resource => &self.resources,
            DiscoveryKind::Wormhole => &self.wormholes,
        }
    }

    fn set_for_mut(&mut self, kind: DiscoveryKind) -> &mut BTreeSet<HexId> {
        match kind {
            DiscoveryKind::System => &mut self.systems,
            DiscoveryKind::Resource => &mut self.resources,
            DiscoveryKind::Wormhole => &mut self.wormholes,
        }
    }
}

/// Build the journal entry for first contact with a system.
pub fn system_entry(record: &SystemRecord, now: Timestamp) -> DiscoveryEntry {
    let name = record.display_name();
    let mut metadata = BTreeMap::new();
    metadata.insert("name".to_string(), name.clone());
    metadata.insert("kind".to_string(), record.kind.name().to_string());
    metadata.insert(
        "security".to_string(),
        record.kind.security_level().name().to_string(),
    );
    DiscoveryEntry {
        kind: DiscoveryKind::System,
        hex: record.coord.id(),
        timestamp: now,
        title: format!("Contact: {}", name),
        body: format!(
            "Long-range returns resolve into {}, a {} system. Charts updated.",
            name,
            record.kind.name()
        ),
        metadata,
    }
}

/// Build the journal entry for stumbling onto a wormhole terminus.
pub fn wormhole_entry(hex: &str, exit: &str, now: Timestamp) -> DiscoveryEntry {
    let mut metadata = BTreeMap::new();
    metadata.insert("exit".to_string(), exit.to_string());
    DiscoveryEntry {
        kind: DiscoveryKind::Wormhole,
        hex: hex.to_string(),
        timestamp: now,
        title: "Wormhole Terminus".to_string(),
        body: format!(
            "Local space folds in on itself. The far mouth reads as {}.",
            exit
        ),
        metadata,
    }
}

/// Build the journal entry for finding a resource site.
pub fn site_entry(hex: &str, site: &ResourceSite, now: Timestamp) -> DiscoveryEntry {
    let mut metadata = BTreeMap::new();
    metadata.insert("site".to_string(), site.kind.name().to_string());
    metadata.insert("units".to_string(), site.total_units().to_string());
    let mut body = format!(
        "Survey drones flag a {} holding {} units.",
        site.kind.name(),
        site.total_units()
    );
    if site.is_dangerous() {
        body.push_str(" Telemetry advises caution.");
    }
    DiscoveryEntry {
        kind: DiscoveryKind::Resource,
        hex: hex.to_string(),
        timestamp: now,
        title: format!("{} Sighted", site.kind.name()),
        body,
        metadata,
    }
}
