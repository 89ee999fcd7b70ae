//! Hex coordinate system for the galaxy grid.
//!
//! Cube coordinates are the primary representation: every coordinate carries
//! the full `(x, y, z)` triple and maintains `x + y + z = 0` by construction.
//! Offset "odd-q" coordinates (odd columns shifted down) exist only as a
//! secondary view for rectangular-grid iteration during generation.
//!
//! The canonical string form `"x,y,z"` is the [`HexId`](crate::types::HexId)
//! used as the key of every per-hex table, so serialized state stays plain
//! JSON objects.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::HexId;

/// The six cube direction vectors in clockwise order starting from northeast.
///
/// Each entry sums to zero, so adding one to a valid coordinate always yields
/// a valid coordinate.
pub const DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, 0, -1),  // NE
    (1, -1, 0),  // E
    (0, -1, 1),  // SE
    (-1, 0, 1),  // SW
    (-1, 1, 0),  // W
    (0, 1, -1),  // NW
];

/// Compass heading along one of the six hex edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Northeast,
    East,
    Southeast,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    /// Get the cube delta for this heading.
    pub const fn delta(&self) -> (i32, i32, i32) {
        DIRECTIONS[self.index()]
    }

    /// Get the index into [`DIRECTIONS`] (0-5, clockwise from northeast).
    pub const fn index(&self) -> usize {
        match self {
            Direction::Northeast => 0,
            Direction::East => 1,
            Direction::Southeast => 2,
            Direction::Southwest => 3,
            Direction::West => 4,
            Direction::Northwest => 5,
        }
    }

    /// Get all six headings in clockwise order.
    pub const fn all() -> &'static [Direction] {
        &[
            Direction::Northeast,
            Direction::East,
            Direction::Southeast,
            Direction::Southwest,
            Direction::West,
            Direction::Northwest,
        ]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Northeast => write!(f, "northeast"),
            Direction::East => write!(f, "east"),
            Direction::Southeast => write!(f, "southeast"),
            Direction::Southwest => write!(f, "southwest"),
            Direction::West => write!(f, "west"),
            Direction::Northwest => write!(f, "northwest"),
        }
    }
}

/// Cube coordinates for the hex grid.
///
/// Fields are private so no code path can build a triple violating
/// `x + y + z = 0`: [`CubeCoord::new`] derives `z`, and the fallible
/// constructors validate. Serialization round-trips through a raw mirror
/// struct and re-validates on the way in, so corrupted snapshots fail loudly
/// instead of smuggling in a bad triple.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCoord", into = "RawCoord")]
pub struct CubeCoord {
    x: i32,
    y: i32,
    z: i32,
}

/// Unvalidated wire form of a cube coordinate.
#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawCoord {
    x: i32,
    y: i32,
    z: i32,
}

impl From<CubeCoord> for RawCoord {
    fn from(c: CubeCoord) -> Self {
        Self {
            x: c.x,
            y: c.y,
            z: c.z,
        }
    }
}

impl TryFrom<RawCoord> for CubeCoord {
    type Error = CoreError;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        CubeCoord::from_parts(raw.x, raw.y, raw.z)
    }
}

impl PartialOrd for CubeCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CubeCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Row-major ordering for deterministic iteration
        (self.z, self.x).cmp(&(other.z, other.x))
    }
}

impl CubeCoord {
    /// Create a coordinate from the two free axes; `z` is derived so the
    /// triple always sums to zero.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    /// The origin hex `(0, 0, 0)`.
    pub const fn origin() -> Self {
        Self { x: 0, y: 0, z: 0 }
    }

    /// Create a coordinate from a full triple, rejecting any that does not
    /// sum to zero. This is the validation boundary for snapshot data.
    pub fn from_parts(x: i32, y: i32, z: i32) -> Result<Self, CoreError> {
        if x + y + z != 0 {
            return Err(CoreError::InvalidCoordinate(format!("{},{},{}", x, y, z)));
        }
        Ok(Self { x, y, z })
    }

    /// X axis component.
    #[inline]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Y axis component.
    #[inline]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Z axis component.
    #[inline]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Canonical string key for this coordinate.
    pub fn id(&self) -> HexId {
        self.to_string()
    }

    /// The neighboring hex along one heading.
    pub fn neighbor(&self, direction: Direction) -> CubeCoord {
        let (dx, dy, _) = direction.delta();
        CubeCoord::new(self.x + dx, self.y + dy)
    }

    /// Get all 6 neighboring hexes in clockwise order starting from northeast.
    pub fn neighbors(&self) -> [CubeCoord; 6] {
        let mut out = [*self; 6];
        for (i, (dx, dy, _)) in DIRECTIONS.iter().enumerate() {
            out[i] = CubeCoord::new(self.x + dx, self.y + dy);
        }
        out
    }

    /// Calculate the distance to another hex (in hex steps).
    ///
    /// In cube coordinates this is the max of the absolute axis differences.
    pub fn distance(&self, other: &CubeCoord) -> u32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        dx.max(dy).max(dz) as u32
    }

    /// Check whether another hex is exactly one step away.
    pub fn is_adjacent(&self, other: &CubeCoord) -> bool {
        self.distance(other) == 1
    }

    /// Dominant heading from this hex toward another, or `None` for the same
    /// hex. Ties resolve in clockwise table order.
    pub fn direction_to(&self, other: &CubeCoord) -> Option<Direction> {
        if self == other {
            return None;
        }
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        let mut best = Direction::Northeast;
        let mut best_dot = i32::MIN;
        for dir in Direction::all() {
            let (ux, uy, uz) = dir.delta();
            let dot = ux * dx + uy * dy + uz * dz;
            if dot > best_dot {
                best_dot = dot;
                best = *dir;
            }
        }
        Some(best)
    }

    /// Convert to offset "odd-q" coordinates (column, row).
    pub const fn to_offset(&self) -> (i32, i32) {
        let col = self.x;
        let row = self.z + (self.x - (self.x & 1)) / 2;
        (col, row)
    }

    /// Create a coordinate from offset "odd-q" (column, row).
    pub const fn from_offset(col: i32, row: i32) -> Self {
        let x = col;
        let z = row - (col - (col & 1)) / 2;
        Self { x, y: -x - z, z }
    }

    /// Check if this coordinate is within a rectangular grid of the given
    /// size (in offset columns and rows).
    pub fn in_bounds(&self, columns: u32, rows: u32) -> bool {
        let (col, row) = self.to_offset();
        col >= 0 && row >= 0 && (col as u32) < columns && (row as u32) < rows
    }

    /// Get all hexes within a given radius (inclusive).
    pub fn hexes_in_radius(&self, radius: u32) -> Vec<CubeCoord> {
        let r = radius as i32;
        let mut result = Vec::new();
        for dx in -r..=r {
            let lo = (-r).max(-dx - r);
            let hi = r.min(-dx + r);
            for dy in lo..=hi {
                result.push(CubeCoord::new(self.x + dx, self.y + dy));
            }
        }
        result
    }

    /// Get a ring of hexes at exactly the given distance.
    pub fn hex_ring(&self, radius: u32) -> Vec<CubeCoord> {
        if radius == 0 {
            return vec![*self];
        }

        self.hexes_in_radius(radius)
            .into_iter()
            .filter(|h| self.distance(h) == radius)
            .collect()
    }
}

impl std::fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl std::str::FromStr for CubeCoord {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<i32> = s
            .split(',')
            .map(|p| p.trim().parse::<i32>())
            .collect::<Result<_, _>>()
            .map_err(|_| CoreError::InvalidCoordinate(s.to_string()))?;
        if parts.len() != 3 {
            return Err(CoreError::InvalidCoordinate(s.to_string()));
        }
        CubeCoord::from_parts(parts[0], parts[1], parts[2])
    }
}
