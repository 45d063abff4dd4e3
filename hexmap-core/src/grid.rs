//! Hexagon-shaped map of cells
//!
//! A [`Grid`] holds every cell within `radius` steps of the origin, each
//! tagged with a [`CellKind`]. Cells and tags live in two index-aligned
//! vectors; every mutation keeps them the same length.

use std::cmp;
use std::fmt;

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::hex::{Hex, DIRECTIONS};
use crate::layout::{Layout, Point};

// ============================================================================
// TERRAIN
// ============================================================================

/// Tag attached to each cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Castle,
    Tower,
    Water,
    Ground,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Castle => "castle",
            CellKind::Tower => "tower",
            CellKind::Water => "water",
            CellKind::Ground => "ground",
        };
        f.write_str(name)
    }
}

/// One entry of the terrain pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainWeight {
    pub kind: CellKind,
    pub weight: u32,
}

/// How cells are tagged when a grid is built.
///
/// The origin always gets `anchor`. Every other cell draws from `weights`,
/// where an entry with weight `w` occupies `w` slots of the pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTerrain")]
pub struct TerrainConfig {
    anchor: CellKind,
    weights: Vec<TerrainWeight>,
    #[serde(skip)]
    total: u32,
}

#[derive(Deserialize)]
struct RawTerrain {
    anchor: CellKind,
    weights: Vec<TerrainWeight>,
}

impl TryFrom<RawTerrain> for TerrainConfig {
    type Error = GridError;

    fn try_from(raw: RawTerrain) -> Result<Self> {
        TerrainConfig::new(raw.anchor, raw.weights)
    }
}

impl TerrainConfig {
    /// Fails if the pool has no slots at all
    pub fn new(anchor: CellKind, weights: Vec<TerrainWeight>) -> Result<Self> {
        let total = weights
            .iter()
            .try_fold(0u32, |acc, w| acc.checked_add(w.weight))
            .ok_or_else(|| GridError::InvalidTerrain("total weight overflows".to_string()))?;
        if total == 0 {
            return Err(GridError::InvalidTerrain(
                "at least one kind needs a positive weight".to_string(),
            ));
        }
        Ok(Self { anchor, weights, total })
    }

    pub fn anchor(&self) -> CellKind {
        self.anchor
    }

    pub fn weights(&self) -> &[TerrainWeight] {
        &self.weights
    }

    /// Pick a kind for a cell
    pub fn kind_for<R: Rng + ?Sized>(&self, hex: Hex, rng: &mut R) -> CellKind {
        if hex == Hex::ORIGIN {
            return self.anchor;
        }
        let mut slot = rng.gen_range(0..self.total);
        for w in &self.weights {
            if slot < w.weight {
                return w.kind;
            }
            slot -= w.weight;
        }
        // unreachable while total is the sum of the weights
        self.anchor
    }
}

impl Default for TerrainConfig {
    /// Ten ground slots to three water slots, castle at the center
    fn default() -> Self {
        Self {
            anchor: CellKind::Castle,
            weights: vec![
                TerrainWeight { kind: CellKind::Ground, weight: 10 },
                TerrainWeight { kind: CellKind::Water, weight: 3 },
            ],
            total: 13,
        }
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Everything a renderer needs to draw one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub hex: Hex,
    pub kind: CellKind,
    pub center: Point,
    pub corners: [Point; 6],
}

#[derive(Clone, Debug)]
pub struct Grid {
    layout: Layout,
    radius: u16,
    hexes: Vec<Hex>,
    kinds: Vec<CellKind>,
}

impl Grid {
    /// Generate every cell within `radius` of the origin, ordered by `q` then
    /// `r`, and tag each one from `terrain`. A `u16` radius keeps every
    /// coordinate and the cell count far from integer overflow.
    pub fn build<R: Rng + ?Sized>(
        layout: Layout,
        radius: u16,
        terrain: &TerrainConfig,
        rng: &mut R,
    ) -> Self {
        let capacity = Self::hex_count(radius);
        let mut hexes = Vec::with_capacity(capacity);
        let mut kinds = Vec::with_capacity(capacity);

        let n = i32::from(radius);
        for q in -n..=n {
            // a plain [-n, n] range for r would give a rhombus
            let r1 = cmp::max(-n, -q - n);
            let r2 = cmp::min(n, -q + n);
            for r in r1..=r2 {
                let hex = Hex::new(q, r);
                hexes.push(hex);
                kinds.push(terrain.kind_for(hex, rng));
            }
        }
        debug_assert_eq!(hexes.len(), capacity, "expected 3r²+3r+1 cells");

        tracing::debug!("Built grid: radius={}, cells={}", radius, hexes.len());

        Self { layout, radius, hexes, kinds }
    }

    /// Number of cells in a full grid of this radius
    pub fn hex_count(radius: u16) -> usize {
        let r = usize::from(radius);
        3 * r * r + 3 * r + 1
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Radius the grid was built with. Removing rings does not change it.
    pub fn radius(&self) -> u16 {
        self.radius
    }

    pub fn center(&self) -> Hex {
        Hex::ORIGIN
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    pub fn kinds(&self) -> &[CellKind] {
        &self.kinds
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.hexes.contains(&hex)
    }

    pub fn kind_at(&self, hex: Hex) -> Option<CellKind> {
        self.hexes
            .iter()
            .position(|&h| h == hex)
            .map(|i| self.kinds[i])
    }

    /// Drop every cell that appears in `ring`, along with its tag. Survivors
    /// keep their relative order. Returns how many cells were removed.
    pub fn remove_ring(&mut self, ring: &[Hex]) -> usize {
        let doomed: FxHashSet<Hex> = ring.iter().copied().collect();
        let before = self.hexes.len();

        let (hexes, kinds): (Vec<Hex>, Vec<CellKind>) = self
            .hexes
            .iter()
            .zip(&self.kinds)
            .filter(|(h, _)| !doomed.contains(*h))
            .map(|(&h, &k)| (h, k))
            .unzip();
        self.hexes = hexes;
        self.kinds = kinds;

        let removed = before - self.hexes.len();
        tracing::debug!("Removed {} cells, {} remain", removed, self.hexes.len());
        removed
    }

    /// Replace every cell with `f(cell)`. Tags stay at the same index.
    pub fn transform<F: FnMut(Hex) -> Hex>(&mut self, mut f: F) {
        for hex in &mut self.hexes {
            *hex = f(*hex);
        }
    }

    /// Cells in stored order, with pixel geometry from the grid's layout.
    /// Each call starts a fresh pass.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.hexes
            .iter()
            .zip(&self.kinds)
            .enumerate()
            .map(move |(index, (&hex, &kind))| Cell {
                index,
                hex,
                kind,
                center: self.layout.to_pixel(hex),
                corners: self.layout.polygon_corners(hex),
            })
    }

    pub fn for_each_cell<F: FnMut(Cell)>(&self, visitor: F) {
        self.cells().for_each(visitor);
    }
}

/// Cells exactly `radius` steps from `start`, in walk order.
///
/// The walk begins `radius` steps out in direction 4 and then follows
/// directions 0 through 5, `radius` steps each. A radius of 0 is empty.
pub fn ring(radius: u16, start: Hex) -> Vec<Hex> {
    let n = i32::from(radius);
    let (dq, dr) = DIRECTIONS[4];
    let mut hex = start.add(Hex::new(dq, dr).scale(n));
    let mut results = Vec::with_capacity(6 * usize::from(radius));

    for &(dq, dr) in &DIRECTIONS {
        for _ in 0..radius {
            results.push(hex);
            hex = hex.add(Hex::new(dq, dr));
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::distance;
    use crate::layout::FLAT;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn layout() -> Layout {
        Layout::new(&FLAT, Point::new(42.0, 42.0), Point::new(640.0, 435.0)).unwrap()
    }

    fn grid(radius: u16) -> Grid {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        Grid::build(layout(), radius, &TerrainConfig::default(), &mut rng)
    }

    #[test]
    fn test_cell_count() {
        assert_eq!(grid(0).len(), 1);
        assert_eq!(grid(1).len(), 7);
        assert_eq!(grid(3).len(), 37);
        for r in 0..8 {
            let g = grid(r);
            assert_eq!(g.len(), Grid::hex_count(r));
            assert_eq!(g.len(), usize::from(3 * r * r + 3 * r + 1));
            assert_eq!(g.kinds().len(), g.len());
        }
    }

    #[test]
    fn test_cells_within_radius() {
        let g = grid(4);
        let unique: FxHashSet<Hex> = g.hexes().iter().copied().collect();
        assert_eq!(unique.len(), g.len());
        assert!(g.hexes().iter().all(|&h| distance(h, Hex::ORIGIN) <= 4));
        assert_eq!(g.hexes()[0], Hex::new(-4, 0));
    }

    #[test]
    fn test_origin_is_anchor() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = Grid::build(layout(), 3, &TerrainConfig::default(), &mut rng);
            assert_eq!(g.kind_at(g.center()), Some(CellKind::Castle));
            let others = g.hexes().iter().zip(g.kinds()).filter(|(h, _)| **h != Hex::ORIGIN);
            for (_, k) in others {
                assert!(matches!(k, CellKind::Ground | CellKind::Water));
            }
        }
    }

    #[test]
    fn test_build_is_reproducible() {
        assert_eq!(grid(5).kinds(), grid(5).kinds());
    }

    #[test]
    fn test_terrain_weights() {
        let terrain = TerrainConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws = 13_000;
        let water = (0..draws)
            .filter(|_| terrain.kind_for(Hex::new(1, 0), &mut rng) == CellKind::Water)
            .count();
        // expected 3000
        assert!((2600..3400).contains(&water), "water={water}");
    }

    #[test]
    fn test_custom_terrain() {
        let terrain = TerrainConfig::new(
            CellKind::Tower,
            vec![
                TerrainWeight { kind: CellKind::Ground, weight: 0 },
                TerrainWeight { kind: CellKind::Water, weight: 1 },
            ],
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let g = Grid::build(layout(), 2, &terrain, &mut rng);
        assert_eq!(g.kind_at(Hex::ORIGIN), Some(CellKind::Tower));
        assert_eq!(g.kinds().iter().filter(|k| **k == CellKind::Water).count(), 18);
    }

    #[test]
    fn test_empty_terrain_rejected() {
        assert!(matches!(
            TerrainConfig::new(CellKind::Castle, vec![]),
            Err(GridError::InvalidTerrain(_))
        ));
        let zero = vec![TerrainWeight { kind: CellKind::Water, weight: 0 }];
        assert!(TerrainConfig::new(CellKind::Castle, zero).is_err());
    }

    #[test]
    fn test_terrain_from_json() {
        let json = r#"{"anchor":"castle","weights":[{"kind":"ground","weight":10},{"kind":"water","weight":3}]}"#;
        let terrain: TerrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(terrain, TerrainConfig::default());

        let bad = r#"{"anchor":"castle","weights":[]}"#;
        assert!(serde_json::from_str::<TerrainConfig>(bad).is_err());
    }

    #[test]
    fn test_ring() {
        assert!(ring(0, Hex::ORIGIN).is_empty());

        let r1 = ring(1, Hex::ORIGIN);
        assert_eq!(r1.len(), 6);
        assert_eq!(r1[0], Hex::new(-1, 1));
        assert_eq!(r1[1], Hex::new(0, 1));
        let unique: FxHashSet<Hex> = r1.iter().copied().collect();
        assert_eq!(unique.len(), 6);
        assert!(r1.iter().all(|&h| distance(h, Hex::ORIGIN) == 1));

        let start = Hex::new(2, -1);
        let r3 = ring(3, start);
        assert_eq!(r3.len(), 18);
        assert_eq!(r3[0], Hex::new(-1, 2));
        assert!(r3.iter().all(|&h| distance(h, start) == 3));
        for pair in r3.windows(2) {
            assert_eq!(distance(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn test_largest_radius() {
        let r = u64::from(u16::MAX);
        assert_eq!(Grid::hex_count(u16::MAX) as u64, 3 * r * r + 3 * r + 1);

        let outer = ring(u16::MAX, Hex::ORIGIN);
        assert_eq!(outer.len(), 6 * usize::from(u16::MAX));
        assert_eq!(outer[0], Hex::new(-65535, 65535));
        assert_eq!(outer[0].s(), 0);
        assert!(outer.iter().all(|&h| distance(h, Hex::ORIGIN) == 65535));
    }

    #[test]
    fn test_remove_ring() {
        let mut g = grid(3);
        let inner = ring(1, g.center());
        let kept: Vec<(Hex, CellKind)> = g
            .hexes()
            .iter()
            .zip(g.kinds())
            .filter(|(h, _)| !inner.contains(h))
            .map(|(&h, &k)| (h, k))
            .collect();

        assert_eq!(g.remove_ring(&inner), 6);
        assert_eq!(g.len(), 31);
        assert_eq!(g.kinds().len(), 31);
        for h in &inner {
            assert!(!g.contains(*h));
            assert_eq!(g.kind_at(*h), None);
        }
        let after: Vec<(Hex, CellKind)> = g.hexes().iter().copied().zip(g.kinds().iter().copied()).collect();
        assert_eq!(after, kept);

        // nothing left to remove
        assert_eq!(g.remove_ring(&inner), 0);
    }

    #[test]
    fn test_remove_outer_rings() {
        let mut g = grid(3);
        for n in (1..=3).rev() {
            g.remove_ring(&ring(n, g.center()));
        }
        assert_eq!(g.hexes(), &[Hex::ORIGIN]);
        assert_eq!(g.kinds(), &[CellKind::Castle]);
    }

    #[test]
    fn test_transform() {
        let mut g = grid(2);
        let before: Vec<Hex> = g.hexes().to_vec();
        let kinds: Vec<CellKind> = g.kinds().to_vec();

        g.transform(|h| h.rotate_left());
        assert_eq!(g.len(), before.len());
        assert_eq!(g.kinds(), kinds.as_slice());
        for (a, b) in g.hexes().iter().zip(&before) {
            assert_eq!(*a, b.rotate_left());
        }

        g.transform(|h| h.add(Hex::new(5, 0)));
        assert_eq!(g.hexes()[0], before[0].rotate_left().add(Hex::new(5, 0)));
    }

    #[test]
    fn test_cells() {
        let g = grid(2);
        let cells: Vec<Cell> = g.cells().collect();
        assert_eq!(cells.len(), g.len());
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.index, i);
            assert_eq!(cell.hex, g.hexes()[i]);
            assert_eq!(cell.kind, g.kinds()[i]);
            assert_eq!(cell.center, g.layout().to_pixel(cell.hex));
            assert_eq!(cell.corners, g.layout().polygon_corners(cell.hex));
        }
        // restartable
        assert_eq!(g.cells().count(), cells.len());

        let mut visited = Vec::new();
        g.for_each_cell(|cell| visited.push(cell.index));
        assert_eq!(visited, (0..g.len()).collect::<Vec<_>>());
    }
}
