//! Lattice coordinate system for tiles, corners, and edges.
//!
//! This module provides the three coordinate flavors of the board:
//! - `TilePosition`: Identifies a hexagonal tile
//! - `TileCorner`: Identifies a corner where settlements/cities are placed
//! - `TileEdge`: Identifies an edge where roads are placed
//!
//! All three are plain integer pairs on different lattices. They share a
//! representation but are distinct types, so a corner can never be passed
//! where an edge is expected.
//!
//! The adjacency functions are pure and total. Positions off the board are
//! legal inputs; they simply produce neighbors that no board lookup resolves.
//!
//! Integer division and remainder truncate toward zero here, so the
//! relations only agree with each other for coordinates of zero or more.

use serde::{Deserialize, Serialize};

/// Side of a tile, used to orient harbor docks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    TopRight,
    TopLeft,
    Left,
    BottomLeft,
    BottomRight,
}

impl Direction {
    /// All directions, counter-clockwise starting from Right
    pub const ALL: [Direction; 6] = [
        Direction::Right,
        Direction::TopRight,
        Direction::TopLeft,
        Direction::Left,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    /// Index into `TilePosition::adjacent_edges` for this side
    const fn edge_slot(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::TopLeft => 1,
            Direction::TopRight => 2,
            Direction::Right => 3,
            Direction::BottomRight => 4,
            Direction::BottomLeft => 5,
        }
    }
}

/// Position of a tile.
///
/// Tile coordinates always add up to an odd number. The top row has `y = 0`
/// and `x` grows in steps of two from one tile to the next in a row:
///
/// ```text
///     ____  ____
///    /    \/    \
///    | 10 || 30 |
///  __\____/\____/__
/// /    \/    \/    \
/// | 01 || 21 || 41 |
/// \____/\____/\____/
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The six corners of this tile: left column top/bottom, then the top and
    /// bottom tips, then the right column top/bottom.
    pub fn adjacent_corners(&self) -> [TileCorner; 6] {
        let (x, y) = (self.x, self.y);
        [
            TileCorner::new(x, y),
            TileCorner::new(x, y + 1),
            TileCorner::new(x + 1, y),
            TileCorner::new(x + 1, y + 1),
            TileCorner::new(x + 2, y),
            TileCorner::new(x + 2, y + 1),
        ]
    }

    /// The six edges of this tile, clockwise starting from the left side
    pub fn adjacent_edges(&self) -> [TileEdge; 6] {
        let (x, y) = (self.x, self.y);
        [
            TileEdge::new(x * 2, y),         // left
            TileEdge::new(x * 2 + 1, y),     // top-left
            TileEdge::new(x * 2 + 3, y),     // top-right
            TileEdge::new(x * 2 + 4, y),     // right
            TileEdge::new(x * 2 + 3, y + 1), // bottom-right
            TileEdge::new(x * 2 + 1, y + 1), // bottom-left
        ]
    }

    /// The six neighboring tiles
    pub fn adjacent_tiles(&self) -> [TilePosition; 6] {
        let (x, y) = (self.x, self.y);
        [
            TilePosition::new(x - 2, y),
            TilePosition::new(x - 1, y - 1),
            TilePosition::new(x - 1, y + 1),
            TilePosition::new(x + 1, y - 1),
            TilePosition::new(x + 1, y + 1),
            TilePosition::new(x + 2, y),
        ]
    }

    /// The edge on the given side of this tile
    pub fn edge_towards(&self, direction: Direction) -> TileEdge {
        self.adjacent_edges()[direction.edge_slot()]
    }
}

/// Corner coordinate.
///
/// Corners are numbered along zig-zag lines. Whether a corner sits at the top
/// or the bottom of its zig-zag depends on the parity of `x + y`:
///
/// ```text
/// 00  20  40
///  \  /\  /\
///   \/  \/  \/
///   10  30  50
///   ||  ||  ||
///   11  31  51
///   /\  /\  /\
///  /  \/  \/
/// 01  21  41
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCorner {
    pub x: i32,
    pub y: i32,
}

impl TileCorner {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Corners with an even coordinate sum have two tiles above and one below
    fn points_down(&self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// The three tiles meeting at this corner
    pub fn adjacent_tiles(&self) -> [TilePosition; 3] {
        let (x, y) = (self.x, self.y);
        if self.points_down() {
            [
                TilePosition::new(x - 2, y - 1),
                TilePosition::new(x - 1, y),
                TilePosition::new(x, y - 1),
            ]
        } else {
            [
                TilePosition::new(x - 2, y),
                TilePosition::new(x - 1, y - 1),
                TilePosition::new(x, y),
            ]
        }
    }

    /// The three corners one edge away (for the distance rule)
    pub fn adjacent_corners(&self) -> [TileCorner; 3] {
        let (x, y) = (self.x, self.y);
        if self.points_down() {
            [
                TileCorner::new(x - 1, y),
                TileCorner::new(x, y - 1),
                TileCorner::new(x + 1, y),
            ]
        } else {
            [
                TileCorner::new(x - 1, y),
                TileCorner::new(x, y + 1),
                TileCorner::new(x + 1, y),
            ]
        }
    }

    /// The three edges that end in this corner
    pub fn adjacent_edges(&self) -> [TileEdge; 3] {
        let (x, y) = (self.x, self.y);
        if self.points_down() {
            [
                TileEdge::new(x * 2 - 1, y),
                TileEdge::new(x * 2, y - 1),
                TileEdge::new(x * 2 + 1, y),
            ]
        } else {
            [
                TileEdge::new(x * 2 - 1, y),
                TileEdge::new(x * 2, y),
                TileEdge::new(x * 2 + 1, y),
            ]
        }
    }
}

/// Edge coordinate.
///
/// Even `x` values are vertical edges between two tiles of the same row. Odd
/// `x` values are the slanted edges of the zig-zag rows, rising or falling
/// depending on `x` modulo 4 and the parity of `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileEdge {
    pub x: i32,
    pub y: i32,
}

impl TileEdge {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this edge is drawn as a vertical line
    pub fn is_vertical(&self) -> bool {
        self.x % 2 == 0
    }

    /// Whether this slanted edge falls from left to right on screen
    pub fn is_going_down(&self) -> bool {
        if self.y % 2 == 0 {
            (self.x - 1) % 4 == 0
        } else {
            (self.x - 3) % 4 == 0
        }
    }

    /// Whether `(x, y)` names an edge of the lattice at all. Every other pair
    /// of integers falls between two vertical edges where no edge exists.
    pub fn is_lattice_edge(&self) -> bool {
        if self.y % 2 == 0 {
            self.x % 4 != 0
        } else {
            (self.x - 2) % 4 != 0
        }
    }

    /// The two tiles sharing this edge
    pub fn adjacent_tiles(&self) -> [TilePosition; 2] {
        let (x, y) = (self.x, self.y);
        if self.is_vertical() {
            return [TilePosition::new(x / 2 - 2, y), TilePosition::new(x / 2, y)];
        }

        let rising = (y % 2 == 0 && (x - 3) % 4 == 0) || (y % 2 == 1 && (x - 1) % 4 == 0);
        if rising {
            [TilePosition::new(x / 2 - 1, y - 1), TilePosition::new(x / 2, y)]
        } else {
            [TilePosition::new(x / 2 - 1, y), TilePosition::new(x / 2, y - 1)]
        }
    }

    /// The two corners at the ends of this edge
    pub fn adjacent_corners(&self) -> [TileCorner; 2] {
        let (x, y) = (self.x, self.y);
        if self.is_vertical() {
            [TileCorner::new(x / 2, y), TileCorner::new(x / 2, y + 1)]
        } else {
            [TileCorner::new(x / 2, y), TileCorner::new(x / 2 + 1, y)]
        }
    }

    /// The four edges sharing a corner with this edge (for road connectivity)
    pub fn adjacent_edges(&self) -> [TileEdge; 4] {
        let (x, y) = (self.x, self.y);
        if self.is_vertical() {
            return [
                TileEdge::new(x - 1, y),
                TileEdge::new(x - 1, y + 1),
                TileEdge::new(x + 1, y),
                TileEdge::new(x + 1, y + 1),
            ];
        }

        if (x - 1 - 2 * (y & 1)) % 4 == 0 {
            [
                TileEdge::new(x - 2, y),
                TileEdge::new(x - 1, y - 1),
                TileEdge::new(x + 1, y),
                TileEdge::new(x + 2, y),
            ]
        } else {
            [
                TileEdge::new(x - 2, y),
                TileEdge::new(x - 1, y),
                TileEdge::new(x + 1, y - 1),
                TileEdge::new(x + 2, y),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn tiles(xys: &[(i32, i32)]) -> Vec<TilePosition> {
        xys.iter().map(|&(x, y)| TilePosition::new(x, y)).collect()
    }

    fn corners(xys: &[(i32, i32)]) -> Vec<TileCorner> {
        xys.iter().map(|&(x, y)| TileCorner::new(x, y)).collect()
    }

    fn edges(xys: &[(i32, i32)]) -> Vec<TileEdge> {
        xys.iter().map(|&(x, y)| TileEdge::new(x, y)).collect()
    }

    #[test]
    fn test_tiles_at_corner() {
        assert_eq!(
            TileCorner::new(3, 1).adjacent_tiles().to_vec(),
            tiles(&[(1, 0), (2, 1), (3, 0)])
        );
        assert_eq!(
            TileCorner::new(4, 1).adjacent_tiles().to_vec(),
            tiles(&[(2, 1), (3, 0), (4, 1)])
        );
        assert_eq!(
            TileCorner::new(3, 2).adjacent_tiles().to_vec(),
            tiles(&[(1, 2), (2, 1), (3, 2)])
        );
        assert_eq!(
            TileCorner::new(4, 2).adjacent_tiles().to_vec(),
            tiles(&[(2, 1), (3, 2), (4, 1)])
        );
    }

    #[test]
    fn test_edges_at_corner() {
        assert_eq!(
            TileCorner::new(3, 1).adjacent_edges().to_vec(),
            edges(&[(5, 1), (6, 0), (7, 1)])
        );
        assert_eq!(
            TileCorner::new(4, 1).adjacent_edges().to_vec(),
            edges(&[(7, 1), (8, 1), (9, 1)])
        );
    }

    #[test]
    fn test_corners_of_edge() {
        let cases = [
            ((4, 1), [(2, 1), (2, 2)]),
            ((5, 1), [(2, 1), (3, 1)]),
            ((5, 2), [(2, 2), (3, 2)]),
            ((7, 1), [(3, 1), (4, 1)]),
            ((7, 2), [(3, 2), (4, 2)]),
            ((8, 1), [(4, 1), (4, 2)]),
        ];
        for ((x, y), expected) in cases {
            assert_eq!(
                TileEdge::new(x, y).adjacent_corners().to_vec(),
                corners(&expected),
                "edge ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_edges_next_to_edge() {
        let cases = [
            ((4, 1), [(3, 1), (3, 2), (5, 1), (5, 2)]),
            ((5, 1), [(3, 1), (4, 1), (6, 0), (7, 1)]),
            ((5, 2), [(3, 2), (4, 1), (6, 2), (7, 2)]),
            ((7, 1), [(5, 1), (6, 0), (8, 1), (9, 1)]),
            ((7, 2), [(5, 2), (6, 2), (8, 1), (9, 2)]),
            ((8, 1), [(7, 1), (7, 2), (9, 1), (9, 2)]),
        ];
        for ((x, y), expected) in cases {
            assert_eq!(
                TileEdge::new(x, y).adjacent_edges().to_vec(),
                edges(&expected),
                "edge ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_tiles_at_edge() {
        let cases = [
            ((5, 1), [(1, 0), (2, 1)]),
            ((7, 2), [(2, 1), (3, 2)]),
            ((6, 0), [(1, 0), (3, 0)]),
            ((8, 1), [(2, 1), (4, 1)]),
            ((5, 2), [(1, 2), (2, 1)]),
            ((7, 1), [(2, 1), (3, 0)]),
        ];
        for ((x, y), expected) in cases {
            assert_eq!(
                TileEdge::new(x, y).adjacent_tiles().to_vec(),
                tiles(&expected),
                "edge ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_tile_neighbors_are_unique() {
        let tile = TilePosition::new(6, 3);
        let unique: HashSet<_> = tile.adjacent_tiles().into_iter().collect();
        assert_eq!(unique.len(), 6);
        assert!(!unique.contains(&tile));

        for neighbor in tile.adjacent_tiles() {
            assert!(neighbor.adjacent_tiles().contains(&tile));
        }
    }

    #[test]
    fn test_edge_orientation() {
        assert!(TileEdge::new(8, 1).is_vertical());
        assert!(!TileEdge::new(7, 1).is_vertical());

        // Row 0 zig-zags down first, row 1 starts by rising
        assert!(TileEdge::new(5, 0).is_going_down());
        assert!(!TileEdge::new(7, 0).is_going_down());
        assert!(TileEdge::new(7, 1).is_going_down());
        assert!(!TileEdge::new(5, 1).is_going_down());
    }

    #[test]
    fn test_lattice_edges() {
        for tile in [TilePosition::new(1, 0), TilePosition::new(2, 1), TilePosition::new(0, 3)] {
            for edge in tile.adjacent_edges() {
                assert!(edge.is_lattice_edge(), "{edge:?} of {tile:?}");
            }
        }
        assert!(!TileEdge::new(4, 0).is_lattice_edge());
        assert!(!TileEdge::new(6, 1).is_lattice_edge());
    }

    #[test]
    fn test_edge_towards_matches_side() {
        let tile = TilePosition::new(3, 0);
        let dock = tile.edge_towards(Direction::BottomRight);
        assert_eq!(dock, TileEdge::new(9, 1));
        assert!(dock.adjacent_tiles().contains(&TilePosition::new(4, 1)));
    }

    #[test]
    fn test_edge_neighbors_share_a_corner() {
        let edge = TileEdge::new(13, 3);
        let ends = edge.adjacent_corners();
        let expected: HashSet<TileEdge> = ends
            .iter()
            .flat_map(|c| c.adjacent_edges())
            .filter(|e| *e != edge)
            .collect();
        let actual: HashSet<TileEdge> = edge.adjacent_edges().into_iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_corner_relations_agree_from_origin() {
        let in_range = |x: i32, y: i32| x >= 0 && y >= 0;
        for x in 0..16 {
            for y in 0..10 {
                let corner = TileCorner::new(x, y);
                for tile in corner.adjacent_tiles() {
                    if in_range(tile.x, tile.y) {
                        assert!(
                            tile.adjacent_corners().contains(&corner),
                            "{:?} {:?}",
                            corner,
                            tile
                        );
                    }
                }
                for other in corner.adjacent_corners() {
                    if in_range(other.x, other.y) {
                        assert!(
                            other.adjacent_corners().contains(&corner),
                            "{:?} {:?}",
                            corner,
                            other
                        );
                    }
                }
                for edge in corner.adjacent_edges() {
                    if in_range(edge.x, edge.y) {
                        assert!(
                            edge.adjacent_corners().contains(&corner),
                            "{:?} {:?}",
                            corner,
                            edge
                        );
                    }
                }
            }
        }
    }
}
