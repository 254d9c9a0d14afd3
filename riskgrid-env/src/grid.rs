//! Static terrain of the grid world.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// The smallest allowed width and height, outer walls included.
pub const MIN_GRID_SIZE: i32 = 6;

/// Checks the size of a grid and returns its number of cells.
///
/// Both sides must be at least [`MIN_GRID_SIZE`] and every cell index must be
/// representable as an `i32`.
pub fn check_dimensions(width: i32, height: i32) -> Result<usize, ConfigError> {
    if width < MIN_GRID_SIZE || height < MIN_GRID_SIZE {
        return Err(ConfigError::InvalidDimensions { width, height });
    }
    match width.checked_mul(height) {
        Some(n) => Ok(n as usize),
        None => Err(ConfigError::GridTooLarge { width, height }),
    }
}

/// A cell coordinate. `x` grows to the east and `y` grows to the south.
///
/// Serialized as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Pos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Pos {
    /// Constructs a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by `(dx, dy)`.
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the displacement from `other` to `self`.
    pub fn displacement_from(self, other: Pos) -> (i32, i32) {
        (self.x - other.x, self.y - other.y)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Pos> for (i32, i32) {
    fn from(pos: Pos) -> Self {
        (pos.x, pos.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Terrain of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Plain floor.
    Empty,
    /// Impassable.
    Wall,
    /// Terminal tile with a positive reward by default.
    Goal,
    /// Terminal tile with a negative reward by default.
    Lava,
    /// Non-terminal hazard, only present if risky tiles are active.
    Risky,
}

impl Tile {
    /// Returns `true` if the agent can stand on this tile.
    pub fn can_overlap(self) -> bool {
        match self {
            Tile::Empty | Tile::Goal | Tile::Lava | Tile::Risky => true,
            Tile::Wall => false,
        }
    }

    /// Returns the name of the tile.
    pub fn name(self) -> &'static str {
        match self {
            Tile::Empty => "empty",
            Tile::Wall => "wall",
            Tile::Goal => "goal",
            Tile::Lava => "lava",
            Tile::Risky => "risky",
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rectangular grid surrounded by walls.
///
/// The outer ring of cells is always [`Tile::Wall`]; [`Grid::set`] refuses to
/// touch it.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    // Row major, index is `y * width + x`
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates an empty grid enclosed by walls.
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        let n_cells = check_dimensions(width, height)?;

        let mut tiles = vec![Tile::Empty; n_cells];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    tiles[(y * width + x) as usize] = Tile::Wall;
                }
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Width including the walls.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height including the walls.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns `true` if `pos` lies inside the outer walls.
    pub fn is_interior(&self, pos: Pos) -> bool {
        pos.x > 0 && pos.y > 0 && pos.x < self.width - 1 && pos.y < self.height - 1
    }

    /// Places `tile` at `pos`, overwriting whatever was there.
    pub fn set(&mut self, pos: Pos, tile: Tile) -> Result<(), ConfigError> {
        if !self.is_interior(pos) {
            return Err(ConfigError::PlacementOutOfBounds(pos));
        }
        let ix = self.index(pos);
        self.tiles[ix] = tile;
        Ok(())
    }

    /// Returns the tile at `pos`. Cells outside the grid read as walls.
    pub fn get(&self, pos: Pos) -> Tile {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            Tile::Wall
        } else {
            self.tiles[self.index(pos)]
        }
    }

    /// Returns `true` if the agent can stand on `pos`.
    pub fn can_overlap(&self, pos: Pos) -> bool {
        self.get(pos).can_overlap()
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(ix, &tile)| (Pos::new(ix as i32 % width, ix as i32 / width), tile))
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }
}

/// Lava layout used when no lava positions are configured.
///
/// The layout is relative to the bottom left corner: the whole first interior
/// column, a five-cell stretch of the fourth column and two cells of the
/// seventh. Cells outside the interior of small grids are dropped.
pub fn default_lava_positions(width: i32, height: i32) -> Vec<Pos> {
    let mut positions: Vec<Pos> = (1..height - 1).map(|y| Pos::new(1, y)).collect();
    positions.extend((height - 7..=height - 3).rev().map(|y| Pos::new(3, y)));
    positions.extend([Pos::new(6, height - 5), Pos::new(6, height - 6)]);
    retain_interior(positions, width, height)
}

/// Risky tile layout used when risky tiles are active but no positions are configured.
pub fn default_risky_positions(width: i32, height: i32) -> Vec<Pos> {
    let positions = (1..height - 2).map(|y| Pos::new(2, y)).collect();
    retain_interior(positions, width, height)
}

fn retain_interior(mut positions: Vec<Pos>, width: i32, height: i32) -> Vec<Pos> {
    positions.retain(|p| p.x > 0 && p.y > 0 && p.x < width - 1 && p.y < height - 1);
    positions
}

/// Builds a [`Grid`] from interior wall, lava, risky and goal placements.
///
/// Placements are applied in a fixed order: walls, then lava, then risky
/// tiles, then goals. Goals therefore always win over hazards on the same
/// cell, while lava and risky tiles on the same cell are rejected. Interior
/// walls may not share a cell with any other placement.
///
/// ```
/// use riskgrid_env::{GridBuilder, Pos, Tile};
///
/// let grid = GridBuilder::new(8, 8)
///     .lava(vec![Pos::new(1, 3), Pos::new(1, 4)])
///     .goals(vec![Pos::new(1, 3)])
///     .build()
///     .unwrap();
///
/// assert_eq!(grid.get(Pos::new(1, 3)), Tile::Goal);
/// assert_eq!(grid.get(Pos::new(1, 4)), Tile::Lava);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridBuilder {
    width: i32,
    height: i32,
    walls: Vec<Pos>,
    lava: Vec<Pos>,
    risky: Vec<Pos>,
    goals: Vec<Pos>,
}

impl GridBuilder {
    /// Starts a grid of the given size without any placement.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: vec![],
            lava: vec![],
            risky: vec![],
            goals: vec![],
        }
    }

    /// Adds interior wall placements.
    pub fn walls(mut self, positions: impl IntoIterator<Item = Pos>) -> Self {
        self.walls.extend(positions);
        self
    }

    /// Adds lava placements.
    pub fn lava(mut self, positions: impl IntoIterator<Item = Pos>) -> Self {
        self.lava.extend(positions);
        self
    }

    /// Adds risky tile placements.
    pub fn risky(mut self, positions: impl IntoIterator<Item = Pos>) -> Self {
        self.risky.extend(positions);
        self
    }

    /// Adds goal placements.
    pub fn goals(mut self, positions: impl IntoIterator<Item = Pos>) -> Self {
        self.goals.extend(positions);
        self
    }

    /// Returns the placements in the order they are applied.
    pub fn placements(&self) -> Vec<(Pos, Tile)> {
        let walls = self.walls.iter().map(|&p| (p, Tile::Wall));
        let lava = self.lava.iter().map(|&p| (p, Tile::Lava));
        let risky = self.risky.iter().map(|&p| (p, Tile::Risky));
        let goals = self.goals.iter().map(|&p| (p, Tile::Goal));
        walls.chain(lava).chain(risky).chain(goals).collect()
    }

    /// Allocates a fresh grid and applies the placements.
    pub fn build(&self) -> Result<Grid, ConfigError> {
        let lava: HashSet<Pos> = self.lava.iter().copied().collect();
        if let Some(&pos) = self.risky.iter().find(|p| lava.contains(p)) {
            return Err(ConfigError::HazardConflict(pos));
        }
        let walls: HashSet<Pos> = self.walls.iter().copied().collect();
        let mut others = self.lava.iter().chain(&self.risky).chain(&self.goals);
        if let Some(&pos) = others.find(|p| walls.contains(p)) {
            return Err(ConfigError::WallConflict(pos));
        }

        let mut grid = Grid::new(self.width, self.height)?;
        for (pos, tile) in self.placements() {
            grid.set(pos, tile)?;
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_ring(grid: &Grid, pos: Pos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == grid.width() - 1 || pos.y == grid.height() - 1
    }

    #[test]
    fn test_outer_ring_is_wall() {
        let grid = Grid::new(7, 9).unwrap();
        for (pos, tile) in grid.iter() {
            if is_ring(&grid, pos) {
                assert_eq!(tile, Tile::Wall, "{}", pos);
            } else {
                assert_eq!(tile, Tile::Empty, "{}", pos);
            }
        }
        assert_eq!(grid.iter().count(), 63);
    }

    #[test]
    fn test_too_small() {
        assert_eq!(
            Grid::new(5, 11),
            Err(ConfigError::InvalidDimensions {
                width: 5,
                height: 11
            })
        );
        assert!(Grid::new(6, 6).is_ok());
    }

    #[test]
    fn test_too_large() {
        assert_eq!(
            Grid::new(50_000, 50_000),
            Err(ConfigError::GridTooLarge {
                width: 50_000,
                height: 50_000
            })
        );
        assert_eq!(
            check_dimensions(i32::MAX, 6),
            Err(ConfigError::GridTooLarge {
                width: i32::MAX,
                height: 6
            })
        );
        assert_eq!(check_dimensions(46_340, 46_340), Ok(46_340 * 46_340));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(6, 6).unwrap();
        grid.set(Pos::new(2, 2), Tile::Lava).unwrap();
        grid.set(Pos::new(2, 2), Tile::Risky).unwrap();
        assert_eq!(grid.get(Pos::new(2, 2)), Tile::Risky);
        assert_eq!(grid.get(Pos::new(-1, 2)), Tile::Wall);
        assert_eq!(grid.get(Pos::new(2, 6)), Tile::Wall);

        assert_eq!(
            grid.set(Pos::new(0, 2), Tile::Goal),
            Err(ConfigError::PlacementOutOfBounds(Pos::new(0, 2)))
        );
    }

    #[test]
    fn test_can_overlap() {
        assert!(Tile::Empty.can_overlap());
        assert!(Tile::Goal.can_overlap());
        assert!(Tile::Lava.can_overlap());
        assert!(Tile::Risky.can_overlap());
        assert!(!Tile::Wall.can_overlap());
    }

    #[test]
    fn test_goal_overrides_lava() {
        let grid = GridBuilder::new(11, 11)
            .goals(vec![Pos::new(1, 3)])
            .lava(default_lava_positions(11, 11))
            .build()
            .unwrap();
        assert_eq!(grid.get(Pos::new(1, 3)), Tile::Goal);
        assert_eq!(grid.get(Pos::new(1, 2)), Tile::Lava);
    }

    #[test]
    fn test_hazard_conflict() {
        let builder = GridBuilder::new(8, 8)
            .lava(vec![Pos::new(2, 2)])
            .risky(vec![Pos::new(2, 3), Pos::new(2, 2)]);
        assert_eq!(
            builder.build(),
            Err(ConfigError::HazardConflict(Pos::new(2, 2)))
        );
    }

    #[test]
    fn test_placement_order() {
        let builder = GridBuilder::new(8, 8)
            .goals(vec![Pos::new(4, 4)])
            .risky(vec![Pos::new(2, 2)])
            .lava(vec![Pos::new(3, 3)]);
        let builder = builder.walls(vec![Pos::new(5, 5)]);
        let tiles: Vec<Tile> = builder.placements().into_iter().map(|(_, t)| t).collect();
        assert_eq!(tiles, vec![Tile::Wall, Tile::Lava, Tile::Risky, Tile::Goal]);
    }

    #[test]
    fn test_interior_walls() {
        let grid = GridBuilder::new(6, 6)
            .walls(vec![Pos::new(2, 2), Pos::new(3, 1)])
            .build()
            .unwrap();
        assert_eq!(grid.get(Pos::new(2, 2)), Tile::Wall);
        assert!(!grid.can_overlap(Pos::new(3, 1)));
        assert!(grid.can_overlap(Pos::new(1, 1)));

        let builder = GridBuilder::new(6, 6)
            .walls(vec![Pos::new(2, 2)])
            .goals(vec![Pos::new(2, 2)]);
        assert_eq!(builder.build(), Err(ConfigError::WallConflict(Pos::new(2, 2))));
    }

    #[test]
    fn test_default_lava_layout() {
        let lava = default_lava_positions(11, 11);
        assert_eq!(lava.len(), 9 + 5 + 2);
        assert!(lava.contains(&Pos::new(1, 1)));
        assert!(lava.contains(&Pos::new(1, 9)));
        assert!(lava.contains(&Pos::new(3, 8)));
        assert!(lava.contains(&Pos::new(3, 4)));
        assert!(!lava.contains(&Pos::new(3, 3)));
        assert!(lava.contains(&Pos::new(6, 6)));
        assert!(lava.contains(&Pos::new(6, 5)));
    }

    #[test]
    fn test_default_layouts_fit_small_grids() {
        let lava = default_lava_positions(6, 6);
        assert!(lava.iter().all(|p| p.x > 0 && p.x < 5 && p.y > 0 && p.y < 5));
        assert!(!lava.iter().any(|p| p.x == 6));

        let risky = default_risky_positions(6, 6);
        assert_eq!(risky, vec![Pos::new(2, 1), Pos::new(2, 2), Pos::new(2, 3)]);
    }
}
