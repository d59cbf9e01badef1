//! Maze grid data model.
//!
//! This module contains the [`Grid`] and [`Cell`] types that form the shared substrate every
//! other component reads and writes: per-cell wall flags, the transient solver markers, the
//! flood-fill distance field, and bounds-checked coordinate accessors.

use std::fmt::Write as _;

/// Compass direction between two adjacent cells.
///
/// This enumeration names the four possible passages out of a cell. The discriminant order
/// matches the wall array layout in [`Cell`], so a direction doubles as an index into the wall
/// flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Towards the previous row, decreasing `y`.
    North,
    /// Towards the next row, increasing `y`.
    South,
    /// Towards the next column, increasing `x`.
    East,
    /// Towards the previous column, decreasing `x`.
    West,
}

impl Direction {
    /// All four directions in the fixed scan order used by the generator and the solvers.
    pub(crate) const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Returns the direction pointing back at the caller.
    ///
    /// This function maps each direction onto its compass opposite. Wall pairs between adjacent
    /// cells are kept in sync through it: a passage carved towards `d` also clears the
    /// neighbour's wall towards `d.opposite()`.
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Returns the coordinate delta of a single step in this direction.
    ///
    /// This function expresses the direction as a signed `(dx, dy)` pair for use with
    /// [`usize::checked_add_signed`], so stepping north or west off the grid edge yields `None`
    /// instead of wrapping around.
    pub(crate) const fn delta(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Returns the index of this direction within a cell's wall array.
    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

/// Authoritative solver marker on a cell.
///
/// This enumeration records what the active solver has done with a cell. It is semantic state,
/// not presentation: the renderer derives a colour from it each frame but never stores one back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Trace {
    /// The cell has not been touched by the current solve run.
    #[default]
    Untouched,
    /// The cell was swept by the search frontier.
    Searched,
    /// The cell lies on the revealed solution path.
    Path,
}

/// One grid position with its wall flags and solver state.
///
/// This structure holds the four per-direction wall flags, the transient `visited` marker reused
/// by both the generator and the solvers, the distance label written by the flood-fill strategy,
/// and the authoritative [`Trace`] marker the renderer projects into colours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    /// Wall flags indexed by [`Direction`]; `true` means the wall is present.
    walls: [bool; 4],
    /// Transient search marker shared by the generator carve and the solver frontiers.
    pub(crate) visited: bool,
    /// Distance from the solve start, meaningful only under the flood-fill strategy.
    pub(crate) distance: u32,
    /// Authoritative solver marker projected into presentation colours by the renderer.
    pub(crate) trace: Trace,
}

impl Cell {
    /// Creates a fully walled, unmarked cell.
    const fn new() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
            distance: 0,
            trace: Trace::Untouched,
        }
    }

    /// Returns whether this cell has a wall towards the given direction.
    #[expect(
        clippy::indexing_slicing,
        reason = "Direction indices come from a four-variant enum and fit the wall array."
    )]
    pub(crate) const fn wall(&self, direction: Direction) -> bool {
        self.walls[direction.index()]
    }

    /// Removes the wall on this cell's side towards the given direction.
    ///
    /// This function only clears one side of a wall pair; the carving code is responsible for
    /// clearing the matching wall on the neighbour's side in the same operation.
    #[expect(
        clippy::indexing_slicing,
        reason = "Direction indices come from a four-variant enum and fit the wall array."
    )]
    pub(crate) fn remove_wall(&mut self, direction: Direction) {
        self.walls[direction.index()] = false;
    }
}

/// Rectangular maze grid with a designated finish coordinate.
///
/// This structure owns a row-major buffer of [`Cell`] values plus the `finish` coordinate the
/// solvers aim for. All coordinate access goes through bounds-checked accessors returning
/// [`Option`], so an out-of-range coordinate surfaces as a checked condition rather than a
/// panic.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    /// Number of columns; always at least two.
    width: usize,
    /// Number of rows; always at least two.
    height: usize,
    /// Row-major cell buffer of `width * height` entries.
    cells: Vec<Cell>,
    /// Coordinate the solvers aim for; always inside bounds.
    finish: (usize, usize),
}

impl Grid {
    /// Creates a fully walled grid of the given dimensions.
    ///
    /// Every cell starts with all four walls present and no solver markers. The finish
    /// coordinate starts at the origin and is overwritten by maze generation.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::new(); width * height],
            finish: (0, 0),
        }
    }

    /// Returns the number of columns in the grid.
    pub(crate) const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows in the grid.
    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    /// Returns the coordinate the solvers aim for.
    pub(crate) const fn finish(&self) -> (usize, usize) {
        self.finish
    }

    /// Records the coordinate the solvers aim for.
    ///
    /// The caller must pass an in-bounds coordinate; the generator derives it from the carve
    /// start cell, which is drawn from the grid dimensions.
    pub(crate) fn set_finish(&mut self, x: usize, y: usize) {
        self.finish = (x, y);
    }

    /// Returns the row-major linear index of a coordinate.
    pub(crate) const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Returns the cell at a coordinate, or `None` if the coordinate is out of bounds.
    pub(crate) fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.width && y < self.height)
            .then(|| self.cells.get(self.index(x, y)))
            .flatten()
    }

    /// Returns the cell at a coordinate mutably, or `None` if the coordinate is out of bounds.
    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.cells.get_mut(index)
        } else {
            None
        }
    }

    /// Returns the coordinate one step away in the given direction.
    ///
    /// This function is pure coordinate arithmetic and performs no upper-bounds check; it only
    /// reports `None` when the step would leave the coordinate space entirely by crossing below
    /// zero. Callers that need an in-bounds neighbour combine it with [`Grid::cell`].
    pub(crate) fn neighbor(x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.delta();
        Some((x.checked_add_signed(dx)?, y.checked_add_signed(dy)?))
    }

    /// Returns whether the passage between a cell and its neighbour is open on both sides.
    ///
    /// A move is possible only when the cell has no wall towards the direction, the neighbour
    /// exists inside the grid, and the neighbour has no wall pointing back. Requiring agreement
    /// from both sides means a half-carved wall pair is treated as closed.
    pub(crate) fn can_move(&self, x: usize, y: usize, direction: Direction) -> bool {
        let Some(cell) = self.cell(x, y) else {
            return false;
        };
        if cell.wall(direction) {
            return false;
        }

        let Some((nx, ny)) = Self::neighbor(x, y, direction) else {
            return false;
        };
        self.cell(nx, ny)
            .is_some_and(|neighbor| !neighbor.wall(direction.opposite()))
    }

    /// Resets every cell to the fully walled, unmarked state.
    ///
    /// This function is the first step of maze generation; it discards walls, markers and
    /// distances alike so a regenerated maze shares nothing with its predecessor.
    pub(crate) fn reset_cells(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::new();
        }
    }

    /// Clears the `visited` marker on every cell.
    ///
    /// The generator reuses the marker the solvers rely on, so carving finishes by wiping it
    /// grid-wide to hand the solvers a clean slate.
    pub(crate) fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    /// Counts the open passages in the grid.
    ///
    /// A passage is counted once per adjacent pair whose wall is cleared on both sides. For a
    /// perfect maze this equals `width * height - 1`, the edge count of a spanning tree.
    pub(crate) fn open_passage_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.can_move(x, y, Direction::East) {
                    count += 1;
                }
                if self.can_move(x, y, Direction::South) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Renders the per-cell distance field as a right-justified textual grid.
    ///
    /// This function produces the diagnostic dump shown by the distance overlay: one line per
    /// row, each cell's distance padded to the width of the largest value so the columns line
    /// up. The field is only meaningful after a flood-fill run; before one it is all zeroes.
    pub(crate) fn distance_dump(&self) -> String {
        let widest = self
            .cells
            .iter()
            .map(|cell| cell.distance)
            .max()
            .unwrap_or(0)
            .to_string()
            .len();

        let mut dump = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let distance = self.cell(x, y).map_or(0, |cell| cell.distance);
                if x > 0 {
                    dump.push(' ');
                }
                let _ = write!(dump, "{distance:>widest$}");
            }
            dump.push('\n');
        }
        dump
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates a 3x2 grid with a single carved passage between (0, 0) and (1, 0).
    fn grid_with_one_passage() -> Grid {
        let mut grid = Grid::new(3, 2);
        grid.cell_mut(0, 0)
            .expect("origin cell should exist")
            .remove_wall(Direction::East);
        grid.cell_mut(1, 0)
            .expect("cell (1, 0) should exist")
            .remove_wall(Direction::West);
        grid
    }

    #[test]
    fn test_index_is_row_major() {
        let grid = Grid::new(5, 4);

        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(4, 0), 4);
        assert_eq!(grid.index(0, 1), 5);
        assert_eq!(grid.index(3, 2), 13);
    }

    #[test]
    fn test_cell_rejects_out_of_range_coordinates() {
        let grid = Grid::new(3, 2);

        assert!(grid.cell(0, 0).is_some());
        assert!(grid.cell(2, 1).is_some());
        assert!(grid.cell(3, 0).is_none());
        assert!(grid.cell(0, 2).is_none());
        assert!(grid.cell(usize::MAX, usize::MAX).is_none());
    }

    #[test]
    fn test_cell_mut_rejects_out_of_range_coordinates() {
        let mut grid = Grid::new(3, 2);

        assert!(grid.cell_mut(2, 1).is_some());
        assert!(grid.cell_mut(3, 1).is_none());
        assert!(grid.cell_mut(2, 2).is_none());
    }

    #[test]
    fn test_neighbor_arithmetic() {
        assert_eq!(Grid::neighbor(1, 1, Direction::North), Some((1, 0)));
        assert_eq!(Grid::neighbor(1, 1, Direction::South), Some((1, 2)));
        assert_eq!(Grid::neighbor(1, 1, Direction::East), Some((2, 1)));
        assert_eq!(Grid::neighbor(1, 1, Direction::West), Some((0, 1)));
    }

    #[test]
    fn test_neighbor_reports_underflow() {
        assert_eq!(Grid::neighbor(0, 0, Direction::North), None);
        assert_eq!(Grid::neighbor(0, 0, Direction::West), None);
        assert_eq!(Grid::neighbor(0, 0, Direction::South), Some((0, 1)));
    }

    #[test]
    fn test_can_move_requires_both_sides_open() {
        let mut grid = Grid::new(3, 2);

        assert!(!grid.can_move(0, 0, Direction::East));

        // A half-carved pair still counts as closed.
        grid.cell_mut(0, 0)
            .expect("origin cell should exist")
            .remove_wall(Direction::East);
        assert!(!grid.can_move(0, 0, Direction::East));

        grid.cell_mut(1, 0)
            .expect("cell (1, 0) should exist")
            .remove_wall(Direction::West);
        assert!(grid.can_move(0, 0, Direction::East));
        assert!(grid.can_move(1, 0, Direction::West));
    }

    #[test]
    fn test_can_move_rejects_grid_edges() {
        let mut grid = Grid::new(2, 2);
        grid.cell_mut(0, 0)
            .expect("origin cell should exist")
            .remove_wall(Direction::North);
        grid.cell_mut(0, 0)
            .expect("origin cell should exist")
            .remove_wall(Direction::West);

        assert!(!grid.can_move(0, 0, Direction::North));
        assert!(!grid.can_move(0, 0, Direction::West));
    }

    #[test]
    fn test_opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_reset_cells_restores_walls_and_clears_marks() {
        let mut grid = grid_with_one_passage();
        {
            let cell = grid.cell_mut(0, 0).expect("origin cell should exist");
            cell.visited = true;
            cell.distance = 7;
            cell.trace = Trace::Path;
        }

        grid.reset_cells();

        let cell = grid.cell(0, 0).expect("origin cell should exist");
        assert!(cell.wall(Direction::East));
        assert!(!cell.visited);
        assert_eq!(cell.distance, 0);
        assert_eq!(cell.trace, Trace::Untouched);
    }

    #[test]
    fn test_open_passage_count() {
        let grid = grid_with_one_passage();

        assert_eq!(grid.open_passage_count(), 1);
        assert_eq!(Grid::new(4, 4).open_passage_count(), 0);
    }

    #[test]
    fn test_distance_dump_right_justifies_columns() {
        let mut grid = Grid::new(3, 2);
        grid.cell_mut(2, 1)
            .expect("cell (2, 1) should exist")
            .distance = 12;
        grid.cell_mut(1, 0)
            .expect("cell (1, 0) should exist")
            .distance = 3;

        let dump = grid.distance_dump();

        assert_eq!(dump, " 0  3  0\n 0  0 12\n");
    }
}
