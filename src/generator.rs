//! Randomized maze generation.
//!
//! This module carves a perfect maze into a [`Grid`] with the recursive-backtracker algorithm,
//! run over an explicit work stack so the carve depth is bounded by heap allocation rather than
//! the call stack. An optional post-pass knocks out extra walls to produce sparser, non-perfect
//! mazes.

use rand::{seq::SliceRandom as _, Rng};

use crate::grid::{Direction, Grid};

/// One pending carve frame on the explicit work stack.
///
/// This structure replaces a recursive call: the coordinate being carved from and the shuffled
/// candidate directions not yet consumed. When the frame's candidates run out, popping it is the
/// backtrack step.
struct CarveFrame {
    /// Column of the cell this frame carves from.
    x: usize,
    /// Row of the cell this frame carves from.
    y: usize,
    /// Shuffled candidate directions still to be tried from this cell.
    candidates: Vec<Direction>,
}

impl CarveFrame {
    /// Creates a frame for a cell with its four directions in a fresh random order.
    ///
    /// Shuffling up front is behaviourally equivalent to drawing directions at random with
    /// rejection, but consumes each candidate exactly once and so terminates in a bounded number
    /// of draws.
    fn new(x: usize, y: usize, rng: &mut impl Rng) -> Self {
        let mut candidates = Direction::ALL.to_vec();
        candidates.shuffle(rng);

        Self { x, y, candidates }
    }
}

/// Carves a random perfect maze into the grid and designates its finish coordinate.
///
/// This function resets every cell to the fully walled state, picks a uniformly random start
/// cell, and runs the recursive-backtracker carve from it. Afterwards every cell is reachable
/// from every other cell through exactly one simple path, all `visited` markers are cleared for
/// the solvers, and the finish is recorded. When `percent_less_walls` is non-zero an extra
/// post-pass removes additional walls with proportional probability, trading the perfect-maze
/// property for sparser corridors while keeping full reachability.
///
/// The finish deliberately coincides with the carve start cell; solving is a run back to the
/// maze's origin rather than to a separate exit.
pub(crate) fn generate(grid: &mut Grid, percent_less_walls: u8, rng: &mut impl Rng) {
    grid.reset_cells();

    let start_x = rng.gen_range(0..grid.width());
    let start_y = rng.gen_range(0..grid.height());

    carve(grid, start_x, start_y, rng);

    grid.clear_visited();
    grid.set_finish(start_x, start_y);

    if percent_less_walls > 0 {
        remove_extra_walls(grid, percent_less_walls, rng);
    }
}

/// Runs the recursive-backtracker carve from the start cell over an explicit work stack.
///
/// Each stack frame holds a cell and its shuffled remaining candidate directions. A frame
/// consumes candidates one by one, skipping passages that are already open and neighbours that
/// are visited or outside the grid; a qualifying neighbour gets both wall sides removed and a
/// fresh frame pushed on top, after which the parent frame resumes with its remaining
/// candidates. The stack can grow to `width * height` frames on a snaking path, the same bound
/// the call-recursive formulation would put on the call stack.
fn carve(grid: &mut Grid, start_x: usize, start_y: usize, rng: &mut impl Rng) {
    if let Some(cell) = grid.cell_mut(start_x, start_y) {
        cell.visited = true;
    }

    let mut stack = vec![CarveFrame::new(start_x, start_y, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = frame.candidates.pop() else {
            let _ = stack.pop();
            continue;
        };
        let (x, y) = (frame.x, frame.y);

        // Already carved through this wall from the other side.
        if grid.cell(x, y).is_some_and(|cell| !cell.wall(direction)) {
            continue;
        }

        let Some((nx, ny)) = Grid::neighbor(x, y, direction) else {
            continue;
        };
        // A visited neighbour would close a cycle; skip it to keep the maze a spanning tree.
        match grid.cell(nx, ny) {
            None => continue,
            Some(neighbor) if neighbor.visited => continue,
            Some(_) => {}
        }

        if let Some(cell) = grid.cell_mut(x, y) {
            cell.remove_wall(direction);
        }
        if let Some(neighbor) = grid.cell_mut(nx, ny) {
            neighbor.remove_wall(direction.opposite());
            neighbor.visited = true;
        }

        stack.push(CarveFrame::new(nx, ny, rng));
    }
}

/// Removes extra walls between adjacent non-start cells with proportional probability.
///
/// This post-pass visits every interior wall pair still closed after carving and opens it with
/// probability `percent_less_walls / 100`. Walls touching the finish cell are left alone so the
/// solve target keeps its carved surroundings. Opening walls only ever adds edges to the passage
/// graph, so reachability established by the carve is preserved.
fn remove_extra_walls(grid: &mut Grid, percent_less_walls: u8, rng: &mut impl Rng) {
    let finish = grid.finish();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            for direction in [Direction::East, Direction::South] {
                let Some((nx, ny)) = Grid::neighbor(x, y, direction) else {
                    continue;
                };
                if nx >= grid.width() || ny >= grid.height() {
                    continue;
                }
                if (x, y) == finish || (nx, ny) == finish {
                    continue;
                }
                if grid.can_move(x, y, direction) {
                    continue;
                }
                if rng.gen_range(0..100) >= u32::from(percent_less_walls) {
                    continue;
                }

                if let Some(cell) = grid.cell_mut(x, y) {
                    cell.remove_wall(direction);
                }
                if let Some(neighbor) = grid.cell_mut(nx, ny) {
                    neighbor.remove_wall(direction.opposite());
                }
            }
        }
    }
}
