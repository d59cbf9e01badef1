//! Stepwise maze-solving strategies.
//!
//! This module contains the two interchangeable solving strategies, depth-first search with a
//! backtrack stack and breadth-first flood-fill with a distance field, plus the post-solve path
//! reveal for each. Every operation advances the search by at most one cell so the caller can
//! animate it one tick at a time.

use std::collections::VecDeque;

use crate::grid::{Direction, Grid, Trace};

/// Selector for one of the two solving strategies.
///
/// This enumeration is the externally facing strategy name, separate from [`Strategy`] which
/// also owns the strategy's working state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StrategyKind {
    /// Depth-first search with a backtrack stack.
    Dfs,
    /// Breadth-first flood-fill with a distance field.
    FloodFill,
}

/// Active solving strategy together with its working state.
///
/// This enumeration binds each strategy to the history container it needs: a LIFO stack of
/// visited coordinates for depth-first search, a FIFO frontier queue for flood-fill. Switching
/// strategies discards the container wholesale; the two are never live at the same time.
#[derive(Debug)]
pub(crate) enum Strategy {
    /// Depth-first search; the stack records the path from the start to the current cell.
    Dfs {
        /// Coordinates pushed on the way in, popped one per step when backtracking or revealing.
        history: Vec<(usize, usize)>,
    },
    /// Breadth-first flood-fill; the queue holds the expanding search frontier.
    FloodFill {
        /// Frontier coordinates in breadth-first discovery order.
        frontier: VecDeque<(usize, usize)>,
    },
}

/// Result of one solving step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// The search moved or expanded by one cell.
    Advanced,
    /// The current position is the finish; the maze is solved.
    Solved,
    /// The frontier is exhausted without reaching the finish; the search stays put. This is a
    /// quiescent state, not an error, and cannot occur on a properly generated maze.
    Stalled,
}

/// Result of one path-reveal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RevealOutcome {
    /// One more path cell was revealed.
    Advanced,
    /// The recorded route is fully revealed.
    Complete,
}

impl Strategy {
    /// Creates a strategy of the given kind with a fresh, empty history container.
    pub(crate) fn new(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Dfs => Self::Dfs {
                history: Vec::new(),
            },
            StrategyKind::FloodFill => Self::FloodFill {
                frontier: VecDeque::new(),
            },
        }
    }

    /// Returns the kind of this strategy.
    pub(crate) const fn kind(&self) -> StrategyKind {
        match self {
            Self::Dfs { .. } => StrategyKind::Dfs,
            Self::FloodFill { .. } => StrategyKind::FloodFill,
        }
    }

    /// Advances the search by one cell from the given position.
    ///
    /// This function dispatches to the active strategy's step and reports where the search moved
    /// to via the returned coordinate, alongside the step outcome. The caller owns the cooldown
    /// gate; by the time this runs the step has been accepted.
    pub(crate) fn step(
        &mut self,
        grid: &mut Grid,
        x: usize,
        y: usize,
    ) -> ((usize, usize), StepOutcome) {
        match self {
            Self::Dfs { history } => dfs_step(grid, x, y, history),
            Self::FloodFill { frontier } => flood_fill_step(grid, x, y, frontier),
        }
    }

    /// Reveals one cell of the discovered route from the given position.
    ///
    /// Depth-first search replays its recorded history stack in reverse; flood-fill walks the
    /// distance field downhill, re-deriving the route one neighbour at a time instead of
    /// replaying a recording.
    pub(crate) fn reveal_step(
        &mut self,
        grid: &mut Grid,
        x: usize,
        y: usize,
    ) -> ((usize, usize), RevealOutcome) {
        match self {
            Self::Dfs { history } => dfs_reveal_step(grid, x, y, history),
            Self::FloodFill { .. } => flood_fill_reveal_step(grid, x, y),
        }
    }
}

/// Performs one depth-first search step.
///
/// The current cell is marked visited and tagged as searched, then the four directions are
/// scanned in fixed order for an open passage to an unvisited neighbour. The first hit pushes
/// the current coordinate onto the history stack and moves there; no hit pops the stack and
/// backtracks. An empty stack with no candidates leaves the search stationary.
fn dfs_step(
    grid: &mut Grid,
    x: usize,
    y: usize,
    history: &mut Vec<(usize, usize)>,
) -> ((usize, usize), StepOutcome) {
    if (x, y) == grid.finish() {
        return ((x, y), StepOutcome::Solved);
    }

    mark_searched(grid, x, y);

    for direction in Direction::ALL {
        if !grid.can_move(x, y, direction) {
            continue;
        }
        let Some((nx, ny)) = Grid::neighbor(x, y, direction) else {
            continue;
        };
        if grid.cell(nx, ny).is_some_and(|neighbor| neighbor.visited) {
            continue;
        }

        history.push((x, y));
        return ((nx, ny), StepOutcome::Advanced);
    }

    match history.pop() {
        Some(position) => (position, StepOutcome::Advanced),
        None => ((x, y), StepOutcome::Stalled),
    }
}

/// Performs one flood-fill step.
///
/// The current cell is marked and every open, unvisited neighbour is labelled with the next
/// distance value, marked visited up front so the queue never holds duplicates, and enqueued.
/// The step then moves to the front of the queue, giving breadth-first order and therefore
/// shortest-path distances by construction.
fn flood_fill_step(
    grid: &mut Grid,
    x: usize,
    y: usize,
    frontier: &mut VecDeque<(usize, usize)>,
) -> ((usize, usize), StepOutcome) {
    if (x, y) == grid.finish() {
        return ((x, y), StepOutcome::Solved);
    }

    mark_searched(grid, x, y);
    let distance = grid.cell(x, y).map_or(0, |cell| cell.distance);

    for direction in Direction::ALL {
        if !grid.can_move(x, y, direction) {
            continue;
        }
        let Some((nx, ny)) = Grid::neighbor(x, y, direction) else {
            continue;
        };
        let Some(neighbor) = grid.cell_mut(nx, ny) else {
            continue;
        };
        if neighbor.visited {
            continue;
        }

        neighbor.distance = distance + 1;
        neighbor.visited = true;
        frontier.push_back((nx, ny));
    }

    match frontier.pop_front() {
        Some(position) => (position, StepOutcome::Advanced),
        None => ((x, y), StepOutcome::Stalled),
    }
}

/// Reveals one cell of the depth-first route by replaying the history stack.
///
/// Popping one coordinate per invocation walks the recorded path back to the start in exact
/// reverse push order. An empty stack means the replay is complete.
fn dfs_reveal_step(
    grid: &mut Grid,
    x: usize,
    y: usize,
    history: &mut Vec<(usize, usize)>,
) -> ((usize, usize), RevealOutcome) {
    let Some((px, py)) = history.pop() else {
        return ((x, y), RevealOutcome::Complete);
    };

    if let Some(cell) = grid.cell_mut(px, py) {
        cell.trace = Trace::Path;
    }
    ((px, py), RevealOutcome::Advanced)
}

/// Reveals one cell of the flood-fill route by walking the distance field downhill.
///
/// From the current cell the four neighbours are scanned for one whose distance is exactly one
/// less; moving there and tagging it re-derives the shortest path step by step. Distance labels
/// are only meaningful on visited cells, so unswept neighbours are skipped. Distance zero is the
/// solve start, so reaching it completes the reveal. This is a fresh search each invocation, not
/// a replay of recorded state.
fn flood_fill_reveal_step(grid: &mut Grid, x: usize, y: usize) -> ((usize, usize), RevealOutcome) {
    let distance = grid.cell(x, y).map_or(0, |cell| cell.distance);

    if distance == 0 {
        if let Some(cell) = grid.cell_mut(x, y) {
            cell.trace = Trace::Path;
        }
        return ((x, y), RevealOutcome::Complete);
    }

    for direction in Direction::ALL {
        if !grid.can_move(x, y, direction) {
            continue;
        }
        let Some((nx, ny)) = Grid::neighbor(x, y, direction) else {
            continue;
        };
        let Some(neighbor) = grid.cell_mut(nx, ny) else {
            continue;
        };
        if neighbor.visited && neighbor.distance == distance - 1 {
            neighbor.trace = Trace::Path;
            return ((nx, ny), RevealOutcome::Advanced);
        }
    }

    // No downhill neighbour exists only on a malformed distance field; stay put quiescently.
    ((x, y), RevealOutcome::Complete)
}

/// Marks a cell visited and tags it as swept by the search frontier.
fn mark_searched(grid: &mut Grid, x: usize, y: usize) {
    if let Some(cell) = grid.cell_mut(x, y) {
        cell.visited = true;
        if cell.trace == Trace::Untouched {
            cell.trace = Trace::Searched;
        }
    }
}
