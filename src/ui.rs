//! User interface rendering for the maze session.
//!
//! This module projects the session's authoritative state into a terminal frame: walls and cells
//! become canvas points, the player and the solve target get their own colours, and a bottom
//! tooltip reports the run phase and key bindings. The projection is strictly read-only; nothing
//! here writes back into the session.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::{
    grid::{Direction, Grid, Trace},
    session::{Phase, Session},
    solver::StrategyKind,
    App,
};

/// Presentation role of a single maze cell.
///
/// This enumeration is the derived, render-only projection of the authoritative cell state: the
/// player position wins over the solve target, which wins over the solver traces. It is computed
/// fresh every frame and never stored back into the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    /// Plain floor; nothing is drawn.
    Background,
    /// Cell swept by a search frontier.
    Searched,
    /// Cell on the revealed solution path.
    Path,
    /// The solve target, which is the generation start cell.
    Start,
    /// The player cursor.
    Player,
}

impl Role {
    /// Returns the colour this role is drawn with, or `None` for plain floor.
    const fn color(self) -> Option<Color> {
        match self {
            Self::Background => None,
            Self::Searched => Some(Color::DarkGray),
            Self::Path => Some(Color::Cyan),
            Self::Start => Some(Color::Yellow),
            Self::Player => Some(Color::White),
        }
    }
}

/// Computes the presentation role of a cell from the session state.
pub(crate) fn cell_role(session: &Session, x: usize, y: usize) -> Role {
    let player = session.player();
    if (x, y) == (player.x, player.y) {
        return Role::Player;
    }
    if (x, y) == session.grid().finish() {
        return Role::Start;
    }
    match session.grid().cell(x, y).map(|cell| cell.trace) {
        Some(Trace::Path) => Role::Path,
        Some(Trace::Searched) => Role::Searched,
        _ => Role::Background,
    }
}

/// Returns whether a display-grid point is part of a wall.
///
/// The maze renders on a `(2 * width + 1) x (2 * height + 1)` display grid: odd/odd points are
/// cell interiors, even/even points are wall posts, and the mixed-parity points between two
/// cells carry the wall flag of the adjoining cell. Border points are always walls because edge
/// walls are never carved.
fn is_wall_point(grid: &Grid, cx: usize, cy: usize) -> bool {
    match (cx % 2, cy % 2) {
        (1, 1) => false,
        (1, 0) => {
            let x = (cx - 1) / 2;
            if cy == 0 {
                true
            } else {
                let y = cy / 2 - 1;
                grid.cell(x, y).map_or(true, |cell| cell.wall(Direction::South))
            }
        }
        (0, 1) => {
            let y = (cy - 1) / 2;
            if cx == 0 {
                true
            } else {
                let x = cx / 2 - 1;
                grid.cell(x, y).map_or(true, |cell| cell.wall(Direction::East))
            }
        }
        _ => true,
    }
}

/// Collects the display-grid coordinates of every wall point.
fn wall_points(grid: &Grid) -> Vec<(usize, usize)> {
    let cols = 2 * grid.width() + 1;
    let rows = 2 * grid.height() + 1;

    let mut points = Vec::new();
    for cy in 0..rows {
        for cx in 0..cols {
            if is_wall_point(grid, cx, cy) {
                points.push((cx, cy));
            }
        }
    }
    points
}

/// Collects the display-grid coordinates of every cell carrying the given role.
fn role_points(session: &Session, role: Role) -> Vec<(usize, usize)> {
    let grid = session.grid();

    let mut points = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if cell_role(session, x, y) == role {
                points.push((2 * x + 1, 2 * y + 1));
            }
        }
    }
    points
}

/// Transforms display-grid coordinates to centered canvas coordinates.
///
/// This function converts `(col, row)` display points to screen `(x, y)` pairs using the
/// transformation `coordinate[i] = (n - 1) / 2 - i` for rows, which ascend downwards on the
/// display grid but upwards on the canvas, and `coordinate[i] = i - (n - 1) / 2` for columns.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
fn transform_points(
    points: &[(usize, usize)],
    cols: usize,
    rows: usize,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(rows)?);
    let cols_n = f64::from(u16::try_from(cols)?);

    points
        .iter()
        .map(|&(col, row)| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(row)?);
            let screen_x = f64::from(u16::try_from(col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Returns the status label for a run phase.
const fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Solving => "solving",
        Phase::Revealing => "revealing",
        Phase::Finished => "finished",
    }
}

/// Returns the status label for a strategy kind.
const fn strategy_label(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Dfs => "depth-first",
        StrategyKind::FloodFill => "flood-fill",
    }
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
fn clear(frame: &mut Frame) {
    let widget = Clear;
    frame.render_widget(widget, frame.area());
}

/// Renders the maze, the solver overlay and the bottom tooltip for the current session state.
///
/// This function lays out a centered canvas sized to the maze's display grid, paints walls and
/// role-coloured cells as points, and closes with a tooltip block reporting the run phase, the
/// active strategy and the key bindings. The optional distance overlay renders on top when
/// toggled.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion operations.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app.session.grid();
    let display_cols = 2 * grid.width() + 1;
    let display_rows = 2 * grid.height() + 1;

    // Overall layout: maze area plus a tooltip block at the bottom.
    let overall_layout =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let maze_area = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(display_rows)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(display_cols)?),
        Constraint::Min(1),
    ])
    .split(maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before the paint closure. The draw order
    // puts the player on top of the path, the path on top of the search sweep.
    let wall_coords = transform_points(&wall_points(grid), display_cols, display_rows)?;
    let mut layers = Vec::new();
    for role in [Role::Searched, Role::Path, Role::Start, Role::Player] {
        let Some(color) = role.color() else {
            continue;
        };
        let coords = transform_points(
            &role_points(&app.session, role),
            display_cols,
            display_rows,
        )?;
        layers.push((coords, color));
    }

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });

    frame.render_widget(maze, space);

    // Tooltip block at the bottom with the run status inside it.
    let tooltip_block = Block::bordered()
        .title("(arrows) move / (space) solve / (a) auto / (r) reset / (1) dfs / (2) flood / (d) distances / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    let status = format!(
        "{} / {} / auto-run {}",
        phase_label(app.session.phase()),
        strategy_label(app.session.strategy_kind()),
        if app.session.auto_run() { "on" } else { "off" },
    );
    let tooltip_inner = tooltip_block.inner(tooltip_area);
    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(Paragraph::new(status).centered(), tooltip_inner);

    if app.show_distances {
        distance_overlay(app, frame)?;
    }

    Ok(())
}

/// Renders the diagnostic distance overlay over the maze.
///
/// This function shows the flood-fill distance field as a right-justified textual grid inside a
/// centered popup, the read-only dump an external key binding toggles for inspection.
///
/// # Errors
///
/// This function may return errors from layout lookups or size conversions.
fn distance_overlay(app: &App, frame: &mut Frame) -> Result<()> {
    let dump = app.session.grid().distance_dump();
    let inner_width = dump.lines().map(str::len).max().unwrap_or(0);
    let inner_height = dump.lines().count();

    let space = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(inner_height + 2)?),
        Constraint::Min(1),
    ])
    .split(frame.area())
    .get(1)
    .copied()
    .ok_or_eyre("failed to get overlay area from vertical layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(inner_width + 2)?),
        Constraint::Min(1),
    ])
    .split(space)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get overlay area from horizontal layout")?;

    let block = Block::bordered()
        .title("Distances")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Rounded);
    let inner_space = block.inner(space);

    frame.render_widget(Clear, space);
    frame.render_widget(block, space);
    frame.render_widget(Paragraph::new(dump), inner_space);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{session::Intent, Config};

    /// Creates a deterministic test app on a small maze.
    fn create_test_app() -> App {
        let config = Config::try_parse_from([
            "mazewalk", "--width", "6", "--height", "5", "--seed", "3",
        ])
        .expect("test arguments should parse");
        App::new(&config)
    }

    /// Creates a test terminal large enough for the 6x5 display grid plus the tooltip.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    #[test]
    fn test_draw_idle_session() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing an idle session should succeed");
    }

    #[test]
    fn test_draw_solving_session() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.session
            .apply(Intent::ToggleSolve)
            .expect("toggle should apply");

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing a solving session should succeed");
    }

    #[test]
    fn test_draw_with_distance_overlay() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.show_distances = true;

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the distance overlay should succeed");
    }

    #[test]
    fn test_cell_role_precedence() {
        let app = create_test_app();
        let session = &app.session;
        let player = (session.player().x, session.player().y);

        assert_eq!(cell_role(session, player.0, player.1), Role::Player);

        let finish = session.grid().finish();
        if finish != player {
            assert_eq!(cell_role(session, finish.0, finish.1), Role::Start);
        }
    }

    #[test]
    fn test_untouched_cells_render_as_background() {
        let app = create_test_app();
        let session = &app.session;
        let player = (session.player().x, session.player().y);
        let finish = session.grid().finish();

        for y in 0..session.grid().height() {
            for x in 0..session.grid().width() {
                if (x, y) == player || (x, y) == finish {
                    continue;
                }
                assert_eq!(cell_role(session, x, y), Role::Background);
            }
        }
    }

    #[test]
    fn test_wall_points_mark_borders_and_respect_carved_passages() {
        let mut grid = Grid::new(2, 1);
        grid.cell_mut(0, 0)
            .expect("origin cell should exist")
            .remove_wall(Direction::East);
        grid.cell_mut(1, 0)
            .expect("cell (1, 0) should exist")
            .remove_wall(Direction::West);

        // Display grid is 5x3: corners and edges are walls, cell interiors and the carved
        // passage between the two cells are not.
        assert!(is_wall_point(&grid, 0, 0));
        assert!(is_wall_point(&grid, 1, 0));
        assert!(is_wall_point(&grid, 0, 1));
        assert!(!is_wall_point(&grid, 1, 1));
        assert!(!is_wall_point(&grid, 2, 1), "the carved passage must stay open");
        assert!(!is_wall_point(&grid, 3, 1));
        assert!(is_wall_point(&grid, 4, 1));
        assert!(is_wall_point(&grid, 2, 2));

        let points = wall_points(&grid);
        assert!(points.contains(&(0, 0)));
        assert!(!points.contains(&(2, 1)));
    }

    #[test]
    fn test_transform_points_centers_the_display_grid() {
        let transformed = transform_points(&[(0, 0), (4, 2), (2, 1)], 5, 3)
            .expect("transformation should succeed");

        assert_eq!(transformed, vec![(-2.0, 1.0), (2.0, -1.0), (0.0, 0.0)]);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(phase_label(Phase::Idle), "idle");
        assert_eq!(phase_label(Phase::Solving), "solving");
        assert_eq!(phase_label(Phase::Revealing), "revealing");
        assert_eq!(phase_label(Phase::Finished), "finished");
        assert_eq!(strategy_label(StrategyKind::Dfs), "depth-first");
        assert_eq!(strategy_label(StrategyKind::FloodFill), "flood-fill");
    }
}
