//! Event handling functions for user input.
//!
//! This module polls crossterm for key presses and translates them into the discrete intents the
//! session consumes. The translation itself is a pure function over key codes so the mapping can
//! be exercised without a terminal.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::{
    grid::Direction,
    session::{Intent, Phase},
    solver::StrategyKind,
    App,
};

/// Interval the event poll waits for input before letting the tick loop continue, in
/// milliseconds.
const POLL_INTERVAL_MS: u64 = 25;

/// Application-level action resolved from a key press.
///
/// This enumeration separates session intents from the two shell concerns a key can trigger:
/// quitting the application and toggling the diagnostic distance overlay, neither of which the
/// core session knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Forward a discrete intent to the session.
    Session(Intent),
    /// Toggle the distance-field overlay.
    ToggleDistances,
    /// Leave the main loop and restore the terminal.
    Quit,
}

/// Resolves a key code into an application action.
///
/// This function is the entire keyboard surface: arrow keys move the player, space arms the
/// solver, `a` arms the auto-run cycle, `r` regenerates, `1` and `2` select the strategy, `d`
/// toggles the distance overlay and `q` quits. Unbound keys resolve to nothing.
pub(crate) fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up => Some(Action::Session(Intent::Move(Direction::North))),
        KeyCode::Down => Some(Action::Session(Intent::Move(Direction::South))),
        KeyCode::Right => Some(Action::Session(Intent::Move(Direction::East))),
        KeyCode::Left => Some(Action::Session(Intent::Move(Direction::West))),
        KeyCode::Char(' ') => Some(Action::Session(Intent::ToggleSolve)),
        KeyCode::Char('a') => Some(Action::Session(Intent::ToggleAutoRun)),
        KeyCode::Char('r') => Some(Action::Session(Intent::Reset)),
        KeyCode::Char('1') => Some(Action::Session(Intent::SetStrategy(StrategyKind::Dfs))),
        KeyCode::Char('2') => Some(Action::Session(Intent::SetStrategy(StrategyKind::FloodFill))),
        KeyCode::Char('d') => Some(Action::ToggleDistances),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Polls for input events and applies the resolved action to the application state.
///
/// This function uses a short poll timeout so the tick loop keeps animating while no key is
/// pressed. Strategy selection is forwarded only while the session is idle; pressing a strategy
/// key mid-solve is dropped here, the same way walking into a wall is, so the checked rejection
/// inside the session stays reserved for programmatic misuse.
///
/// # Errors
///
/// - [`std::io::Error`]
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
        if let Event::Key(key) = event::read()? {
            match action_for(key.code) {
                Some(Action::Quit) => app.exit = true,
                Some(Action::ToggleDistances) => app.show_distances = !app.show_distances,
                Some(Action::Session(Intent::SetStrategy(kind))) => {
                    if app.session.phase() == Phase::Idle {
                        app.session.apply(Intent::SetStrategy(kind))?;
                    }
                }
                Some(Action::Session(intent)) => app.session.apply(intent)?,
                None => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_moves() {
        assert_eq!(
            action_for(KeyCode::Up),
            Some(Action::Session(Intent::Move(Direction::North)))
        );
        assert_eq!(
            action_for(KeyCode::Down),
            Some(Action::Session(Intent::Move(Direction::South)))
        );
        assert_eq!(
            action_for(KeyCode::Left),
            Some(Action::Session(Intent::Move(Direction::West)))
        );
        assert_eq!(
            action_for(KeyCode::Right),
            Some(Action::Session(Intent::Move(Direction::East)))
        );
    }

    #[test]
    fn test_control_keys_map_to_session_intents() {
        assert_eq!(
            action_for(KeyCode::Char(' ')),
            Some(Action::Session(Intent::ToggleSolve))
        );
        assert_eq!(
            action_for(KeyCode::Char('a')),
            Some(Action::Session(Intent::ToggleAutoRun))
        );
        assert_eq!(
            action_for(KeyCode::Char('r')),
            Some(Action::Session(Intent::Reset))
        );
    }

    #[test]
    fn test_strategy_keys_select_strategies() {
        assert_eq!(
            action_for(KeyCode::Char('1')),
            Some(Action::Session(Intent::SetStrategy(StrategyKind::Dfs)))
        );
        assert_eq!(
            action_for(KeyCode::Char('2')),
            Some(Action::Session(Intent::SetStrategy(StrategyKind::FloodFill)))
        );
    }

    #[test]
    fn test_shell_keys_stay_out_of_the_session() {
        assert_eq!(action_for(KeyCode::Char('d')), Some(Action::ToggleDistances));
        assert_eq!(action_for(KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_unbound_keys_resolve_to_nothing() {
        assert_eq!(action_for(KeyCode::Char('x')), None);
        assert_eq!(action_for(KeyCode::Esc), None);
        assert_eq!(action_for(KeyCode::Enter), None);
    }
}
