//! Core application state and main loop for the maze game.

use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{cli::Config, events, session::Session, ui};

/// Application state container for the maze game.
///
/// This structure holds the tick-driven session together with the two pieces of shell state the
/// core never sees: the exit flag and the diagnostic overlay toggle. Ratatui renders from it and
/// crossterm events write into it.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the
    /// user wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// The maze run: grid, player, strategy and phase under one tick-driven owner.
    pub(crate) session: Session,
    /// Whether the diagnostic distance overlay is shown.
    pub(crate) show_distances: bool,
    /// Instant of the previous loop iteration, used to derive the elapsed-time delta.
    ///
    /// The session itself only ever consumes the delta; the wall clock stays a shell concern.
    last_tick: Instant,
}

impl App {
    /// Creates a new instance of the App structure from the parsed configuration.
    ///
    /// The configuration has already been range-checked by clap, so the session is built
    /// directly, including the initial maze generation.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            exit: false,
            session: config.session(),
            show_distances: false,
            last_tick: Instant::now(),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// Each iteration draws the current state, handles pending input, and advances the session
    /// by the elapsed time since the previous iteration. The loop continues until the exit flag
    /// is set, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;

            let delta = self.last_tick.elapsed();
            self.last_tick = Instant::now();
            self.session.tick(delta);
        }

        Ok(())
    }
}
