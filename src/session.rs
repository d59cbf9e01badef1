//! Run session and player state machine.
//!
//! This module ties the grid, the generator and the solving strategies together into a single
//! tick-driven [`Session`]. The session owns the movable player cursor with its shared movement
//! cooldown, the run phase state machine, and the post-reveal auto-reset timer. An external
//! driver feeds it elapsed-time deltas and discrete [`Intent`] values; the session never reads a
//! clock or an input device itself.

use std::time::Duration;

use color_eyre::eyre::{bail, Result};
use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    generator,
    grid::{Direction, Grid, Trace},
    solver::{RevealOutcome, StepOutcome, Strategy, StrategyKind},
};

/// Default minimum interval between accepted moves or solver steps, in milliseconds.
pub(crate) const DEFAULT_COOLDOWN_MS: u64 = 100;

/// Default delay before an auto-run session regenerates after the reveal completes, in
/// milliseconds.
pub(crate) const DEFAULT_AUTO_RESET_MS: u64 = 2000;

/// Discrete input intent delivered to the session.
///
/// This enumeration is the entire input surface of the core: the event layer translates raw key
/// presses into these values and the session consumes them without ever polling a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    /// Move the player cursor one cell in a direction, subject to walls and the cooldown.
    Move(Direction),
    /// Arm or disarm automatic solver stepping.
    ToggleSolve,
    /// Arm or disarm the auto-run cycle that regenerates after a completed reveal.
    ToggleAutoRun,
    /// Discard the run and regenerate the maze immediately.
    Reset,
    /// Select the solving strategy; only accepted while the session is idle.
    SetStrategy(StrategyKind),
}

/// Phase of the overall run.
///
/// This enumeration is the explicit state machine replacing ad hoc solved flags: a session is
/// idle after (re)generation, stepping a solver, replaying the discovered route, or finished and
/// possibly waiting out the auto-reset delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Freshly generated; no solver has run since the last reset.
    Idle,
    /// The active strategy advances one cell per accepted tick.
    Solving,
    /// The discovered route is replayed one cell per accepted tick.
    Revealing,
    /// The reveal is complete; under auto-run the reset timer is counting up.
    Finished,
}

/// Movable player cursor with its movement cooldown.
///
/// This structure tracks the cursor's grid coordinate together with the elapsed time since the
/// last accepted operation. Manual moves, solver steps and reveal steps all share the one gate:
/// an operation is accepted only once the accumulator reaches the configured cooldown, and
/// acceptance zeroes it again.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    /// Current column of the cursor.
    pub(crate) x: usize,
    /// Current row of the cursor.
    pub(crate) y: usize,
    /// Elapsed time since the last accepted operation.
    since_step: Duration,
    /// Minimum interval between accepted operations.
    cooldown: Duration,
}

impl Player {
    /// Creates a player at the origin whose first operation is accepted immediately.
    fn new(cooldown: Duration) -> Self {
        Self {
            x: 0,
            y: 0,
            since_step: cooldown,
            cooldown,
        }
    }

    /// Accumulates elapsed time towards the next accepted operation.
    fn tick(&mut self, delta: Duration) {
        self.since_step = self.since_step.saturating_add(delta);
    }

    /// Returns whether the cooldown has elapsed since the last accepted operation.
    const fn ready(&self) -> bool {
        self.since_step.as_millis() >= self.cooldown.as_millis()
    }

    /// Records an accepted operation by zeroing the elapsed-time accumulator.
    fn accept(&mut self) {
        self.since_step = Duration::ZERO;
    }
}

/// One maze run: grid, player, strategy and phase under a single tick-driven owner.
///
/// This structure is created whole at startup and reset whole on regeneration; there is no
/// partial teardown. All mutation happens synchronously inside [`Session::tick`] or
/// [`Session::apply`], so a renderer reading between ticks never observes a half-applied step.
#[derive(Debug)]
pub(crate) struct Session {
    /// The maze substrate shared by the generator and the solvers.
    grid: Grid,
    /// The movable cursor and the shared operation cooldown.
    player: Player,
    /// The active solving strategy together with its history container.
    strategy: Strategy,
    /// Current phase of the run state machine.
    phase: Phase,
    /// Whether solver stepping is armed; toggled by [`Intent::ToggleSolve`].
    solving: bool,
    /// Whether the auto-run regeneration cycle is armed; toggled by [`Intent::ToggleAutoRun`].
    auto_run: bool,
    /// Time accumulated in [`Phase::Finished`] towards the auto-reset.
    auto_reset: Duration,
    /// Configured delay before an auto-run session regenerates after the reveal.
    auto_reset_delay: Duration,
    /// Wall-removal bias handed to the generator on every regeneration.
    percent_less_walls: u8,
    /// Random source owned by the session so regeneration stays reproducible under a fixed seed.
    rng: StdRng,
}

impl Session {
    /// Creates a session with a freshly generated maze.
    ///
    /// Dimension validation happens in the CLI layer before this runs; the session trusts that
    /// `width` and `height` are both at least two. A fixed seed makes the whole run, including
    /// every regeneration, reproducible.
    pub(crate) fn new(
        width: usize,
        height: usize,
        percent_less_walls: u8,
        cooldown: Duration,
        auto_reset_delay: Duration,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let mut grid = Grid::new(width, height);
        generator::generate(&mut grid, percent_less_walls, &mut rng);

        Self {
            grid,
            player: Player::new(cooldown),
            strategy: Strategy::new(StrategyKind::Dfs),
            phase: Phase::Idle,
            solving: false,
            auto_run: false,
            auto_reset: Duration::ZERO,
            auto_reset_delay,
            percent_less_walls,
            rng,
        }
    }

    /// Returns the maze grid for read-only inspection.
    pub(crate) const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player cursor for read-only inspection.
    pub(crate) const fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the current run phase.
    pub(crate) const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the kind of the active solving strategy.
    pub(crate) const fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Returns whether solver stepping is armed.
    pub(crate) const fn solving(&self) -> bool {
        self.solving
    }

    /// Returns whether the auto-run regeneration cycle is armed.
    pub(crate) const fn auto_run(&self) -> bool {
        self.auto_run
    }

    /// Applies a discrete input intent to the session.
    ///
    /// Movement and toggles never fail; a blocked move is a silent no-op, mirroring walking into
    /// a wall. Strategy selection is the one checked operation, rejected outside the idle phase.
    ///
    /// # Errors
    ///
    /// Returns an error when [`Intent::SetStrategy`] arrives while a solve or reveal is in
    /// progress.
    pub(crate) fn apply(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Move(direction) => self.try_move(direction),
            Intent::ToggleSolve => {
                self.solving = !self.solving;
                if self.solving && self.phase == Phase::Idle {
                    self.phase = Phase::Solving;
                }
            }
            Intent::ToggleAutoRun => {
                self.auto_run = !self.auto_run;
                self.auto_reset = Duration::ZERO;
                if self.auto_run && !self.solving {
                    self.solving = true;
                    if self.phase == Phase::Idle {
                        self.phase = Phase::Solving;
                    }
                }
            }
            Intent::Reset => self.regenerate(),
            Intent::SetStrategy(kind) => self.set_strategy(kind)?,
        }

        Ok(())
    }

    /// Selects the solving strategy, discarding the previous strategy's history container.
    ///
    /// # Errors
    ///
    /// Returns an error when the session is not idle: switching strategies mid-solve would leave
    /// half-written markers on the grid, so it is rejected as a contract violation rather than
    /// silently deferred.
    pub(crate) fn set_strategy(&mut self, kind: StrategyKind) -> Result<()> {
        if self.phase != Phase::Idle {
            bail!("strategy can only change while the session is idle");
        }

        self.strategy = Strategy::new(kind);
        Ok(())
    }

    /// Advances the session by one tick of elapsed time.
    ///
    /// The delta accumulates towards the shared cooldown; once it elapses and stepping is armed,
    /// exactly one solver or reveal step runs and the accumulator resets. In the finished phase
    /// under auto-run the delta instead feeds the reset timer, and crossing the configured delay
    /// regenerates the maze for the next cycle.
    pub(crate) fn tick(&mut self, delta: Duration) {
        self.player.tick(delta);

        match self.phase {
            Phase::Finished => {
                if self.auto_run {
                    self.auto_reset = self.auto_reset.saturating_add(delta);
                    if self.auto_reset >= self.auto_reset_delay {
                        self.regenerate();
                    }
                }
            }
            Phase::Solving if self.solving && self.player.ready() => {
                self.player.accept();
                let ((x, y), outcome) =
                    self.strategy
                        .step(&mut self.grid, self.player.x, self.player.y);
                self.player.x = x;
                self.player.y = y;
                if outcome == StepOutcome::Solved {
                    self.phase = Phase::Revealing;
                }
            }
            Phase::Revealing if self.solving && self.player.ready() => {
                self.player.accept();
                let ((x, y), outcome) =
                    self.strategy
                        .reveal_step(&mut self.grid, self.player.x, self.player.y);
                self.player.x = x;
                self.player.y = y;
                if outcome == RevealOutcome::Complete {
                    self.phase = Phase::Finished;
                    self.auto_reset = Duration::ZERO;
                }
            }
            Phase::Idle | Phase::Solving | Phase::Revealing => {}
        }
    }

    /// Attempts a manual one-cell move of the player cursor.
    ///
    /// The move is accepted only when the cooldown has elapsed and the passage is open on both
    /// sides; anything else is a silent no-op. [`Grid::can_move`] already rejects steps off the
    /// grid, so the cursor can never leave bounds. The departed cell keeps a searched tag as the
    /// player's visible trail.
    fn try_move(&mut self, direction: Direction) {
        if !self.player.ready() || !self.grid.can_move(self.player.x, self.player.y, direction) {
            return;
        }
        let Some((nx, ny)) = Grid::neighbor(self.player.x, self.player.y, direction) else {
            return;
        };

        if let Some(cell) = self.grid.cell_mut(self.player.x, self.player.y) {
            if cell.trace == Trace::Untouched {
                cell.trace = Trace::Searched;
            }
        }
        self.player.x = nx;
        self.player.y = ny;
        self.player.accept();
    }

    /// Discards the run and generates a fresh maze in place.
    ///
    /// This is the unconditional cut-over reset: the strategy's history container is replaced
    /// rather than drained, every cell marker is wiped by the regeneration, and the player
    /// returns to the origin. An armed solve resumes immediately on the new maze, which is what
    /// keeps the auto-run cycle looping.
    fn regenerate(&mut self) {
        generator::generate(&mut self.grid, self.percent_less_walls, &mut self.rng);
        self.strategy = Strategy::new(self.strategy.kind());
        self.player.x = 0;
        self.player.y = 0;
        self.auto_reset = Duration::ZERO;
        self.phase = if self.solving { Phase::Solving } else { Phase::Idle };
    }
}
