//! Terminal maze generator with animated step-by-step solving.
//!
//! This crate generates a random perfect maze and solves it one visible step per animation tick
//! with a selectable strategy: depth-first search with a backtrack stack, or breadth-first
//! flood-fill over a distance field. A movable player cursor, a shared step cooldown and an
//! auto-run cycle drive the animation; ratatui renders it and crossterm feeds it input.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod cli;
mod events;
mod generator;
mod grid;
mod session;
mod solver;
mod ui;

pub use app::App;
pub use cli::Config;
