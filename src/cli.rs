//! Command-line configuration for the maze session.
//!
//! This module owns every externally tunable knob: grid dimensions, the wall-removal bias, the
//! step cooldown, the auto-reset delay and the optional random seed. Validation happens at parse
//! time through clap value parsers, so the core never sees an invalid dimension or percentage.

use std::time::Duration;

use clap::Parser;

use crate::session::{Session, DEFAULT_AUTO_RESET_MS, DEFAULT_COOLDOWN_MS};

/// Command-line options controlling maze generation and animation timing.
///
/// This structure is parsed straight from the process arguments by clap. Each range constraint
/// is enforced by the value parser, which rejects the invocation with a usage error before any
/// session state exists.
#[derive(Parser, Clone, Debug)]
#[command(version, about)]
pub struct Config {
    /// Maze width in cells.
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u16).range(2..))]
    pub width: u16,

    /// Maze height in cells.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(2..))]
    pub height: u16,

    /// Probability, in percent, of removing an extra wall between adjacent cells.
    ///
    /// Zero keeps the maze perfect; higher values open additional passages for a sparser maze
    /// that still reaches every cell.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(..=100))]
    pub percent_less_walls: u8,

    /// Minimum interval between accepted moves or solver steps, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_MS)]
    pub cooldown_ms: u64,

    /// Delay before an auto-run session regenerates after the reveal completes, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_AUTO_RESET_MS)]
    pub auto_reset_ms: u64,

    /// Seed for the random source; a fixed seed reproduces the same run exactly.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    /// Builds a fresh session from the parsed configuration.
    ///
    /// By the time this runs the value parsers have already rejected dimensions below two and
    /// percentages above one hundred, so the session constructor receives only valid input.
    pub(crate) fn session(&self) -> Session {
        Session::new(
            usize::from(self.width),
            usize::from(self.height),
            self.percent_less_walls,
            Duration::from_millis(self.cooldown_ms),
            Duration::from_millis(self.auto_reset_ms),
            self.seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::try_parse_from(["mazewalk"]).expect("defaults should parse");

        assert_eq!(config.width, 15);
        assert_eq!(config.height, 10);
        assert_eq!(config.percent_less_walls, 0);
        assert_eq!(config.cooldown_ms, DEFAULT_COOLDOWN_MS);
        assert_eq!(config.auto_reset_ms, DEFAULT_AUTO_RESET_MS);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_explicit_values_parse() {
        let config = Config::try_parse_from([
            "mazewalk",
            "--width",
            "24",
            "--height",
            "16",
            "--percent-less-walls",
            "35",
            "--cooldown-ms",
            "50",
            "--seed",
            "9",
        ])
        .expect("valid arguments should parse");

        assert_eq!(config.width, 24);
        assert_eq!(config.height, 16);
        assert_eq!(config.percent_less_walls, 35);
        assert_eq!(config.cooldown_ms, 50);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_degenerate_dimensions_are_rejected() {
        assert!(Config::try_parse_from(["mazewalk", "--width", "1"]).is_err());
        assert!(Config::try_parse_from(["mazewalk", "--height", "0"]).is_err());
    }

    #[test]
    fn test_overlarge_percentage_is_rejected() {
        assert!(Config::try_parse_from(["mazewalk", "--percent-less-walls", "101"]).is_err());
    }

    #[test]
    fn test_seeded_config_builds_a_session() {
        let config =
            Config::try_parse_from(["mazewalk", "--seed", "3"]).expect("arguments should parse");

        let session = config.session();

        assert_eq!(session.grid().width(), 15);
        assert_eq!(session.grid().height(), 10);
        assert_eq!(
            session.grid().open_passage_count(),
            15 * 10 - 1,
            "the default configuration generates a perfect maze"
        );
    }
}
