use std::{env, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_MINES: u16 = 20;
pub const DEFAULT_SECONDS: u16 = 180;
pub const DEFAULT_ROWS: u8 = 20;
pub const DEFAULT_COLS: u8 = 15;
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Parameters a fresh board is built from on every Reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u8,
    pub cols: u8,
    pub mines: u16,
    pub seconds: u16,
    pub tick_period: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            mines: DEFAULT_MINES,
            seconds: DEFAULT_SECONDS,
            tick_period: TICK_PERIOD,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl GameConfig {
    pub fn new(rows: u8, cols: u8, mines: u16, seconds: u16) -> Self {
        Self {
            rows,
            cols,
            mines,
            seconds,
            tick_period: TICK_PERIOD,
        }
    }

    /// Reads overrides from `MINESWEEPER_ROWS`, `MINESWEEPER_COLS`,
    /// `MINESWEEPER_MINES` and `MINESWEEPER_SECONDS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            rows: env_or("MINESWEEPER_ROWS", defaults.rows),
            cols: env_or("MINESWEEPER_COLS", defaults.cols),
            mines: env_or("MINESWEEPER_MINES", defaults.mines),
            seconds: env_or("MINESWEEPER_SECONDS", defaults.seconds),
            tick_period: defaults.tick_period,
        }
        .validated();

        info!(
            "Loaded game config: {}x{} with {} mines, {}s countdown",
            config.rows, config.cols, config.mines, config.seconds
        );
        config
    }

    pub fn cell_count(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Clamps the config so that a board can always be built: at least one
    /// cell, and strictly fewer mines than cells.
    pub fn validated(mut self) -> Self {
        let original = self;

        self.rows = self.rows.max(1);
        self.cols = self.cols.max(1);
        let max_mines = u16::try_from(self.cell_count() - 1).unwrap_or(u16::MAX);
        self.mines = self.mines.min(max_mines);

        if self != original {
            warn!(
                "Adjusted game config from {}x{}/{} mines to {}x{}/{} mines",
                original.rows, original.cols, original.mines, self.rows, self.cols, self.mines
            );
        }
        self
    }
}
