//! Minesweeper Rules Engine
//!
//! Owns a countdown minesweeper game and applies player actions to it one at
//! a time. A renderer reads snapshots and sends actions; it never touches the
//! board directly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use minesweeper_engine::{GameConfig, GameEngine, UserAction};
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = GameEngine::spawn(GameConfig::default());
//!     let game = engine.handle();
//!
//!     game.dispatch(UserAction::Start);
//!     game.dispatch(UserAction::reveal(0));
//!
//!     let mut updates = game.subscribe();
//!     while updates.changed().await.is_ok() {
//!         let snapshot = updates.borrow_and_update().clone();
//!         println!("{:?}: {}s left", snapshot.phase, snapshot.seconds_left);
//!     }
//! }
//! ```
//!
//! The pure pieces (`logic::reduce` and friends, `GameMachine`) can be used
//! without a runtime.

pub mod config;
pub mod data;
pub mod engine;
pub mod logic;
pub mod machine;
pub mod model;
pub mod timer;

pub use config::GameConfig;
pub use data::{Board, Cell, Game, Phase};
pub use engine::{GameEngine, GameHandle};
pub use machine::GameMachine;
pub use model::{
    Action, CellInteraction, UserAction,
    view::{CellView, ControlLabel, Outcome, StatusView},
};
