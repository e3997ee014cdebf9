//! Strictly Scorebook library - live scoring for amateur baseball
//!
//! Wraps the `strictly_baseball` state machine with configuration, a team
//! and history store, and a text console.
//!
//! # Architecture
//!
//! - **Config**: TOML teams, rules and lineups
//! - **Store**: both teams plus saved games
//! - **Console**: text commands driving a game controller
//! - **Render**: scoreboard and resolution sheet as plain text
//!
//! # Example
//!
//! ```
//! use strictly_scorebook::{ScorebookConfig, Session};
//!
//! let mut session = Session::new(&ScorebookConfig::default());
//! let (_, view) = session.execute_line("homerun").unwrap();
//! assert!(view.contains("Solo homer!"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod store;

pub mod render;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameSection, LineupSection, OrderSection, ScorebookConfig, TeamSection};

// Crate-level exports - Console
pub use console::{ConsoleCommand, ConsoleError, Flow, Session};

// Crate-level exports - Store
pub use store::{AppStore, ScorebookRotation, Team};
