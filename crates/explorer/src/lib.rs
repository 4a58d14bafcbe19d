//! Front end for the position explorer
//!
//! This crate provides:
//! - TOML configuration for search depth and arena limits
//! - Reading batches of FEN positions from a file
//! - Text and JSON reports for move lists, searches and batch runs
//!
//! # Usage
//!
//! ```bash
//! # List the legal moves of a position
//! cargo run -p explorer -- moves "7k/6pp/8/8/8/8/8/K2R4 w - - 0 1"
//!
//! # Search three plies deep and print JSON
//! cargo run -p explorer -- search "7k/6pp/8/8/8/8/8/K2R4 w - - 0 1" --depth 3 --json
//! ```

mod config;
mod error;
mod positions;
mod report;

pub use config::*;
pub use error::*;
pub use positions::*;
pub use report::*;
