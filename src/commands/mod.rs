//! # Command Implementations
//!
//! Each submodule handles one CLI command (recommend, search, stats, repl).

pub mod recommend;
pub mod repl;
pub mod search;
pub mod stats;
