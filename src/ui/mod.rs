//! # User Interface
//!
//! Colored terminal output with clickable poster links.

pub mod log;

pub use log::{debug, error, header, info, link, print_logo, success, truncate, warn, Log};
