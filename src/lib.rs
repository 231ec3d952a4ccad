//! # Mixer Library
//!
//! Hybrid movie recommendations: blend the genre/keyword TF-IDF profiles of
//! two movies with an element-wise minimum and rank the catalog against it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod poster;
pub mod storage;
pub mod ui;

pub use engine::{Engine, MovieRef};
pub use error::{MixerError, Result};
