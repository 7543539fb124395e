//! CLI module for symptomcheck
//!
//! Handles command-line argument parsing and configuration management.

pub mod config;
pub mod args;

pub use config::Config;
pub use args::{presence_map, Args, Commands, Verbosity};
