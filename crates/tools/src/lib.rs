//! Shared plumbing for the dungeon developer binaries.

pub mod config_file;
pub mod logging;
pub mod render;
pub mod seed;
