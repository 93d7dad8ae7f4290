//! Shared plumbing for the command-line front ends.

pub mod config;
pub mod logging;
pub mod seed;
pub mod terminal;
