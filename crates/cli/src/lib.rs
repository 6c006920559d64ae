//! Library half of the `ajam` binary, split out so integration tests can
//! drive command dispatch without spawning a process.

pub mod cli;
pub mod commands;
pub mod config_file;
pub mod error;
pub mod logging;
pub mod output;
