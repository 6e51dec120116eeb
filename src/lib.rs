pub mod arn;
pub mod cli;
pub mod cloud;
pub mod commandbuilder;
pub mod commands;
pub mod config;
pub mod controlplane;
pub mod helper;
pub mod interactive;
pub mod mode;
pub mod output;
pub mod reporter;
pub mod runtime;
pub mod strategies;

#[cfg(test)]
pub mod testing;

// Re-export for main.rs
pub use crate::commands::{run, CommandError};
pub use crate::runtime::Runtime;
