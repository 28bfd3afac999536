//! Command families behind the top-level CLI.

pub mod audit;
pub mod lint;
