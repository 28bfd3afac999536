//! Shared runtime services for xtask command families.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
