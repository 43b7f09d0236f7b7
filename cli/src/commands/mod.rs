//! Command implementations

pub mod install;
pub mod version;
