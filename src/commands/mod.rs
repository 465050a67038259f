//! CLI command implementations

pub mod index;
pub mod list;
pub mod new;
pub mod show;
