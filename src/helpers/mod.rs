//! Helper functions for listing and post pages

mod date;
mod title;

pub use date::*;
pub use title::*;
