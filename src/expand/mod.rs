//! Expansion of part specifications into unit pieces.

mod pieces;

pub use pieces::*;
