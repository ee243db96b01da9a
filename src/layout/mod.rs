//! Sheet layout: greedy first-fit assignment of pieces to sheets.

mod optimizer;
mod strategy;

pub use optimizer::*;
pub use strategy::*;
