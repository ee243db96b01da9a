//! Pricing: cost composition and the closed-form waste estimate.

mod price;
mod waste;

pub use price::*;
pub use waste::*;
