//! Input validation for cut lists.

mod validate;

pub use validate::*;
