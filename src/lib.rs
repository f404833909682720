//! Parsing and normal-order evaluation of untyped lambda terms, plus Church
//! numeral arithmetic on top of the same reducer.

pub mod church;
pub mod lambda;

pub use lambda::{evaluate, evaluate_arithmetic, evaluate_lines, RunError};
