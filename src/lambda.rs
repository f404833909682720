use std::io;

use thiserror::Error;

use crate::church::{self, ChurchError, Operator};
use parser::ParseError;
use reducer::{ReduceError, Reducer};

pub mod expr;
pub mod lexer;
pub mod parser;
pub mod reducer;
pub mod substitution;

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Reduce(#[from] ReduceError),
    #[error(transparent)]
    Church(#[from] ChurchError),
    #[error("expected <FILE> or <NUM1> <OP> <NUM2>, got {0} arguments")]
    ArgumentCount(usize),
    #[error("`{0}` is not an integer")]
    InvalidNumber(String),
    #[error("io error: {0}")]
    IO(#[from] io::Error),
}

/// Parses `text`, reduces it to normal form and renders the result.
///
/// # Errors
///
/// Fails with the first lexical, syntax or reduction-limit error.
pub fn evaluate(reducer: &Reducer, text: &str) -> Result<String, RunError> {
    let expr = parser::parse_str(text)?;
    let expr = reducer.reduce(expr)?;
    Ok(expr.to_string())
}

/// Evaluates every non-blank line of `source` in order.
pub fn evaluate_lines<'a>(
    reducer: &'a Reducer,
    source: &'a str,
) -> impl Iterator<Item = Result<String, RunError>> + 'a {
    source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(move |line| evaluate(reducer, line))
}

/// Computes `a op b` on Church numerals and renders the resulting numeral.
///
/// # Errors
///
/// Fails for negative operands or when the reduction budget runs out.
pub fn evaluate_arithmetic(
    reducer: &Reducer,
    a: i64,
    op: Operator,
    b: i64,
) -> Result<String, RunError> {
    let expr = church::arithmetic(a, op, b)?;
    let (expr, steps) = reducer.reduce_counted(expr)?;
    if let Some(n) = church::decode(&expr) {
        log::info!("{a} {op} {b} = {n} ({steps} steps)");
    }
    Ok(expr.to_string())
}
