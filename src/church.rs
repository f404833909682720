use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::lambda::expr::{app, lam, var, Expr};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChurchError {
    #[error("Church numerals must be non-negative, got {0}")]
    NegativeNumeral(i64),
    #[error("unknown operator `{0}`, expected one of +, *, -")]
    UnknownOperator(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
    Subtract,
}

impl Operator {
    pub fn combinator(self) -> Expr {
        match self {
            Operator::Add => add(),
            Operator::Multiply => multiply(),
            Operator::Subtract => subtract(),
        }
    }
}

impl FromStr for Operator {
    type Err = ChurchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "*" => Ok(Operator::Multiply),
            "-" => Ok(Operator::Subtract),
            _ => Err(ChurchError::UnknownOperator(String::from(s))),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operator::Add => "+",
            Operator::Multiply => "*",
            Operator::Subtract => "-",
        })
    }
}

/// `\f \x f (f (... x))` with `n` applications of `f`.
///
/// # Errors
///
/// Negative `n` has no numeral.
pub fn encode(n: i64) -> Result<Expr, ChurchError> {
    if n < 0 {
        return Err(ChurchError::NegativeNumeral(n));
    }

    let mut body = var("x");
    for _ in 0..n {
        body = app(var("f"), body);
    }
    Ok(lam("f", lam("x", body)))
}

/// Reads a numeral in normal form back as an integer.
pub fn decode(expr: &Expr) -> Option<u64> {
    let Expr::Lam(f, body) = expr else {
        return None;
    };
    let Expr::Lam(x, inner) = &**body else {
        return None;
    };
    if f == x {
        return None;
    }

    let mut body: &Expr = inner;
    let mut n = 0;
    loop {
        match body {
            Expr::Var(y) if y == x => return Some(n),
            Expr::App(node) => match &**node {
                (Expr::Var(g), inner) if g == f => {
                    body = inner;
                    n += 1;
                }
                _ => return None,
            },
            _ => return None,
        }
    }
}

fn zero() -> Expr {
    lam("f", lam("x", var("x")))
}

/// `\n \f \x f (n f x)`
pub fn successor() -> Expr {
    lam(
        "n",
        lam(
            "f",
            lam("x", app(var("f"), var("n").apply_all([var("f"), var("x")]))),
        ),
    )
}

/// `\m \n \f \x (m f) (n f x)`
pub fn add() -> Expr {
    lam(
        "m",
        lam(
            "n",
            lam(
                "f",
                lam(
                    "x",
                    app(
                        app(var("m"), var("f")),
                        var("n").apply_all([var("f"), var("x")]),
                    ),
                ),
            ),
        ),
    )
}

/// `\m \n \f m (n f)`
pub fn multiply() -> Expr {
    lam("m", lam("n", lam("f", app(var("m"), app(var("n"), var("f"))))))
}

/// `\a \b \s s a b`
pub fn pair() -> Expr {
    lam("a", lam("b", lam("s", var("s").apply_all([var("a"), var("b")]))))
}

/// `\p p (\a \b a)`
pub fn first() -> Expr {
    lam("p", app(var("p"), lam("a", lam("b", var("a")))))
}

/// `\p p (\a \b b)`
pub fn second() -> Expr {
    lam("p", app(var("p"), lam("a", lam("b", var("b")))))
}

/// Maps the pair `(a, b)` to `(b, b + 1)`.
fn shift() -> Expr {
    let second_of_p = || app(second(), var("p"));
    lam(
        "p",
        pair().apply_all([second_of_p(), app(successor(), second_of_p())]),
    )
}

/// `\n first (n shift (pair 0 0))`: starting from `(0, 0)`, shifting `n`
/// times leaves `n - 1` in the first slot, or 0 when `n` is 0.
pub fn predecessor() -> Expr {
    lam(
        "n",
        app(
            first(),
            var("n").apply_all([shift(), pair().apply_all([zero(), zero()])]),
        ),
    )
}

/// `\m \n (n predecessor) m`, truncated at zero.
pub fn subtract() -> Expr {
    lam("m", lam("n", app(app(var("n"), predecessor()), var("m"))))
}

/// `op a b` as a term, ready for reduction.
///
/// # Errors
///
/// Fails if either operand is negative.
pub fn arithmetic(a: i64, op: Operator, b: i64) -> Result<Expr, ChurchError> {
    Ok(op.combinator().apply_all([encode(a)?, encode(b)?]))
}

#[cfg(test)]
mod tests {
    use const_format::formatcp;

    use super::*;
    use crate::lambda::{
        parser::parse_str,
        reducer::{reduce, Reducer},
    };

    const TWO: &str = "\\f \\x f (f x)";
    const THREE: &str = "\\f \\x f (f (f x))";
    const PLUS: &str = "\\m \\n \\f \\x (m f) (n f x)";
    const PLUS_TWO_THREE: &str = formatcp!("({PLUS}) ({TWO}) ({THREE})");

    fn compute(a: i64, op: Operator, b: i64) -> Option<u64> {
        let expr = arithmetic(a, op, b).ok()?;
        let expr = reduce(expr).ok()?;
        decode(&expr)
    }

    fn assert_numeral(a: i64, op: Operator, b: i64, expected: i64) {
        let expr = arithmetic(a, op, b).expect("operands are non-negative");
        let reduced = reduce(expr).expect("arithmetic terminates");
        let numeral = encode(expected).expect("result is non-negative");
        assert_eq!(reduced.to_string(), numeral.to_string());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(0).map(|e| e.to_string()), Ok(String::from("(\\f (\\x x))")));
        assert_eq!(
            encode(2).map(|e| e.to_string()),
            Ok(String::from("(\\f (\\x (f (f x))))"))
        );
        assert_eq!(encode(-1), Err(ChurchError::NegativeNumeral(-1)));
    }

    #[test]
    fn test_decode() {
        for n in 0..5 {
            let numeral = encode(n).expect("non-negative");
            assert_eq!(decode(&numeral), Some(n.unsigned_abs()));
        }
        assert_eq!(decode(&lam("f", lam("f", var("f")))), None);
        assert_eq!(decode(&lam("f", lam("x", app(var("x"), var("x"))))), None);
        assert_eq!(decode(&var("x")), None);
    }

    #[test]
    fn test_combinators_are_closed() {
        for combinator in [
            successor(),
            add(),
            multiply(),
            pair(),
            first(),
            second(),
            predecessor(),
            subtract(),
        ] {
            assert!(combinator.is_closed(), "{combinator}");
        }
    }

    #[test]
    fn test_add_matches_source_text() {
        let parsed = parse_str(PLUS_TWO_THREE).expect("valid source");
        let built = arithmetic(2, Operator::Add, 3).expect("non-negative");
        assert_eq!(parsed, built);
    }

    #[test]
    fn test_add() {
        assert_numeral(2, Operator::Add, 3, 5);
        assert_numeral(0, Operator::Add, 0, 0);
        assert_numeral(10, Operator::Add, 10, 20);
    }

    #[test]
    fn test_multiply() {
        assert_numeral(3, Operator::Multiply, 4, 12);
        assert_numeral(2, Operator::Multiply, 3, 6);
        assert_numeral(0, Operator::Multiply, 5, 0);
    }

    #[test]
    fn test_subtract() {
        assert_numeral(5, Operator::Subtract, 2, 3);
        assert_numeral(2, Operator::Subtract, 5, 0);
        assert_numeral(3, Operator::Subtract, 0, 3);
        assert_numeral(1, Operator::Subtract, 1, 0);
    }

    #[test]
    fn test_predecessor() {
        for n in 0..4 {
            let expr = app(predecessor(), encode(n).expect("non-negative"));
            let reduced = reduce(expr).expect("terminates");
            assert_eq!(decode(&reduced), Some(n.saturating_sub(1).unsigned_abs()));
        }
    }

    #[test]
    fn test_subtract_step_count() {
        let expr = arithmetic(5, Operator::Subtract, 2).expect("non-negative");
        let (_, steps) = Reducer::default()
            .reduce_counted(expr)
            .expect("terminates");
        assert_eq!(steps, 106);
    }

    #[test]
    fn test_compute() {
        assert_eq!(compute(7, Operator::Subtract, 2), Some(5));
        assert_eq!(compute(10, Operator::Multiply, 10), Some(100));
        assert_eq!(compute(-1, Operator::Add, 2), None);
    }

    #[test]
    fn test_operator_from_str() {
        assert_eq!("+".parse::<Operator>(), Ok(Operator::Add));
        assert_eq!("*".parse::<Operator>(), Ok(Operator::Multiply));
        assert_eq!("-".parse::<Operator>(), Ok(Operator::Subtract));
        assert_eq!(
            "/".parse::<Operator>(),
            Err(ChurchError::UnknownOperator(String::from("/")))
        );
    }
}
