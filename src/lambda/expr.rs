use std::fmt::{self, Display};

/// An untyped lambda term with named variables.
///
/// Terms are never mutated in place; every rewrite builds a new tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(String),
    Lam(String, Box<Expr>),
    App(Box<(Expr, Expr)>),
}

pub fn var(name: &str) -> Expr {
    Expr::Var(String::from(name))
}

pub fn lam(param: &str, body: Expr) -> Expr {
    Expr::Lam(String::from(param), Box::new(body))
}

pub fn app(f: Expr, x: Expr) -> Expr {
    Expr::App(Box::new((f, x)))
}

impl Expr {
    /// Left-associated application `f a b c` == `((f a) b) c`.
    pub fn apply_all(self, args: impl IntoIterator<Item = Expr>) -> Expr {
        args.into_iter().fold(self, app)
    }

    pub fn is_closed(&self) -> bool {
        super::substitution::free_vars(self).is_empty()
    }

    /// Fully parenthesized text form, see the [`Display`] impl.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

// Every abstraction and application gets its own parentheses so the output
// parses back to the same tree.
impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(x) => write!(f, "{x}"),
            Expr::Lam(x, body) => write!(f, "(\\{x} {body})"),
            Expr::App(app) => write!(f, "({} {})", app.0, app.1),
        }
    }
}
