use thiserror::Error;

use super::{expr::Expr, substitution::substitute};

/// Default number of β-steps allowed before giving up.
pub const REDUCTION_LIMIT: usize = 1000;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceError {
    #[error("Reduction limit reached after {0} steps")]
    LimitReached(usize),
}

/// Performs the leftmost-outermost β-step of `expr`, or returns `None` if
/// `expr` is already in normal form.
pub fn step(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Var(_) => None,
        Expr::Lam(x, body) => step(body).map(|body| Expr::Lam(x.clone(), Box::new(body))),
        Expr::App(app) => {
            let (f, a) = &**app;
            if let Expr::Lam(x, body) = f {
                return Some(substitute(body, x, a));
            }
            if let Some(f) = step(f) {
                return Some(Expr::App(Box::new((f, a.clone()))));
            }
            step(a).map(|a| Expr::App(Box::new((f.clone(), a))))
        }
    }
}

/// Normal-order evaluator with a bounded number of β-steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reducer {
    max_steps: usize,
}

impl Default for Reducer {
    fn default() -> Self {
        Reducer::new(REDUCTION_LIMIT)
    }
}

impl Reducer {
    pub fn new(max_steps: usize) -> Self {
        Reducer { max_steps }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// # Errors
    ///
    /// Returns [`ReduceError::LimitReached`] once the step budget is spent.
    pub fn reduce(&self, expr: Expr) -> Result<Expr, ReduceError> {
        self.reduce_counted(expr).map(|(expr, _)| expr)
    }

    /// Like [`Reducer::reduce`], also returning the number of β-steps taken.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::LimitReached`] once the step budget is spent.
    pub fn reduce_counted(&self, mut expr: Expr) -> Result<(Expr, usize), ReduceError> {
        let mut steps = 0;
        while let Some(next) = step(&expr) {
            expr = next;
            steps += 1;
            log::trace!("step {steps}: {expr}");

            if steps >= self.max_steps {
                log::debug!("giving up after {steps} steps");
                return Err(ReduceError::LimitReached(steps));
            }
        }

        log::debug!("normal form reached in {steps} steps");
        Ok((expr, steps))
    }
}

/// Reduces `expr` to normal form with the default budget.
///
/// # Errors
///
/// Returns [`ReduceError::LimitReached`] after [`REDUCTION_LIMIT`] steps.
pub fn reduce(expr: Expr) -> Result<Expr, ReduceError> {
    Reducer::default().reduce(expr)
}
