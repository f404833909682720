use std::collections::HashSet;

use super::expr::Expr;

/// Free variables of `expr`.
pub fn free_vars(expr: &Expr) -> HashSet<&str> {
    let mut vars = HashSet::new();
    collect_free_vars(expr, &mut Vec::new(), &mut vars);
    vars
}

fn collect_free_vars<'a>(
    expr: &'a Expr,
    bound: &mut Vec<&'a str>,
    vars: &mut HashSet<&'a str>,
) {
    match expr {
        Expr::Var(x) => {
            if !bound.contains(&x.as_str()) {
                vars.insert(x.as_str());
            }
        }
        Expr::Lam(x, body) => {
            bound.push(x.as_str());
            collect_free_vars(body, bound, vars);
            bound.pop();
        }
        Expr::App(app) => {
            collect_free_vars(&app.0, bound, vars);
            collect_free_vars(&app.1, bound, vars);
        }
    }
}

/// First of `base`, `base1`, `base2`, ... that is not in `used`.
pub fn fresh_name(base: &str, used: &HashSet<&str>) -> String {
    if !used.contains(base) {
        return String::from(base);
    }

    (1u64..)
        .map(|i| format!("{base}{i}"))
        .find(|name| !used.contains(name.as_str()))
        .unwrap_or_else(|| String::from(base))
}

/// Replaces the free occurrences of `name` in `target` with `replacement`.
///
/// Binders in `target` that would capture a free variable of `replacement`
/// are renamed first.
pub fn substitute(target: &Expr, name: &str, replacement: &Expr) -> Expr {
    let free = free_vars(replacement);
    substitute_impl(target, name, replacement, &free)
}

fn substitute_impl(
    target: &Expr,
    name: &str,
    replacement: &Expr,
    free: &HashSet<&str>,
) -> Expr {
    match target {
        Expr::Var(y) if y == name => replacement.clone(),
        Expr::Var(_) => target.clone(),
        Expr::Lam(y, _) if y == name => target.clone(),
        Expr::Lam(y, body) if free.contains(y.as_str()) => {
            let mut used = free_vars(target);
            used.extend(free.iter().copied());
            let fresh = fresh_name(y, &used);
            log::debug!("renaming bound variable {y} to {fresh}");

            let body = substitute(body, y, &Expr::Var(fresh.clone()));
            let body = substitute_impl(&body, name, replacement, free);
            Expr::Lam(fresh, Box::new(body))
        }
        Expr::Lam(y, body) => Expr::Lam(
            y.clone(),
            Box::new(substitute_impl(body, name, replacement, free)),
        ),
        Expr::App(app) => Expr::App(Box::new((
            substitute_impl(&app.0, name, replacement, free),
            substitute_impl(&app.1, name, replacement, free),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lambda::expr::{app, lam, var};

    #[test]
    fn test_free_vars() {
        assert_eq!(free_vars(&var("x")), HashSet::from(["x"]));
        assert_eq!(
            free_vars(&lam("x", app(var("x"), var("y")))),
            HashSet::from(["y"])
        );
        assert_eq!(
            free_vars(&app(lam("x", var("x")), var("x"))),
            HashSet::from(["x"])
        );
    }

    #[test]
    fn test_fresh_name_order() {
        assert_eq!(fresh_name("y", &HashSet::new()), "y");
        assert_eq!(fresh_name("y", &HashSet::from(["y"])), "y1");
        assert_eq!(fresh_name("y", &HashSet::from(["y", "y1", "y2"])), "y3");
        assert_eq!(fresh_name("y", &HashSet::from(["y", "y2"])), "y1");
    }

    #[test]
    fn test_replaces_free_occurrences() {
        let target = app(var("x"), lam("x", var("x")));
        let expr = substitute(&target, "x", &var("z"));
        assert_eq!(expr.to_string(), "(z (\\x x))");
    }

    #[test]
    fn test_leaves_other_variables() {
        let expr = substitute(&lam("y", app(var("z"), var("x"))), "x", &var("z"));
        assert_eq!(expr.to_string(), "(\\y (z z))");
    }

    #[test]
    fn test_avoids_capture() {
        let expr = substitute(&lam("y", var("x")), "x", &var("y"));
        assert_eq!(expr, lam("y1", var("y")));
        assert_eq!(expr.to_string(), "(\\y1 y)");
    }

    #[test]
    fn test_renamed_binder_skips_used_names() {
        // y1 is already free in the target, so it cannot be the new binder.
        let target = lam("y", app(app(var("x"), var("y")), var("y1")));
        let expr = substitute(&target, "x", &var("y"));
        assert_eq!(expr.to_string(), "(\\y2 ((y y2) y1))");
    }

    #[test]
    fn test_rename_inside_nested_binder() {
        let target = lam("y", lam("y1", app(app(var("x"), var("y")), var("y1"))));
        let expr = substitute(&target, "x", &var("y"));
        assert_eq!(expr.to_string(), "(\\y1 (\\y11 ((y y1) y11)))");
    }
}
