use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::expression::ast::Expr;

/// Name lookup capability passed into every resolution call.
///
/// A symbol resolves to another expression, which is evaluated against the same
/// context. Returning `None` makes the evaluation fail with a lookup error.
pub trait EvalContext {
    /// Look up `symbol` (or `symbol.member`).
    fn symbol_value(&self, symbol: &str, member: Option<&str>) -> Option<Cow<'_, Expr>>;
}

/// Context that knows no symbols; only constant coordinates resolve against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl EvalContext for EmptyContext {
    fn symbol_value(&self, _symbol: &str, _member: Option<&str>) -> Option<Cow<'_, Expr>> {
        None
    }
}

impl EvalContext for BTreeMap<String, f64> {
    fn symbol_value(&self, symbol: &str, member: Option<&str>) -> Option<Cow<'_, Expr>> {
        if member.is_some() {
            return None;
        }
        self.get(symbol).map(|v| Cow::Owned(Expr::Num(*v)))
    }
}

impl EvalContext for HashMap<String, f64> {
    fn symbol_value(&self, symbol: &str, member: Option<&str>) -> Option<Cow<'_, Expr>> {
        if member.is_some() {
            return None;
        }
        self.get(symbol).map(|v| Cow::Owned(Expr::Num(*v)))
    }
}

impl<C: EvalContext + ?Sized> EvalContext for &C {
    fn symbol_value(&self, symbol: &str, member: Option<&str>) -> Option<Cow<'_, Expr>> {
        (**self).symbol_value(symbol, member)
    }
}
