use std::fmt;
use std::str::FromStr;

use crate::expression::ast::Expr;
use crate::expression::context::{EmptyContext, EvalContext};
use crate::expression::eval::evaluate;
use crate::expression::parser::parse_expr;
use crate::foundation::error::{GeomError, GeomResult};

/// How a [`RelativeValue`] obtains its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Literal number.
    Constant,
    /// A single symbol, e.g. a marker name.
    Reference,
    /// Arithmetic over one or more symbols.
    Expression,
}

/// A scalar coordinate: a constant, a named reference or an expression.
///
/// Symbol-free expressions are folded into constants when the value is built, so
/// [`RelativeValue::is_dynamic`] is exactly "kind is not constant". Equality compares
/// canonical text.
#[derive(Debug, Clone)]
pub struct RelativeValue {
    expr: Expr,
}

impl RelativeValue {
    /// Constant coordinate.
    pub fn constant(v: f64) -> Self {
        Self { expr: Expr::Num(v) }
    }

    /// Reference to a named symbol.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            expr: Expr::symbol(name),
        }
    }

    /// Wrap an expression tree, folding it to a constant if it uses no symbols.
    ///
    /// Folded results may be infinite or NaN (`1 / 0`, `sqrt(-1)`); they still print as
    /// text that parses back to the same constant.
    pub fn from_expr(expr: Expr) -> Self {
        if !expr.uses_symbols() {
            if let Ok(v) = evaluate(&expr, &EmptyContext) {
                return Self::constant(v);
            }
        }
        Self { expr }
    }

    /// Parse canonical (or any well-formed) coordinate text.
    pub fn parse(src: &str) -> GeomResult<Self> {
        Ok(Self::from_expr(parse_expr(src)?))
    }

    /// Underlying expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Classify the value.
    pub fn kind(&self) -> ValueKind {
        match self.expr {
            Expr::Num(_) => ValueKind::Constant,
            Expr::Symbol { .. } => ValueKind::Reference,
            _ => ValueKind::Expression,
        }
    }

    /// Return `true` if resolving this value consults the context.
    pub fn is_dynamic(&self) -> bool {
        self.kind() != ValueKind::Constant
    }

    /// The literal, if this is a constant.
    pub fn as_constant(&self) -> Option<f64> {
        match self.expr {
            Expr::Num(v) => Some(v),
            _ => None,
        }
    }

    /// Resolve to a number. Constants never touch `ctx`.
    pub fn resolve<C: EvalContext + ?Sized>(&self, ctx: &C) -> GeomResult<f64> {
        match self.expr {
            Expr::Num(v) => Ok(v),
            _ => evaluate(&self.expr, ctx),
        }
    }
}

impl Default for RelativeValue {
    fn default() -> Self {
        Self::constant(0.0)
    }
}

impl From<f64> for RelativeValue {
    fn from(v: f64) -> Self {
        Self::constant(v)
    }
}

impl From<Expr> for RelativeValue {
    fn from(expr: Expr) -> Self {
        Self::from_expr(expr)
    }
}

impl FromStr for RelativeValue {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RelativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expr, f)
    }
}

impl PartialEq for RelativeValue {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl serde::Serialize for RelativeValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RelativeValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/coord/value.rs"]
mod tests;
