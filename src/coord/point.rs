use std::fmt;
use std::str::FromStr;

use crate::coord::value::RelativeValue;
use crate::expression::context::EvalContext;
use crate::foundation::core::Point;
use crate::foundation::error::{GeomError, GeomResult};

/// A point whose coordinates are [`RelativeValue`]s.
///
/// Text form is `"x, y"`, each half in canonical coordinate form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativePoint {
    /// Horizontal coordinate.
    pub x: RelativeValue,
    /// Vertical coordinate.
    pub y: RelativeValue,
}

impl RelativePoint {
    /// Build from two coordinates.
    pub fn new(x: impl Into<RelativeValue>, y: impl Into<RelativeValue>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Parse `"x, y"`. The separating comma is the first one outside parentheses, so
    /// `"min(a, b), 10"` splits as expected.
    pub fn parse(src: &str) -> GeomResult<Self> {
        let parts = split_top_level(src);
        let [x, y] = parts.as_slice() else {
            return Err(GeomError::validation(format!(
                "expected two comma-separated coordinates, got '{src}'"
            )));
        };
        Ok(Self {
            x: RelativeValue::parse(x)?,
            y: RelativeValue::parse(y)?,
        })
    }

    /// Resolve both coordinates.
    pub fn resolve<C: EvalContext + ?Sized>(&self, ctx: &C) -> GeomResult<Point> {
        Ok(Point::new(self.x.resolve(ctx)?, self.y.resolve(ctx)?))
    }

    /// Return `true` if either coordinate is dynamic.
    pub fn is_dynamic(&self) -> bool {
        self.x.is_dynamic() || self.y.is_dynamic()
    }
}

impl From<Point> for RelativePoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for RelativePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl FromStr for RelativePoint {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RelativePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// Split on commas that are not nested inside parentheses.
pub(crate) fn split_top_level(src: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in src.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(&src[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&src[start..]);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/coord/point.rs"]
mod tests;
