use std::fmt;
use std::str::FromStr;

use crate::coord::point::split_top_level;
use crate::coord::value::RelativeValue;
use crate::expression::context::EvalContext;
use crate::foundation::core::Rect;
use crate::foundation::error::{GeomError, GeomResult};

/// A rectangle given by four relative edges. Text form is `"left, top, right, bottom"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativeRectangle {
    /// Left edge.
    pub left: RelativeValue,
    /// Right edge.
    pub right: RelativeValue,
    /// Top edge.
    pub top: RelativeValue,
    /// Bottom edge.
    pub bottom: RelativeValue,
}

impl RelativeRectangle {
    /// Build from edges in left, right, top, bottom order.
    pub fn new(
        left: impl Into<RelativeValue>,
        right: impl Into<RelativeValue>,
        top: impl Into<RelativeValue>,
        bottom: impl Into<RelativeValue>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// Parse `"left, top, right, bottom"`.
    pub fn parse(src: &str) -> GeomResult<Self> {
        let parts = split_top_level(src);
        let [l, t, r, b] = parts.as_slice() else {
            return Err(GeomError::validation(format!(
                "expected four comma-separated coordinates, got '{src}'"
            )));
        };
        Ok(Self {
            left: RelativeValue::parse(l)?,
            right: RelativeValue::parse(r)?,
            top: RelativeValue::parse(t)?,
            bottom: RelativeValue::parse(b)?,
        })
    }

    /// Resolve all four edges. No normalization: `right < left` gives a negative width.
    pub fn resolve<C: EvalContext + ?Sized>(&self, ctx: &C) -> GeomResult<Rect> {
        Ok(Rect::new(
            self.left.resolve(ctx)?,
            self.top.resolve(ctx)?,
            self.right.resolve(ctx)?,
            self.bottom.resolve(ctx)?,
        ))
    }

    /// Return `true` if any edge is dynamic.
    pub fn is_dynamic(&self) -> bool {
        self.left.is_dynamic()
            || self.right.is_dynamic()
            || self.top.is_dynamic()
            || self.bottom.is_dynamic()
    }
}

impl From<Rect> for RelativeRectangle {
    fn from(r: Rect) -> Self {
        Self::new(r.x0, r.x1, r.y0, r.y1)
    }
}

impl FromStr for RelativeRectangle {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RelativeRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
