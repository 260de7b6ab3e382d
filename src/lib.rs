//! relgeom resolves relative geometry: coordinates written as expressions over named
//! markers, paths built from such coordinates, and groups whose content rectangle is
//! mapped onto a bounding parallelogram in their parent.
//!
//! - Parse coordinates into [`RelativeValue`], [`RelativePoint`] and friends
//! - Build a [`RelativePath`] and [`materialize`](RelativePath::materialize) it against
//!   any [`EvalContext`]
//! - Assemble nodes in a [`Drawing`] and let it keep transforms and bounds current
//! - Save and load subtrees through [`DrawableState`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod coord;
pub(crate) mod drawable;
pub(crate) mod expression;
pub(crate) mod foundation;
pub(crate) mod marker;
pub(crate) mod path;
pub(crate) mod state;

pub use crate::foundation::core::{Affine, BezPath, PathEl, Point, Rect, Vec2};
pub use crate::foundation::error::{GeomError, GeomResult};
pub use crate::foundation::math::affine_from_three_points;

pub use crate::expression::ast::{BinaryOp, Builtin, Expr};
pub use crate::expression::context::{EmptyContext, EvalContext};
pub use crate::expression::error::ExprError;
pub use crate::expression::eval::evaluate;
pub use crate::expression::parser::parse_expr;

pub use crate::coord::parallelogram::{
    RelativeParallelogram, internal_coord_for_point, point_for_internal_coord,
};
pub use crate::coord::point::RelativePoint;
pub use crate::coord::rect::RelativeRectangle;
pub use crate::coord::value::{RelativeValue, ValueKind};

pub use crate::path::segment::{PathSegment, SegmentKind};
pub use crate::path::{RelativePath, ResolvedPath};

pub use crate::marker::{
    CONTENT_BOTTOM, CONTENT_LEFT, CONTENT_RIGHT, CONTENT_TOP, Marker, MarkerList,
};

pub use crate::drawable::Drawing;
pub use crate::drawable::context::NodeContext;
pub use crate::drawable::node::{Axis, CompositeNode, Node, NodeId, NodeKind, PathNode};

pub use crate::state::{
    DEFAULT_BOTTOM_LEFT, DEFAULT_POINT, DEFAULT_TOP_LEFT, DEFAULT_TOP_RIGHT, DrawableState,
    GroupState, MarkerState, PathState, SegmentState,
};
