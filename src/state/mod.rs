//! Persisted form of drawables.
//!
//! Coordinates are stored as their canonical strings so that expressions survive a
//! round trip unchanged. Loading is lenient: a missing or unparsable point falls back
//! to a fixed default and logs a warning instead of failing the whole document.

pub(crate) mod tree;

use serde::{Deserialize, Serialize};

use crate::coord::point::RelativePoint;
use crate::coord::value::RelativeValue;
use crate::foundation::error::{GeomError, GeomResult};
use crate::marker::{Marker, MarkerList};
use crate::path::RelativePath;
use crate::path::segment::PathSegment;

/// Default top-left corner of a persisted group.
pub const DEFAULT_TOP_LEFT: &str = "0, 0";
/// Default top-right corner of a persisted group.
pub const DEFAULT_TOP_RIGHT: &str = "100, 0";
/// Default bottom-left corner of a persisted group.
pub const DEFAULT_BOTTOM_LEFT: &str = "0, 100";
/// Fallback for missing or malformed segment points.
pub const DEFAULT_POINT: &str = "0, 0";

/// A persisted node: a group or a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawableState {
    /// Composite node.
    Group(GroupState),
    /// Path node.
    Path(PathState),
}

impl DrawableState {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> GeomResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GeomError::serde(e.to_string()))
    }

    /// Parse JSON produced by [`DrawableState::to_json`] (or written by hand).
    pub fn from_json(src: &str) -> GeomResult<Self> {
        serde_json::from_str(src).map_err(|e| GeomError::serde(e.to_string()))
    }

    /// The node identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Group(g) => &g.id,
            Self::Path(p) => &p.id,
        }
    }
}

/// Persisted composite node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupState {
    /// Node identifier.
    #[serde(default)]
    pub id: String,
    /// Bounding box top-left corner, `"x, y"`.
    #[serde(default = "default_top_left")]
    pub top_left: String,
    /// Bounding box top-right corner, `"x, y"`.
    #[serde(default = "default_top_right")]
    pub top_right: String,
    /// Bounding box bottom-left corner, `"x, y"`.
    #[serde(default = "default_bottom_left")]
    pub bottom_left: String,
    /// Children in drawing order.
    #[serde(default, rename = "Drawables")]
    pub drawables: Vec<DrawableState>,
    /// Horizontal markers in order.
    #[serde(default, rename = "MarkersX")]
    pub markers_x: Vec<MarkerState>,
    /// Vertical markers in order.
    #[serde(default, rename = "MarkersY")]
    pub markers_y: Vec<MarkerState>,
    /// Whether the group tracks its children's extent.
    #[serde(default)]
    pub fit_to_children: bool,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            id: String::new(),
            top_left: default_top_left(),
            top_right: default_top_right(),
            bottom_left: default_bottom_left(),
            drawables: Vec::new(),
            markers_x: Vec::new(),
            markers_y: Vec::new(),
            fit_to_children: false,
        }
    }
}

fn default_top_left() -> String {
    DEFAULT_TOP_LEFT.to_owned()
}

fn default_top_right() -> String {
    DEFAULT_TOP_RIGHT.to_owned()
}

fn default_bottom_left() -> String {
    DEFAULT_BOTTOM_LEFT.to_owned()
}

/// Persisted marker: a name and a canonical position string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerState {
    /// Marker name.
    pub name: String,
    /// Canonical position.
    #[serde(default)]
    pub position: String,
}

impl From<&Marker> for MarkerState {
    fn from(m: &Marker) -> Self {
        Self {
            name: m.name.clone(),
            position: m.position.to_string(),
        }
    }
}

pub(crate) fn markers_to_state(list: &MarkerList) -> Vec<MarkerState> {
    list.iter().map(MarkerState::from).collect()
}

/// Unparsable positions become `0`.
pub(crate) fn markers_from_state(states: &[MarkerState]) -> MarkerList {
    states
        .iter()
        .map(|s| {
            let position = RelativeValue::parse(&s.position).unwrap_or_else(|err| {
                tracing::warn!(marker = s.name.as_str(), %err, "bad marker position; using 0");
                RelativeValue::default()
            });
            Marker::new(s.name.clone(), position)
        })
        .collect()
}

/// Persisted path node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathState {
    /// Node identifier.
    #[serde(default)]
    pub id: String,
    /// `true` for the non-zero fill rule.
    #[serde(default = "default_winding")]
    pub non_zero_winding: bool,
    /// Segments in order.
    #[serde(default)]
    pub segments: Vec<SegmentState>,
}

fn default_winding() -> bool {
    true
}

impl PathState {
    /// Capture `path` under the identifier `id`.
    pub fn from_path(id: impl Into<String>, path: &RelativePath) -> Self {
        Self {
            id: id.into(),
            non_zero_winding: path.uses_non_zero_winding(),
            segments: path.segments().iter().map(SegmentState::from).collect(),
        }
    }

    /// Rebuild the path. Never fails; bad points decode to [`DEFAULT_POINT`].
    pub fn to_path(&self) -> RelativePath {
        let mut path = RelativePath::new();
        path.set_non_zero_winding(self.non_zero_winding);
        for seg in &self.segments {
            path.append(seg.to_segment());
        }
        path
    }
}

/// Persisted path segment, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SegmentState {
    /// [`PathSegment::StartSubPath`].
    Move {
        /// Target point.
        #[serde(default)]
        point1: String,
    },
    /// [`PathSegment::LineTo`].
    Line {
        /// End point.
        #[serde(default)]
        point1: String,
    },
    /// [`PathSegment::QuadraticTo`].
    Quad {
        /// Control point.
        #[serde(default)]
        point1: String,
        /// End point.
        #[serde(default)]
        point2: String,
    },
    /// [`PathSegment::CubicTo`].
    Cubic {
        /// First control point.
        #[serde(default)]
        point1: String,
        /// Second control point.
        #[serde(default)]
        point2: String,
        /// End point.
        #[serde(default)]
        point3: String,
    },
    /// [`PathSegment::CloseSubPath`].
    Close,
}

impl From<&PathSegment> for SegmentState {
    fn from(seg: &PathSegment) -> Self {
        match seg {
            PathSegment::StartSubPath(p) => Self::Move {
                point1: p.to_string(),
            },
            PathSegment::LineTo(p) => Self::Line {
                point1: p.to_string(),
            },
            PathSegment::QuadraticTo([c, e]) => Self::Quad {
                point1: c.to_string(),
                point2: e.to_string(),
            },
            PathSegment::CubicTo([c1, c2, e]) => Self::Cubic {
                point1: c1.to_string(),
                point2: c2.to_string(),
                point3: e.to_string(),
            },
            PathSegment::CloseSubPath => Self::Close,
        }
    }
}

impl SegmentState {
    /// Decode into a segment, substituting [`DEFAULT_POINT`] for bad points.
    pub fn to_segment(&self) -> PathSegment {
        let p = |src: &str| decode_point(src, DEFAULT_POINT, "segment point");
        match self {
            Self::Move { point1 } => PathSegment::StartSubPath(p(point1)),
            Self::Line { point1 } => PathSegment::LineTo(p(point1)),
            Self::Quad { point1, point2 } => PathSegment::QuadraticTo([p(point1), p(point2)]),
            Self::Cubic {
                point1,
                point2,
                point3,
            } => PathSegment::CubicTo([p(point1), p(point2), p(point3)]),
            Self::Close => PathSegment::CloseSubPath,
        }
    }
}

/// Parse `"x, y"`, or fall back to `default` (which must itself parse).
pub(crate) fn decode_point(src: &str, default: &str, field: &str) -> RelativePoint {
    if let Ok(p) = RelativePoint::parse(src) {
        return p;
    }
    tracing::warn!(field, value = src, default, "unreadable point; using default");
    RelativePoint::parse(default).unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/state/model.rs"]
mod tests;
