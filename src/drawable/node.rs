use std::cell::Cell;
use std::rc::Rc;

use crate::coord::parallelogram::RelativeParallelogram;
use crate::foundation::core::{Affine, Rect, Vec2};
use crate::marker::{CONTENT_BOTTOM, CONTENT_LEFT, CONTENT_RIGHT, CONTENT_TOP, MarkerList};
use crate::path::RelativePath;

/// Handle to a node owned by a [`Drawing`](crate::Drawing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Marker axis of a composite node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal markers (`left`, `right`, ...).
    X,
    /// Vertical markers (`top`, `bottom`, ...).
    Y,
}

/// One entry of the drawing tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) parent: Option<NodeId>,
    /// Placement in the parent's component space.
    pub(crate) bounds: Rect,
    /// Offset of this node's drawing origin from the top-left of `bounds`.
    pub(crate) origin: Vec2,
    pub(crate) kind: NodeKind,
}

/// What a node draws.
#[derive(Debug)]
pub enum NodeKind {
    /// Group of child nodes with its own coordinate frame.
    Composite(CompositeNode),
    /// A single relative path.
    Path(PathNode),
}

impl Node {
    pub(crate) fn new(id: String, kind: NodeKind) -> Self {
        Self {
            id,
            parent: None,
            bounds: Rect::ZERO,
            origin: Vec2::ZERO,
            kind,
        }
    }

    /// User-facing identifier (persisted as `id`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Owning composite, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Placement rectangle in the parent's component space.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Offset of the drawing origin from the top-left of [`Node::bounds`].
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Node payload.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Composite payload, if this is a group.
    pub fn as_composite(&self) -> Option<&CompositeNode> {
        match &self.kind {
            NodeKind::Composite(c) => Some(c),
            NodeKind::Path(_) => None,
        }
    }

    pub(crate) fn as_composite_mut(&mut self) -> Option<&mut CompositeNode> {
        match &mut self.kind {
            NodeKind::Composite(c) => Some(c),
            NodeKind::Path(_) => None,
        }
    }

    /// Path payload, if this is a path.
    pub fn as_path(&self) -> Option<&PathNode> {
        match &self.kind {
            NodeKind::Path(p) => Some(p),
            NodeKind::Composite(_) => None,
        }
    }

    /// Child-to-parent transform; identity for paths.
    pub fn transform(&self) -> Affine {
        self.as_composite()
            .map_or(Affine::IDENTITY, CompositeNode::transform)
    }
}

/// A group whose children are laid out in a content rectangle that is mapped onto a
/// bounding parallelogram in the parent.
#[derive(Debug)]
pub struct CompositeNode {
    pub(crate) bounding_box: RelativeParallelogram,
    pub(crate) markers_x: MarkerList,
    pub(crate) markers_y: MarkerList,
    pub(crate) children: Vec<NodeId>,
    pub(crate) transform: Affine,
    pub(crate) fit_to_children: bool,
    pub(crate) updating_bounds: Rc<Cell<bool>>,
}

impl Default for CompositeNode {
    /// Bounding box `(0,0) (100,0) (0,100)` over a `0..100` square content area.
    fn default() -> Self {
        let mut markers_x = MarkerList::new();
        markers_x.set_marker(CONTENT_LEFT, 0.0);
        markers_x.set_marker(CONTENT_RIGHT, 100.0);
        let mut markers_y = MarkerList::new();
        markers_y.set_marker(CONTENT_TOP, 0.0);
        markers_y.set_marker(CONTENT_BOTTOM, 100.0);

        Self {
            bounding_box: RelativeParallelogram::new((0.0, 0.0), (100.0, 0.0), (0.0, 100.0)),
            markers_x,
            markers_y,
            children: Vec::new(),
            transform: Affine::IDENTITY,
            fit_to_children: false,
            updating_bounds: Rc::new(Cell::new(false)),
        }
    }
}

impl CompositeNode {
    /// Bounding parallelogram in the parent's space.
    pub fn bounding_box(&self) -> &RelativeParallelogram {
        &self.bounding_box
    }

    /// Markers for one axis.
    pub fn markers(&self, axis: Axis) -> &MarkerList {
        match axis {
            Axis::X => &self.markers_x,
            Axis::Y => &self.markers_y,
        }
    }

    pub(crate) fn markers_mut(&mut self, axis: Axis) -> &mut MarkerList {
        match axis {
            Axis::X => &mut self.markers_x,
            Axis::Y => &mut self.markers_y,
        }
    }

    /// Children in drawing order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Cached child-to-parent transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Whether content area and bounding box track the children.
    pub fn fits_to_children(&self) -> bool {
        self.fit_to_children
    }

    /// Copy of everything except children; the layout flag starts cleared.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            bounding_box: self.bounding_box.clone(),
            markers_x: self.markers_x.clone(),
            markers_y: self.markers_y.clone(),
            children: Vec::new(),
            transform: self.transform,
            fit_to_children: self.fit_to_children,
            updating_bounds: Rc::new(Cell::new(false)),
        }
    }
}

/// A leaf node drawing one [`RelativePath`].
#[derive(Debug, Clone)]
pub struct PathNode {
    pub(crate) path: RelativePath,
}

impl PathNode {
    /// The path, resolved against the parent composite's markers when drawn.
    pub fn path(&self) -> &RelativePath {
        &self.path
    }
}
