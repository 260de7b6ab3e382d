//! The node tree: composites and paths owned by a [`Drawing`] arena.
//!
//! Children refer to their parent by [`NodeId`]; only the drawing owns nodes. Every
//! node has two placements:
//!
//! - *drawable space*: the coordinates its geometry is authored in. A composite's
//!   transform maps its children's drawable space into its parent's.
//! - *component space*: an axis-aligned `bounds` rectangle in the parent plus an
//!   `origin` offset, kept in sync with the geometry and fed back up the tree.

pub(crate) mod composite;
pub(crate) mod context;
pub(crate) mod guard;
pub(crate) mod node;

use kurbo::Shape;

use crate::drawable::context::NodeContext;
use crate::drawable::node::{CompositeNode, Node, NodeId, NodeKind, PathNode};
use crate::foundation::core::{Affine, Rect, Vec2, is_identity, union_rect};
use crate::foundation::error::{GeomError, GeomResult};
use crate::path::{RelativePath, ResolvedPath};

/// Arena owning every node of one or more drawing trees.
#[derive(Debug, Default)]
pub struct Drawing {
    nodes: Vec<Node>,
}

impl Drawing {
    /// Empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when no node was ever added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Create a detached composite with the default 100x100 frame.
    pub fn add_composite(&mut self, id: impl Into<String>) -> NodeId {
        self.push(Node::new(
            id.into(),
            NodeKind::Composite(CompositeNode::default()),
        ))
    }

    /// Create a detached path node.
    pub fn add_path(&mut self, id: impl Into<String>, path: RelativePath) -> GeomResult<NodeId> {
        let node = self.push(Node::new(id.into(), NodeKind::Path(PathNode { path })));
        self.refresh_path_bounds(node)?;
        Ok(node)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> GeomResult<&Node> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| GeomError::validation(format!("unknown node {id:?}")))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> GeomResult<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| GeomError::validation(format!("unknown node {id:?}")))
    }

    pub(crate) fn composite_ref(&self, id: NodeId) -> GeomResult<&CompositeNode> {
        self.node_ref(id)?
            .as_composite()
            .ok_or_else(|| GeomError::validation(format!("node {id:?} is not a composite")))
    }

    pub(crate) fn composite_mut(&mut self, id: NodeId) -> GeomResult<&mut CompositeNode> {
        self.node_mut(id)?
            .as_composite_mut()
            .ok_or_else(|| GeomError::validation(format!("node {id:?} is not a composite")))
    }

    /// Children of a composite, in drawing order. Empty for paths.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .and_then(Node::as_composite)
            .map(CompositeNode::children)
            .unwrap_or(&[])
    }

    /// Context exposing `id`'s markers.
    pub fn context(&self, id: NodeId) -> NodeContext<'_> {
        NodeContext::new(self, Some(id))
    }

    /// Context a node's own geometry is resolved against: its parent's markers.
    pub fn parent_context(&self, id: NodeId) -> NodeContext<'_> {
        NodeContext::new(self, self.node(id).and_then(Node::parent))
    }

    /// Attach `child` as the last child of `parent`.
    #[tracing::instrument(skip(self))]
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> GeomResult<()> {
        self.composite_ref(parent)?;
        let child_node = self.node_ref(child)?;
        if child_node.parent.is_some() {
            return Err(GeomError::validation(format!(
                "node {child:?} already has a parent"
            )));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(GeomError::validation(format!(
                "attaching {child:?} under {parent:?} would create a cycle"
            )));
        }

        self.composite_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.parent_hierarchy_changed(child)?;
        self.child_bounds_changed(parent)
    }

    /// Detach `child` from `parent`. The child stays in the arena as a root.
    #[tracing::instrument(skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> GeomResult<()> {
        let children = &mut self.composite_mut(parent)?.children;
        let Some(pos) = children.iter().position(|c| *c == child) else {
            return Err(GeomError::validation(format!(
                "node {child:?} is not a child of {parent:?}"
            )));
        };
        children.remove(pos);
        self.node_mut(child)?.parent = None;
        self.parent_hierarchy_changed(child)?;
        self.child_bounds_changed(parent)
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == candidate {
                return true;
            }
            match self.node(id).and_then(Node::parent) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Re-anchor a node after its parent changed: composites take their origin from the
    /// parent's and re-fit their transform; paths re-resolve against the new markers.
    fn parent_hierarchy_changed(&mut self, id: NodeId) -> GeomResult<()> {
        let node = self.node_ref(id)?;
        let is_composite = node.as_composite().is_some();
        let parent_origin = match node.parent {
            Some(p) => self.node_ref(p)?.origin,
            None => Vec2::ZERO,
        };
        if !is_composite {
            return self.refresh_path_bounds(id);
        }
        let n = self.node_mut(id)?;
        n.origin = parent_origin - n.bounds.origin().to_vec2();
        self.refresh_transform(id)
    }

    /// Replace a path node's path.
    pub fn set_path(&mut self, id: NodeId, path: RelativePath) -> GeomResult<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Path(p) => p.path = path,
            NodeKind::Composite(_) => {
                return Err(GeomError::validation(format!("node {id:?} is not a path")));
            }
        }
        self.refresh_path_bounds(id)
    }

    /// Move/resize a node within its parent's component space. The parent is told
    /// when the rectangle actually changes.
    pub fn set_node_bounds(&mut self, id: NodeId, bounds: Rect) -> GeomResult<()> {
        let node = self.node_mut(id)?;
        if node.bounds == bounds {
            return Ok(());
        }
        node.bounds = bounds;
        let parent = node.parent;
        match parent {
            Some(parent) => self.child_bounds_changed(parent),
            None => Ok(()),
        }
    }

    /// Materialize a path node against its parent's markers.
    pub fn resolve_path(&self, id: NodeId) -> GeomResult<ResolvedPath> {
        let path = self
            .node_ref(id)?
            .as_path()
            .ok_or_else(|| GeomError::validation(format!("node {id:?} is not a path")))?;
        path.path.materialize(&self.parent_context(id))
    }

    /// Geometric extent in the node's own drawable space.
    ///
    /// Paths that fail to resolve and composites without children have no extent.
    /// Zero-area geometry such as a horizontal line still counts here, so it can size
    /// a content area. Auto-fit works on component rectangles instead and skips
    /// zero-area ones, since an unresolved or empty child sits there as an empty rect.
    pub fn drawable_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        match &node.kind {
            NodeKind::Path(_) => match self.resolve_path(id) {
                Ok(r) if !r.path.elements().is_empty() => Some(r.path.bounding_box()),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(node = node.id.as_str(), %err, "path did not resolve");
                    None
                }
            },
            NodeKind::Composite(c) => c.children.iter().fold(None, |acc, &child| {
                let Some(r) = self.drawable_bounds(child) else {
                    return acc;
                };
                let t = self.node(child).map_or(Affine::IDENTITY, Node::transform);
                let r = if is_identity(t) {
                    r
                } else {
                    t.transform_rect_bbox(r)
                };
                union_rect(acc, r)
            }),
        }
    }

    /// Size a path node's component rectangle to its resolved geometry.
    pub(crate) fn refresh_path_bounds(&mut self, id: NodeId) -> GeomResult<()> {
        let area = self.drawable_bounds(id).unwrap_or(Rect::ZERO).expand();
        let parent_origin = match self.node_ref(id)?.parent {
            Some(p) => self.node_ref(p)?.origin,
            None => Vec2::ZERO,
        };
        let bounds = area + parent_origin;
        self.node_mut(id)?.origin = -bounds.origin().to_vec2();
        self.set_node_bounds(id, bounds)
    }

    /// Re-resolve the children of `id` whose geometry may reference its markers.
    pub(crate) fn refresh_dynamic_children(&mut self, id: NodeId) -> GeomResult<()> {
        let children = self.composite_ref(id)?.children.clone();
        for child in children {
            let (refresh_path, refresh_transform) = match &self.node_ref(child)?.kind {
                NodeKind::Path(p) => (p.path.contains_any_dynamic_points(), false),
                NodeKind::Composite(c) => (
                    false,
                    c.bounding_box.is_dynamic() || content_is_dynamic(c),
                ),
            };
            if refresh_path {
                self.refresh_path_bounds(child)?;
            } else if refresh_transform {
                self.refresh_transform(child)?;
            }
        }
        Ok(())
    }

    /// Deep-copy the subtree rooted at `id` into fresh, detached nodes.
    pub fn duplicate(&mut self, id: NodeId) -> GeomResult<NodeId> {
        let node = self.node_ref(id)?;
        let kind = match &node.kind {
            NodeKind::Composite(c) => NodeKind::Composite(c.detached_copy()),
            NodeKind::Path(p) => NodeKind::Path(p.clone()),
        };
        let mut copy = Node::new(node.id.clone(), kind);
        copy.bounds = node.bounds;
        copy.origin = node.origin;
        let children = self.children(id).to_vec();

        let new_id = self.push(copy);
        for child in children {
            let child_copy = self.duplicate(child)?;
            self.node_mut(child_copy)?.parent = Some(new_id);
            self.composite_mut(new_id)?.children.push(child_copy);
        }
        Ok(new_id)
    }

    /// Every path under `root` (inclusive), materialized and paired with the transform
    /// from its drawable space into `root`'s parent space. Depth-first, drawing order.
    pub fn resolved_paths(&self, root: NodeId) -> GeomResult<Vec<(Affine, ResolvedPath)>> {
        let mut out = Vec::new();
        self.collect_paths(root, Affine::IDENTITY, &mut out)?;
        Ok(out)
    }

    fn collect_paths(
        &self,
        id: NodeId,
        outer: Affine,
        out: &mut Vec<(Affine, ResolvedPath)>,
    ) -> GeomResult<()> {
        match &self.node_ref(id)?.kind {
            NodeKind::Path(_) => out.push((outer, self.resolve_path(id)?)),
            NodeKind::Composite(c) => {
                let inner = outer * c.transform;
                for &child in &c.children {
                    self.collect_paths(child, inner, out)?;
                }
            }
        }
        Ok(())
    }
}

fn content_is_dynamic(c: &CompositeNode) -> bool {
    c.markers_x
        .iter()
        .chain(c.markers_y.iter())
        .any(|m| m.position.is_dynamic())
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/drawing.rs"]
mod tests;
