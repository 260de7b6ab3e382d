use crate::coord::parallelogram::RelativeParallelogram;
use crate::coord::point::RelativePoint;
use crate::coord::rect::RelativeRectangle;
use crate::coord::value::RelativeValue;
use crate::drawable::Drawing;
use crate::drawable::guard::ReentrancyGuard;
use crate::drawable::node::{Axis, Node, NodeId};
use crate::foundation::core::{Affine, Point, Rect, Vec2, is_identity, union_rect};
use crate::foundation::error::{GeomError, GeomResult};
use crate::foundation::math::affine_from_three_points;
use crate::marker::{CONTENT_BOTTOM, CONTENT_LEFT, CONTENT_RIGHT, CONTENT_TOP, MarkerList};

impl Drawing {
    /// The content rectangle, read from the reserved markers.
    ///
    /// The X list must start with `left, right` and the Y list with `top, bottom`.
    pub fn content_area(&self, id: NodeId) -> GeomResult<RelativeRectangle> {
        let comp = self.composite_ref(id)?;
        let (left, right) = reserved_pair(&comp.markers_x, CONTENT_LEFT, CONTENT_RIGHT)?;
        let (top, bottom) = reserved_pair(&comp.markers_y, CONTENT_TOP, CONTENT_BOTTOM)?;
        Ok(RelativeRectangle {
            left: left.clone(),
            right: right.clone(),
            top: top.clone(),
            bottom: bottom.clone(),
        })
    }

    /// Write the four reserved markers and re-fit the transform.
    #[tracing::instrument(skip(self, area))]
    pub fn set_content_area(&mut self, id: NodeId, area: RelativeRectangle) -> GeomResult<()> {
        let comp = self.composite_mut(id)?;
        comp.markers_x.set_marker(CONTENT_LEFT, area.left);
        comp.markers_x.set_marker(CONTENT_RIGHT, area.right);
        comp.markers_y.set_marker(CONTENT_TOP, area.top);
        comp.markers_y.set_marker(CONTENT_BOTTOM, area.bottom);
        self.markers_changed(id)
    }

    /// Set (or add) any marker of a composite.
    pub fn set_marker(
        &mut self,
        id: NodeId,
        axis: Axis,
        name: &str,
        position: impl Into<RelativeValue>,
    ) -> GeomResult<()> {
        self.composite_mut(id)?
            .markers_mut(axis)
            .set_marker(name, position);
        self.markers_changed(id)
    }

    /// Replace a composite's marker list for one axis wholesale.
    pub fn apply_markers(&mut self, id: NodeId, axis: Axis, markers: &MarkerList) -> GeomResult<()> {
        self.composite_mut(id)?
            .markers_mut(axis)
            .apply_from(markers);
        self.markers_changed(id)
    }

    fn markers_changed(&mut self, id: NodeId) -> GeomResult<()> {
        self.refresh_transform(id)?;
        self.refresh_dynamic_children(id)
    }

    /// Store a new bounding parallelogram and re-fit the transform.
    pub fn set_bounding_box(&mut self, id: NodeId, bounds: RelativeParallelogram) -> GeomResult<()> {
        self.composite_mut(id)?.bounding_box = bounds;
        self.refresh_transform(id)
    }

    /// Make the bounding box coincide with the content area (identity layout).
    pub fn reset_bounding_box_to_content_area(&mut self, id: NodeId) -> GeomResult<()> {
        let c = self.content_area(id)?;
        self.set_bounding_box(
            id,
            RelativeParallelogram {
                top_left: RelativePoint {
                    x: c.left.clone(),
                    y: c.top.clone(),
                },
                top_right: RelativePoint {
                    x: c.right,
                    y: c.top,
                },
                bottom_left: RelativePoint {
                    x: c.left,
                    y: c.bottom,
                },
            },
        )
    }

    /// Set the content area to the union of the children's drawable bounds, then reset
    /// the bounding box to match.
    #[tracing::instrument(skip(self))]
    pub fn reset_content_area_and_bounding_box_to_fit_children(
        &mut self,
        id: NodeId,
    ) -> GeomResult<()> {
        self.composite_ref(id)?;
        let area = self.drawable_bounds(id).unwrap_or(Rect::ZERO);
        self.set_content_area(id, RelativeRectangle::from(area))?;
        self.reset_bounding_box_to_content_area(id)
    }

    /// Toggle fit-to-children mode. Turning it on fits immediately.
    pub fn set_fit_to_children(&mut self, id: NodeId, fit: bool) -> GeomResult<()> {
        self.composite_mut(id)?.fit_to_children = fit;
        if fit {
            self.child_bounds_changed(id)?;
        }
        Ok(())
    }

    /// Recompute the cached transform mapping the content rectangle onto the bounding
    /// parallelogram, both resolved in the parent's space.
    ///
    /// Unresolvable coordinates or missing reserved markers install the identity
    /// transform (logged); so do degenerate fits.
    #[tracing::instrument(skip(self))]
    pub fn refresh_transform(&mut self, id: NodeId) -> GeomResult<()> {
        self.composite_ref(id)?;
        let t = self.fit_transform(id).unwrap_or_else(|err| {
            tracing::warn!(%err, "composite layout did not resolve; using identity");
            Affine::IDENTITY
        });

        let node = self.node_mut(id)?;
        let parent = node.parent;
        let Some(comp) = node.as_composite_mut() else {
            return Ok(());
        };
        if comp.transform == t {
            return Ok(());
        }
        comp.transform = t;
        tracing::debug!(coeffs = ?t.as_coeffs(), "transform changed");

        match parent {
            Some(p) => self.child_bounds_changed(p),
            None => Ok(()),
        }
    }

    fn fit_transform(&self, id: NodeId) -> GeomResult<Affine> {
        let comp = self.composite_ref(id)?;
        let ctx = self.parent_context(id);
        let target = comp.bounding_box.resolve_three_points(&ctx)?;
        let content = self.content_area(id)?.resolve(&ctx)?;
        let source = [
            Point::new(content.x0, content.y0),
            Point::new(content.x1, content.y0),
            Point::new(content.x0, content.y1),
        ];
        Ok(affine_from_three_points(source, target))
    }

    /// Resize the node to enclose its children's placements, shifting the children so
    /// their absolute placement stays put. Re-entry for the same node is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn update_bounds_to_fit_children(&mut self, id: NodeId) -> GeomResult<()> {
        let flag = self.composite_ref(id)?.updating_bounds.clone();
        let Some(_guard) = ReentrancyGuard::enter(&flag) else {
            tracing::trace!("bounds update already in progress");
            return Ok(());
        };
        self.fit_bounds_to_children(id)
    }

    /// Reaction to a child moving, resizing, re-transforming, appearing or leaving.
    pub(crate) fn child_bounds_changed(&mut self, id: NodeId) -> GeomResult<()> {
        let Some(comp) = self.node(id).and_then(Node::as_composite) else {
            return Ok(());
        };
        let fit = comp.fit_to_children;
        let flag = comp.updating_bounds.clone();
        let Some(_guard) = ReentrancyGuard::enter(&flag) else {
            tracing::trace!(?id, "layout re-entry ignored");
            return Ok(());
        };

        if fit {
            self.reset_content_area_and_bounding_box_to_fit_children(id)?;
        }
        self.fit_bounds_to_children(id)
    }

    fn fit_bounds_to_children(&mut self, id: NodeId) -> GeomResult<()> {
        let children = self.composite_ref(id)?.children.clone();
        let child_area = children
            .iter()
            .filter_map(|&c| self.node(c).map(bounds_in_parent))
            // Empty placements (unresolved or flat children) do not stretch the union.
            .filter(|r| !r.is_zero_area())
            .fold(None, union_rect)
            .unwrap_or(Rect::ZERO);

        let delta = child_area.origin().to_vec2();
        let node = self.node_ref(id)?;
        let new_bounds = child_area + node.bounds.origin().to_vec2();
        if new_bounds == node.bounds {
            return Ok(());
        }

        if delta != Vec2::ZERO {
            self.node_mut(id)?.origin -= delta;
            for child in children {
                let moved = self.node_ref(child)?.bounds - delta;
                self.set_node_bounds(child, moved)?;
            }
        }
        self.set_node_bounds(id, new_bounds)
    }
}

/// Placement of `node` as its parent sees it, including its own transform.
fn bounds_in_parent(node: &Node) -> Rect {
    let t = node.transform();
    if is_identity(t) {
        node.bounds
    } else {
        t.transform_rect_bbox(node.bounds)
    }
}

fn reserved_pair<'a>(
    list: &'a MarkerList,
    first: &str,
    second: &str,
) -> GeomResult<(&'a RelativeValue, &'a RelativeValue)> {
    match (list.marker_at(0), list.marker_at(1)) {
        (Some(a), Some(b)) if a.name == first && b.name == second => Ok((&a.position, &b.position)),
        _ => Err(GeomError::validation(format!(
            "content area needs markers '{first}' and '{second}' as the first two entries"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/composite.rs"]
mod tests;
