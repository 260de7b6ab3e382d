use crate::coord::parallelogram::RelativeParallelogram;
use crate::drawable::Drawing;
use crate::drawable::node::{NodeId, NodeKind};
use crate::foundation::error::GeomResult;
use crate::state::{
    DEFAULT_BOTTOM_LEFT, DEFAULT_TOP_LEFT, DEFAULT_TOP_RIGHT, DrawableState, GroupState,
    PathState, decode_point, markers_from_state, markers_to_state,
};

impl Drawing {
    /// Capture the subtree rooted at `id`. Cached transforms and component bounds are
    /// derived data and are not stored.
    pub fn save_state(&self, id: NodeId) -> GeomResult<DrawableState> {
        let node = self.node_ref(id)?;
        Ok(match &node.kind {
            NodeKind::Path(p) => DrawableState::Path(PathState::from_path(node.id.clone(), &p.path)),
            NodeKind::Composite(c) => {
                let drawables = c
                    .children
                    .iter()
                    .map(|&child| self.save_state(child))
                    .collect::<GeomResult<Vec<_>>>()?;
                DrawableState::Group(GroupState {
                    id: node.id.clone(),
                    top_left: c.bounding_box.top_left.to_string(),
                    top_right: c.bounding_box.top_right.to_string(),
                    bottom_left: c.bounding_box.bottom_left.to_string(),
                    drawables,
                    markers_x: markers_to_state(&c.markers_x),
                    markers_y: markers_to_state(&c.markers_y),
                    fit_to_children: c.fit_to_children,
                })
            }
        })
    }

    /// Build a detached subtree from persisted state and return its root.
    ///
    /// Empty marker lists keep the default content markers. The stored content area
    /// and bounding box are used as-is even when `fit_to_children` is set.
    #[tracing::instrument(skip_all, fields(id = state.id()))]
    pub fn load_state(&mut self, state: &DrawableState) -> GeomResult<NodeId> {
        match state {
            DrawableState::Path(p) => self.add_path(p.id.clone(), p.to_path()),
            DrawableState::Group(g) => {
                let id = self.add_composite(g.id.clone());
                {
                    let comp = self.composite_mut(id)?;
                    comp.bounding_box = RelativeParallelogram {
                        top_left: decode_point(&g.top_left, DEFAULT_TOP_LEFT, "topLeft"),
                        top_right: decode_point(&g.top_right, DEFAULT_TOP_RIGHT, "topRight"),
                        bottom_left: decode_point(
                            &g.bottom_left,
                            DEFAULT_BOTTOM_LEFT,
                            "bottomLeft",
                        ),
                    };
                    if !g.markers_x.is_empty() {
                        comp.markers_x = markers_from_state(&g.markers_x);
                    }
                    if !g.markers_y.is_empty() {
                        comp.markers_y = markers_from_state(&g.markers_y);
                    }
                }
                self.refresh_transform(id)?;

                for child in &g.drawables {
                    let child = self.load_state(child)?;
                    self.append_child(id, child)?;
                }
                self.composite_mut(id)?.fit_to_children = g.fit_to_children;
                tracing::debug!(children = g.drawables.len(), "group loaded");
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/tree.rs"]
mod tests;
