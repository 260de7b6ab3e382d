use std::borrow::Cow;

use crate::drawable::Drawing;
use crate::drawable::node::{Node, NodeId};
use crate::expression::ast::Expr;
use crate::expression::context::EvalContext;

/// Evaluation context backed by one composite node's markers (X list first, then Y).
///
/// `node == None` (the parent of a root) and path nodes supply no symbols.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    drawing: &'a Drawing,
    node: Option<NodeId>,
}

impl<'a> NodeContext<'a> {
    pub(crate) fn new(drawing: &'a Drawing, node: Option<NodeId>) -> Self {
        Self { drawing, node }
    }
}

impl EvalContext for NodeContext<'_> {
    fn symbol_value(&self, symbol: &str, member: Option<&str>) -> Option<Cow<'_, Expr>> {
        let comp = self
            .node
            .and_then(|id| self.drawing.node(id))
            .and_then(Node::as_composite)?;
        comp.markers_x
            .symbol_value(symbol, member)
            .or_else(|| comp.markers_y.symbol_value(symbol, member))
    }
}
