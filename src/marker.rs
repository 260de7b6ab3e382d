//! Named anchors on one axis.

use std::borrow::Cow;

use crate::coord::value::RelativeValue;
use crate::expression::ast::Expr;
use crate::expression::context::EvalContext;

/// Reserved X-axis marker holding the content area's left edge.
pub const CONTENT_LEFT: &str = "left";
/// Reserved X-axis marker holding the content area's right edge.
pub const CONTENT_RIGHT: &str = "right";
/// Reserved Y-axis marker holding the content area's top edge.
pub const CONTENT_TOP: &str = "top";
/// Reserved Y-axis marker holding the content area's bottom edge.
pub const CONTENT_BOTTOM: &str = "bottom";

/// A named relative position.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Name, unique within its list.
    pub name: String,
    /// Position along the list's axis.
    pub position: RelativeValue,
}

impl Marker {
    /// Build a marker.
    pub fn new(name: impl Into<String>, position: impl Into<RelativeValue>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
        }
    }
}

/// Ordered set of markers, unique by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerList {
    markers: Vec<Marker>,
}

impl MarkerList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Return `true` when the list has no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// Find a marker by name.
    pub fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    /// Marker at `index` in insertion order.
    pub fn marker_at(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// Overwrite the position of an existing marker (keeping its slot), or append a new
    /// one at the end.
    pub fn set_marker(&mut self, name: &str, position: impl Into<RelativeValue>) {
        let position = position.into();
        match self.markers.iter_mut().find(|m| m.name == name) {
            Some(m) => m.position = position,
            None => self.markers.push(Marker::new(name, position)),
        }
    }

    /// Remove a marker by name, returning it.
    pub fn remove_marker(&mut self, name: &str) -> Option<Marker> {
        let idx = self.markers.iter().position(|m| m.name == name)?;
        Some(self.markers.remove(idx))
    }

    /// Replace the whole marker set with a copy of `other`'s.
    pub fn apply_from(&mut self, other: &MarkerList) {
        self.markers.clone_from(&other.markers);
    }
}

impl<'a> IntoIterator for &'a MarkerList {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Marker> for MarkerList {
    /// Later duplicates overwrite earlier ones in place.
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        let mut list = Self::new();
        for m in iter {
            list.set_marker(&m.name, m.position);
        }
        list
    }
}

impl EvalContext for MarkerList {
    fn symbol_value(&self, symbol: &str, member: Option<&str>) -> Option<Cow<'_, Expr>> {
        if member.is_some() {
            return None;
        }
        self.marker(symbol).map(|m| Cow::Borrowed(m.position.expr()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/marker.rs"]
mod tests;
