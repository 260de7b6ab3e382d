use std::cell::Cell;
use std::rc::Rc;

/// Scoped "already inside" marker for one node's layout pass.
///
/// The flag is shared through an `Rc` so the guard does not borrow the node while the
/// drawing is being mutated underneath it.
pub(crate) struct ReentrancyGuard {
    flag: Rc<Cell<bool>>,
}

impl ReentrancyGuard {
    /// Set the flag, or return `None` if it was already set.
    pub(crate) fn enter(flag: &Rc<Cell<bool>>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self {
            flag: Rc::clone(flag),
        })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/guard.rs"]
mod tests;
