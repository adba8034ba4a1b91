// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::document::{Container, ShapeId};

/// Open groups of one drawing context, innermost last.
///
/// New shapes go into the innermost open group, or into the root container
/// when no group is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupStack {
    root: Container,
    open: Vec<ShapeId>,
}

impl GroupStack {
    /// An empty stack placing shapes into `root`.
    pub fn new(root: Container) -> Self {
        Self {
            root,
            open: Vec::new(),
        }
    }

    /// Where the next shape goes.
    #[must_use]
    pub fn current(&self) -> Container {
        self.open.last().map_or(self.root, |&group| Container::Group(group))
    }

    /// Make `group` the innermost open group.
    pub fn push(&mut self, group: ShapeId) {
        self.open.push(group);
    }

    /// Close the innermost open group. Returns `None` when none is open.
    pub fn pop(&mut self) -> Option<ShapeId> {
        self.open.pop()
    }

    /// Number of open groups.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SlideId;

    #[test]
    fn innermost_group_receives_shapes() {
        let root = Container::Slide(SlideId(0));
        let mut stack = GroupStack::new(root);
        assert_eq!(stack.current(), root);
        stack.push(ShapeId(3));
        stack.push(ShapeId(7));
        assert_eq!(stack.current(), Container::Group(ShapeId(7)));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), Some(ShapeId(7)));
        assert_eq!(stack.current(), Container::Group(ShapeId(3)));
        stack.pop();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.current(), root);
    }
}
