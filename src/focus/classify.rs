// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Event-target classification: is this node part of the editor?

use crate::surface::{NodeTree, find_ancestor};

/// Where an event target sits relative to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetClass {
    /// Canvas, caret, caret agent or the page body
    EditorSurface,
    /// Inside a node marked as an editor component (toolbars etc.)
    EditorComponent,
    Outside,
}

impl TargetClass {
    pub fn is_inside(self) -> bool {
        !matches!(self, TargetClass::Outside)
    }
}

/// The nodes the editor recognizes as its own
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSurfaces<N> {
    pub canvas: N,
    /// Root-stop for the ancestor walk, and an inside target itself
    pub body: N,
    /// Caret and caret-agent nodes, once the caret exists
    pub caret: Option<(N, N)>,
    /// Attribute whose non-empty value marks an editor component
    pub marker: String,
}

impl<N: Copy + Eq> EditorSurfaces<N> {
    pub fn new(canvas: N, body: N, marker: impl Into<String>) -> Self {
        Self {
            canvas,
            body,
            caret: None,
            marker: marker.into(),
        }
    }

    fn is_surface_node(&self, node: N) -> bool {
        if node == self.canvas || node == self.body {
            return true;
        }
        self.caret
            .is_some_and(|(caret, agent)| node == caret || node == agent)
    }

    /// Classify `target`.
    ///
    /// Direct hits on the recognized surface nodes win; otherwise walk
    /// towards `body` looking for a marked component. A detached target
    /// is outside.
    pub fn classify<T>(&self, tree: &T, target: N) -> TargetClass
    where
        T: NodeTree<Node = N> + ?Sized,
    {
        if self.is_surface_node(target) {
            return TargetClass::EditorSurface;
        }
        let marked = |node: N| {
            tree.attribute(node, &self.marker)
                .is_some_and(|value| !value.is_empty())
        };
        match find_ancestor(tree, target, marked, |node| node == self.body) {
            Some(_) => TargetClass::EditorComponent,
            None => TargetClass::Outside,
        }
    }
}
