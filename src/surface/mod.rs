// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Headless host document.
//!
//! `Surface` is an arena of element nodes rooted at `body`. It stands in for
//! the page the editor is embedded in: the canvas, caret visuals, toolbars
//! and the overlay container all live here. It implements `NodeTree` for
//! event-target classification and `OverlaySurface` for overlay items.

pub mod tree;

pub use tree::{NodeTree, find_ancestor};

use crate::editing::transform::Placement;
use crate::overlay::OverlaySurface;
use indextree::{Arena, NodeEdge, NodeId};
use serde::Serialize;

/// One element node
#[derive(Debug, Clone, Default, Serialize)]
pub struct SurfaceNode {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    /// Absolute box, set once an overlay item is placed
    pub placement: Option<Placement>,
}

impl SurfaceNode {
    fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Serializable view of a subtree, for snapshots and logs
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    #[serde(flatten)]
    pub node: SurfaceNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// In-memory host document
#[derive(Debug)]
pub struct Surface {
    arena: Arena<SurfaceNode>,
    body: NodeId,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let body = arena.new_node(SurfaceNode::element("body"));
        Self { arena, body }
    }

    /// The document root; ancestor walks stop here
    pub fn body(&self) -> NodeId {
        self.body
    }

    fn live(&self, id: NodeId) -> Option<&SurfaceNode> {
        if id.is_removed(&self.arena) {
            return None;
        }
        self.arena.get(id).map(|node| node.get())
    }

    fn live_mut(&mut self, id: NodeId) -> Option<&mut SurfaceNode> {
        if id.is_removed(&self.arena) {
            return None;
        }
        self.arena.get_mut(id).map(|node| node.get_mut())
    }

    pub fn node(&self, id: NodeId) -> Option<&SurfaceNode> {
        self.live(id)
    }

    /// Create an element and append it under `parent`
    pub fn create_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    /// Unlink a node from its parent but keep it alive
    pub fn detach(&mut self, id: NodeId) {
        if !id.is_removed(&self.arena) {
            id.detach(&mut self.arena);
        }
    }

    /// Whether `id` is still reachable from `body`
    pub fn is_attached(&self, id: NodeId) -> bool {
        if self.live(id).is_none() {
            return false;
        }
        id.ancestors(&self.arena).any(|ancestor| ancestor == self.body)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        if self.live(id).is_none() {
            return Vec::new();
        }
        id.children(&self.arena).collect()
    }

    /// Attached descendants of `id` carrying `class`, in document order
    pub fn find_by_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        if self.live(id).is_none() {
            return Vec::new();
        }
        id.descendants(&self.arena)
            .filter(|node| self.live(*node).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// Snapshot the subtree under `id`. Walks iteratively, so tree depth is
    /// not bounded by the call stack.
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        self.live(id)?;
        // Snapshots still collecting children, root first
        let mut open: Vec<NodeSnapshot> = Vec::new();
        for edge in id.traverse(&self.arena) {
            match edge {
                NodeEdge::Start(node) => open.push(NodeSnapshot {
                    node: self.live(node)?.clone(),
                    children: Vec::new(),
                }),
                NodeEdge::End(_) => {
                    let done = open.pop()?;
                    match open.last_mut() {
                        Some(parent) => parent.children.push(done),
                        None => return Some(done),
                    }
                }
            }
        }
        None
    }
}

impl NodeTree for Surface {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        if node.is_removed(&self.arena) {
            return None;
        }
        self.arena.get(node)?.parent()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.live(node)?.attribute(name)
    }
}

impl OverlaySurface for Surface {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(SurfaceNode::element(tag))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.live_mut(node)
            && !n.has_class(class)
        {
            n.classes.push(class.to_string());
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(n) = self.live_mut(node) else {
            return;
        };
        match n.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => n.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.live(parent).is_none() || self.live(child).is_none() {
            return false;
        }
        match parent.checked_append(child, &mut self.arena) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Cannot append {:?} under {:?}: {:?}", child, parent, e);
                false
            }
        }
    }

    fn set_placement(&mut self, node: NodeId, placement: Placement) {
        if let Some(n) = self.live_mut(node) {
            n.placement = Some(placement);
        }
    }

    fn placement(&self, node: NodeId) -> Option<Placement> {
        self.live(node)?.placement
    }

    fn remove(&mut self, node: NodeId) -> bool {
        if node == self.body || self.live(node).is_none() {
            return false;
        }
        node.remove_subtree(&mut self.arena);
        true
    }
}
