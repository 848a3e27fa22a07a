// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Minimal node-tree capability and the ancestor walk built on it.
//!
//! Target classification only needs a parent link, attribute lookup and node
//! identity, so it is written against this trait and can be tested without a
//! real rendering surface.

/// Read-only view of a node hierarchy
pub trait NodeTree {
    /// Node identity
    type Node: Copy + Eq;

    /// Parent of `node`, or `None` for a root or a detached node
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Attribute value on `node`, if set
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;
}

/// Walk from `start` (inclusive) towards the root.
///
/// Returns the first node accepted by `include`. The walk fails when it
/// reaches a node accepted by `is_root` without a match, or when the chain
/// ends (detached subtree).
pub fn find_ancestor<T, I, R>(tree: &T, start: T::Node, include: I, is_root: R) -> Option<T::Node>
where
    T: NodeTree + ?Sized,
    I: Fn(T::Node) -> bool,
    R: Fn(T::Node) -> bool,
{
    let mut current = Some(start);
    while let Some(node) = current {
        if include(node) {
            return Some(node);
        }
        if is_root(node) {
            return None;
        }
        current = tree.parent(node);
    }
    None
}
