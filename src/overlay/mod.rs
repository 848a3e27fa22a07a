// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay widgets kept in sync with canvas-rendered elements.
//!
//! Some document elements (embedded frames) cannot be painted onto the page
//! bitmap. Each one gets an `OverlayItem`: a container node on the overlay
//! surface positioned to coincide with the element's box on the canvas. The
//! `OverlayManager` creates, repositions and disposes items on every layout
//! pass.

pub mod content;
pub mod item;
pub mod manager;

pub use content::{BlockContent, EmbeddedFrame};
pub use item::OverlayItem;
pub use manager::{ElementPlacement, OverlayManager, PassReport};

use crate::editing::transform::Placement;
use std::fmt::Debug;

/// The node operations overlay items and their content need.
pub trait OverlaySurface {
    /// Node handle
    type Node: Copy + Eq + Debug;

    /// Create an unattached element
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn add_class(&mut self, node: Self::Node, class: &str);

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Append `child` as the last child of `parent`. Returns `false` if
    /// either node is gone.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> bool;

    /// Apply an absolute box to `node`
    fn set_placement(&mut self, node: Self::Node, placement: Placement);

    fn placement(&self, node: Self::Node) -> Option<Placement>;

    /// Detach and free `node` with its subtree. Returns `false` if it was
    /// already removed.
    fn remove(&mut self, node: Self::Node) -> bool;
}
