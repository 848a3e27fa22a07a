// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! One overlay widget anchored to one document element.
//!
//! Lifecycle: `create` allocates the container and appends it to the host
//! right away, so stacking order follows creation order. `render` draws the
//! content once. `set_placement` may be called any number of times and is
//! idempotent. `dispose` removes the container; later calls do nothing.

use super::OverlaySurface;
use super::content::{self, BlockContent};
use crate::editing::transform::{self, PagePosition, Placement};
use crate::editing::viewport::PageMetrics;
use crate::error::TransformResult;
use crate::model::{DocumentElement, ElementId};

pub struct OverlayItem<S: OverlaySurface> {
    /// Key into the element arena, never a reference
    element: ElementId,
    container: S::Node,
    content: Option<Box<dyn BlockContent<S>>>,
    rendered: bool,
    disposed: bool,
}

impl<S: OverlaySurface> std::fmt::Debug for OverlayItem<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayItem")
            .field("element", &self.element)
            .field("container", &self.container)
            .field("has_content", &self.content.is_some())
            .field("rendered", &self.rendered)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<S: OverlaySurface> OverlayItem<S> {
    /// Allocate a tagged container and append it to `host`.
    pub fn create(surface: &mut S, host: S::Node, element: ElementId, class: &str) -> Self {
        let container = surface.create_element("div");
        surface.add_class(container, class);
        if !surface.append_child(host, container) {
            tracing::warn!("Overlay host missing, container for {} is detached", element);
        }
        tracing::debug!("Created overlay item for {}", element);
        Self {
            element,
            container,
            content: None,
            rendered: false,
            disposed: false,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn container(&self) -> S::Node {
        self.container
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Draw the element's content into the container.
    ///
    /// Runs once; unsupported block kinds leave the container empty.
    pub fn render(&mut self, surface: &mut S, element: &DocumentElement) {
        if self.rendered || self.disposed {
            return;
        }
        self.rendered = true;
        let Some(block) = &element.block else {
            return;
        };
        self.content = content::content_for::<S>(block);
        if let Some(content) = &self.content {
            content.render(surface, self.container);
        }
    }

    /// Position the container over the element's box on the canvas.
    ///
    /// `zoom` must be the factor current at call time.
    pub fn set_placement(
        &self,
        surface: &mut S,
        element: &DocumentElement,
        position: PagePosition,
        zoom: f64,
        metrics: PageMetrics,
    ) -> TransformResult<Placement> {
        let placement = transform::to_overlay(position, element.size(), zoom, metrics)?;
        if !self.disposed {
            surface.set_placement(self.container, placement);
        }
        Ok(placement)
    }

    /// Remove the container from the surface. Safe to call repeatedly.
    pub fn dispose(&mut self, surface: &mut S) {
        if self.disposed {
            tracing::debug!("Overlay item for {} already disposed", self.element);
            return;
        }
        self.disposed = true;
        self.content = None;
        surface.remove(self.container);
        tracing::debug!("Disposed overlay item for {}", self.element);
    }
}
