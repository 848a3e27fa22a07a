// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor session - one editor instance on one host document.
//!
//! `EditorSession` owns the host surface, the element arena, the shared zoom
//! state, the overlay manager and the focus coordinator, and keeps them in
//! step: a zoom change coming through the coordinator re-places every
//! overlay item from the last layout pass.

use crate::config::EditorOptions;
use crate::editing::viewport::{PageMetrics, ZoomState};
use crate::error::TransformResult;
use crate::focus::{
    AmbientEvent, CaretVisual, Collaborators, EditorSurfaces, EventOutcome, FocusCoordinator,
    FocusState,
};
use crate::model::{DocumentElement, ElementArena, ElementId};
use crate::overlay::{ElementPlacement, OverlayManager, OverlaySurface, PassReport};
use crate::surface::{NodeSnapshot, Surface};
use indextree::NodeId;
use std::cell::RefCell;
use std::rc::Rc;

/// Marker value placed on the editor's own root node
const ROOT_COMPONENT: &str = "main";

pub struct EditorSession {
    options: EditorOptions,
    surface: Surface,
    arena: ElementArena,
    zoom: ZoomState,
    overlays: OverlayManager<Surface>,
    focus: FocusCoordinator<NodeId>,
    root: NodeId,
    canvas: NodeId,
    torn_down: bool,
}

impl EditorSession {
    /// Build the editor's node structure on a fresh host document.
    ///
    /// ```text
    /// body
    /// └ div [marker=main]
    ///   ├ canvas
    ///   └ div.block-container
    /// ```
    pub fn new(options: EditorOptions) -> Self {
        let mut surface = Surface::new();
        let body = surface.body();
        let root = surface.create_child(body, "div");
        surface.set_attribute(root, &options.component_marker, ROOT_COMPONENT);
        let canvas = surface.create_child(root, "canvas");

        let zoom = ZoomState::new(options.page_scale());
        let overlays = OverlayManager::new(
            &mut surface,
            root,
            &options.block_container_class,
            &options.block_item_class,
            zoom.clone(),
        );
        let focus = FocusCoordinator::new(
            EditorSurfaces::new(canvas, body, options.component_marker.clone()),
            zoom.clone(),
        );

        Self {
            options,
            surface,
            arena: ElementArena::new(),
            zoom,
            overlays,
            focus,
            root,
            canvas,
            torn_down: false,
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Host document access, for adding toolbars, caret nodes and the like
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn canvas(&self) -> NodeId {
        self.canvas
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn metrics(&self) -> PageMetrics {
        self.options.page_metrics()
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    pub fn focus(&self) -> &FocusCoordinator<NodeId> {
        &self.focus
    }

    pub fn overlays(&self) -> &OverlayManager<Surface> {
        &self.overlays
    }

    pub fn insert_element(&mut self, element: DocumentElement) -> ElementId {
        self.arena.insert(element)
    }

    /// Delete an element from the document. Its overlay item goes away on
    /// the next layout pass.
    pub fn remove_element(&mut self, id: ElementId) -> Option<DocumentElement> {
        self.arena.remove(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&DocumentElement> {
        self.arena.get(id)
    }

    pub fn register(&mut self, collaborators: Collaborators<NodeId>) -> bool {
        if self.torn_down {
            tracing::warn!("Session torn down; ignoring register");
            return false;
        }
        self.focus.register(collaborators)
    }

    pub fn attach_caret(&mut self, caret: Rc<RefCell<dyn CaretVisual<NodeId>>>) -> bool {
        self.focus.attach_caret(caret)
    }

    /// Reconcile overlays with the layout engine's output for one pass.
    pub fn layout_pass(&mut self, placements: &[ElementPlacement]) -> TransformResult<PassReport> {
        if self.torn_down {
            tracing::warn!("Session torn down; skipping layout pass");
            return Ok(PassReport::default());
        }
        let metrics = self.metrics();
        self.overlays
            .layout_pass(&mut self.surface, &self.arena, placements, metrics)
    }

    /// Route an ambient event through the focus coordinator.
    ///
    /// When the event changed the zoom, overlays are re-placed at the new
    /// factor before returning.
    pub fn dispatch(&mut self, event: &AmbientEvent<NodeId>) -> TransformResult<EventOutcome> {
        let scale_before = self.zoom.scale();
        let outcome = self.focus.dispatch(&self.surface, event);
        if self.zoom.scale() != scale_before {
            let metrics = self.metrics();
            self.overlays
                .reposition(&mut self.surface, &self.arena, metrics)?;
        }
        Ok(outcome)
    }

    /// Snapshot of the overlay host and its items
    pub fn overlay_snapshot(&self) -> Option<NodeSnapshot> {
        self.surface.snapshot(self.overlays.host())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Detach listeners and dispose every overlay. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.focus.teardown();
        self.overlays.clear(&mut self.surface);
        let host = self.overlays.host();
        self.surface.remove(host);
        self.torn_down = true;
        tracing::info!("Editor session torn down");
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
