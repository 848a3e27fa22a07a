// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Overlay item collection driven by layout passes.
//!
//! Per pass: create and render items for newly seen eligible elements,
//! dispose items whose element is gone, then place every live item. Within
//! one item the order is always create, render, place.

use super::OverlaySurface;
use super::item::OverlayItem;
use crate::editing::transform::PagePosition;
use crate::editing::viewport::{PageMetrics, ZoomState};
use crate::error::TransformResult;
use crate::model::{ElementArena, ElementId};
use std::collections::{BTreeMap, BTreeSet};

/// Where the layout engine put one element in this pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementPlacement {
    pub element: ElementId,
    pub position: PagePosition,
}

impl ElementPlacement {
    pub fn new(element: ElementId, page_no: usize, x: f64, y: f64) -> Self {
        Self {
            element,
            position: PagePosition::new(page_no, x, y),
        }
    }
}

/// What one layout pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub created: usize,
    pub disposed: usize,
    pub placed: usize,
}

pub struct OverlayManager<S: OverlaySurface> {
    host: S::Node,
    item_class: String,
    zoom: ZoomState,
    items: BTreeMap<ElementId, OverlayItem<S>>,
    /// Positions from the most recent pass, reused by `reposition`
    last_pass: Vec<ElementPlacement>,
}

impl<S: OverlaySurface> OverlayManager<S> {
    /// Create the overlay host under `parent`.
    pub fn new(
        surface: &mut S,
        parent: S::Node,
        container_class: &str,
        item_class: &str,
        zoom: ZoomState,
    ) -> Self {
        let host = surface.create_element("div");
        surface.add_class(host, container_class);
        surface.append_child(parent, host);
        Self {
            host,
            item_class: item_class.to_string(),
            zoom,
            items: BTreeMap::new(),
            last_pass: Vec::new(),
        }
    }

    pub fn host(&self) -> S::Node {
        self.host
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, element: ElementId) -> Option<&OverlayItem<S>> {
        self.items.get(&element)
    }

    pub fn items(&self) -> impl Iterator<Item = &OverlayItem<S>> {
        self.items.values()
    }

    /// Reconcile items with one layout pass.
    ///
    /// Placement errors abort the pass; items created so far stay and are
    /// placed again by the next successful pass.
    pub fn layout_pass(
        &mut self,
        surface: &mut S,
        arena: &ElementArena,
        placements: &[ElementPlacement],
        metrics: PageMetrics,
    ) -> TransformResult<PassReport> {
        let mut report = PassReport::default();

        let present: BTreeSet<ElementId> = placements
            .iter()
            .filter(|p| arena.get(p.element).is_some_and(|e| e.is_overlay_eligible()))
            .map(|p| p.element)
            .collect();

        let stale: Vec<ElementId> = self
            .items
            .keys()
            .filter(|id| !present.contains(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(mut item) = self.items.remove(&id) {
                item.dispose(surface);
                report.disposed += 1;
            }
        }

        let zoom = self.zoom.factor();
        for placement in placements {
            let Some(element) = arena.get(placement.element) else {
                continue;
            };
            if !element.is_overlay_eligible() {
                continue;
            }
            let item = match self.items.entry(placement.element) {
                std::collections::btree_map::Entry::Occupied(entry) => entry.into_mut(),
                std::collections::btree_map::Entry::Vacant(entry) => {
                    let mut item =
                        OverlayItem::create(surface, self.host, placement.element, &self.item_class);
                    item.render(surface, element);
                    report.created += 1;
                    entry.insert(item)
                }
            };
            item.set_placement(surface, element, placement.position, zoom, metrics)?;
            report.placed += 1;
        }

        self.last_pass = placements.to_vec();
        tracing::debug!(
            "Overlay pass: created={}, disposed={}, placed={}, live={}",
            report.created,
            report.disposed,
            report.placed,
            self.items.len()
        );
        Ok(report)
    }

    /// Re-place items from the last pass, e.g. after a zoom change.
    pub fn reposition(
        &mut self,
        surface: &mut S,
        arena: &ElementArena,
        metrics: PageMetrics,
    ) -> TransformResult<PassReport> {
        let placements = std::mem::take(&mut self.last_pass);
        let result = self.layout_pass(surface, arena, &placements, metrics);
        if result.is_err() {
            self.last_pass = placements;
        }
        result
    }

    /// Dispose the item for one element, outside of a layout pass.
    pub fn remove(&mut self, surface: &mut S, element: ElementId) -> bool {
        match self.items.remove(&element) {
            Some(mut item) => {
                item.dispose(surface);
                true
            }
            None => false,
        }
    }

    /// Dispose every item.
    pub fn clear(&mut self, surface: &mut S) {
        for (_, mut item) in std::mem::take(&mut self.items) {
            item.dispose(surface);
        }
        self.last_pass.clear();
    }
}
