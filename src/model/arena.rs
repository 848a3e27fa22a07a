// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Element arena keyed by `ElementId`.

use super::{DocumentElement, ElementId};
use std::collections::BTreeMap;

/// Document elements indexed by stable identity.
///
/// Overlay items hold only the key; a removed element simply stops
/// resolving, so no handle can dangle.
#[derive(Debug, Clone, Default)]
pub struct ElementArena {
    elements: BTreeMap<ElementId, DocumentElement>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element under a fresh id
    pub fn insert(&mut self, element: DocumentElement) -> ElementId {
        let id = ElementId::next();
        self.elements.insert(id, element);
        id
    }

    pub fn remove(&mut self, id: ElementId) -> Option<DocumentElement> {
        self.elements.remove(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&DocumentElement> {
        self.elements.get(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &DocumentElement)> {
        self.elements.iter().map(|(id, element)| (*id, element))
    }
}
