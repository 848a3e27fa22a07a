// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Stable identifiers for document elements.
//!
//! Each `ElementId` is a monotonically increasing `u64` generated from a
//! global atomic counter. Overlay items store the id instead of a reference
//! to the element, and the overlay manager resolves it against the arena on
//! every layout pass. Ids are never reused within a session, so a deleted
//! element can never be confused with a newer one.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a layout-positioned document element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElementId(u64);

static ELEMENT_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ElementId {
    /// Create a new unique element ID
    pub fn next() -> Self {
        Self(ELEMENT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::next()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el#{}", self.0)
    }
}
