// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Page geometry: zoom state and the document-to-overlay transform

pub mod transform;
pub mod viewport;

pub use transform::{PagePosition, Placement, to_overlay};
pub use viewport::{PageMetrics, PageScale, ZoomDirection, ZoomState};
