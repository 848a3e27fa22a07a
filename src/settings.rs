// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor settings and configuration constants.
//!
//! This module holds compile-time defaults. Values a user may override at
//! startup (page size, initial zoom, marker attribute) live in `config.rs`
//! and fall back to the constants here.

// ============================================================================
// ZOOM SETTINGS
// ============================================================================
// Zoom is stored in tenths so that repeated steps never drift.

/// Minimum zoom level in tenths (0.5x)
const MIN_SCALE_TENTHS: u8 = 5;

/// Maximum zoom level in tenths (3.0x)
const MAX_SCALE_TENTHS: u8 = 30;

/// Default zoom level in tenths (1.0x)
const DEFAULT_SCALE_TENTHS: u8 = 10;

/// One wheel notch changes the zoom by this many tenths
const SCALE_STEP_TENTHS: u8 = 1;

// ============================================================================
// PAGE SETTINGS
// ============================================================================
/// Default page height in document pixels (A4 at 96 dpi)
const PAGE_HEIGHT: f64 = 1123.0;

/// Default vertical gap between stacked pages
const PAGE_GAP: f64 = 20.0;

// ============================================================================
// SURFACE SETTINGS
// ============================================================================
/// Attribute that marks a node outside the canvas as part of the editor
const COMPONENT_MARKER: &str = "data-editor-component";

/// Class of the node that hosts every overlay item
const BLOCK_CONTAINER_CLASS: &str = "block-container";

/// Class applied to each overlay item container
const BLOCK_ITEM_CLASS: &str = "block-item";

/// Sandbox policy for embedded frames
const FRAME_SANDBOX: &str = "allow-scripts allow-same-origin";

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Zoom bounds and step size
pub mod zoom {
    /// Minimum zoom level in tenths (0.5x)
    pub const MIN_TENTHS: u8 = super::MIN_SCALE_TENTHS;

    /// Maximum zoom level in tenths (3.0x)
    pub const MAX_TENTHS: u8 = super::MAX_SCALE_TENTHS;

    /// Default zoom level in tenths
    pub const DEFAULT_TENTHS: u8 = super::DEFAULT_SCALE_TENTHS;

    /// Tenths added or removed per zoom step
    pub const STEP_TENTHS: u8 = super::SCALE_STEP_TENTHS;
}

/// Default page metrics used when no configuration overrides them
pub mod page {
    pub const HEIGHT: f64 = super::PAGE_HEIGHT;
    pub const GAP: f64 = super::PAGE_GAP;
}

/// Names used on the host document and overlay surface
pub mod surface {
    /// Editor component marker attribute
    pub const COMPONENT_MARKER: &str = super::COMPONENT_MARKER;

    /// Overlay host class
    pub const BLOCK_CONTAINER_CLASS: &str = super::BLOCK_CONTAINER_CLASS;

    /// Overlay item class
    pub const BLOCK_ITEM_CLASS: &str = super::BLOCK_ITEM_CLASS;

    /// `sandbox` attribute value for embedded frames
    pub const FRAME_SANDBOX: &str = super::FRAME_SANDBOX;
}
