// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Document-to-overlay coordinate transform.
//!
//! Pages stack vertically with a fixed gap, so a page-relative `y` becomes
//! absolute by adding `page_no * (page_height + page_gap)`. The layout engine
//! hands us `x` and `y` already scaled for zoom; only the element's own box
//! is multiplied by the zoom factor here.

use super::viewport::PageMetrics;
use crate::error::{TransformError, TransformResult};
use kurbo::Size;
use serde::Serialize;

/// Absolute box of an overlay container on the overlay surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Where an element sits inside its page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePosition {
    pub page_no: usize,
    pub x: f64,
    pub y: f64,
}

impl PagePosition {
    pub fn new(page_no: usize, x: f64, y: f64) -> Self {
        Self { page_no, x, y }
    }
}

/// Map a page-relative element box onto the overlay surface.
///
/// Fails on a non-positive zoom factor or negative page metrics; these are
/// layout-engine bugs and are never clamped.
pub fn to_overlay(
    position: PagePosition,
    element: Size,
    zoom: f64,
    metrics: PageMetrics,
) -> TransformResult<Placement> {
    if zoom.is_nan() || zoom <= 0.0 {
        return Err(TransformError::NonPositiveZoom(zoom));
    }
    if metrics.page_height < 0.0 {
        return Err(TransformError::NegativePageHeight(metrics.page_height));
    }
    if metrics.page_gap < 0.0 {
        return Err(TransformError::NegativePageGap(metrics.page_gap));
    }
    let finite = [
        zoom,
        metrics.page_height,
        metrics.page_gap,
        position.x,
        position.y,
        element.width,
        element.height,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite {
        return Err(TransformError::NonFiniteInput);
    }

    let page_top = position.page_no as f64 * metrics.stride();
    Ok(Placement {
        left: position.x,
        top: page_top + position.y,
        width: element.width * zoom,
        height: element.height * zoom,
    })
}
