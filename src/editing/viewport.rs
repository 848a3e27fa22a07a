// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Zoom state and page metrics shared by the overlay and focus layers.
//!
//! `PageScale` stores the zoom factor as an integer count of tenths, so a
//! step is always exactly 0.1 and bounds checks are integer comparisons.
//! `ZoomState` is the per-editor shared handle; every reader asks it for the
//! current factor at call time instead of caching one.

use crate::settings;
use std::cell::Cell;
use std::rc::Rc;

/// Direction of one discrete zoom step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel delta convention: scrolling up (negative y) zooms in.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }
}

/// A zoom factor in tenths, always inside the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageScale(u8);

impl PageScale {
    pub const MIN: PageScale = PageScale(settings::zoom::MIN_TENTHS);
    pub const MAX: PageScale = PageScale(settings::zoom::MAX_TENTHS);

    /// Build from a tenths count, clamped into bounds.
    pub fn from_tenths(tenths: u8) -> Self {
        PageScale(tenths.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Round an arbitrary factor onto the 0.1 grid and clamp it.
    ///
    /// Non-finite input falls back to the default scale.
    pub fn from_factor(factor: f64) -> Self {
        if !factor.is_finite() {
            return Self::default();
        }
        let tenths = (factor * 10.0).round().clamp(0.0, u8::MAX as f64) as u8;
        Self::from_tenths(tenths)
    }

    pub fn tenths(self) -> u8 {
        self.0
    }

    pub fn factor(self) -> f64 {
        self.0 as f64 / 10.0
    }

    /// The next scale one step in `direction`, or `None` at the bound.
    pub fn step(self, direction: ZoomDirection) -> Option<Self> {
        let next = match direction {
            ZoomDirection::In => self.0.checked_add(settings::zoom::STEP_TENTHS)?,
            ZoomDirection::Out => self.0.checked_sub(settings::zoom::STEP_TENTHS)?,
        };
        (Self::MIN.0..=Self::MAX.0)
            .contains(&next)
            .then_some(PageScale(next))
    }
}

impl Default for PageScale {
    fn default() -> Self {
        PageScale(settings::zoom::DEFAULT_TENTHS)
    }
}

/// Shared, per-editor zoom handle.
///
/// Cloning yields another handle onto the same value. Everything runs on a
/// single event loop, so a `Cell` is enough.
#[derive(Debug, Clone, Default)]
pub struct ZoomState {
    scale: Rc<Cell<PageScale>>,
}

impl ZoomState {
    pub fn new(scale: PageScale) -> Self {
        Self {
            scale: Rc::new(Cell::new(scale)),
        }
    }

    pub fn scale(&self) -> PageScale {
        self.scale.get()
    }

    pub fn factor(&self) -> f64 {
        self.scale.get().factor()
    }

    /// Apply one step. Returns the new scale if it changed.
    pub fn step(&self, direction: ZoomDirection) -> Option<PageScale> {
        let next = self.scale.get().step(direction)?;
        self.scale.set(next);
        Some(next)
    }
}

/// Vertical page metrics, constant for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub page_height: f64,
    pub page_gap: f64,
}

impl PageMetrics {
    pub fn new(page_height: f64, page_gap: f64) -> Self {
        Self {
            page_height,
            page_gap,
        }
    }

    /// Distance from the top of one page to the top of the next
    pub fn stride(&self) -> f64 {
        self.page_height + self.page_gap
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::new(settings::page::HEIGHT, settings::page::GAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_in_stops_at_max() {
        let zoom = ZoomState::default();
        let mut steps = 0;
        while zoom.step(ZoomDirection::In).is_some() {
            steps += 1;
        }
        assert_eq!(steps, 20);
        assert_eq!(zoom.scale(), PageScale::MAX);
        assert_eq!(zoom.factor(), 3.0);

        // Further steps keep the bound
        assert_eq!(zoom.step(ZoomDirection::In), None);
        assert_eq!(zoom.factor(), 3.0);
    }

    #[test]
    fn zoom_out_stops_at_min() {
        let zoom = ZoomState::default();
        for _ in 0..50 {
            zoom.step(ZoomDirection::Out);
        }
        assert_eq!(zoom.scale(), PageScale::MIN);
        assert_eq!(zoom.factor(), 0.5);
    }

    #[test]
    fn repeated_steps_do_not_drift() {
        let zoom = ZoomState::default();
        for _ in 0..7 {
            zoom.step(ZoomDirection::In);
        }
        for _ in 0..7 {
            zoom.step(ZoomDirection::Out);
        }
        assert_eq!(zoom.factor(), 1.0);

        zoom.step(ZoomDirection::In);
        zoom.step(ZoomDirection::In);
        zoom.step(ZoomDirection::In);
        assert_eq!(zoom.factor(), 1.3);
    }

    #[test]
    fn clones_share_state() {
        let zoom = ZoomState::default();
        let other = zoom.clone();
        zoom.step(ZoomDirection::In);
        assert_eq!(other.factor(), 1.1);
    }

    #[test]
    fn from_factor_rounds_and_clamps() {
        assert_eq!(PageScale::from_factor(0.1), PageScale::MIN);
        assert_eq!(PageScale::from_factor(10.0), PageScale::MAX);
        assert_eq!(PageScale::from_factor(1.44).tenths(), 14);
        assert_eq!(PageScale::from_factor(f64::NAN), PageScale::default());
    }

    #[test]
    fn wheel_direction() {
        assert_eq!(ZoomDirection::from_wheel_delta(-120.0), ZoomDirection::In);
        assert_eq!(ZoomDirection::from_wheel_delta(120.0), ZoomDirection::Out);
    }

    #[test]
    fn page_stride() {
        assert_eq!(PageMetrics::new(800.0, 20.0).stride(), 820.0);
    }
}
