// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Focus observers and the collaborator adapters built on them.
//!
//! The coordinator decides *what* happened (focus confirmed, focus lost,
//! zoom requested...) and fans the decision out to every observer. Each
//! collaborator the editor already has (caret, range highlighter, page
//! renderer, popups) is wrapped in a small adapter that reacts to the
//! notifications it cares about and ignores the rest.

use super::collaborators::{CanvasInput, CaretVisual, Dismiss, PageRenderer, RangeStyle};
use crate::editing::viewport::{ZoomDirection, ZoomState};
use std::cell::RefCell;
use std::rc::Rc;

/// Receiver of focus lifecycle notifications. All methods default to no-ops.
pub trait FocusObserver {
    /// An event confirmed that the editor holds focus.
    fn on_focus_gained(&mut self) {}

    /// The editor lost focus.
    fn on_focus_lost(&mut self) {}

    /// A modifier-wheel asked for one zoom step.
    fn on_zoom_requested(&mut self, _direction: ZoomDirection) {}

    /// The document became visible again.
    fn on_visibility_restored(&mut self) {}

    /// The device pixel ratio changed.
    fn on_density_changed(&mut self) {}

    /// A pointer button was released anywhere in the document.
    fn on_pointer_released(&mut self) {}
}

/// Hides the caret on blur and repaints it when the page becomes visible
pub struct CaretObserver<N> {
    caret: Rc<RefCell<dyn CaretVisual<N>>>,
}

impl<N> CaretObserver<N> {
    pub fn new(caret: Rc<RefCell<dyn CaretVisual<N>>>) -> Self {
        Self { caret }
    }
}

impl<N> FocusObserver for CaretObserver<N> {
    fn on_focus_lost(&mut self) {
        self.caret.borrow_mut().recover();
    }

    fn on_visibility_restored(&mut self) {
        // Blink timers may have been paused while hidden
        self.caret.borrow_mut().repaint();
    }
}

/// Refreshes the active range while focused, clears it on blur
pub struct RangeObserver {
    range: Rc<RefCell<dyn RangeStyle>>,
}

impl RangeObserver {
    pub fn new(range: Rc<RefCell<dyn RangeStyle>>) -> Self {
        Self { range }
    }
}

impl FocusObserver for RangeObserver {
    fn on_focus_gained(&mut self) {
        self.range.borrow_mut().set_range_style();
    }

    fn on_focus_lost(&mut self) {
        self.range.borrow_mut().recover_range_style();
    }
}

/// Tears down one transient widget on blur
pub struct DismissObserver {
    owner: Rc<RefCell<dyn Dismiss>>,
}

impl DismissObserver {
    pub fn new(owner: Rc<RefCell<dyn Dismiss>>) -> Self {
        Self { owner }
    }
}

impl FocusObserver for DismissObserver {
    fn on_focus_lost(&mut self) {
        let mut owner = self.owner.borrow_mut();
        tracing::debug!("Dismissing {}", owner.name());
        owner.dismiss();
    }
}

/// Applies zoom steps and density changes to the page renderer
pub struct PageScaleObserver {
    zoom: ZoomState,
    renderer: Rc<RefCell<dyn PageRenderer>>,
}

impl PageScaleObserver {
    pub fn new(zoom: ZoomState, renderer: Rc<RefCell<dyn PageRenderer>>) -> Self {
        Self { zoom, renderer }
    }
}

impl FocusObserver for PageScaleObserver {
    fn on_zoom_requested(&mut self, direction: ZoomDirection) {
        match self.zoom.step(direction) {
            Some(scale) => {
                tracing::info!("Zoom {:?}: new scale = {:.1}", direction, scale.factor());
                self.renderer.borrow_mut().set_page_scale(scale.factor());
            }
            None => {
                tracing::debug!("Zoom {:?} ignored at bound {:.1}", direction, self.zoom.factor());
            }
        }
    }

    fn on_density_changed(&mut self) {
        self.renderer.borrow_mut().set_page_device_pixel();
    }
}

/// Ends canvas drag and selection gestures when the pointer is released
pub struct CanvasInputObserver {
    input: Rc<RefCell<dyn CanvasInput>>,
}

impl CanvasInputObserver {
    pub fn new(input: Rc<RefCell<dyn CanvasInput>>) -> Self {
        Self { input }
    }
}

impl FocusObserver for CanvasInputObserver {
    fn on_pointer_released(&mut self) {
        let mut input = self.input.borrow_mut();
        input.set_allow_drag(false);
        input.set_allow_selection(false);
    }
}
