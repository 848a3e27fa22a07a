// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Interfaces of the editor subsystems the focus coordinator drives.
//!
//! The coordinator never draws anything itself. It only calls these
//! operations; what they repaint is up to the implementations.

use std::cell::RefCell;
use std::rc::Rc;

/// Caret visual state
pub trait CaretVisual<N> {
    /// The node showing the blinking caret
    fn caret_node(&self) -> N;

    /// The hidden input agent that receives IME/keyboard input
    fn agent_node(&self) -> N;

    /// Move the caret to its neutral, hidden position
    fn recover(&mut self);

    /// Redraw the caret at its current position
    fn repaint(&mut self);
}

/// Highlighted-range visuals
pub trait RangeStyle {
    /// Re-apply toolbar/range style for the active range
    fn set_range_style(&mut self);

    /// Drop active-range visuals
    fn recover_range_style(&mut self);
}

/// Page scale and device-pixel handling of the rendering surface
pub trait PageRenderer {
    fn set_page_scale(&mut self, scale: f64);

    /// Recompute device pixel scaling for the page canvases
    fn set_page_device_pixel(&mut self);
}

/// Canvas gesture flags
pub trait CanvasInput {
    fn set_allow_drag(&mut self, allow: bool);
    fn set_allow_selection(&mut self, allow: bool);
}

/// A transient-widget owner (resize handles, table tool, popups, pickers).
///
/// `dismiss` must be idempotent: tear down whatever is showing and return
/// to steady state.
pub trait Dismiss {
    fn dismiss(&mut self);

    /// Name used in logs
    fn name(&self) -> &str {
        "transient widget"
    }
}

/// Everything `FocusCoordinator::register` wires up.
///
/// `caret` may be `None` when the caret subsystem is created later; see
/// `FocusCoordinator::attach_caret`.
pub struct Collaborators<N> {
    pub caret: Option<Rc<RefCell<dyn CaretVisual<N>>>>,
    pub range: Rc<RefCell<dyn RangeStyle>>,
    pub page: Rc<RefCell<dyn PageRenderer>>,
    pub canvas_input: Rc<RefCell<dyn CanvasInput>>,
    pub widgets: Vec<Rc<RefCell<dyn Dismiss>>>,
}

impl<N> Collaborators<N> {
    pub fn new(
        range: Rc<RefCell<dyn RangeStyle>>,
        page: Rc<RefCell<dyn PageRenderer>>,
        canvas_input: Rc<RefCell<dyn CanvasInput>>,
    ) -> Self {
        Self {
            caret: None,
            range,
            page,
            canvas_input,
            widgets: Vec::new(),
        }
    }

    pub fn with_caret(mut self, caret: Rc<RefCell<dyn CaretVisual<N>>>) -> Self {
        self.caret = Some(caret);
        self
    }

    pub fn with_widget(mut self, widget: Rc<RefCell<dyn Dismiss>>) -> Self {
        self.widgets.push(widget);
        self
    }
}
