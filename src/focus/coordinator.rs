// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor-wide focus coordinator.
//!
//! Two states, `Focused` and `Blurred`. A click or key-up on an editor node
//! keeps (or restores) focus and refreshes the range style. A click
//! anywhere else, or the window losing focus, blurs the editor: the caret
//! goes back to its neutral position, range visuals are cleared and every
//! transient widget is dismissed. Blurring only happens on the transition,
//! so an already blurred editor does not dismiss twice.
//!
//! Zoom wheel, visibility and pixel-density events never change the state.
//! Click, key-up and window-blur events are ignored until the caret is
//! attached.
//!
//! The coordinator starts `Unready`. `register` attaches the listener set
//! and wires the collaborators; `teardown` detaches everything. Each may
//! happen once; repeated calls are logged no-ops.

use super::classify::{EditorSurfaces, TargetClass};
use super::collaborators::{CaretVisual, Collaborators};
use super::events::{AmbientEvent, EventKind, EventOutcome, Subscriptions};
use super::observer::{
    CanvasInputObserver, CaretObserver, DismissObserver, FocusObserver, PageScaleObserver,
    RangeObserver,
};
use crate::editing::viewport::{ZoomDirection, ZoomState};
use crate::surface::NodeTree;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// Whether the editor owns input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    Focused,
    Blurred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Unready,
    Ready,
    TornDown,
}

pub struct FocusCoordinator<N> {
    surfaces: EditorSurfaces<N>,
    zoom: ZoomState,
    state: FocusState,
    lifecycle: Lifecycle,
    subscriptions: Subscriptions,
    observers: Vec<Box<dyn FocusObserver>>,
    caret_attached: bool,
}

impl<N: Copy + Eq + Debug + 'static> FocusCoordinator<N> {
    pub fn new(surfaces: EditorSurfaces<N>, zoom: ZoomState) -> Self {
        Self {
            surfaces,
            zoom,
            state: FocusState::Focused,
            lifecycle: Lifecycle::Unready,
            subscriptions: Subscriptions::default(),
            observers: Vec::new(),
            caret_attached: false,
        }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_registered(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn surfaces(&self) -> &EditorSurfaces<N> {
        &self.surfaces
    }

    /// Attach the listener set and wire collaborators.
    ///
    /// Returns `false` (and drops `collaborators`) if already registered or
    /// torn down.
    pub fn register(&mut self, collaborators: Collaborators<N>) -> bool {
        match self.lifecycle {
            Lifecycle::Ready => {
                tracing::warn!("Focus coordinator already registered; ignoring");
                return false;
            }
            Lifecycle::TornDown => {
                tracing::warn!("Focus coordinator was torn down; ignoring register");
                return false;
            }
            Lifecycle::Unready => {}
        }

        let Collaborators {
            caret,
            range,
            page,
            canvas_input,
            widgets,
        } = collaborators;

        if let Some(caret) = caret {
            self.attach_caret(caret);
        }
        self.observers.push(Box::new(RangeObserver::new(range)));
        let widget_count = widgets.len();
        for widget in widgets {
            self.observers.push(Box::new(DismissObserver::new(widget)));
        }
        self.observers
            .push(Box::new(PageScaleObserver::new(self.zoom.clone(), page)));
        self.observers
            .push(Box::new(CanvasInputObserver::new(canvas_input)));

        self.subscriptions.attach_all();
        self.lifecycle = Lifecycle::Ready;
        tracing::info!(
            "Focus coordinator registered: {} listeners, {} transient widgets, caret {}",
            self.subscriptions.len(),
            widget_count,
            if self.caret_attached { "ready" } else { "pending" }
        );
        true
    }

    /// Wire the caret once it exists. Until then focus-changing events are
    /// ignored.
    pub fn attach_caret(&mut self, caret: Rc<RefCell<dyn CaretVisual<N>>>) -> bool {
        if self.caret_attached || self.lifecycle == Lifecycle::TornDown {
            return false;
        }
        {
            let visual = caret.borrow();
            self.surfaces.caret = Some((visual.caret_node(), visual.agent_node()));
        }
        // Caret goes first so it is hidden before anything else reacts
        self.observers.insert(0, Box::new(CaretObserver::new(caret)));
        self.caret_attached = true;
        true
    }

    /// Detach every listener and release collaborators.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            tracing::debug!("Focus coordinator already torn down");
            return;
        }
        self.subscriptions.detach_all();
        self.observers.clear();
        self.lifecycle = Lifecycle::TornDown;
        tracing::info!("Focus coordinator torn down");
    }

    /// Handle one ambient event.
    pub fn dispatch<T>(&mut self, tree: &T, event: &AmbientEvent<N>) -> EventOutcome
    where
        T: NodeTree<Node = N> + ?Sized,
    {
        if self.lifecycle != Lifecycle::Ready || !self.subscriptions.is_attached(event.kind()) {
            return EventOutcome::Ignored;
        }

        match *event {
            AmbientEvent::Click { .. } | AmbientEvent::KeyUp { .. } | AmbientEvent::WindowBlur
                if !self.caret_attached =>
            {
                // Focus can't be judged before the caret exists
                tracing::trace!("{:?} ignored: caret not attached", event.kind());
                EventOutcome::Ignored
            }
            AmbientEvent::Click { target } | AmbientEvent::KeyUp { target } => {
                match self.surfaces.classify(tree, target) {
                    TargetClass::Outside => self.blur(),
                    class => {
                        tracing::trace!("{:?} target {:?} is {:?}", event.kind(), target, class);
                        self.confirm_focus();
                    }
                }
                EventOutcome::Handled
            }
            AmbientEvent::WindowBlur => {
                self.blur();
                EventOutcome::Handled
            }
            AmbientEvent::PointerUp { .. } => {
                self.notify(|o| o.on_pointer_released());
                EventOutcome::Handled
            }
            AmbientEvent::Wheel { delta_y, modifiers } => {
                if !modifiers.is_zoom() {
                    return EventOutcome::Ignored;
                }
                let direction = ZoomDirection::from_wheel_delta(delta_y);
                self.notify(|o| o.on_zoom_requested(direction));
                EventOutcome::PreventDefault
            }
            AmbientEvent::VisibilityChange { visible } => {
                if !visible {
                    return EventOutcome::Ignored;
                }
                self.notify(|o| o.on_visibility_restored());
                EventOutcome::Handled
            }
            AmbientEvent::DensityChange { ratio } => {
                tracing::debug!("Device pixel ratio changed to {}", ratio);
                self.notify(|o| o.on_density_changed());
                EventOutcome::Handled
            }
        }
    }

    fn confirm_focus(&mut self) {
        if self.state == FocusState::Blurred {
            self.state = FocusState::Focused;
            self.subscriptions.attach(EventKind::KeyUp);
            tracing::debug!("Editor focused");
        }
        self.notify(|o| o.on_focus_gained());
    }

    fn blur(&mut self) {
        if self.state == FocusState::Blurred {
            tracing::trace!("Editor already blurred");
            return;
        }
        self.state = FocusState::Blurred;
        // Key-up style refresh resumes when focus returns
        self.subscriptions.detach(EventKind::KeyUp);
        tracing::debug!("Editor blurred");
        self.notify(|o| o.on_focus_lost());
    }

    fn notify(&mut self, mut f: impl FnMut(&mut dyn FocusObserver)) {
        for observer in &mut self.observers {
            f(observer.as_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::collaborators::{CanvasInput, Dismiss, PageRenderer, RangeStyle};
    use crate::focus::events::Modifiers;
    use crate::overlay::OverlaySurface;
    use crate::surface::Surface;
    use indextree::NodeId;

    #[derive(Default)]
    struct Log {
        entries: Vec<String>,
    }

    type SharedLog = Rc<RefCell<Log>>;

    fn count(log: &SharedLog, entry: &str) -> usize {
        log.borrow().entries.iter().filter(|e| *e == entry).count()
    }

    struct Probe {
        name: &'static str,
        log: SharedLog,
        caret: NodeId,
        agent: NodeId,
    }

    impl Probe {
        fn record(&self, what: &str) {
            self.log
                .borrow_mut()
                .entries
                .push(format!("{}.{}", self.name, what));
        }
    }

    impl CaretVisual<NodeId> for Probe {
        fn caret_node(&self) -> NodeId {
            self.caret
        }
        fn agent_node(&self) -> NodeId {
            self.agent
        }
        fn recover(&mut self) {
            self.record("recover");
        }
        fn repaint(&mut self) {
            self.record("repaint");
        }
    }

    impl RangeStyle for Probe {
        fn set_range_style(&mut self) {
            self.record("set_style");
        }
        fn recover_range_style(&mut self) {
            self.record("recover_style");
        }
    }

    impl PageRenderer for Probe {
        fn set_page_scale(&mut self, scale: f64) {
            self.record(&format!("scale={scale}"));
        }
        fn set_page_device_pixel(&mut self) {
            self.record("device_pixel");
        }
    }

    impl CanvasInput for Probe {
        fn set_allow_drag(&mut self, allow: bool) {
            self.record(&format!("drag={allow}"));
        }
        fn set_allow_selection(&mut self, allow: bool) {
            self.record(&format!("selection={allow}"));
        }
    }

    impl Dismiss for Probe {
        fn dismiss(&mut self) {
            self.record("dismiss");
        }
        fn name(&self) -> &str {
            self.name
        }
    }

    struct Harness {
        surface: Surface,
        coordinator: FocusCoordinator<NodeId>,
        zoom: ZoomState,
        log: SharedLog,
        canvas: NodeId,
        caret: NodeId,
        agent: NodeId,
        toolbar_button: NodeId,
        outside: NodeId,
    }

    const WIDGETS: [&str; 4] = ["resizer", "table_tool", "hyperlink", "date_picker"];

    fn harness() -> Harness {
        let mut surface = Surface::new();
        let body = surface.body();
        let editor = surface.create_child(body, "div");
        let canvas = surface.create_child(editor, "canvas");
        let caret = surface.create_child(editor, "div");
        let agent = surface.create_child(editor, "textarea");
        let toolbar = surface.create_child(body, "div");
        surface.set_attribute(toolbar, "data-editor-component", "menu");
        let toolbar_button = surface.create_child(toolbar, "button");
        let outside = surface.create_child(body, "input");

        let zoom = ZoomState::default();
        let coordinator = FocusCoordinator::new(
            EditorSurfaces::new(canvas, body, "data-editor-component"),
            zoom.clone(),
        );
        Harness {
            surface,
            coordinator,
            zoom,
            log: Rc::new(RefCell::new(Log::default())),
            canvas,
            caret,
            agent,
            toolbar_button,
            outside,
        }
    }

    fn probe(h: &Harness, name: &'static str) -> Rc<RefCell<Probe>> {
        Rc::new(RefCell::new(Probe {
            name,
            log: h.log.clone(),
            caret: h.caret,
            agent: h.agent,
        }))
    }

    fn collaborators(h: &Harness, with_caret: bool) -> Collaborators<NodeId> {
        let mut c = Collaborators::new(probe(h, "range"), probe(h, "page"), probe(h, "canvas"));
        if with_caret {
            c = c.with_caret(probe(h, "cursor"));
        }
        for name in WIDGETS {
            c = c.with_widget(probe(h, name));
        }
        c
    }

    fn registered() -> Harness {
        let mut h = harness();
        let c = collaborators(&h, true);
        assert!(h.coordinator.register(c));
        h
    }

    fn click(h: &mut Harness, target: NodeId) -> EventOutcome {
        h.coordinator
            .dispatch(&h.surface, &AmbientEvent::Click { target })
    }

    #[test]
    fn starts_focused_and_unready() {
        let h = harness();
        assert_eq!(h.coordinator.state(), FocusState::Focused);
        assert!(!h.coordinator.is_registered());
        assert!(h.coordinator.subscriptions().is_empty());
    }

    #[test]
    fn events_before_register_are_ignored() {
        let mut h = harness();
        let outside = h.outside;
        assert_eq!(click(&mut h, outside), EventOutcome::Ignored);
        assert_eq!(h.coordinator.state(), FocusState::Focused);
    }

    #[test]
    fn inside_click_refreshes_style_without_dismissal() {
        let mut h = registered();
        let canvas = h.canvas;
        assert_eq!(click(&mut h, canvas), EventOutcome::Handled);

        assert_eq!(h.coordinator.state(), FocusState::Focused);
        assert_eq!(count(&h.log, "range.set_style"), 1);
        for name in WIDGETS {
            assert_eq!(count(&h.log, &format!("{name}.dismiss")), 0);
        }
    }

    #[test]
    fn toolbar_click_keeps_focus() {
        let mut h = registered();
        let button = h.toolbar_button;
        click(&mut h, button);
        assert_eq!(h.coordinator.state(), FocusState::Focused);
        assert_eq!(count(&h.log, "range.set_style"), 1);
    }

    #[test]
    fn outside_click_blurs_and_dismisses_each_widget_once() {
        let mut h = registered();
        let outside = h.outside;
        click(&mut h, outside);

        assert_eq!(h.coordinator.state(), FocusState::Blurred);
        assert_eq!(count(&h.log, "cursor.recover"), 1);
        assert_eq!(count(&h.log, "range.recover_style"), 1);
        for name in WIDGETS {
            assert_eq!(count(&h.log, &format!("{name}.dismiss")), 1);
        }
        // Caret is hidden before the widgets react
        assert_eq!(h.log.borrow().entries[0], "cursor.recover");
    }

    #[test]
    fn repeated_blur_does_not_dismiss_again() {
        let mut h = registered();
        let outside = h.outside;
        click(&mut h, outside);
        click(&mut h, outside);
        h.coordinator
            .dispatch(&h.surface, &AmbientEvent::WindowBlur);

        for name in WIDGETS {
            assert_eq!(count(&h.log, &format!("{name}.dismiss")), 1);
        }
    }

    #[test]
    fn window_blur_blurs() {
        let mut h = registered();
        h.coordinator
            .dispatch(&h.surface, &AmbientEvent::WindowBlur);
        assert_eq!(h.coordinator.state(), FocusState::Blurred);
        assert_eq!(count(&h.log, "date_picker.dismiss"), 1);
    }

    #[test]
    fn key_up_listener_follows_focus() {
        let mut h = registered();
        let canvas = h.canvas;
        let outside = h.outside;
        assert!(h.coordinator.subscriptions().is_attached(EventKind::KeyUp));

        click(&mut h, outside);
        assert!(!h.coordinator.subscriptions().is_attached(EventKind::KeyUp));
        let outcome = h
            .coordinator
            .dispatch(&h.surface, &AmbientEvent::KeyUp { target: canvas });
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(count(&h.log, "range.set_style"), 0);

        click(&mut h, canvas);
        assert_eq!(h.coordinator.state(), FocusState::Focused);
        assert!(h.coordinator.subscriptions().is_attached(EventKind::KeyUp));
        h.coordinator
            .dispatch(&h.surface, &AmbientEvent::KeyUp { target: canvas });
        assert_eq!(count(&h.log, "range.set_style"), 2);
    }

    #[test]
    fn caret_click_is_inside() {
        let mut h = registered();
        let caret = h.caret;
        click(&mut h, caret);
        assert_eq!(h.coordinator.state(), FocusState::Focused);
    }

    #[test]
    fn focus_events_wait_for_caret() {
        let mut h = harness();
        let c = collaborators(&h, false);
        h.coordinator.register(c);

        let outside = h.outside;
        assert_eq!(click(&mut h, outside), EventOutcome::Ignored);
        let blur = h.coordinator.dispatch(&h.surface, &AmbientEvent::WindowBlur);
        assert_eq!(blur, EventOutcome::Ignored);
        let canvas = h.canvas;
        assert_eq!(click(&mut h, canvas), EventOutcome::Ignored);

        assert_eq!(h.coordinator.state(), FocusState::Focused);
        assert_eq!(count(&h.log, "range.recover_style"), 0);
        assert_eq!(count(&h.log, "range.set_style"), 0);
        for name in WIDGETS {
            assert_eq!(count(&h.log, &format!("{name}.dismiss")), 0);
        }
    }

    #[test]
    fn caret_free_events_run_without_caret() {
        let mut h = harness();
        let c = collaborators(&h, false);
        h.coordinator.register(c);

        let canvas = h.canvas;
        h.coordinator
            .dispatch(&h.surface, &AmbientEvent::PointerUp { target: canvas });
        h.coordinator.dispatch(
            &h.surface,
            &AmbientEvent::VisibilityChange { visible: true },
        );
        assert_eq!(count(&h.log, "canvas.drag=false"), 1);
        assert_eq!(count(&h.log, "cursor.repaint"), 0);
    }

    #[test]
    fn outside_click_blurs_once_caret_attached() {
        let mut h = harness();
        let c = collaborators(&h, false);
        h.coordinator.register(c);
        let caret = probe(&h, "cursor");
        h.coordinator.attach_caret(caret);

        let outside = h.outside;
        assert_eq!(click(&mut h, outside), EventOutcome::Handled);
        assert_eq!(h.coordinator.state(), FocusState::Blurred);
        assert_eq!(count(&h.log, "cursor.recover"), 1);
        assert_eq!(count(&h.log, "resizer.dismiss"), 1);
    }

    #[test]
    fn caret_attached_later_is_recognized() {
        let mut h = harness();
        let c = collaborators(&h, false);
        h.coordinator.register(c);
        let caret = probe(&h, "cursor");
        assert!(h.coordinator.attach_caret(caret.clone()));
        assert!(!h.coordinator.attach_caret(caret));

        let caret_node = h.caret;
        click(&mut h, caret_node);
        assert_eq!(h.coordinator.state(), FocusState::Focused);
    }

    #[test]
    fn double_register_keeps_one_listener_set() {
        let mut h = harness();
        let first = collaborators(&h, true);
        let second = collaborators(&h, true);
        assert!(h.coordinator.register(first));
        assert!(!h.coordinator.register(second));
        assert_eq!(h.coordinator.subscriptions().len(), EventKind::ALL.len());

        let outside = h.outside;
        click(&mut h, outside);
        for name in WIDGETS {
            assert_eq!(count(&h.log, &format!("{name}.dismiss")), 1);
        }
        assert_eq!(count(&h.log, "cursor.recover"), 1);
    }

    #[test]
    fn teardown_detaches_everything() {
        let mut h = registered();
        h.coordinator.teardown();
        h.coordinator.teardown();

        assert!(h.coordinator.subscriptions().is_empty());
        let outside = h.outside;
        assert_eq!(click(&mut h, outside), EventOutcome::Ignored);
        assert!(h.log.borrow().entries.is_empty());

        let c = collaborators(&h, true);
        assert!(!h.coordinator.register(c));
    }

    #[test]
    fn ctrl_wheel_zooms_and_prevents_default() {
        let mut h = registered();
        let zoom_in = AmbientEvent::Wheel {
            delta_y: -100.0,
            modifiers: Modifiers::CTRL,
        };
        assert_eq!(
            h.coordinator.dispatch(&h.surface, &zoom_in),
            EventOutcome::PreventDefault
        );
        assert_eq!(h.zoom.factor(), 1.1);
        assert_eq!(count(&h.log, "page.scale=1.1"), 1);
        assert_eq!(h.coordinator.state(), FocusState::Focused);
    }

    #[test]
    fn plain_wheel_is_ignored() {
        let mut h = registered();
        let scroll = AmbientEvent::Wheel {
            delta_y: -100.0,
            modifiers: Modifiers::default(),
        };
        assert_eq!(
            h.coordinator.dispatch(&h.surface, &scroll),
            EventOutcome::Ignored
        );
        assert_eq!(h.zoom.factor(), 1.0);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut h = registered();
        let zoom_out = AmbientEvent::Wheel {
            delta_y: 100.0,
            modifiers: Modifiers::CTRL,
        };
        for _ in 0..20 {
            let outcome = h.coordinator.dispatch(&h.surface, &zoom_out);
            assert_eq!(outcome, EventOutcome::PreventDefault);
        }
        assert_eq!(h.zoom.factor(), 0.5);
        assert_eq!(count(&h.log, "page.scale=0.5"), 1);
    }

    #[test]
    fn visibility_and_density_do_not_change_state() {
        let mut h = registered();
        let outside = h.outside;
        click(&mut h, outside);

        h.coordinator.dispatch(
            &h.surface,
            &AmbientEvent::VisibilityChange { visible: false },
        );
        assert_eq!(count(&h.log, "cursor.repaint"), 0);

        h.coordinator.dispatch(
            &h.surface,
            &AmbientEvent::VisibilityChange { visible: true },
        );
        h.coordinator
            .dispatch(&h.surface, &AmbientEvent::DensityChange { ratio: 2.0 });

        assert_eq!(count(&h.log, "cursor.repaint"), 1);
        assert_eq!(count(&h.log, "page.device_pixel"), 1);
        assert_eq!(h.coordinator.state(), FocusState::Blurred);
    }

    #[test]
    fn pointer_up_stops_canvas_gestures() {
        let mut h = registered();
        let outside = h.outside;
        h.coordinator
            .dispatch(&h.surface, &AmbientEvent::PointerUp { target: outside });
        assert_eq!(count(&h.log, "canvas.drag=false"), 1);
        assert_eq!(count(&h.log, "canvas.selection=false"), 1);
        assert_eq!(h.coordinator.state(), FocusState::Focused);
    }
}
