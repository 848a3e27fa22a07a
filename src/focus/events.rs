// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Ambient input events and the listener set they are filtered through

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keyboard modifiers held during a wheel event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl Modifiers {
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
        alt: false,
    };

    /// Ctrl+wheel zooms; trackpad pinch gestures arrive the same way.
    pub fn is_zoom(&self) -> bool {
        self.ctrl
    }
}

/// An event arriving from outside the canvas, addressed at node type `N`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmbientEvent<N> {
    Click { target: N },
    KeyUp { target: N },
    PointerUp { target: N },
    /// The window lost focus
    WindowBlur,
    Wheel { delta_y: f64, modifiers: Modifiers },
    VisibilityChange { visible: bool },
    /// Device pixel ratio changed (monitor switch, browser zoom)
    DensityChange { ratio: f64 },
}

impl<N> AmbientEvent<N> {
    pub fn kind(&self) -> EventKind {
        match self {
            AmbientEvent::Click { .. } => EventKind::Click,
            AmbientEvent::KeyUp { .. } => EventKind::KeyUp,
            AmbientEvent::PointerUp { .. } => EventKind::PointerUp,
            AmbientEvent::WindowBlur => EventKind::WindowBlur,
            AmbientEvent::Wheel { .. } => EventKind::Wheel,
            AmbientEvent::VisibilityChange { .. } => EventKind::VisibilityChange,
            AmbientEvent::DensityChange { .. } => EventKind::DensityChange,
        }
    }
}

/// Listener slot an event is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Click,
    KeyUp,
    PointerUp,
    WindowBlur,
    Wheel,
    VisibilityChange,
    DensityChange,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::WindowBlur,
        EventKind::KeyUp,
        EventKind::Click,
        EventKind::PointerUp,
        EventKind::Wheel,
        EventKind::VisibilityChange,
        EventKind::DensityChange,
    ];
}

/// What the host should do with the event after dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// No listener attached, or a guard returned early
    Ignored,
    Handled,
    /// Handled, and the host must suppress its default action
    PreventDefault,
}

/// The set of attached ambient listeners.
///
/// A set, not a list: attaching twice leaves one listener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subscriptions {
    attached: BTreeSet<EventKind>,
}

impl Subscriptions {
    pub fn attach(&mut self, kind: EventKind) -> bool {
        self.attached.insert(kind)
    }

    pub fn detach(&mut self, kind: EventKind) -> bool {
        self.attached.remove(&kind)
    }

    pub fn attach_all(&mut self) {
        self.attached.extend(EventKind::ALL);
    }

    pub fn detach_all(&mut self) {
        self.attached.clear();
    }

    pub fn is_attached(&self, kind: EventKind) -> bool {
        self.attached.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}
