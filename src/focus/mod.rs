// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Global input-focus coordination

pub mod classify;
pub mod collaborators;
pub mod coordinator;
pub mod events;
pub mod observer;

pub use classify::{EditorSurfaces, TargetClass};
pub use collaborators::{CanvasInput, CaretVisual, Collaborators, Dismiss, PageRenderer, RangeStyle};
pub use coordinator::{FocusCoordinator, FocusState};
pub use events::{AmbientEvent, EventKind, EventOutcome, Modifiers, Subscriptions};
pub use observer::FocusObserver;
