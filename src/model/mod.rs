// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Document element model

pub mod arena;
pub mod element;
pub mod entity_id;

pub use arena::ElementArena;
pub use element::{Block, BlockKind, DocumentElement};
pub use entity_id::ElementId;
