// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Document elements as seen by the overlay layer.
//!
//! The layout engine owns the real element; this is the subset the overlay
//! layer reads: the element's box and, for block elements, the embeddable
//! content description.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Kind of embeddable block content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    /// Embedded web frame
    Iframe,
    /// A kind this build has no content handler for
    Other(String),
}

impl From<String> for BlockKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "iframe" => BlockKind::Iframe,
            _ => BlockKind::Other(value),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Iframe => "iframe".to_string(),
            BlockKind::Other(name) => name,
        }
    }
}

/// Block payload attached to an element that is rendered as an overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,

    /// Frame URL
    #[serde(default)]
    pub src: Option<String>,

    /// Inline frame document, preferred over `src` when present
    #[serde(default)]
    pub srcdoc: Option<String>,
}

impl Block {
    pub fn iframe(src: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Iframe,
            src: Some(src.into()),
            srcdoc: None,
        }
    }
}

/// One layout-positioned unit of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentElement {
    pub width: f64,
    pub height: f64,

    #[serde(default)]
    pub block: Option<Block>,
}

impl DocumentElement {
    /// A plain element with no overlay content
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            block: None,
        }
    }

    /// Attach overlay content to this element
    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    /// Whether the overlay layer keeps an item for this element
    pub fn is_overlay_eligible(&self) -> bool {
        self.block.is_some()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
