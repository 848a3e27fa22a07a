// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Content handlers that draw into an overlay container

use super::OverlaySurface;
use crate::model::{Block, BlockKind};
use crate::settings;

/// Something that can draw itself into a container node
pub trait BlockContent<S: OverlaySurface> {
    fn render(&self, surface: &mut S, container: S::Node);
}

/// An `iframe` filling its container
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedFrame {
    pub src: Option<String>,
    pub srcdoc: Option<String>,
}

impl EmbeddedFrame {
    pub fn from_block(block: &Block) -> Self {
        Self {
            src: block.src.clone(),
            srcdoc: block.srcdoc.clone(),
        }
    }
}

impl<S: OverlaySurface> BlockContent<S> for EmbeddedFrame {
    fn render(&self, surface: &mut S, container: S::Node) {
        let frame = surface.create_element("iframe");
        surface.set_attribute(frame, "sandbox", settings::surface::FRAME_SANDBOX);
        surface.set_attribute(frame, "style", "width:100%;height:100%;border:none");
        // srcdoc wins over src in browsers as well
        if let Some(srcdoc) = &self.srcdoc {
            surface.set_attribute(frame, "srcdoc", srcdoc);
        } else if let Some(src) = &self.src {
            surface.set_attribute(frame, "src", src);
        }
        surface.append_child(container, frame);
    }
}

/// Pick the handler for a block, or `None` for kinds without one.
pub fn content_for<S: OverlaySurface>(block: &Block) -> Option<Box<dyn BlockContent<S>>> {
    match &block.kind {
        BlockKind::Iframe => Some(Box::new(EmbeddedFrame::from_block(block))),
        BlockKind::Other(name) => {
            tracing::debug!("No overlay content for block type '{}'", name);
            None
        }
    }
}
