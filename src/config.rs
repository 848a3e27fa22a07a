// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! User-overridable editor options, loaded from TOML.

use crate::editing::viewport::{PageMetrics, PageScale};
use crate::error::ConfigError;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options an embedding application passes to the editor at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    #[serde(default = "default_page_height")]
    pub page_height: f64,

    #[serde(default = "default_page_gap")]
    pub page_gap: f64,

    /// Initial zoom factor
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Attribute marking editor-owned nodes outside the canvas
    #[serde(default = "default_component_marker")]
    pub component_marker: String,

    #[serde(default = "default_block_container_class")]
    pub block_container_class: String,

    #[serde(default = "default_block_item_class")]
    pub block_item_class: String,
}

fn default_page_height() -> f64 {
    settings::page::HEIGHT
}

fn default_page_gap() -> f64 {
    settings::page::GAP
}

fn default_scale() -> f64 {
    PageScale::default().factor()
}

fn default_component_marker() -> String {
    settings::surface::COMPONENT_MARKER.to_string()
}

fn default_block_container_class() -> String {
    settings::surface::BLOCK_CONTAINER_CLASS.to_string()
}

fn default_block_item_class() -> String {
    settings::surface::BLOCK_ITEM_CLASS.to_string()
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            page_height: default_page_height(),
            page_gap: default_page_gap(),
            scale: default_scale(),
            component_marker: default_component_marker(),
            block_container_class: default_block_container_class(),
            block_item_class: default_block_item_class(),
        }
    }
}

impl EditorOptions {
    /// Read options from a TOML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut options: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        options.validate();
        tracing::debug!("Loaded editor options from {}", path.display());
        Ok(options)
    }

    /// Snap the initial zoom onto the 0.1 grid inside the zoom bounds.
    pub fn validate(&mut self) {
        let snapped = PageScale::from_factor(self.scale).factor();
        if snapped != self.scale {
            tracing::warn!(
                "Initial scale {} adjusted to {} (bounds {}..={})",
                self.scale,
                snapped,
                PageScale::MIN.factor(),
                PageScale::MAX.factor()
            );
            self.scale = snapped;
        }
    }

    pub fn page_metrics(&self) -> PageMetrics {
        PageMetrics::new(self.page_height, self.page_gap)
    }

    pub fn page_scale(&self) -> PageScale {
        PageScale::from_factor(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_settings() {
        let options = EditorOptions::default();
        assert_eq!(options.page_height, settings::page::HEIGHT);
        assert_eq!(options.page_gap, settings::page::GAP);
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.component_marker, "data-editor-component");
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_height = 800.0\npage_gap = 10.0").unwrap();

        let options = EditorOptions::load(file.path()).unwrap();
        assert_eq!(options.page_height, 800.0);
        assert_eq!(options.page_gap, 10.0);
        assert_eq!(options.block_item_class, "block-item");
    }

    #[test]
    fn load_clamps_out_of_range_scale() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scale = 7.5").unwrap();

        let options = EditorOptions::load(file.path()).unwrap();
        assert_eq!(options.scale, 3.0);
    }

    #[test]
    fn validate_snaps_to_tenths() {
        let mut options = EditorOptions {
            scale: 1.26,
            ..EditorOptions::default()
        };
        options.validate();
        assert_eq!(options.scale, 1.3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorOptions::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_height = \"tall\"").unwrap();

        let err = EditorOptions::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
