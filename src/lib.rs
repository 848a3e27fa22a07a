// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Folio: overlay placement and focus coordination for a canvas-paginated
//! document editor.
//!
//! Rich embedded content (web frames) cannot be painted into the page
//! canvas, so it is laid out by the canvas engine and then shown in
//! absolutely positioned overlay nodes kept in step with the canvas
//! geometry. The focus coordinator decides whether the editor owns input
//! focus from events arriving anywhere in the host document.

use anyhow::Context;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod editing;
pub mod error;
pub mod focus;
pub mod model;
pub mod overlay;
pub mod replay;
pub mod session;
pub mod settings;
pub mod surface;

pub use config::EditorOptions;
pub use error::{ConfigError, TransformError, TransformResult};
pub use session::EditorSession;

/// Entry point for the replay binary
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("folio=info".parse()?))
        .init();

    let Some(script_path) = handle_command_line_args() else {
        return Ok(());
    };

    tracing::info!("Replaying script: {}", script_path.display());
    let script = replay::Script::load(&script_path)?;
    let report = replay::run(&script)
        .with_context(|| format!("replay of {} failed", script_path.display()))?;
    let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    println!("{}", json);
    Ok(())
}

/// Handle command-line arguments: the path of a replay script
fn handle_command_line_args() -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() <= 1 {
        tracing::error!("Usage: folio <script.toml>");
        return None;
    }

    let script_path = PathBuf::from(&args[1]);
    if script_path.exists() {
        Some(script_path)
    } else {
        tracing::error!("Path does not exist: {}", script_path.display());
        tracing::error!("Usage: folio <script.toml>");
        None
    }
}
