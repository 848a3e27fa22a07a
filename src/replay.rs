// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0

//! Scripted replay of layout passes and ambient events.
//!
//! A script names its nodes and elements; steps refer to them by name. The
//! session is wired with recording collaborators, so the final report shows
//! both the overlay tree and what the focus layer asked the editor to do.
//!
//! ```toml
//! widgets = ["table tool"]
//!
//! [options]
//! page_height = 800.0
//!
//! [[nodes]]
//! name = "toolbar"
//! component = "toolbar"
//!
//! [[elements]]
//! name = "video"
//! width = 320.0
//! height = 180.0
//! block = { type = "iframe", src = "https://example.com/embed" }
//!
//! [[steps]]
//! action = "layout"
//! placements = [{ element = "video", page = 1, x = 40.0, y = 60.0 }]
//!
//! [[steps]]
//! action = "click"
//! target = "toolbar"
//! ```

use crate::config::EditorOptions;
use crate::error::ConfigError;
use crate::focus::{
    AmbientEvent, CanvasInput, CaretVisual, Collaborators, Dismiss, EventOutcome, FocusState,
    Modifiers, PageRenderer, RangeStyle,
};
use crate::model::{Block, DocumentElement, ElementId};
use crate::overlay::{ElementPlacement, OverlaySurface};
use crate::session::EditorSession;
use crate::surface::NodeSnapshot;
use anyhow::{Context, Result, anyhow};
use indextree::NodeId;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Node names every script can use without declaring them
const BUILTIN_NODES: [&str; 5] = ["body", "editor", "canvas", "caret", "agent"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub options: EditorOptions,

    /// Transient-widget owners to register, by name
    #[serde(default)]
    pub widgets: Vec<String>,

    /// Register the caret after this many steps instead of up front
    #[serde(default)]
    pub caret_after: Option<usize>,

    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    #[serde(default)]
    pub elements: Vec<ElementSpec>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// An extra host-document node
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,

    #[serde(default = "default_tag")]
    pub tag: String,

    /// Name of the parent node; `body` when omitted
    #[serde(default)]
    pub parent: Option<String>,

    /// Component marker value; unmarked when omitted
    #[serde(default)]
    pub component: Option<String>,

    /// Create the node detached from the document
    #[serde(default)]
    pub detached: bool,
}

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub name: String,
    pub width: f64,
    pub height: f64,

    #[serde(default)]
    pub block: Option<Block>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacementSpec {
    pub element: String,
    #[serde(default)]
    pub page: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Layout {
        placements: Vec<PlacementSpec>,
    },
    /// Delete an element from the document
    Delete {
        element: String,
    },
    Click {
        target: String,
    },
    KeyUp {
        target: String,
    },
    PointerUp {
        target: String,
    },
    WindowBlur,
    Wheel {
        delta_y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Visibility {
        visible: bool,
    },
    Density {
        ratio: f64,
    },
    Teardown,
}

impl Script {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut script = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        script.options.validate();
        Ok(script)
    }
}

/// Calls the focus layer made on the editor's subsystems
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallLog {
    pub range_style_set: u32,
    pub range_style_recovered: u32,
    pub page_scales: Vec<f64>,
    pub device_pixel_updates: u32,
    pub gesture_resets: u32,
    pub caret_recovered: u32,
    pub caret_repainted: u32,
    pub dismissed: BTreeMap<String, u32>,
}

impl RangeStyle for CallLog {
    fn set_range_style(&mut self) {
        self.range_style_set += 1;
    }

    fn recover_range_style(&mut self) {
        self.range_style_recovered += 1;
    }
}

impl PageRenderer for CallLog {
    fn set_page_scale(&mut self, scale: f64) {
        self.page_scales.push(scale);
    }

    fn set_page_device_pixel(&mut self) {
        self.device_pixel_updates += 1;
    }
}

impl CanvasInput for CallLog {
    fn set_allow_drag(&mut self, allow: bool) {
        if !allow {
            self.gesture_resets += 1;
        }
    }

    fn set_allow_selection(&mut self, _allow: bool) {}
}

struct RecordingCaret {
    caret: NodeId,
    agent: NodeId,
    log: Rc<RefCell<CallLog>>,
}

impl CaretVisual<NodeId> for RecordingCaret {
    fn caret_node(&self) -> NodeId {
        self.caret
    }

    fn agent_node(&self) -> NodeId {
        self.agent
    }

    fn recover(&mut self) {
        self.log.borrow_mut().caret_recovered += 1;
    }

    fn repaint(&mut self) {
        self.log.borrow_mut().caret_repainted += 1;
    }
}

struct RecordingWidget {
    name: String,
    log: Rc<RefCell<CallLog>>,
}

impl Dismiss for RecordingWidget {
    fn dismiss(&mut self) {
        *self
            .log
            .borrow_mut()
            .dismissed
            .entry(self.name.clone())
            .or_default() += 1;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Result of one replay, printed as JSON by the binary
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub focus: FocusState,
    pub scale: f64,
    pub outcomes: Vec<EventOutcome>,
    pub calls: CallLog,
    pub overlays: Option<NodeSnapshot>,
}

struct Replay {
    session: EditorSession,
    nodes: HashMap<String, NodeId>,
    elements: HashMap<String, ElementId>,
    caret: Option<Rc<RefCell<dyn CaretVisual<NodeId>>>>,
    outcomes: Vec<EventOutcome>,
}

impl Replay {
    fn new(script: &Script, log: &Rc<RefCell<CallLog>>) -> Result<Self> {
        let mut session = EditorSession::new(script.options.clone());
        let mut nodes = HashMap::new();
        nodes.insert("body".to_string(), session.surface().body());
        nodes.insert("editor".to_string(), session.root());
        nodes.insert("canvas".to_string(), session.canvas());

        // Caret nodes sit outside the editor root, like a floating caret
        let body = session.surface().body();
        let caret_node = session.surface_mut().create_child(body, "div");
        let agent_node = session.surface_mut().create_child(body, "textarea");
        nodes.insert("caret".to_string(), caret_node);
        nodes.insert("agent".to_string(), agent_node);

        for spec in &script.nodes {
            if BUILTIN_NODES.contains(&spec.name.as_str()) || nodes.contains_key(&spec.name) {
                return Err(anyhow!("node name '{}' is already taken", spec.name));
            }
            let parent = match &spec.parent {
                Some(name) => *nodes
                    .get(name)
                    .with_context(|| format!("unknown parent '{}' for node '{}'", name, spec.name))?,
                None => session.surface().body(),
            };
            let marker = session.options().component_marker.clone();
            let surface = session.surface_mut();
            let node = surface.create_child(parent, &spec.tag);
            if let Some(value) = &spec.component {
                surface.set_attribute(node, &marker, value);
            }
            if spec.detached {
                surface.detach(node);
            }
            nodes.insert(spec.name.clone(), node);
        }

        let mut elements = HashMap::new();
        for spec in &script.elements {
            let mut element = DocumentElement::new(spec.width, spec.height);
            if let Some(block) = &spec.block {
                element = element.with_block(block.clone());
            }
            if elements
                .insert(spec.name.clone(), session.insert_element(element))
                .is_some()
            {
                return Err(anyhow!("element name '{}' is declared twice", spec.name));
            }
        }

        let caret: Rc<RefCell<dyn CaretVisual<NodeId>>> = Rc::new(RefCell::new(RecordingCaret {
            caret: caret_node,
            agent: agent_node,
            log: log.clone(),
        }));
        let mut collaborators = Collaborators::new(log.clone(), log.clone(), log.clone());
        for name in &script.widgets {
            collaborators = collaborators.with_widget(Rc::new(RefCell::new(RecordingWidget {
                name: name.clone(),
                log: log.clone(),
            })));
        }
        let caret = match script.caret_after {
            Some(_) => Some(caret),
            None => {
                collaborators = collaborators.with_caret(caret);
                None
            }
        };
        session.register(collaborators);

        Ok(Self {
            session,
            nodes,
            elements,
            caret,
            outcomes: Vec::new(),
        })
    }

    fn node(&self, name: &str) -> Result<NodeId> {
        self.nodes
            .get(name)
            .copied()
            .with_context(|| format!("unknown node '{}'", name))
    }

    fn element(&self, name: &str) -> Result<ElementId> {
        self.elements
            .get(name)
            .copied()
            .with_context(|| format!("unknown element '{}'", name))
    }

    fn dispatch(&mut self, event: AmbientEvent<NodeId>) -> Result<()> {
        let outcome = self.session.dispatch(&event)?;
        self.outcomes.push(outcome);
        Ok(())
    }

    fn step(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Layout { placements } => {
                let placements = placements
                    .iter()
                    .map(|p| {
                        Ok(ElementPlacement::new(
                            self.element(&p.element)?,
                            p.page,
                            p.x,
                            p.y,
                        ))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let report = self.session.layout_pass(&placements)?;
                tracing::info!(
                    "Layout pass: {} created, {} disposed, {} placed",
                    report.created,
                    report.disposed,
                    report.placed
                );
            }
            Step::Delete { element } => {
                let id = self.element(element)?;
                self.session.remove_element(id);
            }
            Step::Click { target } => {
                let target = self.node(target)?;
                self.dispatch(AmbientEvent::Click { target })?;
            }
            Step::KeyUp { target } => {
                let target = self.node(target)?;
                self.dispatch(AmbientEvent::KeyUp { target })?;
            }
            Step::PointerUp { target } => {
                let target = self.node(target)?;
                self.dispatch(AmbientEvent::PointerUp { target })?;
            }
            Step::WindowBlur => self.dispatch(AmbientEvent::WindowBlur)?,
            Step::Wheel { delta_y, modifiers } => self.dispatch(AmbientEvent::Wheel {
                delta_y: *delta_y,
                modifiers: *modifiers,
            })?,
            Step::Visibility { visible } => {
                self.dispatch(AmbientEvent::VisibilityChange { visible: *visible })?
            }
            Step::Density { ratio } => self.dispatch(AmbientEvent::DensityChange { ratio: *ratio })?,
            Step::Teardown => self.session.teardown(),
        }
        Ok(())
    }
}

/// Run `script` against a fresh session.
pub fn run(script: &Script) -> Result<ReplayReport> {
    let log = Rc::new(RefCell::new(CallLog::default()));
    let mut replay = Replay::new(script, &log)?;

    for (index, step) in script.steps.iter().enumerate() {
        if script.caret_after == Some(index) {
            if let Some(caret) = replay.caret.take() {
                replay.session.attach_caret(caret);
            }
        }
        replay
            .step(step)
            .with_context(|| format!("step {} ({:?})", index + 1, step))?;
    }

    let report = ReplayReport {
        focus: replay.session.focus_state(),
        scale: replay.session.zoom().factor(),
        outcomes: std::mem::take(&mut replay.outcomes),
        calls: log.borrow().clone(),
        overlays: replay.session.overlay_snapshot(),
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
widgets = ["table tool", "image resizer"]

[options]
page_height = 800.0
page_gap = 10.0

[[nodes]]
name = "toolbar"
component = "toolbar"

[[nodes]]
name = "bold"
tag = "button"
parent = "toolbar"

[[nodes]]
name = "sidebar"
tag = "aside"

[[elements]]
name = "video"
width = 320.0
height = 180.0
block = { type = "iframe", src = "https://example.com/embed" }

[[elements]]
name = "paragraph"
width = 600.0
height = 40.0

[[steps]]
action = "layout"
placements = [
    { element = "video", page = 1, x = 40.0, y = 60.0 },
    { element = "paragraph", x = 40.0, y = 20.0 },
]

[[steps]]
action = "click"
target = "bold"

[[steps]]
action = "click"
target = "sidebar"

[[steps]]
action = "window_blur"

[[steps]]
action = "wheel"
delta_y = -100.0
modifiers = { ctrl = true }
"#;

    #[test]
    fn parses_and_replays() {
        let script = Script::from_toml(SCRIPT).unwrap();
        assert_eq!(script.steps.len(), 5);

        let report = run(&script).unwrap();
        assert_eq!(report.focus, FocusState::Blurred);
        assert_eq!(report.scale, 1.1);
        assert_eq!(
            report.outcomes,
            vec![
                EventOutcome::Handled,
                EventOutcome::Handled,
                EventOutcome::Handled,
                EventOutcome::PreventDefault,
            ]
        );
        assert_eq!(report.calls.range_style_set, 1);
        assert_eq!(report.calls.range_style_recovered, 1);
        assert_eq!(report.calls.caret_recovered, 1);
        assert_eq!(report.calls.dismissed.get("table tool"), Some(&1));
        assert_eq!(report.calls.page_scales, vec![1.1]);

        let overlays = report.overlays.unwrap();
        assert_eq!(overlays.children.len(), 1);
        let item = &overlays.children[0];
        let placement = item.node.placement.unwrap();
        assert_eq!(placement.top, 810.0 + 60.0);
        assert!((placement.width - 352.0).abs() < 1e-9);
    }

    #[test]
    fn report_serializes_to_json() {
        let script = Script::from_toml(SCRIPT).unwrap();
        let report = run(&script).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["focus"], "blurred");
        assert_eq!(json["outcomes"][3], "prevent_default");
    }

    #[test]
    fn unknown_target_is_an_error() {
        let script = Script::from_toml(
            r#"
[[steps]]
action = "click"
target = "nowhere"
"#,
        )
        .unwrap();
        let err = run(&script).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown node 'nowhere'"));
    }

    #[test]
    fn builtin_names_cannot_be_redeclared() {
        let script = Script::from_toml(
            r#"
[[nodes]]
name = "canvas"
"#,
        )
        .unwrap();
        assert!(run(&script).is_err());
    }

    #[test]
    fn late_caret_is_recognized_after_attach() {
        let script = Script::from_toml(
            r#"
caret_after = 2

[[steps]]
action = "click"
target = "canvas"

[[steps]]
action = "click"
target = "caret"

[[steps]]
action = "click"
target = "caret"
"#,
        )
        .unwrap();
        let report = run(&script).unwrap();
        // Clicks before the caret exists are not judged at all
        assert_eq!(
            report.outcomes,
            vec![
                EventOutcome::Ignored,
                EventOutcome::Ignored,
                EventOutcome::Handled,
            ]
        );
        assert_eq!(report.focus, FocusState::Focused);
        assert_eq!(report.calls.range_style_set, 1);
        assert_eq!(report.calls.range_style_recovered, 0);
    }

    #[test]
    fn teardown_step_stops_dispatch() {
        let script = Script::from_toml(
            r#"
[[steps]]
action = "teardown"

[[steps]]
action = "window_blur"
"#,
        )
        .unwrap();
        let report = run(&script).unwrap();
        assert_eq!(report.outcomes, vec![EventOutcome::Ignored]);
        assert!(report.overlays.is_none());
    }
}
