use std::path::PathBuf;

use crate::editor::view::{
    PathTreeView, SegmentRef, SegmentView, build_tree_view, check_segment_tree, segment_view,
};
use crate::foundation::{
    config::PathsConfig,
    error::{PathError, PathResult},
    value::PathValue,
};
use crate::model::paths::{DebugOverlay, PathModel};
use crate::path::tree::PathTree;

#[derive(Clone, Debug, PartialEq)]
/// Input accepted by [`PathEditor::handle`].
pub enum EditorCommand {
    /// Rebuild the tree from the model and drop the selection.
    Display,
    /// Select a primitive and show its fields.
    Select(SegmentRef),
    /// Change the duration of the selected primitive.
    SetDuration(f64),
    /// Change one component of one control point of the selected primitive.
    SetControlPoint {
        /// Control point index.
        row: usize,
        /// Component index (`0` for scalars, `0..3` for vectors).
        component: usize,
        /// New component value.
        value: f64,
    },
    /// Show or hide the debug trajectory of the selected primitive's role.
    SetDebugLineVisible(bool),
    /// Replace the model with a user-edited path document. Roles missing from it are removed.
    ApplyText(String),
    /// Write the model to the configured document.
    Save,
    /// Merge the configured document into the model.
    Load,
}

#[derive(Clone, Debug, PartialEq)]
/// Output produced by [`PathEditor::handle`].
pub enum EditorEvent {
    /// The displayed tree was rebuilt.
    TreeRebuilt(PathTreeView),
    /// Fields of the selected primitive.
    SegmentShown(SegmentView),
    /// Path values changed; dependents should re-evaluate.
    PathChanged,
    /// Debug trajectories were pushed to the overlay.
    DebugLinesRefreshed,
    /// The model was written to this file.
    Saved(PathBuf),
    /// The model was loaded from this file.
    Loaded(PathBuf),
}

/// Headless path editor.
///
/// The editor never owns the model: every command borrows the model and the debug overlay of
/// the controller that does. Edit commands issued without a selection do nothing.
#[derive(Debug)]
pub struct PathEditor {
    config: PathsConfig,
    view: PathTreeView,
    selected: Option<SegmentRef>,
}

impl PathEditor {
    /// Editor using `config` for load/save and debug trajectories.
    pub fn new(config: PathsConfig) -> Self {
        Self {
            config,
            view: PathTreeView::default(),
            selected: None,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &PathsConfig {
        &self.config
    }

    /// Last displayed tree.
    pub fn view(&self) -> &PathTreeView {
        &self.view
    }

    /// Last selected primitive.
    pub fn selected(&self) -> Option<&SegmentRef> {
        self.selected.as_ref()
    }

    /// Apply one command.
    pub fn handle(
        &mut self,
        model: &mut PathModel,
        overlay: &mut dyn DebugOverlay,
        cmd: EditorCommand,
    ) -> PathResult<Vec<EditorEvent>> {
        match cmd {
            EditorCommand::Display => Ok(self.display(model)),
            EditorCommand::Select(segment) => {
                let shown = segment_view(model, &segment)?;
                self.selected = Some(segment);
                Ok(vec![EditorEvent::SegmentShown(shown)])
            }
            EditorCommand::SetDuration(duration) => self.set_duration(model, duration),
            EditorCommand::SetControlPoint {
                row,
                component,
                value,
            } => self.set_control_point(model, overlay, row, component, value),
            EditorCommand::SetDebugLineVisible(visible) => {
                let Some(selected) = &self.selected else {
                    return Ok(Vec::new());
                };
                model.set_debug_line_visibility(&selected.role, visible);
                model.refresh_debug_lines(overlay, self.config.debug_line_samples);
                Ok(vec![EditorEvent::DebugLinesRefreshed])
            }
            EditorCommand::ApplyText(text) => match model.replace_with_document(&text) {
                Ok(()) => {
                    tracing::info!("new path tree successfully parsed");
                    Ok(self.display(model))
                }
                Err(e) => {
                    tracing::error!(error = %e, "the edited path tree contained errors");
                    Err(e)
                }
            },
            EditorCommand::Save => {
                model.save(&self.config)?;
                Ok(vec![EditorEvent::Saved(self.config.path_file.clone())])
            }
            EditorCommand::Load => {
                model.load(&self.config)?;
                let mut events = vec![EditorEvent::Loaded(self.config.path_file.clone())];
                events.extend(self.display(model));
                Ok(events)
            }
        }
    }

    fn display(&mut self, model: &PathModel) -> Vec<EditorEvent> {
        self.selected = None;
        self.view = build_tree_view(model);
        vec![
            EditorEvent::TreeRebuilt(self.view.clone()),
            EditorEvent::PathChanged,
        ]
    }

    fn set_duration(&mut self, model: &mut PathModel, duration: f64) -> PathResult<Vec<EditorEvent>> {
        let Some(selected) = &self.selected else {
            return Ok(Vec::new());
        };
        if let Some(tree) = model.scalar_mut(&selected.role) {
            check_segment_tree(tree, selected)?;
            tree.set_duration(selected.node, duration)?;
        } else if let Some(tree) = model.vector_mut(&selected.role) {
            check_segment_tree(tree, selected)?;
            tree.set_duration(selected.node, duration)?;
        } else {
            return Err(unknown_role(selected));
        }
        Ok(vec![EditorEvent::PathChanged])
    }

    fn set_control_point(
        &mut self,
        model: &mut PathModel,
        overlay: &mut dyn DebugOverlay,
        row: usize,
        component: usize,
        value: f64,
    ) -> PathResult<Vec<EditorEvent>> {
        let Some(selected) = &self.selected else {
            return Ok(Vec::new());
        };
        if !value.is_finite() {
            return Err(PathError::validation(format!(
                "control point values must be finite (got {value})"
            )));
        }
        if let Some(tree) = model.scalar_mut(&selected.role) {
            set_component(tree, selected, row, component, value)?;
        } else if let Some(tree) = model.vector_mut(&selected.role) {
            set_component(tree, selected, row, component, value)?;
        } else {
            return Err(unknown_role(selected));
        }

        let mut events = vec![EditorEvent::PathChanged];
        if model.is_debug_line_visible(&selected.role) {
            model.refresh_debug_lines(overlay, self.config.debug_line_samples);
            events.push(EditorEvent::DebugLinesRefreshed);
        }
        Ok(events)
    }
}

fn set_component<T: PathValue>(
    tree: &mut PathTree<T>,
    selected: &SegmentRef,
    row: usize,
    component: usize,
    value: f64,
) -> PathResult<()> {
    check_segment_tree(tree, selected)?;
    if component >= T::COMPONENT_LABELS.len() {
        return Err(PathError::validation(format!(
            "component {component} out of range for {} data",
            T::DATA_TAG
        )));
    }
    let mut pt = tree
        .ctrl_pts(selected.node)
        .get(row)
        .copied()
        .ok_or_else(|| PathError::validation(format!("no control point {row} in selection")))?;
    pt.set_component(component, value);
    tree.set_ctrl_pt(selected.node, row, pt)
}

fn unknown_role(selected: &SegmentRef) -> PathError {
    PathError::validation(format!("unknown role {}", selected.role))
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
