//! Animpath is a keyframe path library for driving scene animation.
//!
//! A path maps a time in seconds to a value (a scalar or a 3D vector). Paths are built from a
//! small set of primitives chained end to end by composites:
//!
//! - [`PointPath`]: a constant held for a duration
//! - [`LinearPath`]: interpolation between two points
//! - [`CubicSplinePath`] / [`BasisSplinePath`]: uniform Catmull-Rom and B-spline curves
//! - [`CompositePath`]: sub-paths played one after the other, stored in a [`PathTree`]
//!
//! A [`PathModel`] binds one tree per named role ([`Role`]) and reads/writes them as a JSON path
//! document. [`PathEditor`] is a headless command/event front end over a model, and
//! [`Choreographer`] turns wall-clock ticks into animation frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod editor;
mod foundation;
mod model;
mod path;
mod playback;

pub use glam::DVec3;

pub use crate::foundation::config::PathsConfig;
pub use crate::foundation::error::{PathError, PathResult};
pub use crate::foundation::value::PathValue;

pub use crate::path::primitive::{LinearPath, PointPath};
pub use crate::path::spline::{BasisSplinePath, CubicSplinePath, MIN_SPLINE_CTRL_PTS};
pub use crate::path::tree::{CompositePath, NodeId, PathKind, PathNode, PathTree, TreeId};
pub use crate::path::visit::{PathVisitor, walk, walk_from};

pub use crate::model::paths::{DebugOverlay, PathModel};
pub use crate::model::reader::{read_document, read_value};
pub use crate::model::role::{Channel, Payload, Role};
pub use crate::model::writer::write_document;

pub use crate::editor::session::{EditorCommand, EditorEvent, PathEditor};
pub use crate::editor::view::{
    PathTreeView, RowKind, SegmentRef, SegmentView, TreeRow, build_tree_view, segment_view,
};

pub use crate::playback::choreographer::{Choreographer, PlaybackEvent, StageFrame};
