use std::collections::BTreeMap;

use glam::DVec3;

use crate::foundation::{
    config::PathsConfig,
    error::{PathError, PathResult},
};
use crate::model::{
    reader::read_document,
    role::{Channel, Payload, Role},
    writer::write_document,
};
use crate::path::tree::PathTree;

/// Receiver for debug trajectories of vector roles.
///
/// Implemented by whatever draws the overlay; the model only pushes sampled points.
pub trait DebugOverlay {
    /// Show (or replace) the trajectory drawn for `role`.
    fn show_line(&mut self, role: &str, points: &[DVec3]);

    /// Stop drawing the trajectory of `role`.
    fn hide_line(&mut self, role: &str);
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Registry of animation channels keyed by role name.
///
/// Well-known [`Role`]s always carry their fixed payload; any other name is accepted as an extra
/// channel. Each role also has a "debug line visible" flag.
pub struct PathModel {
    channels: BTreeMap<String, Channel>,
    debug_lines: BTreeMap<String, bool>,
}

macro_rules! role_accessor {
    ($fn_name:ident, $role:expr, $kind:ident, $ty:ty) => {
        #[doc = concat!("Path bound to [`", stringify!($role), "`], if any.")]
        pub fn $fn_name(&self) -> Option<&PathTree<$ty>> {
            self.$kind($role.name())
        }
    };
}

impl PathModel {
    /// Empty model.
    pub fn new() -> Self {
        Self::default()
    }

    role_accessor!(camera_to, Role::CameraTo, vector, DVec3);
    role_accessor!(camera_eye, Role::CameraEye, vector, DVec3);
    role_accessor!(camera_fov, Role::CameraFoV, scalar, f64);
    role_accessor!(the_fruit, Role::TheFruit, vector, DVec3);
    role_accessor!(clouds, Role::Clouds, vector, DVec3);
    role_accessor!(day_time, Role::DayTime, scalar, f64);
    role_accessor!(hall_light, Role::HallLight, scalar, f64);
    role_accessor!(room_light, Role::RoomLight, scalar, f64);

    /// Channel registered under `name`.
    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    /// Scalar path registered under `name`.
    pub fn scalar(&self, name: &str) -> Option<&PathTree<f64>> {
        match self.channels.get(name)? {
            Channel::Scalar(t) => Some(t),
            Channel::Vector(_) => None,
        }
    }

    /// Vector path registered under `name`.
    pub fn vector(&self, name: &str) -> Option<&PathTree<DVec3>> {
        match self.channels.get(name)? {
            Channel::Vector(t) => Some(t),
            Channel::Scalar(_) => None,
        }
    }

    /// Mutable scalar path registered under `name`.
    pub fn scalar_mut(&mut self, name: &str) -> Option<&mut PathTree<f64>> {
        match self.channels.get_mut(name)? {
            Channel::Scalar(t) => Some(t),
            Channel::Vector(_) => None,
        }
    }

    /// Mutable vector path registered under `name`.
    pub fn vector_mut(&mut self, name: &str) -> Option<&mut PathTree<DVec3>> {
        match self.channels.get_mut(name)? {
            Channel::Vector(t) => Some(t),
            Channel::Scalar(_) => None,
        }
    }

    /// Register `channel` under `name`, replacing any previous one.
    ///
    /// A primitive root is wrapped into a composite so the model always holds composite trees.
    pub fn insert(&mut self, name: impl Into<String>, channel: Channel) -> PathResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(PathError::validation("role name must not be empty"));
        }
        if let Some(role) = Role::from_name(&name)
            && role.payload() != channel.payload()
        {
            return Err(PathError::validation(format!(
                "role {name} carries {} data",
                role.payload().data_tag()
            )));
        }
        let channel = match channel {
            Channel::Scalar(t) => Channel::Scalar(t.into_composite_root()),
            Channel::Vector(t) => Channel::Vector(t.into_composite_root()),
        };
        self.channels.insert(name, channel);
        Ok(())
    }

    /// Register a scalar path under `name`.
    pub fn insert_scalar(&mut self, name: impl Into<String>, tree: PathTree<f64>) -> PathResult<()> {
        self.insert(name, Channel::Scalar(tree))
    }

    /// Register a vector path under `name`.
    pub fn insert_vector(&mut self, name: impl Into<String>, tree: PathTree<DVec3>) -> PathResult<()> {
        self.insert(name, Channel::Vector(tree))
    }

    /// Drop the channel registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Channel> {
        self.debug_lines.remove(name);
        self.channels.remove(name)
    }

    /// Registered role names: well-known roles first in fixed order, then extras by name.
    pub fn roles(&self) -> Vec<&str> {
        let known = Role::ALL
            .into_iter()
            .map(|role| role.name())
            .filter(|name| self.channels.contains_key(*name));
        let extra = self
            .channels
            .keys()
            .map(String::as_str)
            .filter(|name| Role::from_name(name).is_none());
        known.chain(extra).collect()
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// `true` when no channel is registered.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Longest channel duration, `0` for an empty model.
    pub fn duration(&self) -> f64 {
        self.channels
            .values()
            .map(Channel::duration)
            .fold(0.0, f64::max)
    }

    /// Render the model as a path document.
    pub fn serialize(&self) -> PathResult<String> {
        write_document(
            self.roles()
                .into_iter()
                .filter_map(|name| self.channels.get_key_value(name))
                .map(|(name, channel)| (name.as_str(), channel)),
        )
    }

    /// Merge a path document into the model.
    ///
    /// Every role of the document replaces the channel of the same name. On error the model is
    /// left exactly as it was.
    pub fn deserialize(&mut self, text: &str) -> PathResult<()> {
        let parsed = read_document(text).inspect_err(|e| {
            tracing::error!(error = %e, "path document rejected");
        })?;
        for (name, channel) in parsed {
            self.channels.insert(name, channel);
        }
        Ok(())
    }

    /// Replace the whole model with a path document.
    ///
    /// Roles absent from the document are dropped; surviving roles keep their debug-line flag.
    /// On error the model is left exactly as it was.
    pub fn replace_with_document(&mut self, text: &str) -> PathResult<()> {
        let parsed = read_document(text).inspect_err(|e| {
            tracing::error!(error = %e, "path document rejected");
        })?;
        let channels: BTreeMap<String, Channel> = parsed.into_iter().collect();
        self.debug_lines
            .retain(|name, _| channels.contains_key(name));
        self.channels = channels;
        Ok(())
    }

    /// Load and merge the document at `config.path_file`.
    pub fn load(&mut self, config: &PathsConfig) -> PathResult<()> {
        let path = &config.path_file;
        let text = std::fs::read_to_string(path).map_err(|e| {
            let err = PathError::io(format!("'{}' is unreadable: {e}", path.display()));
            tracing::error!(error = %err, "could not load paths");
            err
        })?;
        self.deserialize(&text)?;
        tracing::info!(path = %path.display(), roles = self.len(), "paths loaded");
        Ok(())
    }

    /// Write the model to `config.path_file`, replacing the file.
    pub fn save(&self, config: &PathsConfig) -> PathResult<()> {
        let path = &config.path_file;
        let text = self.serialize()?;
        std::fs::write(path, text).map_err(|e| {
            let err = PathError::io(format!("could not save to '{}': {e}", path.display()));
            tracing::error!(error = %err, "could not save paths");
            err
        })?;
        tracing::info!(path = %path.display(), "paths saved");
        Ok(())
    }

    /// Whether the debug trajectory of `role` is shown.
    pub fn is_debug_line_visible(&self, role: &str) -> bool {
        self.debug_lines.get(role).copied().unwrap_or(false)
    }

    /// Show or hide the debug trajectory of `role`.
    pub fn set_debug_line_visibility(&mut self, role: &str, visible: bool) {
        self.debug_lines.insert(role.to_string(), visible);
    }

    /// `samples` points evenly spread over the whole duration of vector role `role`.
    pub fn debug_line(&self, role: &str, samples: usize) -> Option<Vec<DVec3>> {
        let tree = self.vector(role)?;
        let duration = tree.duration();
        let last = samples.saturating_sub(1).max(1) as f64;
        (0..samples.max(2))
            .map(|i| tree.value(duration * (i as f64 / last)))
            .collect()
    }

    /// Push the trajectory of every visible vector role to `overlay` and hide the others.
    pub fn refresh_debug_lines(&self, overlay: &mut dyn DebugOverlay, samples: usize) {
        for (name, channel) in &self.channels {
            if channel.payload() != Payload::Vector {
                continue;
            }
            let line = if self.is_debug_line_visible(name) {
                self.debug_line(name, samples)
            } else {
                None
            };
            match line {
                Some(points) => overlay.show_line(name, &points),
                None => overlay.hide_line(name),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/paths.rs"]
mod tests;
