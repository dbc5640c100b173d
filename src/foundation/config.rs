use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use crate::foundation::error::{PathError, PathResult};

/// Settings shared by the path model, the editor, and the playback controller.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathsConfig {
    /// Location of the path document used by load/save.
    #[serde(default = "default_path_file")]
    pub path_file: PathBuf,
    /// Samples taken along a role when building its debug trajectory.
    #[serde(default = "default_debug_line_samples")]
    pub debug_line_samples: usize,
    /// Playback frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_path_file() -> PathBuf {
    PathBuf::from("resources/Paths.pth")
}

fn default_debug_line_samples() -> usize {
    64
}

fn default_fps() -> u32 {
    30
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            path_file: default_path_file(),
            debug_line_samples: default_debug_line_samples(),
            fps: default_fps(),
        }
    }
}

impl PathsConfig {
    /// Config pointing at `path_file`, every other field defaulted.
    pub fn with_path_file(path_file: impl Into<PathBuf>) -> Self {
        Self {
            path_file: path_file.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> PathResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PathError::validation(format!("parse paths config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PathResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .map_err(|e| PathError::io(format!("open config '{}': {e}", path.display())))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check numeric settings.
    pub fn validate(&self) -> PathResult<()> {
        if self.debug_line_samples < 2 {
            return Err(PathError::validation("debug_line_samples must be >= 2"));
        }
        if self.fps == 0 {
            return Err(PathError::validation("fps must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
