//! # Unified Configuration System
//!
//! All runtime configuration sections in one place. Every section implements
//! `Default` and is deserialised with `#[serde(default)]`, so a config file
//! only needs to mention what it overrides and unknown keys are ignored.
//!
//! ## Configuration Categories
//!
//! - **Asset Config**: search paths and default extensions for asset names
//! - **Input Config**: how many mouse buttons the input state tracks
//! - **Camera Config**: initial camera pose
//! - **Scheduler Config**: script failure reporting
//! - **Logging Config**: default `env_logger` filter

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{quat_from_euler_angles, Quat, Vec3};

/// # Asset Configuration
///
/// Controls how the file system loader resolves asset names such as `"cow1"`
/// or `"tex1.png"` to files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directories searched in order for asset files
    pub search_paths: Vec<String>,
    /// Extensions tried for mesh names given without one
    pub mesh_extensions: Vec<String>,
    /// Extensions tried for texture names given without one
    pub texture_extensions: Vec<String>,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            search_paths: vec!["assets".to_string(), "resources".to_string()],
            mesh_extensions: vec!["obj".to_string()],
            texture_extensions: vec!["png".to_string(), "jpg".to_string()],
        }
    }

    /// Replace the search paths
    pub fn with_search_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Input Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Number of mouse buttons tracked; higher indices always read as up
    pub mouse_buttons: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse_buttons: 8 }
    }
}

/// # Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial world-space position
    pub position: Vec3,
    /// Initial orientation as Euler angles in radians
    pub euler: Vec3,
}

impl CameraConfig {
    /// Initial orientation as a quaternion
    pub fn rotation(&self) -> Quat {
        quat_from_euler_angles(self.euler)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            euler: Vec3::zeros(),
        }
    }
}

/// # Scheduler Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Whether script failures are logged (they are always reported in the
    /// tick report)
    pub log_script_failures: bool,
    /// Upper bound on failures logged individually per tick; the rest are
    /// summarised in one line
    pub max_logged_failures_per_tick: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            log_script_failures: true,
            max_logged_failures_per_tick: 16,
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// # Complete Runtime Configuration
///
/// Top-level configuration handed to the frame scheduler.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Asset resolution
    pub assets: AssetConfig,
    /// Input tracking
    pub input: InputConfig,
    /// Initial camera pose
    pub camera: CameraConfig,
    /// Tick loop behaviour
    pub scheduler: SchedulerConfig,
    /// Logging bootstrap
    pub logging: LoggingConfig,
}

impl Config for RuntimeConfig {}
