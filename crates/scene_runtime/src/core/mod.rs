//! # Core Runtime Module
//!
//! Shared configuration for every runtime subsystem.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration sections (assets, input, camera,
//!   scheduler, logging) loaded through the [`crate::config::Config`] trait

pub mod config;

pub use config::{
    AssetConfig, CameraConfig, InputConfig, LoggingConfig, RuntimeConfig, SchedulerConfig,
};
pub use crate::config::{Config, ConfigError};
