//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the runtime:
//! - Math types and operations
//! - Time sources and per-tick timing
//! - The cooldown trigger used by scripts
//! - Logging utilities

pub mod cooldown;
pub mod logging;
pub mod math;
pub mod time;
