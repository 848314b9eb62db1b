//! Configuration module for VyapaarTrack
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::VyapaarPaths;
pub use settings::{ClassifierCommand, Settings};
