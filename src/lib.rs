//! Modman: a command-line mod manager
//!
//! This crate provides the installation engine, re-exporting the error type,
//! version comparator and path helpers from `modman-core`.

pub use modman_core::{format_error_with_help, ModmanError, ModmanResult, Version};

/// Core module re-exported from modman-core (errors, versions, paths).
pub mod core {
    pub use modman_core::core::*;
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Package installation, update and removal.
pub mod package;

/// Runtime library version probe and updater.
pub mod runtime;
