//! Shared building blocks for Modman: the error type, versions and paths.

pub mod core;

pub use crate::core::{format_error_with_help, ModmanError, ModmanResult, Version};
