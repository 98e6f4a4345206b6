//! Shared library for `NuRecords`
//! Contains the academic records domain model used by the CLI and WASM targets

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
