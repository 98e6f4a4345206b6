//! WASM library entry point for `NuRecords`
//! This module exports the records registry to JavaScript/TypeScript

mod bindings;

pub use bindings::*;
