//! Artifacts written for the package manager and the downstream compiler.

pub mod manifest;
pub mod stubs;

pub use manifest::{MANIFEST_NAME, write_manifest};
pub use stubs::{TYPE_STUBS_NAME, render_type_stubs, write_type_stubs};
