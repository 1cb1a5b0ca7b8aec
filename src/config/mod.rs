//! Export configuration model.
//!
//! This module defines the `exports` section of the service description:
//! at most two independent flow settings (`environment` and `stack`), each
//! with a destination file, a format name and an overwrite flag. Parsing is
//! forward compatible (unknown fields are ignored) and every field has a
//! default.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{ExportConfig, FlowConfig};
pub use types::{DEFAULT_FILE, DEFAULT_FORMAT, FlowKind};
