//! Filesystem utilities for stack-exports.
//!
//! Export files are replaced atomically so a failed write never leaves a
//! truncated file behind.

pub mod atomic;

pub use atomic::atomic_write_file;
