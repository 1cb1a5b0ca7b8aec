//! Exit code constants for the stack-exports CLI.
//!
//! - 0: Success (every flow written or skipped)
//! - 1: User error (bad service description, unsupported format)
//! - 2: File conflict (destination exists and overwrite is disabled)
//! - 3: I/O failure while writing an export file
//! - 4: Provider failure (stack not found, unreadable provider response)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: unreadable config or unsupported export format.
pub const USER_ERROR: i32 = 1;

/// The destination file already exists and `overwrite` is false.
pub const FILE_CONFLICT: i32 = 2;

/// Filesystem failure while writing an export.
pub const IO_FAILURE: i32 = 3;

/// The stack could not be described by the provider.
pub const PROVIDER_FAILURE: i32 = 4;
