//! In-memory export data shared by the collectors, formatter and writer.

mod include;
mod map;

pub use include::IncludePolicy;
pub use map::ExportMap;
