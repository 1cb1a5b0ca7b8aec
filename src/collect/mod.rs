//! Collectors turn host data into export maps, one per flow.

mod environment;
mod stack;

pub use environment::collect_environment;
pub use stack::collect_stack_outputs;
