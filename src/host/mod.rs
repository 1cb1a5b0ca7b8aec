//! Boundary with the deployment host: the service description it supplies
//! and the provider client used to query deployed stacks.

pub mod provider;
pub mod service;

pub use provider::{
    DescribeStacksResponse, JsonFileProvider, StackOutput, StackProvider, StackQuery, StackRecord,
};
pub use service::{DEFAULT_SERVICE_FILE, ServiceDescription};
