pub mod clients;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tools;

pub use clients::BackendClient;
pub use services::{AgentRuntimeService, SummaryService};
pub use tools::create_tool_registry;
