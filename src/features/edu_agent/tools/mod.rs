pub mod definitions;
mod error;
pub mod handlers;
pub mod registry;

pub use error::ToolError;
pub use registry::create_tool_registry;
