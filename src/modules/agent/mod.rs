//! Minimal tool-calling agent: tool definitions, a registry, per-thread
//! memory and the streaming run loop.

mod memory;
mod registry;
mod runtime;
mod tool;

pub use memory::ThreadMemory;
pub use registry::ToolRegistry;
pub use runtime::AgentRuntime;
pub use tool::{
    FnToolExecutor, ToolContext, ToolDefinition, ToolDefinitionBuilder, ToolExecutor, ToolResult,
};
