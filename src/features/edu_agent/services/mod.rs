mod agent_runtime_service;
mod summary_service;

pub use agent_runtime_service::AgentRuntimeService;
pub use summary_service::SummaryService;
