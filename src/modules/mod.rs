//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the language model client, the agent runtime, document
//! extraction and upload storage.

pub mod agent;
pub mod documents;
pub mod llm;
pub mod storage;
