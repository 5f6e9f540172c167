//! Prompt template management module.
//!
//! Templates live in `templates/prompts/` and use Jinja2 syntax.

pub mod engine;

pub use engine::{render_template, TemplateError};

use chrono::Local;
use minijinja::Value;
use std::collections::HashMap;

/// Build a context with current datetime information.
///
/// Returns a HashMap with:
/// - `day_name`: English day name (e.g., "Monday")
/// - `date`: Date in dd-mm-yyyy format
/// - `time`: Time in HH:MM format
pub fn datetime_context() -> HashMap<&'static str, Value> {
    let now = Local::now();
    let mut ctx = HashMap::new();
    ctx.insert("day_name", Value::from(now.format("%A").to_string()));
    ctx.insert("date", Value::from(now.format("%d-%m-%Y").to_string()));
    ctx.insert("time", Value::from(now.format("%H:%M").to_string()));
    ctx
}

/// Render the EduAssist agent system prompt with the current datetime.
pub fn render_edu_agent_prompt() -> Result<String, TemplateError> {
    render_template("edu_agent/system.jinja", &datetime_context())
}

/// Render the file summarization prompt around extracted document content.
pub fn render_summary_prompt(content: &str) -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("content", Value::from(content));

    render_template("edu_agent/summarize.jinja", &ctx)
}
