pub mod edu_agent;
pub mod health;
