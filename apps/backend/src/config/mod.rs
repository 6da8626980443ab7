//! Process configuration, read from environment variables at startup.

pub mod bots;
pub mod llm;
pub mod server;
