//! Agent system for task execution with tool calling.
//!
//! Provides an LLM agent whose tool set wraps the video generation flow, so
//! a conversational model can request a video and reason about the uniform
//! JSON outcome it gets back.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
