//! Tool definitions and implementations for the agent system.

use crate::error::{Result, SkapeError};
use crate::generation::{GenerationRequest, VideoGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Generate a video from a list of images.
    GenerateVideo(GenerationRequest),
}

/// Tool execution context with access to the video generator.
pub struct ToolContext {
    pub generator: Arc<VideoGenerator>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(generator: Arc<VideoGenerator>) -> Self {
        Self { generator }
    }

    /// Execute a tool call and return the result as a string.
    ///
    /// `generate_video` always yields a JSON object — success, failure,
    /// timeout, and input errors alike — so the model never has to interpret
    /// a raised exception.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::GenerateVideo(request) => Ok(self.generator.generate_json(request).await),
        }
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: "generate_video".to_string(),
            description: Some(
                "Generate a short video from a list of images. Blocks until the remote \
                task finishes or the polling deadline passes, then returns a JSON object \
                with 'status' and 'video_url'. A 'timeout' status means the task may \
                still be running remotely; do not resubmit it blindly."
                    .to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "image_urls": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Input images, ordered: HTTPS URLs or tos://bucket/key references"
                    },
                    "prompt": {
                        "type": "string",
                        "description": "Optional text prompt guiding the generation"
                    },
                    "aspect_ratio": {
                        "type": "string",
                        "description": "Aspect ratio (default: 16:9)"
                    },
                    "duration_seconds": {
                        "type": "integer",
                        "description": "Clip duration in seconds (default: 5)"
                    },
                    "fps": {
                        "type": "integer",
                        "description": "Frames per second (default: 24)"
                    },
                    "resolution": {
                        "type": "string",
                        "description": "Output resolution (default: 720p)"
                    },
                    "watermark": {
                        "type": "boolean",
                        "description": "Watermark the output (default: false)"
                    }
                },
                "required": ["image_urls"]
            })),
            strict: None,
        },
    }]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    match name {
        "generate_video" => {
            let request: GenerationRequest = serde_json::from_str(arguments)
                .map_err(|e| SkapeError::Agent(format!("Invalid tool arguments: {e}")))?;
            Ok(ToolCall::GenerateVideo(request))
        }
        _ => Err(SkapeError::Agent(format!("Unknown tool: {name}"))),
    }
}
