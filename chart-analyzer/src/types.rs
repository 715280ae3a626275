use serde::{Deserialize, Serialize};
use std::fmt;
// Use the interfaces crate for the shared wire types
pub use interfaces::defs::{AnalyzeRequest, AnalyzeResponse, UploadRequest, UploadResponse, ErrorBody};
pub use interfaces::defs::{ExtractedIndicators, TrendDirection, TrendStrength, PredictionDirection, SignalWeights};

/// The two raw texts produced by one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_text: String,
    pub prediction_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    UpstreamHttp,
    MalformedResponse,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::UpstreamHttp => "upstream_http",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Internal => "internal",
        };
        f.write_str(label)
    }
}

/// Terminal result of one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Success(AnalysisResult),
    Failure { kind: ErrorKind, message: String },
}

impl PipelineOutcome {
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        PipelineOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }
}

/// One role-tagged message sent to a model service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }
}

/// Raw reply of a model service, captured before any parsing.
#[derive(Debug, Clone)]
pub struct StageReply {
    pub status: u16,
    pub body: String,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub vision_endpoint: String,
    pub prediction_endpoint: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub bind_addr: String,
    pub upload_dir: String,
    pub max_image_bytes: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            vision_endpoint: "http://localhost:8080/integrations/gpt-vision/".to_string(),
            prediction_endpoint: "http://localhost:8080/integrations/google-gemini-1-5/".to_string(),
            user_agent: "Chart-Analyzer/1.0".to_string(),
            timeout_seconds: 60,
            connect_timeout_seconds: 10,
            bind_addr: "127.0.0.1:3000".to_string(),
            upload_dir: "./public/uploads".to_string(),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("{0}")]
    Validation(String),

    #[error("{stage} API failed with status: {status}")]
    UpstreamHttp { stage: String, status: u16, body: String },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalyzerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzerError::Validation(_) => ErrorKind::Validation,
            AnalyzerError::UpstreamHttp { .. } => ErrorKind::UpstreamHttp,
            AnalyzerError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            AnalyzerError::Http(_) | AnalyzerError::Io(_) | AnalyzerError::Serialization(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
