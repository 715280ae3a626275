use crate::types::{AnalyzerConfig, AnalyzerError, Result, StageReply, StageRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Shared HTTP transport for the model stages.
///
/// Every reply is read to text before anything else happens so the raw
/// body is always available for diagnostics, whatever the status.
pub struct StageFetcher {
    client: Client,
}

impl StageFetcher {
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// POST `request` as JSON and capture the reply. Non-2xx statuses come
    /// back as `UpstreamHttp` carrying the body that was read.
    pub async fn post_stage(&self, stage: &str, url: &str, request: &StageRequest) -> Result<StageReply> {
        let start_time = Instant::now();
        let payload = serde_json::to_string(request)?;

        debug!("Posting {} request to {} ({} bytes)", stage, url, payload.len());

        let response = self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        info!("{} API response status: {}", stage, status.as_u16());

        let body = response.text().await?;
        debug!("Raw {} API response text: {}", stage, body);

        let response_time_ms = start_time.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!("{} API returned {} after {}ms", stage, status, response_time_ms);
            return Err(AnalyzerError::UpstreamHttp {
                stage: stage.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(StageReply {
            status: status.as_u16(),
            body,
            response_time_ms,
        })
    }
}

/// Pull `choices[0].message.content` out of a captured reply.
///
/// Only the first choice is looked at; anything else in the body is
/// ignored. A body that is not JSON, a missing path, non-string content or
/// an empty string all fail with `malformed_message`.
pub fn extract_content(reply: &StageReply, malformed_message: &str) -> Result<String> {
    let parsed: Value = match serde_json::from_str(&reply.body) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Reply body is not JSON: {}", e);
            return Err(AnalyzerError::MalformedResponse(malformed_message.to_string()));
        }
    };

    parsed
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AnalyzerError::MalformedResponse(malformed_message.to_string()))
}
