use crate::fetcher::{extract_content, StageFetcher};
use crate::traits::ModelStage;
use crate::types::{ChatMessage, Result, StageRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub const PREDICTION_MALFORMED_MESSAGE: &str = "Invalid prediction response structure";

/// Stage two: technical analysis in, directional prediction out.
pub struct PredictionStage {
    fetcher: Arc<StageFetcher>,
    endpoint: String,
}

impl PredictionStage {
    pub fn new(fetcher: Arc<StageFetcher>, endpoint: String) -> Self {
        Self { fetcher, endpoint }
    }

    pub fn build_prompt(analysis: &str) -> String {
        format!(
            "Based on the following technical analysis of a trading chart, predict the next candle.\n\n\
            Technical Analysis:\n{}\n\n\
            Respond with:\n\
            1. Direction: Bullish, Bearish or Neutral\n\
            2. Support Level: the key support price\n\
            3. Resistance Level: the key resistance price\n\
            4. Confidence Level: a percentage, followed by the reason for it\n\
            5. Risk Factor: the single most important risk to this prediction",
            analysis
        )
    }

    pub fn build_request(analysis: &str) -> StageRequest {
        StageRequest {
            messages: vec![ChatMessage::user_text(Self::build_prompt(analysis))],
        }
    }
}

#[async_trait]
impl ModelStage for PredictionStage {
    fn stage_name(&self) -> String {
        "Prediction".to_string()
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    async fn run(&self, input: &str) -> Result<String> {
        info!("Attempting Prediction API call");

        let request = Self::build_request(input);
        let reply = self.fetcher.post_stage(&self.stage_name(), &self.endpoint, &request).await?;
        let prediction = extract_content(&reply, PREDICTION_MALFORMED_MESSAGE)?;

        info!("Prediction extracted successfully (status {}, {}ms)", reply.status, reply.response_time_ms);
        Ok(prediction)
    }
}
