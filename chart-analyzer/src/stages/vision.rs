use crate::fetcher::{extract_content, StageFetcher};
use crate::normalizer::to_data_url;
use crate::traits::ModelStage;
use crate::types::{ChatMessage, ContentPart, ImageUrl, Result, StageRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub const VISION_MALFORMED_MESSAGE: &str = "Invalid vision analysis response structure";

pub const VISION_INSTRUCTIONS: &str = "You are a technical analyst. Analyze this trading chart and report:\n\
1. Current Trend: the trend direction (uptrend, downtrend or sideways) and its strength (strong, moderate or weak).\n\
2. Support: the nearest support level as a number.\n\
3. Resistance: the nearest resistance level as a number.\n\
4. Indicators: any visible indicator readings (moving averages, RSI, MACD, volume) and what they suggest.\n\
Use the labels above and give price levels as plain numbers.";

/// Stage one: chart image in, technical analysis text out.
pub struct VisionStage {
    fetcher: Arc<StageFetcher>,
    endpoint: String,
}

impl VisionStage {
    pub fn new(fetcher: Arc<StageFetcher>, endpoint: String) -> Self {
        Self { fetcher, endpoint }
    }

    /// Request carrying the instructions and the image, always re-wrapped
    /// as `image/jpeg` whatever the upload's original type was.
    pub fn build_request(image_payload: &str) -> StageRequest {
        StageRequest {
            messages: vec![ChatMessage::user_parts(vec![
                ContentPart::Text {
                    text: VISION_INSTRUCTIONS.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: to_data_url(image_payload),
                    },
                },
            ])],
        }
    }
}

#[async_trait]
impl ModelStage for VisionStage {
    fn stage_name(&self) -> String {
        "Vision".to_string()
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    async fn run(&self, input: &str) -> Result<String> {
        info!("Attempting Vision API call (image length {})", input.len());

        let request = Self::build_request(input);
        let reply = self.fetcher.post_stage(&self.stage_name(), &self.endpoint, &request).await?;
        let analysis = extract_content(&reply, VISION_MALFORMED_MESSAGE)?;

        info!("Analysis extracted successfully (status {}, {}ms)", reply.status, reply.response_time_ms);
        Ok(analysis)
    }
}
