use serde::{Deserialize, Serialize};
use std::fmt;

/// Inbound body of the analysis entry point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// Reply of the analysis entry point. Either the success fields or
/// `error` are populated, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicators: Option<ExtractedIndicators>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    pub fn succeeded(
        analysis: String,
        prediction: String,
        image_url: String,
        indicators: ExtractedIndicators,
    ) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            prediction: Some(prediction),
            image_url: Some(image_url),
            indicators: Some(indicators),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            prediction: None,
            image_url: None,
            indicators: None,
            error: Some(error.into()),
        }
    }
}

/// Inbound body of the upload collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub base64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Uptrend,
    Downtrend,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStrength {
    Strong,
    Moderate,
    Weak,
}

/// Direction of the next candle. There is no neutral variant: text that
/// does not mention "bearish" reads as bullish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionDirection {
    Bullish,
    Bearish,
}

/// Display weights for the signal bars, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub buy: u8,
    pub sell: u8,
    pub neutral: u8,
}

/// Typed view over the two model texts, recomputed on every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIndicators {
    pub trend: TrendDirection,
    pub strength: TrendStrength,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub direction: PredictionDirection,
    pub confidence: u8,
    pub signals: SignalWeights,
    pub risk_factor: Option<String>,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Uptrend => "Uptrend",
            TrendDirection::Downtrend => "Downtrend",
            TrendDirection::Sideways => "Sideways",
        };
        f.write_str(label)
    }
}

impl fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendStrength::Strong => "Strong",
            TrendStrength::Moderate => "Moderate",
            TrendStrength::Weak => "Weak",
        };
        f.write_str(label)
    }
}

impl fmt::Display for PredictionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PredictionDirection::Bullish => "Bullish",
            PredictionDirection::Bearish => "Bearish",
        };
        f.write_str(label)
    }
}
