use crate::types::{
    AnalysisResult, ExtractedIndicators, PredictionDirection, SignalWeights, TrendDirection, TrendStrength,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Confidence reported when the prediction text carries no usable figure.
pub const DEFAULT_CONFIDENCE: u8 = 75;

// Placeholder display heuristics, not probabilities.
const BUY_WEIGHT_BULLISH: u8 = 80;
const BUY_WEIGHT_OTHERWISE: u8 = 40;
const SELL_WEIGHT_BEARISH: u8 = 75;
const SELL_WEIGHT_OTHERWISE: u8 = 35;
const NEUTRAL_WEIGHT_UNDECIDED: u8 = 60;
const NEUTRAL_WEIGHT_OTHERWISE: u8 = 25;

static SUPPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)support[:\s]+(\d+\.?\d*)").unwrap());
static RESISTANCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)resistance[:\s]+(\d+\.?\d*)").unwrap());
static CONFIDENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)confidence(?:\s+level)?[:\s]+(\d+)").unwrap());
// Runs to the first blank line or the end of the text.
static RISK_FACTOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)risk factors?[:\s]+(.*?)(?:\n\n|\z)").unwrap());

/// Derive display indicators from the two model texts.
///
/// Everything here is keyword and pattern matching over free text with
/// fixed fallbacks; it never fails. Direction is binary: a prediction
/// that is neither bullish nor bearish still reads as `Bullish`, while the
/// signal weights do show it as undecided.
pub fn extract_indicators(result: &AnalysisResult) -> ExtractedIndicators {
    let analysis = result.analysis_text.to_lowercase();
    let prediction = result.prediction_text.to_lowercase();

    ExtractedIndicators {
        trend: trend_direction(&analysis, &prediction),
        strength: trend_strength(&analysis),
        support: price_level(&SUPPORT_RE, &result.analysis_text),
        resistance: price_level(&RESISTANCE_RE, &result.analysis_text),
        direction: prediction_direction(&prediction),
        confidence: confidence(&result.prediction_text),
        signals: signal_weights(&prediction),
        risk_factor: risk_factor(&result.prediction_text),
    }
}

fn trend_direction(analysis: &str, prediction: &str) -> TrendDirection {
    let mentions = |needles: [&str; 2]| contains_any(analysis, &needles) || contains_any(prediction, &needles);

    if mentions(["downtrend", "down trend"]) {
        TrendDirection::Downtrend
    } else if mentions(["uptrend", "up trend"]) {
        TrendDirection::Uptrend
    } else {
        TrendDirection::Sideways
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn trend_strength(analysis: &str) -> TrendStrength {
    if analysis.contains("strong") {
        TrendStrength::Strong
    } else if analysis.contains("weak") {
        TrendStrength::Weak
    } else {
        TrendStrength::Moderate
    }
}

fn price_level(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn prediction_direction(prediction: &str) -> PredictionDirection {
    if prediction.contains("bearish") {
        PredictionDirection::Bearish
    } else {
        PredictionDirection::Bullish
    }
}

fn confidence(prediction: &str) -> u8 {
    CONFIDENCE_RE
        .captures(prediction)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|value| value.min(100) as u8)
        .unwrap_or(DEFAULT_CONFIDENCE)
}

fn signal_weights(prediction: &str) -> SignalWeights {
    let bullish = prediction.contains("bullish");
    let bearish = prediction.contains("bearish");

    SignalWeights {
        buy: if bullish { BUY_WEIGHT_BULLISH } else { BUY_WEIGHT_OTHERWISE },
        sell: if bearish { SELL_WEIGHT_BEARISH } else { SELL_WEIGHT_OTHERWISE },
        neutral: if !bullish && !bearish {
            NEUTRAL_WEIGHT_UNDECIDED
        } else {
            NEUTRAL_WEIGHT_OTHERWISE
        },
    }
}

fn risk_factor(prediction: &str) -> Option<String> {
    RISK_FACTOR_RE
        .captures(prediction)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|risk| !risk.is_empty())
}
