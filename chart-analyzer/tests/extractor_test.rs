use chart_analyzer::{
    extract_indicators, render_report, AnalysisResult, PredictionDirection, SignalWeights, TrendDirection,
    TrendStrength,
};

fn result(analysis: &str, prediction: &str) -> AnalysisResult {
    AnalysisResult {
        analysis_text: analysis.to_string(),
        prediction_text: prediction.to_string(),
    }
}

#[test]
fn test_trend_and_levels_from_analysis() {
    let indicators = extract_indicators(&result(
        "Current Trend: Strong Downtrend with lower lows. Support: 100 Resistance: 120",
        "Direction: Neutral",
    ));

    assert_eq!(indicators.trend, TrendDirection::Downtrend);
    assert_eq!(indicators.strength, TrendStrength::Strong);
    assert_eq!(indicators.support, Some(100.0));
    assert_eq!(indicators.resistance, Some(120.0));
}

#[test]
fn test_bearish_prediction_fields() {
    let indicators = extract_indicators(&result(
        "Sideways range",
        "Direction: Bearish\nConfidence Level: 82%\nRisk Factor: high volatility",
    ));

    assert_eq!(indicators.direction, PredictionDirection::Bearish);
    assert_eq!(indicators.confidence, 82);
    assert_eq!(indicators.risk_factor.as_deref(), Some("high volatility"));
    assert_eq!(indicators.signals.buy, 40);
    assert_eq!(indicators.signals.sell, 75);
}

#[test]
fn test_missing_confidence_defaults_to_75() {
    let indicators = extract_indicators(&result("Uptrend", "Direction: Bullish"));
    assert_eq!(indicators.confidence, 75);

    let indicators = extract_indicators(&result("Uptrend", "Confidence: high"));
    assert_eq!(indicators.confidence, 75, "non-numeric confidence falls back to the default");
}

#[test]
fn test_confidence_variants() {
    let indicators = extract_indicators(&result("", "confidence: 64% based on volume"));
    assert_eq!(indicators.confidence, 64);

    let indicators = extract_indicators(&result("", "CONFIDENCE 90"));
    assert_eq!(indicators.confidence, 90);

    let indicators = extract_indicators(&result("", "Confidence: 250%"));
    assert_eq!(indicators.confidence, 100, "confidence is capped at 100");
}

#[test]
fn test_trend_priority_and_spacing() {
    let both = extract_indicators(&result("Was an uptrend, now a downtrend", ""));
    assert_eq!(both.trend, TrendDirection::Downtrend, "downtrend wins when both are present");

    let spaced = extract_indicators(&result("Clear UP TREND since March", ""));
    assert_eq!(spaced.trend, TrendDirection::Uptrend);

    let from_prediction = extract_indicators(&result("Price is consolidating", "the down trend resumes"));
    assert_eq!(from_prediction.trend, TrendDirection::Downtrend);

    let neither = extract_indicators(&result("Price is consolidating", "no view"));
    assert_eq!(neither.trend, TrendDirection::Sideways);
}

#[test]
fn test_strength_fallbacks() {
    assert_eq!(extract_indicators(&result("weak momentum", "")).strength, TrendStrength::Weak);
    assert_eq!(extract_indicators(&result("steady", "")).strength, TrendStrength::Moderate);
    assert_eq!(
        extract_indicators(&result("strong push after weak open", "")).strength,
        TrendStrength::Strong
    );
}

#[test]
fn test_levels_absent_are_not_zero() {
    let indicators = extract_indicators(&result("Support is unclear, resistance around the highs", ""));
    assert_eq!(indicators.support, None);
    assert_eq!(indicators.resistance, None);

    let decimals = extract_indicators(&result("support: 1.0850\nRESISTANCE:\t1.0921", ""));
    assert_eq!(decimals.support, Some(1.085));
    assert_eq!(decimals.resistance, Some(1.0921));
}

#[test]
fn test_levels_only_come_from_analysis_text() {
    let indicators = extract_indicators(&result("no levels here", "Support Level: 95\nSupport: 95"));
    assert_eq!(indicators.support, None);
}

#[test]
fn test_signal_weights() {
    let bullish = extract_indicators(&result("", "Direction: Bullish"));
    assert_eq!(bullish.direction, PredictionDirection::Bullish);
    assert_eq!(bullish.signals, SignalWeights { buy: 80, sell: 35, neutral: 25 });

    let bearish = extract_indicators(&result("", "Direction: Bearish"));
    assert_eq!(bearish.signals, SignalWeights { buy: 40, sell: 75, neutral: 25 });

    let undecided = extract_indicators(&result("", "Direction: Neutral"));
    assert_eq!(undecided.direction, PredictionDirection::Bullish, "no neutral direction surfaces");
    assert_eq!(undecided.signals, SignalWeights { buy: 40, sell: 35, neutral: 60 });
}

#[test]
fn test_risk_factor_stops_at_blank_line() {
    let indicators = extract_indicators(&result(
        "",
        "Risk Factors: a surprise rate decision\ncould reverse the move\n\nSummary: stay cautious",
    ));
    assert_eq!(
        indicators.risk_factor.as_deref(),
        Some("a surprise rate decision\ncould reverse the move")
    );

    let none = extract_indicators(&result("", "Direction: Bullish"));
    assert_eq!(none.risk_factor, None);
}

#[test]
fn test_empty_texts_fall_back_everywhere() {
    let indicators = extract_indicators(&result("", ""));

    assert_eq!(indicators.trend, TrendDirection::Sideways);
    assert_eq!(indicators.strength, TrendStrength::Moderate);
    assert_eq!(indicators.support, None);
    assert_eq!(indicators.resistance, None);
    assert_eq!(indicators.direction, PredictionDirection::Bullish);
    assert_eq!(indicators.confidence, 75);
    assert_eq!(indicators.risk_factor, None);
}

#[test]
fn test_report_rendering() {
    let indicators = extract_indicators(&result(
        "Strong Uptrend. Support: 100.5",
        "Direction: Bullish\nConfidence: 70%",
    ));
    let report = render_report(&indicators);

    assert!(report.contains("Trend:          Uptrend"));
    assert!(report.contains("Strength:       Strong"));
    assert!(report.contains("Support:        100.5"));
    assert!(report.contains("Resistance:     N/A"));
    assert!(report.contains("Direction:      Bullish"));
    assert!(report.contains("Confidence:     70%"));
    assert!(report.contains("Buy Signal:     80%"));
    assert!(report.contains("Risk Factors:   N/A"));
    assert!(report.starts_with("Technical Analysis\n"));
    assert!(report.contains("N/A\n\nTrade Analysis\n"));
    assert_eq!(report.lines().count(), 13);
}
