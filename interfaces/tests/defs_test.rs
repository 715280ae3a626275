use interfaces::defs::*;
use serde_json::json;

fn sample_indicators() -> ExtractedIndicators {
    ExtractedIndicators {
        trend: TrendDirection::Uptrend,
        strength: TrendStrength::Moderate,
        support: Some(100.0),
        resistance: None,
        direction: PredictionDirection::Bullish,
        confidence: 75,
        signals: SignalWeights { buy: 80, sell: 35, neutral: 25 },
        risk_factor: None,
    }
}

#[test]
fn test_failed_response_only_carries_error() {
    let value = serde_json::to_value(AnalyzeResponse::failed("No image provided")).unwrap();
    assert_eq!(value, json!({ "success": false, "error": "No image provided" }));
}

#[test]
fn test_succeeded_response_uses_camel_case() {
    let response = AnalyzeResponse::succeeded(
        "analysis".to_owned(),
        "prediction".to_owned(),
        "data:image/jpeg;base64,QUJD".to_owned(),
        sample_indicators(),
    );
    let value = serde_json::to_value(response).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["imageUrl"], "data:image/jpeg;base64,QUJD");
    assert_eq!(value["indicators"]["riskFactor"], serde_json::Value::Null);
    assert_eq!(value["indicators"]["signals"]["buy"], 80);
    assert!(value.get("error").is_none());
}

#[test]
fn test_requests_tolerate_missing_fields() {
    let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
    assert!(request.image.is_none());

    let upload: UploadRequest = serde_json::from_str(r#"{"base64":"QUJD"}"#).unwrap();
    assert_eq!(upload.base64.as_deref(), Some("QUJD"));
}

#[test]
fn test_display_labels() {
    assert_eq!(TrendDirection::Sideways.to_string(), "Sideways");
    assert_eq!(TrendStrength::Weak.to_string(), "Weak");
    assert_eq!(PredictionDirection::Bearish.to_string(), "Bearish");
}
