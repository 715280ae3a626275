use chart_analyzer::{AnalyzerConfig, ConfigArgs, ErrorKind};

#[test]
fn test_defaults_are_valid() {
    let config = ConfigArgs::default().into_config().expect("defaults should validate");
    assert_eq!(config.timeout_seconds, 60);
    assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
}

#[test]
fn test_overrides_apply() {
    let args = ConfigArgs {
        vision_endpoint: Some("https://models.example.com/vision".to_string()),
        timeout_seconds: Some(15),
        upload_dir: Some("/tmp/charts".to_string()),
        ..Default::default()
    };

    let config = args.into_config().expect("overrides should validate");
    assert_eq!(config.vision_endpoint, "https://models.example.com/vision");
    assert_eq!(config.prediction_endpoint, AnalyzerConfig::default().prediction_endpoint);
    assert_eq!(config.timeout_seconds, 15);
    assert_eq!(config.upload_dir, "/tmp/charts");
}

#[test]
fn test_invalid_endpoints_are_rejected() {
    let args = ConfigArgs {
        prediction_endpoint: Some("not a url".to_string()),
        ..Default::default()
    };
    let error = args.into_config().expect_err("should fail to parse");
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert!(error.to_string().contains("not a url"), "message should name the endpoint: {}", error);

    let args = ConfigArgs {
        vision_endpoint: Some("ftp://models.example.com/vision".to_string()),
        ..Default::default()
    };
    let error = args.into_config().expect_err("scheme should be rejected");
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn test_zero_timeout_is_rejected() {
    let args = ConfigArgs {
        timeout_seconds: Some(0),
        ..Default::default()
    };
    assert!(args.into_config().is_err());
}
