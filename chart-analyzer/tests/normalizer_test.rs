use chart_analyzer::normalizer::{normalize_image, to_data_url};
use chart_analyzer::{AnalyzerError, ErrorKind};
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_prefixed_images_keep_only_the_payload() {
    for (input, expected) in [
        ("data:image/png;base64,iVBORw0KGgo=", "iVBORw0KGgo="),
        ("data:image/jpeg;base64,/9j/4AAQ", "/9j/4AAQ"),
        ("base64,QUJD", "QUJD"),
    ] {
        let payload = assert_ok!(normalize_image(Some(input)));
        assert_eq!(payload, expected);
    }
}

#[test]
fn test_unprefixed_images_pass_through() {
    let payload = assert_ok!(normalize_image(Some("iVBORw0KGgo=")));
    assert_eq!(payload, "iVBORw0KGgo=");
}

#[test]
fn test_missing_image_is_rejected() {
    for input in [None, Some("")] {
        let error = assert_err!(normalize_image(input));
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.to_string(), "No image provided");
    }
}

#[test]
fn test_prefix_without_payload_is_rejected() {
    let error = assert_err!(normalize_image(Some("data:image/png;base64,")));
    assert!(matches!(error, AnalyzerError::Validation(ref message) if message == "Invalid image format"));
}

#[test]
fn test_data_url_is_always_jpeg() {
    assert_eq!(to_data_url("QUJD"), "data:image/jpeg;base64,QUJD");
}
