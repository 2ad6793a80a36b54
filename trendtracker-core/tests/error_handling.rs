use trendtracker_core::{ApiError, ConfigError, CoreError, ErrorExt, ErrorReporter};

#[test]
fn test_error_codes() {
    let api_error = CoreError::Api(ApiError::Http {
        status: 500,
        server_message: None,
    });
    assert_eq!(api_error.error_code(), "API");

    let config_error = CoreError::Config(ConfigError::ValidationFailed {
        reason: "host must not be empty".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let parse_error = ApiError::Parse {
        details: "expected value".to_string(),
    };
    assert_eq!(parse_error.error_code(), "API_PARSE");
}

#[test]
fn test_http_error_display_and_accessors() {
    let error = ApiError::Http {
        status: 503,
        server_message: Some("Internal server error during scraping".to_string()),
    };
    assert_eq!(error.to_string(), "API request failed with status 503");
    assert_eq!(error.status(), Some(503));
    assert_eq!(
        error.server_message(),
        Some("Internal server error during scraping")
    );

    let network = ApiError::Network {
        details: "connection refused".to_string(),
    };
    assert_eq!(network.status(), None);
    assert_eq!(network.server_message(), None);
}

#[test]
fn test_user_friendly_messages() {
    let error = CoreError::Api(ApiError::Http {
        status: 400,
        server_message: Some("YouTube API key not configured.".to_string()),
    });
    assert_eq!(error.user_friendly_message(), "YouTube API key not configured.");

    let error = CoreError::Api(ApiError::Http {
        status: 502,
        server_message: None,
    });
    assert!(error.user_friendly_message().contains("502"));

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "window.width".to_string(),
        value: "0".to_string(),
    });
    assert!(config_error.user_friendly_message().contains("window.width"));
}

#[test]
fn test_json_error_converts_to_parse() {
    let json_error = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
    let api_error: ApiError = json_error.into();
    assert!(matches!(api_error, ApiError::Parse { .. }));
}

#[test]
fn test_network_and_parse_messages_keep_details() {
    let network = ApiError::Network {
        details: "connection refused".to_string(),
    };
    assert_eq!(
        network.user_friendly_message(),
        "Could not reach the TrendTracker server: connection refused"
    );

    let parse = ApiError::Parse {
        details: "expected value at line 1".to_string(),
    };
    assert!(parse.user_friendly_message().ends_with("expected value at line 1"));
}

#[test]
fn test_error_reporter() {
    let reporter = ErrorReporter::new("startup");
    let error = CoreError::Config(ConfigError::ValidationFailed {
        reason: "host must not be empty".to_string(),
    });

    // This test just ensures the methods don't panic
    reporter.report_error(&error);
    reporter.report_warning(&error);
}
