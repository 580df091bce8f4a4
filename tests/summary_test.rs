//! Summarizer behavior without a reachable LLM.

use veraz::config::SummaryConfig;
use veraz::summary::{MISSING_API_KEY_PLACEHOLDER, Summarizer};

#[tokio::test]
async fn test_missing_key_returns_placeholder() {
    let summarizer = Summarizer::from_config(&SummaryConfig::default()).unwrap();
    assert_eq!(
        summarizer.summarize("Una noticia cualquiera").await,
        MISSING_API_KEY_PLACEHOLDER
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_returns_error_placeholder() {
    let config = SummaryConfig {
        base_url: "http://127.0.0.1:9/v1".to_string(),
        timeout_secs: 5,
        ..SummaryConfig::default()
    }
    .with_api_key("sk-test");

    let summarizer = Summarizer::from_config(&config).unwrap();
    assert!(summarizer.is_enabled());

    let summary = summarizer.summarize("Una noticia cualquiera").await;
    assert!(
        summary.starts_with("⚠️ Error generando resumen: "),
        "unexpected summary: {summary}"
    );
}
