//! Integration tests for the structuring service and the pipeline
//!
//! The chat completions endpoint is mocked with wiremock; the pipeline tests
//! additionally stand up a mock documentation site so the whole
//! crawl-then-structure flow runs against local servers only.

use async_trait::async_trait;
use modmap::config::{Config, ExtractorConfig};
use modmap::{
    run_pipeline, Crawler, ExtractError, ModmapError, ModuleRecord, OpenAiStructurer, PageContent,
    Structurer,
};
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an extractor configuration pointed at a mock server
fn mock_extractor_config(server: &MockServer) -> ExtractorConfig {
    let mut config = ExtractorConfig::default();
    config.api_base = format!("{}/v1", server.uri());
    config.request_timeout_secs = 5;
    config
}

/// Creates a crawler configuration with tight limits for mock servers
fn test_crawler_config() -> Config {
    let mut config = Config::default();
    config.crawler.page_timeout_secs = 2;
    config.crawler.max_total_time_secs = 30;
    config.crawler.retries = 0;
    config
}

fn sample_page(url: &str) -> PageContent {
    PageContent {
        url: url.to_string(),
        content: "Billing handles invoices and payments.".to_string(),
    }
}

/// Wraps a model reply in the chat completions response envelope
fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"message": {"content": content}}]
    }))
}

/// Structurer stub returning the same single record for every call
struct StaticStructurer(ModuleRecord);

#[async_trait]
impl Structurer for StaticStructurer {
    async fn extract_modules(
        &self,
        _pages: &[PageContent],
    ) -> modmap::ExtractResult<Vec<ModuleRecord>> {
        Ok(vec![self.0.clone()])
    }
}

/// Structurer stub that fails for URLs ending in `/one`
struct FlakyStructurer(ModuleRecord);

#[async_trait]
impl Structurer for FlakyStructurer {
    async fn extract_modules(
        &self,
        pages: &[PageContent],
    ) -> modmap::ExtractResult<Vec<ModuleRecord>> {
        if pages.iter().any(|page| page.url.ends_with("/one")) {
            return Err(ExtractError::EmptyResponse);
        }
        Ok(vec![self.0.clone()])
    }
}

fn sample_record(module: &str) -> ModuleRecord {
    ModuleRecord {
        module: module.to_string(),
        description: format!("{} functionality", module),
        submodules: BTreeMap::new(),
    }
}

#[tokio::test]
async fn test_structurer_posts_chat_completion_and_parses_modules() {
    let mock_server = MockServer::start().await;

    let model_reply = serde_json::json!({
        "modules": [{
            "module": "Billing",
            "description": "Invoices and payments",
            "submodules": {"Invoices": "Create and send invoices"}
        }]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(chat_reply(&model_reply.to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let structurer =
        OpenAiStructurer::with_api_key(&mock_extractor_config(&mock_server), "test-key").unwrap();
    let records = structurer
        .extract_modules(&[sample_page("https://docs.example.com")])
        .await
        .unwrap();

    assert_eq!(
        records,
        vec![ModuleRecord {
            module: "Billing".to_string(),
            description: "Invoices and payments".to_string(),
            submodules: BTreeMap::from([(
                "Invoices".to_string(),
                "Create and send invoices".to_string()
            )]),
        }]
    );
}

#[tokio::test]
async fn test_rate_limited_response_maps_to_typed_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let structurer =
        OpenAiStructurer::with_api_key(&mock_extractor_config(&mock_server), "test-key").unwrap();
    let result = structurer
        .extract_modules(&[sample_page("https://docs.example.com")])
        .await;

    match result {
        Err(ExtractError::RateLimited { message }) => assert!(message.contains("quota")),
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_carries_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let structurer =
        OpenAiStructurer::with_api_key(&mock_extractor_config(&mock_server), "test-key").unwrap();
    let result = structurer
        .extract_modules(&[sample_page("https://docs.example.com")])
        .await;

    match result {
        Err(ExtractError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("backend down"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fenced_code_block_reply_is_salvaged() {
    let mock_server = MockServer::start().await;

    // Some models wrap the JSON in prose and a code fence despite the
    // response_format request
    let reply = "Here are the modules:\n```json\n[{\"module\": \"Auth\"}]\n```";
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_reply(reply))
        .expect(1)
        .mount(&mock_server)
        .await;

    let structurer =
        OpenAiStructurer::with_api_key(&mock_extractor_config(&mock_server), "test-key").unwrap();
    let records = structurer
        .extract_modules(&[sample_page("https://docs.example.com")])
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].module, "Auth");
    assert_eq!(records[0].description, "");
}

#[tokio::test]
async fn test_blank_model_reply_is_reported_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_reply("   "))
        .expect(1)
        .mount(&mock_server)
        .await;

    let structurer =
        OpenAiStructurer::with_api_key(&mock_extractor_config(&mock_server), "test-key").unwrap();
    let result = structurer
        .extract_modules(&[sample_page("https://docs.example.com")])
        .await;

    assert!(matches!(result, Err(ExtractError::EmptyResponse)));
}

#[tokio::test]
async fn test_pipeline_reports_modules_per_url() {
    let docs_server = MockServer::start().await;
    let model_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><h1>Payments</h1><p>Payment processing documentation</p></body></html>",
        ))
        .expect(1)
        .mount(&docs_server)
        .await;

    // The crawled text must reach the model inside the per-source prompt
    let model_reply = serde_json::json!({
        "modules": [{"module": "Payments", "description": "Payment processing"}]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains(format!(
            "Documentation from {}:",
            docs_server.uri()
        )))
        .and(body_string_contains("Payment processing documentation"))
        .respond_with(chat_reply(&model_reply.to_string()))
        .expect(1)
        .mount(&model_server)
        .await;

    let crawler = Crawler::new(&test_crawler_config()).unwrap();
    let structurer =
        OpenAiStructurer::with_api_key(&mock_extractor_config(&model_server), "test-key").unwrap();

    let report = run_pipeline(
        &crawler,
        &structurer,
        &[docs_server.uri()],
        Duration::from_secs(30),
    )
    .await
    .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].url, docs_server.uri());
    assert_eq!(report.results[0].modules[0].module, "Payments");
    assert!(report.failed_urls.is_empty());
    assert_eq!(report.total_modules(), 1);
}

#[tokio::test]
async fn test_pipeline_contains_structurer_failures_per_url() {
    let docs_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>First product docs</body></html>"),
        )
        .expect(1)
        .mount(&docs_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Second product docs</body></html>"),
        )
        .expect(1)
        .mount(&docs_server)
        .await;

    let crawler = Crawler::new(&test_crawler_config()).unwrap();
    let structurer = FlakyStructurer(sample_record("Reporting"));
    let urls = vec![
        format!("{}/one", docs_server.uri()),
        format!("{}/two", docs_server.uri()),
    ];

    let report = run_pipeline(&crawler, &structurer, &urls, Duration::from_secs(30))
        .await
        .unwrap();

    // The failing extraction yields an empty module list but does not take
    // the other URL down with it
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].url, urls[0]);
    assert!(report.results[0].modules.is_empty());
    assert_eq!(report.results[1].url, urls[1]);
    assert_eq!(report.results[1].modules, vec![sample_record("Reporting")]);
    assert!(report.failed_urls.is_empty());
}

#[tokio::test]
async fn test_pipeline_collects_unreachable_urls() {
    let docs_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>Live docs</body></html>"),
        )
        .mount(&docs_server)
        .await;

    let crawler = Crawler::new(&test_crawler_config()).unwrap();
    let structurer = StaticStructurer(sample_record("Catalog"));
    // Port 1 refuses connections immediately
    let dead_url = "http://127.0.0.1:1/".to_string();
    let urls = vec![docs_server.uri(), dead_url.clone()];

    let report = run_pipeline(&crawler, &structurer, &urls, Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].url, docs_server.uri());
    assert_eq!(report.failed_urls, vec![dead_url]);
}

#[tokio::test]
async fn test_pipeline_with_no_usable_content_is_an_error() {
    let crawler = Crawler::new(&test_crawler_config()).unwrap();
    let structurer = StaticStructurer(sample_record("Catalog"));
    let urls = vec!["http://127.0.0.1:1/".to_string()];

    let result = run_pipeline(&crawler, &structurer, &urls, Duration::from_secs(30)).await;

    assert!(matches!(result, Err(ModmapError::NoUsableContent)));
}

#[tokio::test]
async fn test_missing_environment_key_is_rejected() {
    std::env::remove_var("OPENAI_API_KEY");

    let result = OpenAiStructurer::from_env(&ExtractorConfig::default());

    assert!(matches!(result, Err(ExtractError::MissingApiKey)));
}
