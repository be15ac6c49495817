//! Integration tests for the glossa HTTP API
//!
//! Runs the real router, resolver, and in-memory store against stubbed
//! generation/encyclopedia backends.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use glossa_app::rate_limit::LookupRateLimiter;
use glossa_app::{AppState, build_router};
use glossa_core::resolver::{Resolver, ResolverOptions};
use glossa_provider::{
    DefinitionRequest, Encyclopedia, GeneratedDefinition, Provider, ProviderError,
};
use glossa_store::MemoryStore;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

struct StubProvider {
    audio: Vec<u8>,
    image: Option<String>,
}

impl StubProvider {
    fn silent() -> Self {
        Self {
            audio: Vec::new(),
            image: None,
        }
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn generate_definition(
        &self,
        request: &DefinitionRequest,
    ) -> Result<GeneratedDefinition, ProviderError> {
        Ok(GeneratedDefinition {
            definition_target: format!("generated definition of {}", request.word),
            definition: "generierte Definition".to_string(),
            examples: Vec::new(),
            usage_note: None,
            phonetic: None,
            is_valid_word: true,
            suggested_word: None,
        })
    }

    async fn generate_image(&self, _prompt: &str, _meaning_context: Option<&str>) -> Option<String> {
        self.image.clone()
    }

    async fn generate_audio(&self, _text: &str, _language: &str) -> Vec<u8> {
        self.audio.clone()
    }
}

struct NoEncyclopedia;

#[async_trait]
impl Encyclopedia for NoEncyclopedia {
    async fn fetch_summary(
        &self,
        _word: &str,
        _language: &str,
    ) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}

/// Test helper: app with a fresh store, stubbed provider, and the given
/// lookup budget. Empty admin token leaves the admin check disabled.
fn setup_app(provider: StubProvider, rate_limit: u32, admin_token: &str) -> Router {
    let gateway = Arc::new(MemoryStore::new());
    let provider = Arc::new(provider);

    let resolver = Arc::new(Resolver::new(
        gateway.clone(),
        provider.clone(),
        Arc::new(NoEncyclopedia),
        ResolverOptions::default(),
    ));

    let state = AppState {
        resolver,
        gateway,
        provider,
        limiter: Arc::new(LookupRateLimiter::new(rate_limit, Duration::from_secs(60))),
        admin_token: admin_token.to_string(),
    };

    build_router(state)
}

fn default_app() -> Router {
    setup_app(StubProvider::silent(), 1000, "")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn json_request_as(method: &str, uri: &str, user: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-id", user)
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn lookup_body(word: &str) -> Value {
    json!({
        "word": word,
        "targetLanguage": "en",
        "nativeLanguage": "de",
    })
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

fn corpus_body() -> Value {
    json!({
        "entries": [
            {
                "word": "bank",
                "targetLanguage": "en",
                "nativeLanguage": "de",
                "definitionTarget": "1. a financial institution 2. the edge of a river",
                "definition": "1. die Bank 2. das Ufer",
                "examples": [
                    {"sentence": "I went to the bank.", "translation": "Ich ging zur Bank.", "meaningIndex": 1},
                    {"sentence": "We sat by the bank.", "translation": "Wir saßen am Ufer.", "meaningIndex": 2}
                ]
            }
        ]
    })
}

// =========================================================================

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = default_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn lookup_rejects_blank_word() {
    let app = default_app();

    let response = app
        .oneshot(json_request("POST", "/api/lookup", lookup_body("   ")))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_rejects_missing_language_fields_with_400() {
    let app = default_app();

    let response = app
        .oneshot(json_request("POST", "/api/lookup", json!({ "word": "bank" })))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_falls_back_to_generation() {
    let app = default_app();

    let response = app
        .oneshot(json_request("POST", "/api/lookup", lookup_body("bank")))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["source"], "llm");
    assert_eq!(body["word"], "bank");
    assert_eq!(body["definitionTarget"], "generated definition of bank");
}

#[tokio::test]
async fn imported_corpus_serves_lookups_with_meanings() {
    let app = default_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/import", corpus_body()))
        .await
        .expect("import should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["imported"], 1);

    let response = app
        .oneshot(json_request("POST", "/api/lookup", lookup_body("bank")))
        .await
        .expect("lookup should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["source"], "database");
    assert!(body["wordDefinitionId"].is_string());
    assert_eq!(body["meanings"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["meanings"][0]["examples"][0]["sentence"], "I went to the bank.");
    assert_eq!(body["meanings"][1]["examples"][0]["sentence"], "We sat by the bank.");
}

#[tokio::test]
async fn force_ai_bypasses_the_imported_corpus() {
    let app = default_app();

    app.clone()
        .oneshot(json_request("POST", "/api/admin/import", corpus_body()))
        .await
        .expect("import should succeed");

    let mut body = lookup_body("bank");
    body["forceAI"] = json!(true);

    let response = app
        .oneshot(json_request("POST", "/api/lookup", body))
        .await
        .expect("lookup should succeed");

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["source"], "llm");
}

#[tokio::test]
async fn exhausted_budget_returns_429_with_future_reset() {
    let app = setup_app(StubProvider::silent(), 30, "");

    for i in 0..30 {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/lookup", lookup_body("bank")))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK, "request {i} is within budget");
    }

    let response = app
        .oneshot(json_request("POST", "/api/lookup", lookup_body("bank")))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = extract_json(response.into_body()).await;
    let reset_at: DateTime<Utc> = body["resetAt"]
        .as_str()
        .expect("resetAt should be present")
        .parse()
        .expect("resetAt should be a timestamp");
    assert!(reset_at > Utc::now());
}

#[tokio::test]
async fn rate_limit_budgets_are_per_identity() {
    let app = setup_app(StubProvider::silent(), 1, "");

    let response = app
        .clone()
        .oneshot(json_request_as("POST", "/api/lookup", "user-1", lookup_body("bank")))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request_as("POST", "/api/lookup", "user-1", lookup_body("bank")))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app
        .oneshot(json_request_as("POST", "/api/lookup", "user-2", lookup_body("bank")))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK, "other users keep their budget");
}

#[tokio::test]
async fn notebook_requires_identity() {
    let app = default_app();

    let response = app
        .oneshot(json_request("POST", "/api/notebook", json!({
            "word": "bank",
            "targetLanguage": "en",
            "nativeLanguage": "de",
            "definitionTarget": "a financial institution",
            "definition": "die Bank",
        })))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn saved_notebook_entry_resolves_first() {
    let app = default_app();

    let response = app
        .clone()
        .oneshot(json_request_as("POST", "/api/notebook", "user-1", json!({
            "word": "bank",
            "targetLanguage": "en",
            "nativeLanguage": "de",
            "definitionTarget": "my own definition",
            "definition": "meine eigene Definition",
        })))
        .await
        .expect("save should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request_as("POST", "/api/lookup", "user-1", lookup_body("bank")))
        .await
        .expect("lookup should succeed");
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["source"], "notebook");
    assert_eq!(body["definitionTarget"], "my own definition");

    // other users are unaffected
    let response = app
        .oneshot(json_request_as("POST", "/api/lookup", "user-2", lookup_body("bank")))
        .await
        .expect("lookup should succeed");
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["source"], "llm");
}

#[tokio::test]
async fn deleted_notebook_entry_is_gone() {
    let app = default_app();

    let response = app
        .clone()
        .oneshot(json_request_as("POST", "/api/notebook", "user-1", json!({
            "word": "bank",
            "targetLanguage": "en",
            "nativeLanguage": "de",
            "definitionTarget": "x",
            "definition": "y",
        })))
        .await
        .expect("save should succeed");
    let saved = extract_json(response.into_body()).await;
    let id = saved["id"].as_str().expect("saved entry has an id").to_string();

    let response = app
        .clone()
        .oneshot(json_request_as("DELETE", &format!("/api/notebook/{id}"), "user-1", json!({})))
        .await
        .expect("delete should succeed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request_as("GET", "/api/notebook", "user-1", json!({})))
        .await
        .expect("list should succeed");
    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn user_edit_changes_lookup_source() {
    let app = default_app();

    app.clone()
        .oneshot(json_request("POST", "/api/admin/import", corpus_body()))
        .await
        .expect("import should succeed");

    let response = app
        .clone()
        .oneshot(json_request_as("POST", "/api/lookup", "user-1", lookup_body("bank")))
        .await
        .expect("lookup should succeed");
    let body = extract_json(response.into_body()).await;
    let definition_id = body["wordDefinitionId"]
        .as_str()
        .expect("database result carries its entry id")
        .to_string();

    let response = app
        .clone()
        .oneshot(json_request_as(
            "PUT",
            &format!("/api/definitions/{definition_id}/edit"),
            "user-1",
            json!({ "definition": "1. meine Bank 2. mein Ufer" }),
        ))
        .await
        .expect("edit should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request_as("POST", "/api/lookup", "user-1", lookup_body("bank")))
        .await
        .expect("lookup should succeed");
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["source"], "user_edit");
    assert_eq!(body["definition"], "1. meine Bank 2. mein Ufer");
    assert_eq!(
        body["definitionTarget"], "1. a financial institution 2. the edge of a river",
        "blank edit fields keep the base entry"
    );

    // the edit is private to its author
    let response = app
        .oneshot(json_request("POST", "/api/lookup", lookup_body("bank")))
        .await
        .expect("lookup should succeed");
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["source"], "database");
}

#[tokio::test]
async fn admin_import_rejects_wrong_token() {
    let app = setup_app(StubProvider::silent(), 1000, "secret");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/import", corpus_body()))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = Request::builder()
        .method("POST")
        .uri("/api/admin/import")
        .header("content-type", "application/json")
        .header("x-admin-token", "secret")
        .body(Body::from(corpus_body().to_string()))
        .expect("request should build");

    let response = app.oneshot(request).await.expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_import_rejects_malformed_corpus() {
    let app = default_app();

    let response = app
        .oneshot(json_request("POST", "/api/admin/import", json!({ "entries": 3 })))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unavailable_audio_yields_204() {
    let app = default_app();

    let response = app
        .oneshot(json_request("POST", "/api/audio", json!({
            "text": "die Bank",
            "language": "de",
        })))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn synthesized_audio_is_served_as_mpeg() {
    let app = setup_app(
        StubProvider {
            audio: vec![1, 2, 3],
            image: None,
        },
        1000,
        "",
    );

    let response = app
        .oneshot(json_request("POST", "/api/audio", json!({
            "text": "die Bank",
            "language": "de",
        })))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("audio/mpeg")
    );
}

#[tokio::test]
async fn missing_image_is_an_empty_url_not_an_error() {
    let app = default_app();

    let response = app
        .oneshot(json_request("POST", "/api/image", json!({
            "word": "bank",
            "meaningIndex": 2,
        })))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["imageUrl"], "");
}

#[tokio::test]
async fn found_image_url_is_returned() {
    let app = setup_app(
        StubProvider {
            audio: Vec::new(),
            image: Some("https://img.example/bank.jpg".to_string()),
        },
        1000,
        "",
    );

    let response = app
        .oneshot(json_request("POST", "/api/image", json!({ "word": "bank" })))
        .await
        .expect("request should succeed");

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["imageUrl"], "https://img.example/bank.jpg");
}
