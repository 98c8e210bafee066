pub mod health;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::documents::handlers::handle_extract_resume;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        // Generation API
        .route(
            "/api/generate-resume",
            post(handlers::handle_generate_resume),
        )
        .route(
            "/api/generate-cover-letter",
            post(handlers::handle_generate_cover_letter),
        )
        .route(
            "/api/generate-questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/generate-study-guide",
            post(handlers::handle_generate_study_guide),
        )
        // Uploads
        .route("/api/extract-resume", post(handle_extract_resume))
        .layer(cors)
        .with_state(state)
}

/// Permissive when no origins are configured. Otherwise only the listed
/// origins, with `Content-Disposition` exposed so browsers can read the
/// download filename.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::documents::reader::paragraph_texts;
    use crate::documents::DOCX_MIME;
    use crate::llm_client::{Completion, LlmError, TextGenerator};

    #[derive(Debug, Clone, PartialEq)]
    struct SeenCall {
        api_key: String,
        prompt: String,
        max_tokens: u32,
    }

    /// Returns fixed text and records every request it receives.
    struct CannedGenerator {
        text: String,
        calls: Mutex<Vec<SeenCall>>,
    }

    impl CannedGenerator {
        fn new(text: &str) -> Arc<Self> {
            Arc::new(Self {
                text: text.to_string(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<SeenCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, request: Completion<'_>) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(SeenCall {
                api_key: request.api_key.to_string(),
                prompt: request.prompt.to_string(),
                max_tokens: request.max_tokens,
            });
            Ok(self.text.clone())
        }
    }

    struct FailingGenerator {
        status: u16,
    }

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _request: Completion<'_>) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: self.status,
                message: "provider failure".to_string(),
            })
        }
    }

    fn router_with(llm: Arc<dyn TextGenerator>, config: Config) -> Router {
        build_router(AppState::new(llm, config))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn disposition(response: &Response<Body>) -> String {
        response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string()
    }

    const RESUME_OUTPUT: &str = "Jane Doe\nSUMMARY\nBackend engineer.\n- Built payment APIs\n\n---METADATA---\nJOB_TITLE: Senior Rust Engineer\nCOMPANY_NAME: Acme Corp\n";

    #[tokio::test]
    async fn test_root_and_health() {
        let app = router_with(CannedGenerator::new(""), Config::default());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "F8 JobEase API is running"})
        );

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_generate_resume_streams_docx_named_from_metadata() {
        let llm = CannedGenerator::new(RESUME_OUTPUT);
        let app = router_with(llm.clone(), Config::default());

        let response = app
            .oneshot(post_json(
                "/api/generate-resume",
                json!({
                    "apiKey": "sk-user",
                    "baseResume": "Jane Doe, engineer",
                    "jobDescription": "Senior Rust Engineer at Acme Corp"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
        assert_eq!(
            disposition(&response),
            "attachment; filename=\"FO_Senior_Rust_Engineer_Acme_Corp.docx\""
        );

        let bytes = body_bytes(response).await;
        assert_eq!(
            paragraph_texts(&bytes).unwrap(),
            vec!["Jane Doe", "SUMMARY", "Backend engineer.", "Built payment APIs"]
        );

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].api_key, "sk-user");
        assert_eq!(calls[0].max_tokens, 4096);
        assert!(calls[0].prompt.contains("Jane Doe, engineer"));
        assert!(calls[0].prompt.contains("Senior Rust Engineer at Acme Corp"));
    }

    #[tokio::test]
    async fn test_generate_resume_requires_fields() {
        let llm = CannedGenerator::new(RESUME_OUTPUT);
        let app = router_with(llm.clone(), Config::default());

        let response = app
            .oneshot(post_json(
                "/api/generate-resume",
                json!({"apiKey": "sk-user", "baseResume": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_without_server_fallback() {
        let app = router_with(CannedGenerator::new("text"), Config::default());

        let response = app
            .oneshot(post_json(
                "/api/generate-cover-letter",
                json!({"baseResume": "resume", "jobDescription": "job"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "MISSING_API_KEY");
    }

    #[tokio::test]
    async fn test_server_api_key_is_fallback() {
        let llm = CannedGenerator::new("Dear Hiring Manager,\n\nI am excited to apply.");
        let config = Config {
            anthropic_api_key: Some("sk-server".to_string()),
            ..Config::default()
        };
        let app = router_with(llm.clone(), config);

        let response = app
            .oneshot(post_json(
                "/api/generate-cover-letter",
                json!({"apiKey": "", "baseResume": "resume", "jobDescription": "job"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            disposition(&response),
            "attachment; filename=\"FO_Cover_Letter.docx\""
        );
        let calls = llm.calls();
        assert_eq!(calls[0].api_key, "sk-server");
        assert_eq!(calls[0].max_tokens, 2000);
    }

    #[tokio::test]
    async fn test_generate_questions_returns_categorized_json() {
        let output = (1..=20)
            .map(|n| format!("{n}. Question {n}?"))
            .collect::<Vec<_>>()
            .join("\n");
        let llm = CannedGenerator::new(&output);
        let app = router_with(llm.clone(), Config::default());

        let response = app
            .oneshot(post_json(
                "/api/generate-questions",
                json!({"apiKey": "sk-user", "jobRole": "Data Engineer"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 20);
        assert_eq!(
            questions[0],
            json!({"id": 0, "question": "Question 1?", "category": "Behavioral"})
        );
        assert_eq!(questions[7]["category"], "Technical");
        assert_eq!(questions[12]["category"], "Situational");
        assert_eq!(questions[19]["category"], "General");

        let calls = llm.calls();
        assert_eq!(calls[0].max_tokens, 3000);
        assert!(calls[0].prompt.contains("Data Engineer"));
    }

    #[tokio::test]
    async fn test_generate_study_guide_uses_job_title_and_company() {
        let llm = CannedGenerator::new("Study Guide\nROLE OVERVIEW\n- Learn Spark");
        let config = Config {
            generation: crate::config::GenerationConfig {
                filename_prefix: "JD".to_string(),
                ..Default::default()
            },
            ..Config::default()
        };
        let app = router_with(llm.clone(), config);

        let response = app
            .oneshot(post_json(
                "/api/generate-study-guide",
                json!({"apiKey": "sk-user", "jobTitle": "Data Engineer", "company": "Acme"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            disposition(&response),
            "attachment; filename=\"JD_Study_Guide_Data_Engineer.docx\""
        );
        let calls = llm.calls();
        assert!(calls[0].prompt.contains("for Data Engineer at Acme."));
        assert_eq!(calls[0].max_tokens, 4000);
    }

    #[tokio::test]
    async fn test_llm_failure_maps_to_bad_gateway() {
        let app = router_with(Arc::new(FailingGenerator { status: 529 }), Config::default());

        let response = app
            .oneshot(post_json(
                "/api/generate-questions",
                json!({"apiKey": "sk-user", "jobRole": "SRE"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(body["error"]["message"], "An AI processing error occurred");
    }

    #[tokio::test]
    async fn test_rejected_api_key_maps_to_unauthorized() {
        let app = router_with(Arc::new(FailingGenerator { status: 401 }), Config::default());

        let response = app
            .oneshot(post_json(
                "/api/generate-resume",
                json!({"apiKey": "sk-bad", "baseResume": "r", "jobDescription": "j"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_AUTH_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = router_with(CannedGenerator::new("text"), Config::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/generate-resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn multipart_request(filename: &str, contents: &[u8]) -> Request<Body> {
        let boundary = "jobease-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/extract-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extract_resume_from_text_upload() {
        let app = router_with(CannedGenerator::new(""), Config::default());

        let response = app
            .oneshot(multipart_request("resume.txt", b"Jane Doe\nRust engineer"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"filename": "resume.txt", "format": "text", "text": "Jane Doe\nRust engineer"})
        );
    }

    #[tokio::test]
    async fn test_extract_resume_from_docx_upload() {
        let style = crate::documents::DocumentStyle::default();
        let docx = crate::documents::build_docx("Jane Doe\nEXPERIENCE\n- Shipped", &style).unwrap();
        let app = router_with(CannedGenerator::new(""), Config::default());

        let response = app
            .oneshot(multipart_request("resume.docx", &docx))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["text"],
            "Jane Doe\nEXPERIENCE\nShipped"
        );
    }

    #[tokio::test]
    async fn test_extract_resume_rejects_unknown_extension() {
        let app = router_with(CannedGenerator::new(""), Config::default());

        let response = app
            .oneshot(multipart_request("resume.odt", b"whatever"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_cors_permissive_by_default() {
        let app = router_with(CannedGenerator::new(""), Config::default());

        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "https://jobease.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_restricted_to_configured_origins() {
        let config = Config {
            cors_allowed_origins: vec!["https://jobease.example".to_string()],
            ..Config::default()
        };
        let app = router_with(CannedGenerator::new(""), config);

        let allowed = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "https://jobease.example")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(allowed).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://jobease.example"
        );

        let denied = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(denied).await.unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
