pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::advisor::handlers;
use crate::state::AppState;

/// Upload cap for `/analyze/upload`; PDF resumes routinely exceed axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .route(
            "/analyze/upload",
            post(handlers::handle_analyze_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/interview-questions",
            post(handlers::handle_interview_questions),
        )
        .route("/chat", post(handlers::handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedGateway;

    const ANALYSIS_REPLY: &str =
        r#"{"matchScore":80,"skills":["Go"],"feedback":"Strong Go background"}"#;

    fn test_state(gateway: Arc<ScriptedGateway>) -> AppState {
        AppState {
            gateway,
            config: Config {
                openai_api_key: "sk-test".to_string(),
                openai_base_url: "http://127.0.0.1:9".to_string(),
                model: "gpt-4o-mini".to_string(),
                port: 8000,
                rust_log: "info".to_string(),
            },
        }
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(gateway: Arc<ScriptedGateway>, request: Request<Body>) -> (StatusCode, String) {
        let response = build_router(test_state(gateway))
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn analysis_body() -> Value {
        json!({"resume": "Five years of Go", "job": "Senior Go engineer"})
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(Arc::new(ScriptedGateway::replying("")), request).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        let (status, body) = send(gateway.clone(), json_request("/analyze", analysis_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"matchScore":80,"skills":["Go"],"feedback":"Strong Go background"}"#
        );
        let calls = gateway.calls();
        assert!(calls[0].messages[1].content.contains("Senior Go engineer"));
    }

    #[tokio::test]
    async fn test_analyze_fenced_reply_matches_bare_reply() {
        let fenced = format!("```json\n{ANALYSIS_REPLY}\n```");
        let (_, from_fenced) = send(
            Arc::new(ScriptedGateway::replying(&fenced)),
            json_request("/analyze", analysis_body()),
        )
        .await;
        let (_, from_bare) = send(
            Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY)),
            json_request("/analyze", analysis_body()),
        )
        .await;
        assert_eq!(from_fenced, from_bare);
    }

    #[tokio::test]
    async fn test_analyze_prose_reply_returns_failure_shape() {
        let gateway = Arc::new(ScriptedGateway::replying("This candidate is great."));
        let (status, body) = send(gateway, json_request("/analyze", analysis_body())).await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["matchScore"], 0);
        assert_eq!(body["skills"], json!([]));
        let feedback = body["feedback"].as_str().unwrap();
        assert!(feedback.starts_with("Error during analysis: "));
        assert!(feedback.len() > "Error during analysis: ".len());
        assert_eq!(body.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_gateway_failure_maps_to_each_failure_shape() {
        let (status, body) = send(
            Arc::new(ScriptedGateway::failing(503, "overloaded")),
            json_request("/analyze", analysis_body()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({
                "matchScore": 0,
                "skills": [],
                "feedback": "Error during analysis: API error (status 503): overloaded"
            })
        );

        let (status, body) = send(
            Arc::new(ScriptedGateway::failing(503, "overloaded")),
            json_request("/interview-questions", analysis_body()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"error": "API error (status 503): overloaded"})
        );

        let (status, body) = send(
            Arc::new(ScriptedGateway::failing(503, "overloaded")),
            json_request("/chat", json!({"message": "hi", "context": "resume"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"error": "API error (status 503): overloaded"})
        );
    }

    #[tokio::test]
    async fn test_questions_and_chat_return_text_verbatim() {
        let reply = "not json at all {";
        let (_, body) = send(
            Arc::new(ScriptedGateway::replying(reply)),
            json_request("/interview-questions", analysis_body()),
        )
        .await;
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"questions": reply})
        );

        let (_, body) = send(
            Arc::new(ScriptedGateway::replying(reply)),
            json_request("/chat", json!({"message": "hi", "context": "resume"})),
        )
        .await;
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"reply": reply})
        );
    }

    #[tokio::test]
    async fn test_identical_inputs_yield_identical_bytes() {
        for uri in ["/analyze", "/interview-questions"] {
            let (_, first) = send(
                Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY)),
                json_request(uri, analysis_body()),
            )
            .await;
            let (_, second) = send(
                Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY)),
                json_request(uri, analysis_body()),
            )
            .await;
            assert_eq!(first, second);
        }
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_before_gateway() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        let (status, body) = send(
            gateway.clone(),
            json_request("/analyze", json!({"resume": "only a resume"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(gateway.calls().is_empty());
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str("--BOUNDARY\r\n");
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str("--BOUNDARY--\r\n");

        Request::builder()
            .method("POST")
            .uri("/analyze/upload")
            .header("content-type", "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_analyzes_text_resume_and_echoes_it() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        let request = multipart_request(&[
            ("job", None, "Senior Go engineer"),
            ("resume", Some("resume.txt"), "Jane Doe, five years of Go"),
        ]);

        let (status, body) = send(gateway.clone(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({
                "matchScore": 80,
                "skills": ["Go"],
                "feedback": "Strong Go background",
                "resumeText": "Jane Doe, five years of Go"
            })
        );
        let prompt = &gateway.calls()[0].messages[1].content;
        assert!(prompt.contains("Resume Content:\nJane Doe, five years of Go"));
    }

    #[tokio::test]
    async fn test_upload_without_resume_is_validation_error() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        let request = multipart_request(&[("job", None, "Senior Go engineer")]);

        let (status, body) = send(gateway.clone(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["message"], "No resume file uploaded");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_job_is_rejected_before_pdf_extraction() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        // Not a real PDF: extracting it would answer 422 instead of 400.
        let request = multipart_request(&[("resume", Some("resume.pdf"), "not a pdf")]);

        let (status, body) = send(gateway.clone(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Missing job field");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_with_two_resumes_is_validation_error() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        let request = multipart_request(&[
            ("resume", Some("first.txt"), "First resume"),
            ("resume", Some("second.txt"), "Second resume"),
            ("job", None, "Senior Go engineer"),
        ]);

        let (status, body) = send(gateway.clone(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["message"], "Only one resume file may be uploaded");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_gateway_failure_keeps_resume_text() {
        let request = multipart_request(&[
            ("resume", Some("resume.txt"), "Jane"),
            ("job", None, "Senior Go engineer"),
        ]);

        let (status, body) = send(Arc::new(ScriptedGateway::failing(500, "boom")), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({
                "matchScore": 0,
                "skills": [],
                "feedback": "Error during analysis: API error (status 500): boom",
                "resumeText": "Jane"
            })
        );
    }

    #[tokio::test]
    async fn test_upload_with_non_multipart_body_uses_error_envelope() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        let request = Request::builder()
            .method("POST")
            .uri("/analyze/upload")
            .header("content-type", "application/json")
            .body(Body::from(analysis_body().to_string()))
            .unwrap();

        let (status, body) = send(gateway.clone(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_payload_too_large() {
        let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
        let oversized = "a".repeat(MAX_UPLOAD_BYTES + 1024 * 1024);
        let request = multipart_request(&[
            ("job", None, "Senior Go engineer"),
            ("resume", Some("resume.txt"), oversized.as_str()),
        ]);

        let (status, body) = send(gateway.clone(), request).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_bodies_are_unprocessable_on_every_json_endpoint() {
        for uri in ["/analyze", "/interview-questions", "/chat"] {
            let gateway = Arc::new(ScriptedGateway::replying(ANALYSIS_REPLY));
            let malformed = Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from("{\"resume\": "))
                .unwrap();
            let (status, body) = send(gateway.clone(), malformed).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "malformed JSON on {uri}");
            let body: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

            let wrong_type = Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "text/plain")
                .body(Body::from(analysis_body().to_string()))
                .unwrap();
            let (status, body) = send(gateway.clone(), wrong_type).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "wrong content type on {uri}");
            let body: Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

            assert!(gateway.calls().is_empty(), "gateway called for {uri}");
        }
    }
}
