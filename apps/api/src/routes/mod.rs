pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers as cover_letter;
use crate::insights::handlers as insights;
use crate::interview::handlers as interview;
use crate::profile::handlers as profile;
use crate::render::handlers as render;
use crate::resume::handlers as resume;
use crate::resume::import::MAX_UPLOAD_BYTES;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume builder
        .route("/api/v1/resume/markdown", post(resume::handle_compose_markdown))
        .route("/api/v1/resume/extract", post(resume::handle_extract))
        .route("/api/v1/resume/improve", post(resume::handle_improve))
        .route("/api/v1/resume/pdf", post(render::handle_render_pdf))
        .route(
            "/api/v1/resume/import",
            post(resume::handle_import).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Cover letters
        .route(
            "/api/v1/cover-letters",
            post(cover_letter::handle_generate_cover_letter),
        )
        // Interview preparation
        .route("/api/v1/interview/quiz", post(interview::handle_generate_quiz))
        .route("/api/v1/interview/results", post(interview::handle_submit_results))
        .route("/api/v1/interview/stats", post(interview::handle_stats))
        // Industry insights
        .route("/api/v1/insights", get(insights::handle_get_insight))
        .route("/api/v1/onboarding", post(profile::handle_onboarding))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::insights::models::fixtures::ANALYSIS_JSON;
    use crate::insights::store::MemoryInsightStore;
    use crate::interview::quiz::fixtures::{questions, quiz_json};
    use crate::layout::PageConfig;
    use crate::llm_client::testing::StubGenerator;
    use crate::render::render_markdown_pdf;
    use crate::resume::markdown::compose_markdown;
    use crate::resume::markdown::fixtures::sample_form;

    fn test_state(llm: Arc<StubGenerator>) -> AppState {
        AppState {
            llm,
            insights: Arc::new(MemoryInsightStore::new()),
            config: Arc::new(Config {
                gemini_api_key: "test-key".to_string(),
                redis_url: None,
                port: 0,
                rust_log: "debug".to_string(),
                insight_refresh: false,
            }),
            page_config: Arc::new(PageConfig::default()),
        }
    }

    fn app(reply: &str) -> (Router, Arc<StubGenerator>) {
        let stub = Arc::new(StubGenerator::replying(reply));
        (build_router(test_state(stub.clone())), stub)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn resume_json() -> Value {
        serde_json::to_value(sample_form()).unwrap()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Health
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app("unused");
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "coach-api");
        assert_eq!(body["insightCache"], "memory");
    }

    // ────────────────────────────────────────────────────────────────────────
    // Resume
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_compose_markdown() {
        let (app, _) = app("unused");
        let response = app
            .oneshot(post_json("/api/v1/resume/markdown", resume_json()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let markdown = body["markdown"].as_str().unwrap();
        assert!(markdown.contains("## Experience"));
        assert!(markdown.contains("jane@example.com"));
        assert_eq!(body["issues"], json!([]));
    }

    #[tokio::test]
    async fn test_compose_markdown_reports_issues() {
        let (app, _) = app("unused");
        let mut form = resume_json();
        form["contactInfo"]["email"] = json!("not-an-email");
        let response = app
            .oneshot(post_json("/api/v1/resume/markdown", form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["issues"][0]["path"], "contactInfo.email");
    }

    #[tokio::test]
    async fn test_extract_round_trips_form() {
        let (app, _) = app("unused");
        let markdown = compose_markdown(&sample_form());
        let response = app
            .oneshot(post_json("/api/v1/resume/extract", json!({ "markdown": markdown })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["info"]["email"], "jane@example.com");
        assert_eq!(body["resume"]["experience"][0]["organization"], "Acme");
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_markdown() {
        let (app, _) = app("unused");
        let response = app
            .oneshot(post_json("/api/v1/resume/extract", json!({ "markdown": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_render_pdf() {
        let (app, _) = app("unused");
        let markdown = compose_markdown(&sample_form());
        let response = app
            .oneshot(post_json("/api/v1/resume/pdf", json!({ "markdown": markdown })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_pdf_rejects_empty_markdown() {
        let (app, _) = app("unused");
        let response = app
            .oneshot(post_json("/api/v1/resume/pdf", json!({ "markdown": "" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_render_pdf_rejects_unprintable_markdown() {
        let (app, _) = app("unused");
        let response = app
            .oneshot(post_json("/api/v1/resume/pdf", json!({ "markdown": "\u{1F4E7}" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_import_pdf_upload() {
        let (app, _) = app("unused");
        let markdown = compose_markdown(&sample_form());
        let pdf = render_markdown_pdf(&markdown, &PageConfig::default()).unwrap();

        let boundary = "coach-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(&pdf);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resume/import")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["info"]["email"], "jane@example.com");
        assert!(body["markdown"].as_str().unwrap().contains("## Experience"));
    }

    #[tokio::test]
    async fn test_improve() {
        let (app, stub) = app("  Led the migration to Rust, cutting p99 latency by 40%.  ");
        let response = app
            .oneshot(post_json(
                "/api/v1/resume/improve",
                json!({
                    "type": "experience",
                    "currentContent": "Worked on backend stuff",
                    "profile": { "industry": "tech-software-development" }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["content"],
            "Led the migration to Rust, cutting p99 latency by 40%."
        );
        assert!(stub.last_prompt().contains("tech-software-development"));
    }

    #[tokio::test]
    async fn test_improve_maps_llm_failure_to_bad_gateway() {
        let stub = Arc::new(StubGenerator::failing("quota exceeded"));
        let app = build_router(test_state(stub));
        let response = app
            .oneshot(post_json(
                "/api/v1/resume/improve",
                json!({ "type": "project", "currentContent": "Built a CLI" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
    }

    // ────────────────────────────────────────────────────────────────────────
    // Cover letters
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_cover_letter() {
        let (app, _) = app("Dear Hiring Manager,");
        let response = app
            .oneshot(post_json(
                "/api/v1/cover-letters",
                json!({
                    "companyName": "Acme",
                    "jobTitle": "Platform Engineer",
                    "jobDescription": "Run our Kubernetes fleet."
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["content"], "Dear Hiring Manager,");
        assert_eq!(body["status"], "completed");
    }

    #[tokio::test]
    async fn test_cover_letter_validation_details() {
        let (app, stub) = app("unused");
        let response = app
            .oneshot(post_json(
                "/api/v1/cover-letters",
                json!({ "companyName": "", "jobTitle": "Engineer", "jobDescription": "" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["details"][0]["path"], "companyName");
        assert_eq!(body["error"]["details"][1]["path"], "jobDescription");
        assert_eq!(stub.prompt_count(), 0);
    }

    // ────────────────────────────────────────────────────────────────────────
    // Interview
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_quiz() {
        let (app, _) = app(&quiz_json(10));
        let response = app
            .oneshot(post_json(
                "/api/v1/interview/quiz",
                json!({ "profile": { "industry": "tech", "skills": ["Rust"] } }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["questions"].as_array().unwrap().len(), 10);
        assert_eq!(body["questions"][0]["correctAnswer"], "A");
    }

    #[tokio::test]
    async fn test_submit_results_all_correct() {
        let (app, stub) = app("unused");
        let response = app
            .oneshot(post_json(
                "/api/v1/interview/results",
                json!({ "questions": questions(2), "answers": ["A", "A"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["quizScore"], 100.0);
        assert_eq!(body["improvementTip"], Value::Null);
        assert_eq!(stub.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_stats_for_empty_history() {
        let (app, _) = app("unused");
        let response = app
            .oneshot(post_json("/api/v1/interview/stats", json!({ "assessments": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["totalAssessments"], 0);
    }

    // ────────────────────────────────────────────────────────────────────────
    // Insights and onboarding
    // ────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_insight_is_cached_between_requests() {
        let (app, stub) = app(ANALYSIS_JSON);
        let first = app
            .clone()
            .oneshot(get_request("/api/v1/insights?industry=tech-software-development"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let body = json_body(first).await;
        assert_eq!(body["industry"], "tech-software-development");
        assert_eq!(body["salaryChart"][0]["name"], "Software Engineer");

        let second = app
            .oneshot(get_request("/api/v1/insights?industry=tech-software-development"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(stub.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_onboarding_rejects_missing_industry() {
        let (app, stub) = app(ANALYSIS_JSON);
        let response = app
            .oneshot(post_json(
                "/api/v1/onboarding",
                json!({
                    "industry": "",
                    "subIndustry": "software-development",
                    "experience": "5",
                    "skills": "Rust, Go"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["details"][0]["path"], "industry");
        assert_eq!(stub.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_onboarding_builds_profile_and_insight() {
        let (app, _) = app(ANALYSIS_JSON);
        let response = app
            .oneshot(post_json(
                "/api/v1/onboarding",
                json!({
                    "industry": "tech",
                    "subIndustry": "software-development",
                    "experience": "5",
                    "skills": "Rust, Go"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["profile"]["industry"], "tech-software-development");
        assert_eq!(body["profile"]["skills"], json!(["Rust", "Go"]));
        assert_eq!(body["industryInsight"]["industry"], "tech-software-development");
    }
}
