pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::drafting::handlers as drafting;
use crate::export::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/nda/clauses", get(drafting::handle_list_clauses))
        .route("/api/v1/nda/clauses/:name", get(drafting::handle_get_clause))
        .route("/api/v1/nda/prompt", post(drafting::handle_compile_prompt))
        .route("/api/v1/nda/draft", post(drafting::handle_draft))
        .route("/api/v1/nda/export", post(export::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::drafting::ClauseRuleTable;
    use crate::llm_client::{ContractDrafter, LlmError};

    /// Records the prompt it receives and answers with fixed text.
    #[derive(Default)]
    struct StubDrafter {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ContractDrafter for StubDrafter {
        async fn draft(&self, prompt: &str) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(LlmError::Api {
                    status: 400,
                    message: "API key not valid.".to_string(),
                });
            }
            Ok("NON-DISCLOSURE AGREEMENT\nArticle 1. Definitions\nText.".to_string())
        }
    }

    fn app(drafter: Arc<StubDrafter>) -> Router {
        build_router(AppState {
            rules: Arc::new(ClauseRuleTable::builtin()),
            drafter,
        })
    }

    fn form(party_role: &str, duration: u32) -> Value {
        json!({
            "client_name": "OCP",
            "client_type_and_address": "Public Company, Casablanca, Morocco",
            "counterparty_name": "Tech Solutions Inc.",
            "counterparty_type_and_address": "Private Company, Paris, France",
            "purpose": "Evaluate a partnership.",
            "applicable_law": "French Law",
            "litigation": "Arbitration under ICC Rules, seat in Paris",
            "duration": duration,
            "language": "English",
            "party_role": party_role
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_clauses_in_table_order() {
        let response = app(Arc::default())
            .oneshot(Request::get("/api/v1/nda/clauses").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let clauses = body.as_array().unwrap();
        assert_eq!(clauses.len(), 15);
        assert_eq!(clauses[0]["name"], "Preamble and Parties");
        assert_eq!(clauses[0]["role_conditioned"], false);
        assert_eq!(clauses[2]["name"], "Representatives");
        assert_eq!(clauses[2]["role_conditioned"], true);
    }

    #[tokio::test]
    async fn test_get_clause_returns_role_variants() {
        let response = app(Arc::default())
            .oneshot(
                Request::get("/api/v1/nda/clauses/Representatives")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["name"], "Representatives");
        assert!(body.get("instructions").is_none());
        assert_eq!(
            body["variants"]["mutual"],
            "Draft a fair and balanced definition of 'Representatives', typically including \
             employees, directors, and professional advisors (legal, financial) on a need-to-know \
             basis. Both Parties shall be responsible for breaches by their respective Representatives."
        );
        assert_eq!(body["variants"]["receiving"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_clause_decodes_spaces_in_name() {
        let response = app(Arc::default())
            .oneshot(
                Request::get("/api/v1/nda/clauses/Preamble%20and%20Parties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body.get("variants").is_none());
        assert!(!body["instructions"].is_null());
    }

    #[tokio::test]
    async fn test_get_unknown_clause_is_not_found() {
        let response = app(Arc::default())
            .oneshot(
                Request::get("/api/v1/nda/clauses/Warranties")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_compile_prompt_does_not_call_the_model() {
        let drafter = Arc::new(StubDrafter::default());
        let response = app(drafter.clone())
            .oneshot(post_json("/api/v1/nda/prompt", &form("Both (Bilateral)", 36)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["role_key"], "mutual");
        assert_eq!(body["nature_of_obligations"], "Bilateral");
        assert!(body["prompt"]
            .as_str()
            .unwrap()
            .contains("- This is a Bilateral Non-Disclosure Agreement."));
        assert!(drafter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_draft_sends_compiled_prompt_to_model() {
        let drafter = Arc::new(StubDrafter::default());
        let response = app(drafter.clone())
            .oneshot(post_json("/api/v1/nda/draft", &form("Receiving Party", 36)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["nda_text"]
            .as_str()
            .unwrap()
            .starts_with("NON-DISCLOSURE AGREEMENT"));

        let seen = drafter.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], body["prompt"].as_str().unwrap());
        assert!(seen[0].contains("Our Client's Role: Receiving Party."));
    }

    #[tokio::test]
    async fn test_draft_rejects_out_of_range_duration() {
        let drafter = Arc::new(StubDrafter::default());
        let response = app(drafter.clone())
            .oneshot(post_json("/api/v1/nda/draft", &form("Receiving Party", 61)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
        assert!(drafter.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_llm_error() {
        let drafter = Arc::new(StubDrafter {
            fail: true,
            ..Default::default()
        });
        let response = app(drafter)
            .oneshot(post_json("/api/v1/nda/draft", &form("Disclosing Party", 12)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        // Upstream detail stays in the logs
        assert!(!body.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn test_export_returns_docx_attachment() {
        let request = json!({
            "text": "Article 1. Definitions\nThe Parties agree.",
            "client_name": "OCP",
            "counterparty_name": "Tech Solutions Inc."
        });
        let response = app(Arc::default())
            .oneshot(post_json("/api/v1/nda/export", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"NDA_OCP_TechSolutionsInc..docx\""
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.to_vec())).unwrap();
        assert!(archive.file_names().any(|n| n == "word/document.xml"));
    }

    #[tokio::test]
    async fn test_export_rejects_blank_text() {
        let request = json!({"text": "  ", "client_name": "OCP", "counterparty_name": "X"});
        let response = app(Arc::default())
            .oneshot(post_json("/api/v1/nda/export", &request))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
