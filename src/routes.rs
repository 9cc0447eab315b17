use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::analysis::{CodeRequest, Operation};
use crate::handlers::{analyze, health_check, root};
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check));

    for operation in Operation::ALL {
        router = router.route(
            &format!("/api/v1/{}", operation.slug()),
            post(
                move |State(state): State<AppState>,
                      payload: Result<Json<CodeRequest>, JsonRejection>| {
                    analyze(operation, state, payload)
                },
            ),
        );
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::{ChatRequest, LlmError, StatelessLLMInterface};
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    /// Records every request and answers with a canned reply or failure.
    struct RecordingLLM {
        calls: Mutex<Vec<ChatRequest>>,
        fail: bool,
    }

    impl RecordingLLM {
        fn ok() -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), fail: false })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), fail: true })
        }

        fn calls(&self) -> Vec<ChatRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatelessLLMInterface for RecordingLLM {
        async fn chat_completion(&self, request: ChatRequest) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(request);
            if self.fail {
                Err(LlmError::Status { status: 503, body: "overloaded".to_string() })
            } else {
                Ok("generated text".to_string())
            }
        }
    }

    fn app(llm: Arc<RecordingLLM>) -> Router {
        let state = AppState::with_llm(Config::default(), llm);
        create_routes().with_state(state)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn docstring_example() {
        let llm = RecordingLLM::ok();
        let (status, body) = send(
            app(llm.clone()),
            "POST",
            "/api/v1/generate-docstring",
            Some(json!({"code": "def add(a, b): return a + b", "language": "python"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["result"], "generated text");
        assert_eq!(body["model_used"], "gpt-4o-mini");
        assert!(body.get("metadata").is_none());

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].max_tokens, 500);
        assert_eq!(
            calls[0].messages[0].content,
            "You are an expert technical writer specializing in code documentation."
        );
        assert!(calls[0].messages[1].content.contains("def add(a, b): return a + b"));
    }

    #[tokio::test]
    async fn every_operation_issues_exactly_one_call() {
        let code = "int main() { return 0; }";
        for operation in Operation::ALL {
            let llm = RecordingLLM::ok();
            let uri = format!("/api/v1/{}", operation.slug());
            let (status, body) = send(
                app(llm.clone()),
                "POST",
                &uri,
                Some(json!({"code": code, "language": "c", "target_language": "rust"})),
            )
            .await;

            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["model_used"], "gpt-4o-mini");

            let calls = llm.calls();
            assert_eq!(calls.len(), 1, "{}", uri);
            assert_eq!(calls[0].max_tokens, operation.max_tokens());
            assert_eq!(calls[0].messages[0].role, "system");
            assert_eq!(calls[0].messages[0].content, operation.system_prompt());
            assert_eq!(calls[0].messages[1].role, "user");
            assert!(calls[0].messages[1].content.contains(code));

            if operation == Operation::TranslateLanguage {
                assert_eq!(body["metadata"], json!({"from": "c", "to": "rust"}));
            } else {
                assert!(body.get("metadata").is_none(), "{}", uri);
            }
        }
    }

    #[tokio::test]
    async fn translate_without_target_is_client_error() {
        let llm = RecordingLLM::ok();
        let (status, body) = send(
            app(llm.clone()),
            "POST",
            "/api/v1/translate-language",
            Some(json!({"code": "print(1)", "language": "python"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "target_language required");
        assert_eq!(body["success"], false);
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_code_is_client_error() {
        let llm = RecordingLLM::ok();
        let (status, _) = send(
            app(llm.clone()),
            "POST",
            "/api/v1/explain-code",
            Some(json!({"code": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_code_field_is_rejected_before_upstream() {
        let llm = RecordingLLM::ok();
        let (status, body) = send(
            app(llm.clone()),
            "POST",
            "/api/v1/analyze-quality",
            Some(json!({"language": "go"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn language_defaults_to_python() {
        let llm = RecordingLLM::ok();
        let (status, _) = send(
            app(llm.clone()),
            "POST",
            "/api/v1/complexity-analysis",
            Some(json!({"code": "x = [i for i in range(10)]"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(llm.calls()[0].messages[1]
            .content
            .starts_with("Analyze the complexity of this python code:"));
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let llm = RecordingLLM::failing();
        let (status, body) = send(
            app(llm.clone()),
            "POST",
            "/api/v1/generate-tests",
            Some(json!({"code": "fn f() {}", "language": "rust"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
        assert_eq!(body["detail"], "OpenAI API error: upstream returned 503: overloaded");
        assert_eq!(llm.calls().len(), 1);
    }

    #[tokio::test]
    async fn health_makes_no_upstream_call() {
        let llm = RecordingLLM::failing();
        let (status, body) = send(app(llm.clone()), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "model": "gpt-4o-mini"}));
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn root_lists_service_metadata() {
        let (status, body) = send(app(RecordingLLM::ok()), "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "CodeDoc Analyst Pro");
        assert_eq!(body["version"], "5.0.0");
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["features"].as_array().map(Vec::len), Some(7));
        assert_eq!(body["features"][0], "documentation-generation");
    }
}
