use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::analysis::{AnalysisResponse, CodeRequest, Operation, TranslationMetadata};
use crate::error::ApiError;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "CodeDoc Analyst Pro";
pub const SERVICE_DESCRIPTION: &str = "Advanced AI-powered code analysis with OpenAI GPT-4";

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let features: Vec<&str> = Operation::ALL.iter().map(|op| op.feature()).collect();
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": SERVICE_DESCRIPTION,
        "model": state.model(),
        "features": features
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model": state.model()
    }))
}

/// Validate, template, call upstream once, and wrap the text in the response envelope.
pub async fn analyze(
    operation: Operation,
    state: AppState,
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) = payload?;

    let prompt = operation.build_prompt(&request).map_err(|e| {
        warn!("Rejected {} request: {}", operation.slug(), e);
        e
    })?;

    info!(
        "Running {} (language={}, code_len={})",
        operation.slug(),
        request.language,
        request.code.len()
    );

    let result = state.llm.chat_completion(prompt.into()).await.map_err(|e| {
        warn!("Upstream call for {} failed: {}", operation.slug(), e);
        e
    })?;

    let metadata = match (operation, request.target_language) {
        (Operation::TranslateLanguage, Some(target)) => Some(TranslationMetadata {
            from: request.language,
            to: target,
        }),
        _ => None,
    };

    Ok(Json(AnalysisResponse {
        result,
        success: true,
        model_used: state.model().to_string(),
        metadata,
    }))
}
