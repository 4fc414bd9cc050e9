//! Axum route handlers for the writing endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{generate_once, FallbackError, LlmError, ModelFailure, WRITING_MODEL};
use crate::state::AppState;
use crate::writing::prompts::{build_cover_letter_prompt, build_rewrite_prompt};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    /// Free-form resume object; embedded into the prompt as JSON.
    #[serde(default)]
    pub resume_data: Value,
    #[serde(default)]
    pub job_description: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub rewritten: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate-cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let Json(request) = payload?;
    state.config.api_key()?;

    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }

    let resume_json = serde_json::to_string(&request.resume_data)
        .map_err(|e| AppError::Internal(e.into()))?;
    let prompt = build_cover_letter_prompt(
        &resume_json,
        &request.job_description,
        request.language.as_deref(),
    );

    let cover_letter = generate_text(&state, &prompt, "Failed to generate cover letter").await?;
    info!("Cover letter generated ({} chars)", cover_letter.len());

    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/v1/rewrite-text
pub async fn handle_rewrite(
    State(state): State<AppState>,
    payload: Result<Json<RewriteRequest>, JsonRejection>,
) -> Result<Json<RewriteResponse>, AppError> {
    let Json(request) = payload?;
    state.config.api_key()?;

    if request.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let prompt = build_rewrite_prompt(&request.text);
    let rewritten = generate_text(&state, &prompt, "Failed to generate text from AI").await?;

    Ok(Json(RewriteResponse { rewritten }))
}

/// One call to the fixed writing model. Blank output maps to `empty_message`;
/// any other failure is reported like an exhausted one-model chain.
async fn generate_text(
    state: &AppState,
    prompt: &str,
    empty_message: &str,
) -> Result<String, AppError> {
    match generate_once(
        state.llm.as_ref(),
        WRITING_MODEL,
        prompt,
        state.config.model_timeout,
    )
    .await
    {
        Ok(text) => Ok(text.trim().to_string()),
        Err(LlmError::EmptyContent) => Err(AppError::EmptyGeneration(empty_message.to_string())),
        Err(e) => Err(AppError::BackendExhausted(FallbackError {
            attempts: vec![ModelFailure {
                model: WRITING_MODEL.to_string(),
                reason: e.to_string(),
            }],
        })),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::testing::{send, test_router, StaticGenerator};

    #[tokio::test]
    async fn test_cover_letter_success_is_trimmed() {
        let generator = StaticGenerator::replying("\n Dear Hiring Manager,\n\nI am thrilled... \n");
        let app = test_router(generator.clone(), Some("key"));

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/generate-cover-letter",
            r#"{"resumeData":{"name":"Ann","skills":["Rust"]},"jobDescription":"Rust engineer"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"coverLetter": "Dear Hiring Manager,\n\nI am thrilled..."})
        );

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "gemini-2.5-flash");
        assert!(calls[0].1.contains(r#"{"name":"Ann","skills":["Rust"]}"#));
        assert!(calls[0].1.contains("Language: English"));
    }

    #[tokio::test]
    async fn test_cover_letter_empty_generation_is_400() {
        let generator = StaticGenerator::replying("   ");
        let app = test_router(generator, Some("key"));

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/generate-cover-letter",
            r#"{"resumeData":{},"jobDescription":"JD"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Failed to generate cover letter"}));
    }

    #[tokio::test]
    async fn test_cover_letter_has_no_fallback() {
        let generator = StaticGenerator::failing();
        let app = test_router(generator.clone(), Some("key"));

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/generate-cover-letter",
            r#"{"resumeData":{},"jobDescription":"JD"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("gemini-2.5-flash is overloaded"));
        assert_eq!(generator.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cover_letter_missing_key_is_400() {
        let generator = StaticGenerator::replying("unused");
        let app = test_router(generator, None);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/generate-cover-letter",
            r#"{"resumeData":{},"jobDescription":"JD"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "GEMINI_API_KEY is not set"}));
    }

    #[tokio::test]
    async fn test_cover_letter_requires_job_description() {
        let generator = StaticGenerator::replying("unused");
        let app = test_router(generator.clone(), Some("key"));

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/generate-cover-letter",
            r#"{"resumeData":{"name":"A"},"jobDescription":"  "}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Job description is required"}));
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rewrite_success() {
        let generator = StaticGenerator::replying("Led migration of 12 services to Kubernetes.\n");
        let app = test_router(generator.clone(), Some("key"));

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/rewrite-text",
            r#"{"text":"moved services to k8s"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"rewritten": "Led migration of 12 services to Kubernetes."})
        );
        assert!(generator.calls()[0].1.ends_with("moved services to k8s"));
    }

    #[tokio::test]
    async fn test_rewrite_requires_text() {
        let generator = StaticGenerator::replying("unused");
        let app = test_router(generator.clone(), Some("key"));

        let (status, body) = send(app, Method::POST, "/api/v1/rewrite-text", r#"{"text":"  "}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Text is required"}));
        assert!(generator.calls().is_empty());
    }
}
