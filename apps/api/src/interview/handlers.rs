//! Axum route handler for the interview coach (the action dispatcher).

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::interview::models::{CoachRequest, InterviewRequestBody, ParsedResult};
use crate::interview::parser::parse_response;
use crate::interview::prompts::build_prompt;
use crate::llm_client::{generate_with_fallback, INTERVIEW_MODELS};
use crate::state::AppState;

/// POST /api/v1/interview-coach
///
/// Validates the body, resolves the action, runs the prompt through the model
/// fallback chain and returns the parsed reply. Every failure becomes a 400
/// `{error}` envelope; nothing here retries.
pub async fn handle_interview_coach(
    State(state): State<AppState>,
    payload: Result<Json<InterviewRequestBody>, JsonRejection>,
) -> Result<Json<ParsedResult>, AppError> {
    let Json(body) = payload?;
    state.config.api_key()?;

    let request = CoachRequest::try_from(body)?;
    let action = request.action.kind();
    let prompt = build_prompt(&request);

    let generation = generate_with_fallback(
        state.llm.as_ref(),
        INTERVIEW_MODELS,
        &prompt,
        state.config.model_timeout,
    )
    .await?;

    info!(
        action = %action,
        model = %generation.model,
        "Interview coach reply generated"
    );

    let result = parse_response(action, &generation.text)?;
    Ok(Json(result))
}
