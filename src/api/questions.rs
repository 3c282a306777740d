//! Question API endpoints.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::fetcher::QuestionFetcher;
use crate::models::{PreviousQuestion, QuestionsRequest};
use crate::AppState;

/// GET / - Describe the service.
pub async fn describe() -> Json<Value> {
    Json(json!({
        "service": "Trivia question collector",
        "usage": "POST /questions with {\"questionsNumber\": <positive integer>}. \
                  Pulls that many fresh questions from the provider, stores the unseen ones, \
                  and returns the question stored by the previous request."
    }))
}

/// POST /questions - Fetch a new unique batch and return the previous question.
pub async fn post_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionsRequest>,
) -> ApiResult<PreviousQuestion> {
    if request.questions_number <= 0 {
        return Err(AppError::Validation(
            "questionsNumber must be a positive integer".to_string(),
        ));
    }

    // Clamp to the configured maximum
    let requested = request.questions_number;
    let max = i64::from(state.config.max_questions);
    let count = if requested > max {
        tracing::info!("Requested {} questions, limiting to {}", requested, max);
        state.config.max_questions
    } else {
        requested as u32
    };

    let fetcher = QuestionFetcher::new(
        state.repo.clone(),
        state.upstream.clone(),
        state.config.fetch_retries,
    );

    let previous = fetcher.collect(count).await?;

    success(PreviousQuestion { previous })
}
