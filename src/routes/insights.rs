//! Insight API
//!
//! The two externally facing operations. Every failure is recovered here and
//! returned as an `{error}` value; callers always receive a result.

use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use crate::models::{
    AnswerResponse, AppState, AskQuestionRequest, GenerateInsightsRequest, InsightsResponse,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/insights", post(generate_insights))
        .route("/api/question", post(ask_question))
        .with_state(state)
}

async fn generate_insights(
    State(state): State<AppState>,
    Json(request): Json<GenerateInsightsRequest>,
) -> Json<InsightsResponse> {
    info!("General insight request received");

    match state.agent.generate_general_insights(&request.data).await {
        Ok(insights) => Json(InsightsResponse::ok(insights)),
        Err(e) => {
            warn!(error = %e, "General insight request failed");
            Json(InsightsResponse::error(e.to_string()))
        }
    }
}

async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskQuestionRequest>,
) -> Json<AnswerResponse> {
    info!(question_len = request.question.len(), "Question request received");

    match state
        .agent
        .answer_question(&request.data, &request.question)
        .await
    {
        Ok(answer) => Json(AnswerResponse::ok(answer)),
        Err(e) => {
            warn!(error = %e, "Question request failed");
            Json(AnswerResponse::error(e.to_string()))
        }
    }
}
