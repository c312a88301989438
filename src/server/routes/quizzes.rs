use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    configuration::QuizOrder,
    db::{queries::questions, Question},
    quiz::{self, ALL_CATEGORIES},
    server::{app::AppState, error::ApiError},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

#[derive(Debug, Deserialize)]
struct QuizBody {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    quiz_category: i64,
    previous_questions: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct QuizTurn {
    pub success: bool,
    pub question: Question,
    pub last_question: bool,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    State(order): State<QuizOrder>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<QuizTurn> {
    let Json(QuizBody {
        quiz_category,
        previous_questions,
    }) = body?;
    let candidates = if quiz_category == ALL_CATEGORIES {
        questions::get_all_questions(&pool).await?
    } else {
        questions::get_questions_for_category(&pool, quiz_category).await?
    };

    let Some(next) = quiz::next_question(
        candidates,
        &previous_questions,
        order,
        &mut rand::thread_rng(),
    ) else {
        tracing::info!(
            "No questions left in category {quiz_category} after {} asked",
            previous_questions.len()
        );
        return Err(ApiError::NotFound);
    };

    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[quiz_category.to_string().as_str()])
        .inc();
    Ok(Json(QuizTurn {
        success: true,
        question: next.question,
        last_question: next.last_question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
