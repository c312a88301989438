use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    db::{
        queries::{categories, questions},
        Category, NewQuestion, Question,
    },
    server::{app::AppState, error::ApiError},
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::ApiResponse;

pub const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

// The client's add form posts select values, so numbers may arrive as strings.
#[derive(Debug, Deserialize, Validate)]
struct QuestionBody {
    #[validate(length(min = 1))]
    question: String,
    #[validate(length(min = 1))]
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    search_term: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
    pub current_category: Option<Category>,
}

#[derive(Debug, Serialize)]
pub struct DeletedQuestion {
    pub success: bool,
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestion {
    pub success: bool,
    pub message: &'static str,
    pub question: NewQuestion,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Slice of `items` shown on `page`, counting from 1. Pages outside the
/// list are empty.
fn page_window<T>(items: Vec<T>, page: i64) -> Vec<T> {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
    else {
        return Vec::new();
    };
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<QuestionsPage> {
    let Query(PageQuery { page }) = query?;
    let questions = questions::get_all_questions(&pool).await?;
    let categories = categories::get_all_categories(&pool).await?;
    let total_questions = questions.len();
    Ok(Json(QuestionsPage {
        success: true,
        questions: page_window(questions, page.unwrap_or(1)),
        total_questions,
        categories,
        current_category: None,
    }))
}

// A missing id is reported like a failed delete.
async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<DeletedQuestion> {
    let Path(id) = id?;
    let deleted = match questions::get_question_by_id(&pool, id).await {
        Ok(Some(question)) => questions::delete_question(&pool, question.id).await,
        Ok(None) => Ok(0),
        Err(e) => Err(e),
    };
    match deleted {
        Ok(0) => {
            tracing::info!("Question {id} not found for delete");
            Err(ApiError::Unprocessable)
        }
        Ok(_) => {
            QUESTIONS_DELETED.inc();
            tracing::info!("Deleted question {id}");
            Ok(Json(DeletedQuestion {
                success: true,
                message: "Question successfully deleted",
                id,
            }))
        }
        Err(e) => {
            tracing::warn!("Failed to delete question {id}: {e}");
            Err(ApiError::Unprocessable)
        }
    }
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuestionBody>, JsonRejection>,
) -> ApiResponse<CreatedQuestion> {
    let Json(body) = body?;
    body.validate()?;
    let new_question = NewQuestion {
        question: body.question,
        answer: body.answer,
        category: body.category,
        difficulty: body.difficulty,
    };
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to insert question: {e}");
            ApiError::Unprocessable
        })?;
    QUESTIONS_CREATED.inc();
    tracing::info!("Created question {id}");
    Ok(Json(CreatedQuestion {
        success: true,
        message: "Question successfully created",
        question: new_question,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<SearchResults> {
    let Json(SearchBody { search_term }) = body?;
    let questions = questions::search_questions(&pool, &search_term).await?;
    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
}
