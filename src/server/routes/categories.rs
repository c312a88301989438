use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Category, Question,
    },
    server::{app::AppState, error::ApiError},
};

use super::ApiResponse;

#[derive(Debug, Serialize)]
pub struct CategoriesList {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestions {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Category,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesList> {
    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(CategoriesList {
        success: true,
        categories,
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<CategoryQuestions> {
    let Path(id) = id?;
    let Some(category) = categories::get_category(&pool, id).await? else {
        tracing::info!("Category {id} not found");
        return Err(ApiError::NotFound);
    };
    let questions = questions::get_questions_for_category(&pool, category.id).await?;
    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
}
