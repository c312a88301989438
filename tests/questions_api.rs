mod common;

use axum::http::StatusCode;
use serde_json::json;
use trivia_api::db::queries::questions;

use common::{assert_error, ids, spawn_app};

#[tokio::test]
async fn lists_all_categories() {
    let app = spawn_app().await;
    let (status, body) = app.get("/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0], json!({"id": 1, "type": "Science"}));
}

#[tokio::test]
async fn first_page_has_ten_questions_and_full_count() {
    let app = spawn_app().await;
    let (status, body) = app.get("/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        ids(&body["questions"]),
        vec![2, 4, 5, 6, 9, 10, 11, 12, 13, 14]
    );
    assert_eq!(body["total_questions"], 19);
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);
    assert!(body["current_category"].is_null());

    let first = &body["questions"][0];
    assert_eq!(first["answer"], "Apollo 13");
    assert_eq!(first["category"], 5);
    assert_eq!(first["difficulty"], 4);
}

#[tokio::test]
async fn second_page_holds_the_rest() {
    let app = spawn_app().await;
    let (status, body) = app.get("/questions?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 9);
    assert_eq!(ids(&body["questions"])[0], 15);
    assert_eq!(body["total_questions"], 19);
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let app = spawn_app().await;
    let (status, body) = app.get("/questions?page=1000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["questions"].as_array().unwrap().is_empty());
    assert_eq!(body["total_questions"], 19);
}

#[tokio::test]
async fn non_numeric_page_is_a_bad_request() {
    let app = spawn_app().await;
    let (status, body) = app.get("/questions?page=two").await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deletes_an_existing_question() {
    let app = spawn_app().await;
    let (status, body) = app.delete("/questions/10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Question successfully deleted", "id": 10})
    );
    assert_eq!(
        questions::get_question_by_id(&app.pool, 10).await.unwrap(),
        None
    );

    let (_, sports) = app.get("/categories/6/questions").await;
    assert_eq!(ids(&sports["questions"]), vec![11]);
}

#[tokio::test]
async fn deleting_a_missing_question_is_unprocessable() {
    let app = spawn_app().await;
    let (status, body) = app.delete("/questions/100000").await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Unprocessable request");
}

#[tokio::test]
async fn deleting_twice_fails_the_second_time() {
    let app = spawn_app().await;
    let (status, _) = app.delete("/questions/5").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete("/questions/5").await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn non_numeric_question_id_is_not_found() {
    let app = spawn_app().await;
    let (status, body) = app.delete("/questions/abc").await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adds_a_question() {
    let app = spawn_app().await;
    let new_question = json!({
        "question": "What is the third brightest object in sky?",
        "answer": "Venus",
        "category": 1,
        "difficulty": 3
    });
    let (status, body) = app.post("/questions", new_question.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Question successfully created");
    assert_eq!(body["question"], new_question);

    let found = questions::search_questions(&app.pool, "third brightest")
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].answer, "Venus");

    let (_, page) = app.get("/questions").await;
    assert_eq!(page["total_questions"], 20);
}

#[tokio::test]
async fn add_accepts_numbers_sent_as_strings() {
    let app = spawn_app().await;
    let (status, body) = app
        .post(
            "/questions",
            json!({"question": "Q?", "answer": "A", "category": "2", "difficulty": "5"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["category"], 2);
    assert_eq!(body["question"]["difficulty"], 5);
}

#[tokio::test]
async fn adding_to_an_unknown_category_is_unprocessable() {
    let app = spawn_app().await;
    let (status, body) = app
        .post(
            "/questions",
            json!({"question": "my_question", "answer": "my_ans", "category": 7, "difficulty": 2}),
        )
        .await;

    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
    let found = questions::search_questions(&app.pool, "my_question")
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn add_with_missing_field_is_a_bad_request() {
    let app = spawn_app().await;
    let (status, body) = app
        .post("/questions", json!({"question": "Q?", "answer": "A", "category": 1}))
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_with_empty_answer_is_a_bad_request() {
    let app = spawn_app().await;
    let (status, body) = app
        .post(
            "/questions",
            json!({"question": "Q?", "answer": "", "category": 1, "difficulty": 1}),
        )
        .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let app = spawn_app().await;
    let (status, body) = app
        .post("/questions/search", json!({"search_term": "TiTlE"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["questions"]), vec![5, 6]);
    assert_eq!(body["total_questions"], 2);
    for question in body["questions"].as_array().unwrap() {
        let text = question["question"].as_str().unwrap().to_lowercase();
        assert!(text.contains("title"));
    }
}

#[tokio::test]
async fn search_without_a_term_is_a_bad_request() {
    let app = spawn_app().await;
    let (status, body) = app.post("/questions/search", json!({})).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_with_no_match_is_empty() {
    let app = spawn_app().await;
    let (status, body) = app
        .post("/questions/search", json!({"search_term": "zzzz"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["questions"].as_array().unwrap().is_empty());
    assert_eq!(body["total_questions"], 0);
}

#[tokio::test]
async fn lists_questions_of_a_category() {
    let app = spawn_app().await;
    let (status, body) = app.get("/categories/1/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["questions"]), vec![20, 21, 22]);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["current_category"], json!({"id": 1, "type": "Science"}));
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let app = spawn_app().await;
    let (status, body) = app.get("/categories/100/questions").await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Resource not found");
}
