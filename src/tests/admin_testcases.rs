use axum::http::{Method, StatusCode};
use chrono::{Datelike, Duration, TimeZone, Utc};
use serde_json::json;

use super::test_utils::{
    admin_request, create_question, get, post_form, setup_test_app, setup_test_app_with_token,
    ADMIN_TOKEN,
};
use crate::repositories::question_repository::QuestionStore;

#[tokio::test]
async fn admin_requires_bearer_token() {
    let (app, _store) = setup_test_app();

    let missing = admin_request(&app, "/admin/questions", Method::GET, None, None).await;
    let wrong = admin_request(&app, "/admin/questions", Method::GET, None, Some("nope")).await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json()["message"], "Authentication Failed");
}

#[tokio::test]
async fn admin_is_not_mounted_without_token() {
    let (app, _store) = setup_test_app_with_token(None);

    let response = admin_request(&app, "/admin/questions", Method::GET, None, Some(ADMIN_TOKEN)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_question_lifecycle() {
    let (app, store) = setup_test_app();

    // Create with two choices, published two hours ago
    let pub_date = Utc::now() - Duration::hours(2);
    let created = admin_request(
        &app,
        "/admin/questions",
        Method::POST,
        Some(json!({
            "questionText": "What's up?",
            "pubDate": pub_date.to_rfc3339(),
            "choices": ["Not much", "The sky"]
        })),
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    assert_eq!(body["status"], 201);
    assert_eq!(body["data"]["wasPublishedRecently"], true);
    assert_eq!(body["data"]["hasEnoughChoices"], true);
    let question_id = body["data"]["questionId"]
        .as_str()
        .expect("Failed to get question ID")
        .to_string();

    // Visible to users straight away
    let detail = get(&app, &format!("/polls/{question_id}/")).await;
    assert_eq!(detail.status, StatusCode::OK);

    // Update text only
    let updated = admin_request(
        &app,
        &format!("/admin/questions/{question_id}"),
        Method::PATCH,
        Some(json!({ "questionText": "What is up?" })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["data"]["questionText"], "What is up?");

    // Add a third choice with preset votes
    let choice = admin_request(
        &app,
        &format!("/admin/questions/{question_id}/choices"),
        Method::POST,
        Some(json!({ "choiceText": "Clouds", "votes": 3 })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(choice.status, StatusCode::CREATED);
    assert_eq!(choice.json()["data"]["votes"], 3);

    let fetched = admin_request(
        &app,
        &format!("/admin/questions/{question_id}"),
        Method::GET,
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(fetched.json()["data"]["choices"].as_array().unwrap().len(), 3);

    // Delete cascades to the choices
    let deleted = admin_request(
        &app,
        &format!("/admin/questions/{question_id}"),
        Method::DELETE,
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(store.choices_for(&question_id).await.unwrap().is_empty());

    let gone = get(&app, &format!("/polls/{question_id}/")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_lists_questions_with_predicates() {
    let (app, _store) = setup_test_app();
    for (text, days, choices) in [
        ("Old poll", 40, json!(["a", "b"])),
        ("Fresh poll", 0, json!(["a"])),
    ] {
        let response = admin_request(
            &app,
            "/admin/questions",
            Method::POST,
            Some(json!({
                "questionText": text,
                "pubDate": (Utc::now() - Duration::days(days) - Duration::minutes(1)).to_rfc3339(),
                "choices": choices
            })),
            Some(ADMIN_TOKEN),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let listed = admin_request(&app, "/admin/questions", Method::GET, None, Some(ADMIN_TOKEN)).await;
    let data = listed.json()["data"].clone();
    assert_eq!(data[0]["questionText"], "Fresh poll");
    assert_eq!(data[0]["wasPublishedRecently"], true);
    assert_eq!(data[0]["hasEnoughChoices"], false);
    assert_eq!(data[1]["questionText"], "Old poll");
    assert_eq!(data[1]["wasPublishedRecently"], false);
    assert_eq!(data[1]["hasEnoughChoices"], true);

    // pinned inside the current year so the calendar filter always matches
    let new_year = Utc.with_ymd_and_hms(Utc::now().year(), 1, 1, 0, 0, 0).unwrap();
    let created = admin_request(
        &app,
        "/admin/questions",
        Method::POST,
        Some(json!({
            "questionText": "New year poll",
            "pubDate": new_year.to_rfc3339(),
            "choices": ["a", "b"]
        })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let searched = admin_request(
        &app,
        "/admin/questions?search=new%20year&published=this_year",
        Method::GET,
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(searched.status, StatusCode::OK);
    let texts: Vec<_> = searched.json()["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["questionText"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["New year poll"]);

    let searched = admin_request(&app, "/admin/questions?search=OLD", Method::GET, None, Some(ADMIN_TOKEN)).await;
    let data = searched.json()["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["questionText"], "Old poll");
}

#[tokio::test]
async fn admin_rejects_blank_question_text() {
    let (app, _store) = setup_test_app();

    let response = admin_request(
        &app,
        "/admin/questions",
        Method::POST,
        Some(json!({ "questionText": "  ", "choices": [] })),
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Invalid Question");
}

#[tokio::test]
async fn admin_unknown_question_is_not_found() {
    let (app, _store) = setup_test_app();

    let response = admin_request(
        &app,
        "/admin/questions/missing/choices",
        Method::POST,
        Some(json!({ "choiceText": "Orphan" })),
        Some(ADMIN_TOKEN),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vote_on_choice_at_counter_limit_is_refused() {
    let (app, store) = setup_test_app();
    let question = create_question(&store, "Popular?", -1, false).await;

    let seeded = admin_request(
        &app,
        &format!("/admin/questions/{}/choices", question.id),
        Method::POST,
        Some(json!({ "choiceText": "Everyone", "votes": u32::MAX })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(seeded.status, StatusCode::CREATED);
    let choice_id = seeded.json()["data"]["choiceId"]
        .as_str()
        .expect("Failed to get choice ID")
        .to_string();

    let response = post_form(
        &app,
        &format!("/polls/{}/vote/", question.id),
        &format!("choice={choice_id}"),
    )
    .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["message"], "Vote Limit Reached");
    let choice = store
        .choices_for(&question.id)
        .await
        .unwrap()
        .into_iter()
        .find(|choice| choice.id == choice_id)
        .expect("seeded choice");
    assert_eq!(choice.votes, u32::MAX);

    let results = get(&app, &format!("/polls/{}/results/", question.id)).await;
    assert_eq!(results.status, StatusCode::OK);
    assert!(results.body.contains(&format!("Everyone -- {} votes", u32::MAX)));
}
