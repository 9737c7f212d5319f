use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;

use crate::{
    config::startup::AppState,
    dtos::{
        requests::{CreateChoiceDTO, CreateQuestionDTO, QuestionListParams, UpdateQuestionDTO},
        responses::{ApiResponse, ChoiceResponseDTO, QuestionResponseDTO},
    },
    error::AppError,
    services::admin_service::AdminService,
};

//*GET:: admin/questions
pub async fn list_questions(
    Extension(app_state): Extension<AppState>,
    Query(params): Query<QuestionListParams>,
) -> Result<Json<ApiResponse<Vec<QuestionResponseDTO>>>, AppError> {
    let admin_service = AdminService::new(app_state.store.clone());
    let now = Utc::now();
    let questions: Vec<QuestionResponseDTO> = admin_service
        .list_questions(&params, now)
        .await?
        .into_iter()
        .map(|loaded| QuestionResponseDTO::from_loaded(loaded, now))
        .collect();

    Ok(Json(ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Questions fetched successfully",
        Some(questions),
    )))
}

//?POST:: admin/questions
pub async fn create_question(
    Extension(app_state): Extension<AppState>,
    Json(payload): Json<CreateQuestionDTO>,
) -> Result<(StatusCode, Json<ApiResponse<QuestionResponseDTO>>), AppError> {
    let admin_service = AdminService::new(app_state.store.clone());
    let now = Utc::now();
    let question = admin_service.create_question(payload, now).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            StatusCode::CREATED.as_u16(),
            "Question created successfully",
            Some(QuestionResponseDTO::from_loaded(question, now)),
        )),
    ))
}

//*GET:: admin/questions/question_id
pub async fn get_question(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<String>,
) -> Result<Json<ApiResponse<QuestionResponseDTO>>, AppError> {
    let admin_service = AdminService::new(app_state.store.clone());
    let question = admin_service.get_question(&question_id).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Question retrieved successfully",
        Some(QuestionResponseDTO::from_loaded(question, Utc::now())),
    )))
}

//?PATCH:: admin/questions/question_id
pub async fn update_question(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<String>,
    Json(payload): Json<UpdateQuestionDTO>,
) -> Result<Json<ApiResponse<QuestionResponseDTO>>, AppError> {
    let admin_service = AdminService::new(app_state.store.clone());
    let question = admin_service.update_question(&question_id, payload).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Question updated successfully",
        Some(QuestionResponseDTO::from_loaded(question, Utc::now())),
    )))
}

///DELETE:: admin/questions/question_id
pub async fn delete_question(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let admin_service = AdminService::new(app_state.store.clone());
    admin_service.delete_question(&question_id).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Question deleted successfully",
        None,
    )))
}

//?POST:: admin/questions/question_id/choices
pub async fn add_choice(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<String>,
    Json(payload): Json<CreateChoiceDTO>,
) -> Result<(StatusCode, Json<ApiResponse<ChoiceResponseDTO>>), AppError> {
    let admin_service = AdminService::new(app_state.store.clone());
    let choice = admin_service.add_choice(&question_id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            StatusCode::CREATED.as_u16(),
            "Choice added successfully",
            Some(choice.into()),
        )),
    ))
}

///DELETE:: admin/questions/question_id/choices/choice_id
pub async fn delete_choice(
    Extension(app_state): Extension<AppState>,
    Path((question_id, choice_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let admin_service = AdminService::new(app_state.store.clone());
    admin_service.delete_choice(&question_id, &choice_id).await?;

    Ok(Json(ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Choice removed successfully",
        None,
    )))
}
