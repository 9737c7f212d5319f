use axum::{
    extract::{rejection::FormRejection, Path},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::Utc;
use tera::Context;
use tracing::debug;

use crate::{
    config::{
        startup::AppState,
        templates::{DETAIL_TEMPLATE, INDEX_TEMPLATE, RESULTS_TEMPLATE},
    },
    dtos::{
        pages::{QuestionLink, QuestionPage},
        requests::VoteForm,
    },
    error::AppError,
    services::poll_service::{PollService, VoteOutcome},
};

const NO_CHOICE_MESSAGE: &str = "You didn't make a choice.";

pub fn results_path(question_id: &str) -> String {
    format!("/polls/{question_id}/results/")
}

fn render(app_state: &AppState, template: &str, context: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(app_state.templates.render(template, context)?))
}

fn detail_context(question: QuestionPage, error_message: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("question", &question);
    context.insert("error_message", &error_message);
    context
}

//*GET:: /
pub async fn home() -> Redirect {
    Redirect::permanent("/polls/")
}

//*GET:: /polls/
pub async fn index(Extension(app_state): Extension<AppState>) -> Result<Html<String>, AppError> {
    let poll_service = PollService::new(app_state.store.clone());
    let latest_question_list: Vec<QuestionLink> = poll_service
        .latest_questions(Utc::now())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let mut context = Context::new();
    context.insert("latest_question_list", &latest_question_list);
    render(&app_state, INDEX_TEMPLATE, &context)
}

//*GET:: /polls/{question_id}/
pub async fn detail(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let poll_service = PollService::new(app_state.store.clone());
    let question = poll_service
        .eligible_question(&question_id, Utc::now())
        .await?;

    render(&app_state, DETAIL_TEMPLATE, &detail_context(question.into(), None))
}

//*GET:: /polls/{question_id}/results/
pub async fn results(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let poll_service = PollService::new(app_state.store.clone());
    let question: QuestionPage = poll_service
        .eligible_question(&question_id, Utc::now())
        .await?
        .into();

    let mut context = Context::new();
    context.insert("question", &question);
    render(&app_state, RESULTS_TEMPLATE, &context)
}

//?POST:: /polls/{question_id}/vote/
pub async fn vote(
    Extension(app_state): Extension<AppState>,
    Path(question_id): Path<String>,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Result<Response, AppError> {
    let choice_id = match &form {
        Ok(Form(vote)) => vote.choice.as_deref().filter(|id| !id.is_empty()),
        Err(rejection) => {
            debug!("Unreadable vote form: {}", rejection);
            None
        }
    };

    let poll_service = PollService::new(app_state.store.clone());
    match poll_service.vote(&question_id, choice_id).await? {
        // redirect so a reload of the results page never votes twice
        VoteOutcome::Recorded { question_id } => {
            Ok(Redirect::to(&results_path(&question_id)).into_response())
        }
        VoteOutcome::NoChoiceSelected(question) => {
            let context = detail_context(question.into(), Some(NO_CHOICE_MESSAGE));
            Ok(render(&app_state, DETAIL_TEMPLATE, &context)?.into_response())
        }
    }
}
