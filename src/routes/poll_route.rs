use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controller::{detail, home, index, results, vote};

pub fn poll_router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/polls/", get(index))
        .route("/polls/{question_id}/", get(detail))
        .route("/polls/{question_id}/results/", get(results))
        .route("/polls/{question_id}/vote/", post(vote))
}
