use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{
    controllers::admin_controller::{
        add_choice, create_question, delete_choice, delete_question, get_question, list_questions,
        update_question,
    },
    middleware::auth::require_admin,
};

pub fn admin_router() -> Router {
    Router::new()
        .route("/admin/questions", get(list_questions).post(create_question))
        .route(
            "/admin/questions/{question_id}",
            get(get_question)
                .patch(update_question)
                .delete(delete_question),
        )
        .route("/admin/questions/{question_id}/choices", post(add_choice))
        .route(
            "/admin/questions/{question_id}/choices/{choice_id}",
            delete(delete_choice),
        )
        .route_layer(axum::middleware::from_fn(require_admin))
}
