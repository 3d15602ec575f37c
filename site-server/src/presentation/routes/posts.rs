use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::{api, posts};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::home))
        .route("/post/new/", get(posts::new_form).post(posts::create))
        .route("/post/{id}/", get(posts::detail))
        .route(
            "/post/{id}/update/",
            get(posts::edit_form).post(posts::update),
        )
        .route(
            "/post/{id}/delete/",
            get(posts::delete_form).post(posts::delete),
        )
        .route("/user/{username}/", get(posts::user_posts))
        .route("/category/{category}/", get(posts::category_posts))
        .route("/api/posts/", get(api::list_posts))
}
