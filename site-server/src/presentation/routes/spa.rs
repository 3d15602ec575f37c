use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::handlers::spa;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/spa/", get(spa::index))
        .route("/spa/game/", get(spa::game))
        .route("/spa/sections/{n}", get(spa::section_text))
        .route("/spa/sections/{n}/", get(spa::section_text))
        .route("/spa/{page}", get(spa::section_page))
}
