use axum::{
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::web::AppState;

const STATIC_CACHE_CONTROL: &str = "max-age=3600, must-revalidate";

const QUIZ_JS: &str = include_str!("../../static/quiz.js");
const STYLE_CSS: &str = include_str!("../../static/style.css");

async fn quiz_js() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/javascript"),
            (CACHE_CONTROL, STATIC_CACHE_CONTROL),
        ],
        QUIZ_JS,
    )
}

async fn style_css() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/css"), (CACHE_CONTROL, STATIC_CACHE_CONTROL)],
        STYLE_CSS,
    )
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quiz.js", get(quiz_js))
        .route("/style.css", get(style_css))
}
