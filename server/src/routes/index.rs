use axum::{response::Html, routing::get, Router};

use crate::state::SharedState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Host page: canvas, account forms and the glue that loads the wasm client
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/", get(index))
}
