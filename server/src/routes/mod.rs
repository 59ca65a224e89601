use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::SharedState;

pub mod health;
pub mod index;
pub mod ws;

/// Compose all route trees and serve the wasm bundle under `/pkg`.
pub fn router(state: SharedState, static_dir: &Path) -> Router<()> {
    index::router()
        .merge(health::router())
        .merge(ws::router())
        .nest_service("/pkg", ServeDir::new(static_dir))
        .with_state(state)
}
