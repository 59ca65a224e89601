//! Pong account and score server: one WebSocket per browser tab carrying
//! postcard frames, with accounts and match history kept in MySQL.

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod store;

use std::path::Path;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn build_router(state: state::SharedState, static_dir: &Path) -> Router<()> {
    routes::router(state, static_dir)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
