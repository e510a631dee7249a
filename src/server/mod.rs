//! HTTP transport: the webhook route plus static assets.

pub mod error;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::kernel::dispatch::Dispatcher;
use crate::services::verifier::RequestVerifier;

pub use error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub verifier: Arc<dyn RequestVerifier>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, verifier: impl RequestVerifier + 'static) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            verifier: Arc::new(verifier),
        }
    }
}

/// `POST /` handles platform events; every other path is served from `public_dir`.
pub fn build_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", post(routes::webhook))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
