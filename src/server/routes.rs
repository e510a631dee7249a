//! Webhook endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Json,
};
use tracing::{debug, info, info_span};
use uuid::Uuid;

use super::error::ServerError;
use super::AppState;
use crate::kernel::event::CekRequest;
use crate::kernel::speech::CekResponse;
use crate::services::verifier::SIGNATURE_HEADER;

/// POST /
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CekResponse>, ServerError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    process(&state, signature, &body).map(Json)
}

/// Verify, dispatch and serialize one request. Runs to completion without suspending.
pub fn process(
    state: &AppState,
    signature: Option<&str>,
    body: &[u8],
) -> Result<CekResponse, ServerError> {
    let span = info_span!("cek_request", request_id = %Uuid::new_v4());
    let _guard = span.enter();

    let request: CekRequest =
        serde_json::from_slice(body).map_err(|e| ServerError::MalformedBody(e.to_string()))?;

    state.verifier.verify(signature, body, &request)?;

    info!(
        session_id = request.session.session_id.as_deref().unwrap_or("-"),
        new_session = request.session.new.unwrap_or(false),
        "CEK request"
    );

    let event = request.to_event();
    let response = state.dispatcher.handle(&event).into_wire();
    debug!(should_end_session = response.response.should_end_session, "CEK response");

    Ok(response)
}
