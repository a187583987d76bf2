use super::types::{ErrorResponse, RootResponse};
use crate::{
    dispatch::{DispatchQueue, WebhookJob},
    line::{SIGNATURE_HEADER, signature},
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub queue: DispatchQueue,
    pub channel_secret: Arc<str>,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn invalid_signature() -> ErrorReply {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            detail: "Invalid signature".to_string(),
        }),
    )
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        title: "Line Bot".to_string(),
    })
}

/// Verifies the delivery and queues it. The response never waits on the
/// model or the reply.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<&'static str>, ErrorReply> {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        warn!("Rejected webhook without {} header", SIGNATURE_HEADER);
        return Err(invalid_signature());
    };

    if let Err(e) = signature::verify(&state.channel_secret, &body, signature) {
        warn!("Rejected webhook: {}", e);
        return Err(invalid_signature());
    }

    let job = WebhookJob::new(body);
    let job_id = job.id;

    if let Err(e) = state.queue.submit(job) {
        error!(%job_id, "Failed to queue webhook: {}", e);
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                detail: "Dispatcher unavailable".to_string(),
            }),
        ));
    }

    info!(%job_id, "Webhook accepted");
    Ok(Json("ok"))
}
