//! Local stand-in for the hosted form intake, for exercising the site offline.

use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ErrorCode, IntakeErrorBody},
    protocol::{ContactSubmission, IntakeAccepted},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

struct AppState {
    form_id: String,
    accepted: AtomicU64,
}

type IntakeRejection = (StatusCode, Json<IntakeErrorBody>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let state = Arc::new(AppState {
        form_id: settings.form_id.clone(),
        accepted: AtomicU64::new(0),
    });
    let app = build_router(state, settings.max_body_bytes);

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, form_id = %settings.form_id, "dev intake listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/f/:form_id", post(submit_form))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn submit_form(
    State(state): State<Arc<AppState>>,
    Path(form_id): Path<String>,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<IntakeAccepted>, IntakeRejection> {
    if form_id != state.form_id {
        warn!(%form_id, "submission for unknown form");
        return Err((
            StatusCode::NOT_FOUND,
            Json(IntakeErrorBody::new(ErrorCode::NotFound, "Form not found")),
        ));
    }

    if let Some(body) = validate(&submission) {
        warn!(
            %form_id,
            problems = body.errors.len(),
            "submission failed validation"
        );
        return Err((StatusCode::UNPROCESSABLE_ENTITY, Json(body)));
    }

    let total = state.accepted.fetch_add(1, Ordering::Relaxed) + 1;
    info!(
        %form_id,
        total,
        name_len = submission.name.len(),
        email_len = submission.email.len(),
        message_len = submission.message.len(),
        "submission accepted"
    );
    Ok(Json(IntakeAccepted {
        ok: true,
        next: Some("/thanks".to_string()),
    }))
}

/// Hosted intakes enforce `required` and `type=email` server-side too.
fn validate(submission: &ContactSubmission) -> Option<IntakeErrorBody> {
    let mut body = IntakeErrorBody::new(ErrorCode::Validation, "Validation errors");
    let mut failed = false;

    for (field, value) in [
        ("name", &submission.name),
        ("email", &submission.email),
        ("message", &submission.message),
    ] {
        if value.trim().is_empty() {
            body = body.field(field, "is required");
            failed = true;
        }
    }

    let email = submission.email.trim();
    if !email.is_empty() && !looks_like_email(email) {
        body = body.field("email", "should be an email");
        failed = true;
    }

    failed.then_some(body)
}

fn looks_like_email(raw: &str) -> bool {
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
