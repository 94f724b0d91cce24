pub mod config;
pub mod exercise;
pub mod templates;

use axum::{
    Json, Router,
    extract::Multipart,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use exercise::{
    Exercise, ExerciseProcessError, ProcessingOptions, RepairOutcome, display::dump_exercise,
    process_exercise_bytes,
};
use serde::Serialize;
use templates::{render_landing_page, render_processed_exercise};
use uuid::Uuid;

pub fn build_app() -> Router {
    Router::new()
        .route("/", get(landing_page))
        .route("/upload", post(handle_upload))
        .route("/api/repair", post(repair_exercise))
        .route("/api/dump", post(dump_exercise_text))
}

/// JSON body returned by `POST /api/repair`.
#[derive(Debug, Serialize)]
pub struct RepairResponse {
    pub outcome: RepairOutcome,
    pub exercise: Exercise,
}

async fn landing_page() -> Html<String> {
    Html(render_landing_page())
}

async fn handle_upload(mut multipart: Multipart) -> impl IntoResponse {
    let mut uploaded: Option<Vec<u8>> = None;
    let mut options = ProcessingOptions {
        repair_samples: false,
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("file") => match field.bytes().await {
                Ok(bytes) => {
                    uploaded = Some(bytes.to_vec());
                }
                Err(err) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read uploaded file: {err}"),
                    )
                        .into_response();
                }
            },
            // Browsers omit unchecked checkboxes, so absence means "off".
            Some("repair_samples") => {
                if let Ok(value) = field.text().await {
                    options.repair_samples = value == "true" || value == "on";
                }
            }
            _ => {}
        }
    }

    let file_bytes = match uploaded {
        Some(bytes) => bytes,
        None => return (StatusCode::BAD_REQUEST, "No file provided").into_response(),
    };

    let report_id = Uuid::new_v4();
    match process_exercise_bytes(&file_bytes, &options) {
        Ok(processed) => {
            tracing::info!(
                %report_id,
                samples = processed.exercise.samples.len(),
                outcome = ?processed.outcome,
                "processed exercise upload"
            );
            Html(render_processed_exercise(&processed, &report_id.to_string())).into_response()
        }
        Err(err) => render_processing_error(err),
    }
}

async fn repair_exercise(Json(mut exercise): Json<Exercise>) -> Json<RepairResponse> {
    let outcome = exercise.repair_samples();
    Json(RepairResponse { outcome, exercise })
}

async fn dump_exercise_text(Json(exercise): Json<Exercise>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        dump_exercise(&exercise),
    )
}

fn render_processing_error(error: ExerciseProcessError) -> axum::response::Response {
    tracing::warn!(%error, "rejected exercise upload");
    (StatusCode::BAD_REQUEST, error.to_string()).into_response()
}
