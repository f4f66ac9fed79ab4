use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use ivf_algo::{diagnose_inputs, Diagnosis, DEFAULT_DIAGNOSIS_MULTIPLIER};

use crate::response::{ok, AppError};
use crate::services::intake::EstimateForm;
use crate::services::report::{ensure_finite, EstimateReport};
use crate::state::AppState;

/// Largest accepted batch
pub const MAX_BATCH_SIZE: usize = 1000;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/estimate", post(estimate))
        .route("/estimate/batch", post(estimate_batch))
        .route("/diagnoses", get(diagnoses))
}

async fn estimate(
    State(state): State<AppState>,
    payload: Result<Json<EstimateForm>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(form) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    let inputs = form.to_inputs().map_err(|err| {
        tracing::debug!(error = %err, "estimate form rejected");
        AppError::from(err)
    })?;

    let result = state.estimator().estimate(&inputs);
    ensure_finite(&result)?;

    let diagnostics = diagnose_inputs(&inputs);
    if !diagnostics.is_well_formed || diagnostics.unrecognized_diagnosis {
        tracing::warn!(detail = %diagnostics.message, "estimate computed from degenerate inputs");
    }

    tracing::info!(
        base_probability = result.base_probability,
        attempts = result.attempts.len(),
        diagnosis = %inputs.diagnosis.label(),
        "estimate computed"
    );

    Ok(ok(EstimateReport::new(
        result,
        diagnostics,
        form.selected_attempt,
    )))
}

async fn estimate_batch(
    State(state): State<AppState>,
    payload: Result<Json<Vec<EstimateForm>>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(forms) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    if forms.is_empty() {
        return Err(AppError::bad_request("batch is empty"));
    }
    if forms.len() > MAX_BATCH_SIZE {
        return Err(AppError::bad_request(format!(
            "batch of {} exceeds the limit of {MAX_BATCH_SIZE}",
            forms.len()
        )));
    }

    let inputs = forms
        .iter()
        .enumerate()
        .map(|(index, form)| {
            form.to_inputs()
                .map_err(|err| AppError::validation(format!("item {index}: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let estimator = state.estimator();
    let batch_inputs = inputs.clone();
    let results = tokio::task::spawn_blocking(move || estimator.estimate_batch(&batch_inputs))
        .await
        .map_err(|e| AppError::internal(format!("batch estimate task failed: {e}")))?;

    let mut reports = Vec::with_capacity(results.len());
    for ((result, input), form) in results.into_iter().zip(&inputs).zip(&forms) {
        ensure_finite(&result)?;
        reports.push(EstimateReport::new(
            result,
            diagnose_inputs(input),
            form.selected_attempt,
        ));
    }

    tracing::info!(count = reports.len(), "batch estimate computed");

    Ok(ok(reports))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosisEntry {
    label: String,
    multiplier: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosisTable {
    categories: Vec<DiagnosisEntry>,
    default_multiplier: f64,
}

async fn diagnoses() -> Response {
    let categories = Diagnosis::KNOWN
        .iter()
        .map(|diagnosis| DiagnosisEntry {
            label: diagnosis.label().to_string(),
            multiplier: diagnosis.multiplier(),
        })
        .collect();

    ok(DiagnosisTable {
        categories,
        default_multiplier: DEFAULT_DIAGNOSIS_MULTIPLIER,
    })
}
