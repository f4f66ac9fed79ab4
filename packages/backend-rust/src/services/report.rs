//! Presentation of model results: rounded percentages and the attempt view
//! the caller selected.

use serde::Serialize;

use ivf_algo::{
    has_invalid_values, AttemptProjection, Estimate, FactorBreakdown, InputDiagnostics, Probability,
};

use crate::response::AppError;

/// Whole percentage, rounded half up. `None` for NaN.
pub fn percent(probability: Probability) -> Option<u32> {
    if probability.is_nan() {
        return None;
    }
    Some((probability.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// Reject estimates the caller cannot display
pub fn ensure_finite(estimate: &Estimate) -> Result<(), AppError> {
    let probabilities: Vec<Probability> = std::iter::once(estimate.base_probability)
        .chain(estimate.attempts.iter().map(|a| a.cumulative_probability))
        .collect();
    if has_invalid_values(&probabilities) {
        return Err(AppError::degenerate(format!(
            "estimate is not a number (bmi {})",
            estimate.bmi
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptView {
    pub attempt_count: u32,
    pub cumulative_probability: Probability,
    pub percent: Option<u32>,
}

impl From<&AttemptProjection> for AttemptView {
    fn from(projection: &AttemptProjection) -> Self {
        Self {
            attempt_count: projection.attempt_count,
            cumulative_probability: projection.cumulative_probability,
            percent: percent(projection.cumulative_probability),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub bmi: f64,
    pub base_probability: Probability,
    pub base_percent: Option<u32>,
    pub breakdown: FactorBreakdown,
    pub attempts: Vec<AttemptView>,
    /// Selection after clamping to the projected range
    pub selected_attempt: u32,
    /// First `selected_attempt` entries of `attempts`
    pub visible: Vec<AttemptView>,
    pub diagnostics: InputDiagnostics,
}

impl EstimateReport {
    pub fn new(estimate: Estimate, diagnostics: InputDiagnostics, selected_attempt: u32) -> Self {
        let attempts: Vec<AttemptView> = estimate.attempts.iter().map(AttemptView::from).collect();
        let selected_attempt = selected_attempt.max(1).min(attempts.len() as u32);
        let visible = attempts[..selected_attempt as usize].to_vec();

        Self {
            bmi: estimate.bmi,
            base_probability: estimate.base_probability,
            base_percent: percent(estimate.base_probability),
            breakdown: estimate.breakdown,
            attempts,
            selected_attempt,
            visible,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivf_algo::{diagnose_inputs, estimate, Diagnosis, EggSource, PatientInputs};

    fn reference_inputs() -> PatientInputs {
        PatientInputs {
            age: 30.0,
            weight_kg: 60.0,
            height_cm: 165.0,
            prior_cycles: 0,
            prior_pregnancies: 0,
            diagnosis: Diagnosis::Unexplained,
            egg_source: EggSource::Own,
        }
    }

    fn report(selected: u32) -> EstimateReport {
        let inputs = reference_inputs();
        EstimateReport::new(estimate(&inputs, 3), diagnose_inputs(&inputs), selected)
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(0.45), Some(45));
        assert_eq!(percent(0.6975), Some(70));
        assert_eq!(percent(0.833625), Some(83));
        assert_eq!(percent(0.005), Some(1));
        assert_eq!(percent(0.0), Some(0));
        assert_eq!(percent(1.0), Some(100));
        assert_eq!(percent(f64::NAN), None);
    }

    #[test]
    fn test_report_reference_scenario() {
        let report = report(3);
        assert_eq!(report.base_percent, Some(45));
        let percents: Vec<_> = report.attempts.iter().map(|a| a.percent).collect();
        assert_eq!(percents, vec![Some(45), Some(70), Some(83)]);
        assert_eq!(report.visible.len(), 3);
        assert!(report.diagnostics.is_well_formed);
    }

    #[test]
    fn test_selected_attempt_slices_visible() {
        let report = report(2);
        assert_eq!(report.selected_attempt, 2);
        assert_eq!(report.attempts.len(), 3);
        assert_eq!(
            report
                .visible
                .iter()
                .map(|a| a.attempt_count)
                .collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_selected_attempt_clamped() {
        assert_eq!(report(0).selected_attempt, 1);
        assert_eq!(report(0).visible.len(), 1);
        assert_eq!(report(9).selected_attempt, 3);
        assert_eq!(report(9).visible.len(), 3);
    }

    #[test]
    fn test_report_without_projections() {
        let inputs = reference_inputs();
        let report = EstimateReport::new(estimate(&inputs, 0), diagnose_inputs(&inputs), 2);
        assert_eq!(report.selected_attempt, 0);
        assert!(report.visible.is_empty());
    }

    #[test]
    fn test_ensure_finite() {
        let inputs = reference_inputs();
        let mut result = estimate(&inputs, 3);
        assert!(ensure_finite(&result).is_ok());

        result.base_probability = f64::NAN;
        let err = ensure_finite(&result).unwrap_err();
        assert_eq!(err.code(), "DEGENERATE_INPUT");
    }

    #[test]
    fn test_ensure_finite_checks_every_attempt() {
        let inputs = reference_inputs();
        let mut result = estimate(&inputs, 3);
        result.attempts[2].cumulative_probability = f64::NAN;
        assert!(ensure_finite(&result).is_err());

        result.attempts[2].cumulative_probability = f64::INFINITY;
        assert!(ensure_finite(&result).is_err());
    }
}
