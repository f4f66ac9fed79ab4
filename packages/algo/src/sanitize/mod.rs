//! Input and Output Sanitization
//!
//! The model never rejects inputs. These helpers let callers detect the
//! degenerate cases it passes through.
//!
//! Functions:
//! - Probability clamping that keeps NaN visible
//! - Invalid value detection
//! - Patient input diagnostics

use crate::estimator::prior_cycle_factor;
use crate::types::{InputDiagnostics, PatientInputs, Probability};

/// Clamp to [0, 1]. NaN is returned unchanged.
pub fn clamp_probability(value: f64) -> Probability {
    // f64::clamp already propagates NaN
    value.clamp(0.0, 1.0)
}

/// True if any value is NaN or infinite
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

/// Flag the inputs the model would silently accept
pub fn diagnose_inputs(inputs: &PatientInputs) -> InputDiagnostics {
    let bmi = inputs.bmi();

    let invalid_age = !inputs.age.is_finite() || inputs.age <= 0.0;
    let invalid_bmi = !bmi.is_finite() || bmi <= 0.0;
    let negative_cycle_factor = prior_cycle_factor(inputs.prior_cycles) < 0.0;
    let unrecognized_diagnosis = !inputs.diagnosis.is_recognized();

    let is_well_formed = !invalid_age && !invalid_bmi && !negative_cycle_factor;

    let message = if is_well_formed && !unrecognized_diagnosis {
        "Inputs are well formed".to_string()
    } else if invalid_age {
        format!("Age is not a positive number: {}", inputs.age)
    } else if invalid_bmi {
        format!(
            "BMI is not a positive finite number: {} (weight {} kg, height {} cm)",
            bmi, inputs.weight_kg, inputs.height_cm
        )
    } else if negative_cycle_factor {
        format!(
            "Prior cycle penalty is negative for {} cycles",
            inputs.prior_cycles
        )
    } else {
        format!(
            "Diagnosis '{}' is not recognized, neutral multiplier applied",
            inputs.diagnosis.label()
        )
    };

    InputDiagnostics {
        is_well_formed,
        invalid_age,
        invalid_bmi,
        negative_cycle_factor,
        unrecognized_diagnosis,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Diagnosis, EggSource};

    fn inputs() -> PatientInputs {
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

    // ==================== clamp_probability ====================

    #[test]
    fn test_clamp_probability_in_range() {
        assert_eq!(clamp_probability(0.45), 0.45);
        assert_eq!(clamp_probability(0.0), 0.0);
        assert_eq!(clamp_probability(1.0), 1.0);
    }

    #[test]
    fn test_clamp_probability_out_of_range() {
        assert_eq!(clamp_probability(-0.25), 0.0);
        assert_eq!(clamp_probability(1.3), 1.0);
        assert_eq!(clamp_probability(f64::INFINITY), 1.0);
        assert_eq!(clamp_probability(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_clamp_probability_keeps_nan() {
        assert!(clamp_probability(f64::NAN).is_nan());
    }

    // ==================== has_invalid_values ====================

    #[test]
    fn test_has_invalid_values() {
        assert!(!has_invalid_values(&[0.1, 0.5, 1.0]));
        assert!(!has_invalid_values(&[]));
        assert!(has_invalid_values(&[0.1, f64::NAN]));
        assert!(has_invalid_values(&[f64::NEG_INFINITY]));
    }

    // ==================== diagnose_inputs ====================

    #[test]
    fn test_diagnose_inputs_well_formed() {
        let result = diagnose_inputs(&inputs());
        assert!(result.is_well_formed);
        assert!(!result.invalid_age);
        assert!(!result.invalid_bmi);
        assert!(!result.negative_cycle_factor);
        assert!(!result.unrecognized_diagnosis);
        assert_eq!(result.message, "Inputs are well formed");
    }

    #[test]
    fn test_diagnose_inputs_zero_height() {
        let mut x = inputs();
        x.height_cm = 0.0;
        let result = diagnose_inputs(&x);
        assert!(!result.is_well_formed);
        assert!(result.invalid_bmi);
        assert!(result.message.contains("BMI"));
    }

    #[test]
    fn test_diagnose_inputs_negative_height_still_positive_bmi() {
        // Height is squared, so only weight decides the sign
        let mut x = inputs();
        x.height_cm = -165.0;
        assert!(!diagnose_inputs(&x).invalid_bmi);

        x.weight_kg = -60.0;
        assert!(diagnose_inputs(&x).invalid_bmi);
    }

    #[test]
    fn test_diagnose_inputs_nan_age() {
        let mut x = inputs();
        x.age = f64::NAN;
        let result = diagnose_inputs(&x);
        assert!(result.invalid_age);
        assert!(result.message.starts_with("Age"));
    }

    #[test]
    fn test_diagnose_inputs_cycle_penalty_boundary() {
        let mut x = inputs();
        x.prior_cycles = 20;
        assert!(!diagnose_inputs(&x).negative_cycle_factor);

        x.prior_cycles = 21;
        let result = diagnose_inputs(&x);
        assert!(result.negative_cycle_factor);
        assert!(!result.is_well_formed);
        assert!(result.message.contains("21 cycles"));

        x.prior_cycles = u32::MAX;
        assert!(diagnose_inputs(&x).negative_cycle_factor);
    }

    #[test]
    fn test_diagnose_inputs_unrecognized_diagnosis_is_still_well_formed() {
        let mut x = inputs();
        x.diagnosis = Diagnosis::parse("unknown_xyz");
        let result = diagnose_inputs(&x);
        assert!(result.is_well_formed);
        assert!(result.unrecognized_diagnosis);
        assert!(result.message.contains("unknown_xyz"));
    }
}
