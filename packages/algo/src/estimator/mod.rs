//! Success Estimator
//!
//! Core model:
//! - Base probability: a starting value chosen by age, scaled by a fixed
//!   sequence of multiplicative risk/benefit factors, clamped once to [0, 1]
//! - Cumulative probability: each attempt is treated as an independent
//!   Bernoulli trial with the base probability
//!
//! Formulas:
//! - P_base = clamp(s * f_bmi * (1 - 0.05 * cycles) * f_preg * f_diag * f_egg, 0, 1)
//!   - s: 0.6 below age 35, otherwise 0.4
//!   - f_bmi: 0.8 underweight (< 18.5), 0.7 obese (> 30), otherwise 1
//!   - f_preg: 1.1 with any prior pregnancy
//!   - f_diag: diagnosis table, 1 for unrecognized labels
//!   - f_egg: 1.2 for donor eggs
//!
//! - P_n = 1 - (1 - P_base)^n
//!
//! Independence between attempts is a modeling simplification, not a
//! statistical property of real treatment outcomes.
//!
//! The prior-cycle factor goes negative past 20 cycles. Intermediate values
//! are never clamped; only the final product is.

use rayon::prelude::*;

use crate::sanitize::clamp_probability;
use crate::types::{
    AttemptProjection, Estimate, FactorBreakdown, PatientInputs, Probability, AGE_THRESHOLD,
    OBESE_BMI, OBESE_FACTOR, OLDER_START, PRIOR_CYCLE_PENALTY, PRIOR_PREGNANCY_BONUS,
    UNDERWEIGHT_BMI, UNDERWEIGHT_FACTOR, YOUNGER_START,
};

// ==================== Factors ====================

fn starting_value(age: f64) -> f64 {
    if age < AGE_THRESHOLD {
        YOUNGER_START
    } else {
        OLDER_START
    }
}

/// Underweight is checked first; a NaN BMI matches neither branch.
fn bmi_factor(bmi: f64) -> f64 {
    if bmi < UNDERWEIGHT_BMI {
        UNDERWEIGHT_FACTOR
    } else if bmi > OBESE_BMI {
        OBESE_FACTOR
    } else {
        1.0
    }
}

pub(crate) fn prior_cycle_factor(prior_cycles: u32) -> f64 {
    1.0 - PRIOR_CYCLE_PENALTY * prior_cycles as f64
}

fn prior_pregnancy_factor(prior_pregnancies: u32) -> f64 {
    if prior_pregnancies > 0 {
        PRIOR_PREGNANCY_BONUS
    } else {
        1.0
    }
}

// ==================== Public API ====================

/// Every factor for `inputs`, applied in model order, with the final clamp.
pub fn factor_breakdown(inputs: &PatientInputs) -> FactorBreakdown {
    let starting_value = starting_value(inputs.age);
    let bmi_factor = bmi_factor(inputs.bmi());
    let prior_cycle_factor = prior_cycle_factor(inputs.prior_cycles);
    let prior_pregnancy_factor = prior_pregnancy_factor(inputs.prior_pregnancies);
    let diagnosis_factor = inputs.diagnosis.multiplier();
    let egg_source_factor = inputs.egg_source.multiplier();

    let mut success = starting_value;
    success *= bmi_factor;
    success *= prior_cycle_factor;
    success *= prior_pregnancy_factor;
    success *= diagnosis_factor;
    success *= egg_source_factor;

    FactorBreakdown {
        starting_value,
        bmi_factor,
        prior_cycle_factor,
        prior_pregnancy_factor,
        diagnosis_factor,
        egg_source_factor,
        unclamped: success,
        probability: clamp_probability(success),
    }
}

/// Single-attempt success probability.
pub fn base_probability(inputs: &PatientInputs) -> Probability {
    factor_breakdown(inputs).probability
}

/// Probability of at least one success in `attempt_count` independent
/// attempts, `1 - (1 - base)^attempt_count`.
///
/// `base` is expected in [0, 1]; one attempt returns `base` unchanged and
/// zero attempts return 0. NaN propagates.
pub fn cumulative_probability(base: Probability, attempt_count: u32) -> Probability {
    match attempt_count {
        0 if base.is_nan() => base,
        0 => 0.0,
        1 => base,
        n => {
            // 1 - (1 - b)^n via ln_1p/exp_m1 so small bases keep precision
            -((n as f64) * (-base).ln_1p()).exp_m1()
        }
    }
}

/// Cumulative projections for attempts `1..=max_attempts`.
pub fn project_attempts(base: Probability, max_attempts: u32) -> Vec<AttemptProjection> {
    (1..=max_attempts)
        .map(|attempt_count| AttemptProjection {
            attempt_count,
            cumulative_probability: cumulative_probability(base, attempt_count),
        })
        .collect()
}

/// Full estimate for one input snapshot.
pub fn estimate(inputs: &PatientInputs, max_attempts: u32) -> Estimate {
    let breakdown = factor_breakdown(inputs);
    let base_probability = breakdown.probability;

    Estimate {
        bmi: inputs.bmi(),
        base_probability,
        breakdown,
        attempts: project_attempts(base_probability, max_attempts),
    }
}

/// Estimate many independent input snapshots using parallel processing.
pub fn estimate_batch(inputs: &[PatientInputs], max_attempts: u32) -> Vec<Estimate> {
    inputs
        .par_iter()
        .map(|input| estimate(input, max_attempts))
        .collect()
}

// ==================== Stateful Wrapper ====================

/// Estimator bound to a projection horizon.
///
/// Holds configuration only, never per-request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessEstimator {
    max_attempts: u32,
}

impl Default for SuccessEstimator {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_MAX_ATTEMPTS)
    }
}

impl SuccessEstimator {
    /// `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_probability(&self, inputs: &PatientInputs) -> Probability {
        base_probability(inputs)
    }

    pub fn cumulative_probability(&self, base: Probability, attempt_count: u32) -> Probability {
        cumulative_probability(base, attempt_count)
    }

    pub fn estimate(&self, inputs: &PatientInputs) -> Estimate {
        estimate(inputs, self.max_attempts)
    }

    pub fn estimate_batch(&self, inputs: &[PatientInputs]) -> Vec<Estimate> {
        estimate_batch(inputs, self.max_attempts)
    }
}
