//! Common Types and Constants
//!
//! Shared data structures used across the estimator and sanitize modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Age threshold (years) below which the younger starting value applies
pub const AGE_THRESHOLD: f64 = 35.0;

/// Starting value for patients younger than `AGE_THRESHOLD`
pub const YOUNGER_START: f64 = 0.6;

/// Starting value for patients at or above `AGE_THRESHOLD`
pub const OLDER_START: f64 = 0.4;

/// BMI strictly below this is underweight
pub const UNDERWEIGHT_BMI: f64 = 18.5;

/// BMI strictly above this is obese
pub const OBESE_BMI: f64 = 30.0;

/// Underweight multiplier
pub const UNDERWEIGHT_FACTOR: f64 = 0.8;

/// Obese multiplier
pub const OBESE_FACTOR: f64 = 0.7;

/// Penalty per prior cycle, applied as `1 - PRIOR_CYCLE_PENALTY * cycles`
pub const PRIOR_CYCLE_PENALTY: f64 = 0.05;

/// Bonus when at least one prior pregnancy is reported
pub const PRIOR_PREGNANCY_BONUS: f64 = 1.1;

/// Bonus for donor eggs
pub const DONOR_EGG_BONUS: f64 = 1.2;

/// Multiplier used for diagnosis labels outside the known table
pub const DEFAULT_DIAGNOSIS_MULTIPLIER: f64 = 1.0;

/// Number of attempts projected by default (the selectable range is 1..=3)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Single-attempt or cumulative success probability in [0, 1].
///
/// NaN is never replaced; callers detect it.
pub type Probability = f64;

// ==================== Patient Inputs ====================

/// Diagnosis category with its fixed multiplier.
///
/// Labels outside the known set are kept as `Unrecognized` and use
/// `DEFAULT_DIAGNOSIS_MULTIPLIER`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Diagnosis {
    MaleFactor,
    Endometriosis,
    Tubal,
    Ovulatory,
    DiminishedReserve,
    Uterine,
    Unexplained,
    Other,
    Unrecognized(String),
}

impl Diagnosis {
    /// All known categories, in table order
    pub const KNOWN: [Diagnosis; 8] = [
        Diagnosis::MaleFactor,
        Diagnosis::Endometriosis,
        Diagnosis::Tubal,
        Diagnosis::Ovulatory,
        Diagnosis::DiminishedReserve,
        Diagnosis::Uterine,
        Diagnosis::Unexplained,
        Diagnosis::Other,
    ];

    /// Total parse: unknown labels become `Unrecognized`.
    ///
    /// Accepts both the short form keys (`male`, `diminished`) and the long
    /// names (`male-factor`, `diminished-reserve`).
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "male" | "male-factor" | "male_factor" => Diagnosis::MaleFactor,
            "endometriosis" => Diagnosis::Endometriosis,
            "tubal" => Diagnosis::Tubal,
            "ovulatory" => Diagnosis::Ovulatory,
            "diminished" | "diminished-reserve" | "diminished_reserve" => {
                Diagnosis::DiminishedReserve
            }
            "uterine" => Diagnosis::Uterine,
            "unexplained" => Diagnosis::Unexplained,
            "other" => Diagnosis::Other,
            _ => Diagnosis::Unrecognized(label.to_string()),
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Diagnosis::MaleFactor => 0.8,
            Diagnosis::Endometriosis => 0.7,
            Diagnosis::Tubal => 0.6,
            Diagnosis::Ovulatory => 0.85,
            Diagnosis::DiminishedReserve => 0.6,
            Diagnosis::Uterine => 0.65,
            Diagnosis::Unexplained => 0.75,
            Diagnosis::Other => 1.0,
            Diagnosis::Unrecognized(_) => DEFAULT_DIAGNOSIS_MULTIPLIER,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Diagnosis::MaleFactor => "male-factor",
            Diagnosis::Endometriosis => "endometriosis",
            Diagnosis::Tubal => "tubal",
            Diagnosis::Ovulatory => "ovulatory",
            Diagnosis::DiminishedReserve => "diminished-reserve",
            Diagnosis::Uterine => "uterine",
            Diagnosis::Unexplained => "unexplained",
            Diagnosis::Other => "other",
            Diagnosis::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Diagnosis::Unrecognized(_))
    }
}

impl From<String> for Diagnosis {
    fn from(label: String) -> Self {
        Diagnosis::parse(&label)
    }
}

impl From<Diagnosis> for String {
    fn from(diagnosis: Diagnosis) -> Self {
        diagnosis.label().to_string()
    }
}

/// Source of the eggs used in treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EggSource {
    #[default]
    Own,
    Donor,
}

impl EggSource {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "own" => Some(EggSource::Own),
            "donor" => Some(EggSource::Donor),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            EggSource::Own => 1.0,
            EggSource::Donor => DONOR_EGG_BONUS,
        }
    }
}

/// Snapshot of the inputs for one estimate request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInputs {
    /// Age in years
    pub age: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimetres
    pub height_cm: f64,
    /// Number of previous treatment cycles
    pub prior_cycles: u32,
    /// Number of previous pregnancies
    pub prior_pregnancies: u32,
    pub diagnosis: Diagnosis,
    pub egg_source: EggSource,
}

impl PatientInputs {
    /// Body mass index, `weight / (height_m)^2`.
    ///
    /// Zero height yields Inf or NaN; no guard is applied here.
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

// ==================== Results ====================

/// Cumulative probability after `attempt_count` attempts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptProjection {
    pub attempt_count: u32,
    pub cumulative_probability: Probability,
}

/// Every factor applied by the base model, for explainability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorBreakdown {
    pub starting_value: f64,
    pub bmi_factor: f64,
    pub prior_cycle_factor: f64,
    pub prior_pregnancy_factor: f64,
    pub diagnosis_factor: f64,
    pub egg_source_factor: f64,
    /// Product of all factors before the final clamp
    pub unclamped: f64,
    /// Final clamped probability
    pub probability: Probability,
}

/// Full result for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub bmi: f64,
    pub base_probability: Probability,
    pub breakdown: FactorBreakdown,
    pub attempts: Vec<AttemptProjection>,
}

/// Degenerate-input flags the model itself does not act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDiagnostics {
    pub is_well_formed: bool,
    pub invalid_age: bool,
    pub invalid_bmi: bool,
    /// More than 20 prior cycles drive the penalty factor below zero
    pub negative_cycle_factor: bool,
    pub unrecognized_diagnosis: bool,
    pub message: String,
}
