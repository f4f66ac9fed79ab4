//! Form intake: turns the calculator form into validated model inputs.
//!
//! Numeric fields may arrive as JSON numbers or as the raw text of an input
//! box. The diagnosis is never rejected; unknown labels reach the model and
//! get its neutral multiplier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ivf_algo::{Diagnosis, EggSource, PatientInputs};

pub const DEFAULT_DIAGNOSIS: &str = "unexplained";
pub const DEFAULT_EGG_TYPE: &str = "own";
pub const DEFAULT_SELECTED_ATTEMPT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} is not a number: {value}")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a whole number of at least zero, got {value}")]
    NotACount { field: &'static str, value: f64 },
    #[error("unknown egg source: {0}")]
    UnknownEggSource(String),
}

/// A numeric form value, either typed or as entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(f64),
    Text(String),
}

impl From<f64> for FormNumber {
    fn from(value: f64) -> Self {
        FormNumber::Number(value)
    }
}

impl From<&str> for FormNumber {
    fn from(value: &str) -> Self {
        FormNumber::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateForm {
    #[serde(default)]
    pub age: Option<FormNumber>,
    /// Kilograms
    #[serde(default)]
    pub weight: Option<FormNumber>,
    /// Centimetres
    #[serde(default)]
    pub height: Option<FormNumber>,
    #[serde(default)]
    pub cycles: Option<FormNumber>,
    #[serde(default)]
    pub pregnancies: Option<FormNumber>,
    #[serde(default = "default_diagnosis")]
    pub diagnosis: String,
    #[serde(default = "default_egg_type")]
    pub egg_type: String,
    /// How many attempts the caller wants displayed
    #[serde(default = "default_selected_attempt")]
    pub selected_attempt: u32,
}

fn default_diagnosis() -> String {
    DEFAULT_DIAGNOSIS.to_string()
}

fn default_egg_type() -> String {
    DEFAULT_EGG_TYPE.to_string()
}

fn default_selected_attempt() -> u32 {
    DEFAULT_SELECTED_ATTEMPT
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self {
            age: None,
            weight: None,
            height: None,
            cycles: None,
            pregnancies: None,
            diagnosis: default_diagnosis(),
            egg_type: default_egg_type(),
            selected_attempt: default_selected_attempt(),
        }
    }
}

/// `None` for an absent or blank value
fn read_number(
    field: &'static str,
    value: Option<&FormNumber>,
) -> Result<Option<f64>, IntakeError> {
    let number = match value {
        None => return Ok(None),
        Some(FormNumber::Number(n)) => *n,
        Some(FormNumber::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map_err(|_| IntakeError::NotANumber {
                field,
                value: text.clone(),
            })?
        }
    };

    if !number.is_finite() {
        return Err(IntakeError::NotANumber {
            field,
            value: number.to_string(),
        });
    }
    Ok(Some(number))
}

fn require_positive(
    field: &'static str,
    value: Option<&FormNumber>,
) -> Result<f64, IntakeError> {
    let number = read_number(field, value)?.ok_or(IntakeError::Missing { field })?;
    if number <= 0.0 {
        return Err(IntakeError::NotPositive {
            field,
            value: number,
        });
    }
    Ok(number)
}

/// Blank counts default to zero
fn read_count(field: &'static str, value: Option<&FormNumber>) -> Result<u32, IntakeError> {
    let number = read_number(field, value)?.unwrap_or(0.0);
    if number < 0.0 || number.fract() != 0.0 || number > u32::MAX as f64 {
        return Err(IntakeError::NotACount {
            field,
            value: number,
        });
    }
    Ok(number as u32)
}

impl EstimateForm {
    pub fn to_inputs(&self) -> Result<PatientInputs, IntakeError> {
        let age = require_positive("age", self.age.as_ref())?;
        let weight_kg = require_positive("weight", self.weight.as_ref())?;
        let height_cm = require_positive("height", self.height.as_ref())?;
        let prior_cycles = read_count("cycles", self.cycles.as_ref())?;
        let prior_pregnancies = read_count("pregnancies", self.pregnancies.as_ref())?;
        let egg_source = EggSource::parse(&self.egg_type)
            .ok_or_else(|| IntakeError::UnknownEggSource(self.egg_type.clone()))?;

        Ok(PatientInputs {
            age,
            weight_kg,
            height_cm,
            prior_cycles,
            prior_pregnancies,
            diagnosis: Diagnosis::parse(&self.diagnosis),
            egg_source,
        })
    }
}
