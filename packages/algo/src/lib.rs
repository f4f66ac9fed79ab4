//! # ivf-algo - IVF success estimation model
//!
//! Pure Rust implementation of the success estimator:
//!
//! - **Base probability** - multiplicative risk/benefit factors over patient inputs
//! - **Cumulative probability** - compounding across independent attempts
//!
//! ## Design
//!
//! - **Pure** - no I/O, no logging, no shared state; identical inputs give identical outputs
//! - **Total** - never returns an error; degenerate inputs pass through and
//!   [`sanitize`] helps callers detect them
//! - **Parallel batches** - independent estimates fan out on rayon
//!
//! ## Modules
//!
//! - [`estimator`] - base probability, cumulative probability, projections
//! - [`sanitize`] - probability clamping and input diagnostics
//! - [`types`] - inputs, results and model constants
//!
//! ## Example
//!
//! ```rust
//! use ivf_algo::{base_probability, cumulative_probability, Diagnosis, EggSource, PatientInputs};
//!
//! let inputs = PatientInputs {
//!     age: 30.0,
//!     weight_kg: 60.0,
//!     height_cm: 165.0,
//!     prior_cycles: 0,
//!     prior_pregnancies: 0,
//!     diagnosis: Diagnosis::Unexplained,
//!     egg_source: EggSource::Own,
//! };
//!
//! let base = base_probability(&inputs);
//! assert!((base - 0.45).abs() < 1e-12);
//! assert!((cumulative_probability(base, 3) - 0.833625).abs() < 1e-12);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod estimator;
pub mod sanitize;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use estimator::{
    base_probability, cumulative_probability, estimate, estimate_batch, factor_breakdown,
    project_attempts, SuccessEstimator,
};

pub use sanitize::{clamp_probability, diagnose_inputs, has_invalid_values};
