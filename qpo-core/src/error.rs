//! Error types for the portfolio QAOA pipeline
//!
//! Two failure classes exist:
//! - Configuration errors: invalid problem or grid parameters, detected
//!   eagerly before any Hamiltonian is built. Fatal to the run.
//! - Numerical errors: non-finite amplitudes or expectation values from a
//!   specific (gamma, beta) sample. Fail-fast by default, skippable via
//!   the search configuration.

use thiserror::Error;

/// Result type alias for qpo-core operations
pub type Result<T> = std::result::Result<T, QpoError>;

/// Error type for portfolio QAOA construction and evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QpoError {
    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Asset count must be at least 1
    #[error("invalid asset count {n}: at least one asset is required")]
    InvalidAssetCount { n: usize },

    /// Asset count exceeds the dense-representation ceiling
    #[error("asset count {n} exceeds the dense mixing-operator limit of {max} qubits")]
    AssetCountTooLarge { n: usize, max: usize },

    /// Risk matrix is not square
    #[error("risk matrix must be square, got {rows}x{cols}")]
    NonSquareRiskMatrix { rows: usize, cols: usize },

    /// Penalty weight must be non-negative and finite
    #[error("invalid penalty weight {penalty}: must be finite and >= 0")]
    InvalidPenalty { penalty: f64 },

    /// State or operator dimensions disagree
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A search grid axis has no sample points
    #[error("empty search grid for {axis}")]
    EmptyGrid { axis: &'static str },

    // ==========================================================================
    // Numerical Errors
    // ==========================================================================
    /// A (gamma, beta) sample produced non-finite amplitudes or expectation
    #[error("numerical instability at gamma={gamma}, beta={beta}")]
    NumericalInstability { gamma: f64, beta: f64 },

    /// The dense matrix exponential produced non-finite entries
    #[error("matrix exponential diverged (non-finite entries)")]
    MatrixExponentialDiverged,
}

impl QpoError {
    /// Configuration errors are caller mistakes and fatal to the run;
    /// numerical errors are per-sample and may be skipped by policy.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            QpoError::NumericalInstability { .. } | QpoError::MatrixExponentialDiverged
        )
    }
}
