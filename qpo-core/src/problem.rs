//! Portfolio selection problem definition
//!
//! A problem instance is an n-asset quadratic risk matrix Q, a penalty
//! weight for the soft cardinality constraint, and a target asset count.
//! The objective evaluated on a selection vector x is
//!
//!   cost(x) = x^T Q x + penalty * (sum(x) - target)^2
//!
//! Validation happens eagerly at construction: once a `PortfolioProblem`
//! exists, Hamiltonian construction cannot fail.

use ndarray::Array2;

use crate::basis;
use crate::error::{QpoError, Result};

// =============================================================================
// Constants
// =============================================================================

/// Default target number of selected assets in the cardinality penalty
pub const DEFAULT_TARGET_ASSETS: usize = 2;

/// Ceiling on the dense 2^n x 2^n mixing-operator representation.
/// Past this, H_M and its eigenvector matrix no longer fit commodity RAM.
pub const MAX_ASSETS_DENSE: usize = 14;

// =============================================================================
// Problem Instance
// =============================================================================

/// Immutable portfolio-selection problem instance
#[derive(Debug, Clone)]
pub struct PortfolioProblem {
    /// Number of assets (qubits)
    n_assets: usize,
    /// Quadratic risk matrix, n x n
    risk: Array2<f64>,
    /// Non-negative weight of the cardinality penalty term
    penalty: f64,
    /// Target number of selected assets
    target_assets: usize,
}

impl PortfolioProblem {
    /// Create a problem instance from a risk matrix and penalty weight.
    ///
    /// The target cardinality defaults to [`DEFAULT_TARGET_ASSETS`]; use
    /// [`with_target_assets`](Self::with_target_assets) to override it.
    pub fn new(risk: Array2<f64>, penalty: f64) -> Result<Self> {
        let (rows, cols) = risk.dim();
        if rows != cols {
            return Err(QpoError::NonSquareRiskMatrix { rows, cols });
        }
        if rows < 1 {
            return Err(QpoError::InvalidAssetCount { n: rows });
        }
        if rows > MAX_ASSETS_DENSE {
            return Err(QpoError::AssetCountTooLarge {
                n: rows,
                max: MAX_ASSETS_DENSE,
            });
        }
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(QpoError::InvalidPenalty { penalty });
        }

        Ok(Self {
            n_assets: rows,
            risk,
            penalty,
            target_assets: DEFAULT_TARGET_ASSETS,
        })
    }

    /// Set the target asset count of the cardinality penalty
    pub fn with_target_assets(mut self, target: usize) -> Self {
        self.target_assets = target;
        self
    }

    /// Number of assets (qubits)
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Hilbert-space dimension 2^n
    pub fn dim(&self) -> usize {
        1 << self.n_assets
    }

    /// Risk matrix
    pub fn risk(&self) -> &Array2<f64> {
        &self.risk
    }

    /// Penalty weight
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Target asset count
    pub fn target_assets(&self) -> usize {
        self.target_assets
    }

    /// Objective value of one basis state: risk plus weighted violation
    pub fn cost_of(&self, index: usize) -> f64 {
        let bits = basis::decode(index, self.n_assets);
        basis::quadratic_risk(&bits, &self.risk)
            + self.penalty * basis::cardinality_violation(&bits, self.target_assets)
    }
}

// =============================================================================
// Common Problem Instances
// =============================================================================

/// Canonical problem instances for tests and demos
pub mod instances {
    use super::*;
    use ndarray::arr2;

    /// The three-asset instance: mildly correlated unit-risk assets,
    /// penalty 10, target cardinality 2.
    pub fn three_asset() -> PortfolioProblem {
        let risk = arr2(&[
            [1.0, 0.5, 0.3],
            [0.5, 1.0, 0.2],
            [0.3, 0.2, 1.0],
        ]);
        PortfolioProblem::new(risk, 10.0).expect("canonical instance is valid")
    }

    /// n uncorrelated unit-risk assets (identity Q) with the given penalty.
    pub fn uncorrelated(n: usize, penalty: f64) -> PortfolioProblem {
        PortfolioProblem::new(Array2::eye(n), penalty).expect("identity instance is valid")
    }
}

// =============================================================================
// Tests
// =============================================================================
