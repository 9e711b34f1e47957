//! Cost Hamiltonian construction
//!
//! The cost operator H_C is diagonal in the computational basis: entry s
//! is the objective value of the selection vector encoded by s,
//!
//!   diag[s] = x(s)^T Q x(s) + penalty * (popcount(x(s)) - target)^2
//!
//! Only the diagonal vector is stored; the full matrix is an embedding
//! kept for structural tests. Immutable once built.

use ndarray::{Array1, Array2};

use crate::problem::PortfolioProblem;

/// Diagonal cost operator over all 2^n basis states, ordered by index
#[derive(Debug, Clone)]
pub struct CostHamiltonian {
    diag: Array1<f64>,
    n_assets: usize,
}

impl CostHamiltonian {
    /// Build the diagonal in a single pass over all 2^n basis states.
    pub fn build(problem: &PortfolioProblem) -> Self {
        let dim = problem.dim();
        let mut diag = Array1::zeros(dim);
        for s in 0..dim {
            diag[s] = problem.cost_of(s);
        }
        Self {
            diag,
            n_assets: problem.n_assets(),
        }
    }

    /// Diagonal entries, indexed by basis state
    pub fn diag(&self) -> &Array1<f64> {
        &self.diag
    }

    /// Hilbert-space dimension 2^n
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    /// Number of assets (qubits)
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Cost of a single basis state
    pub fn value(&self, index: usize) -> f64 {
        self.diag[index]
    }

    /// Dense diagonal embedding of the operator
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_diag(&self.diag)
    }
}
