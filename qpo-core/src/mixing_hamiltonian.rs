//! Mixing Hamiltonian construction
//!
//! The mixing operator drives transitions between basis states:
//!
//!   H_M = sum_{i=0}^{n-1} I x ... x X x ... x I
//!
//! with the flip matrix X = [[0,1],[1,0]] at tensor position i, counted
//! from the most significant qubit so that the embedding agrees with the
//! basis ordering used by the cost Hamiltonian. Entry (s, t) is 1 exactly
//! when s and t differ in a single bit.
//!
//! Construction is O(n * 2^2n) time and O(2^2n) space; the dense
//! representation is only feasible for small n (see
//! [`MAX_ASSETS_DENSE`](crate::problem::MAX_ASSETS_DENSE), enforced at
//! problem construction).
//!
//! H_M is real symmetric, so exp(-i*beta*H_M) shares one eigenbasis for
//! every beta. [`MixingHamiltonian::eigendecomposition`] computes that
//! basis once per instance; the evolver reuses it across the whole
//! parameter grid.

use nalgebra::DMatrix;
use ndarray::linalg::kron;
use ndarray::{arr2, Array1, Array2};

use crate::error::{QpoError, Result};
use crate::problem::MAX_ASSETS_DENSE;

/// Dense mixing operator for n qubits
#[derive(Debug, Clone)]
pub struct MixingHamiltonian {
    matrix: Array2<f64>,
    n_qubits: usize,
}

/// One-time spectral decomposition of the mixing operator.
///
/// Columns of `eigenvectors` are orthonormal eigenstates; `eigenvalues`
/// is ordered to match. exp(-i*beta*H_M) = V diag(exp(-i*beta*lambda)) V^T.
#[derive(Debug, Clone)]
pub struct MixingEigen {
    pub eigenvalues: Array1<f64>,
    pub eigenvectors: Array2<f64>,
}

impl MixingHamiltonian {
    /// Build the dense mixing operator by repeated Kronecker products.
    pub fn build(n_qubits: usize) -> Result<Self> {
        if n_qubits < 1 {
            return Err(QpoError::InvalidAssetCount { n: n_qubits });
        }
        if n_qubits > MAX_ASSETS_DENSE {
            return Err(QpoError::AssetCountTooLarge {
                n: n_qubits,
                max: MAX_ASSETS_DENSE,
            });
        }

        let flip = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        let identity = Array2::<f64>::eye(2);
        let dim = 1 << n_qubits;

        let mut matrix = Array2::<f64>::zeros((dim, dim));
        for i in 0..n_qubits {
            // Embed X at tensor position i, identity elsewhere. Position 0
            // is the most significant qubit, so factors accumulate
            // left-to-right.
            let mut op = Array2::<f64>::eye(1);
            for j in 0..n_qubits {
                op = if j == i {
                    kron(&op, &flip)
                } else {
                    kron(&op, &identity)
                };
            }
            matrix += &op;
        }

        Ok(Self { matrix, n_qubits })
    }

    /// Dense operator matrix
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Hilbert-space dimension 2^n
    pub fn dim(&self) -> usize {
        1 << self.n_qubits
    }

    /// Number of qubits
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Diagonalize the operator.
    ///
    /// H_M is symmetric by construction, so the decomposition is real
    /// orthogonal. Computed once per problem instance and reused for every
    /// beta in the grid.
    pub fn eigendecomposition(&self) -> MixingEigen {
        let dim = self.dim();
        let dense = DMatrix::from_fn(dim, dim, |r, c| self.matrix[[r, c]]);
        let eig = dense.symmetric_eigen();

        let eigenvalues = Array1::from_iter(eig.eigenvalues.iter().copied());
        let eigenvectors =
            Array2::from_shape_fn((dim, dim), |(r, c)| eig.eigenvectors[(r, c)]);

        MixingEigen {
            eigenvalues,
            eigenvectors,
        }
    }
}
