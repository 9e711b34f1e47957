//! Quantum state vector
//!
//! A state over n qubits is a complex vector of length 2^n, unit-normalized
//! under the L2 norm. States are created per (gamma, beta) sample and
//! discarded after their expectation value is read; only the uniform
//! superposition is retained across the grid search.

use ndarray::Array1;
use num_complex::Complex64;

/// Complex state vector over the 2^n computational basis
#[derive(Debug, Clone)]
pub struct QaoaState {
    amplitudes: Array1<Complex64>,
}

impl QaoaState {
    /// Uniform superposition: every amplitude 1/sqrt(2^n).
    pub fn uniform(n_qubits: usize) -> Self {
        let dim = 1 << n_qubits;
        let amp = Complex64::new(1.0 / (dim as f64).sqrt(), 0.0);
        Self {
            amplitudes: Array1::from_elem(dim, amp),
        }
    }

    /// Wrap an existing amplitude vector.
    pub fn from_amplitudes(amplitudes: Array1<Complex64>) -> Self {
        Self { amplitudes }
    }

    /// Amplitude vector
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Hilbert-space dimension
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// L2 norm
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// True when the norm is within `tol` of 1
    pub fn is_normalized(&self, tol: f64) -> bool {
        (self.norm() - 1.0).abs() < tol
    }

    /// Probability of one basis state
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sqr()
    }

    /// Full probability distribution
    pub fn probabilities(&self) -> Array1<f64> {
        self.amplitudes.mapv(|a| a.norm_sqr())
    }

    /// Most probable basis state and its probability.
    ///
    /// On exact probability ties the lowest index wins, keeping the result
    /// deterministic.
    pub fn most_probable(&self) -> (usize, f64) {
        let mut best_index = 0;
        let mut best_prob = self.probability(0);
        for (i, a) in self.amplitudes.iter().enumerate().skip(1) {
            let p = a.norm_sqr();
            if p > best_prob {
                best_prob = p;
                best_index = i;
            }
        }
        (best_index, best_prob)
    }
}
