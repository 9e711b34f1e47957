//! Dense matrix exponential
//!
//! Scaling-and-squaring with a truncated Taylor series: the argument is
//! halved until its 1-norm is at most 1, the series
//! exp(M) = I + M + M^2/2! + ... is summed, and the result is squared back
//! up. With the norm scaled below 1, twenty terms put the truncation error
//! at the level of f64 rounding.
//!
//! This is the reference path for the mixing unitary; the evolver's
//! default path goes through the cached eigendecomposition instead and is
//! tested for agreement with this one.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{QpoError, Result};

/// Number of Taylor terms after scaling the norm to at most 1
const TAYLOR_TERMS: usize = 20;

/// Compute exp(a) for a square complex matrix.
///
/// Non-finite entries in the result surface as
/// [`QpoError::MatrixExponentialDiverged`]; they are never returned as a
/// valid exponential.
pub fn expm(a: &Array2<Complex64>) -> Result<Array2<Complex64>> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(QpoError::DimensionMismatch {
            expected: rows,
            actual: cols,
        });
    }

    // 1-norm (max absolute column sum) decides the scaling depth.
    let norm = (0..cols)
        .map(|j| a.column(j).iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max);
    if !norm.is_finite() {
        return Err(QpoError::MatrixExponentialDiverged);
    }

    let squarings = if norm > 1.0 {
        norm.log2().ceil() as i32
    } else {
        0
    };
    let scale = 2f64.powi(squarings);
    let scaled = a.mapv(|z| z / scale);

    let mut result = Array2::<Complex64>::eye(rows);
    let mut term = Array2::<Complex64>::eye(rows);
    for k in 1..=TAYLOR_TERMS {
        term = term.dot(&scaled).mapv(|z| z / k as f64);
        result += &term;
    }

    for _ in 0..squarings {
        result = result.dot(&result);
    }

    if result.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
        return Err(QpoError::MatrixExponentialDiverged);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    const ZERO: Complex64 = Complex64::new(0.0, 0.0);
    const ONE: Complex64 = Complex64::new(1.0, 0.0);

    #[test]
    fn test_exp_of_zero_is_identity() {
        let zero = Array2::<Complex64>::zeros((3, 3));
        let e = expm(&zero).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { ONE } else { ZERO };
                assert!((e[[i, j]] - expected).norm() < 1e-14);
            }
        }
    }

    #[test]
    fn test_exp_of_diagonal() {
        let a = arr2(&[
            [Complex64::new(1.0, 0.0), ZERO],
            [ZERO, Complex64::new(-2.0, 0.0)],
        ]);
        let e = expm(&a).unwrap();
        assert!((e[[0, 0]].re - 1f64.exp()).abs() < 1e-12);
        assert!((e[[1, 1]].re - (-2f64).exp()).abs() < 1e-12);
        assert!(e[[0, 1]].norm() < 1e-14);
        assert!(e[[1, 0]].norm() < 1e-14);
    }

    #[test]
    fn test_exp_of_flip_rotation() {
        // exp(-i*theta*X) = cos(theta) I - i sin(theta) X.
        let theta = 0.7;
        let a = arr2(&[
            [ZERO, Complex64::new(0.0, -theta)],
            [Complex64::new(0.0, -theta), ZERO],
        ]);
        let e = expm(&a).unwrap();
        assert!((e[[0, 0]] - Complex64::new(theta.cos(), 0.0)).norm() < 1e-12);
        assert!((e[[0, 1]] - Complex64::new(0.0, -theta.sin())).norm() < 1e-12);
        assert!((e[[1, 0]] - Complex64::new(0.0, -theta.sin())).norm() < 1e-12);
        assert!((e[[1, 1]] - Complex64::new(theta.cos(), 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_exp_of_anti_hermitian_is_unitary() {
        // -i*beta*H with symmetric real H gives a unitary exponential.
        let beta = 1.3;
        let h = arr2(&[[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]]);
        let a = h.mapv(|x| Complex64::new(0.0, -beta * x));
        let e = expm(&a).unwrap();

        // U U^dagger = I.
        let e_dag = e.t().mapv(|z| z.conj());
        let product = e.dot(&e_dag);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { ONE } else { ZERO };
                assert!((product[[i, j]] - expected).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_rejects_non_square() {
        let a = Array2::<Complex64>::zeros((2, 3));
        assert!(matches!(
            expm(&a),
            Err(QpoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let mut a = Array2::<Complex64>::zeros((2, 2));
        a[[0, 0]] = Complex64::new(f64::NAN, 0.0);
        assert_eq!(expm(&a).unwrap_err(), QpoError::MatrixExponentialDiverged);
    }
}
