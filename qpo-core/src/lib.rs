//! Single-layer QAOA simulation for quadratic portfolio selection
//!
//! The pipeline: encode each of the 2^n asset-selection vectors as a
//! computational basis state, build the diagonal cost Hamiltonian and the
//! dense mixing Hamiltonian, evolve the uniform superposition through one
//! QAOA layer, and grid-search the (gamma, beta) angles for the minimum
//! expected cost.
//!
//! # Example
//!
//! ```ignore
//! use qpo_core::{instances, ParameterSearch};
//!
//! let problem = instances::three_asset();
//! let result = ParameterSearch::new(problem).run()?;
//! println!("best (gamma, beta) = ({}, {})", result.best_gamma, result.best_beta);
//! println!("most probable selection: {}", result.optimal.bitstring);
//! ```

pub mod basis; // Basis index <-> selection-vector codec and per-state features
pub mod cost_hamiltonian;
pub mod error;
pub mod evolution; // One QAOA layer (cost phase + mixing phase)
pub mod expectation;
pub mod grid_search; // Exhaustive (gamma, beta) parameter search
pub mod matrix_exp; // Dense matrix exponential (reference path)
pub mod mixing_hamiltonian;
pub mod problem;
pub mod state;

pub use cost_hamiltonian::CostHamiltonian;
pub use error::{QpoError, Result};
pub use evolution::{apply_via_expm, QaoaLayer};
pub use expectation::expected_cost;
pub use grid_search::{
    NumericalErrorPolicy, OptimalState, ParameterGrid, ParameterSearch, SearchConfig,
    SearchResult, DEFAULT_BETA_POINTS, DEFAULT_BETA_SPAN, DEFAULT_GAMMA_POINTS,
    DEFAULT_GAMMA_SPAN,
};
pub use matrix_exp::expm;
pub use mixing_hamiltonian::{MixingEigen, MixingHamiltonian};
pub use problem::{instances, PortfolioProblem, DEFAULT_TARGET_ASSETS, MAX_ASSETS_DENSE};
pub use state::QaoaState;
