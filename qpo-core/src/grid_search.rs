//! Exhaustive (gamma, beta) grid search
//!
//! Evaluates one QAOA layer at every point of a finite parameter grid and
//! tracks the minimum expected cost. Enumeration is row-major: all betas
//! for a gamma before the next gamma. The minimum uses strict less-than
//! comparison, so on exact ties the earliest-enumerated pair wins; two
//! runs on the same inputs select bit-identical parameters.
//!
//! Each sample is a pure function of (gamma, beta) and the precomputed
//! operators, so the sweep parallelizes across gamma rows. The parallel
//! path combines per-row results in original enumeration order with the
//! same tie-break, and is bit-identical to the sequential sweep.

use std::f64::consts::PI;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::basis;
use crate::cost_hamiltonian::CostHamiltonian;
use crate::error::{QpoError, Result};
use crate::evolution::QaoaLayer;
use crate::expectation::expected_cost;
use crate::mixing_hamiltonian::MixingHamiltonian;
use crate::problem::PortfolioProblem;
use crate::state::QaoaState;

// =============================================================================
// Constants
// =============================================================================

/// Default number of gamma samples
pub const DEFAULT_GAMMA_POINTS: usize = 50;

/// Default number of beta samples
pub const DEFAULT_BETA_POINTS: usize = 50;

/// Default gamma range span: [0, 2*pi)
pub const DEFAULT_GAMMA_SPAN: f64 = 2.0 * PI;

/// Default beta range span: [0, pi)
pub const DEFAULT_BETA_SPAN: f64 = PI;

// =============================================================================
// Parameter Grid
// =============================================================================

/// Finite sets of candidate gamma and beta values.
///
/// Constructors reject empty axes; a held grid always has at least one
/// sample per axis.
#[derive(Debug, Clone)]
pub struct ParameterGrid {
    gammas: Vec<f64>,
    betas: Vec<f64>,
}

impl ParameterGrid {
    /// Uniform grid over the default spans [0, 2*pi) x [0, pi), lower
    /// bound inclusive, upper bound excluded (step = span / points).
    pub fn uniform(gamma_points: usize, beta_points: usize) -> Result<Self> {
        Self::with_spans(gamma_points, DEFAULT_GAMMA_SPAN, beta_points, DEFAULT_BETA_SPAN)
    }

    /// Uniform grid over [0, gamma_span) x [0, beta_span).
    pub fn with_spans(
        gamma_points: usize,
        gamma_span: f64,
        beta_points: usize,
        beta_span: f64,
    ) -> Result<Self> {
        let gammas = (0..gamma_points)
            .map(|k| k as f64 * gamma_span / gamma_points as f64)
            .collect();
        let betas = (0..beta_points)
            .map(|k| k as f64 * beta_span / beta_points as f64)
            .collect();
        Self::from_values(gammas, betas)
    }

    /// Grid from explicit candidate values.
    pub fn from_values(gammas: Vec<f64>, betas: Vec<f64>) -> Result<Self> {
        if gammas.is_empty() {
            return Err(QpoError::EmptyGrid { axis: "gamma" });
        }
        if betas.is_empty() {
            return Err(QpoError::EmptyGrid { axis: "beta" });
        }
        Ok(Self { gammas, betas })
    }

    /// Gamma candidates in enumeration order
    pub fn gammas(&self) -> &[f64] {
        &self.gammas
    }

    /// Beta candidates in enumeration order
    pub fn betas(&self) -> &[f64] {
        &self.betas
    }

    /// Total number of (gamma, beta) samples
    pub fn len(&self) -> usize {
        self.gammas.len() * self.betas.len()
    }

    /// Always false: constructors reject empty axes
    pub fn is_empty(&self) -> bool {
        self.gammas.is_empty() || self.betas.is_empty()
    }
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self::uniform(DEFAULT_GAMMA_POINTS, DEFAULT_BETA_POINTS)
            .expect("default grid dimensions are non-zero")
    }
}

// =============================================================================
// Search Configuration
// =============================================================================

/// Policy for numerical errors in individual (gamma, beta) samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericalErrorPolicy {
    /// Abort the whole search on the first numerical error
    #[default]
    FailFast,
    /// Record the sample as skipped and continue; a failed sample is never
    /// a candidate minimum
    SkipSample,
}

/// Grid search configuration
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Candidate parameter values
    pub grid: ParameterGrid,
    /// Partition gamma rows across rayon workers
    pub parallel: bool,
    /// What to do when a sample produces non-finite results
    pub on_numerical_error: NumericalErrorPolicy,
}

impl SearchConfig {
    /// Set the parameter grid
    pub fn with_grid(mut self, grid: ParameterGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Enable the parallel sweep
    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Set the numerical-error policy
    pub fn with_numerical_error_policy(mut self, policy: NumericalErrorPolicy) -> Self {
        self.on_numerical_error = policy;
        self
    }
}

// =============================================================================
// Search Result
// =============================================================================

/// Most-probable basis state at the optimum, with its cost decomposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalState {
    /// Basis index of the most probable state
    pub index: usize,
    /// Binary string, most significant bit first
    pub bitstring: String,
    /// Probability of that state under the optimal distribution
    pub probability: f64,
    /// Indices of selected assets
    pub selected_assets: Vec<usize>,
    /// Number of selected assets
    pub asset_count: usize,
    /// Quadratic risk x^T Q x
    pub risk: f64,
    /// Squared cardinality deviation
    pub violation: f64,
    /// Total objective value risk + penalty * violation
    pub cost: f64,
}

/// Result of an exhaustive grid search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Gamma of the minimum, first-enumerated on ties
    pub best_gamma: f64,
    /// Beta of the minimum, first-enumerated on ties
    pub best_beta: f64,
    /// Minimum expected cost over the grid
    pub best_cost: f64,
    /// Number of samples evaluated successfully
    pub evaluated_samples: usize,
    /// Number of samples skipped under [`NumericalErrorPolicy::SkipSample`]
    pub skipped_samples: usize,
    /// Wall-clock time of the sweep
    pub elapsed_ms: u64,
    /// Most-probable state at the optimum
    pub optimal: OptimalState,
}

// =============================================================================
// Parameter Search
// =============================================================================

/// Minimum tracked during a sweep, tagged with the flat enumeration index
/// so parallel combination preserves the sequential tie-break.
#[derive(Debug, Clone, Copy)]
struct BestSample {
    cost: f64,
    flat_index: usize,
    gamma: f64,
    beta: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct RowOutcome {
    best: Option<BestSample>,
    skipped: usize,
}

/// Exhaustive QAOA parameter search over a problem instance
pub struct ParameterSearch {
    problem: PortfolioProblem,
    config: SearchConfig,
}

impl ParameterSearch {
    /// Search with the default 50x50 grid, sequential, fail-fast
    pub fn new(problem: PortfolioProblem) -> Self {
        Self::with_config(problem, SearchConfig::default())
    }

    /// Search with an explicit configuration
    pub fn with_config(problem: PortfolioProblem, config: SearchConfig) -> Self {
        Self { problem, config }
    }

    /// Problem instance
    pub fn problem(&self) -> &PortfolioProblem {
        &self.problem
    }

    /// Run the sweep and summarize the optimum.
    pub fn run(&self) -> Result<SearchResult> {
        let cost = CostHamiltonian::build(&self.problem);
        let mixing = MixingHamiltonian::build(self.problem.n_assets())?;
        let layer = QaoaLayer::new(&cost, &mixing)?;
        let psi0 = QaoaState::uniform(self.problem.n_assets());

        let start = Instant::now();
        let outcome = if self.config.parallel {
            self.sweep_parallel(&layer, &cost, &psi0)?
        } else {
            self.sweep_sequential(&layer, &cost, &psi0)?
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        // Every sample failing under SkipSample leaves nothing to report;
        // treat it as the instability it is.
        let best = outcome.best.ok_or(QpoError::NumericalInstability {
            gamma: f64::NAN,
            beta: f64::NAN,
        })?;

        let optimal = self.summarize_optimum(&layer, &cost, &psi0, best.gamma, best.beta)?;

        Ok(SearchResult {
            best_gamma: best.gamma,
            best_beta: best.beta,
            best_cost: best.cost,
            evaluated_samples: self.config.grid.len() - outcome.skipped,
            skipped_samples: outcome.skipped,
            elapsed_ms,
            optimal,
        })
    }

    /// Evaluate one sample; a non-finite expectation is a numerical error,
    /// never a candidate minimum.
    fn evaluate_sample(
        &self,
        layer: &QaoaLayer,
        cost: &CostHamiltonian,
        psi0: &QaoaState,
        gamma: f64,
        beta: f64,
    ) -> Result<f64> {
        let psi = layer.apply(gamma, beta, psi0)?;
        let value = expected_cost(&psi, cost)?;
        if !value.is_finite() {
            return Err(QpoError::NumericalInstability { gamma, beta });
        }
        Ok(value)
    }

    /// Sweep one gamma row in beta enumeration order.
    fn sweep_row(
        &self,
        layer: &QaoaLayer,
        cost: &CostHamiltonian,
        psi0: &QaoaState,
        gamma_index: usize,
        gamma: f64,
    ) -> Result<RowOutcome> {
        let betas = self.config.grid.betas();
        let mut outcome = RowOutcome::default();

        for (beta_index, &beta) in betas.iter().enumerate() {
            let flat_index = gamma_index * betas.len() + beta_index;
            match self.evaluate_sample(layer, cost, psi0, gamma, beta) {
                Ok(value) => {
                    let better = match outcome.best {
                        None => true,
                        Some(best) => value < best.cost,
                    };
                    if better {
                        outcome.best = Some(BestSample {
                            cost: value,
                            flat_index,
                            gamma,
                            beta,
                        });
                    }
                }
                Err(err) if err.is_numerical() => match self.config.on_numerical_error {
                    NumericalErrorPolicy::FailFast => return Err(err),
                    NumericalErrorPolicy::SkipSample => outcome.skipped += 1,
                },
                Err(err) => return Err(err),
            }
        }
        Ok(outcome)
    }

    fn sweep_sequential(
        &self,
        layer: &QaoaLayer,
        cost: &CostHamiltonian,
        psi0: &QaoaState,
    ) -> Result<RowOutcome> {
        let mut combined = RowOutcome::default();
        for (gamma_index, &gamma) in self.config.grid.gammas().iter().enumerate() {
            let row = self.sweep_row(layer, cost, psi0, gamma_index, gamma)?;
            combined = Self::combine(combined, row);
        }
        Ok(combined)
    }

    fn sweep_parallel(
        &self,
        layer: &QaoaLayer,
        cost: &CostHamiltonian,
        psi0: &QaoaState,
    ) -> Result<RowOutcome> {
        let rows: Vec<RowOutcome> = self
            .config
            .grid
            .gammas()
            .par_iter()
            .enumerate()
            .map(|(gamma_index, &gamma)| self.sweep_row(layer, cost, psi0, gamma_index, gamma))
            .collect::<Result<_>>()?;

        // Rows combine in original enumeration order with the same strict
        // less-than rule, so the selection matches the sequential sweep
        // exactly.
        Ok(rows.into_iter().fold(RowOutcome::default(), Self::combine))
    }

    fn combine(left: RowOutcome, right: RowOutcome) -> RowOutcome {
        let best = match (left.best, right.best) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => {
                debug_assert!(a.flat_index < b.flat_index);
                if b.cost < a.cost {
                    Some(b)
                } else {
                    Some(a)
                }
            }
        };
        RowOutcome {
            best,
            skipped: left.skipped + right.skipped,
        }
    }

    /// Re-evolve at the optimum and decompose the most probable state.
    fn summarize_optimum(
        &self,
        layer: &QaoaLayer,
        cost: &CostHamiltonian,
        psi0: &QaoaState,
        gamma: f64,
        beta: f64,
    ) -> Result<OptimalState> {
        let psi = layer.apply(gamma, beta, psi0)?;
        let (index, probability) = psi.most_probable();

        let n = self.problem.n_assets();
        let bits = basis::decode(index, n);
        let selected_assets = bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b == 1)
            .map(|(i, _)| i)
            .collect();

        Ok(OptimalState {
            index,
            bitstring: basis::bitstring(index, n),
            probability,
            selected_assets,
            asset_count: basis::popcount(&bits),
            risk: basis::quadratic_risk(&bits, self.problem.risk()),
            violation: basis::cardinality_violation(&bits, self.problem.target_assets()),
            cost: cost.value(index),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
