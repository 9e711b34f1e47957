//! Report generation
//!
//! Formats a finished search into a plain-text report and a JSON document:
//! optimal parameters, the most probable selection with its risk/violation
//! decomposition, and the full enumeration table of all 2^n states.

use qpo_core::{basis, PortfolioProblem, SearchResult};

/// One row of the full state enumeration table
#[derive(Debug, Clone)]
pub struct StateRow {
    pub bitstring: String,
    pub risk: f64,
    pub asset_count: usize,
    pub violation: f64,
}

/// Enumerate every basis state with its risk, asset count, and violation.
pub fn state_table(problem: &PortfolioProblem) -> Vec<StateRow> {
    let n = problem.n_assets();
    (0..problem.dim())
        .map(|s| {
            let bits = basis::decode(s, n);
            StateRow {
                bitstring: basis::bitstring(s, n),
                risk: basis::quadratic_risk(&bits, problem.risk()),
                asset_count: basis::popcount(&bits),
                violation: basis::cardinality_violation(&bits, problem.target_assets()),
            }
        })
        .collect()
}

/// Render the plain-text report.
pub fn render_text(result: &SearchResult, problem: &PortfolioProblem) -> String {
    let mut report = String::new();

    report.push_str("=== Portfolio QAOA Search ===\n\n");
    report.push_str("Optimal parameters:\n");
    report.push_str(&format!("  gamma = {:.6}\n", result.best_gamma));
    report.push_str(&format!("  beta  = {:.6}\n", result.best_beta));
    report.push_str(&format!("Expected cost = {:.6}\n", result.best_cost));
    report.push_str(&format!(
        "Samples: {} evaluated, {} skipped, {} ms\n\n",
        result.evaluated_samples, result.skipped_samples, result.elapsed_ms
    ));

    let optimal = &result.optimal;
    report.push_str(&format!(
        "Most probable state (binary) = {}\n",
        optimal.bitstring
    ));
    report.push_str(&format!("  probability = {:.4}\n", optimal.probability));
    report.push_str(&format!("  cost = {:.6}\n", optimal.cost));
    report.push_str(&format!("  selected assets: {:?}\n", optimal.selected_assets));
    report.push_str(&format!("  risk (quadratic term) = {:.6}\n", optimal.risk));
    report.push_str(&format!(
        "  assets = {}, violation = {}\n\n",
        optimal.asset_count, optimal.violation
    ));

    report.push_str("All possible states:\n");
    for row in state_table(problem) {
        report.push_str(&format!(
            "  State {}: Risk = {:.3}, Assets = {}, Violation = {}\n",
            row.bitstring, row.risk, row.asset_count, row.violation
        ));
    }

    report
}

/// Render the JSON report.
pub fn render_json(
    result: &SearchResult,
    problem: &PortfolioProblem,
) -> serde_json::Result<String> {
    let table: Vec<serde_json::Value> = state_table(problem)
        .iter()
        .map(|row| {
            serde_json::json!({
                "state": row.bitstring,
                "risk": row.risk,
                "assets": row.asset_count,
                "violation": row.violation,
            })
        })
        .collect();

    let document = serde_json::json!({
        "search": result,
        "states": table,
    });
    serde_json::to_string_pretty(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpo_core::{instances, ParameterGrid, ParameterSearch, SearchConfig};

    fn small_result() -> (SearchResult, PortfolioProblem) {
        let problem = instances::three_asset();
        let config =
            SearchConfig::default().with_grid(ParameterGrid::uniform(6, 6).unwrap());
        let result = ParameterSearch::with_config(problem.clone(), config)
            .run()
            .unwrap();
        (result, problem)
    }

    #[test]
    fn test_state_table_covers_all_states() {
        let problem = instances::three_asset();
        let table = state_table(&problem);
        assert_eq!(table.len(), 8);
        assert_eq!(table[0].bitstring, "000");
        assert_eq!(table[7].bitstring, "111");
        assert_eq!(table[0].asset_count, 0);
        assert_eq!(table[0].violation, 4.0);
        // State 011: assets 1 and 2, risk 1 + 1 + 2*0.2 = 2.4.
        assert!((table[3].risk - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_text_report_contains_sections() {
        let (result, problem) = small_result();
        let text = render_text(&result, &problem);
        assert!(text.contains("Optimal parameters:"));
        assert!(text.contains("Most probable state (binary)"));
        assert!(text.contains("All possible states:"));
        // One table line per basis state.
        assert_eq!(text.matches("State ").count(), 8);
    }

    #[test]
    fn test_json_report_round_trips() {
        let (result, problem) = small_result();
        let json = render_json(&result, &problem).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["states"].as_array().unwrap().len(), 8);
        assert!(parsed["search"]["best_cost"].is_number());
        assert_eq!(
            parsed["search"]["optimal"]["bitstring"].as_str().unwrap().len(),
            3
        );
    }
}
