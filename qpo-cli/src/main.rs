//! Portfolio QAOA driver
//!
//! Runs the default 50x50 grid search on the canonical three-asset
//! instance and prints the report. Pass `--json` for the JSON document
//! instead of plain text.

mod report;

use std::process::ExitCode;

use qpo_core::{instances, ParameterSearch};

fn main() -> ExitCode {
    let json = std::env::args().any(|arg| arg == "--json");

    let problem = instances::three_asset();
    let search = ParameterSearch::new(problem.clone());

    let result = match search.run() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("search failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        match report::render_json(&result, &problem) {
            Ok(doc) => println!("{doc}"),
            Err(err) => {
                eprintln!("report serialization failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report::render_text(&result, &problem));
    }

    ExitCode::SUCCESS
}
