use super::{print_summary, run_check_workflow};
use crate::cli::CheckArgs;
use crate::config::build_config;
use crate::error::Result;
use std::io;
use topoconflict::core::io::report;
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args.analysis, args.output.as_deref(), args.pretty)?;

    let check_report = run_check_workflow(&config, !args.analysis.no_progress)?;

    match &config.output_path {
        Some(path) => {
            info!("Writing {} report row(s) to {:?}", check_report.rows.len(), path);
            report::write_json_to_path(&check_report.rows, path, config.pretty)?;
            eprintln!("✓ Conflict report written to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            report::write_json(&check_report.rows, &mut stdout, config.pretty)?;
        }
    }

    print_summary(&check_report);
    Ok(())
}
