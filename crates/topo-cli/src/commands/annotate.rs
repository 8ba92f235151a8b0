use super::{print_summary, run_check_workflow};
use crate::cli::AnnotateArgs;
use crate::config::build_config;
use crate::error::Result;
use std::io;
use topoconflict::core::io::report::{self, AnnotatedRecord};
use tracing::info;

pub fn run(args: AnnotateArgs) -> Result<()> {
    let config = build_config(&args.analysis, args.output.as_deref(), args.pretty)?;
    let check_report = run_check_workflow(&config, !args.analysis.no_progress)?;

    let annotated: Vec<AnnotatedRecord> = check_report
        .records
        .iter()
        .filter(|record| !args.conflicts_only || record.has_conflicts())
        .map(AnnotatedRecord::from)
        .collect();

    match &config.output_path {
        Some(path) => {
            info!("Writing {} annotated record(s) to {:?}", annotated.len(), path);
            report::write_json_to_path(&annotated, path, config.pretty)?;
            eprintln!("✓ Annotated records written to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            report::write_json(&annotated, &mut stdout, config.pretty)?;
        }
    }

    print_summary(&check_report);
    Ok(())
}
