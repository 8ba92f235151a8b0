pub mod annotate;
pub mod check;
pub mod topology;

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use topoconflict::core::io::source::CsvSource;
use topoconflict::engine::progress::ProgressReporter;
use topoconflict::workflows;
use topoconflict::workflows::check::CheckReport;
use tracing::{debug, info};

/// Opens the input table and runs the check workflow over it.
fn run_check_workflow(config: &AppConfig, show_progress: bool) -> Result<CheckReport> {
    info!("Loading protein table from {:?}", &config.input_path);
    let mut source =
        CsvSource::from_path(&config.input_path, config.csv).map_err(|e| CliError::Source {
            path: config.input_path.clone(),
            source: e,
        })?;

    let reporter = if show_progress {
        CliProgressHandler::new().reporter()
    } else {
        ProgressReporter::new()
    };

    info!("Invoking the core check workflow...");
    let report = workflows::check::run(&mut source, &config.analysis, &reporter)?;
    debug!(skipped = report.skipped.len(), "Core check workflow returned.");
    Ok(report)
}

fn print_summary(report: &CheckReport) {
    let summary = report.summary();
    eprintln!(
        "Analysed {} protein(s), skipped {} row(s).",
        summary.analysed, summary.skipped
    );
    for (kind, count) in &summary.flagged {
        eprintln!("  {:<16} {} protein(s)", kind.name(), count);
    }
    eprintln!("Report rows: {}", summary.report_rows);
}
