use crate::core::io::report::ConflictRow;
use crate::core::io::source::ProteinRecordSource;
use crate::core::models::record::{ConflictKind, ProteinRecord, RawProteinFields};
use crate::engine::config::AnalysisConfig;
use crate::engine::conflicts::{ConflictEntries, find_conflict_entries};
use crate::engine::error::{EngineError, SkipReason, SkippedRecord};
use crate::engine::merge::merge_conflict_entries;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::residues::annotate_free_residues;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub struct CheckReport {
    /// Every record that could be analysed, annotated with its domains, free residues and
    /// conflicts, in source order.
    pub records: Vec<ProteinRecord>,
    /// One result set per detector, in merge order.
    pub detector_results: Vec<ConflictEntries>,
    /// The merged, deduplicated conflict report.
    pub rows: Vec<ConflictRow>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub analysed: usize,
    pub skipped: usize,
    pub flagged: Vec<(ConflictKind, usize)>,
    pub report_rows: usize,
}

impl CheckReport {
    pub fn summary(&self) -> CheckSummary {
        CheckSummary {
            analysed: self.records.len(),
            skipped: self.skipped.len(),
            flagged: self
                .detector_results
                .iter()
                .map(|entries| (entries.kind, entries.len()))
                .collect(),
            report_rows: self.rows.len(),
        }
    }

    pub fn entries(&self, kind: ConflictKind) -> Option<&ConflictEntries> {
        self.detector_results.iter().find(|entries| entries.kind == kind)
    }
}

/// Runs the full analysis over every row `source` yields.
///
/// Rows that cannot be converted are skipped and reported in [`CheckReport::skipped`],
/// unless [`AnalysisConfig::fail_fast`] is set.
#[instrument(skip_all, name = "check_workflow")]
pub fn run(
    source: &mut impl ProteinRecordSource,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<CheckReport, EngineError> {
    // === Phase 1: Parse records, topology and free residues ===
    let (mut records, skipped) = load_records(source, config, reporter)?;

    // === Phase 2: Run the four detectors ===
    let detector_results = detect_conflicts(&mut records, config, reporter);

    // === Phase 3: Merge into one report ===
    reporter.report(Progress::PhaseStart {
        name: "Merging Report",
    });
    let rows = merge_conflict_entries(&records, &detector_results);
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::Message(format!(
        "{} protein(s) in the conflict report, {} row(s) skipped",
        rows.len(),
        skipped.len()
    )));
    info!(
        analysed = records.len(),
        skipped = skipped.len(),
        report_rows = rows.len(),
        "Check complete."
    );
    Ok(CheckReport {
        records,
        detector_results,
        rows,
        skipped,
    })
}

fn load_records(
    source: &mut impl ProteinRecordSource,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<(Vec<ProteinRecord>, Vec<SkippedRecord>), EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Parsing Records",
    });
    if let Some(total) = source.size_hint() {
        reporter.report(Progress::TaskStart {
            total_steps: total as u64,
        });
    }

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut row = 0;

    while let Some(next) = source.next_record() {
        row += 1;
        reporter.report(Progress::TaskIncrement);

        let (accession, outcome) = match next {
            Ok(raw) => (Some(raw.accession.clone()), prepare_record(raw, config)),
            Err(e) => (None, Err(SkipReason::from(e))),
        };

        match outcome {
            Ok(record) => records.push(record),
            Err(reason) if config.fail_fast => {
                return Err(EngineError::RecordRejected { row, reason });
            }
            Err(reason) => {
                warn!(
                    row,
                    accession = accession.as_deref().unwrap_or("<unknown>"),
                    "Skipping record: {}",
                    reason
                );
                reporter.report(Progress::RecordSkipped { row });
                skipped.push(SkippedRecord {
                    row,
                    accession,
                    reason,
                });
            }
        }
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(
        "Parsed {} record(s), skipped {}.",
        records.len(),
        skipped.len()
    );
    Ok((records, skipped))
}

fn prepare_record(
    raw: RawProteinFields,
    config: &AnalysisConfig,
) -> Result<ProteinRecord, SkipReason> {
    let (mut record, parsed) = ProteinRecord::from_raw(raw)?;

    if config.warn_on_length_overflow && parsed.exceeds_length(record.length) {
        warn!(
            accession = %record.accession,
            length = record.length,
            topology = %record.topology,
            "Topology segments extend past the declared sequence length."
        );
    }
    if let Some(token) = &parsed.dangling_token {
        debug!(
            accession = %record.accession,
            token = %token,
            "Topology string ends with an unterminated token."
        );
    }

    annotate_free_residues(&mut record)?;
    Ok(record)
}

fn detect_conflicts(
    records: &mut [ProteinRecord],
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Vec<ConflictEntries> {
    reporter.report(Progress::PhaseStart {
        name: "Detecting Conflicts",
    });
    reporter.report(Progress::TaskStart {
        total_steps: ConflictKind::ALL.len() as u64,
    });

    let results = ConflictKind::ALL
        .iter()
        .map(|&kind| {
            let entries = find_conflict_entries(&mut *records, kind, config.bond_endpoint_check);
            info!("{} detector flagged {} record(s).", kind, entries.len());
            reporter.report(Progress::TaskIncrement);
            entries
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::source::{CsvOptions, CsvSource, VecSource};
    use crate::engine::config::{AnalysisConfigBuilder, BondEndpointCheck};
    use std::sync::{Arc, Mutex};

    fn raw(accession: &str, topology: &str) -> RawProteinFields {
        RawProteinFields {
            accession: accession.into(),
            entry_name: format!("{}_HUMAN", accession),
            description: format!("Protein {}", accession),
            disulfide_bonds: "[]".into(),
            glycosylation: "[]".into(),
            sequons: "[]".into(),
            cysteine_positions: "[]".into(),
            length: "100".into(),
            topology: topology.into(),
        }
    }

    fn run_rows(rows: Vec<RawProteinFields>, config: &AnalysisConfig) -> CheckReport {
        let mut source = VecSource::new(rows);
        run(&mut source, config, &ProgressReporter::new()).unwrap()
    }

    #[test]
    fn clean_dataset_produces_an_empty_report() {
        let mut clean = raw("P1", "o60-60i");
        clean.glycosylation = "['20']".into();
        clean.sequons = "['20']".into();
        clean.disulfide_bonds = "['10 30']".into();
        clean.cysteine_positions = "['9', '29']".into();

        let report = run_rows(vec![clean], &AnalysisConfig::default());
        assert_eq!(report.records.len(), 1);
        assert!(report.rows.is_empty());
        assert!(report.skipped.is_empty());
        assert!(!report.records[0].has_conflicts());
    }

    #[test]
    fn conflicts_from_different_detectors_merge_in_detector_order() {
        let mut glyco_only = raw("GLY", "o40-40i");
        glyco_only.glycosylation = "['70']".into();
        let mut sequon_only = raw("SEQ", "o40-40i");
        sequon_only.sequons = "['80']".into();
        let mut bond_only = raw("DSB", "o40-40i");
        bond_only.disulfide_bonds = "['50 90']".into();
        bond_only.cysteine_positions = "['49', '89']".into();

        let report = run_rows(
            vec![glyco_only, sequon_only, bond_only],
            &AnalysisConfig::default(),
        );
        let order: Vec<&str> = report.rows.iter().map(|r| r.entry.as_str()).collect();
        assert_eq!(order, vec!["SEQ", "GLY", "DSB"]);
        assert_eq!(
            report.rows[2].disulfide_bond_conflicts.as_deref(),
            Some(r#"["50,90"]"#)
        );
        assert!(report.rows[2].cysteine_conflicts.is_none());
        assert_eq!(
            report.summary().flagged,
            vec![
                (ConflictKind::Sequon, 1),
                (ConflictKind::Cysteine, 0),
                (ConflictKind::Glycosylation, 1),
                (ConflictKind::DisulfideBond, 1),
            ]
        );
    }

    #[test]
    fn malformed_records_are_skipped_without_aborting() {
        let mut broken = raw("BAD", "o40-40i");
        broken.glycosylation = "['12', 'x']".into();
        let mut flagged = raw("OK", "o40-40i");
        flagged.glycosylation = "['70']".into();

        let report = run_rows(vec![broken, flagged], &AnalysisConfig::default());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].entry, "OK");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 1);
        assert_eq!(report.skipped[0].accession.as_deref(), Some("BAD"));
        assert!(matches!(report.skipped[0].reason, SkipReason::Record(_)));
    }

    #[test]
    fn fail_fast_aborts_on_the_first_malformed_record() {
        let mut broken = raw("BAD", "o40-40i");
        broken.length = "long".into();
        let config = AnalysisConfigBuilder::new().fail_fast(true).build();
        let mut source = VecSource::new(vec![raw("OK", "o"), broken]);
        let result = run(&mut source, &config, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::RecordRejected { row: 2, .. })
        ));
    }

    #[test]
    fn bond_endpoint_check_is_taken_from_the_config() {
        let mut record = raw("P1", "o10-20o30-");
        record.disulfide_bonds = "['5 15']".into();

        let observed = run_rows(vec![record.clone()], &AnalysisConfig::default());
        assert!(observed.rows.is_empty());

        let strict = AnalysisConfigBuilder::new()
            .bond_endpoint_check(BondEndpointCheck::BothEndpoints)
            .build();
        let report = run_rows(vec![record], &strict);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(
            report.rows[0].disulfide_bond_conflicts.as_deref(),
            Some(r#"["5,15"]"#)
        );
    }

    #[test]
    fn csv_row_errors_are_skipped_with_their_row_number() {
        let data = "Entry,Entry name,Protein names,Disulfide bond,Glycosylation,Length,topology,Cysteine positions,Sequon list\n\
                    P1,A,B,[],\"['70']\",100,o40-40i,[],[]\n\
                    P2,A,B,[],[],100,o,[],[],surplus\n";
        let mut source = CsvSource::from_reader(data.as_bytes(), CsvOptions::default()).unwrap();
        let report = run(&mut source, &AnalysisConfig::default(), &ProgressReporter::new()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 2);
        assert!(report.skipped[0].accession.is_none());
        assert_eq!(report.rows[0].glycosylation_conflicts.as_deref(), Some(r#"["70"]"#));
    }

    #[test]
    fn skipped_rows_are_announced_to_the_reporter() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let sink = rows.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::RecordSkipped { row } = event {
                sink.lock().unwrap().push(row);
            }
        }));
        let mut broken = raw("BAD", "o");
        broken.topology = "o1x-".into();
        let mut source = VecSource::new(vec![raw("OK", "o"), broken]);
        let report = run(&mut source, &AnalysisConfig::default(), &reporter).unwrap();
        assert_eq!(*rows.lock().unwrap(), vec![2]);
        assert!(matches!(report.skipped[0].reason, SkipReason::Record(_)));
    }

    #[test]
    fn run_finishes_with_a_summary_message() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = messages.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::Message(text) = event {
                sink.lock().unwrap().push(text);
            }
        }));
        let mut flagged = raw("GLY", "o40-40i");
        flagged.glycosylation = "['70']".into();
        let mut broken = raw("BAD", "o40-40i");
        broken.length = "0".into();
        let mut source = VecSource::new(vec![flagged, broken, raw("OK", "o")]);
        run(&mut source, &AnalysisConfig::default(), &reporter).unwrap();
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["1 protein(s) in the conflict report, 1 row(s) skipped".to_string()]
        );
    }

    #[test]
    fn progress_events_cover_every_phase() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let sink = phases.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            if let Progress::PhaseStart { name } = event {
                sink.lock().unwrap().push(name);
            }
        }));
        let mut source = VecSource::new(vec![raw("P1", "o")]);
        run(&mut source, &AnalysisConfig::default(), &reporter).unwrap();
        assert_eq!(
            *phases.lock().unwrap(),
            vec!["Parsing Records", "Detecting Conflicts", "Merging Report"]
        );
    }
}
