use super::conflicts::ConflictEntries;
use crate::core::io::report::ConflictRow;
use crate::core::models::record::ProteinRecord;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

/// Outcome of offering one flagged record to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// First record seen with this accession.
    New,
    /// The same record, already taken by an earlier detector.
    Repeat,
    /// A different record whose accession was already taken. It is left out.
    Collision { kept: usize },
}

fn admit<'a>(taken: &mut HashMap<&'a str, usize>, accession: &'a str, index: usize) -> Admission {
    match taken.entry(accession) {
        Entry::Vacant(slot) => {
            slot.insert(index);
            Admission::New
        }
        Entry::Occupied(slot) if *slot.get() == index => Admission::Repeat,
        Entry::Occupied(slot) => Admission::Collision { kept: *slot.get() },
    }
}

/// Combines the per-detector result sets into one report.
///
/// Entries are taken detector by detector in the order given; a record is appended only
/// if no record with the same accession has been taken yet, so the first detector that
/// flags a protein decides its position in the report. A distinct record that shares an
/// already-taken accession (including a blank one) is dropped with a warning.
pub fn merge_conflict_entries(
    records: &[ProteinRecord],
    detector_results: &[ConflictEntries],
) -> Vec<ConflictRow> {
    let mut taken: HashMap<&str, usize> = HashMap::new();
    let mut rows = Vec::new();

    for entries in detector_results {
        let before = rows.len();
        for &index in &entries.indices {
            let Some(record) = records.get(index) else {
                continue;
            };
            match admit(&mut taken, record.accession.as_str(), index) {
                Admission::New => rows.push(ConflictRow::from_record(record)),
                Admission::Repeat => {}
                Admission::Collision { kept } => warn!(
                    accession = %record.accession,
                    kept_record = kept,
                    dropped_record = index,
                    kind = %entries.kind,
                    "Accession already in the report; dropping a different record that shares it."
                ),
            }
        }
        debug!(
            kind = %entries.kind,
            flagged = entries.len(),
            added = rows.len() - before,
            "Merged detector results."
        );
    }
    rows
}
