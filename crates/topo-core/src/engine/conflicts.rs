use super::config::BondEndpointCheck;
use crate::core::models::position::{BondPair, Position};
use crate::core::models::record::{ConflictKind, ProteinRecord};
use crate::core::models::segment::Segment;
use tracing::{debug, instrument};

/// Records flagged by one detector, as indices into the analysed record slice, in
/// dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntries {
    pub kind: ConflictKind,
    pub indices: Vec<usize>,
}

impl ConflictEntries {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[inline]
fn in_outside_domain(position: Position, outside: &[Segment]) -> bool {
    outside.iter().any(|segment| segment.contains(position))
}

/// Positions that fall within no outside-membrane segment, stringified in input order.
pub fn find_conflicts(positions: &[Position], outside: &[Segment]) -> Vec<String> {
    positions
        .iter()
        .filter(|&&position| !in_outside_domain(position, outside))
        .map(|position| position.to_string())
        .collect()
}

/// Whether both endpoints of `bond` pass the outside-domain test.
///
/// Each endpoint is evaluated independently against every segment, left first.
pub fn bond_in_domain(bond: &BondPair, outside: &[Segment], check: BondEndpointCheck) -> bool {
    let left = bond.left.value();
    let right = bond.right.value();
    let left_in = outside.iter().any(|s| s.start <= left && left <= s.end);
    let right_in = match check {
        BondEndpointCheck::AsObserved => outside.iter().any(|s| right >= s.start && left <= s.end),
        BondEndpointCheck::BothEndpoints => {
            outside.iter().any(|s| s.start <= right && right <= s.end)
        }
    };
    left_in && right_in
}

/// Bonds that are not fully inside the outside domain, labelled `"<left>,<right>"`.
pub fn find_bond_conflicts(
    bonds: &[BondPair],
    outside: &[Segment],
    check: BondEndpointCheck,
) -> Vec<String> {
    if bonds.is_empty() {
        return Vec::new();
    }
    bonds
        .iter()
        .filter(|bond| !bond_in_domain(bond, outside, check))
        .map(BondPair::conflict_label)
        .collect()
}

fn conflicts_for(
    record: &ProteinRecord,
    kind: ConflictKind,
    check: BondEndpointCheck,
) -> Vec<String> {
    let outside = &record.domains.outside;
    match kind {
        ConflictKind::Sequon => find_conflicts(&record.free_sequons, outside),
        ConflictKind::Cysteine => find_conflicts(&record.free_cysteines, outside),
        ConflictKind::Glycosylation => find_conflicts(&record.glycosylation_sites, outside),
        ConflictKind::DisulfideBond => find_bond_conflicts(&record.disulfide_bonds, outside, check),
    }
}

/// Runs one detector over every record.
///
/// Records with at least one conflict get the conflict values stored on them and are
/// collected in the result. No record is removed from `records`.
#[instrument(skip_all, fields(kind = %kind))]
pub fn find_conflict_entries(
    records: &mut [ProteinRecord],
    kind: ConflictKind,
    check: BondEndpointCheck,
) -> ConflictEntries {
    let mut indices = Vec::new();
    for (index, record) in records.iter_mut().enumerate() {
        let conflicts = conflicts_for(record, kind, check);
        if conflicts.is_empty() {
            continue;
        }
        debug!(
            accession = %record.accession,
            count = conflicts.len(),
            "Flagged {} conflict(s): {:?}",
            kind,
            conflicts
        );
        record.conflicts.set(kind, conflicts);
        indices.push(index);
    }
    debug!(flagged = indices.len(), "Detector finished.");
    ConflictEntries { kind, indices }
}

pub fn find_sequon_conflict_entries(records: &mut [ProteinRecord]) -> ConflictEntries {
    find_conflict_entries(records, ConflictKind::Sequon, BondEndpointCheck::default())
}

pub fn find_cysteine_conflict_entries(records: &mut [ProteinRecord]) -> ConflictEntries {
    find_conflict_entries(records, ConflictKind::Cysteine, BondEndpointCheck::default())
}

pub fn find_glycosylation_conflict_entries(records: &mut [ProteinRecord]) -> ConflictEntries {
    find_conflict_entries(records, ConflictKind::Glycosylation, BondEndpointCheck::default())
}

pub fn find_disulfide_conflict_entries(
    records: &mut [ProteinRecord],
    check: BondEndpointCheck,
) -> ConflictEntries {
    find_conflict_entries(records, ConflictKind::DisulfideBond, check)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::RawProteinFields;
    use crate::engine::residues::annotate_free_residues;

    fn positions(values: &[u32]) -> Vec<Position> {
        values.iter().copied().map(Position::new).collect()
    }

    fn bond(left: u32, right: u32) -> BondPair {
        BondPair::new(Position::new(left), Position::new(right))
    }

    fn two_segments() -> Vec<Segment> {
        vec![Segment::new(0, 10), Segment::new(20, 30)]
    }

    fn record(
        accession: &str,
        bonds: &str,
        glyco: &str,
        sequons: &str,
        cys: &str,
    ) -> ProteinRecord {
        let raw = RawProteinFields {
            accession: accession.into(),
            entry_name: accession.into(),
            description: String::new(),
            disulfide_bonds: bonds.into(),
            glycosylation: glyco.into(),
            sequons: sequons.into(),
            cysteine_positions: cys.into(),
            length: "40".into(),
            topology: "o10-20o30-".into(),
        };
        let (mut record, _) = ProteinRecord::from_raw(raw).unwrap();
        annotate_free_residues(&mut record).unwrap();
        record
    }

    #[test]
    fn find_conflicts_flags_positions_outside_every_segment() {
        assert_eq!(find_conflicts(&positions(&[5, 15, 25]), &two_segments()), vec!["15"]);
    }

    #[test]
    fn find_conflicts_treats_segment_bounds_as_inclusive() {
        assert!(find_conflicts(&positions(&[0, 10, 20, 30]), &two_segments()).is_empty());
        assert_eq!(
            find_conflicts(&positions(&[11, 31]), &two_segments()),
            vec!["11", "31"]
        );
    }

    #[test]
    fn find_conflicts_flags_everything_without_outside_segments() {
        assert_eq!(find_conflicts(&positions(&[1, 2]), &[]), vec!["1", "2"]);
    }

    #[test]
    fn bond_spanning_two_outside_segments_is_in_domain() {
        let segments = two_segments();
        for check in [BondEndpointCheck::AsObserved, BondEndpointCheck::BothEndpoints] {
            assert!(bond_in_domain(&bond(5, 25), &segments, check));
            assert!(find_bond_conflicts(&[bond(5, 25)], &segments, check).is_empty());
        }
    }

    #[test]
    fn as_observed_check_tests_the_right_endpoint_against_the_left_position() {
        let segments = two_segments();
        assert!(bond_in_domain(&bond(5, 15), &segments, BondEndpointCheck::AsObserved));
        assert!(!bond_in_domain(&bond(5, 15), &segments, BondEndpointCheck::BothEndpoints));
        assert_eq!(
            find_bond_conflicts(&[bond(5, 15)], &segments, BondEndpointCheck::BothEndpoints),
            vec!["5,15"]
        );
    }

    #[test]
    fn bond_with_left_endpoint_outside_is_a_conflict_under_both_checks() {
        let segments = two_segments();
        for check in [BondEndpointCheck::AsObserved, BondEndpointCheck::BothEndpoints] {
            assert_eq!(
                find_bond_conflicts(&[bond(15, 25), bond(2, 8)], &segments, check),
                vec!["15,25"]
            );
        }
    }

    #[test]
    fn as_observed_check_rejects_a_right_endpoint_before_every_segment_start() {
        let segments = vec![Segment::new(20, 30)];
        assert!(!bond_in_domain(&bond(25, 5), &segments, BondEndpointCheck::AsObserved));
    }

    #[test]
    fn no_bonds_means_no_bond_conflicts() {
        assert!(find_bond_conflicts(&[], &[], BondEndpointCheck::AsObserved).is_empty());
    }

    #[test]
    fn detectors_store_conflicts_and_collect_flagged_records_only() {
        let mut records = vec![
            record("A", "[]", "['15']", "[]", "[]"),
            record("B", "[]", "['5']", "[]", "[]"),
            record("C", "[]", "['12', '35']", "[]", "[]"),
        ];
        let entries = find_glycosylation_conflict_entries(&mut records);
        assert_eq!(entries.kind, ConflictKind::Glycosylation);
        assert_eq!(entries.indices, vec![0, 2]);
        assert_eq!(
            records[0].conflicts.get(ConflictKind::Glycosylation),
            Some(&["15".to_string()][..])
        );
        assert_eq!(records[1].conflicts.get(ConflictKind::Glycosylation), None);
        assert_eq!(
            records[2].conflicts.get(ConflictKind::Glycosylation),
            Some(&["12".to_string(), "35".to_string()][..])
        );
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn sequon_detector_only_tests_free_sequons() {
        // Sequon 15 is glycosylated, so only the glycosylation detector reports it.
        let mut records = vec![record("A", "[]", "['15']", "['15', '16']", "[]")];
        let entries = find_sequon_conflict_entries(&mut records);
        assert_eq!(entries.indices, vec![0]);
        assert_eq!(
            records[0].conflicts.get(ConflictKind::Sequon),
            Some(&["16".to_string()][..])
        );
    }

    #[test]
    fn cysteine_detector_tests_corrected_unbonded_cysteines() {
        // Raw 14 and 4 become 15 and 5; 5 is bonded.
        let mut records = vec![record("A", "['5 25']", "[]", "[]", "['14', '4']")];
        let entries = find_cysteine_conflict_entries(&mut records);
        assert_eq!(entries.indices, vec![0]);
        assert_eq!(
            records[0].conflicts.get(ConflictKind::Cysteine),
            Some(&["15".to_string()][..])
        );
    }

    #[test]
    fn disulfide_detector_skips_records_without_bonds() {
        let mut records = vec![
            record("A", "[]", "[]", "[]", "[]"),
            record("B", "['15 35']", "[]", "[]", "[]"),
        ];
        let entries = find_disulfide_conflict_entries(&mut records, BondEndpointCheck::AsObserved);
        assert_eq!(entries.indices, vec![1]);
        assert_eq!(
            records[1].conflicts.get(ConflictKind::DisulfideBond),
            Some(&["15,35".to_string()][..])
        );
        assert_eq!(records[0].conflicts.get(ConflictKind::DisulfideBond), None);
    }
}
