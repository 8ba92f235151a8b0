use crate::core::models::position::{BondPair, MalformedPositionError, Position};
use crate::core::models::record::ProteinRecord;
use tracing::trace;

/// Offset between the indexing base of the cysteine position source and every other
/// position source.
pub const CYSTEINE_POSITION_OFFSET: u32 = 1;

/// Shifts each cysteine position by [`CYSTEINE_POSITION_OFFSET`], preserving order.
pub fn correct_offsets(positions: &[Position]) -> Result<Vec<Position>, MalformedPositionError> {
    positions
        .iter()
        .map(|p| p.offset_by(CYSTEINE_POSITION_OFFSET))
        .collect()
}

/// Sequons without a matching glycosylation site, in candidate order.
pub fn free_sequons(sequons: &[Position], glycosylation_sites: &[Position]) -> Vec<Position> {
    sequons
        .iter()
        .copied()
        .filter(|sequon| !glycosylation_sites.contains(sequon))
        .collect()
}

/// Cysteines that take part in no disulfide bond, in candidate order.
pub fn free_cysteines(cysteines: &[Position], bonds: &[BondPair]) -> Vec<Position> {
    cysteines
        .iter()
        .copied()
        .filter(|&cysteine| !bonds.iter().any(|bond| bond.involves(cysteine)))
        .collect()
}

/// Fills in the free sequon and free cysteine lists of `record`.
///
/// Cysteine positions are offset-corrected before pairing, exactly once per call.
pub fn annotate_free_residues(record: &mut ProteinRecord) -> Result<(), MalformedPositionError> {
    record.free_sequons = free_sequons(&record.sequons, &record.glycosylation_sites);
    let corrected = correct_offsets(&record.cysteine_positions)?;
    record.free_cysteines = free_cysteines(&corrected, &record.disulfide_bonds);
    trace!(
        accession = %record.accession,
        free_sequons = record.free_sequons.len(),
        free_cysteines = record.free_cysteines.len(),
        "Annotated free residues."
    );
    Ok(())
}
