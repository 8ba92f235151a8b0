//! # topoconflict
//!
//! Flags protein annotations that are implausible given a protein's membrane topology:
//! N-glycosylation sequons, free cysteines, glycosylation sites and disulfide bonds whose
//! residues lie outside every non-cytoplasmic (outside-membrane) segment.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless models (`Position`, `BondPair`, `Segment`,
//!   `ProteinRecord`), the topology-notation parser, record sources and report shapes.
//!
//! - **[`engine`]: The Analysis Stages.** Cysteine offset correction, free-residue filters,
//!   the four domain conflict detectors and the accession-keyed report merger.
//!
//! - **[`workflows`]: The Public API.** Runs the complete pipeline over a record source and
//!   returns the annotated records together with the merged conflict report.

pub mod core;
pub mod engine;
pub mod workflows;
