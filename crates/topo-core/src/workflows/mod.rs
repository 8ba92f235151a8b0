//! # Workflows Module
//!
//! High-level entry points that tie the [`crate::core`] parsers and the [`crate::engine`]
//! stages into complete analyses.
//!
//! - **Conflict Check** ([`check`]) - Reads every row from a record source, parses topology
//!   and annotations, filters free residues, runs the four conflict detectors and merges
//!   their results into one report. Unusable rows are skipped and reported, or abort the
//!   run when fail-fast is configured.

pub mod check;
