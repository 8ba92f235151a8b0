//! # Engine Module
//!
//! The analysis engine: the stages that run after records have been parsed, and the
//! configuration, error and progress types that go with them.
//!
//! ## Architecture
//!
//! - **Free Residues** ([`residues`]) - Cysteine offset correction and the free sequon / free
//!   cysteine filters
//! - **Conflict Detection** ([`conflicts`]) - The position-versus-domain test, run once per
//!   annotation kind
//! - **Report Merging** ([`merge`]) - Accession-keyed deduplication of the four detector
//!   results into one report
//! - **Configuration** ([`config`]) - Analysis options and their builder
//! - **Error Handling** ([`error`]) - Engine errors and per-record skip diagnostics
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//!
//! Every detector reads state written by the parsing and filtering stages and writes only
//! its own conflict slot on each record, so the four detectors are independent of one
//! another.

pub mod config;
pub mod conflicts;
pub mod error;
pub mod merge;
pub mod progress;
pub mod residues;
