//! Provides input/output functionality for protein annotation tables and conflict reports.
//!
//! Record sources deliver raw rows through the [`source::ProteinRecordSource`] trait, the
//! bracketed list notation used by list-valued columns is handled by [`notation`], and
//! [`report`] defines the JSON shapes written back out.

pub mod notation;
pub mod report;
pub mod source;
