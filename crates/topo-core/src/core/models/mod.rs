//! Data models for protein annotation records.
//!
//! - [`position`] - Residue positions and disulfide bond pairs, parsed once at the boundary
//! - [`segment`] - Membrane topology segments and per-protein domain lists
//! - [`record`] - Raw and typed protein records, including per-kind conflict annotations

pub mod position;
pub mod record;
pub mod segment;
