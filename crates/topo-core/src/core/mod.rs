//! # Core Module
//!
//! Stateless building blocks for membrane-topology conflict analysis.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Positions, bond pairs, topology segments and protein records
//! - **Topology Parsing** ([`topology`]) - The finite-state parser for the compact topology
//!   notation
//! - **Input/Output** ([`io`]) - Record sources, list-notation decoding and report shapes
//!
//! Everything in this module is free of pipeline state: conversions happen once, at the
//! record boundary, and the resulting values are plain data consumed by the [`crate::engine`].

pub mod io;
pub mod models;
pub mod topology;
