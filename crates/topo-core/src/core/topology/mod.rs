//! # Topology Module
//!
//! Parses the compact membrane-topology notation attached to each protein record into
//! ordered outside- and inside-membrane segments.
//!
//! ## Notation
//!
//! The notation is a ticker tape over `0-9`, `o`, `i` and `-`. Digits accumulate into a
//! numeric token, `o`/`i` open a segment on the outside/inside of the membrane starting at
//! the accumulated token, and `-` closes the current segment at the accumulated token. A
//! marker in final position closes its segment at the declared sequence length.
//!
//! ```ignore
//! use topoconflict::core::topology::parser::parse_topology;
//!
//! let parsed = parse_topology("i10-20o30-40i", 100)?;
//! assert_eq!(parsed.domains.outside.len(), 1);
//! ```

pub mod parser;
