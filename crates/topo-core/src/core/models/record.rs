use super::position::{BondPair, BondPairError, MalformedPositionError, Position};
use super::segment::MembraneDomains;
use crate::core::io::notation::{self, NotationError};
use crate::core::io::source::columns;
use crate::core::topology::parser::{ParsedTopology, TopologyError, parse_topology};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One input row as delivered by a record source: every field still in its textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProteinFields {
    #[serde(rename = "Entry")]
    pub accession: String,
    #[serde(rename = "Entry name")]
    pub entry_name: String,
    #[serde(rename = "Protein names")]
    pub description: String,
    #[serde(rename = "Disulfide bond")]
    pub disulfide_bonds: String,
    #[serde(rename = "Glycosylation")]
    pub glycosylation: String,
    #[serde(rename = "Sequon list")]
    pub sequons: String,
    #[serde(rename = "Cysteine positions")]
    pub cysteine_positions: String,
    #[serde(rename = "Length")]
    pub length: String,
    #[serde(rename = "topology")]
    pub topology: String,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Field '{field}': {source}")]
    Notation {
        field: &'static str,
        #[source]
        source: NotationError,
    },
    #[error("Field '{field}': {source}")]
    Position {
        field: &'static str,
        #[source]
        source: MalformedPositionError,
    },
    #[error("Field '{}': {source}", columns::DISULFIDE_BOND)]
    Bond {
        #[source]
        source: BondPairError,
    },
    #[error("Field '{}': invalid sequence length '{value}'", columns::LENGTH)]
    Length { value: String },
    #[error("Field '{}': {source}", columns::TOPOLOGY)]
    Topology {
        #[source]
        source: TopologyError,
    },
}

/// The four annotation kinds checked against membrane topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConflictKind {
    Sequon,
    Cysteine,
    Glycosylation,
    DisulfideBond,
}

impl ConflictKind {
    /// All kinds in the order their results are merged into the final report.
    pub const ALL: [ConflictKind; 4] = [
        ConflictKind::Sequon,
        ConflictKind::Cysteine,
        ConflictKind::Glycosylation,
        ConflictKind::DisulfideBond,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConflictKind::Sequon => "sequon",
            ConflictKind::Cysteine => "cysteine",
            ConflictKind::Glycosylation => "glycosylation",
            ConflictKind::DisulfideBond => "disulfide-bond",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conflict values recorded on a protein, one slot per annotation kind.
///
/// A slot is `None` until the corresponding detector flags at least one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictAnnotations {
    pub sequon: Option<Vec<String>>,
    pub cysteine: Option<Vec<String>>,
    pub glycosylation: Option<Vec<String>>,
    pub disulfide_bond: Option<Vec<String>>,
}

impl ConflictAnnotations {
    pub fn get(&self, kind: ConflictKind) -> Option<&[String]> {
        let slot = match kind {
            ConflictKind::Sequon => &self.sequon,
            ConflictKind::Cysteine => &self.cysteine,
            ConflictKind::Glycosylation => &self.glycosylation,
            ConflictKind::DisulfideBond => &self.disulfide_bond,
        };
        slot.as_deref()
    }

    pub(crate) fn set(&mut self, kind: ConflictKind, values: Vec<String>) {
        let slot = match kind {
            ConflictKind::Sequon => &mut self.sequon,
            ConflictKind::Cysteine => &mut self.cysteine,
            ConflictKind::Glycosylation => &mut self.glycosylation,
            ConflictKind::DisulfideBond => &mut self.disulfide_bond,
        };
        *slot = Some(values);
    }

    pub fn is_empty(&self) -> bool {
        ConflictKind::ALL.iter().all(|&kind| self.get(kind).is_none())
    }
}

/// Verbatim text of the list-valued input fields, echoed unchanged in reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnnotations {
    pub disulfide_bonds: String,
    pub glycosylation: String,
    pub sequons: String,
    pub cysteine_positions: String,
}

/// A protein record with typed annotations and the fields derived by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinRecord {
    pub accession: String,
    pub entry_name: String,
    pub description: String,
    pub length: u32,
    pub topology: String,
    pub raw: RawAnnotations,

    pub disulfide_bonds: Vec<BondPair>,
    pub glycosylation_sites: Vec<Position>,
    pub sequons: Vec<Position>,
    /// Cysteine positions as delivered, before offset correction.
    pub cysteine_positions: Vec<Position>,

    pub domains: MembraneDomains,
    pub free_sequons: Vec<Position>,
    pub free_cysteines: Vec<Position>,
    pub conflicts: ConflictAnnotations,
}

impl ProteinRecord {
    /// Converts a raw row into a typed record and parses its topology.
    ///
    /// Returns the record alongside the parse result so callers can inspect data-quality
    /// details such as segments beyond the declared length.
    pub fn from_raw(raw: RawProteinFields) -> Result<(Self, ParsedTopology), RecordError> {
        let length = parse_length(&raw.length)?;
        let disulfide_bonds = decode_typed(&raw.disulfide_bonds, columns::DISULFIDE_BOND)?
            .iter()
            .map(|pair| pair.parse::<BondPair>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RecordError::Bond { source: e })?;
        let glycosylation_sites = decode_positions(&raw.glycosylation, columns::GLYCOSYLATION)?;
        let sequons = decode_positions(&raw.sequons, columns::SEQUON_LIST)?;
        let cysteine_positions =
            decode_positions(&raw.cysteine_positions, columns::CYSTEINE_POSITIONS)?;

        let parsed = parse_topology(&raw.topology, length)
            .map_err(|e| RecordError::Topology { source: e })?;

        let record = Self {
            accession: raw.accession,
            entry_name: raw.entry_name,
            description: raw.description,
            length,
            topology: raw.topology,
            raw: RawAnnotations {
                disulfide_bonds: raw.disulfide_bonds,
                glycosylation: raw.glycosylation,
                sequons: raw.sequons,
                cysteine_positions: raw.cysteine_positions,
            },
            disulfide_bonds,
            glycosylation_sites,
            sequons,
            cysteine_positions,
            domains: parsed.domains.clone(),
            free_sequons: Vec::new(),
            free_cysteines: Vec::new(),
            conflicts: ConflictAnnotations::default(),
        };
        Ok((record, parsed))
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

fn parse_length(value: &str) -> Result<u32, RecordError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&length| length > 0)
        .ok_or_else(|| RecordError::Length {
            value: value.into(),
        })
}

fn decode_typed(raw: &str, field: &'static str) -> Result<Vec<String>, RecordError> {
    notation::decode_list(raw).map_err(|e| RecordError::Notation { field, source: e })
}

fn decode_positions(raw: &str, field: &'static str) -> Result<Vec<Position>, RecordError> {
    decode_typed(raw, field)?
        .iter()
        .map(|token| Position::from_str(token))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RecordError::Position { field, source: e })
}
