use crate::core::io::notation::encode_list;
use crate::core::models::record::{ConflictAnnotations, ConflictKind, ProteinRecord};
use crate::core::models::segment::MembraneDomains;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the merged conflict report.
///
/// Conflict fields hold a JSON-encoded array of strings and are omitted when the protein
/// was never flagged for that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRow {
    #[serde(rename = "Entry")]
    pub entry: String,
    #[serde(rename = "Entry name")]
    pub entry_name: String,
    #[serde(rename = "Protein names")]
    pub protein_names: String,
    #[serde(rename = "Disulfide bond")]
    pub disulfide_bond: String,
    #[serde(
        rename = "Disulfide bond Conflicts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub disulfide_bond_conflicts: Option<String>,
    #[serde(rename = "Glycosylation")]
    pub glycosylation: String,
    #[serde(
        rename = "Glycosylation Conflicts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub glycosylation_conflicts: Option<String>,
    #[serde(rename = "Length")]
    pub length: u32,
    #[serde(rename = "topology")]
    pub topology: String,
    #[serde(rename = "Cysteine positions")]
    pub cysteine_positions: String,
    #[serde(
        rename = "Cysteine Conflicts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cysteine_conflicts: Option<String>,
    #[serde(rename = "Sequon list")]
    pub sequon_list: String,
    #[serde(
        rename = "Sequon Conflicts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sequon_conflicts: Option<String>,
}

impl ConflictRow {
    pub fn from_record(record: &ProteinRecord) -> Self {
        let encoded = |kind| record.conflicts.get(kind).map(|values| encode_list(values));
        Self {
            entry: record.accession.clone(),
            entry_name: record.entry_name.clone(),
            protein_names: record.description.clone(),
            disulfide_bond: record.raw.disulfide_bonds.clone(),
            disulfide_bond_conflicts: encoded(ConflictKind::DisulfideBond),
            glycosylation: record.raw.glycosylation.clone(),
            glycosylation_conflicts: encoded(ConflictKind::Glycosylation),
            length: record.length,
            topology: record.topology.clone(),
            cysteine_positions: record.raw.cysteine_positions.clone(),
            cysteine_conflicts: encoded(ConflictKind::Cysteine),
            sequon_list: record.raw.sequons.clone(),
            sequon_conflicts: encoded(ConflictKind::Sequon),
        }
    }

    pub fn conflicts(&self, kind: ConflictKind) -> Option<&str> {
        match kind {
            ConflictKind::Sequon => self.sequon_conflicts.as_deref(),
            ConflictKind::Cysteine => self.cysteine_conflicts.as_deref(),
            ConflictKind::Glycosylation => self.glycosylation_conflicts.as_deref(),
            ConflictKind::DisulfideBond => self.disulfide_bond_conflicts.as_deref(),
        }
    }
}

/// Per-protein view with every derived field, for inspecting how a record was classified.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRecord<'a> {
    pub accession: &'a str,
    pub entry_name: &'a str,
    pub description: &'a str,
    pub length: u32,
    pub topology: &'a str,
    pub domains: &'a MembraneDomains,
    pub disulfide_bonds: Vec<String>,
    pub glycosylation_sites: Vec<u32>,
    pub sequons: Vec<u32>,
    pub free_sequons: Vec<u32>,
    pub cysteine_positions: Vec<u32>,
    pub free_cysteines: Vec<u32>,
    pub conflicts: &'a ConflictAnnotations,
}

impl<'a> From<&'a ProteinRecord> for AnnotatedRecord<'a> {
    fn from(record: &'a ProteinRecord) -> Self {
        let values = |positions: &[crate::core::models::position::Position]| {
            positions.iter().map(|p| p.value()).collect::<Vec<_>>()
        };
        Self {
            accession: &record.accession,
            entry_name: &record.entry_name,
            description: &record.description,
            length: record.length,
            topology: &record.topology,
            domains: &record.domains,
            disulfide_bonds: record.disulfide_bonds.iter().map(|b| b.to_string()).collect(),
            glycosylation_sites: values(&record.glycosylation_sites),
            sequons: values(&record.sequons),
            free_sequons: values(&record.free_sequons),
            cysteine_positions: values(&record.cysteine_positions),
            free_cysteines: values(&record.free_cysteines),
            conflicts: &record.conflicts,
        }
    }
}

/// Serializes `items` as a single JSON array.
pub fn write_json<T: Serialize>(
    items: &[T],
    writer: &mut impl Write,
    pretty: bool,
) -> Result<(), ReportError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, items)?;
    } else {
        serde_json::to_writer(&mut *writer, items)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_json_to_path<T: Serialize, P: AsRef<Path>>(
    items: &[T],
    path: P,
    pretty: bool,
) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_json(items, &mut writer, pretty)
}
