use crate::core::models::record::RawProteinFields;
use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Column headers of the source table.
pub mod columns {
    pub const ENTRY: &str = "Entry";
    pub const ENTRY_NAME: &str = "Entry name";
    pub const PROTEIN_NAMES: &str = "Protein names";
    pub const DISULFIDE_BOND: &str = "Disulfide bond";
    pub const GLYCOSYLATION: &str = "Glycosylation";
    pub const SEQUON_LIST: &str = "Sequon list";
    pub const CYSTEINE_POSITIONS: &str = "Cysteine positions";
    pub const LENGTH: &str = "Length";
    pub const TOPOLOGY: &str = "topology";

    pub const REQUIRED: [&str; 9] = [
        ENTRY,
        ENTRY_NAME,
        PROTEIN_NAMES,
        DISULFIDE_BOND,
        GLYCOSYLATION,
        SEQUON_LIST,
        CYSTEINE_POSITIONS,
        LENGTH,
        TOPOLOGY,
    ];
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    #[error("Source table is missing required column '{column}'")]
    MissingColumn { column: &'static str },
}

/// Yields raw protein rows, one at a time, with every field already split out by name.
///
/// A row-level error is returned in place of that row; iteration may continue afterwards.
pub trait ProteinRecordSource {
    fn next_record(&mut self) -> Option<Result<RawProteinFields, SourceError>>;

    /// Number of rows still to come, when the source knows it up front.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// An in-memory source over already materialized rows.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    rows: VecDeque<RawProteinFields>,
}

impl VecSource {
    pub fn new(rows: Vec<RawProteinFields>) -> Self {
        Self { rows: rows.into() }
    }
}

impl ProteinRecordSource for VecSource {
    fn next_record(&mut self) -> Option<Result<RawProteinFields, SourceError>> {
        self.rows.pop_front().map(Ok)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.rows.len())
    }
}

/// Options for reading a delimited source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Reads rows from a delimited table whose header carries the columns in [`columns`].
pub struct CsvSource<R: Read> {
    rows: csv::DeserializeRecordsIntoIter<R, RawProteinFields>,
}

impl<R: Read> CsvSource<R> {
    pub fn from_reader(reader: R, options: CsvOptions) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?;
        for column in columns::REQUIRED {
            if !headers.iter().any(|header| header == column) {
                return Err(SourceError::MissingColumn { column });
            }
        }

        Ok(Self {
            rows: reader.into_deserialize(),
        })
    }
}

impl CsvSource<File> {
    pub fn from_path<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SourceError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_reader(file, options)
    }
}

impl<R: Read> ProteinRecordSource for CsvSource<R> {
    fn next_record(&mut self) -> Option<Result<RawProteinFields, SourceError>> {
        self.rows.next().map(|row| row.map_err(SourceError::from))
    }
}
