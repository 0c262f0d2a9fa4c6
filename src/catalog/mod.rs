pub mod criteria;
pub mod filter;
pub mod options;
pub mod view;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

/// Whether a catalogued species is native to the monitored region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginStatus {
    #[serde(rename = "Native")]
    Native,
    #[serde(rename = "Non-native")]
    NonNative,
}

impl OriginStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Native => "Native",
            Self::NonNative => "Non-native",
        }
    }

    pub const ALL: [OriginStatus; 2] = [OriginStatus::Native, OriginStatus::NonNative];
}

impl fmt::Display for OriginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OriginStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "non-native" | "nonnative" => Ok(Self::NonNative),
            other => Err(format!(
                "invalid origin status '{other}', expected Native or Non-native"
            )),
        }
    }
}

/// A single catalogued species observation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u64,
    pub common_name: String,
    pub scientific_name: String,
    pub taxa: String,
    pub species: String,
    #[serde(rename = "native")]
    pub origin: OriginStatus,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read records file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode records file '{path}': {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid record on line {line} of '{path}': {message}")]
    Csv {
        path: String,
        line: usize,
        message: String,
    },
}

/// The full, unfiltered collection of catalogued entries. Append-only at
/// load time; filtering never mutates it.
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// The built-in demonstration set used when no records file is given.
    pub fn sample() -> Self {
        Self::new(vec![
            Record {
                id: 1,
                common_name: "Eastern Grey Kangaroo".to_string(),
                scientific_name: "Macropus giganteus".to_string(),
                taxa: "Mammals".to_string(),
                species: "Kangaroo".to_string(),
                origin: OriginStatus::Native,
            },
            Record {
                id: 2,
                common_name: "Superb Fairywren".to_string(),
                scientific_name: "Malurus cyaneus".to_string(),
                taxa: "Birds".to_string(),
                species: "Fairywren".to_string(),
                origin: OriginStatus::Native,
            },
            Record {
                id: 3,
                common_name: "Eastern Brown Snake".to_string(),
                scientific_name: "Pseudonaja textilis".to_string(),
                taxa: "Reptiles".to_string(),
                species: "Brown Snake".to_string(),
                origin: OriginStatus::Native,
            },
        ])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub async fn from_json_file(path: &str) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).await.map_err(|e| CatalogError::Read {
            path: path.to_string(),
            source: e,
        })?;
        let records: Vec<Record> =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Decode {
                path: path.to_string(),
                source: e,
            })?;
        Ok(Self::new(records))
    }

    /// Reads `id,commonName,scientificName,taxa,species,origin` rows. A
    /// header row is recognised by its leading `id` cell and skipped.
    pub async fn from_csv_file(path: &str) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).await.map_err(|e| CatalogError::Read {
            path: path.to_string(),
            source: e,
        })?;
        let mut records: Vec<Record> = Vec::new();
        for (idx, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
            if idx == 0 && fields.first().is_some_and(|f| f.eq_ignore_ascii_case("id")) {
                continue;
            }
            let record = parse_csv_record(&fields).map_err(|message| CatalogError::Csv {
                path: path.to_string(),
                line: idx + 1,
                message,
            })?;
            records.push(record);
        }
        Ok(Self::new(records))
    }
}

fn parse_csv_record(fields: &[&str]) -> Result<Record, String> {
    if fields.len() != 6 {
        return Err(format!("expected 6 fields, found {}", fields.len()));
    }
    let id: u64 = fields[0]
        .parse()
        .map_err(|_| format!("invalid id '{}'", fields[0]))?;
    let origin: OriginStatus = fields[5].parse()?;
    Ok(Record {
        id,
        common_name: fields[1].to_string(),
        scientific_name: fields[2].to_string(),
        taxa: fields[3].to_string(),
        species: fields[4].to_string(),
        origin,
    })
}
