use serde::Serialize;

use crate::catalog::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".csv") {
        return Some(OutputFormat::Csv);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn render_records(records: &[Record], format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(records),
        OutputFormat::Json => render_json(records),
        OutputFormat::Csv => render_csv(records),
    }
}

pub fn render_text(records: &[Record]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(&format!(
            "{} ({}) :: {} / {} / {}\n",
            r.common_name, r.scientific_name, r.taxa, r.species, r.origin
        ));
    }
    out.into_bytes()
}

pub fn render_json(records: &[Record]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render_csv(records: &[Record]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("id,commonName,scientificName,taxa,species,origin\n");
    for r in records {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            r.id, r.common_name, r.scientific_name, r.taxa, r.species, r.origin
        ));
    }
    out.into_bytes()
}

/// Stats responses are rendered as pretty JSON regardless of the chosen
/// format; CSV has no sensible shape for nested series.
pub fn render_stats<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec_pretty(value).unwrap_or_else(|_| b"{}\n".to_vec())
}
