use itertools::Itertools;

use super::{OriginStatus, Record};

/// One selectable entry in a categorical filter control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }
}

/// Distinct taxa in first-seen record order.
pub fn taxa_options(records: &[Record]) -> Vec<SelectOption> {
    records
        .iter()
        .map(|r| r.taxa.as_str())
        .unique()
        .map(|taxa| SelectOption::new(taxa, taxa))
        .collect()
}

/// One option per record, labelled `common (scientific)` and valued by
/// its species group.
pub fn species_options(records: &[Record]) -> Vec<SelectOption> {
    records
        .iter()
        .map(|r| {
            SelectOption::new(
                r.species.clone(),
                format!("{} ({})", r.common_name, r.scientific_name),
            )
        })
        .collect()
}

pub fn origin_options() -> Vec<SelectOption> {
    OriginStatus::ALL
        .iter()
        .map(|origin| SelectOption::new(origin.label(), origin.label()))
        .collect()
}
