use std::collections::HashSet;
use tracing::{info, warn};

use crate::error::Result;
use crate::load::{utils::is_present, WideTable};

/// One metadata row: an entity code and its region, if it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEntry {
    pub code: String,
    /// Aggregates ("World", income groups) carry no region in the metadata file.
    pub region: Option<String>,
}

/// Ordered code → region mapping, the anchor of the join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionLookup {
    entries: Vec<RegionEntry>,
}

impl RegionLookup {
    /// Build from entries, keeping the first occurrence of a repeated code.
    pub fn new(entries: impl IntoIterator<Item = RegionEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for entry in entries {
            if entry.code.is_empty() {
                continue;
            }
            if !seen.insert(entry.code.clone()) {
                warn!(code = %entry.code, "duplicate entity code in region lookup, keeping first");
                continue;
            }
            kept.push(entry);
        }
        Self { entries: kept }
    }

    /// Project the metadata table onto (`id_column`, `region_column`).
    pub fn from_table(table: &WideTable, id_column: &str, region_column: &str) -> Result<Self> {
        let id_idx = table.column_index(id_column)?;
        let region_idx = table.column_index(region_column)?;

        let lookup = Self::new(table.rows.iter().map(|row| {
            let region = WideTable::cell(row, region_idx);
            RegionEntry {
                code: WideTable::cell(row, id_idx).to_string(),
                region: is_present(region).then(|| region.to_string()),
            }
        }));

        info!(
            table = %table.name,
            entities = lookup.len(),
            with_region = lookup.entries.iter().filter(|e| e.region.is_some()).count(),
            "built region lookup"
        );
        Ok(lookup)
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    pub fn region_of(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .and_then(|e| e.region.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
