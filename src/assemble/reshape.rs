use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::table::{Measure, YearRange};
use crate::error::Result;
use crate::load::{
    utils::{is_present, parse_measure},
    WideTable,
};

/// A single (entity, year) value of one measure.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub code: String,
    pub year: i32,
    pub value: f64,
}

/// Long-form output of [`reshape`]: one observation per (entity, year), for one measure.
#[derive(Debug, Clone)]
pub struct LongFragment {
    measure: Measure,
    observations: Vec<Observation>,
    by_key: HashMap<(String, i32), usize>,
    by_code: HashMap<String, Vec<usize>>,
}

impl LongFragment {
    pub fn new(measure: Measure) -> Self {
        Self {
            measure,
            observations: Vec::new(),
            by_key: HashMap::new(),
            by_code: HashMap::new(),
        }
    }

    /// Append an observation. Returns false (and keeps the first) if the key exists.
    pub fn push(&mut self, obs: Observation) -> bool {
        let key = (obs.code.clone(), obs.year);
        if self.by_key.contains_key(&key) {
            return false;
        }
        let idx = self.observations.len();
        self.by_key.insert(key, idx);
        self.by_code.entry(obs.code.clone()).or_default().push(idx);
        self.observations.push(obs);
        true
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn get(&self, code: &str, year: i32) -> Option<f64> {
        self.by_key
            .get(&(code.to_string(), year))
            .map(|&i| self.observations[i].value)
    }

    /// All observations of `code`, in insertion (year) order.
    pub fn for_code<'a>(&'a self, code: &str) -> impl Iterator<Item = &'a Observation> + 'a {
        self.by_code
            .get(code)
            .into_iter()
            .flatten()
            .map(move |&i| &self.observations[i])
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Melt a wide series table into one observation per (identifier, year).
///
/// Only `id_column` and the columns named after each year of `years` are read;
/// everything else in the table is ignored. A row with a blank identifier or a
/// missing value in any of those year columns is dropped whole.
#[tracing::instrument(level = "info", skip(wide, years, measure), fields(table = %wide.name, measure = %measure))]
pub fn reshape(
    wide: &WideTable,
    id_column: &str,
    years: YearRange,
    measure: Measure,
) -> Result<LongFragment> {
    let id_idx = wide.column_index(id_column)?;
    let year_cols = years
        .iter()
        .map(|year| -> Result<(i32, usize)> { Ok((year, wide.column_index(&year.to_string())?)) })
        .collect::<Result<Vec<_>>>()?;

    let mut fragment = LongFragment::new(measure);
    let mut incomplete = 0usize;
    let mut duplicates = 0usize;

    for row in &wide.rows {
        let code = WideTable::cell(row, id_idx);
        if !is_present(code) {
            incomplete += 1;
            continue;
        }

        let values: Option<Vec<f64>> = year_cols
            .iter()
            .map(|&(_, idx)| parse_measure(WideTable::cell(row, idx)))
            .collect();
        let Some(values) = values else {
            debug!(code, "dropping entity with missing years");
            incomplete += 1;
            continue;
        };

        if fragment.for_code(code).next().is_some() {
            warn!(code, "duplicate entity row, keeping first");
            duplicates += 1;
            continue;
        }

        for (&(year, _), value) in year_cols.iter().zip(values) {
            fragment.push(Observation {
                code: code.to_string(),
                year,
                value,
            });
        }
    }

    info!(
        entities = wide.rows.len() - incomplete - duplicates,
        incomplete,
        duplicates,
        observations = fragment.len(),
        "reshaped"
    );
    Ok(fragment)
}
