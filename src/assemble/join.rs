use tracing::{debug, info};

use super::lookup::RegionLookup;
use super::reshape::LongFragment;
use super::table::{EntityRecord, LongTable, Measure};

/// A joined row before the final completeness pass; any field may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PartialRecord {
    pub code: String,
    pub year: Option<i32>,
    pub region: Option<String>,
    pub population: Option<f64>,
    pub fertility_rate: Option<f64>,
    pub life_expectancy: Option<f64>,
}

impl PartialRecord {
    fn set(&mut self, measure: Measure, value: Option<f64>) {
        match measure {
            Measure::Population => self.population = value,
            Measure::FertilityRate => self.fertility_rate = value,
            Measure::LifeExpectancy => self.life_expectancy = value,
        }
    }

    fn complete(self) -> Option<EntityRecord> {
        Some(EntityRecord {
            code: self.code,
            year: self.year?,
            region: self.region?,
            population: self.population?,
            fertility_rate: self.fertility_rate?,
            life_expectancy: self.life_expectancy?,
        })
    }
}

/// Left join of the anchor fragment onto the lookup, by identifier.
///
/// Every lookup entry survives; entities with no observations get a single
/// row with no year, which the completeness pass removes later.
pub(crate) fn anchor(lookup: &RegionLookup, fragment: &LongFragment) -> Vec<PartialRecord> {
    let mut rows = Vec::with_capacity(fragment.len());
    for entry in lookup.entries() {
        let base = PartialRecord {
            code: entry.code.clone(),
            year: None,
            region: entry.region.clone(),
            population: None,
            fertility_rate: None,
            life_expectancy: None,
        };

        let mut matched = false;
        for obs in fragment.for_code(&entry.code) {
            let mut row = base.clone();
            row.year = Some(obs.year);
            row.set(fragment.measure(), Some(obs.value));
            rows.push(row);
            matched = true;
        }
        if !matched {
            rows.push(base);
        }
    }
    rows
}

/// Left join of `fragment` onto `rows`, by (identifier, year).
pub(crate) fn join_measure(mut rows: Vec<PartialRecord>, fragment: &LongFragment) -> Vec<PartialRecord> {
    let measure = fragment.measure();
    for row in rows.iter_mut() {
        let value = row.year.and_then(|year| fragment.get(&row.code, year));
        row.set(measure, value);
    }
    rows
}

pub(crate) fn drop_incomplete(rows: Vec<PartialRecord>) -> LongTable {
    let total = rows.len();
    let records: Vec<EntityRecord> = rows.into_iter().filter_map(PartialRecord::complete).collect();
    debug!(dropped = total - records.len(), "removed incomplete rows");
    LongTable::new(records)
}

/// Join the lookup and the three series into the long-form table.
///
/// Population anchors the rows (left join on the lookup), life expectancy and
/// fertility are left-joined on (identifier, year), and any row missing a field
/// is then discarded. Empty inputs give an empty table.
#[tracing::instrument(level = "info", skip_all)]
pub fn assemble(
    lookup: &RegionLookup,
    population: &LongFragment,
    fertility: &LongFragment,
    life_expectancy: &LongFragment,
) -> LongTable {
    let rows = anchor(lookup, population);
    let rows = join_measure(rows, life_expectancy);
    let rows = join_measure(rows, fertility);
    let table = drop_incomplete(rows);

    info!(
        rows = table.len(),
        years = table.years().len(),
        "assembled long table"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::lookup::RegionEntry;
    use crate::assemble::reshape::Observation;

    fn lookup(entries: &[(&str, Option<&str>)]) -> RegionLookup {
        RegionLookup::new(entries.iter().map(|(c, r)| RegionEntry {
            code: c.to_string(),
            region: r.map(str::to_string),
        }))
    }

    fn fragment(measure: Measure, obs: &[(&str, i32, f64)]) -> LongFragment {
        let mut f = LongFragment::new(measure);
        for &(code, year, value) in obs {
            f.push(Observation {
                code: code.to_string(),
                year,
                value,
            });
        }
        f
    }

    fn fixture() -> (RegionLookup, LongFragment, LongFragment, LongFragment) {
        let lk = lookup(&[
            ("AAA", Some("South Asia")),
            ("BBB", Some("North America")),
            ("WLD", None),
            ("CCC", Some("Sub-Saharan Africa")),
        ]);
        let pop = fragment(
            Measure::Population,
            &[
                ("AAA", 1960, 1.0e6),
                ("AAA", 1961, 1.1e6),
                ("BBB", 1960, 2.0e6),
                ("BBB", 1961, 2.1e6),
                ("WLD", 1960, 3.0e9),
                ("ZZZ", 1960, 5.0),
            ],
        );
        let fert = fragment(
            Measure::FertilityRate,
            &[
                ("AAA", 1960, 6.0),
                ("BBB", 1960, 3.0),
                ("BBB", 1961, 2.9),
                ("WLD", 1960, 5.0),
                ("CCC", 1960, 6.5),
            ],
        );
        let life = fragment(
            Measure::LifeExpectancy,
            &[
                ("AAA", 1960, 41.0),
                ("AAA", 1961, 42.0),
                ("BBB", 1960, 69.0),
                ("BBB", 1961, 70.0),
                ("WLD", 1960, 52.0),
                ("CCC", 1960, 38.0),
            ],
        );
        (lk, pop, fert, life)
    }

    #[test]
    fn only_complete_rows_survive() {
        let (lk, pop, fert, life) = fixture();
        let table = assemble(&lk, &pop, &fert, &life);

        let keys: Vec<(&str, i32)> = table
            .records()
            .iter()
            .map(|r| (r.code.as_str(), r.year))
            .collect();
        // AAA/1961 lacks fertility, WLD lacks a region, CCC lacks population,
        // ZZZ is not in the lookup
        assert_eq!(keys, vec![("AAA", 1960), ("BBB", 1960), ("BBB", 1961)]);
    }

    #[test]
    fn every_row_has_its_lookup_region() {
        let (lk, pop, fert, life) = fixture();
        let table = assemble(&lk, &pop, &fert, &life);
        for r in table.records() {
            assert_eq!(lk.region_of(&r.code), Some(r.region.as_str()));
        }
        let bbb = &table.records()[2];
        assert_eq!(bbb.population, 2.1e6);
        assert_eq!(bbb.fertility_rate, 2.9);
        assert_eq!(bbb.life_expectancy, 70.0);
    }

    #[test]
    fn dependent_join_order_does_not_change_result() {
        let (lk, pop, fert, life) = fixture();
        let life_first = drop_incomplete(join_measure(join_measure(anchor(&lk, &pop), &life), &fert));
        let fert_first = drop_incomplete(join_measure(join_measure(anchor(&lk, &pop), &fert), &life));
        assert_eq!(life_first, fert_first);
        assert_eq!(life_first, assemble(&lk, &pop, &fert, &life));
    }

    #[test]
    fn anchor_keeps_unmatched_lookup_entries() {
        let (lk, pop, _, _) = fixture();
        let rows = anchor(&lk, &pop);
        let ccc: Vec<_> = rows.iter().filter(|r| r.code == "CCC").collect();
        assert_eq!(ccc.len(), 1);
        assert_eq!(ccc[0].year, None);
        assert!(rows.iter().all(|r| r.code != "ZZZ"));
    }

    #[test]
    fn empty_fragment_yields_empty_table() {
        let (lk, _, fert, life) = fixture();
        let empty = LongFragment::new(Measure::Population);
        let table = assemble(&lk, &empty, &fert, &life);
        assert!(table.is_empty());

        let table = assemble(&RegionLookup::default(), &empty, &fert, &life);
        assert!(table.is_empty());
    }
}
