use std::collections::BTreeSet;
use std::fmt;

/// Inclusive range of year columns a series table is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    pub const fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.first..=self.last
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(1960, 2016)
    }
}

/// The three time-series measures joined into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Population,
    FertilityRate,
    LifeExpectancy,
}

impl Measure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Population => "Population",
            Measure::FertilityRate => "Fertility Rate",
            Measure::LifeExpectancy => "Life Expectancy",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One complete (entity, year) row. Incomplete rows never become an `EntityRecord`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub code: String,
    pub year: i32,
    pub region: String,
    pub population: f64,
    pub fertility_rate: f64,
    pub life_expectancy: f64,
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} {:<28} {} {:>14.0} {:>6.2} {:>6.2}",
            self.code, self.region, self.year, self.population, self.fertility_rate, self.life_expectancy
        )
    }
}

/// The assembled long-form dataset. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    records: Vec<EntityRecord>,
}

impl LongTable {
    pub fn new(records: Vec<EntityRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn head(&self, n: usize) -> &[EntityRecord] {
        &self.records[..n.min(self.records.len())]
    }
}
