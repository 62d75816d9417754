//! Reshape + merge of the World Bank series into one long-form table.
pub mod join;
pub mod lookup;
pub mod reshape;
pub mod table;

pub use join::assemble;
pub use lookup::{RegionEntry, RegionLookup};
pub use reshape::{reshape, LongFragment, Observation};
pub use table::{EntityRecord, LongTable, Measure, YearRange};
