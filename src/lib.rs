pub mod assemble;
pub mod config;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod render;

pub use config::Config;
pub use error::{BestStatsError, Result};
pub use pipeline::{load_long_table, run};
pub use render::Mode;
