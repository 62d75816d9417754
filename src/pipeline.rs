// src/pipeline.rs
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::assemble::{assemble, reshape, LongTable, Measure, RegionLookup};
use crate::config::Config;
use crate::load::read_table;
use crate::render::{render, Mode};

/// Load the four inputs and assemble them into the long table.
pub fn load_long_table(cfg: &Config) -> crate::error::Result<LongTable> {
    let inputs = &cfg.inputs;
    let years = inputs.years();

    // all four are read before any reshaping, so a missing file aborts early
    let metadata = read_table(cfg.input_path(&inputs.metadata_file), inputs.metadata_skip_rows)?;
    let population = read_table(cfg.input_path(&inputs.population_file), inputs.series_skip_rows)?;
    let fertility = read_table(cfg.input_path(&inputs.fertility_file), inputs.series_skip_rows)?;
    let life = read_table(cfg.input_path(&inputs.life_expectancy_file), inputs.series_skip_rows)?;

    let lookup = RegionLookup::from_table(&metadata, &inputs.id_column, &inputs.region_column)?;
    let population = reshape(&population, &inputs.id_column, years, Measure::Population)?;
    let fertility = reshape(&fertility, &inputs.id_column, years, Measure::FertilityRate)?;
    let life = reshape(&life, &inputs.id_column, years, Measure::LifeExpectancy)?;

    let table = assemble(&lookup, &population, &fertility, &life);
    for record in table.head(5) {
        info!("{}", record);
    }
    Ok(table)
}

/// Load, assemble and render. Returns the exported file in `Save` mode.
pub fn run(mode: Mode, cfg: &Config) -> Result<Option<PathBuf>> {
    let start = Instant::now();

    let table = load_long_table(cfg)
        .with_context(|| format!("assembling dataset from {}", cfg.data_dir.display()))?;
    info!(rows = table.len(), elapsed = ?start.elapsed(), "dataset ready");

    let written = render(&table, mode, &cfg.render, &cfg.output_dir)
        .with_context(|| format!("rendering animation ({:?})", mode))?;

    if let Some(path) = &written {
        info!(path = %path.display(), elapsed = ?start.elapsed(), "export complete");
    }
    Ok(written)
}
