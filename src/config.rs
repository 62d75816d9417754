//! Run configuration.
//!
//! Every value has a default matching the World Bank export layout and the
//! classic chart look; a YAML file can override any subset of them.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assemble::YearRange;
use crate::error::{BestStatsError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the four CSV inputs are read from
    pub data_dir: PathBuf,
    /// Directory the exported GIF is written to
    pub output_dir: PathBuf,
    pub inputs: InputConfig,
    pub render: RenderConfig,
}

/// File names and table layout of the inputs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub metadata_file: String,
    pub population_file: String,
    pub fertility_file: String,
    pub life_expectancy_file: String,
    /// Leading metadata lines before the header of the three time-series files
    pub series_skip_rows: usize,
    pub metadata_skip_rows: usize,
    pub id_column: String,
    pub region_column: String,
    pub first_year: i32,
    pub last_year: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub frame_interval_ms: u64,
    pub fertility_padding: f64,
    pub life_expectancy_padding: f64,
    /// Population is divided by this before the square root
    pub population_scale: f64,
    pub bubble_factor: f64,
    pub bubble_alpha: f64,
    /// Square figure edge, in inches
    pub figure_inches: u32,
    pub export_dpi: u32,
    pub window_dpi: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            inputs: InputConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            metadata_file: "country_metadata.csv".into(),
            population_file: "country_population.csv".into(),
            fertility_file: "fertility_rate.csv".into(),
            life_expectancy_file: "life_expectancy.csv".into(),
            series_skip_rows: 4,
            metadata_skip_rows: 0,
            id_column: "Country Code".into(),
            region_column: "Region".into(),
            first_year: 1960,
            last_year: 2016,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 200,
            fertility_padding: 0.3,
            life_expectancy_padding: 2.0,
            population_scale: 10_000.0,
            bubble_factor: 5.0,
            bubble_alpha: 0.6,
            figure_inches: 8,
            export_dpi: 160,
            window_dpi: 100,
        }
    }
}

impl Config {
    /// Load a YAML config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| BestStatsError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&text).map_err(|e| BestStatsError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn input_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

impl InputConfig {
    pub fn years(&self) -> YearRange {
        YearRange::new(self.first_year, self.last_year)
    }
}

impl RenderConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Pixel edge of the square figure at `dpi`
    pub fn pixels_at(&self, dpi: u32) -> u32 {
        self.figure_inches * dpi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_world_bank_layout() {
        let cfg = Config::default();
        assert_eq!(cfg.inputs.series_skip_rows, 4);
        assert_eq!(cfg.inputs.metadata_skip_rows, 0);
        assert_eq!(cfg.inputs.years(), YearRange::new(1960, 2016));
        assert_eq!(cfg.render.frame_interval(), Duration::from_millis(200));
        assert_eq!(cfg.render.pixels_at(cfg.render.export_dpi), 1280);
    }

    #[test]
    fn partial_yaml_keeps_defaults() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "data_dir: /srv/wdi")?;
        writeln!(tmp, "render:")?;
        writeln!(tmp, "  frame_interval_ms: 50")?;

        let cfg = Config::load(tmp.path())?;
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/wdi"));
        assert_eq!(cfg.render.frame_interval_ms, 50);
        assert_eq!(cfg.render.bubble_factor, 5.0);
        assert_eq!(cfg.inputs.id_column, "Country Code");
        Ok(())
    }

    #[test]
    fn unreadable_config_is_reported() {
        let err = Config::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, BestStatsError::Config { .. }));
    }
}
