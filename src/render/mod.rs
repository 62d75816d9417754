//! Animated bubble chart: fertility rate vs life expectancy, one series per
//! region, one frame per year.
pub mod chart;
pub mod driver;
pub mod export;
pub mod palette;
pub mod scene;
pub mod window;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::assemble::LongTable;
use crate::config::RenderConfig;
use crate::error::Result;
pub use chart::ChartStyle;
pub use driver::{play, Flow, FrameSink};
pub use export::{artifact_file_name, artifact_path, ExportState, GifSink};
pub use palette::Region;
pub use scene::{bubble_area, group_by_region, AxisBounds, FrameSequence, FrameState, Scene};
pub use window::{PlaybackState, WindowSink};

/// How the animation is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Play in a window, looping until closed
    Show,
    /// Encode once to a timestamped GIF
    Save,
}

/// Render `table` in `mode`. Returns the written file in `Save` mode.
pub fn render(table: &LongTable, mode: Mode, cfg: &RenderConfig, output_dir: &Path) -> Result<Option<PathBuf>> {
    // fails on unknown regions before any window or file exists
    let scene = Scene::new(table, cfg)?;
    info!(
        ?mode,
        frames = scene.frames.len(),
        x = ?scene.bounds.x,
        y = ?scene.bounds.y,
        "scene ready"
    );

    match mode {
        Mode::Show => {
            let style = ChartStyle {
                dpi: cfg.window_dpi,
                bubble_alpha: cfg.bubble_alpha,
            };
            let mut sink = WindowSink::new(
                "The best stats you've ever seen",
                cfg.pixels_at(cfg.window_dpi),
                cfg.frame_interval(),
                style,
            );
            sink.initialize()?;
            play(&scene, &mut sink)?;
            Ok(None)
        }
        Mode::Save => {
            let style = ChartStyle {
                dpi: cfg.export_dpi,
                bubble_alpha: cfg.bubble_alpha,
            };
            let path = artifact_path(output_dir);
            let mut sink = GifSink::new(
                path.clone(),
                cfg.pixels_at(cfg.export_dpi),
                cfg.frame_interval_ms as u32,
                style,
            );
            play(&scene, &mut sink)?;
            Ok(Some(path))
        }
    }
}
