use chrono::{DateTime, Local, TimeZone};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::chart::{draw_frame, ChartStyle};
use super::driver::{Flow, FrameSink};
use super::scene::{FrameState, Scene};
use crate::error::{BestStatsError, Result};

pub const ARTIFACT_PREFIX: &str = "best_stat_anim";

/// `best_stat_anim-YYYY-MM-DD-HH-MM-SS.gif`
pub fn artifact_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}-{}.gif", ARTIFACT_PREFIX, at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Where an export started now would be written.
pub fn artifact_path(output_dir: &Path) -> PathBuf {
    output_dir.join(artifact_file_name(&Local::now()))
}

/// Export lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Rendering,
    Encoded,
}

/// Encodes every presented frame into one self-looping animated GIF.
///
/// Frames go to a `.partial` sibling of `path`, which is renamed into place by
/// `finish`. A sink dropped before `finish` removes the partial file.
pub struct GifSink {
    path: PathBuf,
    partial: PathBuf,
    pixels: u32,
    frame_delay_ms: u32,
    style: ChartStyle,
    root: Option<DrawingArea<BitMapBackend<'static>, Shift>>,
    state: ExportState,
    frames: usize,
}

impl GifSink {
    pub fn new(path: PathBuf, pixels: u32, frame_delay_ms: u32, style: ChartStyle) -> Self {
        Self {
            partial: path.with_extension("gif.partial"),
            path,
            pixels,
            frame_delay_ms,
            style,
            root: None,
            state: ExportState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    fn open(&mut self) -> Result<&DrawingArea<BitMapBackend<'static>, Shift>> {
        if self.root.is_none() {
            let backend = BitMapBackend::gif(&self.partial, (self.pixels, self.pixels), self.frame_delay_ms)
                .map_err(|e| BestStatsError::EncodingUnavailable {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?;
            info!(path = %self.path.display(), pixels = self.pixels, "opened gif encoder");
            self.root = Some(backend.into_drawing_area());
            self.state = ExportState::Rendering;
        }
        self.root.as_ref().ok_or_else(|| BestStatsError::EncodingUnavailable {
            path: self.path.clone(),
            reason: "encoder already closed".into(),
        })
    }
}

impl FrameSink for GifSink {
    fn present(&mut self, scene: &Scene<'_>, frame: &FrameState) -> Result<Flow> {
        if self.state == ExportState::Encoded {
            return Ok(Flow::Stop);
        }
        let style = self.style;
        let root = self.open()?;
        draw_frame(root, scene, frame, &style)?;
        root.present().map_err(BestStatsError::draw)?;
        self.frames += 1;
        debug!(year = frame.year, "encoded frame");
        Ok(Flow::Continue)
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(root) = self.root.take() {
            // dropping the backend writes the gif trailer
            drop(root);
            fs::rename(&self.partial, &self.path).map_err(|e| BestStatsError::EncodingUnavailable {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
            self.state = ExportState::Encoded;
            info!(path = %self.path.display(), frames = self.frames, "animation saved");
        }
        Ok(())
    }
}

impl Drop for GifSink {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            drop(root);
            match fs::remove_file(&self.partial) {
                Ok(()) => warn!(path = %self.partial.display(), "discarded unfinished animation"),
                Err(e) => warn!(path = %self.partial.display(), error = %e, "could not remove unfinished animation"),
            }
        }
    }
}
