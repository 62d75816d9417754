use minifb::{Key, KeyRepeat, Window, WindowOptions};
use plotters::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::chart::{draw_frame, ChartStyle};
use super::driver::{Flow, FrameSink};
use super::scene::{FrameState, Scene};
use crate::error::{BestStatsError, Result};

/// Interactive playback lifecycle. There is no terminal state: the run ends
/// when the window is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Initialized,
    Playing,
}

/// Pack an RGB byte buffer into minifb's 0RGB words.
pub fn pack_rgb(rgb: &[u8], out: &mut [u32]) {
    for (px, chunk) in out.iter_mut().zip(rgb.chunks_exact(3)) {
        *px = (u32::from(chunk[0]) << 16) | (u32::from(chunk[1]) << 8) | u32::from(chunk[2]);
    }
}

/// Shows frames in a desktop window at a fixed interval, looping forever.
/// Space toggles pause, Escape or closing the window stops.
pub struct WindowSink {
    window: Option<Window>,
    title: String,
    pixels: usize,
    interval: Duration,
    style: ChartStyle,
    rgb: Vec<u8>,
    buffer: Vec<u32>,
    paused: bool,
    state: PlaybackState,
}

impl WindowSink {
    pub fn new(title: impl Into<String>, pixels: u32, interval: Duration, style: ChartStyle) -> Self {
        let pixels = pixels as usize;
        Self {
            window: None,
            title: title.into(),
            pixels,
            interval,
            style,
            rgb: vec![0; pixels * pixels * 3],
            buffer: vec![0; pixels * pixels],
            paused: false,
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Open the window. Idle → Initialized.
    pub fn initialize(&mut self) -> Result<()> {
        if self.window.is_some() {
            return Ok(());
        }
        let mut window = Window::new(&self.title, self.pixels, self.pixels, WindowOptions::default())
            .map_err(|e| BestStatsError::DisplayUnavailable(e.to_string()))?;
        window.set_target_fps(60);
        info!(pixels = self.pixels, "display window opened");
        self.window = Some(window);
        self.state = PlaybackState::Initialized;
        Ok(())
    }

    fn rasterize(&mut self, scene: &Scene<'_>, frame: &FrameState) -> Result<()> {
        let size = self.pixels as u32;
        {
            let root = BitMapBackend::with_buffer(&mut self.rgb, (size, size)).into_drawing_area();
            draw_frame(&root, scene, frame, &self.style)?;
            root.present().map_err(BestStatsError::draw)?;
        }
        pack_rgb(&self.rgb, &mut self.buffer);
        Ok(())
    }
}

impl FrameSink for WindowSink {
    fn present(&mut self, scene: &Scene<'_>, frame: &FrameState) -> Result<Flow> {
        self.initialize()?;
        self.rasterize(scene, frame)?;
        self.state = PlaybackState::Playing;
        debug!(year = frame.year, "showing frame");

        let shown = Instant::now();
        let Some(window) = self.window.as_mut() else {
            return Ok(Flow::Stop);
        };
        loop {
            if !window.is_open() || window.is_key_down(Key::Escape) {
                info!("window closed");
                return Ok(Flow::Stop);
            }
            if window.is_key_pressed(Key::Space, KeyRepeat::No) {
                self.paused = !self.paused;
                info!(paused = self.paused, year = frame.year, "toggled playback");
            }
            window
                .update_with_buffer(&self.buffer, self.pixels, self.pixels)
                .map_err(|e| BestStatsError::DisplayUnavailable(e.to_string()))?;
            if !self.paused && shown.elapsed() >= self.interval {
                return Ok(Flow::Continue);
            }
        }
    }

    fn loops(&self) -> bool {
        true
    }

    fn finish(&mut self) -> Result<()> {
        self.window = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_bytes_pack_into_words() {
        let rgb = [0x1F, 0x77, 0xB4, 0xFF, 0xFF, 0xFF];
        let mut out = [0u32; 2];
        pack_rgb(&rgb, &mut out);
        assert_eq!(out, [0x001F77B4, 0x00FFFFFF]);
    }

    #[test]
    fn new_sink_starts_idle_and_loops() {
        let sink = WindowSink::new("t", 16, Duration::from_millis(200), ChartStyle { dpi: 2, bubble_alpha: 0.6 });
        assert_eq!(sink.state(), PlaybackState::Idle);
        assert!(sink.loops());
        assert_eq!(sink.buffer.len(), 256);
        assert_eq!(sink.rgb.len(), 768);
    }
}
