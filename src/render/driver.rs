use tracing::{debug, info};

use super::scene::{FrameState, Scene};
use crate::error::Result;

/// What a sink wants after a frame was presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// A rendering backend: receives frames one at a time.
pub trait FrameSink {
    /// Show or encode one frame.
    fn present(&mut self, scene: &Scene<'_>, frame: &FrameState) -> Result<Flow>;

    /// Replay the sequence from the first year once it is exhausted.
    fn loops(&self) -> bool {
        false
    }

    /// Called once after the last frame; flushes whatever the sink buffers.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn present(&mut self, scene: &Scene<'_>, frame: &FrameState) -> Result<Flow> {
        (**self).present(scene, frame)
    }

    fn loops(&self) -> bool {
        (**self).loops()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Walk the scene's frame sequence and feed every frame to `sink`, replaying
/// while the sink loops and until it asks to stop. Returns the number of
/// frames presented.
pub fn play<S: FrameSink>(scene: &Scene<'_>, mut sink: S) -> Result<usize> {
    info!(
        frames = scene.frames.len(),
        series = scene.series.len(),
        looping = sink.loops(),
        "starting playback"
    );

    let mut presented = 0usize;
    'playback: loop {
        for year in scene.frames.iter() {
            let frame = scene.frame(year);
            let flow = sink.present(scene, &frame)?;
            presented += 1;
            if flow == Flow::Stop {
                debug!(year, "sink stopped playback");
                break 'playback;
            }
        }
        if !sink.loops() || scene.frames.is_empty() {
            break;
        }
    }

    sink.finish()?;
    info!(presented, "playback finished");
    Ok(presented)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assemble::{EntityRecord, LongTable};
    use crate::config::RenderConfig;

    /// Records every frame instead of drawing it.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub years: Vec<i32>,
        pub points_per_frame: Vec<usize>,
        pub looping: bool,
        pub stop_after: Option<usize>,
        pub finished: bool,
    }

    impl FrameSink for RecordingSink {
        fn present(&mut self, _scene: &Scene<'_>, frame: &FrameState) -> Result<Flow> {
            self.years.push(frame.year);
            self.points_per_frame
                .push(frame.series.iter().map(|s| s.points.len()).sum());
            match self.stop_after {
                Some(n) if self.years.len() >= n => Ok(Flow::Stop),
                _ => Ok(Flow::Continue),
            }
        }

        fn loops(&self) -> bool {
            self.looping
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn table() -> LongTable {
        let rec = |code: &str, region: &str, year| EntityRecord {
            code: code.into(),
            year,
            region: region.into(),
            population: 1.0e6,
            fertility_rate: 3.0,
            life_expectancy: 60.0,
        };
        LongTable::new(vec![
            rec("AAA", "South Asia", 1962),
            rec("AAA", "South Asia", 1960),
            rec("BBB", "North America", 1960),
            rec("BBB", "North America", 1961),
        ])
    }

    #[test]
    fn one_shot_visits_each_year_once_in_order() -> anyhow::Result<()> {
        let t = table();
        let scene = Scene::new(&t, &RenderConfig::default())?;
        let mut sink = RecordingSink::default();

        let n = play(&scene, &mut sink)?;
        assert_eq!(n, 3);
        assert_eq!(sink.years, vec![1960, 1961, 1962]);
        assert_eq!(sink.points_per_frame, vec![2, 1, 1]);
        assert!(sink.finished);
        Ok(())
    }

    #[test]
    fn looping_sink_replays_until_stopped() -> anyhow::Result<()> {
        let t = table();
        let scene = Scene::new(&t, &RenderConfig::default())?;
        let mut sink = RecordingSink {
            looping: true,
            stop_after: Some(7),
            ..Default::default()
        };

        play(&scene, &mut sink)?;
        assert_eq!(sink.years, vec![1960, 1961, 1962, 1960, 1961, 1962, 1960]);
        assert!(sink.finished);
        Ok(())
    }

    #[test]
    fn bounds_do_not_move_between_frames() -> anyhow::Result<()> {
        struct BoundsSink(Vec<(f64, f64, f64, f64)>);
        impl FrameSink for BoundsSink {
            fn present(&mut self, scene: &Scene<'_>, _frame: &FrameState) -> Result<Flow> {
                let b = scene.bounds;
                self.0.push((b.x.0, b.x.1, b.y.0, b.y.1));
                Ok(Flow::Continue)
            }
        }

        let t = table();
        let scene = Scene::new(&t, &RenderConfig::default())?;
        let mut sink = BoundsSink(Vec::new());
        play(&scene, &mut sink)?;
        assert_eq!(sink.0.len(), 3);
        assert!(sink.0.windows(2).all(|w| w[0] == w[1]));
        Ok(())
    }
}
