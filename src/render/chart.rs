use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::f64::consts::PI;

use super::palette::SILVER;
use super::scene::{FrameState, Scene};
use crate::assemble::Measure;
use crate::error::{BestStatsError, Result};

/// Resolution-dependent drawing parameters. Sizes are given in points and
/// scaled to pixels by `dpi`, so the export and the window look alike.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub dpi: u32,
    pub bubble_alpha: f64,
}

impl ChartStyle {
    pub fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Pixel radius of a marker with area `area` pt².
    pub fn radius_px(&self, area: f64) -> u32 {
        self.px((area / PI).sqrt()).round().max(1.0) as u32
    }
}

/// Draw one complete frame onto `root`: axes, every region's bubbles, the
/// legend and the faded year label.
pub fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene<'_>,
    frame: &FrameState,
    style: &ChartStyle,
) -> Result<()> {
    root.fill(&WHITE).map_err(BestStatsError::draw)?;

    let (x0, x1) = scene.bounds.x;
    let (y0, y1) = scene.bounds.y;
    let mut chart = ChartBuilder::on(root)
        .margin(style.px(12.0) as u32)
        .x_label_area_size(style.px(36.0) as u32)
        .y_label_area_size(style.px(40.0) as u32)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(BestStatsError::draw)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(&SILVER)
        .label_style(("sans-serif", style.px(10.0)).into_font().color(&SILVER))
        .axis_desc_style(("sans-serif", style.px(10.0)).into_font().color(&SILVER))
        .x_desc(Measure::FertilityRate.as_str())
        .y_desc(Measure::LifeExpectancy.as_str())
        .draw()
        .map_err(BestStatsError::draw)?;

    // drawn first so the bubbles sit on top of it
    let year_style = ("sans-serif", style.px(32.0), FontStyle::Bold)
        .into_font()
        .color(&BLACK.mix(0.1))
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart
        .draw_series(std::iter::once(Text::new(
            frame.year.to_string(),
            scene.bounds.center(),
            year_style,
        )))
        .map_err(BestStatsError::draw)?;

    let edge = SILVER.stroke_width(1);
    for series in &frame.series {
        let fill = series.color.mix(style.bubble_alpha).filled();
        chart
            .draw_series(
                series
                    .points
                    .iter()
                    .map(|p| Circle::new((p.x, p.y), style.radius_px(p.area), fill)),
            )
            .map_err(BestStatsError::draw)?
            .label(series.label)
            .legend(move |(x, y)| Circle::new((x, y), 5, fill));
        chart
            .draw_series(
                series
                    .points
                    .iter()
                    .map(|p| Circle::new((p.x, p.y), style.radius_px(p.area), edge)),
            )
            .map_err(BestStatsError::draw)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&SILVER)
        .label_font(("sans-serif", style.px(7.0)))
        .draw()
        .map_err(BestStatsError::draw)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_with_dpi() {
        let low = ChartStyle { dpi: 72, bubble_alpha: 0.6 };
        let high = ChartStyle { dpi: 144, bubble_alpha: 0.6 };
        assert_eq!(low.px(10.0), 10.0);
        assert_eq!(high.px(10.0), 20.0);
        // area pi*9 pt² → radius 3pt
        assert_eq!(low.radius_px(PI * 9.0), 3);
        assert_eq!(high.radius_px(PI * 9.0), 6);
    }

    #[test]
    fn tiny_bubbles_stay_visible() {
        let style = ChartStyle { dpi: 100, bubble_alpha: 0.6 };
        assert_eq!(style.radius_px(0.0), 1);
    }
}
