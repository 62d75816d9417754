use plotters::style::RGBColor;
use std::collections::BTreeMap;

use super::palette::Region;
use crate::assemble::{EntityRecord, LongTable};
use crate::config::RenderConfig;
use crate::error::{BestStatsError, Result};

/// Partition records by region label. Groups come out sorted by label;
/// records keep their table order inside a group.
pub fn group_by_region(table: &LongTable) -> BTreeMap<&str, Vec<&EntityRecord>> {
    let mut groups: BTreeMap<&str, Vec<&EntityRecord>> = BTreeMap::new();
    for record in table.records() {
        groups.entry(record.region.as_str()).or_default().push(record);
    }
    groups
}

/// Fixed plot limits, computed once per render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    /// Fertility rate
    pub x: (f64, f64),
    /// Life expectancy
    pub y: (f64, f64),
}

impl AxisBounds {
    /// Global min/max of both measures, padded. `None` for an empty table.
    pub fn from_table(table: &LongTable, x_pad: f64, y_pad: f64) -> Option<Self> {
        let mut records = table.records().iter();
        let first = records.next()?;
        let init = (
            (first.fertility_rate, first.fertility_rate),
            (first.life_expectancy, first.life_expectancy),
        );
        let ((x_min, x_max), (y_min, y_max)) = records.fold(init, |((x0, x1), (y0, y1)), r| {
            (
                (x0.min(r.fertility_rate), x1.max(r.fertility_rate)),
                (y0.min(r.life_expectancy), y1.max(r.life_expectancy)),
            )
        });
        Some(Self {
            x: (x_min - x_pad, x_max + x_pad),
            y: (y_min - y_pad, y_max + y_pad),
        })
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x.0 + self.x.1) / 2.0, (self.y.0 + self.y.1) / 2.0)
    }
}

/// The years of the animation, ascending and distinct. Iterating twice replays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSequence {
    years: Vec<i32>,
}

impl FrameSequence {
    pub fn from_table(table: &LongTable) -> Self {
        Self {
            years: table.years(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Matplotlib-style marker area (pt²): sqrt(population / scale) * factor.
pub fn bubble_area(population: f64, scale: f64, factor: f64) -> f64 {
    (population / scale).sqrt() * factor
}

/// One region's persistent series.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    pub region: Region,
    pub records: Vec<&'a EntityRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Marker area in pt²
    pub area: f64,
}

/// One series' points in a single frame.
#[derive(Debug, Clone)]
pub struct SeriesFrame {
    pub label: &'static str,
    pub color: RGBColor,
    pub points: Vec<Point>,
}

/// What one frame shows: the year and every series' points for it.
#[derive(Debug, Clone)]
pub struct FrameState {
    pub year: i32,
    pub series: Vec<SeriesFrame>,
}

/// Everything fixed for the lifetime of one render: bounds, frames, series.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub bounds: AxisBounds,
    pub frames: FrameSequence,
    pub series: Vec<Series<'a>>,
    population_scale: f64,
    bubble_factor: f64,
}

impl<'a> Scene<'a> {
    /// Set up axes and one series per region. Fails on an empty table or on a
    /// region without a color, before any frame is drawn.
    pub fn new(table: &'a LongTable, cfg: &RenderConfig) -> Result<Self> {
        let bounds = AxisBounds::from_table(table, cfg.fertility_padding, cfg.life_expectancy_padding)
            .ok_or(BestStatsError::EmptyDataset)?;

        let series = group_by_region(table)
            .into_iter()
            .map(|(label, records)| -> Result<Series<'a>> {
                Ok(Series {
                    region: label.parse::<Region>()?,
                    records,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            bounds,
            frames: FrameSequence::from_table(table),
            series,
            population_scale: cfg.population_scale,
            bubble_factor: cfg.bubble_factor,
        })
    }

    /// Select each series' rows for `year` and turn them into points.
    pub fn frame(&self, year: i32) -> FrameState {
        let series = self
            .series
            .iter()
            .map(|s| SeriesFrame {
                label: s.region.label(),
                color: s.region.color(),
                points: s
                    .records
                    .iter()
                    .filter(|r| r.year == year)
                    .map(|r| Point {
                        x: r.fertility_rate,
                        y: r.life_expectancy,
                        area: bubble_area(r.population, self.population_scale, self.bubble_factor),
                    })
                    .collect(),
            })
            .collect();
        FrameState { year, series }
    }
}
