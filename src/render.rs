//! Chart rendering
//!
//! [`ChartRenderer`] is the seam between the pipeline and image output.
//! [`PlottersRenderer`] draws each [`ChartSpec`] to a PNG with the
//! [`plotters`] bitmap backend. All styling comes from the [`RenderConfig`]
//! given at construction; nothing is read from global state.

use crate::aggregates::Bins;
use crate::charts::{ChartBody, ChartSpec};
use crate::config::RenderConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while drawing a chart
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save chart to file: {0}")]
    FileSave(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, RenderError>;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Renders one chart to one image file
pub trait ChartRenderer {
    fn render(&self, spec: &ChartSpec, output_path: &Path) -> Result<()>;
}

/// Headless PNG renderer backed by [`plotters`]
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    config: RenderConfig,
}

impl PlottersRenderer {
    pub fn new(config: RenderConfig) -> Self {
        PlottersRenderer { config }
    }

    fn caption_style(&self) -> TextStyle<'_> {
        (self.config.font_family.as_str(), f64::from(self.config.caption_size))
            .into_font()
            .into()
    }

    fn label_style(&self) -> TextStyle<'_> {
        (self.config.font_family.as_str(), f64::from(self.config.label_size))
            .into_font()
            .into()
    }

    fn bar_color(&self) -> RGBColor {
        let (r, g, b) = self.config.bar_color;
        RGBColor(r, g, b)
    }

    fn line_color(&self) -> RGBColor {
        let (r, g, b) = self.config.line_color;
        RGBColor(r, g, b)
    }

    fn draw_bars(&self, area: &Area, spec: &ChartSpec, entries: &[(String, u64)]) -> Result<()> {
        let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
        let y_top = headroom(entries.iter().map(|(_, count)| *count).max().unwrap_or(0));

        let mut chart = ChartBuilder::on(area)
            .caption(spec.title, self.caption_style())
            .margin(self.config.margin)
            .x_label_area_size(80)
            .y_label_area_size(110)
            .build_cartesian_2d(category_axis(entries.len()).into_segmented(), 0u64..y_top)
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|v| segment_label(v, &labels))
            .label_style(self.label_style())
            .axis_desc_style(self.label_style())
            .draw()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(self.bar_color().filled())
                    .margin(40)
                    .data(entries.iter().enumerate().map(|(i, (_, count))| (i as u32, *count))),
            )
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        // Count above each bar
        let value_style = self
            .label_style()
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(entries.iter().enumerate().map(|(i, (_, count))| {
                Text::new(
                    count.to_string(),
                    (SegmentValue::CenterOf(i as u32), *count),
                    value_style.clone(),
                )
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        Ok(())
    }

    fn draw_horizontal_bars(
        &self,
        area: &Area,
        spec: &ChartSpec,
        entries: &[(String, u64)],
    ) -> Result<()> {
        let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
        let x_top = headroom(entries.iter().map(|(_, count)| *count).max().unwrap_or(0));

        let mut chart = ChartBuilder::on(area)
            .caption(spec.title, self.caption_style())
            .margin(self.config.margin)
            .x_label_area_size(80)
            .y_label_area_size(420)
            .build_cartesian_2d(0u64..x_top, category_axis(entries.len()).into_segmented())
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .y_labels(labels.len().max(1))
            .y_label_formatter(&|v| segment_label(v, &labels))
            .label_style(self.label_style())
            .axis_desc_style(self.label_style())
            .draw()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        chart
            .draw_series(
                Histogram::horizontal(&chart)
                    .style(self.bar_color().filled())
                    .margin(8)
                    .data(entries.iter().enumerate().map(|(i, (_, count))| (i as u32, *count))),
            )
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        Ok(())
    }

    fn draw_line(&self, area: &Area, spec: &ChartSpec, points: &[(i32, u64)]) -> Result<()> {
        let (mut x_min, mut x_max) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => (0, 1),
        };
        if x_min == x_max {
            x_min -= 1;
            x_max += 1;
        }
        let y_top = headroom(points.iter().map(|(_, count)| *count).max().unwrap_or(0));

        let mut chart = ChartBuilder::on(area)
            .caption(spec.title, self.caption_style())
            .margin(self.config.margin)
            .x_label_area_size(80)
            .y_label_area_size(110)
            .build_cartesian_2d(x_min..x_max, 0u64..y_top)
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .x_label_formatter(&|year| year.to_string())
            .label_style(self.label_style())
            .axis_desc_style(self.label_style())
            .draw()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        let color = self.line_color();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, 7, color.filled())),
            )
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        Ok(())
    }

    fn draw_histogram(&self, area: &Area, spec: &ChartSpec, bins: &Bins) -> Result<()> {
        let (lo, hi) = bins.range().unwrap_or((0.0, 1.0));
        let y_top = headroom(bins.max_count());

        let mut chart = ChartBuilder::on(area)
            .caption(spec.title, self.caption_style())
            .margin(self.config.margin)
            .x_label_area_size(80)
            .y_label_area_size(110)
            .build_cartesian_2d(lo..hi, 0u64..y_top)
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .label_style(self.label_style())
            .axis_desc_style(self.label_style())
            .draw()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        let fill = self.bar_color().filled();
        chart
            .draw_series(
                bins.bins()
                    .map(|(left, right, count)| Rectangle::new([(left, 0), (right, count)], fill)),
            )
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        // Bin separators
        chart
            .draw_series(bins.bins().map(|(left, right, count)| {
                Rectangle::new([(left, 0), (right, count)], WHITE.stroke_width(1))
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        Ok(())
    }

    fn draw_box_plot(
        &self,
        area: &Area,
        spec: &ChartSpec,
        groups: &[(i32, Vec<f64>)],
    ) -> Result<()> {
        let labels: Vec<String> = groups.iter().map(|(decade, _)| decade.to_string()).collect();

        let all_values = groups.iter().flat_map(|(_, values)| values.iter().copied());
        let (value_min, value_max) = all_values.fold((f64::INFINITY, f64::NEG_INFINITY), |acc, v| {
            (acc.0.min(v), acc.1.max(v))
        });
        let (y_lo, y_hi) = if value_min.is_finite() && value_max.is_finite() {
            let pad = ((value_max - value_min) * 0.05).max(1.0);
            ((value_min - pad) as f32, (value_max + pad) as f32)
        } else {
            (0.0f32, 1.0f32)
        };

        let mut chart = ChartBuilder::on(area)
            .caption(spec.title, self.caption_style())
            .margin(self.config.margin)
            .x_label_area_size(80)
            .y_label_area_size(110)
            .build_cartesian_2d(category_axis(groups.len()).into_segmented(), y_lo..y_hi)
            .map_err(|e| RenderError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label)
            .y_desc(spec.y_label)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|v| segment_label(v, &labels))
            .label_style(self.label_style())
            .axis_desc_style(self.label_style())
            .draw()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        // Decades without a single runtime keep their slot but get no box
        let boxes: Vec<(u32, Quartiles)> = groups
            .iter()
            .enumerate()
            .filter(|(_, (_, values))| !values.is_empty())
            .map(|(i, (_, values))| (i as u32, Quartiles::new(values)))
            .collect();

        let color = self.bar_color();
        chart
            .draw_series(boxes.iter().map(|(i, quartiles)| {
                Boxplot::new_vertical(SegmentValue::CenterOf(*i), quartiles)
                    .width(60)
                    .whisker_width(0.5)
                    .style(color.stroke_width(3))
            }))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, spec: &ChartSpec, output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (self.config.width, self.config.height))
            .into_drawing_area();

        root.fill(&WHITE)
            .map_err(|e| RenderError::DrawingArea(e.to_string()))?;

        match &spec.body {
            ChartBody::Bar(entries) => self.draw_bars(&root, spec, entries)?,
            ChartBody::HorizontalBar(entries) => self.draw_horizontal_bars(&root, spec, entries)?,
            ChartBody::Line(points) => self.draw_line(&root, spec, points)?,
            ChartBody::Histogram(bins) => self.draw_histogram(&root, spec, bins)?,
            ChartBody::BoxPlot(groups) => self.draw_box_plot(&root, spec, groups)?,
        }

        root.present()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        Ok(())
    }
}

/// Upper axis bound leaving ~10% space above the tallest value
fn headroom(max: u64) -> u64 {
    max + max / 10 + 1
}

/// Index range for `count` categories
///
/// Integer ranges are inclusive once segmented, so `0..n` would add an
/// empty slot. No categories still get one slot to draw empty axes on.
fn category_axis(count: usize) -> Range<u32> {
    0..count.saturating_sub(1) as u32
}

/// Category label for a segmented axis position
fn segment_label(value: &SegmentValue<u32>, labels: &[String]) -> String {
    match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
            labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}
