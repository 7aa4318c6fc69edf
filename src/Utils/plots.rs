//! # Concentration Charts
//!
//! Rendering of concentration trajectories, one curve per substance.
//!
//! The pipeline does not draw anything itself: it assembles a [`ChartRequest`] (time grid,
//! labeled series, visible time window) and hands it to a [`ChartRenderer`]. The default
//! renderer, [`PlottersRenderer`], writes the chart to an `.svg` file with `plotters`.
//! The SVG backend leaves text to the viewer, so no font backend is needed; any other
//! extension is refused with [`ReactorError::Render`] before a file is created.
use crate::ReactorsIVP::reactor_IVP_utils::{ReactorError, is_svg_path};
use log::info;
use plotters::prelude::*;
use std::error::Error;

/// Everything needed to draw one concentration chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub time: Vec<f64>,
    /// (label, values) per curve, values aligned with `time`
    pub series: Vec<(String, Vec<f64>)>,
    /// right edge of the visible time axis, the left edge is 0
    pub x_max: f64,
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
}

impl ChartRequest {
    /// upper bound of the concentration axis: 10% above the largest value in the visible window
    pub fn y_max(&self) -> f64 {
        let max = self
            .series
            .iter()
            .flat_map(|(_, values)| {
                self.time
                    .iter()
                    .zip(values.iter())
                    .filter(|(t, _)| **t <= self.x_max)
                    .map(|(_, c)| *c)
            })
            .filter(|c| c.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if max.is_finite() && max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}

/// Consumer of concentration charts
pub trait ChartRenderer {
    fn render(&self, request: &ChartRequest) -> Result<(), ReactorError>;
}

/// Appearance of the charts written by [`PlottersRenderer`]
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub show_grid: bool,
    /// curve colors, cycled when there are more substances than colors
    pub colors: Vec<RGBColor>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            line_width: 2,
            show_grid: true,
            colors: vec![
                RED,
                BLUE,
                GREEN,
                MAGENTA,
                CYAN,
                BLACK,
                RGBColor(255, 165, 0),
                RGBColor(128, 0, 128),
            ],
        }
    }
}

impl PlotConfig {
    fn color(&self, i: usize) -> RGBColor {
        if self.colors.is_empty() {
            BLACK
        } else {
            self.colors[i % self.colors.len()]
        }
    }
}

/// Writes charts to `output_path` with `plotters`
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    pub output_path: String,
    pub config: PlotConfig,
}

impl PlottersRenderer {
    pub fn new(output_path: &str) -> Self {
        Self {
            output_path: output_path.to_string(),
            config: PlotConfig::default(),
        }
    }

    pub fn with_config(output_path: &str, config: PlotConfig) -> Self {
        Self {
            output_path: output_path.to_string(),
            config,
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, request: &ChartRequest) -> Result<(), ReactorError> {
        if !request.x_max.is_finite() || request.x_max <= 0.0 {
            return Err(ReactorError::Render(format!(
                "time axis must end at a positive time, got {}",
                request.x_max
            )));
        }
        if !is_svg_path(&self.output_path) {
            return Err(ReactorError::Render(format!(
                "{}: only .svg charts are supported",
                self.output_path
            )));
        }
        let size = (self.config.width, self.config.height);
        draw_chart(SVGBackend::new(&self.output_path, size), request, &self.config)
            .map_err(|e| ReactorError::Render(format!("{}: {}", self.output_path, e)))?;
        info!("chart saved to {}", self.output_path);
        Ok(())
    }
}

fn draw_chart<DB: DrawingBackend>(
    backend: DB,
    request: &ChartRequest,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = request.x_max;
    let mut chart = ChartBuilder::on(&root)
        .caption(&request.title, ("sans-serif", 30).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..request.y_max())?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&request.xlabel)
            .y_desc(&request.ylabel)
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    for (i, (label, values)) in request.series.iter().enumerate() {
        let color = config.color(i);
        chart
            .draw_series(LineSeries::new(
                request
                    .time
                    .iter()
                    .zip(values.iter())
                    .filter(|(t, _)| **t <= x_max)
                    .map(|(t, c)| (*t, *c)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
