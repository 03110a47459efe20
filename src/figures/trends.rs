//! Composite trend figure: one panel per measured quantity, mean line
//! with a mean ± SD band across the checkpoints.

use crate::analysis::{TrendAnalysis, TrendResult};
use crate::core::{EdustatError, Result};
use plotters::prelude::*;
use std::path::Path;

pub fn render(analysis: &TrendAnalysis, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1400, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(EdustatError::render)?;

    let panels = root.split_evenly((1, 2));
    draw_panel(&panels[0], &analysis.ai_dependency, RGBColor(52, 152, 219))?;
    draw_panel(&panels[1], &analysis.self_regulation, RGBColor(46, 204, 113))?;

    root.present().map_err(EdustatError::render)?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    result: &TrendResult,
    color: RGBColor,
) -> Result<()> {
    let weeks: Vec<f64> = result.checkpoints.iter().map(|c| c.week as f64).collect();
    let first = *weeks.first().expect("at least two checkpoints");
    let last = *weeks.last().expect("at least two checkpoints");

    let low = result
        .checkpoints
        .iter()
        .map(|c| c.mean - c.std_dev)
        .fold(f64::INFINITY, f64::min);
    let high = result
        .checkpoints
        .iter()
        .map(|c| c.mean + c.std_dev)
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((high - low) * 0.15).max(0.5);

    let caption = format!(
        "{}: chi2({}) = {:.2}, p = {:.3}",
        result.measure, result.test.df, result.test.statistic, result.test.p_value
    );

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d((first - 1.0)..(last + 1.0), (low - pad)..(high + pad))
        .map_err(EdustatError::render)?;

    chart
        .configure_mesh()
        .x_labels(result.checkpoints.len() + 2)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .x_desc("Week")
        .y_desc("Mean score")
        .draw()
        .map_err(EdustatError::render)?;

    // Mean ± SD band.
    let band: Vec<(f64, f64)> = result
        .checkpoints
        .iter()
        .map(|c| (c.week as f64, c.mean + c.std_dev))
        .chain(
            result
                .checkpoints
                .iter()
                .rev()
                .map(|c| (c.week as f64, c.mean - c.std_dev)),
        )
        .collect();
    chart
        .draw_series(std::iter::once(Polygon::new(band, color.mix(0.2).filled())))
        .map_err(EdustatError::render)?;

    let means: Vec<(f64, f64)> = result
        .checkpoints
        .iter()
        .map(|c| (c.week as f64, c.mean))
        .collect();
    chart
        .draw_series(std::iter::once(PathElement::new(
            means.clone(),
            color.stroke_width(2),
        )))
        .map_err(EdustatError::render)?;
    chart
        .draw_series(
            means
                .into_iter()
                .map(|point| Circle::new(point, 5, color.filled())),
        )
        .map_err(EdustatError::render)?;

    Ok(())
}
