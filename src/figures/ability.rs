//! Paired-sample comparison figure: box plots with jittered scores.

use crate::analysis::AbilityComparison;
use crate::core::{EdustatError, Result, ScoreRecord};
use crate::stats::describe::quartiles;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;

type Chart2d<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub fn render(
    comparison: &AbilityComparison,
    scores: &[ScoreRecord],
    path: &Path,
) -> Result<()> {
    let pre: Vec<f64> = scores.iter().map(|s| s.pretest_score).collect();
    let post: Vec<f64> = scores.iter().map(|s| s.posttest_score).collect();

    let low = pre
        .iter()
        .chain(post.iter())
        .copied()
        .fold(f64::INFINITY, f64::min);
    let high = pre
        .iter()
        .chain(post.iter())
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((high - low) * 0.1).max(1.0);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(EdustatError::render)?;

    let test = &comparison.test;
    let caption = format!(
        "Pretest vs posttest: t({}) = {:.2}, p = {:.3}, d = {:.2}",
        test.df, test.statistic, test.p_value, test.cohens_d
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0f64..3.0f64, (low - pad)..(high + pad))
        .map_err(EdustatError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(7)
        .x_label_formatter(&|x| {
            if (x - 1.0).abs() < 0.01 {
                "Pretest".to_string()
            } else if (x - 2.0).abs() < 0.01 {
                "Posttest".to_string()
            } else {
                String::new()
            }
        })
        .y_desc("Test score")
        .draw()
        .map_err(EdustatError::render)?;

    draw_box(&mut chart, 1.0, &pre, RGBColor(52, 152, 219))?;
    draw_box(&mut chart, 2.0, &post, RGBColor(46, 204, 113))?;
    draw_jitter(&mut chart, 1.0, &pre)?;
    draw_jitter(&mut chart, 2.0, &post)?;

    root.present().map_err(EdustatError::render)?;
    Ok(())
}

fn draw_box(chart: &mut Chart2d, x: f64, values: &[f64], color: RGBColor) -> Result<()> {
    let q = quartiles(values);
    let half = 0.25;

    let elements: Vec<DynElement<BitMapBackend, (f64, f64)>> = vec![
        Rectangle::new([(x - half, q.q1), (x + half, q.q3)], color.mix(0.35).filled())
            .into_dyn(),
        Rectangle::new([(x - half, q.q1), (x + half, q.q3)], color.stroke_width(1)).into_dyn(),
        PathElement::new(
            vec![(x - half, q.median), (x + half, q.median)],
            color.stroke_width(2),
        )
        .into_dyn(),
        PathElement::new(vec![(x, q.q3), (x, q.max)], color.stroke_width(1)).into_dyn(),
        PathElement::new(vec![(x, q.q1), (x, q.min)], color.stroke_width(1)).into_dyn(),
        PathElement::new(
            vec![(x - half / 2.0, q.max), (x + half / 2.0, q.max)],
            color.stroke_width(1),
        )
        .into_dyn(),
        PathElement::new(
            vec![(x - half / 2.0, q.min), (x + half / 2.0, q.min)],
            color.stroke_width(1),
        )
        .into_dyn(),
    ];

    chart
        .draw_series(elements)
        .map_err(EdustatError::render)?;
    Ok(())
}

fn draw_jitter(chart: &mut Chart2d, x: f64, values: &[f64]) -> Result<()> {
    // Deterministic jitter keeps figure artifacts stable across runs.
    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            let offset = ((i * 37) % 19) as f64 / 19.0 - 0.5;
            Circle::new((x + offset * 0.3, *v), 3, BLACK.mix(0.35).filled())
        }))
        .map_err(EdustatError::render)?;
    Ok(())
}
