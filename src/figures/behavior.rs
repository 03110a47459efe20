//! Behavior figure: per-phase try-before-AI bar chart plus a problem-type
//! pie chart.

use crate::analysis::BehaviorAnalysis;
use crate::core::{EdustatError, Result};
use crate::figures::{CATEGORY_PALETTE, PHASE_COLORS};
use crate::phase::Phase;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub fn render(analysis: &BehaviorAnalysis, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1400, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(EdustatError::render)?;

    let panels = root.split_evenly((1, 2));
    draw_bars(&panels[0], analysis)?;
    draw_pie(&panels[1], analysis)?;

    root.present().map_err(EdustatError::render)?;
    Ok(())
}

fn draw_bars(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    analysis: &BehaviorAnalysis,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption("Tried independently before asking AI", ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d((0usize..3usize).into_segmented(), 0.0f64..100.0f64)
        .map_err(EdustatError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) if *i < 3 => Phase::all()[*i].name().to_string(),
            _ => String::new(),
        })
        .y_desc("Share of interactions (%)")
        .draw()
        .map_err(EdustatError::render)?;

    for (i, ratio) in analysis.phase_ratios.iter().enumerate() {
        let Some(percent) = ratio.percent else {
            continue;
        };
        let color = PHASE_COLORS[i % PHASE_COLORS.len()];
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), percent),
                ],
                color.mix(0.8).filled(),
            )))
            .map_err(EdustatError::render)?;

        let label_style = TextStyle::from(("sans-serif", 16).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{percent:.1}%"),
                (SegmentValue::CenterOf(i), (percent + 2.0).min(98.0)),
                label_style,
            )))
            .map_err(EdustatError::render)?;
    }

    Ok(())
}

fn draw_pie(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    analysis: &BehaviorAnalysis,
) -> Result<()> {
    let area = area
        .titled("Problem type distribution", ("sans-serif", 20))
        .map_err(EdustatError::render)?;

    let sizes: Vec<f64> = analysis.problem_types.iter().map(|p| p.percent).collect();
    let labels: Vec<String> = analysis
        .problem_types
        .iter()
        .map(|p| p.problem_type.clone())
        .collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()])
        .collect();

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = (width.min(height) as f64) * 0.32;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 14).into_font().color(&BLACK));
    area.draw(&pie).map_err(EdustatError::render)?;

    Ok(())
}
