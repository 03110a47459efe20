//! Annotated correlation heatmap with a diverging color scale centered
//! at zero and a fixed [-1, 1] value range.

use crate::core::{EdustatError, Result};
use crate::stats::CorrelationMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const NEGATIVE: RGBColor = RGBColor(59, 76, 192);
const POSITIVE: RGBColor = RGBColor(180, 4, 38);

pub fn render(matrix: &CorrelationMatrix, path: &Path) -> Result<()> {
    let size = matrix.size() as f64;

    let root = BitMapBackend::new(path, (820, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(EdustatError::render)?;

    // No mesh: the grid is the data. Extra space on the left and top holds
    // the row and column labels; the y range is reversed so row 0 sits on
    // top.
    let mut chart = ChartBuilder::on(&root)
        .caption("Cross-source correlation", ("sans-serif", 24))
        .margin(20)
        .build_cartesian_2d(-1.6f64..size, size..-0.9f64)
        .map_err(EdustatError::render)?;

    let cell_text = TextStyle::from(("sans-serif", 18).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    let label_text = TextStyle::from(("sans-serif", 15).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (row, row_values) in matrix.values.iter().enumerate() {
        for (column, value) in row_values.iter().enumerate() {
            let (x, y) = (column as f64, row as f64);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x, y), (x + 1.0, y + 1.0)],
                    diverging_color(*value).filled(),
                )))
                .map_err(EdustatError::render)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x, y), (x + 1.0, y + 1.0)],
                    BLACK.mix(0.2).stroke_width(1),
                )))
                .map_err(EdustatError::render)?;

            let text_color = if value.abs() > 0.6 { WHITE } else { BLACK };
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{value:.3}"),
                    (x + 0.5, y + 0.5),
                    cell_text.color(&text_color),
                )))
                .map_err(EdustatError::render)?;
        }
    }

    for (index, label) in matrix.labels.iter().enumerate() {
        let position = index as f64 + 0.5;
        // Column headers above the grid, row labels to the left.
        chart
            .draw_series(std::iter::once(Text::new(
                label.clone(),
                (position, -0.45),
                label_text.clone(),
            )))
            .map_err(EdustatError::render)?;
        chart
            .draw_series(std::iter::once(Text::new(
                label.clone(),
                (-0.8, position),
                label_text.clone(),
            )))
            .map_err(EdustatError::render)?;
    }

    root.present().map_err(EdustatError::render)?;
    Ok(())
}

/// Diverging blue-white-red scale over [-1, 1], white at zero.
fn diverging_color(value: f64) -> RGBColor {
    let t = value.clamp(-1.0, 1.0);
    let toward = if t < 0.0 { NEGATIVE } else { POSITIVE };
    let weight = t.abs();
    RGBColor(
        lerp(255, toward.0, weight),
        lerp(255, toward.1, weight),
        lerp(255, toward.2, weight),
    )
}

fn lerp(from: u8, to: u8, weight: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * weight).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_white_at_zero_and_saturated_at_the_ends() {
        assert_eq!(diverging_color(0.0), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(1.0), POSITIVE);
        assert_eq!(diverging_color(-1.0), NEGATIVE);
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(diverging_color(3.0), POSITIVE);
        assert_eq!(diverging_color(-3.0), NEGATIVE);
    }
}
