//! Pearson correlation and the cross-source correlation matrix.

use crate::core::{EdustatError, Result};
use serde::Serialize;

/// Symmetric correlation matrix with labeled rows/columns and a diagonal
/// of exactly 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

/// Pearson correlation coefficient of two equal-length vectors. The caller
/// must have ruled out zero-variance input.
pub fn pearson(x_values: &[f64], y_values: &[f64]) -> Result<f64> {
    if x_values.len() != y_values.len() {
        return Err(EdustatError::Alignment(format!(
            "correlation vectors differ in length: {} vs {}",
            x_values.len(),
            y_values.len()
        )));
    }
    let n = x_values.len() as f64;
    if x_values.len() < 2 {
        return Err(EdustatError::DegenerateInput(
            "correlation needs at least 2 observations".to_string(),
        ));
    }

    let mean_x = x_values.iter().sum::<f64>() / n;
    let mean_y = y_values.iter().sum::<f64>() / n;

    let (covariance, variance_x, variance_y) = x_values
        .iter()
        .zip(y_values.iter())
        .map(|(x, y)| {
            let diff_x = x - mean_x;
            let diff_y = y - mean_y;
            (diff_x * diff_y, diff_x * diff_x, diff_y * diff_y)
        })
        .fold((0.0, 0.0, 0.0), |acc, (cov, var_x, var_y)| {
            (acc.0 + cov, acc.1 + var_x, acc.2 + var_y)
        });

    if variance_x == 0.0 || variance_y == 0.0 {
        return Err(EdustatError::DegenerateInput(
            "correlation input has zero variance".to_string(),
        ));
    }

    Ok((covariance / (variance_x.sqrt() * variance_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise Pearson correlation matrix over labeled columns.
///
/// Fails with `ConstantColumn` naming the first zero-variance column, and
/// with `Alignment` if the columns differ in length.
pub fn correlation_matrix(columns: &[(String, Vec<f64>)]) -> Result<CorrelationMatrix> {
    let size = columns.len();
    for (label, values) in columns {
        let first = values.first().copied();
        if values.iter().all(|v| Some(*v) == first) {
            return Err(EdustatError::ConstantColumn {
                column: label.clone(),
            });
        }
    }

    let mut values = vec![vec![0.0_f64; size]; size];
    for i in 0..size {
        values[i][i] = 1.0;
        for j in (i + 1)..size {
            let r = pearson(&columns[i].1, &columns[j].1)?;
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        labels: columns.iter().map(|(label, _)| label.clone()).collect(),
        values,
    })
}
