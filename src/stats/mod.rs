//! Statistical building blocks shared by the analysis functions.

pub mod describe;
pub mod friedman;
pub mod pearson;
pub mod ttest;

pub use describe::{describe, mean, sample_std_dev, Descriptives};
pub use friedman::{friedman_test, FriedmanTest};
pub use pearson::{correlation_matrix, pearson, CorrelationMatrix};
pub use ttest::{paired_t_test, PairedTTest};
