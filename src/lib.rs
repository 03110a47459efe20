// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod figures;
pub mod io;
pub mod phase;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    Dataset, EdustatError, InteractionRecord, Result, ScoreRecord, SurveyRecord, TriedBeforeAi,
};

pub use crate::analysis::{
    analyze_behavior, analyze_trends, compare_ability, triangulate, AbilityComparison,
    BehaviorAnalysis, PipelineResults, TrendAnalysis, Triangulation,
};

pub use crate::config::AnalysisConfig;
pub use crate::io::{load_dataset, JsonWriter, ReportWriter, SummaryWriter};
pub use crate::phase::{Phase, PhaseBoundaries, PhaseBoundary};
pub use crate::stats::{
    correlation_matrix, friedman_test, paired_t_test, pearson, CorrelationMatrix, FriedmanTest,
    PairedTTest,
};
