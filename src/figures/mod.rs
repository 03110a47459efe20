//! PNG figure rendering for the four analyses.
//!
//! The analysis modules stay render-free; each renderer here takes a
//! finished result struct and writes one fixed-name PNG artifact.

pub mod ability;
pub mod behavior;
pub mod heatmap;
pub mod trends;

use plotters::style::RGBColor;

pub const ABILITY_FIGURE: &str = "ability_comparison.png";
pub const TRENDS_FIGURE: &str = "score_trends.png";
pub const BEHAVIOR_FIGURE: &str = "behavior_patterns.png";
pub const HEATMAP_FIGURE: &str = "correlation_heatmap.png";

// Phase colors carried over from the study's original figures.
pub(crate) const PHASE_COLORS: [RGBColor; 3] = [
    RGBColor(52, 152, 219),
    RGBColor(46, 204, 113),
    RGBColor(231, 76, 60),
];

pub(crate) const CATEGORY_PALETTE: [RGBColor; 8] = [
    RGBColor(52, 152, 219),
    RGBColor(46, 204, 113),
    RGBColor(231, 76, 60),
    RGBColor(241, 196, 15),
    RGBColor(155, 89, 182),
    RGBColor(26, 188, 156),
    RGBColor(230, 126, 34),
    RGBColor(149, 165, 166),
];
