//! Paint condition scoring.
//!
//! Collapses a set of image analyses into a single 1-10 score with a
//! human-readable description. Pure and order-independent (mean over
//! per-image sub-scores).

use serde::{Deserialize, Serialize};

use super::image::{ImageAnalysisResult, Severity};

/// Aggregate 1-10 paint condition, 0 when no images were analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionScore {
    pub score: u8,
    pub description: String,
}

/// Numeric sub-score for one image's severity.
fn severity_sub_score(severity: Option<Severity>) -> u32 {
    match severity {
        Some(Severity::Severe) => 3,
        Some(Severity::Moderate) => 6,
        Some(Severity::Minor) => 8,
        None => 10,
    }
}

fn describe(score: u8) -> &'static str {
    match score {
        0 => "No images analyzed",
        1..=2 => "Very poor condition, extensive paint correction required",
        3..=4 => "Poor condition, major defects present",
        5..=6 => "Fair condition, visible defects",
        7..=8 => "Good condition, minor defects",
        _ => "Excellent condition",
    }
}

/// Score the overall paint condition across a set of image analyses.
pub fn paint_condition_score(results: &[ImageAnalysisResult]) -> ConditionScore {
    if results.is_empty() {
        return ConditionScore {
            score: 0,
            description: describe(0).to_string(),
        };
    }

    let sum: u32 = results.iter().map(|r| severity_sub_score(r.severity)).sum();
    let mean = sum as f32 / results.len() as f32;
    let score = mean.round() as u8;

    ConditionScore {
        score,
        description: describe(score).to_string(),
    }
}
