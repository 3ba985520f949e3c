//! Labor estimation from detected defects.
//!
//! Folds the deduplicated tag union of a set of image analyses into a task
//! breakdown with base hours, then reports a min/max range of +/- 20%
//! around the total. Pure; same inputs always produce the same estimate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::image::{ImageAnalysisResult, Severity, Tag};

/// One line of the labor breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub task: String,
    pub hours: f32,
}

/// Labor-hour range plus task breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEstimate {
    pub min_hours: f32,
    pub max_hours: f32,
    pub breakdown: Vec<WorkItem>,
}

const DECONTAMINATION_HOURS: f32 = 1.5;
const TWO_STEP_POLISH_HOURS: f32 = 5.0;
const THREE_STEP_POLISH_HOURS: f32 = 8.0;
const OXIDATION_TREATMENT_HOURS: f32 = 3.0;
const INSPECTION_HOURS: f32 = 0.5;

fn round1(hours: f32) -> f32 {
    (hours * 10.0).round() / 10.0
}

/// Estimate labor hours for the defects across a set of image analyses.
pub fn estimate_work_hours(results: &[ImageAnalysisResult]) -> WorkEstimate {
    if results.is_empty() {
        return WorkEstimate {
            min_hours: 0.0,
            max_hours: 0.0,
            breakdown: vec![],
        };
    }

    let union: HashSet<Tag> = results.iter().flat_map(|r| r.tags.iter().copied()).collect();
    let mut breakdown = Vec::new();

    if union.contains(&Tag::Contamination) || union.contains(&Tag::WaterSpot) {
        breakdown.push(WorkItem {
            task: "Decontamination wash".to_string(),
            hours: DECONTAMINATION_HOURS,
        });
    }

    if union.contains(&Tag::Scratch) || union.contains(&Tag::Swirl) {
        // Deep marring in any single image warrants the full correction.
        let severe_scratching = results.iter().any(|r| {
            r.tags.contains(&Tag::Scratch) && r.severity == Some(Severity::Severe)
        });
        if severe_scratching {
            breakdown.push(WorkItem {
                task: "Three-step paint correction".to_string(),
                hours: THREE_STEP_POLISH_HOURS,
            });
        } else {
            breakdown.push(WorkItem {
                task: "Two-step polish".to_string(),
                hours: TWO_STEP_POLISH_HOURS,
            });
        }
    }

    if union.contains(&Tag::Oxidation) {
        breakdown.push(WorkItem {
            task: "Oxidation treatment".to_string(),
            hours: OXIDATION_TREATMENT_HOURS,
        });
    }

    if breakdown.is_empty() {
        breakdown.push(WorkItem {
            task: "Surface inspection".to_string(),
            hours: INSPECTION_HOURS,
        });
    }

    let total: f32 = breakdown.iter().map(|item| item.hours).sum();

    WorkEstimate {
        min_hours: round1(total * 0.8),
        max_hours: round1(total * 1.2),
        breakdown,
    }
}
