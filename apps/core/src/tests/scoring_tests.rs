//! Condition score and labor estimate tests.

use chrono::Utc;

use crate::analysis::condition::paint_condition_score;
use crate::analysis::estimate::estimate_work_hours;
use crate::analysis::image::{ImageAnalysisResult, Severity, Tag};

fn image_result(tags: Vec<Tag>, severity: Option<Severity>) -> ImageAnalysisResult {
    ImageAnalysisResult {
        id: "test".to_string(),
        image_url: "https://img.example/x.jpg".to_string(),
        tags,
        confidence: 0.9,
        analysis: String::new(),
        vehicle_section: None,
        severity,
        recommendations: vec![],
        analyzed_at: Utc::now(),
    }
}

#[test]
fn test_score_of_empty_list_is_zero() {
    let score = paint_condition_score(&[]);
    assert_eq!(score.score, 0);
}

#[test]
fn test_score_of_all_clean_list_is_ten() {
    let results = vec![
        image_result(vec![Tag::Clean], None),
        image_result(vec![Tag::Coated], None),
        image_result(vec![Tag::Polished], None),
    ];
    assert_eq!(paint_condition_score(&results).score, 10);
}

#[test]
fn test_score_mixed_severities() {
    // round((3 + 8 + 10) / 3) = 7
    let results = vec![
        image_result(vec![Tag::Dent], Some(Severity::Severe)),
        image_result(vec![Tag::Swirl], Some(Severity::Minor)),
        image_result(vec![Tag::Clean], None),
    ];
    assert_eq!(paint_condition_score(&results).score, 7);
}

#[test]
fn test_estimate_of_empty_list_is_zero() {
    let estimate = estimate_work_hours(&[]);
    assert_eq!(estimate.min_hours, 0.0);
    assert_eq!(estimate.max_hours, 0.0);
    assert!(estimate.breakdown.is_empty());
}

#[test]
fn test_estimate_bounds_hold_for_any_defect_mix() {
    let mixes = vec![
        vec![image_result(vec![Tag::Scratch], Some(Severity::Moderate))],
        vec![image_result(vec![Tag::Contamination, Tag::Oxidation], Some(Severity::Minor))],
        vec![
            image_result(vec![Tag::Scratch, Tag::Dent], Some(Severity::Severe)),
            image_result(vec![Tag::WaterSpot], Some(Severity::Minor)),
        ],
        vec![image_result(vec![Tag::Clean], None)],
    ];

    for results in mixes {
        let estimate = estimate_work_hours(&results);
        let total: f32 = estimate.breakdown.iter().map(|i| i.hours).sum();

        assert!(estimate.min_hours <= estimate.max_hours);
        assert_eq!(estimate.min_hours, (total * 0.8 * 10.0).round() / 10.0);
        assert_eq!(estimate.max_hours, (total * 1.2 * 10.0).round() / 10.0);
        assert!(!estimate.breakdown.is_empty());
    }
}

#[test]
fn test_estimate_covers_every_defect_group() {
    let results = vec![
        image_result(vec![Tag::Contamination], Some(Severity::Minor)),
        image_result(vec![Tag::Scratch, Tag::Chip], Some(Severity::Severe)),
        image_result(vec![Tag::Oxidation], Some(Severity::Moderate)),
    ];

    let estimate = estimate_work_hours(&results);
    let tasks: Vec<&str> = estimate.breakdown.iter().map(|i| i.task.as_str()).collect();

    assert!(tasks.contains(&"Decontamination wash"));
    assert!(tasks.contains(&"Three-step paint correction"));
    assert!(tasks.contains(&"Oxidation treatment"));
}
