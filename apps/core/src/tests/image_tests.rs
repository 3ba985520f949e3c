//! Image analysis tests against the deterministic backend.

use std::sync::Arc;
use std::time::Duration;

use crate::analysis::image::{ImageTagger, InspectionType, Severity, Tag, VehicleSection};
use crate::error::EngineError;
use crate::vision::{ScriptedVisionBackend, TagObservation};

fn observation(tags: Vec<Tag>, section: Option<VehicleSection>) -> TagObservation {
    TagObservation {
        tags,
        confidence: 0.88,
        section,
    }
}

fn tagger(backend: ScriptedVisionBackend) -> ImageTagger {
    ImageTagger::new(Arc::new(backend), Duration::from_secs(5))
}

#[tokio::test]
async fn test_defect_image_gets_severity_and_recommendations() {
    let backend = ScriptedVisionBackend::new().with_observation(
        "https://img.example/hood.jpg",
        observation(vec![Tag::Scratch, Tag::WaterSpot], None),
    );

    let result = tagger(backend)
        .analyze("https://img.example/hood.jpg", InspectionType::General)
        .await
        .expect("analysis");

    assert_eq!(result.severity, Some(Severity::Moderate));
    assert_eq!(result.tags.len(), 2);
    assert_eq!(result.recommendations.len(), 2);
    assert!(result.analysis.contains("scratches"));
    assert!((result.confidence - 0.88).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_clean_image_has_no_severity_but_a_recommendation() {
    let backend = ScriptedVisionBackend::new().with_observation(
        "https://img.example/clean.jpg",
        observation(vec![Tag::Clean, Tag::Coated], None),
    );

    let result = tagger(backend)
        .analyze("https://img.example/clean.jpg", InspectionType::General)
        .await
        .expect("analysis");

    assert_eq!(result.severity, None);
    assert!(
        !result.recommendations.is_empty(),
        "a zero-defect result must still carry a positive recommendation"
    );
    assert!(result.recommendations[0].contains("good condition"));
}

#[tokio::test]
async fn test_section_only_for_coating_inspections() {
    let backend = ScriptedVisionBackend::new()
        .with_observation(
            "https://img.example/a.jpg",
            observation(vec![Tag::Swirl], Some(VehicleSection::Roof)),
        )
        .with_observation(
            "https://img.example/b.jpg",
            observation(vec![Tag::Swirl], Some(VehicleSection::Roof)),
        );
    let tagger = tagger(backend);

    let general = tagger
        .analyze("https://img.example/a.jpg", InspectionType::General)
        .await
        .expect("analysis");
    assert_eq!(general.vehicle_section, None);

    let pre_coating = tagger
        .analyze("https://img.example/b.jpg", InspectionType::PreCoating)
        .await
        .expect("analysis");
    assert_eq!(pre_coating.vehicle_section, Some(VehicleSection::Roof));
}

#[tokio::test]
async fn test_backend_failure_is_surfaced() {
    let backend = ScriptedVisionBackend::new();

    let result = tagger(backend)
        .analyze("https://img.example/unknown.jpg", InspectionType::General)
        .await;

    assert!(matches!(result, Err(EngineError::Provider(_))));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    use async_trait::async_trait;

    struct StalledBackend;

    #[async_trait]
    impl crate::vision::VisionBackend for StalledBackend {
        async fn classify(
            &self,
            _image_url: &str,
            _inspection: InspectionType,
        ) -> Result<TagObservation, EngineError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("the tagger must time out first")
        }
    }

    tokio::time::pause();
    let tagger = ImageTagger::new(Arc::new(StalledBackend), Duration::from_millis(100));

    let result = tagger
        .analyze("https://img.example/slow.jpg", InspectionType::General)
        .await;

    assert!(matches!(result, Err(EngineError::Timeout(_))));
}
