//! Vehicle photo analysis.
//!
//! A `VisionBackend` produces the raw tag observation for an image; this
//! module turns that observation into an immutable `ImageAnalysisResult`
//! through fixed, deterministic mapping tables (severity, per-tag analysis
//! sentences, per-tag recommendations). The tables are unit-testable
//! independent of any backend.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;
use uuid::Uuid;

use crate::error::EngineError;
use crate::vision::{TagObservation, VisionBackend};

/// Closed vocabulary of surface/condition labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Scratch,
    Swirl,
    Dent,
    Chip,
    Oxidation,
    WaterSpot,
    Contamination,
    Clean,
    Coated,
    Polished,
}

/// The full vocabulary, in declaration order.
pub const ALL_TAGS: [Tag; 10] = [
    Tag::Scratch,
    Tag::Swirl,
    Tag::Dent,
    Tag::Chip,
    Tag::Oxidation,
    Tag::WaterSpot,
    Tag::Contamination,
    Tag::Clean,
    Tag::Coated,
    Tag::Polished,
];

impl Tag {
    /// Whether this tag describes a surface defect.
    pub fn is_defect(&self) -> bool {
        !matches!(self, Tag::Clean | Tag::Coated | Tag::Polished)
    }

    /// Parse a provider tag string (snake_case vocabulary).
    pub fn parse(s: &str) -> Option<Tag> {
        match s {
            "scratch" => Some(Tag::Scratch),
            "swirl" => Some(Tag::Swirl),
            "dent" => Some(Tag::Dent),
            "chip" => Some(Tag::Chip),
            "oxidation" => Some(Tag::Oxidation),
            "water_spot" => Some(Tag::WaterSpot),
            "contamination" => Some(Tag::Contamination),
            "clean" => Some(Tag::Clean),
            "coated" => Some(Tag::Coated),
            "polished" => Some(Tag::Polished),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tag::Scratch => "scratch",
            Tag::Swirl => "swirl",
            Tag::Dent => "dent",
            Tag::Chip => "chip",
            Tag::Oxidation => "oxidation",
            Tag::WaterSpot => "water_spot",
            Tag::Contamination => "contamination",
            Tag::Clean => "clean",
            Tag::Coated => "coated",
            Tag::Polished => "polished",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ordinal defect seriousness. Derived from tags, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

/// Context the inspection is performed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionType {
    General,
    PreCoating,
    PostCoating,
    Maintenance,
}

impl InspectionType {
    pub fn label(&self) -> &'static str {
        match self {
            InspectionType::General => "general",
            InspectionType::PreCoating => "pre_coating",
            InspectionType::PostCoating => "post_coating",
            InspectionType::Maintenance => "maintenance",
        }
    }
}

/// Section of the vehicle an image covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleSection {
    Hood,
    Roof,
    Doors,
    FrontBumper,
    RearBumper,
    Fenders,
    Trunk,
}

impl VehicleSection {
    /// Parse a provider section string (snake_case vocabulary).
    pub fn parse(s: &str) -> Option<VehicleSection> {
        match s {
            "hood" => Some(VehicleSection::Hood),
            "roof" => Some(VehicleSection::Roof),
            "doors" => Some(VehicleSection::Doors),
            "front_bumper" => Some(VehicleSection::FrontBumper),
            "rear_bumper" => Some(VehicleSection::RearBumper),
            "fenders" => Some(VehicleSection::Fenders),
            "trunk" => Some(VehicleSection::Trunk),
            _ => None,
        }
    }
}

/// Analysis of one vehicle photo. Immutable and independent of other images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisResult {
    pub id: String,
    pub image_url: String,
    pub tags: Vec<Tag>,
    /// Backend confidence, 0.0 - 1.0.
    pub confidence: f32,
    pub analysis: String,
    pub vehicle_section: Option<VehicleSection>,
    pub severity: Option<Severity>,
    pub recommendations: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Severity contribution of a single tag, `None` for non-defect tags.
pub fn tag_severity(tag: Tag) -> Option<Severity> {
    match tag {
        Tag::Dent | Tag::Chip => Some(Severity::Severe),
        Tag::Scratch | Tag::Oxidation => Some(Severity::Moderate),
        Tag::Swirl | Tag::WaterSpot | Tag::Contamination => Some(Severity::Minor),
        Tag::Clean | Tag::Coated | Tag::Polished => None,
    }
}

/// Overall severity for a tag set: the worst single-tag severity, or `None`
/// when no defect tag is present.
pub fn overall_severity(tags: &[Tag]) -> Option<Severity> {
    tags.iter().filter_map(|t| tag_severity(*t)).max()
}

fn tag_sentence(tag: Tag) -> &'static str {
    match tag {
        Tag::Scratch => "Visible scratches in the clear coat.",
        Tag::Swirl => "Swirl marks from improper washing.",
        Tag::Dent => "A dent in the panel surface.",
        Tag::Chip => "Stone chips in the paint.",
        Tag::Oxidation => "Oxidized, faded paint.",
        Tag::WaterSpot => "Mineral water spots etched into the surface.",
        Tag::Contamination => "Bonded contamination on the surface.",
        Tag::Clean => "The surface is clean.",
        Tag::Coated => "An existing protective coating is present.",
        Tag::Polished => "The paint has been machine polished.",
    }
}

fn tag_recommendation(tag: Tag) -> Option<&'static str> {
    match tag {
        Tag::Scratch => Some("Polishing to remove clear coat scratches"),
        Tag::Swirl => Some("Machine polish to remove swirl marks"),
        Tag::Dent => Some("Professional dent assessment"),
        Tag::Chip => Some("Touch-up of stone chips"),
        Tag::Oxidation => Some("Oxidation treatment and paint correction"),
        Tag::WaterSpot => Some("Chemical decontamination of water spots"),
        Tag::Contamination => Some("Clay bar decontamination"),
        Tag::Clean | Tag::Coated | Tag::Polished => None,
    }
}

const GOOD_CONDITION_RECOMMENDATION: &str =
    "Surface is in good condition, no corrective work needed";

/// Build the immutable result from a backend observation.
///
/// Pure: every field except id/timestamp is a deterministic function of the
/// inputs. The vehicle section is only attached for coating inspections.
fn compose_result(
    image_url: &str,
    inspection: InspectionType,
    observation: TagObservation,
) -> ImageAnalysisResult {
    let severity = overall_severity(&observation.tags);

    let analysis = observation
        .tags
        .iter()
        .map(|t| tag_sentence(*t))
        .collect::<Vec<_>>()
        .join(" ");

    let mut recommendations: Vec<String> = observation
        .tags
        .iter()
        .filter_map(|t| tag_recommendation(*t))
        .map(String::from)
        .collect();
    if recommendations.is_empty() {
        recommendations.push(GOOD_CONDITION_RECOMMENDATION.to_string());
    }

    let vehicle_section = match inspection {
        InspectionType::PreCoating | InspectionType::PostCoating => observation.section,
        _ => None,
    };

    ImageAnalysisResult {
        id: Uuid::new_v4().to_string(),
        image_url: image_url.to_string(),
        tags: observation.tags,
        confidence: observation.confidence,
        analysis,
        vehicle_section,
        severity,
        recommendations,
        analyzed_at: Utc::now(),
    }
}

/// Photo analyzer delegating tag detection to a `VisionBackend`.
pub struct ImageTagger {
    backend: Arc<dyn VisionBackend>,
    call_timeout: Duration,
}

impl ImageTagger {
    pub fn new(backend: Arc<dyn VisionBackend>, call_timeout: Duration) -> Self {
        Self {
            backend,
            call_timeout,
        }
    }

    /// Analyze one image in the given inspection context.
    ///
    /// Backend failures and timeouts are surfaced as errors; the tagger
    /// never fabricates a tag set.
    pub async fn analyze(
        &self,
        image_url: &str,
        inspection: InspectionType,
    ) -> Result<ImageAnalysisResult, EngineError> {
        let observation = timeout(self.call_timeout, self.backend.classify(image_url, inspection))
            .await??;
        debug!(image_url, tags = ?observation.tags, "image classified");
        Ok(compose_result(image_url, inspection, observation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(tags: Vec<Tag>) -> TagObservation {
        TagObservation {
            tags,
            confidence: 0.9,
            section: Some(VehicleSection::Hood),
        }
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(tag_severity(Tag::Dent), Some(Severity::Severe));
        assert_eq!(tag_severity(Tag::Chip), Some(Severity::Severe));
        assert_eq!(tag_severity(Tag::Scratch), Some(Severity::Moderate));
        assert_eq!(tag_severity(Tag::Oxidation), Some(Severity::Moderate));
        assert_eq!(tag_severity(Tag::Swirl), Some(Severity::Minor));
        assert_eq!(tag_severity(Tag::WaterSpot), Some(Severity::Minor));
        assert_eq!(tag_severity(Tag::Contamination), Some(Severity::Minor));
        assert_eq!(tag_severity(Tag::Clean), None);
        assert_eq!(tag_severity(Tag::Coated), None);
        assert_eq!(tag_severity(Tag::Polished), None);
    }

    #[test]
    fn test_overall_severity_is_worst_tag() {
        assert_eq!(overall_severity(&[Tag::Swirl, Tag::Dent]), Some(Severity::Severe));
        assert_eq!(overall_severity(&[Tag::Swirl, Tag::Scratch]), Some(Severity::Moderate));
        assert_eq!(overall_severity(&[Tag::Clean, Tag::Coated]), None);
        assert_eq!(overall_severity(&[]), None);
    }

    #[test]
    fn test_compose_clean_image() {
        let result = compose_result(
            "https://img.example/1.jpg",
            InspectionType::General,
            observation(vec![Tag::Clean]),
        );

        assert_eq!(result.severity, None);
        assert_eq!(result.recommendations, vec![GOOD_CONDITION_RECOMMENDATION.to_string()]);
        assert_eq!(result.analysis, "The surface is clean.");
        // Section is only attached for coating inspections.
        assert_eq!(result.vehicle_section, None);
    }

    #[test]
    fn test_compose_defect_image() {
        let result = compose_result(
            "https://img.example/2.jpg",
            InspectionType::PreCoating,
            observation(vec![Tag::Scratch, Tag::Swirl]),
        );

        assert_eq!(result.severity, Some(Severity::Moderate));
        assert_eq!(result.vehicle_section, Some(VehicleSection::Hood));
        assert_eq!(result.recommendations.len(), 2);
        assert!(result.analysis.contains("scratches"));
        assert!(result.analysis.contains("Swirl marks"));
    }

    #[test]
    fn test_defect_class_matches_severity_table() {
        for tag in ALL_TAGS {
            assert_eq!(tag.is_defect(), tag_severity(tag).is_some(), "tag {}", tag);
        }
    }

    #[test]
    fn test_tag_parse_round_trip() {
        for tag in ALL_TAGS {
            assert_eq!(Tag::parse(tag.label()), Some(tag));
        }
        assert_eq!(Tag::parse("hologram"), None);
    }

    #[tokio::test]
    async fn test_tagger_uses_backend() {
        use crate::vision::ScriptedVisionBackend;

        let backend = ScriptedVisionBackend::new().with_observation(
            "https://img.example/3.jpg",
            observation(vec![Tag::Dent]),
        );
        let tagger = ImageTagger::new(Arc::new(backend), Duration::from_secs(5));

        let result = tagger
            .analyze("https://img.example/3.jpg", InspectionType::General)
            .await
            .expect("analysis");

        assert_eq!(result.tags, vec![Tag::Dent]);
        assert_eq!(result.severity, Some(Severity::Severe));
    }
}
