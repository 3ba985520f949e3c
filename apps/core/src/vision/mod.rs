//! # Vision Module
//!
//! The boundary to the image-classification model.
//!
//! ## Components
//! - `VisionBackend`: the swappable backend interface
//! - `simulated`: seedable random stand-in for local use
//! - `scripted`: deterministic test double with pre-programmed observations
//! - `remote`: HTTP client against a hosted vision-model API
//!
//! Backends only report what they saw; everything derived from an
//! observation (severity, analysis text, recommendations) is computed by
//! deterministic tables in `analysis::image`.

pub mod remote;
pub mod scripted;
pub mod simulated;

use async_trait::async_trait;

use crate::analysis::image::{InspectionType, Tag, VehicleSection};
use crate::error::EngineError;

pub use remote::RemoteVisionBackend;
pub use scripted::ScriptedVisionBackend;
pub use simulated::SimulatedVisionBackend;

/// Raw observation reported by a backend for one image.
#[derive(Debug, Clone)]
pub struct TagObservation {
    /// 1-3 distinct tags from the closed vocabulary.
    pub tags: Vec<Tag>,
    /// Model confidence, 0.0 - 1.0.
    pub confidence: f32,
    /// Section candidate; only attached to results for coating inspections.
    pub section: Option<VehicleSection>,
}

/// Defines the public interface for an image-classification backend.
///
/// This trait abstracts the specific implementation of the vision model,
/// allowing different backends (simulated, remote API) to be used
/// interchangeably. Implementations must surface provider failures as
/// errors rather than fabricating a tag set.
#[async_trait]
pub trait VisionBackend: Send + Sync + 'static {
    /// Classify one image in the given inspection context.
    async fn classify(
        &self,
        image_url: &str,
        inspection: InspectionType,
    ) -> Result<TagObservation, EngineError>;
}
