//! Deterministic vision backend for tests.
//!
//! Returns pre-programmed observations per image URL. An unknown URL is a
//! provider error, which doubles as the failure-path fixture.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{TagObservation, VisionBackend};
use crate::analysis::image::InspectionType;
use crate::error::EngineError;

#[derive(Default)]
pub struct ScriptedVisionBackend {
    observations: HashMap<String, TagObservation>,
}

impl ScriptedVisionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the observation to return for an image URL.
    pub fn with_observation(mut self, image_url: &str, observation: TagObservation) -> Self {
        self.observations.insert(image_url.to_string(), observation);
        self
    }
}

#[async_trait]
impl VisionBackend for ScriptedVisionBackend {
    async fn classify(
        &self,
        image_url: &str,
        _inspection: InspectionType,
    ) -> Result<TagObservation, EngineError> {
        self.observations
            .get(image_url)
            .cloned()
            .ok_or_else(|| {
                EngineError::Provider(format!("no scripted observation for {}", image_url))
            })
    }
}
