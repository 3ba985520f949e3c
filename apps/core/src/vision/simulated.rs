//! Simulated vision backend.
//!
//! Stand-in for a real vision model: samples 1-3 distinct tags, a
//! confidence value and a section candidate from a seedable RNG, and can
//! sleep a random latency to model an external-service call. A production
//! deployment replaces this with `RemoteVisionBackend`.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::time::{sleep, Duration};

use super::{TagObservation, VisionBackend};
use crate::analysis::image::{InspectionType, VehicleSection, ALL_TAGS};
use crate::error::EngineError;

const SECTIONS: [VehicleSection; 7] = [
    VehicleSection::Hood,
    VehicleSection::Roof,
    VehicleSection::Doors,
    VehicleSection::FrontBumper,
    VehicleSection::RearBumper,
    VehicleSection::Fenders,
    VehicleSection::Trunk,
];

/// Randomly sampling backend with optional simulated latency.
pub struct SimulatedVisionBackend {
    rng: Mutex<StdRng>,
    latency_ms: Option<(u64, u64)>,
}

impl Default for SimulatedVisionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedVisionBackend {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            latency_ms: None,
        }
    }

    /// Seeded constructor for reproducible sampling.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            latency_ms: None,
        }
    }

    /// Sleep a random duration in `[min_ms, max_ms]` before answering.
    pub fn with_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.latency_ms = Some((min_ms, max_ms));
        self
    }
}

#[async_trait]
impl VisionBackend for SimulatedVisionBackend {
    async fn classify(
        &self,
        _image_url: &str,
        _inspection: InspectionType,
    ) -> Result<TagObservation, EngineError> {
        // Sample everything under the lock, then release it before sleeping
        // so concurrent calls are not serialized by the latency.
        let (delay, observation) = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| EngineError::Internal("rng lock poisoned".to_string()))?;

            let delay = self
                .latency_ms
                .map(|(min, max)| Duration::from_millis(rng.gen_range(min..=max)));

            let tag_count = rng.gen_range(1..=3);
            let tags = ALL_TAGS
                .choose_multiple(&mut *rng, tag_count)
                .copied()
                .collect();
            let confidence = rng.gen_range(0.72..=0.97);
            let section = SECTIONS.choose(&mut *rng).copied();

            (
                delay,
                TagObservation {
                    tags,
                    confidence,
                    section,
                },
            )
        };

        if let Some(delay) = delay {
            sleep(delay).await;
        }

        Ok(observation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sampled_tags_are_distinct_and_bounded() {
        let backend = SimulatedVisionBackend::with_seed(7);

        for _ in 0..50 {
            let observation = backend
                .classify("https://img.example/a.jpg", InspectionType::General)
                .await
                .expect("observation");

            assert!(!observation.tags.is_empty() && observation.tags.len() <= 3);
            let mut deduped = observation.tags.clone();
            deduped.sort_by_key(|t| t.label());
            deduped.dedup();
            assert_eq!(deduped.len(), observation.tags.len(), "tags must be distinct");
            assert!((0.72..=0.97).contains(&observation.confidence));
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_samples() {
        let first = SimulatedVisionBackend::with_seed(42);
        let second = SimulatedVisionBackend::with_seed(42);

        for _ in 0..10 {
            let a = first
                .classify("https://img.example/a.jpg", InspectionType::General)
                .await
                .expect("observation");
            let b = second
                .classify("https://img.example/a.jpg", InspectionType::General)
                .await
                .expect("observation");

            assert_eq!(a.tags, b.tags);
            assert_eq!(a.section, b.section);
        }
    }
}
