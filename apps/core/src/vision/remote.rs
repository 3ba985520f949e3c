//! HTTP vision backend.
//!
//! Calls a hosted vision-model API over REST. Non-success statuses,
//! timeouts and malformed payloads are surfaced as engine errors so the
//! orchestrator can decide what to do with the request; no tag set is ever
//! fabricated on failure.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::{TagObservation, VisionBackend};
use crate::analysis::image::{InspectionType, Tag, VehicleSection};
use crate::error::EngineError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire shape of a provider classification response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectionResponse {
    tags: Vec<String>,
    confidence: f32,
    #[serde(default)]
    vehicle_section: Option<String>,
}

/// Backend calling a remote vision-model endpoint.
pub struct RemoteVisionBackend {
    client: Client,
    endpoint: Url,
}

impl RemoteVisionBackend {
    /// Build a backend for the given provider base URL.
    ///
    /// The classification endpoint is `<base>/v1/inspections`. When an API
    /// key is given it is sent as a bearer token.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, EngineError> {
        let endpoint = Url::parse(base_url)?.join("v1/inspections")?;

        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| EngineError::Validation(format!("Invalid API key: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn parse_observation(&self, response: InspectionResponse) -> Result<TagObservation, EngineError> {
        let tags = response
            .tags
            .iter()
            .map(|s| {
                Tag::parse(s).ok_or_else(|| {
                    EngineError::Provider(format!("unknown tag in model response: {}", s))
                })
            })
            .collect::<Result<Vec<Tag>, EngineError>>()?;

        if tags.is_empty() {
            return Err(EngineError::Provider(
                "model response contained no tags".to_string(),
            ));
        }

        let section = match response.vehicle_section.as_deref() {
            Some(s) => Some(VehicleSection::parse(s).ok_or_else(|| {
                EngineError::Provider(format!("unknown vehicle section in model response: {}", s))
            })?),
            None => None,
        };

        Ok(TagObservation {
            tags,
            confidence: response.confidence,
            section,
        })
    }
}

#[async_trait]
impl VisionBackend for RemoteVisionBackend {
    async fn classify(
        &self,
        image_url: &str,
        inspection: InspectionType,
    ) -> Result<TagObservation, EngineError> {
        let body = json!({
            "imageUrl": image_url,
            "inspectionType": inspection.label(),
        });

        debug!(image_url, endpoint = %self.endpoint, "calling vision provider");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(image_url, %status, "vision provider returned an error status");
            return Err(EngineError::Provider(format!(
                "vision provider returned {}",
                status
            )));
        }

        let payload: InspectionResponse = response.json().await?;
        self.parse_observation(payload)
    }
}
