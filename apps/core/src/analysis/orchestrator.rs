//! Message analysis orchestration.
//!
//! Fans out the text classification and one image analysis per URL
//! concurrently, joins all sub-results, then synthesizes a combined
//! summary and a single recommended next action. The terminal aggregate
//! is a complete, consistent snapshot: if any sub-call fails the whole
//! request fails and remaining in-flight calls are dropped, and dropping
//! the returned future cancels everything.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use url::Url;
use uuid::Uuid;
use validator::Validate;

use super::image::{ImageAnalysisResult, ImageTagger, InspectionType, Severity};
use super::intent::{Intent, Urgency};
use super::text::{TextAnalysisResult, TextClassifier};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::vision::{SimulatedVisionBackend, VisionBackend};

/// Raw inbound input for one analysis request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[validate(length(min = 1))]
    pub org_id: String,
    pub text: Option<String>,
    pub image_urls: Vec<String>,
    pub customer_id: Option<String>,
    pub conversation_id: Option<String>,
}

impl MessageRequest {
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            text: None,
            image_urls: vec![],
            customer_id: None,
            conversation_id: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_image_urls(mut self, urls: Vec<String>) -> Self {
        self.image_urls = urls;
        self
    }

    pub fn with_customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }
}

/// The single next action suggested to the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    OfferBookingSlots,
    EscalateToHuman,
    RecommendInspection,
    OfferCorrectionQuote,
    StandardFollowUp,
}

impl RecommendedAction {
    /// Returns a human-readable label for the action.
    pub fn label(&self) -> &'static str {
        match self {
            RecommendedAction::OfferBookingSlots => "Offer available slots and confirm the booking",
            RecommendedAction::EscalateToHuman => "Escalate to a human agent immediately",
            RecommendedAction::RecommendInspection => {
                "Recommend an in-person inspection and professional assessment"
            }
            RecommendedAction::OfferCorrectionQuote => "Offer a polish or repair quote",
            RecommendedAction::StandardFollowUp => "Follow up with standard customer service",
        }
    }
}

/// Terminal aggregate for one inbound message. Owns its sub-results by
/// value; nothing mutates it after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAnalysisResult {
    pub id: String,
    pub org_id: String,
    pub customer_id: Option<String>,
    pub conversation_id: Option<String>,
    pub text_analysis: Option<TextAnalysisResult>,
    pub image_analyses: Vec<ImageAnalysisResult>,
    pub summary: String,
    pub recommended_action: RecommendedAction,
    pub created_at: DateTime<Utc>,
}

/// Entry point for inbound-communication analysis.
///
/// Stateless between invocations; every call is a fresh computation over
/// explicit inputs.
pub struct AnalysisEngine {
    classifier: TextClassifier,
    tagger: ImageTagger,
    config: EngineConfig,
}

impl AnalysisEngine {
    /// Create an engine over the given vision backend.
    pub fn new(backend: Arc<dyn VisionBackend>, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let call_timeout = Duration::from_secs(config.provider_timeout_secs);
        Ok(Self {
            classifier: TextClassifier::new(),
            tagger: ImageTagger::new(backend, call_timeout),
            config,
        })
    }

    /// Create an engine over the randomly sampling stand-in backend.
    pub fn simulated() -> Self {
        let config = EngineConfig::default();
        let call_timeout = Duration::from_secs(config.provider_timeout_secs);
        Self {
            classifier: TextClassifier::new(),
            tagger: ImageTagger::new(Arc::new(SimulatedVisionBackend::new()), call_timeout),
            config,
        }
    }

    /// Classify a free-text message. Never fails; unmatched input degrades
    /// to the most generic category in each dimension.
    pub fn analyze_text(&self, text: &str) -> TextAnalysisResult {
        self.classifier.analyze(text)
    }

    /// Analyze one vehicle photo in the given inspection context.
    pub async fn analyze_image(
        &self,
        image_url: &str,
        inspection: InspectionType,
    ) -> Result<ImageAnalysisResult, EngineError> {
        self.tagger.analyze(image_url, inspection).await
    }

    /// Analyze a full inbound message: text and/or images.
    ///
    /// Text classification and all per-image calls run concurrently; the
    /// summary and recommended action are synthesized only after every
    /// sub-call has completed.
    #[instrument(skip(self, request), fields(org_id = %request.org_id, images = request.image_urls.len()))]
    pub async fn analyze_message(
        &self,
        request: MessageRequest,
    ) -> Result<MessageAnalysisResult, EngineError> {
        request.validate()?;
        if request.image_urls.len() > self.config.max_images {
            return Err(EngineError::Validation(format!(
                "too many images: {} (max {})",
                request.image_urls.len(),
                self.config.max_images
            )));
        }
        for url in &request.image_urls {
            Url::parse(url)?;
        }

        let text_future = async {
            request.text.as_deref().map(|t| self.classifier.analyze(t))
        };
        let images_future = try_join_all(
            request
                .image_urls
                .iter()
                .map(|url| self.tagger.analyze(url, InspectionType::General)),
        );

        let (text_analysis, image_analyses) = tokio::join!(text_future, images_future);
        let image_analyses = image_analyses?;

        if let Some(text) = &text_analysis {
            info!(summary = %text.summary(), "text classified");
        }

        let summary = build_summary(text_analysis.as_ref(), &image_analyses);
        let recommended_action = recommend_action(text_analysis.as_ref(), &image_analyses);
        info!(action = recommended_action.label(), "message analyzed");

        Ok(MessageAnalysisResult {
            id: Uuid::new_v4().to_string(),
            org_id: request.org_id,
            customer_id: request.customer_id,
            conversation_id: request.conversation_id,
            text_analysis,
            image_analyses,
            summary,
            recommended_action,
            created_at: Utc::now(),
        })
    }
}

/// Ordered concatenation of the summary sentences.
fn build_summary(
    text: Option<&TextAnalysisResult>,
    images: &[ImageAnalysisResult],
) -> String {
    let mut sentences = Vec::new();

    if let Some(text) = text {
        sentences.push(format!("Customer message classified as {}.", text.intent.label()));
        if let Some(service) = text.service_interest {
            sentences.push(format!("The customer asks about {}.", service.label()));
        }
        if text.urgency != Urgency::Low {
            sentences.push(format!("Urgency is {}.", text.urgency.label()));
        }
    }

    let defects = images.iter().filter(|i| i.severity.is_some()).count();
    if defects > 0 {
        sentences.push(format!(
            "Analyzed {} image(s); defects found in {}.",
            images.len(),
            defects
        ));
    } else {
        sentences.push(format!("Analyzed {} image(s); no defects found.", images.len()));
    }

    sentences.join(" ")
}

/// Fixed priority cascade, first match wins. Text signals outrank image
/// severity: booking and complaint intents are evaluated before any
/// severity check.
fn recommend_action(
    text: Option<&TextAnalysisResult>,
    images: &[ImageAnalysisResult],
) -> RecommendedAction {
    if let Some(text) = text {
        match text.intent {
            Intent::Booking => return RecommendedAction::OfferBookingSlots,
            Intent::Complaint => return RecommendedAction::EscalateToHuman,
            _ => {}
        }
    }

    if images.iter().any(|i| i.severity == Some(Severity::Severe)) {
        return RecommendedAction::RecommendInspection;
    }
    if images.iter().any(|i| i.severity == Some(Severity::Moderate)) {
        return RecommendedAction::OfferCorrectionQuote;
    }

    RecommendedAction::StandardFollowUp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::image::Tag;

    fn text_result(intent: Intent) -> TextAnalysisResult {
        let classifier = TextClassifier::new();
        let text = match intent {
            Intent::Booking => "jeg vil bestille time",
            Intent::Complaint => "jeg vil klage",
            _ => "hei",
        };
        let result = classifier.analyze(text);
        assert_eq!(result.intent, intent);
        result
    }

    fn image_result(severity: Option<Severity>) -> ImageAnalysisResult {
        ImageAnalysisResult {
            id: "test".to_string(),
            image_url: "https://img.example/x.jpg".to_string(),
            tags: vec![Tag::Clean],
            confidence: 0.9,
            analysis: String::new(),
            vehicle_section: None,
            severity,
            recommendations: vec![],
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_cascade_booking_outranks_severe_images() {
        let text = text_result(Intent::Booking);
        let images = vec![image_result(Some(Severity::Severe))];

        let action = recommend_action(Some(&text), &images);
        assert_eq!(action, RecommendedAction::OfferBookingSlots);
    }

    #[test]
    fn test_cascade_complaint_outranks_severe_images() {
        let text = text_result(Intent::Complaint);
        let images = vec![image_result(Some(Severity::Severe))];

        let action = recommend_action(Some(&text), &images);
        assert_eq!(action, RecommendedAction::EscalateToHuman);
    }

    #[test]
    fn test_cascade_severity_branches() {
        let action = recommend_action(None, &[image_result(Some(Severity::Severe))]);
        assert_eq!(action, RecommendedAction::RecommendInspection);

        let action = recommend_action(None, &[image_result(Some(Severity::Moderate))]);
        assert_eq!(action, RecommendedAction::OfferCorrectionQuote);

        let action = recommend_action(None, &[image_result(Some(Severity::Minor))]);
        assert_eq!(action, RecommendedAction::StandardFollowUp);
    }

    #[test]
    fn test_cascade_default() {
        let action = recommend_action(None, &[]);
        assert_eq!(action, RecommendedAction::StandardFollowUp);
    }

    #[test]
    fn test_summary_sentence_order() {
        let text = text_result(Intent::Booking);
        let images = vec![image_result(Some(Severity::Moderate)), image_result(None)];

        let summary = build_summary(Some(&text), &images);

        assert!(summary.starts_with("Customer message classified as booking."));
        assert!(summary.ends_with("Analyzed 2 image(s); defects found in 1."));
    }

    #[test]
    fn test_summary_omits_low_urgency() {
        let text = text_result(Intent::Booking);
        let summary = build_summary(Some(&text), &[]);

        assert!(!summary.contains("Urgency"));
    }
}
