//! DetailSense inbound analysis engine.
//!
//! Takes a customer's free-text message and/or a set of vehicle photo
//! references and turns them into structured signals: intent, urgency,
//! sentiment, extracted entities, surface-defect tags, severity, a paint
//! condition score, a labor estimate and one recommended next action.
//!
//! The surrounding product (booking, CRM, admin) calls [`AnalysisEngine`]
//! with raw input and persists whatever comes back; it never participates
//! in the classification itself.
//!
//! ```no_run
//! use detailsense_core::{AnalysisEngine, MessageRequest};
//!
//! # async fn demo() -> Result<(), detailsense_core::EngineError> {
//! let engine = AnalysisEngine::simulated();
//! let request = MessageRequest::new("org-123")
//!     .with_text("Hei, jeg vil bestille time for keramisk coating i morgen");
//! let result = engine.analyze_message(request).await?;
//! println!("{}", result.summary);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod vision;

pub use analysis::{
    estimate_work_hours, paint_condition_score, AnalysisEngine, ConditionScore, Entity,
    EntityKind, ImageAnalysisResult, ImageTagger, InspectionType, Intent, KeywordClassifier,
    MessageAnalysisResult, MessageRequest, RecommendedAction, Sentiment, ServiceCategory,
    Severity, Tag, TextAnalysisResult, TextClassifier, Urgency, VehicleSection, WorkEstimate,
    WorkItem,
};
pub use config::EngineConfig;
pub use error::EngineError;
pub use vision::{
    RemoteVisionBackend, ScriptedVisionBackend, SimulatedVisionBackend, TagObservation,
    VisionBackend,
};

#[cfg(test)]
mod tests;
