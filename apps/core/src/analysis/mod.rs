//! # Analysis Module
//!
//! Turns raw inbound customer communication into structured, actionable
//! signals for the surrounding CRM.
//!
//! ## Components
//! - `intent`: keyword classification (intent, service, urgency, sentiment)
//! - `entities`: typed entity extraction (phone, email, date, time, vehicle)
//! - `text`: free-text analysis producing a `TextAnalysisResult`
//! - `image`: photo analysis producing an `ImageAnalysisResult`
//! - `condition`: 1-10 paint condition score over a set of image results
//! - `estimate`: labor-hour estimate over the same set
//! - `orchestrator`: concurrent fan-out/fan-in over text + images
//!
//! Every component is a pure function over explicit inputs; no state is
//! held between invocations.

pub mod condition;
pub mod entities;
pub mod estimate;
pub mod image;
pub mod intent;
pub mod orchestrator;
pub mod text;

pub use condition::{paint_condition_score, ConditionScore};
pub use entities::{Entity, EntityKind};
pub use estimate::{estimate_work_hours, WorkEstimate, WorkItem};
pub use image::{
    ImageAnalysisResult, ImageTagger, InspectionType, Severity, Tag, VehicleSection,
};
pub use intent::{Intent, KeywordClassifier, Sentiment, ServiceCategory, Urgency};
pub use orchestrator::{
    AnalysisEngine, MessageAnalysisResult, MessageRequest, RecommendedAction,
};
pub use text::{TextAnalysisResult, TextClassifier};
