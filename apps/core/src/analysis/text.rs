//! Free-text analysis of customer messages.
//!
//! Combines keyword classification and entity extraction into a single
//! immutable result, and attaches a suggested reply template for the
//! detected intent. Unmatched input degrades to the most generic category
//! in each dimension; this component never fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::{Entity, EntityExtractor};
use super::intent::{Intent, KeywordClassifier, Sentiment, ServiceCategory, Urgency};

/// Complete analysis of one customer message. Fields are fixed at
/// construction and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisResult {
    pub id: String,
    pub original_text: String,
    pub intent: Intent,
    pub service_interest: Option<ServiceCategory>,
    pub urgency: Urgency,
    pub sentiment: Sentiment,
    pub entities: Vec<Entity>,
    pub suggested_response: Option<String>,
    pub analyzed_at: DateTime<Utc>,
}

impl TextAnalysisResult {
    /// One-line description for logging.
    pub fn summary(&self) -> String {
        format!(
            "Intent: {}, Service: {}, Urgency: {}, Sentiment: {}, Entities: {}",
            self.intent,
            self.service_interest.map(|s| s.label()).unwrap_or("-"),
            self.urgency.label(),
            self.sentiment.label(),
            self.entities.len()
        )
    }
}

/// Rule-based classifier for inbound free text.
pub struct TextClassifier {
    keywords: KeywordClassifier,
    entities: EntityExtractor,
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TextClassifier {
    pub fn new() -> Self {
        Self {
            keywords: KeywordClassifier::new(),
            entities: EntityExtractor::new(),
        }
    }

    /// Analyze a message and produce an immutable result.
    pub fn analyze(&self, text: &str) -> TextAnalysisResult {
        let normalized = text.trim();

        let intent = self.keywords.intent(normalized);
        let service_interest = self.keywords.service_interest(normalized);
        let urgency = self.keywords.urgency(normalized);
        let sentiment = self.keywords.sentiment(normalized);
        let entities = self.entities.extract(normalized);
        let suggested_response = Some(suggest_response(intent, service_interest));

        TextAnalysisResult {
            id: Uuid::new_v4().to_string(),
            original_text: text.to_string(),
            intent,
            service_interest,
            urgency,
            sentiment,
            entities,
            suggested_response,
            analyzed_at: Utc::now(),
        }
    }
}

/// Reply template for the final intent, with the detected service
/// interpolated where the template has a slot.
fn suggest_response(intent: Intent, service: Option<ServiceCategory>) -> String {
    match intent {
        Intent::Booking => match service {
            Some(s) => format!(
                "Takk for henvendelsen! Vi har ledige timer for {} denne uken. Hvilken dag passer best for deg?",
                s.label()
            ),
            None => "Takk for henvendelsen! Vi har ledige timer denne uken. Hvilken dag passer best for deg?".to_string(),
        },
        Intent::Inquiry => match service {
            Some(s) => format!(
                "Takk for interessen! Vi sender deg gjerne et uforpliktende pristilbud på {}.",
                s.label()
            ),
            None => "Takk for interessen! Vi sender deg gjerne et uforpliktende pristilbud på tjenestene våre.".to_string(),
        },
        Intent::Complaint => "Vi beklager opplevelsen din. Dette tar vi på alvor, og en av våre medarbeidere kontakter deg så snart som mulig.".to_string(),
        Intent::Support => "Takk for spørsmålet! Vi hjelper deg gjerne. Hva kan vi bistå med?".to_string(),
        Intent::Feedback => "Tusen takk for tilbakemeldingen! Det setter vi stor pris på.".to_string(),
        Intent::General => "Takk for meldingen! Vi svarer deg så snart vi kan.".to_string(),
    }
}
