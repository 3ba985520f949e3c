//! Keyword classification of customer messages.
//!
//! Fast pattern-based detection of intent, service interest, urgency and
//! sentiment for NO and EN languages. No ML model required - pure Rust
//! regex matching.
//!
//! Every dimension is evaluated as an ordered list of keyword groups where
//! the first matching group wins. The ordering is part of the contract:
//! a message containing both booking and complaint keywords classifies as
//! booking because booking is tested first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Detected purpose of a customer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Wants to book an appointment ("bestill", "book", "time", "ledig").
    Booking,
    /// Asks about price or availability of a service.
    Inquiry,
    /// Unhappy with a delivered service or a damaged vehicle.
    Complaint,
    /// Needs help or has a practical question.
    Support,
    /// Positive feedback after a visit.
    Feedback,
    /// Anything else.
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Booking => "booking",
            Intent::Inquiry => "inquiry",
            Intent::Complaint => "complaint",
            Intent::Support => "support",
            Intent::Feedback => "feedback",
            Intent::General => "general",
        }
    }
}

/// How soon the customer expects a response or a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

/// Overall tone of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// Service the customer is asking about, from the shop's fixed catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    CeramicCoating,
    Polishing,
    CarWash,
    TireService,
    PaintProtectionFilm,
}

impl ServiceCategory {
    /// Returns the catalogue display name.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::CeramicCoating => "Keramisk coating",
            ServiceCategory::Polishing => "Polering",
            ServiceCategory::CarWash => "Bilvask",
            ServiceCategory::TireService => "Dekkhotell / Dekkskift",
            ServiceCategory::PaintProtectionFilm => "Lakkbeskyttelsesfolie (PPF)",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Compiled once at first use. A hand-written pattern that fails to compile is
// a programming error, so expect() is acceptable here.
static BOOKING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(bestill\w*|book\w*|ledig\w*|avtale\w*)\b")
            .expect("Invalid regex: booking verbs"),
        Regex::new(r"(?i)\b(time(?:r|n|avtale)?|appointment|schedule)\b")
            .expect("Invalid regex: booking nouns"),
    ]
});

static INQUIRY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(pris\w*|koste\w*|kostnad\w*|tilbud\w*|price|cost\w*|quote)\b")
            .expect("Invalid regex: price words"),
        Regex::new(r"(?i)\b(hvor mye|how much)\b").expect("Invalid regex: price phrases"),
    ]
});

static COMPLAINT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(klage\w*|reklamasjon\w*|misfornøyd|uakseptabel\w*|complaint|unacceptable)\b")
            .expect("Invalid regex: complaint words"),
        Regex::new(r"(?i)\b(skad\w*|ødelagt|dårlig\w*|riper etter|damaged?)\b")
            .expect("Invalid regex: damage words"),
    ]
});

static SUPPORT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(hjelp\w*|support|spørsmål|usikker\w*|help|question\w*)\b")
            .expect("Invalid regex: support words"),
        Regex::new(r"(?i)\b(hvordan|how do|how can)\b").expect("Invalid regex: how-to phrases"),
    ]
});

static FEEDBACK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(takk\w*|fornøyd|anbefal\w*|fantastisk|strålende|perfekt|thank\w*|great|awesome)\b")
            .expect("Invalid regex: praise words"),
        Regex::new(r"(?i)\b(bra jobbet|godt jobbet|well done)\b")
            .expect("Invalid regex: praise phrases"),
    ]
});

static COATING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"(?i)\b(keramisk|keramikk|coating|ceramic)\b")
        .expect("Invalid regex: coating words")]
});

static POLISH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"(?i)\b(poler\w*|polish\w*)\b").expect("Invalid regex: polish words")]
});

static WASH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"(?i)\b(\w*vask\w*|wash\w*)\b").expect("Invalid regex: wash words")]
});

static TIRE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"(?i)\b(dekk\w*|hjul\w*|tires?|wheels?)\b")
        .expect("Invalid regex: tire words")]
});

static FILM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"(?i)\b(folie\w*|ppf|lakkbeskyttelse\w*|film)\b")
        .expect("Invalid regex: film words")]
});

static URGENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(haster|raskt|akutt|umiddelbart|asap|urgent)\b")
            .expect("Invalid regex: urgency words"),
        Regex::new(r"(?i)\b(i dag|nå|så fort som mulig|right away|today)\b")
            .expect("Invalid regex: urgency phrases"),
    ]
});

static NEAR_TERM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"(?i)\b(denne uken|neste uke|i morgen|snart|this week|tomorrow)\b")
        .expect("Invalid regex: near-term phrases")]
});

static POSITIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(
        r"(?i)\b(takk\w*|fornøyd|flott|fantastisk|strålende|perfekt|glad|bra|elsker|happy|great|excellent|amazing|love)\b",
    )
    .expect("Invalid regex: positive words")]
});

static NEGATIVE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(
        r"(?i)\b(uakseptabel\w*|dårlig\w*|misfornøyd|skuffet|sint|irritert|skad\w*|ødelagt|forferdelig|elendig|bad|terrible|awful|angry|disappointed)\b",
    )
    .expect("Invalid regex: negative words")]
});

/// Ordered keyword group for one classification outcome.
struct KeywordGroup<T> {
    outcome: T,
    patterns: &'static LazyLock<Vec<Regex>>,
}

impl<T> KeywordGroup<T> {
    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Classifier over the fixed keyword vocabulary.
pub struct KeywordClassifier {
    intents: Vec<KeywordGroup<Intent>>,
    services: Vec<KeywordGroup<ServiceCategory>>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordClassifier {
    /// Create a classifier with the groups in contract order.
    pub fn new() -> Self {
        let intents = vec![
            KeywordGroup { outcome: Intent::Booking, patterns: &BOOKING_PATTERNS },
            KeywordGroup { outcome: Intent::Inquiry, patterns: &INQUIRY_PATTERNS },
            KeywordGroup { outcome: Intent::Complaint, patterns: &COMPLAINT_PATTERNS },
            KeywordGroup { outcome: Intent::Support, patterns: &SUPPORT_PATTERNS },
            KeywordGroup { outcome: Intent::Feedback, patterns: &FEEDBACK_PATTERNS },
        ];
        let services = vec![
            KeywordGroup { outcome: ServiceCategory::CeramicCoating, patterns: &COATING_PATTERNS },
            KeywordGroup { outcome: ServiceCategory::Polishing, patterns: &POLISH_PATTERNS },
            KeywordGroup { outcome: ServiceCategory::CarWash, patterns: &WASH_PATTERNS },
            KeywordGroup { outcome: ServiceCategory::TireService, patterns: &TIRE_PATTERNS },
            KeywordGroup { outcome: ServiceCategory::PaintProtectionFilm, patterns: &FILM_PATTERNS },
        ];
        Self { intents, services }
    }

    /// Classify the intent of a message. Falls back to `General`.
    pub fn intent(&self, text: &str) -> Intent {
        self.intents
            .iter()
            .find(|g| g.matches(text))
            .map(|g| g.outcome)
            .unwrap_or(Intent::General)
    }

    /// Detect which catalogue service the message is about, if any.
    pub fn service_interest(&self, text: &str) -> Option<ServiceCategory> {
        self.services.iter().find(|g| g.matches(text)).map(|g| g.outcome)
    }

    /// Detect urgency. Immediacy keywords outrank near-term keywords.
    pub fn urgency(&self, text: &str) -> Urgency {
        if URGENT_PATTERNS.iter().any(|p| p.is_match(text)) {
            Urgency::High
        } else if NEAR_TERM_PATTERNS.iter().any(|p| p.is_match(text)) {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    /// Detect sentiment. The positive check precedes the negative check.
    pub fn sentiment(&self, text: &str) -> Sentiment {
        if POSITIVE_PATTERNS.iter().any(|p| p.is_match(text)) {
            Sentiment::Positive
        } else if NEGATIVE_PATTERNS.iter().any(|p| p.is_match(text)) {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}
