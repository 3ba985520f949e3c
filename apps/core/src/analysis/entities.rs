//! Entity extraction from customer messages.
//!
//! Each entity kind is attempted independently with its own regex pass;
//! a hit is emitted with a fixed confidence constant per kind. Extraction
//! never fails - a message without entities yields an empty list.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Closed vocabulary of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Date,
    Time,
    Vehicle,
    Service,
    Location,
    Name,
    Phone,
    Email,
}

/// A typed span extracted from text. Extracted once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
    /// Confidence score, 0-100.
    pub confidence: u8,
}

const PHONE_CONFIDENCE: u8 = 90;
const EMAIL_CONFIDENCE: u8 = 95;
const DATE_CONFIDENCE: u8 = 75;
const TIME_CONFIDENCE: u8 = 80;
const VEHICLE_CONFIDENCE: u8 = 70;

static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Norwegian mobile grouping: 987 65 432, optionally +47 prefixed.
        Regex::new(r"(?:\+47\s?)?\b\d{3}\s?\d{2}\s?\d{3}\b")
            .expect("Invalid regex: phone 3-2-3 grouping"),
        // Landline grouping: 22 12 34 56.
        Regex::new(r"(?:\+47\s?)?\b\d{2}\s?\d{2}\s?\d{2}\s?\d{2}\b")
            .expect("Invalid regex: phone 2-2-2-2 grouping"),
    ]
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("Invalid regex: email pattern")
});

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b\d{1,2}[./]\d{1,2}(?:[./]\d{2,4})?\b")
            .expect("Invalid regex: numeric date"),
        Regex::new(r"(?i)\b(mandag|tirsdag|onsdag|torsdag|fredag|lørdag|søndag)\b")
            .expect("Invalid regex: weekday names"),
        Regex::new(r"(?i)\b(i dag|i morgen|i overmorgen|i kveld)\b")
            .expect("Invalid regex: relative days"),
    ]
});

static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bkl\.?\s?\d{1,2}[:.]\d{2}\b").expect("Invalid regex: kl-prefixed time"),
        Regex::new(r"\b\d{1,2}:\d{2}\b").expect("Invalid regex: bare HH:MM"),
    ]
});

static VEHICLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i)\b(tesla|volvo|bmw|audi|mercedes|volkswagen|vw|toyota|ford|skoda|nissan|porsche|peugeot|kia|hyundai|mazda|subaru|opel|renault|polestar|seat|suzuki|mitsubishi|lexus)\b",
        )
        .expect("Invalid regex: vehicle brands"),
        // Norwegian plate shape: two uppercase letters + five digits.
        Regex::new(r"\b[A-Z]{2} ?\d{5}\b").expect("Invalid regex: plate shape"),
    ]
});

/// Extractor running all entity passes over a message.
pub struct EntityExtractor;

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run every entity pass and collect the hits.
    ///
    /// Phone, date, time and vehicle passes emit the first match of the
    /// first pattern that hits; the email pass emits every address found.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        if let Some(value) = first_match(&PHONE_PATTERNS, text) {
            entities.push(Entity {
                kind: EntityKind::Phone,
                value,
                confidence: PHONE_CONFIDENCE,
            });
        }

        for m in EMAIL_PATTERN.find_iter(text) {
            entities.push(Entity {
                kind: EntityKind::Email,
                value: m.as_str().to_string(),
                confidence: EMAIL_CONFIDENCE,
            });
        }

        if let Some(value) = first_match(&DATE_PATTERNS, text) {
            entities.push(Entity {
                kind: EntityKind::Date,
                value,
                confidence: DATE_CONFIDENCE,
            });
        }

        if let Some(value) = first_match(&TIME_PATTERNS, text) {
            entities.push(Entity {
                kind: EntityKind::Time,
                value,
                confidence: TIME_CONFIDENCE,
            });
        }

        if let Some(value) = first_match(&VEHICLE_PATTERNS, text) {
            entities.push(Entity {
                kind: EntityKind::Vehicle,
                value,
                confidence: VEHICLE_CONFIDENCE,
            });
        }

        entities
    }
}

/// First match of the first pattern that hits, in pattern order.
fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|p| p.find(text))
        .map(|m| m.as_str().to_string())
}
