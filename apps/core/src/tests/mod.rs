//! Test Module
//!
//! Test suite for the analysis engine.
//!
//! ## Test Categories
//! - `text_tests`: intent priority, urgency, sentiment, entity extraction
//! - `image_tests`: tag mapping tables, severity derivation, section gating
//! - `scoring_tests`: condition score and labor estimate aggregation
//! - `orchestrator_tests`: fan-out/fan-in, summary, action cascade, validation
//! - `vision_tests`: remote backend behavior against a mock HTTP provider

pub mod image_tests;
pub mod scoring_tests;
