//! Per-message validation types
//!
//! A [`ValidationSummary`] is derived once per inbound message and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::{ProblemCategory, SentimentLevel, UrgencyLevel};

/// Sentiment scoring result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub level: SentimentLevel,
    pub score: i32,
    pub negative_count: u32,
    pub positive_count: u32,
    pub requires_immediate_attention: bool,
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self {
            level: SentimentLevel::Neutral,
            score: 0,
            negative_count: 0,
            positive_count: 0,
            requires_immediate_attention: false,
        }
    }
}

/// Best-matching problem category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemMatch {
    pub category: ProblemCategory,
    /// Confidence in [0, 1]
    pub confidence: f32,
    pub match_count: usize,
}

/// Urgency scoring result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyResult {
    pub level: UrgencyLevel,
    pub score: i32,
    pub estimated_response_time: String,
}

impl UrgencyResult {
    pub fn new(level: UrgencyLevel, score: i32) -> Self {
        Self {
            level,
            score,
            estimated_response_time: level.estimated_response_time().to_string(),
        }
    }
}

/// Entities extracted from a message
///
/// Absent fields are omitted from serialized output, not written as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentioned_date: Option<String>,
}

impl Entities {
    /// Shallow merge: every field present in `newer` overwrites the current value
    pub fn merge(&mut self, newer: &Entities) {
        fn take(slot: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }

        take(&mut self.order_number, &newer.order_number);
        take(&mut self.email, &newer.email);
        take(&mut self.phone_number, &newer.phone_number);
        take(&mut self.product_type, &newer.product_type);
        take(&mut self.size, &newer.size);
        take(&mut self.color, &newer.color);
        take(&mut self.mentioned_date, &newer.mentioned_date);
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of extracted fields
    pub fn len(&self) -> usize {
        [
            &self.order_number,
            &self.email,
            &self.phone_number,
            &self.product_type,
            &self.size,
            &self.color,
            &self.mentioned_date,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Operator-facing checklists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedActions {
    pub primary: Vec<String>,
    pub urgency: Vec<String>,
    pub sentiment: Vec<String>,
    pub all: Vec<String>,
}

/// Everything derived from one inbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool,
    pub problem_category: ProblemCategory,
    pub problem_confidence: f32,
    pub sentiment: SentimentResult,
    pub urgency: UrgencyResult,
    pub entities: Entities,
    pub recommended_actions: RecommendedActions,
    /// One-line human readable summary
    pub summary: String,
    /// Templated reply text
    pub suggested_response: String,
}
