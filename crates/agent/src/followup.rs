//! Follow-ups and Suggestions
//!
//! Fixed per-category follow-up text, quick replies, context-derived
//! suggestions and escalation reasons.

use shoe_assistant_core::{ConversationState, PatternAnalysis, ProblemCategory, SentimentTrend};

use crate::patterns::PatternConfig;

/// Prefix for HIGH and CRITICAL urgency replies
pub const PRIORITY_PREFIX: &str = "⚡ Priority Support: ";

/// Appended for very negative customers
pub const EMPATHY_LINE: &str =
    "I truly understand how frustrating this must be, and I'm committed to resolving it for you.";

/// Added to every escalation reply
pub const HUMAN_AGENT_SUGGESTION: &str = "Connect with human agent";

/// Maximum suggestions in a non-escalation reply
pub const MAX_SUGGESTIONS: usize = 5;

/// Quick prompts offered before the customer says anything
pub const QUICK_PROMPTS: &[&str] = &[
    "Track my order",
    "Help me find running shoes",
    "What's your return policy?",
    "How do I find my size?",
    "Show me shoes under $100",
    "I have a problem with my order",
    "Talk to a human agent",
];

const GENERIC_QUICK_REPLIES: &[&str] = &["Track my order", "Browse new arrivals", "Contact support"];

/// Follow-up question or instructions for a category
pub fn follow_up(category: ProblemCategory, order: Option<&str>) -> String {
    match (category, order) {
        (ProblemCategory::OrderIssues, Some(order)) => format!(
            "Could you tell me exactly what went wrong with order {}? For example a missing item, the wrong item, or a change you need.",
            order
        ),
        (ProblemCategory::OrderIssues, None) => {
            "What is your order number? You can find it in your confirmation email.".to_string()
        }
        (ProblemCategory::ProductQuality, _) => {
            "Could you send a photo of the issue? That helps us process a replacement or refund faster.".to_string()
        }
        (ProblemCategory::ShippingDelivery, Some(order)) => format!(
            "I'll pull up the tracking for order {}. Has the tracking page shown any updates recently?",
            order
        ),
        (ProblemCategory::ShippingDelivery, None) => {
            "Could you share your order number so I can check the tracking details?".to_string()
        }
        (ProblemCategory::PaymentBilling, _) => {
            "Please share the date and amount of the charge (never your full card number) so I can review it.".to_string()
        }
        (ProblemCategory::AccountAccess, _) => {
            "Try the \"Forgot password\" link on the sign-in page. If that doesn't work, tell me the email on your account and I'll help further.".to_string()
        }
        (ProblemCategory::ReturnExchange, Some(order)) => format!(
            "Would you like a refund or an exchange for order {}? I can email you a prepaid return label.",
            order
        ),
        (ProblemCategory::ReturnExchange, None) => {
            "Would you like a refund or an exchange? I can email you a prepaid return label once I have your order number.".to_string()
        }
        (ProblemCategory::SizeFit, _) => {
            "What size do you usually wear, and in which brand? I'll use the size guide to recommend the best fit.".to_string()
        }
        (ProblemCategory::WebsiteTechnical, _) => {
            "Which device and browser are you using, and what error message do you see?".to_string()
        }
        (ProblemCategory::ProductAvailability, _) => {
            "Which model, size and color are you looking for? I can check stock or set up a restock alert.".to_string()
        }
        (ProblemCategory::CustomerService, _) => {
            "Could you tell me more about what happened so I can make sure the right team follows up?".to_string()
        }
        (ProblemCategory::GeneralInquiry, _) => "Is there anything specific I can help you with today?".to_string(),
    }
}

/// Quick-reply suggestions for a category
pub fn quick_replies(category: ProblemCategory) -> &'static [&'static str] {
    match category {
        ProblemCategory::OrderIssues => &["Check order status", "Cancel my order", "Report a missing item"],
        ProblemCategory::ProductQuality => &["Request a replacement", "Request a refund", "Upload photos"],
        ProblemCategory::ShippingDelivery => &["Track my package", "Change delivery address", "Shipping options"],
        ProblemCategory::PaymentBilling => &["Review my charges", "Request a refund", "Update payment method"],
        ProblemCategory::AccountAccess => &["Reset my password", "Update my email", "Unlock my account"],
        ProblemCategory::ReturnExchange => &["Start a return", "Exchange for another size", "Return policy"],
        ProblemCategory::SizeFit => &["View size chart", "Compare brand sizing", "Exchange for a different size"],
        ProblemCategory::WebsiteTechnical => &["Report a bug", "Try the mobile app", "Contact support"],
        ProblemCategory::ProductAvailability => &["Notify me when in stock", "Show similar items", "Browse new arrivals"],
        ProblemCategory::CustomerService => &["Speak to a manager", "File a complaint", "Contact support"],
        ProblemCategory::GeneralInquiry => GENERIC_QUICK_REPLIES,
    }
}

/// Suggestions derived from the conversation so far, at most five
pub fn context_suggestions(
    state: &ConversationState,
    patterns: &PatternAnalysis,
    config: &PatternConfig,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if let Some(ref order) = state.entities.order_number {
        suggestions.push(format!("Track order {}", order));
    }

    if let Some(problem) = state.last_problem() {
        let extra: &[&str] = match problem.category {
            ProblemCategory::OrderIssues => &["Check order status", "Modify my order"],
            ProblemCategory::ProductQuality => &["Report a defect", "Request a replacement"],
            ProblemCategory::SizeFit => &["View size chart", "Exchange for a different size"],
            _ => &[],
        };
        suggestions.extend(extra.iter().map(|s| s.to_string()));
    }

    if patterns.sentiment_trend == SentimentTrend::Declining {
        suggestions.push("Speak with a support specialist".to_string());
        suggestions.push("Request a callback".to_string());
    }

    if patterns.is_repetitive || patterns.topic_changes >= config.max_topic_changes {
        suggestions.push("Escalate to a specialist".to_string());
        suggestions.push("Email my case summary".to_string());
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Own suggestions first, then context, de-duplicated and capped
pub fn merge_suggestions<'a>(
    own: impl IntoIterator<Item = &'a str>,
    context: &'a [String],
) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for suggestion in own.into_iter().chain(context.iter().map(String::as_str)) {
        if merged.len() == MAX_SUGGESTIONS {
            break;
        }
        if !merged.iter().any(|s| s == suggestion) {
            merged.push(suggestion.to_string());
        }
    }
    merged
}

/// Why a conversation goes to a human, highest priority first
pub fn escalation_reason(patterns: &PatternAnalysis, config: &PatternConfig) -> &'static str {
    if patterns.is_escalating {
        "Issue urgency is escalating"
    } else if patterns.is_repetitive {
        "Customer is repeating the same concern"
    } else if patterns.topic_changes >= config.max_topic_changes {
        "Multiple unresolved topics in conversation"
    } else if patterns.average_sentiment <= config.sentiment_floor {
        "Customer sentiment is strongly negative"
    } else {
        "Complex issue requiring human assistance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shoe_assistant_core::{ProblemRecord, SentimentLevel, UrgencyLevel};

    #[test]
    fn test_follow_up_interpolates_order() {
        let text = follow_up(ProblemCategory::OrderIssues, Some("AB12345"));
        assert!(text.contains("AB12345"));

        let text = follow_up(ProblemCategory::OrderIssues, None);
        assert!(text.contains("order number"));
    }

    #[test]
    fn test_size_quick_replies() {
        assert!(quick_replies(ProblemCategory::SizeFit).contains(&"View size chart"));
        assert_eq!(quick_replies(ProblemCategory::GeneralInquiry), GENERIC_QUICK_REPLIES);
    }

    #[test]
    fn test_context_suggestions() {
        let now = Utc::now();
        let mut state = ConversationState::new("s1", now);
        state.entities.order_number = Some("XY7788Z".to_string());
        state.problem_history.push_back(ProblemRecord {
            category: ProblemCategory::OrderIssues,
            timestamp: now,
            urgency: UrgencyLevel::High,
            sentiment: SentimentLevel::VeryNegative,
        });

        let patterns = PatternAnalysis {
            sentiment_trend: SentimentTrend::Declining,
            is_repetitive: true,
            ..Default::default()
        };

        let suggestions = context_suggestions(&state, &patterns, &PatternConfig::default());
        assert_eq!(
            suggestions,
            vec![
                "Track order XY7788Z",
                "Check order status",
                "Modify my order",
                "Speak with a support specialist",
                "Request a callback",
            ]
        );
    }

    #[test]
    fn test_merge_dedupes_and_caps() {
        let context = vec![
            "View size chart".to_string(),
            "Track order A1".to_string(),
            "Request a callback".to_string(),
        ];
        let merged = merge_suggestions(
            quick_replies(ProblemCategory::SizeFit).iter().copied(),
            &context,
        );

        assert_eq!(
            merged,
            vec![
                "View size chart",
                "Compare brand sizing",
                "Exchange for a different size",
                "Track order A1",
                "Request a callback",
            ]
        );
    }

    #[test]
    fn test_escalation_reason_priority() {
        let config = PatternConfig::default();

        let all = PatternAnalysis {
            is_escalating: true,
            is_repetitive: true,
            topic_changes: 4,
            average_sentiment: -8.0,
            ..Default::default()
        };
        assert_eq!(escalation_reason(&all, &config), "Issue urgency is escalating");

        let repeated = PatternAnalysis {
            is_repetitive: true,
            topic_changes: 4,
            ..Default::default()
        };
        assert_eq!(escalation_reason(&repeated, &config), "Customer is repeating the same concern");

        let churn = PatternAnalysis {
            topic_changes: 3,
            average_sentiment: -8.0,
            ..Default::default()
        };
        assert_eq!(escalation_reason(&churn, &config), "Multiple unresolved topics in conversation");

        let negative = PatternAnalysis {
            average_sentiment: -6.0,
            ..Default::default()
        };
        assert_eq!(escalation_reason(&negative, &config), "Customer sentiment is strongly negative");

        assert_eq!(
            escalation_reason(&PatternAnalysis::default(), &config),
            "Complex issue requiring human assistance"
        );
    }

    #[test]
    fn test_custom_topic_threshold() {
        let config = PatternConfig {
            max_topic_changes: 5,
            ..Default::default()
        };
        let patterns = PatternAnalysis {
            topic_changes: 3,
            ..Default::default()
        };

        assert_eq!(
            escalation_reason(&patterns, &config),
            "Complex issue requiring human assistance"
        );

        let state = ConversationState::new("s1", Utc::now());
        assert!(context_suggestions(&state, &patterns, &config).is_empty());
        assert_eq!(
            context_suggestions(&state, &patterns, &PatternConfig::default()),
            vec!["Escalate to a specialist", "Email my case summary"]
        );
    }
}
