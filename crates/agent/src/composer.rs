//! Response Composition
//!
//! Human-readable summaries, templated replies and operator checklists.

use shoe_assistant_core::{
    Entities, ProblemCategory, RecommendedActions, SentimentLevel, UrgencyLevel,
};

const SUMMARY_SEPARATOR: &str = " • ";

/// Builds summary text, suggested responses and recommended actions
#[derive(Debug, Clone, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// One-line summary, e.g. "Issue: Order Issues • Priority: HIGH • Order: AB123"
    pub fn summary_text(
        &self,
        category: ProblemCategory,
        sentiment: SentimentLevel,
        urgency: UrgencyLevel,
        entities: &Entities,
    ) -> String {
        let mut parts = vec![format!("Issue: {}", category.display_name())];

        if sentiment.is_negative() {
            parts.push(format!("Customer is {}", sentiment.display_name()));
        }

        parts.push(format!("Priority: {}", urgency.as_str()));

        if let Some(ref order) = entities.order_number {
            parts.push(format!("Order: {}", order));
        }

        parts.join(SUMMARY_SEPARATOR)
    }

    /// Templated reply with an apology preamble for negative sentiment
    pub fn suggested_response(
        &self,
        category: ProblemCategory,
        sentiment: SentimentLevel,
        entities: &Entities,
    ) -> String {
        let preamble = match sentiment {
            SentimentLevel::VeryNegative => "I sincerely apologize for this experience. ",
            SentimentLevel::Negative => "I understand your frustration, and I'm here to help. ",
            _ => "",
        };

        format!("{}{}", preamble, Self::template(category, entities.order_number.as_deref()))
    }

    fn template(category: ProblemCategory, order: Option<&str>) -> String {
        match (category, order) {
            (ProblemCategory::OrderIssues, Some(order)) => format!(
                "I'm looking into order {} right now and will sort out what went wrong.",
                order
            ),
            (ProblemCategory::OrderIssues, None) => {
                "I'll help you with your order. Could you share your order number so I can look it up?".to_string()
            }
            (ProblemCategory::ProductQuality, _) => {
                "I'm sorry the product didn't meet our quality standards. We'll make this right with a replacement or a full refund.".to_string()
            }
            (ProblemCategory::ShippingDelivery, Some(order)) => format!(
                "Let me check the shipping status of order {} and get you an update on its delivery.",
                order
            ),
            (ProblemCategory::ShippingDelivery, None) => {
                "Let me check on your delivery. Tracking details are in your confirmation email, and I can look it up with your order number.".to_string()
            }
            (ProblemCategory::PaymentBilling, Some(order)) => format!(
                "I'll review the charges on order {} and correct any billing error.",
                order
            ),
            (ProblemCategory::PaymentBilling, None) => {
                "I'll review your payment details and correct any billing error. Your payment information stays secure throughout.".to_string()
            }
            (ProblemCategory::AccountAccess, _) => {
                "I can help you get back into your account. For your security, we'll verify your identity before making any changes.".to_string()
            }
            (ProblemCategory::ReturnExchange, Some(order)) => format!(
                "I can start a return or exchange for order {}. Our 30-day return policy covers unworn items in their original packaging.",
                order
            ),
            (ProblemCategory::ReturnExchange, None) => {
                "I can help with your return or exchange. Our 30-day return policy covers unworn items in their original packaging.".to_string()
            }
            (ProblemCategory::SizeFit, _) => {
                "Finding the right fit matters. Our size guide has measurements for every style, and I can help you compare sizes across brands.".to_string()
            }
            (ProblemCategory::WebsiteTechnical, _) => {
                "Sorry about the technical trouble. Clearing your browser cache or trying another browser often helps while we look into it.".to_string()
            }
            (ProblemCategory::ProductAvailability, _) => {
                "Let me check availability for you. If an item is out of stock, I can set up a restock notification.".to_string()
            }
            (ProblemCategory::CustomerService, _) => {
                "I'm sorry your experience with our support hasn't been what you expected. I'll make sure your concern gets the attention it deserves.".to_string()
            }
            (ProblemCategory::GeneralInquiry, _) => {
                "Thanks for reaching out! I'm happy to help with orders, shipping, returns, sizing or finding the perfect pair.".to_string()
            }
        }
    }

    /// Operator-facing checklists for a validated message
    pub fn recommended_actions(
        &self,
        category: ProblemCategory,
        urgency: UrgencyLevel,
        sentiment: SentimentLevel,
    ) -> RecommendedActions {
        let primary = Self::to_strings(Self::primary_actions(category));
        let urgency = Self::to_strings(Self::urgency_actions(urgency));
        let sentiment = Self::to_strings(Self::sentiment_actions(sentiment));

        let all = primary
            .iter()
            .chain(urgency.iter())
            .chain(sentiment.iter())
            .cloned()
            .collect();

        RecommendedActions {
            primary,
            urgency,
            sentiment,
            all,
        }
    }

    fn primary_actions(category: ProblemCategory) -> &'static [&'static str] {
        match category {
            ProblemCategory::OrderIssues => &[
                "Verify order details",
                "Check order status in system",
                "Confirm shipping address",
            ],
            ProblemCategory::ProductQuality => &[
                "Request photos of the defect",
                "Check batch for similar reports",
                "Offer replacement or refund",
            ],
            ProblemCategory::ShippingDelivery => &[
                "Look up tracking information",
                "Contact carrier if delayed",
                "Offer expedited reshipment if lost",
            ],
            ProblemCategory::PaymentBilling => &[
                "Review transaction history",
                "Verify charge amounts",
                "Process refund if duplicate charge",
            ],
            ProblemCategory::AccountAccess => &[
                "Verify customer identity",
                "Send password reset link",
                "Check for suspicious activity",
            ],
            ProblemCategory::ReturnExchange => &[
                "Check return eligibility",
                "Generate return label",
                "Explain refund timeline",
            ],
            ProblemCategory::SizeFit => &[
                "Share size guide",
                "Ask about usual size and brand",
                "Offer free exchange for different size",
            ],
            ProblemCategory::WebsiteTechnical => &[
                "Collect browser and device details",
                "Reproduce the issue",
                "Escalate to engineering if confirmed",
            ],
            ProblemCategory::ProductAvailability => &[
                "Check inventory levels",
                "Suggest similar in-stock items",
                "Set up restock notification",
            ],
            ProblemCategory::CustomerService => &[
                "Review previous interactions",
                "Acknowledge the service failure",
                "Assign a dedicated agent",
            ],
            ProblemCategory::GeneralInquiry => &[
                "Clarify customer needs",
                "Provide relevant information",
            ],
        }
    }

    fn urgency_actions(level: UrgencyLevel) -> &'static [&'static str] {
        match level {
            UrgencyLevel::Critical => &[
                "Respond within 15 minutes",
                "Escalate to senior support",
                "Follow up until resolved",
            ],
            UrgencyLevel::High => &["Respond within 1 hour", "Prioritize in queue"],
            UrgencyLevel::Medium => &["Respond within 4 hours"],
            UrgencyLevel::Low => &["Respond within 24 hours"],
        }
    }

    fn sentiment_actions(level: SentimentLevel) -> &'static [&'static str] {
        match level {
            SentimentLevel::VeryNegative => &[
                "Apologize sincerely",
                "Offer compensation or discount",
                "Consider supervisor involvement",
            ],
            SentimentLevel::Negative => &["Acknowledge frustration", "Offer a clear resolution"],
            SentimentLevel::Neutral => &[],
            SentimentLevel::Positive | SentimentLevel::VeryPositive => {
                &["Thank the customer for the feedback"]
            }
        }
    }

    fn to_strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_order(order: &str) -> Entities {
        Entities {
            order_number: Some(order.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_text() {
        let composer = ResponseComposer::new();

        let summary = composer.summary_text(
            ProblemCategory::OrderIssues,
            SentimentLevel::VeryNegative,
            UrgencyLevel::High,
            &with_order("XY7788Z"),
        );
        assert_eq!(
            summary,
            "Issue: Order Issues • Customer is very negative • Priority: HIGH • Order: XY7788Z"
        );

        let summary = composer.summary_text(
            ProblemCategory::SizeFit,
            SentimentLevel::Positive,
            UrgencyLevel::Low,
            &Entities::default(),
        );
        assert_eq!(summary, "Issue: Size & Fit • Priority: LOW");
    }

    #[test]
    fn test_suggested_response_preamble() {
        let composer = ResponseComposer::new();

        let response = composer.suggested_response(
            ProblemCategory::OrderIssues,
            SentimentLevel::VeryNegative,
            &with_order("AB12345"),
        );
        assert!(response.starts_with("I sincerely apologize"));
        assert!(response.contains("AB12345"));

        let response = composer.suggested_response(
            ProblemCategory::ShippingDelivery,
            SentimentLevel::Negative,
            &Entities::default(),
        );
        assert!(response.starts_with("I understand your frustration"));

        let response = composer.suggested_response(
            ProblemCategory::SizeFit,
            SentimentLevel::Neutral,
            &Entities::default(),
        );
        assert!(response.starts_with("Finding the right fit"));
        assert!(response.contains("size guide"));
    }

    #[test]
    fn test_recommended_actions_concatenate() {
        let composer = ResponseComposer::new();
        let actions = composer.recommended_actions(
            ProblemCategory::PaymentBilling,
            UrgencyLevel::Critical,
            SentimentLevel::Negative,
        );

        assert_eq!(actions.primary.len(), 3);
        assert_eq!(actions.urgency.len(), 3);
        assert_eq!(actions.sentiment.len(), 2);
        assert_eq!(actions.all.len(), 8);
        assert_eq!(actions.all[0], "Review transaction history");
        assert_eq!(actions.all[7], "Offer a clear resolution");
    }
}
