//! Problem categories, sentiment levels and urgency levels

use serde::{Deserialize, Serialize};

/// Customer problem category
///
/// The declaration order of [`ProblemCategory::CLASSIFIABLE`] is part of the
/// classifier contract: on an exact confidence tie the category declared
/// first wins. Reordering it changes classification results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemCategory {
    OrderIssues,
    ProductQuality,
    ShippingDelivery,
    PaymentBilling,
    AccountAccess,
    ReturnExchange,
    SizeFit,
    WebsiteTechnical,
    ProductAvailability,
    CustomerService,
    /// Fallback when nothing else scores well enough
    GeneralInquiry,
}

impl ProblemCategory {
    /// Categories the classifier scores, in tie-break order
    pub const CLASSIFIABLE: [ProblemCategory; 10] = [
        ProblemCategory::OrderIssues,
        ProblemCategory::ProductQuality,
        ProblemCategory::ShippingDelivery,
        ProblemCategory::PaymentBilling,
        ProblemCategory::AccountAccess,
        ProblemCategory::ReturnExchange,
        ProblemCategory::SizeFit,
        ProblemCategory::WebsiteTechnical,
        ProblemCategory::ProductAvailability,
        ProblemCategory::CustomerService,
    ];

    /// Wire name (e.g. `ORDER_ISSUES`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemCategory::OrderIssues => "ORDER_ISSUES",
            ProblemCategory::ProductQuality => "PRODUCT_QUALITY",
            ProblemCategory::ShippingDelivery => "SHIPPING_DELIVERY",
            ProblemCategory::PaymentBilling => "PAYMENT_BILLING",
            ProblemCategory::AccountAccess => "ACCOUNT_ACCESS",
            ProblemCategory::ReturnExchange => "RETURN_EXCHANGE",
            ProblemCategory::SizeFit => "SIZE_FIT",
            ProblemCategory::WebsiteTechnical => "WEBSITE_TECHNICAL",
            ProblemCategory::ProductAvailability => "PRODUCT_AVAILABILITY",
            ProblemCategory::CustomerService => "CUSTOMER_SERVICE",
            ProblemCategory::GeneralInquiry => "GENERAL_INQUIRY",
        }
    }

    /// Human readable words (e.g. "Order Issues")
    pub fn display_name(&self) -> &'static str {
        match self {
            ProblemCategory::OrderIssues => "Order Issues",
            ProblemCategory::ProductQuality => "Product Quality",
            ProblemCategory::ShippingDelivery => "Shipping & Delivery",
            ProblemCategory::PaymentBilling => "Payment & Billing",
            ProblemCategory::AccountAccess => "Account Access",
            ProblemCategory::ReturnExchange => "Return & Exchange",
            ProblemCategory::SizeFit => "Size & Fit",
            ProblemCategory::WebsiteTechnical => "Website Technical",
            ProblemCategory::ProductAvailability => "Product Availability",
            ProblemCategory::CustomerService => "Customer Service",
            ProblemCategory::GeneralInquiry => "General Inquiry",
        }
    }

    /// Categories that add urgency on their own
    pub fn is_sensitive(&self) -> bool {
        matches!(self, ProblemCategory::PaymentBilling | ProblemCategory::AccountAccess)
    }
}

impl std::fmt::Display for ProblemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Five-level sentiment scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum SentimentLevel {
    VeryNegative,
    Negative,
    #[default]
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLevel::VeryNegative => "VERY_NEGATIVE",
            SentimentLevel::Negative => "NEGATIVE",
            SentimentLevel::Neutral => "NEUTRAL",
            SentimentLevel::Positive => "POSITIVE",
            SentimentLevel::VeryPositive => "VERY_POSITIVE",
        }
    }

    /// Words used in summaries ("very negative")
    pub fn display_name(&self) -> &'static str {
        match self {
            SentimentLevel::VeryNegative => "very negative",
            SentimentLevel::Negative => "negative",
            SentimentLevel::Neutral => "neutral",
            SentimentLevel::Positive => "positive",
            SentimentLevel::VeryPositive => "very positive",
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, SentimentLevel::VeryNegative | SentimentLevel::Negative)
    }
}

impl std::fmt::Display for SentimentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency level
///
/// Ordered from least to most urgent so `level >= UrgencyLevel::High` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum UrgencyLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "LOW",
            UrgencyLevel::Medium => "MEDIUM",
            UrgencyLevel::High => "HIGH",
            UrgencyLevel::Critical => "CRITICAL",
        }
    }

    /// Target first-response time for this level
    pub fn estimated_response_time(&self) -> &'static str {
        match self {
            UrgencyLevel::Critical => "15 minutes",
            UrgencyLevel::High => "1 hour",
            UrgencyLevel::Medium => "4 hours",
            UrgencyLevel::Low => "24 hours",
        }
    }

    /// HIGH or CRITICAL
    pub fn is_priority(&self) -> bool {
        *self >= UrgencyLevel::High
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
