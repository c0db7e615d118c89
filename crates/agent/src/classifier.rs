//! Problem Classification
//!
//! Scores a message against every category template and picks the best.
//! Templates are evaluated in [`ProblemCategory::CLASSIFIABLE`] order and a
//! later category only wins with a strictly greater confidence, so on an
//! exact tie the earlier-declared category is returned.

use regex::Regex;

use shoe_assistant_core::{ProblemCategory, ProblemMatch};

/// Below this confidence a message is a general inquiry
pub const MIN_CONFIDENCE: f32 = 0.1;

/// Keywords and compiled patterns for one category
struct CategoryTemplate {
    category: ProblemCategory,
    keywords: Vec<&'static str>,
    patterns: Vec<Regex>,
}

impl CategoryTemplate {
    fn new(category: ProblemCategory, keywords: &[&'static str], patterns: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.to_vec(),
            patterns: patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
                .collect(),
        }
    }

    /// Distinct keyword hits plus every non-overlapping pattern match
    fn match_count(&self, text: &str, lower: &str) -> usize {
        let keyword_hits = self.keywords.iter().filter(|k| lower.contains(*k)).count();
        let pattern_hits: usize = self
            .patterns
            .iter()
            .map(|p| p.find_iter(text).count())
            .sum();
        keyword_hits + pattern_hits
    }

    fn size(&self) -> usize {
        self.keywords.len() + self.patterns.len()
    }
}

/// Problem classifier
pub struct ProblemClassifier {
    templates: Vec<CategoryTemplate>,
}

impl ProblemClassifier {
    /// Create a classifier with the shoe store templates
    pub fn new() -> Self {
        let templates = ProblemCategory::CLASSIFIABLE
            .iter()
            .map(|&category| Self::template_for(category))
            .collect();

        Self { templates }
    }

    fn template_for(category: ProblemCategory) -> CategoryTemplate {
        match category {
            ProblemCategory::OrderIssues => CategoryTemplate::new(
                category,
                &[
                    "order",
                    "cancel",
                    "cancelled",
                    "wrong item",
                    "missing item",
                    "order status",
                    "never received",
                    "didn't receive",
                    "incorrect",
                    "modify order",
                ],
                &[
                    r"order\s*#?\s*[a-z0-9]*\d[a-z0-9]{4,}",
                    r"(?:cancel|change|modify)\s+(?:my\s+)?order",
                    r"where\s+is\s+my\s+order",
                ],
            ),
            ProblemCategory::ProductQuality => CategoryTemplate::new(
                category,
                &[
                    "defective",
                    "broken",
                    "damaged",
                    "poor quality",
                    "quality",
                    "torn",
                    "ripped",
                    "falling apart",
                    "sole",
                    "stitching",
                    "scuffed",
                    "fake",
                ],
                &[
                    r"(?:sole|heel|strap|lace)s?\s+(?:came\s+off|broke|is\s+broken|detached|peeling)",
                    r"(?:arrived|came)\s+(?:damaged|broken|defective)",
                    r"(?:fell|falling)\s+apart",
                ],
            ),
            ProblemCategory::ShippingDelivery => CategoryTemplate::new(
                category,
                &[
                    "shipping",
                    "delivery",
                    "shipped",
                    "tracking",
                    "package",
                    "delivered",
                    "courier",
                    "in transit",
                    "late delivery",
                    "delayed",
                    "arrive",
                    "lost package",
                ],
                &[
                    r"track(?:ing)?\s+(?:number|my\s+package|my\s+order)",
                    r"(?:hasn't|has\s+not|haven't|have\s+not|didn't|did\s+not)\s+(?:arrived|shipped|been\s+delivered)",
                    r"when\s+will\s+(?:it|they|my\s+\w+)\s+(?:arrive|ship|be\s+delivered)",
                ],
            ),
            ProblemCategory::PaymentBilling => CategoryTemplate::new(
                category,
                &[
                    "payment",
                    "charged",
                    "refund",
                    "billing",
                    "credit card",
                    "double charged",
                    "invoice",
                    "transaction",
                    "paypal",
                    "overcharged",
                    "promo code",
                    "discount",
                ],
                &[
                    r"charged\s+(?:twice|two\s+times|double)",
                    r"(?:want|need|get)\s+(?:a\s+|my\s+)?(?:refund|money\s+back)",
                    r"card\s+(?:was\s+|got\s+)?(?:declined|rejected)",
                ],
            ),
            ProblemCategory::AccountAccess => CategoryTemplate::new(
                category,
                &[
                    "account",
                    "login",
                    "log in",
                    "password",
                    "locked",
                    "sign in",
                    "reset",
                    "verification",
                    "two-factor",
                    "email change",
                ],
                &[
                    r"(?:can't|cannot|unable\s+to)\s+(?:log|sign)\s*in",
                    r"account\s+(?:is\s+|was\s+|got\s+)?(?:locked|suspended|disabled)",
                ],
            ),
            ProblemCategory::ReturnExchange => CategoryTemplate::new(
                category,
                &[
                    "return",
                    "exchange",
                    "send back",
                    "return policy",
                    "return label",
                    "restocking fee",
                    "swap",
                    "store credit",
                    "refund policy",
                ],
                &[
                    r"(?:want|like|need)\s+to\s+(?:return|exchange)",
                    r"return\s+(?:label|window|period)",
                    r"exchange\s+(?:for|it|them)",
                ],
            ),
            ProblemCategory::SizeFit => CategoryTemplate::new(
                category,
                &[
                    "size",
                    "fit",
                    "too small",
                    "too big",
                    "too tight",
                    "too loose",
                    "sizing",
                    "size chart",
                    "measurement",
                    "width",
                    "narrow",
                    "wide",
                ],
                &[
                    r"what\s+size",
                    r"size\s*\d+",
                    r"runs?\s+(?:small|large|big|narrow|wide)",
                ],
            ),
            ProblemCategory::WebsiteTechnical => CategoryTemplate::new(
                category,
                &[
                    "website",
                    "mobile app",
                    "error",
                    "bug",
                    "crash",
                    "loading",
                    "checkout",
                    "not working",
                    "glitch",
                    "button",
                ],
                &[
                    r"(?:page|site|app)\s+(?:won't|will\s+not|doesn't|does\s+not)\s+load",
                    r"error\s+(?:code|message)",
                    r"(?:can't|cannot)\s+(?:check\s*out|add\s+to\s+cart)",
                ],
            ),
            ProblemCategory::ProductAvailability => CategoryTemplate::new(
                category,
                &[
                    "in stock",
                    "out of stock",
                    "available",
                    "availability",
                    "restock",
                    "sold out",
                    "back in stock",
                    "when will",
                    "pre-order",
                    "limited edition",
                ],
                &[
                    r"(?:do\s+you\s+have|have\s+you\s+got)\s+(?:these|this|it|them|any)",
                    r"(?:is|are)\s+(?:this|these|it|they)\s+(?:available|in\s+stock)",
                    r"(?:notify|alert)\s+me\s+when",
                ],
            ),
            ProblemCategory::CustomerService => CategoryTemplate::new(
                category,
                &[
                    "speak to",
                    "talk to",
                    "representative",
                    "manager",
                    "human",
                    "real person",
                    "rude",
                    "no response",
                    "customer service",
                    "support team",
                    "contact",
                ],
                &[
                    r"(?:speak|talk)\s+(?:to|with)\s+(?:a\s+)?(?:human|person|manager|agent|someone)",
                    r"(?:no\s+one|nobody)\s+(?:has\s+)?(?:responded|replied|answered|helped)",
                ],
            ),
            ProblemCategory::GeneralInquiry => CategoryTemplate::new(category, &[], &[]),
        }
    }

    /// Classify a message
    pub fn classify(&self, text: &str) -> ProblemMatch {
        let lower = text.to_lowercase();

        let mut best = ProblemMatch {
            category: ProblemCategory::GeneralInquiry,
            confidence: 0.0,
            match_count: 0,
        };

        for template in &self.templates {
            let size = template.size();
            if size == 0 {
                continue;
            }

            let match_count = template.match_count(text, &lower);
            let confidence = (match_count as f32 / size as f32).min(1.0);

            if confidence > best.confidence {
                best = ProblemMatch {
                    category: template.category,
                    confidence,
                    match_count,
                };
            }
        }

        if best.confidence < MIN_CONFIDENCE {
            return ProblemMatch {
                category: ProblemCategory::GeneralInquiry,
                confidence: 0.0,
                match_count: best.match_count,
            };
        }

        tracing::trace!(
            category = %best.category,
            confidence = best.confidence,
            matches = best.match_count,
            "Classified message"
        );

        best
    }

    /// Confidence of one category for a message, without the fallback
    pub fn confidence_for(&self, text: &str, category: ProblemCategory) -> f32 {
        let lower = text.to_lowercase();
        self.templates
            .iter()
            .find(|t| t.category == category)
            .filter(|t| t.size() > 0)
            .map(|t| (t.match_count(text, &lower) as f32 / t.size() as f32).min(1.0))
            .unwrap_or(0.0)
    }
}

impl Default for ProblemClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_question() {
        let classifier = ProblemClassifier::new();
        let result = classifier.classify("what size should I get for running shoes");

        assert_eq!(result.category, ProblemCategory::SizeFit);
        assert_eq!(result.match_count, 2);
    }

    #[test]
    fn test_payment_issue() {
        let classifier = ProblemClassifier::new();
        let result = classifier.classify("I was charged twice on my credit card for the payment");

        assert_eq!(result.category, ProblemCategory::PaymentBilling);
        assert_eq!(result.match_count, 4);
    }

    #[test]
    fn test_account_locked() {
        let classifier = ProblemClassifier::new();
        let result =
            classifier.classify("This is urgent, my account is locked and I need help immediately");

        assert_eq!(result.category, ProblemCategory::AccountAccess);
    }

    #[test]
    fn test_low_confidence_falls_back() {
        let classifier = ProblemClassifier::new();
        let result = classifier.classify("Hi, I have a question about my shoes");

        assert_eq!(result.category, ProblemCategory::GeneralInquiry);
        assert_eq!(result.confidence, 0.0);

        let result = classifier.classify("");
        assert_eq!(result.category, ProblemCategory::GeneralInquiry);
    }

    #[test]
    fn test_order_reference_needs_a_digit() {
        let classifier = ProblemClassifier::new();

        // "order" and "order status" keywords only
        let status = classifier.confidence_for("check my order status", ProblemCategory::OrderIssues);
        assert_eq!(status, 2.0 / 13.0);

        let plain = classifier.confidence_for("I want to order shoes", ProblemCategory::OrderIssues);
        assert_eq!(plain, 1.0 / 13.0);

        let numbered = classifier.confidence_for("order #AB12345", ProblemCategory::OrderIssues);
        assert_eq!(numbered, 2.0 / 13.0);
    }

    #[test]
    fn test_tie_keeps_first_declared_category() {
        let classifier = ProblemClassifier::new();
        let text = "broken torn package courier";

        let quality = classifier.confidence_for(text, ProblemCategory::ProductQuality);
        let shipping = classifier.confidence_for(text, ProblemCategory::ShippingDelivery);
        assert_eq!(quality, shipping);

        let result = classifier.classify(text);
        assert_eq!(result.category, ProblemCategory::ProductQuality);
        assert_eq!(result.confidence, quality);
    }

    #[test]
    fn test_best_confidence_wins() {
        let classifier = ProblemClassifier::new();
        let text = "This is absolutely unacceptable, I want a refund now, order #XY7788Z";
        let result = classifier.classify(text);

        let order = classifier.confidence_for(text, ProblemCategory::OrderIssues);
        let payment = classifier.confidence_for(text, ProblemCategory::PaymentBilling);
        let expected = if payment > order {
            ProblemCategory::PaymentBilling
        } else {
            ProblemCategory::OrderIssues
        };

        assert_eq!(result.category, expected);
        assert_eq!(result.confidence, order.max(payment));
    }

    #[test]
    fn test_confidence_bounded() {
        let classifier = ProblemClassifier::new();
        let text = "size size 8 size 9 size 10 size 11 size 12 size 13 size 14 size 15 \
                    size 16 size 17 size 18 size 19 size 20 what size what size";
        let result = classifier.classify(text);

        assert_eq!(result.category, ProblemCategory::SizeFit);
        assert!(result.confidence <= 1.0);
        assert!(result.confidence >= 0.0);
    }
}
