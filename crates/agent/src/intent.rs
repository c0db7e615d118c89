//! Query Intent Routing
//!
//! Coarse shopping intents used to decide whether catalog results are shown
//! next to a reply. Independent of problem classification.

use regex::Regex;
use serde::{Deserialize, Serialize};

use shoe_assistant_core::{Product, ProductFilter};

/// Shopping intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryIntent {
    ProductSearch,
    ProductRecommendation,
    OrderStatus,
    CartHelp,
    ShippingInfo,
    ReturnPolicy,
    SizeGuide,
    PriceFilter,
    CategoryBrowse,
    GeneralHelp,
    Unknown,
}

impl QueryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryIntent::ProductSearch => "PRODUCT_SEARCH",
            QueryIntent::ProductRecommendation => "PRODUCT_RECOMMENDATION",
            QueryIntent::OrderStatus => "ORDER_STATUS",
            QueryIntent::CartHelp => "CART_HELP",
            QueryIntent::ShippingInfo => "SHIPPING_INFO",
            QueryIntent::ReturnPolicy => "RETURN_POLICY",
            QueryIntent::SizeGuide => "SIZE_GUIDE",
            QueryIntent::PriceFilter => "PRICE_FILTER",
            QueryIntent::CategoryBrowse => "CATEGORY_BROWSE",
            QueryIntent::GeneralHelp => "GENERAL_HELP",
            QueryIntent::Unknown => "UNKNOWN",
        }
    }

    /// Intents that show catalog results
    pub fn is_product_related(&self) -> bool {
        matches!(
            self,
            QueryIntent::ProductSearch
                | QueryIntent::ProductRecommendation
                | QueryIntent::CategoryBrowse
                | QueryIntent::PriceFilter
        )
    }
}

impl std::fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entities picked up while routing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEntities {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Routing result
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedIntent {
    pub intent: QueryIntent,
    pub entities: QueryEntities,
}

impl RoutedIntent {
    /// Catalog filter for this query
    pub fn product_filter(&self) -> ProductFilter {
        let mut filter = ProductFilter::default();
        if let Some(ref category) = self.entities.category {
            filter = filter.with_category(category.clone());
        }
        if let Some(ref brand) = self.entities.brand {
            filter = filter.with_brand_regex(regex::escape(brand));
        }
        filter
    }

    /// Product price lies inside the requested range
    pub fn price_matches(&self, product: &Product) -> bool {
        self.entities.min_price.map_or(true, |min| product.price >= min)
            && self.entities.max_price.map_or(true, |max| product.price <= max)
    }
}

const BRANDS: &[&str] = &[
    "nike",
    "adidas",
    "puma",
    "reebok",
    "new balance",
    "asics",
    "converse",
    "vans",
    "skechers",
    "under armour",
];

/// Compiled intent rule
struct IntentRule {
    intent: QueryIntent,
    regex: Regex,
}

/// Compiled pattern mapping to a catalog value
struct ValuePattern {
    value: &'static str,
    regex: Regex,
}

/// Intent router
pub struct IntentRouter {
    brands: Vec<ValuePattern>,
    rules: Vec<IntentRule>,
    categories: Vec<ValuePattern>,
    color: Regex,
    size: Regex,
    price_between: Regex,
    price_max: Regex,
    price_min: Regex,
}

impl IntentRouter {
    pub fn new() -> Self {
        let brands = BRANDS
            .iter()
            .map(|&b| ValuePattern {
                value: b,
                regex: Regex::new(&format!(r"(?i)\b{}\b", b.replace(' ', r"\s+"))).unwrap(),
            })
            .collect();

        // Evaluated in order, first match wins
        let rules = [
            (QueryIntent::OrderStatus, r"\b(?:order|orders|track|tracking|my\s+purchase)\b"),
            (QueryIntent::CartHelp, r"\b(?:cart|basket|checkout)\b"),
            (QueryIntent::ShippingInfo, r"\b(?:shipping|ship|delivery|deliver)\b"),
            (QueryIntent::ReturnPolicy, r"\b(?:return|returns|refund|exchange)\b"),
            (QueryIntent::SizeGuide, r"\b(?:size|sizes|sizing|fit|fits)\b"),
            (
                QueryIntent::PriceFilter,
                r"(?:\b(?:under|below|less\s+than|over|above|more\s+than|between)\s*\$?\d+)|\b(?:cheap|budget|affordable)\b",
            ),
            (
                QueryIntent::ProductRecommendation,
                r"\b(?:recommend|suggest|best|popular|trending)\b|what\s+should\s+i\s+(?:buy|get|wear)",
            ),
            (
                QueryIntent::ProductSearch,
                r"\b(?:show\s+me|find|looking\s+for|search|do\s+you\s+(?:have|sell)|buy)\b",
            ),
            (
                QueryIntent::CategoryBrowse,
                r"\b(?:categor(?:y|ies)|collections?|browse)\b|what\s+(?:kinds|types)\s+of",
            ),
            (QueryIntent::GeneralHelp, r"\b(?:help|hi|hello|hey|support|question)\b"),
        ]
        .into_iter()
        .map(|(intent, pattern)| IntentRule {
            intent,
            regex: Regex::new(&format!("(?i){}", pattern)).unwrap(),
        })
        .collect();

        let categories = [
            ("Running", r"\b(?:running|jogging|marathon)\b"),
            ("Sneakers", r"\bsneakers?\b"),
            ("Boots", r"\bboots?\b"),
            ("Sandals", r"\b(?:sandals?|flip\s*flops?|slides)\b"),
            ("Formal", r"\b(?:formal|oxfords?|loafers?|dress\s+shoes)\b"),
            ("Heels", r"\b(?:heels|pumps|stilettos?)\b"),
            ("Sports", r"\b(?:sports?|training|basketball|football|soccer|cleats)\b"),
            ("Kids", r"\b(?:kids|children|child)\b"),
        ]
        .into_iter()
        .map(|(value, pattern)| ValuePattern {
            value,
            regex: Regex::new(&format!("(?i){}", pattern)).unwrap(),
        })
        .collect();

        Self {
            brands,
            rules,
            categories,
            color: Regex::new(
                r"(?i)\b(black|white|red|blue|green|brown|gray|grey|navy|beige|pink|yellow|orange|purple|tan)\b",
            )
            .unwrap(),
            size: Regex::new(r"(?i)\bsize\s*(\d+(?:\.\d+)?)").unwrap(),
            price_between: Regex::new(r"(?i)between\s*\$?(\d+(?:\.\d+)?)\s*(?:and|-|to)\s*\$?(\d+(?:\.\d+)?)")
                .unwrap(),
            price_max: Regex::new(r"(?i)(?:under|below|less\s+than)\s*\$?(\d+(?:\.\d+)?)").unwrap(),
            price_min: Regex::new(r"(?i)(?:over|above|more\s+than)\s*\$?(\d+(?:\.\d+)?)").unwrap(),
        }
    }

    /// Route a query
    pub fn route(&self, text: &str) -> RoutedIntent {
        let intent = if self.brands.iter().any(|b| b.regex.is_match(text)) {
            QueryIntent::ProductSearch
        } else {
            self.rules
                .iter()
                .find(|rule| rule.regex.is_match(text))
                .map(|rule| rule.intent)
                .unwrap_or(QueryIntent::Unknown)
        };

        let entities = self.extract_entities(intent, text);

        tracing::trace!(intent = %intent, "Routed query");

        RoutedIntent { intent, entities }
    }

    fn extract_entities(&self, intent: QueryIntent, text: &str) -> QueryEntities {
        let mut entities = QueryEntities::default();

        match intent {
            QueryIntent::ProductSearch
            | QueryIntent::ProductRecommendation
            | QueryIntent::PriceFilter
            | QueryIntent::CategoryBrowse => {
                entities.category = Self::first_value(&self.categories, text);
                entities.brand = Self::first_value(&self.brands, text);
                entities.color = self
                    .color
                    .captures(text)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_lowercase());
                entities.size = self.size_value(text);
                self.extract_price(text, &mut entities);
            }
            QueryIntent::SizeGuide => {
                entities.category = Self::first_value(&self.categories, text);
                entities.size = self.size_value(text);
            }
            _ => {}
        }

        entities
    }

    fn first_value(patterns: &[ValuePattern], text: &str) -> Option<String> {
        patterns
            .iter()
            .find(|p| p.regex.is_match(text))
            .map(|p| p.value.to_string())
    }

    fn size_value(&self, text: &str) -> Option<String> {
        self.size
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn extract_price(&self, text: &str, entities: &mut QueryEntities) {
        if let Some(caps) = self.price_between.captures(text) {
            entities.min_price = capture_f64(&caps, 1);
            entities.max_price = capture_f64(&caps, 2);
            return;
        }
        if let Some(caps) = self.price_max.captures(text) {
            entities.max_price = capture_f64(&caps, 1);
        }
        if let Some(caps) = self.price_min.captures(text) {
            entities.min_price = capture_f64(&caps, 1);
        }
    }
}

fn capture_f64(caps: &regex::Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group).and_then(|m| m.as_str().parse::<f64>().ok())
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_checked_first() {
        let router = IntentRouter::new();
        let routed = router.route("Where is my New Balance order?");

        assert_eq!(routed.intent, QueryIntent::ProductSearch);
        assert_eq!(routed.entities.brand.as_deref(), Some("new balance"));
    }

    #[test]
    fn test_cascade_order() {
        let router = IntentRouter::new();

        assert_eq!(router.route("where is my order").intent, QueryIntent::OrderStatus);
        assert_eq!(router.route("my cart is empty").intent, QueryIntent::CartHelp);
        assert_eq!(router.route("how long does shipping take").intent, QueryIntent::ShippingInfo);
        assert_eq!(router.route("what is your return policy").intent, QueryIntent::ReturnPolicy);
        assert_eq!(
            router.route("what size should I get for running shoes").intent,
            QueryIntent::SizeGuide
        );
        assert_eq!(router.route("shoes under $50").intent, QueryIntent::PriceFilter);
        assert_eq!(
            router.route("can you recommend something comfy").intent,
            QueryIntent::ProductRecommendation
        );
        assert_eq!(router.route("show me red sneakers").intent, QueryIntent::ProductSearch);
        assert_eq!(router.route("what categories do you carry").intent, QueryIntent::CategoryBrowse);
        assert_eq!(router.route("hello").intent, QueryIntent::GeneralHelp);
        assert_eq!(router.route("asdf qwerty").intent, QueryIntent::Unknown);
    }

    #[test]
    fn test_product_entities() {
        let router = IntentRouter::new();
        let routed = router.route("Show me black running shoes between $60 and $120");

        // price wording outranks a plain search
        assert_eq!(routed.intent, QueryIntent::PriceFilter);
        assert_eq!(routed.entities.category.as_deref(), Some("Running"));
        assert_eq!(routed.entities.color.as_deref(), Some("black"));
        assert_eq!(routed.entities.min_price, Some(60.0));
        assert_eq!(routed.entities.max_price, Some(120.0));
        assert!(routed.intent.is_product_related());
    }

    #[test]
    fn test_filter_and_price_match() {
        let router = IntentRouter::new();
        let routed = router.route("adidas boots under $100");

        let filter = routed.product_filter();
        assert_eq!(filter.category.as_deref(), Some("Boots"));
        assert_eq!(filter.brand_regex.as_deref(), Some("adidas"));
        assert!(filter.is_active);

        let product = |price: f64| Product {
            id: "p1".to_string(),
            name: "Terrex".to_string(),
            brand: "Adidas".to_string(),
            category: "Boots".to_string(),
            price,
            image_url: None,
            is_active: true,
        };
        assert!(routed.price_matches(&product(89.0)));
        assert!(!routed.price_matches(&product(140.0)));
    }

    #[test]
    fn test_non_product_intents_skip_entities() {
        let router = IntentRouter::new();
        let routed = router.route("track my order of black boots");

        assert_eq!(routed.intent, QueryIntent::OrderStatus);
        assert_eq!(routed.entities, QueryEntities::default());
        assert!(!routed.intent.is_product_related());
    }
}
