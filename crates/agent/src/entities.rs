//! Entity Extraction
//!
//! Regex extraction of order numbers, contact details and product attributes.
//! Every field is extracted independently and the first matching pattern wins.

use regex::Regex;

use shoe_assistant_core::Entities;

/// Most specific first
const PRODUCT_TYPES: &[&str] = &[
    "running shoes",
    "sneakers",
    "boots",
    "sandals",
    "heels",
    "loafers",
    "slippers",
    "flats",
    "trainers",
    "cleats",
    "oxfords",
    "shoes",
];

const COLORS: &[&str] = &[
    "black", "white", "red", "blue", "green", "brown", "gray", "grey", "navy", "beige", "pink",
    "yellow", "orange", "purple", "tan",
];

/// Entity extractor with patterns compiled once
pub struct EntityExtractor {
    order_patterns: Vec<Regex>,
    email: Regex,
    phone: Regex,
    size: Regex,
    colors: Vec<(&'static str, Regex)>,
    date_patterns: Vec<Regex>,
}

impl EntityExtractor {
    pub fn new() -> Self {
        let order_patterns = vec![
            // "#ABC123"
            Regex::new(r"#([A-Za-z0-9]{5,})").unwrap(),
            // "order number 12345", "order: AB12345"
            Regex::new(r"(?i)\border\s*(?:number|no\.?|id)?\s*(?:is\s*)?[:#]?\s*([A-Z]{0,4}\d{4,}[A-Z0-9]*)\b")
                .unwrap(),
            // bare "SHO-123456"
            Regex::new(r"\b([A-Z]{2,4}-?\d{5,})\b").unwrap(),
        ];

        let colors = COLORS
            .iter()
            .map(|&c| (c, Regex::new(&format!(r"(?i)\b{}\b", c)).unwrap()))
            .collect();

        let date_patterns = vec![
            Regex::new(r"\b(\d{1,2}[/-]\d{1,2}(?:[/-]\d{2,4})?)\b").unwrap(),
            Regex::new(
                r"(?i)\b((?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?)\b",
            )
            .unwrap(),
        ];

        Self {
            order_patterns,
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
            phone: Regex::new(r"(?:\+?1[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap(),
            size: Regex::new(r"(?i)size\s*(\d+\.?\d*)").unwrap(),
            colors,
            date_patterns,
        }
    }

    /// Extract all entities present in a message
    pub fn extract(&self, text: &str) -> Entities {
        let lower = text.to_lowercase();

        Entities {
            order_number: self.order_number(text),
            email: self.email.find(text).map(|m| m.as_str().to_string()),
            phone_number: self.phone.find(text).map(|m| m.as_str().trim().to_string()),
            product_type: PRODUCT_TYPES
                .iter()
                .find(|p| lower.contains(*p))
                .map(|p| p.to_string()),
            size: self
                .size
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
            color: self
                .colors
                .iter()
                .find(|(_, re)| re.is_match(text))
                .map(|(name, _)| name.to_string()),
            mentioned_date: self
                .date_patterns
                .iter()
                .find_map(|re| re.captures(text))
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }

    fn order_number(&self, text: &str) -> Option<String> {
        self.order_patterns
            .iter()
            .find_map(|re| re.captures(text))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_uppercase())
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_order_number() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("My order #ABC123 never arrived");
        assert_eq!(entities.order_number.as_deref(), Some("ABC123"));

        let entities = extractor.extract("refund now, order #xy7788z");
        assert_eq!(entities.order_number.as_deref(), Some("XY7788Z"));
    }

    #[test]
    fn test_order_number_variants() {
        let extractor = EntityExtractor::new();

        let entities = extractor.extract("my order number is 5512345");
        assert_eq!(entities.order_number.as_deref(), Some("5512345"));

        let entities = extractor.extract("Reference SHO-884421 please");
        assert_eq!(entities.order_number.as_deref(), Some("SHO-884421"));

        let entities = extractor.extract("I placed an order yesterday");
        assert!(entities.order_number.is_none());
    }

    #[test]
    fn test_contact_details() {
        let extractor = EntityExtractor::new();
        let entities =
            extractor.extract("Email me at jane.doe@example.com or call (555) 123-4567");

        assert_eq!(entities.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(entities.phone_number.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn test_product_attributes() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("Do you have the black running shoes in size 10.5?");

        assert_eq!(entities.product_type.as_deref(), Some("running shoes"));
        assert_eq!(entities.size.as_deref(), Some("10.5"));
        assert_eq!(entities.color.as_deref(), Some("black"));
    }

    #[test]
    fn test_color_needs_whole_word() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("It was delivered to the wrong address");
        assert!(entities.color.is_none());
    }

    #[test]
    fn test_dates() {
        let extractor = EntityExtractor::new();

        let entities = extractor.extract("I ordered on 03/14/2024");
        assert_eq!(entities.mentioned_date.as_deref(), Some("03/14/2024"));

        let entities = extractor.extract("It should have come by March 3rd");
        assert_eq!(entities.mentioned_date.as_deref(), Some("March 3rd"));
    }

    #[test]
    fn test_nothing_found() {
        let extractor = EntityExtractor::new();
        let entities = extractor.extract("hello there");
        assert!(entities.is_empty());
    }
}
