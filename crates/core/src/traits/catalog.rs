//! Catalog and user-history traits

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::Result;

/// Product as shown alongside an assistant reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Catalog lookup filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Exact category name
    pub category: Option<String>,
    /// Case-insensitive regex over the brand name
    pub brand_regex: Option<String>,
    pub is_active: bool,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            brand_regex: None,
            is_active: true,
        }
    }
}

impl ProductFilter {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand_regex(mut self, pattern: impl Into<String>) -> Self {
        self.brand_regex = Some(pattern.into());
        self
    }
}

/// Product catalog interface
///
/// Backed by the store's product collection in production.
///
/// # Example
///
/// ```ignore
/// let filter = ProductFilter::default().with_category("running");
/// let products = catalog.find_by_filter(&filter).await?;
/// ```
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    /// Find products matching the filter
    async fn find_by_filter(&self, filter: &ProductFilter) -> Result<Vec<Product>>;

    /// All distinct category names
    async fn distinct_categories(&self) -> Result<Vec<String>>;
}

/// User browsing history interface
///
/// Best effort: an empty list or an error only means no personalization.
#[async_trait]
pub trait UserHistory: Send + Sync + 'static {
    /// Categories the user has browsed recently, most relevant first
    async fn browsing_categories(&self, user_id: &str) -> Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCatalog(Vec<Product>);

    #[async_trait]
    impl ProductCatalog for FixedCatalog {
        async fn find_by_filter(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
            Ok(self
                .0
                .iter()
                .filter(|p| p.is_active == filter.is_active)
                .filter(|p| filter.category.as_ref().map_or(true, |c| &p.category == c))
                .cloned()
                .collect())
        }

        async fn distinct_categories(&self) -> Result<Vec<String>> {
            let mut categories: Vec<String> = self.0.iter().map(|p| p.category.clone()).collect();
            categories.sort();
            categories.dedup();
            Ok(categories)
        }
    }

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Shoe {}", id),
            brand: "Nike".to_string(),
            category: category.to_string(),
            price: 99.0,
            image_url: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_fixed_catalog() {
        let catalog = FixedCatalog(vec![product("1", "running"), product("2", "boots")]);

        let filter = ProductFilter::default().with_category("running");
        let found = catalog.find_by_filter(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        let categories = catalog.distinct_categories().await.unwrap();
        assert_eq!(categories, vec!["boots".to_string(), "running".to_string()]);
    }

    #[test]
    fn test_product_defaults_active() {
        let product: Product = serde_json::from_str(
            r#"{"id":"1","name":"Runner","brand":"Asics","category":"running","price":120.0}"#,
        )
        .unwrap();
        assert!(product.is_active);
    }
}
