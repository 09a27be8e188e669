use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::BudGuideError;
use crate::types::Product;

/// On-disk fixture format: one scraped dispensary menu snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    pub dispensary: String,
    pub scraped_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

/// An immutable, ordered snapshot of products for one consultation context.
/// Validated once at load time; the consultation core never mutates it.
#[derive(Debug, Clone)]
pub struct Catalog {
    dispensary: String,
    scraped_at: DateTime<Utc>,
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(
        dispensary: impl Into<String>,
        scraped_at: DateTime<Utc>,
        products: Vec<Product>,
    ) -> Result<Self, BudGuideError> {
        validate(&products)?;
        Ok(Self {
            dispensary: dispensary.into(),
            scraped_at,
            products,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, BudGuideError> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| BudGuideError::Catalog(format!("invalid catalog JSON: {e}")))?;
        Self::new(file.dispensary, file.scraped_at, file.products)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BudGuideError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            BudGuideError::Catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            dispensary = catalog.dispensary,
            products = catalog.products.len(),
            "loaded catalog snapshot"
        );
        Ok(catalog)
    }

    pub fn dispensary(&self) -> &str {
        &self.dispensary
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        self.scraped_at
    }

    /// Products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Stocked products only, catalog order preserved.
    pub fn in_stock(&self) -> Vec<Product> {
        self.products.iter().filter(|p| p.in_stock).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Programmer errors in catalog data are caught here, at load time —
/// the consultation core assumes well-formed products.
fn validate(products: &[Product]) -> Result<(), BudGuideError> {
    let mut seen = HashSet::new();
    for product in products {
        if product.id.trim().is_empty() {
            return Err(BudGuideError::Catalog(format!(
                "product \"{}\" has an empty id",
                product.name
            )));
        }
        if !seen.insert(product.id.as_str()) {
            return Err(BudGuideError::Catalog(format!(
                "duplicate product id \"{}\"",
                product.id
            )));
        }
        if product.thc.amount() < 0.0 || product.cbd.amount() < 0.0 {
            return Err(BudGuideError::Catalog(format!(
                "product \"{}\" has a negative potency",
                product.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "dispensary": "Premo Cannabis",
        "scraped_at": "2025-11-02T09:30:00Z",
        "products": [
            {
                "id": "premo_flower_001",
                "name": "Granddaddy Purple",
                "brand": "Premo House",
                "category": "flower",
                "strain": "indica",
                "thc": {"percent": 19.2},
                "cbd": {"percent": 0.3},
                "effects": ["sleepy", "relaxed"],
                "dominant_terpene": "myrcene",
                "price": 52.0,
                "description": "Legendary indica with grape-like flavor"
            },
            {
                "id": "premo_edible_001",
                "name": "Sour Gummies",
                "brand": "Emerald City Edibles",
                "category": "edibles",
                "strain": "hybrid",
                "thc": {"milligrams": 10.0},
                "cbd": {"milligrams": 0.0},
                "price": 18.0,
                "in_stock": false
            }
        ]
    }"#;

    #[test]
    fn loads_fixture_and_preserves_order() {
        let catalog = Catalog::from_json_str(FIXTURE).unwrap();
        assert_eq!(catalog.dispensary(), "Premo Cannabis");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].id, "premo_flower_001");
        assert_eq!(catalog.products()[1].id, "premo_edible_001");
    }

    #[test]
    fn get_resolves_only_known_ids() {
        let catalog = Catalog::from_json_str(FIXTURE).unwrap();
        assert!(catalog.get("premo_flower_001").is_some());
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn in_stock_filters_and_keeps_order() {
        let catalog = Catalog::from_json_str(FIXTURE).unwrap();
        let stocked = catalog.in_stock();
        assert_eq!(stocked.len(), 1);
        assert_eq!(stocked[0].id, "premo_flower_001");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = FIXTURE.replace("premo_edible_001", "premo_flower_001");
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate product id"));
    }

    #[test]
    fn rejects_negative_potency() {
        let json = FIXTURE.replace("{\"percent\": 19.2}", "{\"percent\": -1.0}");
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("negative potency"));
    }

    #[test]
    fn rejects_empty_id() {
        let json = FIXTURE.replace("premo_flower_001", "  ");
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("empty id"));
    }
}
