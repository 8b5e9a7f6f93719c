//! # Product Catalog Boundary
//!
//! The engine consumes catalog data, it never owns it. [`ProductCatalog`]
//! is the boundary contract; [`MemoryCatalog`] is the in-process reference
//! implementation used by tests and the demo.

use std::collections::BTreeMap;
use std::sync::RwLock;

use botica_core::Product;

/// Catalog lookup consumed by the cart manager when adding items.
pub trait ProductCatalog: Send + Sync {
    /// Looks up a product by its exact item code.
    fn get_product(&self, item_code: &str) -> Option<Product>;

    /// Case-insensitive substring search over item code and product name.
    fn search(&self, query: &str) -> Vec<Product>;
}

/// In-memory catalog keyed by item code. Read-mostly, so an RwLock.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<BTreeMap<String, Product>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        MemoryCatalog {
            products: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a catalog preloaded with the given products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = MemoryCatalog::new();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    /// Inserts or replaces a product.
    pub fn insert(&self, product: Product) {
        let mut products = self.products.write().expect("catalog lock poisoned");
        products.insert(product.item_code.clone(), product);
    }
}

impl ProductCatalog for MemoryCatalog {
    fn get_product(&self, item_code: &str) -> Option<Product> {
        let products = self.products.read().expect("catalog lock poisoned");
        products.get(item_code).cloned()
    }

    fn search(&self, query: &str) -> Vec<Product> {
        let query = query.trim().to_lowercase();
        let products = self.products.read().expect("catalog lock poisoned");
        products
            .values()
            .filter(|product| {
                query.is_empty()
                    || product.item_code.to_lowercase().contains(&query)
                    || product.product_name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(item_code: &str, name: &str) -> Product {
        Product {
            item_code: item_code.to_string(),
            product_name: name.to_string(),
            unit_price_centavos: 599,
            unit: "tablet".to_string(),
            category: "Pain Relief".to_string(),
            brand: "PharmaCo".to_string(),
            dosage: "500mg".to_string(),
            requires_prescription: false,
            barcode: None,
        }
    }

    #[test]
    fn test_get_product() {
        let catalog = MemoryCatalog::with_products([product("MED001", "Paracetamol 500mg")]);

        assert!(catalog.get_product("MED001").is_some());
        assert!(catalog.get_product("MED999").is_none());
    }

    #[test]
    fn test_search_matches_code_and_name() {
        let catalog = MemoryCatalog::with_products([
            product("MED001", "Paracetamol 500mg"),
            product("MED002", "Amoxicillin 250mg"),
        ]);

        assert_eq!(catalog.search("paraceta").len(), 1);
        assert_eq!(catalog.search("med0").len(), 2);
        assert_eq!(catalog.search("ibuprofen").len(), 0);
        // Empty query returns everything
        assert_eq!(catalog.search("  ").len(), 2);
    }
}
