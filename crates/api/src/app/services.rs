use std::sync::Arc;

use stockroom_catalog::{CatalogClient, DEFAULT_CATALOG_URL};
use stockroom_inventory::{
    InMemoryInventoryStore, InventoryItem, InventoryStore, ItemId, ProductRecord,
};

/// Process-scope services injected into every handler.
///
/// The store is held behind its trait so a persistent implementation can be
/// swapped in without touching the routes.
pub struct AppServices {
    pub store: Arc<dyn InventoryStore>,
    pub catalog: CatalogClient,
}

/// Wire the services the binary runs with: a pre-seeded in-memory store and
/// the public catalog endpoint (overridable via `CATALOG_URL`).
pub fn build_services() -> AppServices {
    let catalog_url =
        std::env::var("CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());

    AppServices {
        store: Arc::new(InMemoryInventoryStore::with_items(seed_items())),
        catalog: CatalogClient::new(catalog_url),
    }
}

/// Starting inventory for the service binary. Tests build their own empty
/// store instead.
fn seed_items() -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: ItemId(1),
            status: 1,
            product: ProductRecord {
                product_name: "Organic Almond Milk".to_owned(),
                brands: "Silk".to_owned(),
                ingredients_text: "Filtered water, almonds, cane sugar".to_owned(),
                price: 3.99,
                stock: 10,
                barcode: "1234567890".to_owned(),
                ..ProductRecord::default()
            },
        },
        InventoryItem {
            id: ItemId(2),
            status: 1,
            product: ProductRecord {
                product_name: "Granola Bar".to_owned(),
                brands: "Nature Valley".to_owned(),
                ingredients_text: "Oats, sugar, honey".to_owned(),
                price: 1.50,
                stock: 25,
                barcode: "0987654321".to_owned(),
                ..ProductRecord::default()
            },
        },
    ]
}
