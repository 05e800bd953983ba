use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inventory item identifier, assigned by the store on insert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One inventory record: local id, status flag, nested product data.
///
/// `status` mirrors the external catalog's convention (`1` = found); the
/// store never produces any other value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub status: i64,
    pub product: ProductRecord,
}

/// Descriptive and commercial fields of an item.
///
/// The six canonical fields are always present. Keys written by a patch
/// that fall outside the canonical schema are kept verbatim in `extra` and
/// round-trip through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub brands: String,
    pub ingredients_text: String,
    pub price: f64,
    pub stock: u64,
    pub barcode: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ProductRecord {
    /// The documented fallback values used when a creation draft omits a
    /// field.
    fn default() -> Self {
        Self {
            product_name: "Unknown Product".to_owned(),
            brands: "Unknown Brand".to_owned(),
            ingredients_text: String::new(),
            price: 0.0,
            stock: 0,
            barcode: String::new(),
            extra: Map::new(),
        }
    }
}

/// Fields accepted when creating an item. Everything is optional; omitted
/// fields fall back to the defaults in [`ProductRecord::default`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl ProductDraft {
    pub fn into_record(self) -> ProductRecord {
        let defaults = ProductRecord::default();
        ProductRecord {
            product_name: self.product_name.unwrap_or(defaults.product_name),
            brands: self.brands.unwrap_or(defaults.brands),
            ingredients_text: self.ingredients_text.unwrap_or(defaults.ingredients_text),
            price: self.price.unwrap_or(defaults.price),
            stock: self.stock.unwrap_or(defaults.stock),
            barcode: self.barcode.unwrap_or(defaults.barcode),
            extra: Map::new(),
        }
    }
}
