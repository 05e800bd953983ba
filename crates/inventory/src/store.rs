use std::sync::Mutex;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::item::{InventoryItem, ItemId, ProductDraft, ProductRecord};

/// Result type used by store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested item id does not exist.
    #[error("item not found")]
    NotFound,

    /// A patch assigned a value of an incompatible JSON type to one of the
    /// canonical product fields.
    #[error("invalid value for field `{0}`")]
    InvalidPatch(String),
}

/// Store seam for inventory items.
///
/// The HTTP layer only reads and writes through this trait, so a real
/// persistence layer can replace the in-memory list later without touching
/// the route handlers.
pub trait InventoryStore: Send + Sync {
    /// All items, insertion order preserved.
    fn list(&self) -> Vec<InventoryItem>;

    fn get(&self, id: ItemId) -> Option<InventoryItem>;

    /// Appends a new item with the next id (max existing id + 1, or 1 when
    /// the store is empty) and `status = 1`, and returns it.
    fn insert(&self, draft: ProductDraft) -> InventoryItem;

    /// Overwrites the given keys of the item's product record. Keys outside
    /// the canonical schema pass through verbatim; either every key is
    /// applied or none is.
    fn patch(&self, id: ItemId, fields: Map<String, Value>) -> StoreResult<InventoryItem>;

    /// Removes the item. Not idempotent: a second delete of the same id
    /// reports [`StoreError::NotFound`].
    fn delete(&self, id: ItemId) -> StoreResult<()>;
}

/// In-memory implementation over a single mutex-guarded list.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    items: Mutex<Vec<InventoryItem>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the given items (ids are taken as-is).
    pub fn with_items(items: Vec<InventoryItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn list(&self) -> Vec<InventoryItem> {
        self.items.lock().unwrap().clone()
    }

    fn get(&self, id: ItemId) -> Option<InventoryItem> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    fn insert(&self, draft: ProductDraft) -> InventoryItem {
        let mut items = self.items.lock().unwrap();
        let next_id = items
            .iter()
            .map(|item| item.id.0)
            .max()
            .map_or(1, |max| max + 1);
        let item = InventoryItem {
            id: ItemId(next_id),
            status: 1,
            product: draft.into_record(),
        };
        items.push(item.clone());
        item
    }

    fn patch(&self, id: ItemId, fields: Map<String, Value>) -> StoreResult<InventoryItem> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound)?;

        // Apply to a copy first so a rejected key leaves the item untouched.
        let mut product = item.product.clone();
        apply_patch(&mut product, fields)?;
        item.product = product;
        Ok(item.clone())
    }

    fn delete(&self, id: ItemId) -> StoreResult<()> {
        let mut items = self.items.lock().unwrap();
        let pos = items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound)?;
        items.remove(pos);
        Ok(())
    }
}

fn apply_patch(product: &mut ProductRecord, fields: Map<String, Value>) -> StoreResult<()> {
    for (key, value) in fields {
        match key.as_str() {
            "product_name" => product.product_name = take_string(&key, value)?,
            "brands" => product.brands = take_string(&key, value)?,
            "ingredients_text" => product.ingredients_text = take_string(&key, value)?,
            "barcode" => product.barcode = take_string(&key, value)?,
            "price" => {
                product.price = value
                    .as_f64()
                    .ok_or_else(|| StoreError::InvalidPatch(key.clone()))?;
            }
            "stock" => {
                product.stock = value
                    .as_u64()
                    .ok_or_else(|| StoreError::InvalidPatch(key.clone()))?;
            }
            _ => {
                product.extra.insert(key, value);
            }
        }
    }
    Ok(())
}

fn take_string(key: &str, value: Value) -> StoreResult<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(StoreError::InvalidPatch(key.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            product_name: Some(name.to_owned()),
            ..ProductDraft::default()
        }
    }

    fn full_draft() -> ProductDraft {
        ProductDraft {
            product_name: Some("Test Product".to_owned()),
            brands: Some("Test Brand".to_owned()),
            ingredients_text: Some("Test ingredients".to_owned()),
            price: Some(9.99),
            stock: Some(5),
            barcode: Some("1111111111".to_owned()),
        }
    }

    fn patch_map(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn insert_into_empty_store_assigns_id_one() {
        let store = InMemoryInventoryStore::new();
        let item = store.insert(full_draft());
        assert_eq!(item.id, ItemId(1));
        assert_eq!(item.status, 1);
    }

    #[test]
    fn insert_assigns_max_plus_one() {
        let store = InMemoryInventoryStore::new();
        store.insert(draft("a"));
        store.insert(draft("b"));
        let third = store.insert(draft("c"));
        assert_eq!(third.id, ItemId(3));
    }

    #[test]
    fn insert_fills_defaults_for_omitted_fields() {
        let store = InMemoryInventoryStore::new();
        let item = store.insert(ProductDraft::default());
        assert_eq!(item.product.product_name, "Unknown Product");
        assert_eq!(item.product.brands, "Unknown Brand");
        assert_eq!(item.product.ingredients_text, "");
        assert_eq!(item.product.price, 0.0);
        assert_eq!(item.product.stock, 0);
        assert_eq!(item.product.barcode, "");
    }

    #[test]
    fn insert_then_get_round_trips_fields() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(full_draft());
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.product.product_name, "Test Product");
        assert_eq!(fetched.product.price, 9.99);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = InMemoryInventoryStore::new();
        assert!(store.get(ItemId(42)).is_none());
    }

    #[test]
    fn patch_overwrites_only_the_given_field() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(full_draft());

        let updated = store
            .patch(created.id, patch_map(&[("price", json!(4.50))]))
            .unwrap();

        assert_eq!(updated.product.price, 4.50);
        assert_eq!(updated.product.product_name, created.product.product_name);
        assert_eq!(updated.product.brands, created.product.brands);
        assert_eq!(updated.product.stock, created.product.stock);
        assert_eq!(updated.product.barcode, created.product.barcode);
    }

    #[test]
    fn patch_passes_unknown_keys_through_verbatim() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(full_draft());

        let updated = store
            .patch(created.id, patch_map(&[("supplier", json!("Acme Foods"))]))
            .unwrap();

        assert_eq!(updated.product.extra["supplier"], json!("Acme Foods"));
        // And it survives a read back.
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched.product.extra["supplier"], json!("Acme Foods"));
    }

    #[test]
    fn patch_rejects_wrong_typed_canonical_value() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(full_draft());

        let err = store
            .patch(
                created.id,
                patch_map(&[("price", json!("not a number")), ("stock", json!(3))]),
            )
            .unwrap_err();
        assert_eq!(err, StoreError::InvalidPatch("price".to_owned()));

        // The rejected patch must not have been partially applied.
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched.product.stock, 5);
    }

    #[test]
    fn patch_unknown_id_reports_not_found() {
        let store = InMemoryInventoryStore::new();
        let err = store
            .patch(ItemId(9), patch_map(&[("price", json!(1.0))]))
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn delete_then_get_reports_not_found() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(full_draft());
        store.delete(created.id).unwrap();
        assert!(store.get(created.id).is_none());
    }

    #[test]
    fn delete_is_not_idempotent() {
        let store = InMemoryInventoryStore::new();
        let created = store.insert(full_draft());
        store.delete(created.id).unwrap();
        assert_eq!(store.delete(created.id).unwrap_err(), StoreError::NotFound);
    }

    #[test]
    fn insert_after_deleting_highest_id_reissues_it() {
        // max+1 policy, not a counter: once the highest id is gone its value
        // is handed out again.
        let store = InMemoryInventoryStore::new();
        store.insert(draft("a"));
        let second = store.insert(draft("b"));
        store.delete(second.id).unwrap();
        let third = store.insert(draft("c"));
        assert_eq!(third.id, second.id);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = InMemoryInventoryStore::new();
        let a = store.insert(draft("a"));
        let b = store.insert(draft("b"));
        let c = store.insert(draft("c"));
        let ids: Vec<ItemId> = store.list().into_iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every insert returns an id strictly greater than
            /// all ids present before the call (and 1 on an empty store),
            /// and ids stay unique, regardless of interleaved deletes.
            #[test]
            fn insert_ids_exceed_all_existing(
                names in prop::collection::vec("[A-Za-z][A-Za-z ]{0,23}", 1..32),
                deletes in prop::collection::vec(any::<bool>(), 1..32)
            ) {
                let store = InMemoryInventoryStore::new();
                let mut live: Vec<ItemId> = Vec::new();

                for (i, name) in names.iter().enumerate() {
                    if deletes[i % deletes.len()] {
                        if let Some(id) = live.pop() {
                            store.delete(id).unwrap();
                        }
                    }

                    let before: Vec<u64> =
                        store.list().into_iter().map(|item| item.id.0).collect();
                    let item = store.insert(ProductDraft {
                        product_name: Some(name.clone()),
                        ..ProductDraft::default()
                    });

                    prop_assert!(before.iter().all(|&id| item.id.0 > id));
                    if before.is_empty() {
                        prop_assert_eq!(item.id, ItemId(1));
                    }
                    live.push(item.id);

                    let mut ids: Vec<u64> =
                        store.list().into_iter().map(|item| item.id.0).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), store.list().len());
                }
            }
        }
    }
}
