//! External catalog lookup: a single outbound call to a third-party
//! product database, keyed by barcode.

pub mod lookup;

pub use lookup::{CatalogClient, CatalogProduct, DEFAULT_CATALOG_URL};
