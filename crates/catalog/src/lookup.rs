use std::time::Duration;

use serde::Deserialize;

/// Base URL of the public product database.
pub const DEFAULT_CATALOG_URL: &str = "https://world.openfoodfacts.org";

/// One lookup attempt waits at most this long.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// The reduced product shape the service cares about. Every field is
/// optional; the upstream database omits or empties them freely.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    product: Option<CatalogProduct>,
}

/// HTTP client wrapper for the external product database.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Look a product up by barcode: one request, no retries.
    ///
    /// Network failure, a non-success HTTP status, an undecodable body, and
    /// an upstream `status` flag other than `1` all collapse to `None`;
    /// callers cannot distinguish a miss from an outage.
    pub async fn lookup(&self, barcode: &str) -> Option<CatalogProduct> {
        let url = format!("{}/api/v0/product/{}.json", self.base_url, barcode);

        let response = match self.http.get(&url).timeout(LOOKUP_TIMEOUT).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!("catalog request failed: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("catalog returned {}", response.status());
            return None;
        }

        let body: LookupResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!("catalog response undecodable: {err}");
                return None;
            }
        };

        if body.status != 1 {
            return None;
        }

        Some(body.product.unwrap_or_default())
    }
}
