/// Plain-text liveness probe.
pub async fn home() -> &'static str {
    "Inventory API is running."
}
