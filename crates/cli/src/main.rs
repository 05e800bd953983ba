//! Interactive text-menu client for the inventory service.
//!
//! Pure IO glue: every menu action maps to one HTTP request.

use clap::Parser;

mod client;
mod menu;

use client::ApiClient;

#[derive(Debug, Parser)]
#[command(name = "stockroom-cli", version, about = "Inventory management menu")]
struct Args {
    /// Base URL of the running inventory service.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = ApiClient::new(args.base_url);
    menu::run(&client).await
}
