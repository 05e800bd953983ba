//! The sequential text menu.

use std::io::{self, Write};

use serde_json::{Map, json};

use stockroom_inventory::{InventoryItem, ProductDraft};

use crate::client::{ApiClient, ApiError};

pub async fn run(client: &ApiClient) -> anyhow::Result<()> {
    loop {
        print_menu();
        let choice = prompt("Choose an option: ")?;
        match choice.as_str() {
            "1" => view_all_items(client).await,
            "2" => view_single_item(client).await?,
            "3" => add_new_item(client).await?,
            "4" => update_price_or_stock(client).await?,
            "5" => delete_item(client).await?,
            "6" => add_item_from_barcode(client).await?,
            "0" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn print_menu() {
    println!("\n=== Inventory Management ===");
    println!("1. View all inventory items");
    println!("2. View a single item by ID");
    println!("3. Add a new inventory item");
    println!("4. Update item price or stock");
    println!("5. Delete an item");
    println!("6. Add item by barcode lookup");
    println!("0. Exit");
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn print_item_summary(item: &InventoryItem) {
    println!("ID: {}", item.id);
    println!("  Name: {}", item.product.product_name);
    println!("  Brand: {}", item.product.brands);
    println!("  Price: {}", item.product.price);
    println!("  Stock: {}", item.product.stock);
    println!("  Barcode: {}", item.product.barcode);
}

fn print_connection_hint() {
    println!("Error: Could not connect to the API. Is the server running?");
}

async fn view_all_items(client: &ApiClient) {
    match client.list_items().await {
        Ok(items) => {
            println!("\n--- Inventory Items ---");
            for item in &items {
                print_item_summary(item);
                println!("------------------------");
            }
        }
        Err(ApiError::Connection(_)) => print_connection_hint(),
        Err(_) => println!("Error: Could not fetch inventory."),
    }
}

async fn view_single_item(client: &ApiClient) -> anyhow::Result<()> {
    let Ok(id) = prompt("Enter the item ID: ")?.parse::<u64>() else {
        println!("Invalid ID.");
        return Ok(());
    };

    match client.get_item(id).await {
        Ok(item) => {
            println!("\n--- Item Details ---");
            print_item_summary(&item);
            println!("  Ingredients: {}", item.product.ingredients_text);
            println!("---------------------");
        }
        Err(ApiError::NotFound) => println!("Item not found."),
        Err(ApiError::Connection(_)) => print_connection_hint(),
        Err(_) => println!("Error: Could not fetch item."),
    }
    Ok(())
}

async fn add_new_item(client: &ApiClient) -> anyhow::Result<()> {
    println!("\nEnter item information:");
    let name = prompt("Product name: ")?;
    let brand = prompt("Brand: ")?;
    let ingredients = prompt("Ingredients text: ")?;
    // Unparseable numbers fall back to the service defaults.
    let price = prompt("Price (example: 3.99): ")?.parse().unwrap_or(0.0);
    let stock = prompt("Stock (example: 10): ")?.parse().unwrap_or(0);
    let barcode = prompt("Barcode: ")?;

    let draft = ProductDraft {
        product_name: Some(name),
        brands: Some(brand),
        ingredients_text: Some(ingredients),
        price: Some(price),
        stock: Some(stock),
        barcode: Some(barcode),
    };

    match client.create_item(&draft).await {
        Ok(item) => {
            println!("\nNew item added:");
            println!("ID: {}", item.id);
            println!("Name: {}", item.product.product_name);
        }
        Err(ApiError::Connection(_)) => print_connection_hint(),
        Err(_) => println!("Error: Could not add new item."),
    }
    Ok(())
}

async fn update_price_or_stock(client: &ApiClient) -> anyhow::Result<()> {
    let Ok(id) = prompt("Enter the item ID to update: ")?.parse::<u64>() else {
        println!("Invalid ID.");
        return Ok(());
    };

    println!("What would you like to update?");
    println!("1. Price");
    println!("2. Stock");
    let choice = prompt("Enter choice (1 or 2): ")?;

    let mut fields = Map::new();
    match choice.as_str() {
        "1" => {
            let Ok(price) = prompt("Enter new price: ")?.parse::<f64>() else {
                println!("Invalid price. Update cancelled.");
                return Ok(());
            };
            fields.insert("price".to_owned(), json!(price));
        }
        "2" => {
            let Ok(stock) = prompt("Enter new stock: ")?.parse::<u64>() else {
                println!("Invalid stock. Update cancelled.");
                return Ok(());
            };
            fields.insert("stock".to_owned(), json!(stock));
        }
        _ => {
            println!("Invalid choice. Update cancelled.");
            return Ok(());
        }
    }

    match client.patch_item(id, &fields).await {
        Ok(item) => {
            println!("\nItem updated:");
            println!("ID: {}", item.id);
            println!("Name: {}", item.product.product_name);
            println!("Price: {}", item.product.price);
            println!("Stock: {}", item.product.stock);
        }
        Err(ApiError::NotFound) => println!("Item not found."),
        Err(ApiError::Connection(_)) => print_connection_hint(),
        Err(_) => println!("Error: Could not update item."),
    }
    Ok(())
}

async fn delete_item(client: &ApiClient) -> anyhow::Result<()> {
    let Ok(id) = prompt("Enter the item ID to delete: ")?.parse::<u64>() else {
        println!("Invalid ID.");
        return Ok(());
    };

    match client.delete_item(id).await {
        Ok(()) => println!("Item deleted successfully."),
        Err(ApiError::NotFound) => println!("Item not found."),
        Err(ApiError::Connection(_)) => print_connection_hint(),
        Err(_) => println!("Error: Could not delete item."),
    }
    Ok(())
}

async fn add_item_from_barcode(client: &ApiClient) -> anyhow::Result<()> {
    let barcode = prompt("Enter barcode to look up: ")?;

    match client.create_from_barcode(&barcode).await {
        Ok(item) => {
            println!("\nItem added from catalog:");
            println!("ID: {}", item.id);
            println!("Name: {}", item.product.product_name);
            println!("Brand: {}", item.product.brands);
            println!("Barcode: {}", item.product.barcode);
        }
        Err(ApiError::NotFound) => println!("Product not found in external API."),
        Err(ApiError::Connection(_)) => print_connection_hint(),
        Err(_) => println!("Error: Could not add item from barcode."),
    }
    Ok(())
}
