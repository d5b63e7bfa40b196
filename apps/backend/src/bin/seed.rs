//! # Seed Data Generator
//!
//! Fills a ledger with a small, believable shop day for development.
//!
//! ## Usage
//! ```bash
//! # Seed the configured database
//! cargo run -p shopkeep-backend --bin seed
//!
//! # Specify database path
//! cargo run -p shopkeep-backend --bin seed -- --db ./data/shopkeep.db
//!
//! # Use a specific config file
//! cargo run -p shopkeep-backend --bin seed -- --config ./shopkeep.toml
//! ```
//!
//! Everything goes through the regular commands, so validation, logging and
//! persistence behave exactly as they do for a user.

use std::env;
use std::path::PathBuf;

use shopkeep_backend::commands::customer::add_customer;
use shopkeep_backend::commands::expense::{add_expense, quick_expense, QuickExpenseRequest};
use shopkeep_backend::commands::product::add_product;
use shopkeep_backend::commands::sale::{sell_product, SellRequest};
use shopkeep_backend::commands::summary::get_summary;
use shopkeep_backend::state::ConfigState;
use shopkeep_backend::{init_tracing, App};
use shopkeep_core::{CustomerForm, ExpenseForm, Money, PriceTier, ProductForm};

/// (name, cost, selling, discounted, stock)
const PRODUCTS: &[(&str, &str, &str, &str, &str)] = &[
    ("Green Tea 100g", "12000", "18000", "15000", "40"),
    ("Sunflower Oil 1L", "17500", "22000", "19500", "24"),
    ("Rice Devzira 1kg", "21000", "28000", "25000", "60"),
    ("Sugar 1kg", "11000", "14000", "12500", "50"),
    ("Notebook A5", "4000", "7000", "5500", "100"),
];

/// (product id, quantity, tier)
const SALES: &[(u64, i64, PriceTier)] = &[
    (1, 5, PriceTier::Selling),
    (2, 3, PriceTier::Discounted),
    (3, 12, PriceTier::Selling),
    (5, 20, PriceTier::Discounted),
    (1, 2, PriceTier::Selling),
];

/// (category, amount, description)
const EXPENSES: &[(&str, &str, &str)] = &[
    ("Rent", "350000", "October"),
    ("Utilities", "48000", "Electricity"),
    ("Transport", "25000", ""),
];

const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Dilnoza", "dilnoza@example.com", "+998 90 123 45 67"),
    ("Jasur", "jasur@example.com", "+998 93 765 43 21"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shopkeep Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: platform data dir)");
                println!("  -c, --config <PATH>  Config file path (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    let mut config = ConfigState::load(config_path)?;
    if db_path.is_some() {
        config.database_path = db_path;
    }

    println!("🌱 Shopkeep Seed Data Generator");
    println!("===============================");
    println!("Store: {}", config.store_name);
    println!();

    let app = App::bootstrap(config).await?;
    println!("✓ Connected to database");

    let existing = app.ledger.with_ledger(|l| l.inventory().len()).await;
    if existing > 0 {
        println!("⚠ Ledger already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        app.shutdown().await;
        return Ok(());
    }

    for (name, cost, selling, discounted, stock) in PRODUCTS {
        let form = ProductForm {
            name: name.to_string(),
            cost_price: cost.to_string(),
            selling_price: selling.to_string(),
            discounted_price: discounted.to_string(),
            stock: stock.to_string(),
        };
        add_product(&app.db, &app.ledger, form).await?;
    }
    println!("✓ {} products", PRODUCTS.len());

    for (product_id, quantity, price_tier) in SALES {
        let request = SellRequest {
            product_id: *product_id,
            quantity: *quantity,
            price_tier: *price_tier,
        };
        sell_product(&app.db, &app.ledger, request).await?;
    }
    println!("✓ {} sales", SALES.len());

    for (category, amount, description) in EXPENSES {
        let form = ExpenseForm {
            category: category.to_string(),
            amount: amount.to_string(),
            description: description.to_string(),
        };
        add_expense(&app.db, &app.ledger, form).await?;
    }
    let lunch = QuickExpenseRequest {
        category: "Food".to_string(),
        amount: Money::from_major(30_000),
    };
    quick_expense(&app.db, &app.ledger, lunch).await?;
    println!("✓ {} expenses", EXPENSES.len() + 1);

    for (name, email, phone) in CUSTOMERS {
        let form = CustomerForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        };
        add_customer(&app.db, &app.ledger, form).await?;
    }
    println!("✓ {} customers", CUSTOMERS.len());

    let summary = get_summary(&app.ledger, &app.config).await.formatted;
    println!();
    println!("Summary");
    println!("  Investment:       {}", summary.total_investment);
    println!("  Remaining stock:  {}", summary.remaining_stock_value);
    println!("  Revenue:          {}", summary.total_revenue);
    println!("  Cost of sold:     {}", summary.cost_of_sold_items);
    println!("  Profit:           {}", summary.profit);
    println!("  Expenses:         {}", summary.total_expenses);
    println!("  Available cash:   {}", summary.available_cash);

    app.shutdown().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
