//! Kirana CLI - shop management for small businesses
//!
//! Usage:
//!   kirana init --name "My Shop"   Initialize database and shop
//!   kirana products add Rice --selling-price 30 --cost-price 20
//!   kirana sell Rice -q 2          Record a sale
//!   kirana insights                Generate business insights
//!   kirana serve --port 3000       Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init {
            name,
            business_type,
            currency,
        } => commands::cmd_init(&cli.db, &name, &business_type, &currency),
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::Dashboard => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_dashboard(&db)
        }
        Commands::Products { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(ProductsAction::List) => commands::cmd_products_list(&db),
                Some(ProductsAction::Add {
                    name,
                    category,
                    quantity,
                    reorder_level,
                    unit,
                    selling_price,
                    cost_price,
                }) => commands::cmd_products_add(
                    &db,
                    &name,
                    category.as_deref(),
                    quantity,
                    reorder_level,
                    &unit,
                    selling_price,
                    cost_price,
                ),
                Some(ProductsAction::Update {
                    id,
                    quantity,
                    reorder_level,
                    selling_price,
                    cost_price,
                }) => commands::cmd_products_update(
                    &db,
                    id,
                    quantity,
                    reorder_level,
                    selling_price,
                    cost_price,
                ),
                Some(ProductsAction::Delete { id }) => commands::cmd_products_delete(&db, id),
                Some(ProductsAction::Import { file }) => commands::cmd_products_import(&db, &file),
                Some(ProductsAction::Export { output }) => {
                    commands::cmd_products_export(&db, &output)
                }
            }
        }
        Commands::Sell {
            product,
            quantity,
            price,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_sell(&db, &product, quantity, price, date.as_deref())
        }
        Commands::Sales { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_sales_list(&db, limit)
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(ExpensesAction::List) => commands::cmd_expenses_list(&db),
                Some(ExpensesAction::Add {
                    category,
                    amount,
                    description,
                    date,
                }) => commands::cmd_expenses_add(
                    &db,
                    &category,
                    amount,
                    description.as_deref(),
                    date.as_deref(),
                ),
                Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(&db, id),
            }
        }
        Commands::Suppliers { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None | Some(SuppliersAction::List) => commands::cmd_suppliers_list(&db),
                Some(SuppliersAction::Add {
                    name,
                    phone,
                    email,
                    reliability,
                    quality,
                    delivery_days,
                }) => commands::cmd_suppliers_add(
                    &db,
                    &name,
                    phone.as_deref(),
                    email.as_deref(),
                    reliability,
                    quality,
                    delivery_days,
                ),
                Some(SuppliersAction::Link {
                    supplier_id,
                    product_id,
                }) => commands::cmd_suppliers_link(&db, supplier_id, product_id),
                Some(SuppliersAction::Delete { id }) => commands::cmd_suppliers_delete(&db, id),
            }
        }
        Commands::Insights { config } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights(&db, config.as_deref())
        }
        Commands::Chat { message } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_chat(&db, &message)
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, static_dir.as_deref()).await,
        Commands::Reset { soft, yes } => commands::cmd_reset(&cli.db, soft, yes),
    }
}
