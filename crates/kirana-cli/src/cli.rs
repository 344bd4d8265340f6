//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kirana - shop management for small businesses
#[derive(Parser)]
#[command(name = "kirana")]
#[command(about = "Self-hosted shop management with rule-based insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "kirana.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and create your shop
    Init {
        /// Shop name
        #[arg(long)]
        name: String,

        /// Business type (e.g. Grocery, Pharmacy, Stationery)
        #[arg(long, default_value = "Grocery")]
        business_type: String,

        /// Display currency symbol
        #[arg(long, default_value = "₹")]
        currency: String,
    },

    /// Show database status
    Status,

    /// Show the shop dashboard summary
    Dashboard,

    /// Manage products (list, add, delete, import, export)
    Products {
        #[command(subcommand)]
        action: Option<ProductsAction>,
    },

    /// Record a sale
    Sell {
        /// Product name
        product: String,

        /// Quantity sold
        #[arg(short, long)]
        quantity: f64,

        /// Unit price (defaults to the product's selling price)
        #[arg(short, long)]
        price: Option<f64>,

        /// Sale date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded sales
    Sales {
        /// Maximum number of sales to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Manage expenses (list, add, delete)
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Manage suppliers (list, add, link, delete)
    Suppliers {
        #[command(subcommand)]
        action: Option<SuppliersAction>,
    },

    /// Generate business insights from current shop data
    Insights {
        /// TOML file overriding rule thresholds
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Ask the assistant a question
    Chat {
        /// The question, e.g. "how much did I sell today?"
        message: String,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a
        /// network. By default the server requires a bearer API key set
        /// via KIRANA_API_KEY.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g. ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Reset the database (clear data)
    Reset {
        /// Soft reset: clear sales and expenses but keep shop, products,
        /// and suppliers. Without this flag the database file is deleted
        /// and re-initialization is required.
        #[arg(long)]
        soft: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products
    List,

    /// Add a product
    Add {
        /// Product name
        name: String,

        /// Category (e.g. Staples, Dairy)
        #[arg(long)]
        category: Option<String>,

        /// Initial stock level
        #[arg(short, long, default_value = "0")]
        quantity: f64,

        /// Restock trigger level
        #[arg(short, long, default_value = "0")]
        reorder_level: f64,

        /// Unit (kg, g, pcs, L)
        #[arg(short, long, default_value = "pcs")]
        unit: String,

        /// Selling price per unit
        #[arg(long)]
        selling_price: f64,

        /// Cost price per unit
        #[arg(long)]
        cost_price: f64,
    },

    /// Update a product's stock or prices
    Update {
        /// Product ID
        id: i64,

        /// New stock level
        #[arg(short, long)]
        quantity: Option<f64>,

        /// New restock trigger level
        #[arg(short, long)]
        reorder_level: Option<f64>,

        /// New selling price
        #[arg(long)]
        selling_price: Option<f64>,

        /// New cost price
        #[arg(long)]
        cost_price: Option<f64>,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: i64,
    },

    /// Bulk import products from a CSV file
    Import {
        /// CSV file with name/quantity/price columns
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export products to a CSV file
    Export {
        /// Output path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses
    List,

    /// Record an expense
    Add {
        /// Category: rent, electricity, staff_wages, transport, miscellaneous
        category: String,

        /// Amount
        #[arg(short, long)]
        amount: f64,

        /// What the expense was for
        #[arg(long)]
        description: Option<String>,

        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum SuppliersAction {
    /// List suppliers with their reliability scores
    List,

    /// Add a supplier
    Add {
        /// Supplier name
        name: String,

        /// Contact phone
        #[arg(long)]
        phone: Option<String>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Reliability score (1-10)
        #[arg(long, default_value = "5")]
        reliability: i64,

        /// Quality rating (1-10)
        #[arg(long, default_value = "5")]
        quality: i64,

        /// Average delivery time in days
        #[arg(long)]
        delivery_days: Option<u32>,
    },

    /// Link a supplier to a product they can restock
    Link {
        /// Supplier ID
        supplier_id: i64,

        /// Product ID
        product_id: i64,
    },

    /// Delete a supplier
    Delete {
        /// Supplier ID
        id: i64,
    },
}
