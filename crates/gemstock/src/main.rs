//! gemstock - jewelry shop inventory tracker
//!
//! This is the command-line entry point. It wires together:
//! - Configuration loading
//! - Store initialization (data directory created on startup)
//! - Catalog operations and summaries
//! - Text or JSON output

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gemstock_api::{ItemStatus, ItemUpdate};
use gemstock_config::{load_config_or_default, Settings};
use gemstock_core::Catalog;
use gemstock_store::{JsonFileStore, Store};
use gemstock_util::{default_config_path, ItemId, GEMSTOCK_CONFIG_ENV, GEMSTOCK_DATA_DIR_ENV};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// gemstock - Inventory and profit tracking for a jewelry shop
#[derive(Parser, Debug)]
#[command(name = "gemstock")]
#[command(about = "Inventory and profit tracking for a jewelry shop", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/gemstock/config.toml)
    #[arg(short, long, global = true, env = GEMSTOCK_CONFIG_ENV, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set GEMSTOCK_DATA_DIR env var)
    #[arg(short, long, global = true, env = GEMSTOCK_DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new item to the inventory
    Add {
        /// Kind of piece, e.g. ring
        #[arg(long = "type")]
        item_type: String,

        /// Category, e.g. gold
        #[arg(long)]
        category: String,

        /// Cost price
        #[arg(long, value_parser = parse_price, allow_negative_numbers = true)]
        cost: f64,
    },

    /// Show the current inventory
    List {
        /// Only show items with this status
        #[arg(long)]
        status: Option<ItemStatus>,
    },

    /// Mark an available item as sold
    Sell {
        id: ItemId,

        /// Selling price
        #[arg(value_parser = parse_price, allow_negative_numbers = true)]
        price: f64,
    },

    /// Update fields of an item
    Update {
        id: ItemId,

        #[arg(long = "type")]
        item_type: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_parser = parse_price, allow_negative_numbers = true)]
        cost: Option<f64>,

        #[arg(long, value_parser = parse_price, allow_negative_numbers = true, conflicts_with = "clear_selling_price")]
        selling_price: Option<f64>,

        /// Remove the selling price
        #[arg(long)]
        clear_selling_price: bool,

        #[arg(long)]
        status: Option<ItemStatus>,
    },

    /// Cost, revenue and profit totals
    Profit,

    /// Item counts by status, type and category
    Summary,

    /// Fill an empty inventory with demo items
    Seed,
}

/// Parse a price argument, rejecting NaN and infinities
fn parse_price(s: &str) -> Result<f64, String> {
    let price: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err(format!("price must be a finite number, got {}", s))
    }
}

impl Command {
    fn item_update(
        item_type: Option<String>,
        category: Option<String>,
        cost: Option<f64>,
        selling_price: Option<f64>,
        clear_selling_price: bool,
        status: Option<ItemStatus>,
    ) -> ItemUpdate {
        ItemUpdate {
            item_type,
            category,
            cost_price: cost,
            selling_price: if clear_selling_price {
                Some(None)
            } else {
                selling_price.map(Some)
            },
            status,
        }
    }
}

/// Runtime state shared by all commands
struct App {
    settings: Settings,
    catalog: Catalog,
    json: bool,
}

impl App {
    fn new(args: &Args) -> Result<Self> {
        let settings = load_config_or_default(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        let data_dir = args
            .data_dir
            .clone()
            .unwrap_or_else(|| settings.data_dir.clone());

        let store: Arc<dyn Store> = Arc::new(
            JsonFileStore::open(&data_dir)
                .with_context(|| format!("Failed to open data directory {:?}", data_dir))?,
        );
        if !store.is_healthy() {
            bail!("Store at {:?} is not usable", data_dir);
        }
        info!(data_dir = %data_dir.display(), "Store initialized");

        let catalog = Catalog::new(store);
        if settings.seed_demo_data {
            catalog
                .seed_demo_inventory()
                .context("Failed to seed demo inventory")?;
        }

        Ok(Self {
            settings,
            catalog,
            json: args.json,
        })
    }

    fn run(&self, command: Command) -> Result<ExitCode> {
        debug!(?command, "Running command");

        match command {
            Command::Add {
                item_type,
                category,
                cost,
            } => {
                let item = self.catalog.add_item(item_type, category, cost)?;
                self.emit(&item, || {
                    format!("Added item\n{}\n", render::item_line(&item, &self.settings))
                })?;
            }

            Command::List { status } => {
                let items: Vec<_> = self
                    .catalog
                    .list_inventory()?
                    .into_iter()
                    .filter(|item| status.is_none_or(|s| item.status == s))
                    .collect();
                self.emit(&items, || render::item_table(&items, &self.settings))?;
            }

            Command::Sell { id, price } => match self.catalog.mark_sold(id, price)? {
                Some(item) => {
                    self.emit(&item, || {
                        format!("Sold item\n{}\n", render::item_line(&item, &self.settings))
                    })?;
                }
                None => {
                    eprintln!("No available item with id {}", id);
                    return Ok(ExitCode::from(1));
                }
            },

            Command::Update {
                id,
                item_type,
                category,
                cost,
                selling_price,
                clear_selling_price,
                status,
            } => {
                let update = Command::item_update(
                    item_type,
                    category,
                    cost,
                    selling_price,
                    clear_selling_price,
                    status,
                );
                match self.catalog.update_item(id, &update)? {
                    Some(item) => {
                        self.emit(&item, || {
                            format!("Updated item\n{}\n", render::item_line(&item, &self.settings))
                        })?;
                    }
                    None => {
                        eprintln!("No item with id {}", id);
                        return Ok(ExitCode::from(1));
                    }
                }
            }

            Command::Profit => {
                let summary = self.catalog.profit_summary()?;
                self.emit(&summary, || render::profit_report(&summary, &self.settings))?;
            }

            Command::Summary => {
                let summary = self.catalog.inventory_summary()?;
                self.emit(&summary, || render::inventory_report(&summary, &self.settings))?;
            }

            Command::Seed => {
                let seeded = self.catalog.seed_demo_inventory()?;
                let message = if seeded {
                    "Demo inventory written\n"
                } else {
                    "Inventory is not empty, nothing seeded\n"
                };
                self.emit(&serde_json::json!({ "seeded": seeded }), || message.to_string())?;
            }
        }

        Ok(ExitCode::SUCCESS)
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging (stderr, so stdout stays clean for --json)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "gemstock starting");

    let app = App::new(&args)?;
    app.run(args.command)
}
