use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{AppError, LedgerService};
use crate::domain::format_amount;

/// Tallybook - Customer Balance Ledger
#[derive(Parser)]
#[command(name = "tallybook")]
#[command(about = "A local-first customer balance ledger backed by SQLite")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "customers.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Add a new customer with an initial balance
    Add {
        /// Customer name
        name: String,

        /// Initial balance (e.g., "100.00" or "100")
        balance: String,
    },

    /// Record a payment against a customer's balance
    Pay {
        /// Customer name
        name: String,

        /// Payment amount (e.g., "30.00" or "30")
        amount: String,
    },

    /// Look up a customer's balance by name
    Search {
        /// Customer name
        name: String,
    },

    /// Delete all customers with the given name
    Delete {
        /// Customer name
        name: String,
    },

    /// List all customers
    List,

    /// Export customers to CSV or JSON
    Export {
        /// Output file (stdout if omitted, overwritten if it exists)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json
        #[arg(short, long, default_value = "csv", value_parser = ["csv", "json"])]
        format: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let result = match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
                Ok(())
            }

            Commands::Add { name, balance } => {
                let service = LedgerService::connect(&self.database).await?;
                run_add_command(&service, &name, &balance).await
            }

            Commands::Pay { name, amount } => {
                let service = LedgerService::connect(&self.database).await?;
                run_pay_command(&service, &name, &amount).await
            }

            Commands::Search { name } => {
                let service = LedgerService::connect(&self.database).await?;
                run_search_command(&service, &name).await
            }

            Commands::Delete { name } => {
                let service = LedgerService::connect(&self.database).await?;
                run_delete_command(&service, &name).await
            }

            Commands::List => {
                let service = LedgerService::connect(&self.database).await?;
                run_list_command(&service).await
            }

            Commands::Export { output, format } => {
                let service = LedgerService::connect(&self.database).await?;
                run_export_command(&service, output.as_deref(), &format).await
            }
        };

        // Bad input and lookup misses become a status line; only
        // infrastructure failures abort the process.
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is_user_error() => {
                println!("{}", err);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

async fn run_add_command(
    service: &LedgerService,
    name: &str,
    balance: &str,
) -> Result<(), AppError> {
    let customer = service.add_customer(name, balance).await?;
    println!("Customer {} added!", customer.name);
    Ok(())
}

async fn run_pay_command(
    service: &LedgerService,
    name: &str,
    amount: &str,
) -> Result<(), AppError> {
    let new_balance = service.record_payment(name, amount).await?;
    println!(
        "Payment recorded! New balance: {}",
        format_amount(new_balance)
    );
    Ok(())
}

async fn run_search_command(service: &LedgerService, name: &str) -> Result<(), AppError> {
    let balance = service.search(name).await?;
    println!("{}: {}", name, format_amount(balance));
    Ok(())
}

async fn run_delete_command(service: &LedgerService, name: &str) -> Result<(), AppError> {
    let removed = service.delete_customer(name).await?;
    if removed == 0 {
        println!("No customers named {} found.", name);
    } else {
        println!("Deleted {} customer(s) named {}.", removed, name);
    }
    Ok(())
}

async fn run_list_command(service: &LedgerService) -> Result<(), AppError> {
    let customers = service.list_customers().await?;
    if customers.is_empty() {
        println!("No customers found.");
    } else {
        println!("{:<6} {:<20} {:>12}", "ID", "NAME", "BALANCE");
        println!("{}", "-".repeat(40));
        for customer in customers {
            println!(
                "{:<6} {:<20} {:>12}",
                customer.id,
                customer.name,
                format_amount(customer.balance)
            );
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &LedgerService,
    output: Option<&str>,
    format: &str,
) -> Result<(), AppError> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    // File::create truncates, so re-exporting overwrites the previous file
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    // clap restricts format to "csv" or "json"
    let count = if format == "json" {
        let snapshot = exporter.export_full_json(writer).await?;
        snapshot.customers.len()
    } else {
        exporter.export_customers_csv(writer).await?
    };

    if let Some(path) = output {
        println!("Exported {} customer(s) to {}", count, path);
    }

    Ok(())
}
