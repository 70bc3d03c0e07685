//! Fairway CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! fairway migrate
//!
//! # Create an admin user
//! fairway admin create -e admin@example.com -n "Admin Name" -p <password>
//!
//! # Seed development data (caddies, menu items, events)
//! fairway seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create admin/staff users
//! - `seed` - Seed database with development data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fairway")]
#[command(author, version, about = "Fairway club management CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin and staff users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with development data
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin or staff user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name, for the audit log
        #[arg(short, long)]
        name: String,

        /// Password (hashed with Argon2id before storage)
        #[arg(short, long)]
        password: String,

        /// Role (`admin` or `staff`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
                role,
            } => {
                commands::admin::create_user(&email, &name, &password, &role).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
