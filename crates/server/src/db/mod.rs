//! Database operations for the club `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` / `members` - Login accounts and member profiles
//! - `session` - Session storage (tower-sessions)
//! - `caddies` - Caddie roster
//! - `bookings` - Tee-time reservations
//! - `menu_items` / `orders` / `order_items` - Dining
//! - `events` / `event_registrations` - Club events
//! - `loyalty_transactions` - Loyalty ledger
//! - `notifications` - In-app notifications
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p fairway-cli -- migrate
//! ```

pub mod bookings;
pub mod caddies;
pub mod events;
pub mod loyalty;
pub mod members;
pub mod menu;
pub mod notifications;
pub mod orders;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use bookings::BookingRepository;
pub use caddies::CaddieRepository;
pub use events::EventRepository;
pub use loyalty::LoyaltyRepository;
pub use members::MemberRepository;
pub use menu::MenuRepository;
pub use notifications::NotificationRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, taken tee slot).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A check constraint rejected the write (e.g., negative balance).
    #[error("rejected: {0}")]
    Rejected(String),
}

impl RepositoryError {
    /// Map a sqlx error to `Conflict` when it is a unique violation.
    pub(crate) fn on_unique(e: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(e)
    }

    /// Map a sqlx error to `Rejected` when it is a check violation.
    pub(crate) fn on_check(e: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_check_violation()
        {
            return Self::Rejected(message.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
