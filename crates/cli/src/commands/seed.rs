//! Seed the database with development data.
//!
//! Inserts a caddie roster, a clubhouse menu, and a few upcoming events so a
//! fresh database is usable immediately. Each section is skipped if its table
//! already has rows, so re-running the command is safe.

use chrono::{Days, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use fairway_core::{MenuCategory, Price};
use fairway_server::db::{
    self, CaddieRepository, EventRepository, MenuRepository, RepositoryError,
    caddies::NewCaddie, events::NewEvent, menu::NewMenuItem,
};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error during an insert.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Seed caddies, menu items, and events.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        super::database_url().ok_or(SeedError::MissingEnvVar("FAIRWAY_DATABASE_URL"))?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    seed_caddies(&pool).await?;
    seed_menu(&pool).await?;
    seed_events(&pool).await?;

    info!("Seeding complete!");
    Ok(())
}

async fn seed_caddies(pool: &sqlx::PgPool) -> Result<(), SeedError> {
    let repo = CaddieRepository::new(pool);

    if !repo.list(false).await?.is_empty() {
        info!("Caddies already present, skipping");
        return Ok(());
    }

    let roster = [
        (
            "James",
            "Okafor",
            Some("Twelve seasons on the bag, knows every break on the greens."),
            true,
        ),
        (
            "Maria",
            "Santos",
            Some("Former club champion, great with first-time players."),
            true,
        ),
        ("Tom", "Whitfield", None, true),
        (
            "Priya",
            "Nair",
            Some("Course-record caddie, strong on yardage and club selection."),
            false,
        ),
    ];

    for (first_name, last_name, bio, available) in roster {
        repo.create(NewCaddie {
            first_name,
            last_name,
            bio,
            available,
        })
        .await?;
    }

    info!("Seeded {} caddies", roster.len());
    Ok(())
}

async fn seed_menu(pool: &sqlx::PgPool) -> Result<(), SeedError> {
    let repo = MenuRepository::new(pool);

    if !repo.list_all().await?.is_empty() {
        info!("Menu items already present, skipping");
        return Ok(());
    }

    // (name, description, category, price in cents)
    let menu: [(&str, Option<&str>, MenuCategory, i64); 8] = [
        (
            "Soup of the Day",
            Some("Ask your server for today's selection."),
            MenuCategory::Starters,
            650,
        ),
        (
            "Caesar Salad",
            Some("Romaine, parmesan, house-baked croutons."),
            MenuCategory::Starters,
            950,
        ),
        (
            "Clubhouse Burger",
            Some("Half-pound patty, aged cheddar, brioche bun."),
            MenuCategory::Mains,
            1650,
        ),
        (
            "Grilled Salmon",
            Some("Atlantic salmon, seasonal vegetables, lemon butter."),
            MenuCategory::Mains,
            2250,
        ),
        ("Fish and Chips", None, MenuCategory::Mains, 1850),
        (
            "Sticky Toffee Pudding",
            Some("Warm, with vanilla ice cream."),
            MenuCategory::Desserts,
            850,
        ),
        ("Fresh Lemonade", None, MenuCategory::Beverages, 450),
        ("Draft Lager", None, MenuCategory::Beverages, 700),
    ];

    for (name, description, category, cents) in menu {
        repo.create(NewMenuItem {
            name,
            description,
            category,
            price: Price::new(Decimal::new(cents, 2)),
            available: true,
        })
        .await?;
    }

    info!("Seeded {} menu items", menu.len());
    Ok(())
}

async fn seed_events(pool: &sqlx::PgPool) -> Result<(), SeedError> {
    let repo = EventRepository::new(pool);
    let today = Utc::now().date_naive();

    if !repo.list(false, today).await?.is_empty() {
        info!("Events already present, skipping");
        return Ok(());
    }

    let events = [
        (
            "Saturday Medal",
            Some("Monthly stroke-play competition, all handicaps welcome."),
            Days::new(7),
            "08:00",
            Some(40),
        ),
        (
            "Twilight Nine and Dine",
            Some("Nine holes followed by dinner on the terrace."),
            Days::new(14),
            "16:30",
            Some(24),
        ),
        (
            "Junior Clinic",
            Some("Coaching session for junior members, clubs provided."),
            Days::new(21),
            "10:00",
            None,
        ),
    ];

    for (title, description, offset, start_time, capacity) in events {
        let event_date = today
            .checked_add_days(offset)
            .unwrap_or(today);

        repo.create(NewEvent {
            title,
            description,
            event_date,
            start_time,
            capacity,
        })
        .await?;
    }

    info!("Seeded {} events", events.len());
    Ok(())
}
