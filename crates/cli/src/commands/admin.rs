//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user
//! fairway admin create -e admin@example.com -n "Admin Name" -p <password>
//!
//! # Create a staff user
//! fairway admin create -e staff@example.com -n "Staff Name" -p <password> -r staff
//! ```
//!
//! # Environment Variables
//!
//! - `FAIRWAY_DATABASE_URL` - `PostgreSQL` connection string

use thiserror::Error;

use fairway_core::{Email, UserId, UserRole};
use fairway_server::db::{self, RepositoryError, UserRepository};
use fairway_server::services::{AuthError, auth};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, staff")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] fairway_core::EmailError),

    /// Password rejected or hashing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// User already exists.
    #[error("User already exists with email: {0}")]
    UserExists(String),

    /// Other repository error.
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Create a new admin or staff user.
///
/// Members register through the API; this command only creates the
/// privileged roles, which carry no member profile.
///
/// # Arguments
///
/// * `email` - Login email address
/// * `name` - Display name (logged, not stored)
/// * `password` - Plaintext password, hashed with Argon2id before storage
/// * `role` - `admin` or `staff`
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `AdminError` if validation fails, the email is taken, or the
/// database is unreachable.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> Result<UserId, AdminError> {
    dotenvy::dotenv().ok();

    // Parse and validate role; members are created via the API only
    let role: UserRole = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;
    if role == UserRole::Member {
        return Err(AdminError::InvalidRole("member".to_owned()));
    }

    let email = Email::parse(email)?;

    auth::validate_password(password)?;
    let password_hash = auth::hash_password(password)?;

    let database_url =
        super::database_url().ok_or(AdminError::MissingEnvVar("FAIRWAY_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Creating {} user: {} <{}>", role, name, email);

    let user = UserRepository::new(&pool)
        .create_staff(&email, &password_hash, role)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AdminError::UserExists(email.to_string()),
            other => AdminError::Repository(other),
        })?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );

    Ok(user.id)
}
