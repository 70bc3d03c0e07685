//! CLI subcommand implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Database URL from the environment, with `DATABASE_URL` as a fallback
/// (managed Postgres providers export the generic name on attach).
pub(crate) fn database_url() -> Option<SecretString> {
    std::env::var("FAIRWAY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
