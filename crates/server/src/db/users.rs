//! User repository for login accounts.
//!
//! Member registration writes the `users` row and the `members` profile row
//! in one transaction so a half-created account can never log in.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fairway_core::{Email, UserId, UserRole};

use super::RepositoryError;
use super::members::MemberRow;
use crate::models::{Member, User};

/// Internal row type for `users` queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Profile fields captured at registration.
#[derive(Debug)]
pub struct NewMemberProfile<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: Option<&'a str>,
}

/// Repository for login accounts.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, role, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user and their password hash by email, for login verification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct UserWithHash {
            #[sqlx(flatten)]
            user: UserRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, UserWithHash>(
            "SELECT id, email, role, created_at, updated_at, password_hash
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((r.user.try_into()?, r.password_hash)))
            .transpose()
    }

    /// Create a member account: the login row plus the member profile,
    /// in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_member(
        &self,
        email: &Email,
        password_hash: &str,
        profile: NewMemberProfile<'_>,
    ) -> Result<(User, Member), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let user_row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, 'member')
             RETURNING id, email, role, created_at, updated_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepositoryError::on_unique(e, "email already exists"))?;

        let membership_number = generate_membership_number();

        let member_row = sqlx::query_as::<_, MemberRow>(
            "INSERT INTO members (user_id, first_name, last_name, phone, membership_number)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, user_id, first_name, last_name, phone, membership_number,
                       tier, loyalty_points, joined_at, created_at, updated_at",
        )
        .bind(user_row.id)
        .bind(profile.first_name)
        .bind(profile.last_name)
        .bind(profile.phone)
        .bind(&membership_number)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user_row.try_into()?, member_row.into()))
    }

    /// Create a staff or admin account (no member profile).
    ///
    /// Used by the CLI; members register through the API instead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_staff(
        &self,
        email: &Email,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING id, email, role, created_at, updated_at",
        )
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::on_unique(e, "email already exists"))?;

        row.try_into()
    }
}

/// Generate a fresh membership card number.
///
/// Uniqueness is enforced by the database; collisions on the 8-hex-digit
/// suffix are vanishingly rare and surface as a retryable conflict.
fn generate_membership_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    let short = suffix.get(..8).unwrap_or(&suffix);
    format!("FW-{}", short.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_number_shape() {
        let number = generate_membership_number();
        assert!(number.starts_with("FW-"));
        assert_eq!(number.len(), 11);
        assert!(
            number
                .chars()
                .skip(3)
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_membership_numbers_differ() {
        assert_ne!(generate_membership_number(), generate_membership_number());
    }
}
