use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatehouse_core::{
    DisplayName, Email, NewUser, PasswordDigest, ProfilePatch, ResetTokenDigest, User,
    UserCredentials, UserId, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres, Row, postgres::PgRow};

/// Postgres-backed user store.
///
/// The `users` table carries a unique index on `email`; every mutation here is
/// a single statement, so the database provides the record-level atomicity the
/// port demands. Notably `consume_reset_token` is one conditional
/// `UPDATE ... RETURNING`: of two concurrent consumes of the same token,
/// exactly one row comes back.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, email_notifications, login_alerts, created_at";

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let name: String = row
        .try_get("name")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

    Ok(User {
        id: UserId::from_uuid(
            row.try_get("id")
                .map_err(|e| UserStoreError::Unexpected(e.to_string()))?,
        ),
        name: DisplayName::parse(&name).map_err(|e| UserStoreError::Unexpected(e.to_string()))?,
        email: Email::parse(&email).map_err(|e| UserStoreError::Unexpected(e.to_string()))?,
        preferences: gatehouse_core::NotificationPreferences {
            email_notifications: row
                .try_get("email_notifications")
                .map_err(|e| UserStoreError::Unexpected(e.to_string()))?,
            login_alerts: row
                .try_get("login_alerts")
                .map_err(|e| UserStoreError::Unexpected(e.to_string()))?,
        },
        created_at: row
            .try_get("created_at")
            .map_err(|e| UserStoreError::Unexpected(e.to_string()))?,
    })
}

fn credentials_from_row(row: &PgRow) -> Result<UserCredentials, UserStoreError> {
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;
    Ok(UserCredentials {
        user: user_from_row(row)?,
        password_digest: PasswordDigest::new(Secret::from(password_hash)),
    })
}

fn map_insert_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserStoreError::EmailTaken;
        }
    }
    UserStoreError::Unexpected(e.to_string())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn insert_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"
                INSERT INTO users (id, name, email, password_hash, email_notifications, login_alerts, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, name, email, email_notifications, login_alerts, created_at
            "#,
        )
        .bind(new_user.id.as_uuid())
        .bind(new_user.name.as_str())
        .bind(new_user.email.as_str())
        .bind(new_user.password_digest.as_ref().expose_secret())
        .bind(new_user.preferences.email_notifications)
        .bind(new_user.preferences.login_alerts)
        .bind(new_user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        match row {
            Some(row) => user_from_row(&row),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    #[tracing::instrument(name = "Retrieving credentials by email from PostgreSQL", skip_all)]
    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<UserCredentials, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        match row {
            Some(row) => credentials_from_row(&row),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    #[tracing::instrument(name = "Retrieving credentials by id from PostgreSQL", skip_all)]
    async fn find_credentials_by_id(&self, id: &UserId) -> Result<UserCredentials, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        match row {
            Some(row) => credentials_from_row(&row),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_password(
        &self,
        id: &UserId,
        new_digest: PasswordDigest,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(new_digest.as_ref().expose_secret())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: &UserId,
        patch: ProfilePatch,
    ) -> Result<User, UserStoreError> {
        // COALESCE keeps omitted fields at their prior values; the unique
        // index on email re-arbitrates uniqueness on a changed address.
        let row = sqlx::query(&format!(
            r#"
                UPDATE users
                SET name = COALESCE($1, name), email = COALESCE($2, email)
                WHERE id = $3
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(patch.name.as_ref().map(|n| n.as_str()))
        .bind(patch.email.as_ref().map(|e| e.as_str()))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_insert_error)?;

        match row {
            Some(row) => user_from_row(&row),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    #[tracing::instrument(name = "Storing reset token in PostgreSQL", skip_all)]
    async fn store_reset_token(
        &self,
        id: &UserId,
        token_digest: ResetTokenDigest,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            "UPDATE users SET reset_token_hash = $1, reset_token_expires_at = $2 WHERE id = $3",
        )
        .bind(token_digest.as_str())
        .bind(expires_at)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Consuming reset token in PostgreSQL", skip_all)]
    async fn consume_reset_token(
        &self,
        token_digest: &ResetTokenDigest,
        new_digest: PasswordDigest,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            r#"
                UPDATE users
                SET password_hash = $1, reset_token_hash = NULL, reset_token_expires_at = NULL
                WHERE reset_token_hash = $2 AND reset_token_expires_at > $3
                RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_digest.as_ref().expose_secret())
        .bind(token_digest.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Unexpected(e.to_string()))?;

        match row {
            Some(row) => user_from_row(&row),
            None => Err(UserStoreError::NoMatchingResetToken),
        }
    }
}
