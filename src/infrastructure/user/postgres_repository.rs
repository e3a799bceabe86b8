//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
///
/// Username uniqueness is enforced by the `UNIQUE` constraint, which keeps
/// concurrent registrations race free without an explicit lock.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.username())
        .bind(user.password_hash())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                classify_unique_violation(db.constraint(), &user)
            }
            _ => DomainError::storage(format!("Failed to create user: {}", e)),
        })?;

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

/// Map a unique violation on insert to a domain error
///
/// The primary key is the only unique constraint besides the username, so
/// anything that is not the `_pkey` index is treated as a taken username,
/// including tables whose username constraint carries a custom name.
fn classify_unique_violation(constraint: Option<&str>, user: &User) -> DomainError {
    match constraint {
        Some(name) if name.ends_with("_pkey") => {
            DomainError::internal(format!("User with ID '{}' already exists", user.id()))
        }
        _ => DomainError::duplicate_username(user.username()),
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Failed to read user id: {}", e)))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| DomainError::storage(format!("Failed to read username: {}", e)))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| DomainError::storage(format!("Failed to read password hash: {}", e)))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::storage(format!("Failed to read created_at: {}", e)))?;

    let id = UserId::new(id)
        .map_err(|e| DomainError::storage(format!("Stored user has an invalid id: {}", e)))?;

    Ok(User::with_id(id, username, password_hash, created_at))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::infrastructure::storage::{connect_pool, PostgresConfig};

    fn sample_user() -> User {
        User::new("alice", "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA")
    }

    #[test]
    fn test_username_constraint_is_duplicate_username() {
        let err = classify_unique_violation(Some("users_username_key"), &sample_user());

        assert!(matches!(
            err,
            DomainError::DuplicateUsername { ref username } if username == "alice"
        ));
    }

    #[test]
    fn test_custom_username_constraint_is_duplicate_username() {
        let err = classify_unique_violation(Some("uq_login_name"), &sample_user());
        assert!(matches!(err, DomainError::DuplicateUsername { .. }));
    }

    #[test]
    fn test_unnamed_constraint_is_duplicate_username() {
        let err = classify_unique_violation(None, &sample_user());
        assert!(matches!(err, DomainError::DuplicateUsername { .. }));
    }

    #[test]
    fn test_primary_key_collision_is_internal() {
        let err = classify_unique_violation(Some("users_pkey"), &sample_user());
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    /// Needs a disposable database: `DATABASE_URL=postgres://... cargo test -- --ignored`
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore]
    async fn test_concurrent_create_same_username() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let config = PostgresConfig {
            url,
            ..Default::default()
        };
        let pool = connect_pool(&config).await.unwrap();
        let repository = Arc::new(PostgresUserRepository::new(pool));
        repository.ensure_schema().await.unwrap();

        let username = format!("race-{}", UserId::generate());

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let repository = Arc::clone(&repository);
                let username = username.clone();
                tokio::spawn(async move { repository.create(User::new(username, "hash")).await })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(DomainError::DuplicateUsername { .. }) => duplicates += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 1);

        let stored = repository.get_by_username(&username).await.unwrap();
        assert!(stored.is_some());
    }
}
