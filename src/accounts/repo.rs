use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("account already exists")]
    Duplicate,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence boundary for account records. Injected into the handlers as
/// `Arc<dyn AccountStore>` so tests can swap in a memory-backed store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert_new_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), StoreError>;
}

pub struct PgAccountStore {
    db: PgPool,
    insert_sql: String,
}

impl PgAccountStore {
    pub fn new(db: PgPool, schema: &str, table: &str) -> Self {
        // Identifiers cannot be bound as parameters; schema and table come
        // from trusted configuration and are quoted here once.
        let insert_sql = format!(
            r#"INSERT INTO "{schema}"."{table}" (username, email, password_hash) VALUES ($1, $2, $3)"#
        );
        Self { db, insert_sql }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert_new_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(&self.insert_sql)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.db)
            .await
            .map_err(classify_insert_error)?;
        debug!(%username, "account row inserted");
        Ok(())
    }
}

/// SQLSTATE 23505: unique_violation. The table's primary key on username is
/// the sole dedup mechanism; everything else passes through unmodified.
fn classify_insert_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::Duplicate;
        }
    }
    StoreError::Database(e)
}

/// A persisted account as the memory store keeps it.
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// In-memory store used by `AppState::fake()` and the endpoint tests.
/// Enforces the same username uniqueness the Postgres table does.
#[derive(Default)]
pub struct MemoryAccountStore {
    records: Mutex<Vec<StoredAccount>>,
}

impl MemoryAccountStore {
    pub fn records(&self) -> Vec<StoredAccount> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn insert_new_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.username == username) {
            return Err(StoreError::Duplicate);
        }
        records.push(StoredAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    #[derive(Debug)]
    struct StubDbError(&'static str);

    impl std::fmt::Display for StubDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "database error {}", self.0)
        }
    }

    impl std::error::Error for StubDbError {}

    impl sqlx::error::DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            match self.0 {
                "23505" => sqlx::error::ErrorKind::UniqueViolation,
                _ => sqlx::error::ErrorKind::Other,
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn unique_violation_maps_to_duplicate() {
        let e = sqlx::Error::Database(Box::new(StubDbError("23505")));
        assert!(matches!(classify_insert_error(e), StoreError::Duplicate));
    }

    #[test]
    fn other_database_errors_pass_through() {
        // 53300: too_many_connections
        let e = sqlx::Error::Database(Box::new(StubDbError("53300")));
        assert!(matches!(classify_insert_error(e), StoreError::Database(_)));
    }

    #[test]
    fn non_database_errors_pass_through() {
        assert!(matches!(
            classify_insert_error(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }
}
