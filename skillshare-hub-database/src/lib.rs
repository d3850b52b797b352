//! Persistence of registered members.

pub mod error;
pub mod models;
pub mod schema;

use core::future::Future;

use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use error::DatabaseError;
use models::{NewUser, User, UserInsert, UserRow};
use schema::users;
use tokio::sync::Mutex;
use tracing::{debug, info};

const CREATE_USERS: &str = include_str!("../migrations/2024-01-01-000000_create_users/up.sql");

// https://github.com/tokio-rs/axum/tree/main/examples/diesel-async-postgres

pub fn get_database_connection(
    database_url: &str,
) -> Result<Pool<AsyncPgConnection>, DatabaseError> {
    let config = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(database_url);
    Ok(Pool::builder(config).build()?)
}

/// Where registered members live.
pub trait UserStore: Send + Sync {
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, DatabaseError>> + Send;

    /// Fails with [`DatabaseError::DuplicateEmail`] if the email is taken, even
    /// when a concurrent insert wins the race after a lookup.
    fn insert(&self, user: NewUser) -> impl Future<Output = Result<User, DatabaseError>> + Send;

    fn count(&self) -> impl Future<Output = Result<u64, DatabaseError>> + Send;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgUserStore {
    #[must_use]
    pub const fn new(pool: Pool<AsyncPgConnection>) -> Self {
        Self { pool }
    }

    /// Creates the `users` table unless it already exists.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        let mut connection = self.pool.get().await?;
        diesel::sql_query(CREATE_USERS)
            .execute(&mut connection)
            .await?;
        info!("users table ready");
        Ok(())
    }
}

impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut connection = self.pool.get().await?;
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut connection)
            .await
            .optional()?
            .map(User::try_from)
            .transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut connection = self.pool.get().await?;
        let result = diesel::insert_into(users::table)
            .values(UserInsert::from(&user))
            .returning(UserRow::as_returning())
            .get_result(&mut connection)
            .await;
        match result {
            Ok(row) => User::try_from(row),
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(DatabaseError::DuplicateEmail(user.email))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn count(&self) -> Result<u64, DatabaseError> {
        let mut connection = self.pool.get().await?;
        let count: i64 = users::table.count().get_result(&mut connection).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

/// Keeps members in process memory. Lost on restart.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.lock().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(DatabaseError::DuplicateEmail(user.email));
        }
        let id = users
            .last()
            .map_or(1, |last| last.id.saturating_add(1));
        let user = User {
            id,
            name: user.name,
            email: user.email,
            role: user.role,
            password_hash: user.password_hash,
        };
        users.push(user.clone());
        debug!(id, "stored user in memory");
        Ok(user)
    }

    async fn count(&self) -> Result<u64, DatabaseError> {
        Ok(self.users.lock().await.len() as u64)
    }
}

/// The store picked at startup.
pub enum AnyUserStore {
    Postgres(PgUserStore),
    Memory(MemoryUserStore),
}

impl AnyUserStore {
    /// Connects to PostgreSQL when `database_url` is set, otherwise keeps users in memory.
    pub async fn connect(database_url: Option<&str>) -> Result<Self, DatabaseError> {
        match database_url {
            Some(url) => {
                let store = PgUserStore::new(get_database_connection(url)?);
                store.ensure_schema().await?;
                Ok(Self::Postgres(store))
            }
            None => {
                info!("no database url configured, keeping users in memory");
                Ok(Self::Memory(MemoryUserStore::new()))
            }
        }
    }
}

impl UserStore for AnyUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        match self {
            Self::Postgres(store) => store.find_by_email(email).await,
            Self::Memory(store) => store.find_by_email(email).await,
        }
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        match self {
            Self::Postgres(store) => store.insert(user).await,
            Self::Memory(store) => store.insert(user).await,
        }
    }

    async fn count(&self) -> Result<u64, DatabaseError> {
        match self {
            Self::Postgres(store) => store.count().await,
            Self::Memory(store) => store.count().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Maria Rodriguez".to_owned(),
            email: email.to_owned(),
            role: Role::Learner,
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$ZGlnZXN0".to_owned(),
        }
    }

    #[tokio::test]
    async fn memory_store_assigns_ids() {
        let store = MemoryUserStore::new();
        let first = store.insert(new_user("a@example.com")).await.unwrap();
        let second = store.insert(new_user("b@example.com")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(
            store.find_by_email("b@example.com").await.unwrap(),
            Some(second)
        );
        assert_eq!(store.find_by_email("c@example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_store_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.insert(new_user("a@example.com")).await.unwrap();
        let error = store.insert(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(error, DatabaseError::DuplicateEmail(email) if email == "a@example.com"));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_store_one_user() {
        let store = Arc::new(MemoryUserStore::new());
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert(new_user("same@example.com")).await })
            })
            .collect();
        let mut stored = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                stored += 1;
            }
        }
        assert_eq!(stored, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn without_url_memory_is_used() {
        let store = AnyUserStore::connect(None).await.unwrap();
        assert!(matches!(store, AnyUserStore::Memory(_)));
        store.insert(new_user("a@example.com")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
