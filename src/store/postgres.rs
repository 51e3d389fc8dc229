use super::{duplicate_email, StoreResult, TodoStore, UserStore};
use crate::error::AppError;
use crate::models::{normalize_email, NewUser, Todo, User};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const SCHEMA: &[&str] = &[
    "DROP TABLE IF EXISTS todos",
    "DROP TABLE IF EXISTS users",
    "CREATE TABLE todos (
        id SERIAL PRIMARY KEY,
        description TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE users (
        id SERIAL PRIMARY KEY,
        email TEXT NOT NULL,
        normalized_email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        security_stamp TEXT NOT NULL
    )",
];

/// Drops and recreates every table the service owns.
///
/// Runs on each process start, so all data is lost on restart. Do not point
/// this at a database whose contents matter.
pub async fn reset_schema(pool: &PgPool) -> Result<(), AppError> {
    log::warn!("Dropping and recreating database schema");
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// PostgreSQL-backed store. Each statement checks a connection out of the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoStore for PgStore {
    fn list(&self) -> StoreResult<'_, Vec<Todo>> {
        Box::pin(async move {
            let todos = sqlx::query_as::<_, Todo>("SELECT id, description FROM todos ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
            Ok(todos)
        })
    }

    fn create(&self, description: String) -> StoreResult<'_, Todo> {
        Box::pin(async move {
            let todo = sqlx::query_as::<_, Todo>(
                "INSERT INTO todos (description) VALUES ($1) RETURNING id, description",
            )
            .bind(description)
            .fetch_one(&self.pool)
            .await?;
            Ok(todo)
        })
    }

    fn get(&self, id: i32) -> StoreResult<'_, Option<Todo>> {
        Box::pin(async move {
            let todo = sqlx::query_as::<_, Todo>("SELECT id, description FROM todos WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(todo)
        })
    }

    fn update(&self, id: i32, description: String) -> StoreResult<'_, Option<Todo>> {
        Box::pin(async move {
            let todo = sqlx::query_as::<_, Todo>(
                "UPDATE todos SET description = $1 WHERE id = $2 RETURNING id, description",
            )
            .bind(description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(todo)
        })
    }

    fn delete(&self, id: i32) -> StoreResult<'_, bool> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM todos WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        })
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, security_stamp";

impl UserStore for PgStore {
    fn create(&self, user: NewUser) -> StoreResult<'_, User> {
        Box::pin(async move {
            let sql = format!(
                "INSERT INTO users (email, normalized_email, password_hash, security_stamp)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (normalized_email) DO NOTHING
                 RETURNING {}",
                USER_COLUMNS
            );
            let created = sqlx::query_as::<_, User>(&sql)
                .bind(&user.email)
                .bind(normalize_email(&user.email))
                .bind(&user.password_hash)
                .bind(&user.security_stamp)
                .fetch_optional(&self.pool)
                .await?;

            created.ok_or_else(|| duplicate_email(&user.email))
        })
    }

    fn find_by_email<'a>(&'a self, email: &'a str) -> StoreResult<'a, Option<User>> {
        Box::pin(async move {
            let sql = format!("SELECT {} FROM users WHERE normalized_email = $1", USER_COLUMNS);
            let user = sqlx::query_as::<_, User>(&sql)
                .bind(normalize_email(email))
                .fetch_optional(&self.pool)
                .await?;
            Ok(user)
        })
    }

    fn find_by_id(&self, id: i32) -> StoreResult<'_, Option<User>> {
        Box::pin(async move {
            let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
            let user = sqlx::query_as::<_, User>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(user)
        })
    }
}
