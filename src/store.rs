//! Product storage: the keyed-collection contract, its PostgreSQL and
//! in-memory implementations, and database bootstrap.

use crate::error::AppError;
use crate::filter::ProductFilter;
use crate::product::{Product, ProductDraft};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// Durable keyed collection of product records. Identity is assigned on
/// create, is unique across live records, and is never reused after delete.
/// Same-key operations are serialized by the implementation; `list` and
/// `query` return rows in insertion order.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, draft: &ProductDraft) -> Result<Product, AppError>;
    async fn fetch(&self, id: i64) -> Result<Option<Product>, AppError>;
    /// Full replace of the payload columns. `None` when the id does not
    /// exist; never creates on a missing id.
    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Option<Product>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
    async fn list(&self) -> Result<Vec<Product>, AppError>;
    /// Rows satisfying every present criterion of the filter.
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError>;
    /// Cheap reachability probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed store. Row-level locking in the engine serializes
/// concurrent operations on the same id; BIGSERIAL keeps ids monotonic.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        PgProductStore { pool }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Product>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_as::<_, Product>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Product>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query_as::<_, Product>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, draft: &ProductDraft) -> Result<Product, AppError> {
        let q = sql::insert(draft);
        self.fetch_optional(&q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn fetch(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.fetch_optional(&sql::select_by_id(id)).await
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Option<Product>, AppError> {
        self.fetch_optional(&sql::update(id, draft)).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let q = sql::delete(id);
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        self.fetch_all(&sql::select_all()).await
    }

    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        self.fetch_all(&sql::search(filter)).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

struct MemoryInner {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

/// In-memory store: an arena keyed by a monotonic counter, guarded by a
/// single lock. Backs the test suite and embedded usage without PostgreSQL.
pub struct MemoryProductStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        MemoryProductStore {
            inner: RwLock::new(MemoryInner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, draft: &ProductDraft) -> Result<Product, AppError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        let product = draft.with_id(id);
        inner.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn fetch(&self, id: i64) -> Result<Option<Product>, AppError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Option<Product>, AppError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !inner.rows.contains_key(&id) {
            return Ok(None);
        }
        let product = draft.with_id(id);
        inner.rows.insert(id, product.clone());
        Ok(Some(product))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.rows.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.rows.values().cloned().collect())
    }

    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .rows
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Idempotent DDL for the products table. The CHECK constraints mirror the
/// model invariants: non-blank text, non-negative price and stock.
pub async fn ensure_products_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = r#"
        CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            category TEXT NOT NULL CHECK (category <> ''),
            price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
            stock INTEGER NOT NULL CHECK (stock >= 0)
        )
    "#;
    sqlx::query(ddl).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to
/// the default `postgres` database to run CREATE DATABASE. Call before
/// creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}
