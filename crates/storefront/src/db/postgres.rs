//! `PostgreSQL`-backed document store.
//!
//! # Table: `documents`
//!
//! | column        | type          |                                  |
//! |---------------|---------------|----------------------------------|
//! | `id`          | `UUID`        | native key, never exposed as-is  |
//! | `collection`  | `TEXT`        | collection name                  |
//! | `body`        | `JSONB`       | the document                     |
//! | `inserted_at` | `TIMESTAMPTZ` | natural order of `find`          |
//!
//! Collections are created implicitly: the table is created on first use if
//! it does not exist. There are no versioned migrations.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::{Clause, Collection, Document, DocumentStore, Filter, StoreError, StoredDocument};

const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS documents (
        id UUID PRIMARY KEY,
        collection TEXT NOT NULL,
        body JSONB NOT NULL,
        inserted_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
";

const CREATE_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS documents_collection_inserted_at_idx
        ON documents (collection, inserted_at)
";

#[derive(Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: OnceCell<()>,
}

impl PgDocumentStore {
    /// Wrap an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    /// Create a pool that connects on first use, targeting `database_name`
    /// on the server at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Configuration` if the URL cannot be parsed.
    pub fn connect_lazy(database_url: &str, database_name: &str) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(database_url)?.database(database_name);
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `documents` table once per process.
    ///
    /// A failed attempt is retried by the next operation.
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema
            .get_or_try_init(|| async {
                sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
                sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
                tracing::debug!("documents table ready");
                Ok::<(), StoreError>(())
            })
            .await?;
        Ok(())
    }
}

/// Append the SQL for one filter clause to a query under construction.
fn push_clause(query: &mut QueryBuilder<'_, Postgres>, clause: &Clause) {
    match clause {
        Clause::Eq { field, value } => {
            query
                .push(" AND body -> ")
                .push_bind(field.clone())
                .push(" = ")
                .push_bind(Json(value.clone()));
        }
        Clause::Range { field, gte, lte } => {
            if let Some(min) = gte {
                push_numeric_field(query, field);
                query.push(" >= ").push_bind(*min);
            }
            if let Some(max) = lte {
                push_numeric_field(query, field);
                query.push(" <= ").push_bind(*max);
            }
        }
    }
}

/// `field` as a numeric value, or NULL when it is not a JSON number.
///
/// NULL never compares true, so non-numeric fields drop out of range clauses.
fn push_numeric_field(query: &mut QueryBuilder<'_, Postgres>, field: &str) {
    query
        .push(" AND CASE WHEN jsonb_typeof(body -> ")
        .push_bind(field.to_owned())
        .push(") = 'number' THEN (body ->> ")
        .push_bind(field.to_owned())
        .push(")::numeric END");
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn prepare(&self) -> Result<(), StoreError> {
        self.ensure_schema().await
    }

    async fn insert(&self, collection: Collection, body: Document) -> Result<Uuid, StoreError> {
        self.ensure_schema().await?;
        let key = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(key)
            .bind(collection.name())
            .bind(Json(body))
            .execute(&self.pool)
            .await?;
        Ok(key)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.ensure_schema().await?;

        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, body FROM documents WHERE collection = ",
        );
        query.push_bind(collection.name());
        for clause in filter.clauses() {
            push_clause(&mut query, clause);
        }
        query
            .push(" ORDER BY inserted_at, id LIMIT ")
            .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));

        let rows: Vec<(Uuid, Json<Document>)> =
            query.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(key, Json(body))| StoredDocument { key, body })
            .collect())
    }

    async fn find_by_key(
        &self,
        collection: Collection,
        key: Uuid,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.ensure_schema().await?;
        let row: Option<(Uuid, Json<Document>)> =
            sqlx::query_as("SELECT id, body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection.name())
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(key, Json(body))| StoredDocument { key, body }))
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        self.ensure_schema().await?;
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection.name())
                .fetch_one(&self.pool)
                .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn sql_for(filter: &Filter) -> String {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT id, body FROM documents WHERE collection = ",
        );
        query.push_bind("product");
        for clause in filter.clauses() {
            push_clause(&mut query, clause);
        }
        query.sql().to_string()
    }

    #[test]
    fn test_eq_clause_sql() {
        let sql = sql_for(&Filter::new().eq("type", "mug"));
        assert_eq!(
            sql,
            "SELECT id, body FROM documents WHERE collection = $1 AND body -> $2 = $3"
        );
    }

    #[test]
    fn test_range_clause_sql() {
        let sql = sql_for(&Filter::new().range(
            "price",
            Some(Decimal::new(20, 0)),
            Some(Decimal::new(40, 0)),
        ));
        assert!(sql.contains(
            "CASE WHEN jsonb_typeof(body -> $2) = 'number' THEN (body ->> $3)::numeric END >= $4"
        ));
        assert!(sql.contains(
            "CASE WHEN jsonb_typeof(body -> $5) = 'number' THEN (body ->> $6)::numeric END <= $7"
        ));
    }

    #[test]
    fn test_range_clause_single_bound_sql() {
        let sql = sql_for(&Filter::new().range("price", None, Some(Decimal::new(40, 0))));
        assert!(sql.ends_with("END <= $4"));
        assert!(!sql.contains(">="));
    }
}
