//! # Client Repository
//!
//! Database operations for clients.
//!
//! ## Optional Text Columns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  company_name / address / email                                         │
//! │                                                                         │
//! │  write:  ""      ──► NULLIF(?, '') ──► NULL                             │
//! │  read:   NULL    ──► COALESCE(col, '') ──► ""                           │
//! │                                                                         │
//! │  Clearing a field through PATCH stores NULL, never an empty string.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use invoice_core::{Client, ClientPatch, NewClient};

/// Column list shared by every query that returns a [`Client`].
const CLIENT_COLUMNS: &str = r#"
    id,
    name,
    COALESCE(company_name, '') AS company_name,
    COALESCE(address, '')      AS address,
    COALESCE(email, '')        AS email,
    created_at,
    updated_at
"#;

/// Repository for client database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.clients();
///
/// let client = repo.insert(&new_client).await?;
/// let all = repo.list().await?;
/// repo.patch(client.id, &patch).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Inserts a validated client and returns the stored row.
    pub async fn insert(&self, client: &NewClient) -> DbResult<Client> {
        debug!(name = %client.name, "Inserting client");

        let sql = format!(
            r#"
            INSERT INTO clients (name, company_name, address, email, created_at)
            VALUES (?1, NULLIF(?2, ''), NULLIF(?3, ''), NULLIF(?4, ''), ?5)
            RETURNING {CLIENT_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Client>(&sql)
            .bind(&client.name)
            .bind(&client.company_name)
            .bind(&client.address)
            .bind(&client.email)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        debug!(id = created.id, "Client inserted");
        Ok(created)
    }

    /// Lists every client, newest first.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY created_at DESC, id DESC");

        let clients = sqlx::query_as::<_, Client>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = clients.len(), "Listed clients");
        Ok(clients)
    }

    /// Gets a client by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1");

        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Applies a partial update.
    ///
    /// Only the `Some` fields are written; `updated_at` is always refreshed.
    ///
    /// ## Returns
    /// * `Ok(())` - Row updated
    /// * `Err(DbError::NotFound)` - No client with that id
    pub async fn patch(&self, id: i64, patch: &ClientPatch) -> DbResult<()> {
        if patch.is_empty() {
            return Err(DbError::QueryFailed("no fields to update".to_string()));
        }

        debug!(id = id, "Patching client");

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE clients SET ");
        {
            let mut set = qb.separated(", ");

            if let Some(name) = patch.name.as_deref() {
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Some(company_name) = patch.company_name.as_deref() {
                set.push("company_name = NULLIF(")
                    .push_bind_unseparated(company_name)
                    .push_unseparated(", '')");
            }
            if let Some(address) = patch.address.as_deref() {
                set.push("address = NULLIF(")
                    .push_bind_unseparated(address)
                    .push_unseparated(", '')");
            }
            if let Some(email) = patch.email.as_deref() {
                set.push("email = NULLIF(")
                    .push_bind_unseparated(email)
                    .push_unseparated(", '')");
            }

            set.push("updated_at = ").push_bind_unseparated(Utc::now());
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Deletes a client. Its products go with it (ON DELETE CASCADE).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No client with that id
    /// * `Err(DbError::ForeignKeyViolation)` - Client still has invoices
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting client");

        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Returns true when a client with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
