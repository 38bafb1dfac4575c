//! PostgreSQL implementation of VisitorRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use livechat_core::entities::Visitor;
use livechat_core::error::DomainError;
use livechat_core::traits::{RepoResult, VisitorRepository};

use crate::models::VisitorModel;

use super::error::{map_db_error, map_unique_violation, visitor_not_found};

const VISITOR_COLUMNS: &str =
    "id, fingerprint, name, email, ip_address, user_agent, is_blocked, created_at, updated_at";

/// PostgreSQL implementation of VisitorRepository
#[derive(Clone)]
pub struct PgVisitorRepository {
    pool: PgPool,
}

impl PgVisitorRepository {
    /// Create a new PgVisitorRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitorRepository for PgVisitorRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Visitor>> {
        let result = sqlx::query_as::<_, VisitorModel>(&format!(
            "SELECT {VISITOR_COLUMNS} FROM visitors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Visitor::from))
    }

    #[instrument(skip(self))]
    async fn find_by_fingerprint(&self, fingerprint: &str) -> RepoResult<Option<Visitor>> {
        let result = sqlx::query_as::<_, VisitorModel>(&format!(
            "SELECT {VISITOR_COLUMNS} FROM visitors WHERE fingerprint = $1"
        ))
        .bind(fingerprint)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Visitor::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, visitor: &Visitor) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO visitors (id, fingerprint, name, email, ip_address, user_agent, is_blocked, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(visitor.id)
        .bind(&visitor.fingerprint)
        .bind(&visitor.name)
        .bind(&visitor.email)
        .bind(&visitor.ip_address)
        .bind(&visitor.user_agent)
        .bind(visitor.is_blocked)
        .bind(visitor.created_at)
        .bind(visitor.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::Conflict("Visitor fingerprint already registered".to_string())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_blocked(&self, id: Uuid, blocked: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE visitors
            SET is_blocked = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(blocked)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(visitor_not_found(id));
        }

        Ok(())
    }
}
