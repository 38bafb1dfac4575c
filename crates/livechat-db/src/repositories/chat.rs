//! PostgreSQL implementation of ChatRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use livechat_core::entities::Chat;
use livechat_core::traits::{ChatQuery, ChatRepository, RepoResult};

use crate::mappers::ChatInsert;
use crate::models::ChatModel;

use super::error::{chat_not_found, map_db_error};

const CHAT_COLUMNS: &str =
    "id, visitor_id, admin_id, subject, status, priority, created_at, updated_at, closed_at";

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Chat>> {
        let result = sqlx::query_as::<_, ChatModel>(&format!(
            "SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Chat::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ChatQuery) -> RepoResult<Vec<Chat>> {
        let limit = query.limit.clamp(1, 100);
        let offset = query.offset.max(0);

        let results = match (query.status, query.admin_id) {
            (Some(status), Some(admin_id)) => {
                sqlx::query_as::<_, ChatModel>(&format!(
                    r"
                    SELECT {CHAT_COLUMNS} FROM chats
                    WHERE status = $1 AND admin_id = $2
                    ORDER BY updated_at DESC
                    LIMIT $3 OFFSET $4
                    "
                ))
                .bind(status.as_str())
                .bind(admin_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            (Some(status), None) => {
                sqlx::query_as::<_, ChatModel>(&format!(
                    r"
                    SELECT {CHAT_COLUMNS} FROM chats
                    WHERE status = $1
                    ORDER BY updated_at DESC
                    LIMIT $2 OFFSET $3
                    "
                ))
                .bind(status.as_str())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(admin_id)) => {
                sqlx::query_as::<_, ChatModel>(&format!(
                    r"
                    SELECT {CHAT_COLUMNS} FROM chats
                    WHERE admin_id = $1
                    ORDER BY updated_at DESC
                    LIMIT $2 OFFSET $3
                    "
                ))
                .bind(admin_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            (None, None) => {
                sqlx::query_as::<_, ChatModel>(&format!(
                    r"
                    SELECT {CHAT_COLUMNS} FROM chats
                    ORDER BY updated_at DESC
                    LIMIT $1 OFFSET $2
                    "
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Chat::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ChatQuery) -> RepoResult<i64> {
        let count = match (query.status, query.admin_id) {
            (Some(status), Some(admin_id)) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM chats WHERE status = $1 AND admin_id = $2",
                )
                .bind(status.as_str())
                .bind(admin_id)
                .fetch_one(&self.pool)
                .await
            }
            (Some(status), None) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chats WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await
            }
            (None, Some(admin_id)) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chats WHERE admin_id = $1")
                    .bind(admin_id)
                    .fetch_one(&self.pool)
                    .await
            }
            (None, None) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chats")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn create(&self, chat: &Chat) -> RepoResult<()> {
        let insert = ChatInsert::new(chat);

        sqlx::query(
            r"
            INSERT INTO chats (id, visitor_id, admin_id, subject, status, priority, created_at, updated_at, closed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(insert.id)
        .bind(insert.visitor_id)
        .bind(insert.admin_id)
        .bind(insert.subject)
        .bind(insert.status)
        .bind(insert.priority)
        .bind(chat.created_at)
        .bind(chat.updated_at)
        .bind(chat.closed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, chat: &Chat) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE chats
            SET admin_id = $2, subject = $3, status = $4, priority = $5,
                updated_at = $6, closed_at = $7
            WHERE id = $1
            ",
        )
        .bind(chat.id)
        .bind(chat.admin_id)
        .bind(chat.subject.as_deref())
        .bind(chat.status.as_str())
        .bind(chat.priority.as_str())
        .bind(chat.updated_at)
        .bind(chat.closed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(chat_not_found(chat.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query("UPDATE chats SET updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(chat_not_found(id));
        }

        Ok(())
    }
}
