//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use livechat_core::entities::Message;
use livechat_core::traits::{MessageRepository, RepoResult};

use crate::mappers::MessageInsert;
use crate::models::MessageModel;

use super::error::map_db_error;

const MESSAGE_COLUMNS: &str =
    "id, chat_id, sender_id, sender_kind, content, kind, is_read, read_at, created_at";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_by_chat(&self, chat_id: Uuid) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE chat_id = $1
            ORDER BY created_at ASC
            "
        ))
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn last_by_chat(&self, chat_id: Uuid) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE chat_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "
        ))
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let insert = MessageInsert::new(message);

        sqlx::query(
            r"
            INSERT INTO messages (id, chat_id, sender_id, sender_kind, content, kind, is_read, read_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(insert.id)
        .bind(insert.chat_id)
        .bind(insert.sender_id)
        .bind(insert.sender_kind)
        .bind(insert.content)
        .bind(insert.kind)
        .bind(message.is_read)
        .bind(message.read_at)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_visitor_messages_read(
        &self,
        chat_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        // is_read only ever flips FALSE -> TRUE; the filter keeps read_at
        // stable for rows that were already read
        let result = sqlx::query(
            r"
            UPDATE messages
            SET is_read = TRUE, read_at = $2
            WHERE chat_id = $1 AND sender_kind = 'VISITOR' AND is_read = FALSE
            ",
        )
        .bind(chat_id)
        .bind(read_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, admin_id: Option<Uuid>) -> RepoResult<i64> {
        let count = match admin_id {
            Some(admin_id) => {
                sqlx::query_scalar::<_, i64>(
                    r"
                    SELECT COUNT(*) FROM messages m
                    JOIN chats c ON c.id = m.chat_id
                    WHERE m.sender_kind = 'VISITOR' AND m.is_read = FALSE
                      AND c.admin_id = $1
                    ",
                )
                .bind(admin_id)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    r"
                    SELECT COUNT(*) FROM messages m
                    JOIN chats c ON c.id = m.chat_id
                    WHERE m.sender_kind = 'VISITOR' AND m.is_read = FALSE
                      AND c.status = 'WAITING'
                    ",
                )
                .fetch_one(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(count)
    }
}
