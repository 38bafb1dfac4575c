//! Message service
//!
//! Handles message persistence, read receipts, and unread counting.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use livechat_core::Message;

use crate::dto::{CreateMessageRequest, MessageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Persist a message and bump the chat's activity timestamp.
    ///
    /// The message is stored unread; callers broadcast only after this
    /// returns, so nothing reaches the room that the database has not seen.
    #[instrument(skip(self, request))]
    pub async fn create_message(
        &self,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        if request.content.trim().is_empty() {
            return Err(ServiceError::validation("Message content must not be empty"));
        }

        let chat = self
            .ctx
            .chat_repo()
            .find_by_id(request.chat_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chat", request.chat_id.to_string()))?;

        let message = Message::new(
            Uuid::new_v4(),
            chat.id,
            request.sender_id,
            request.sender_kind,
            request.content,
            request.kind,
        );

        self.ctx.message_repo().create(&message).await?;
        self.ctx.chat_repo().touch(chat.id, message.created_at).await?;

        info!(
            message_id = %message.id,
            chat_id = %chat.id,
            sender_type = %message.sender_kind,
            "Message created"
        );

        Ok(MessageResponse::from(message))
    }

    /// Mark every unread visitor message in a chat as read. Read state is
    /// monotonic; already-read rows keep their original `read_at`. Returns
    /// the number of rows that flipped.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, chat_id: Uuid, admin_id: Uuid) -> ServiceResult<u64> {
        let updated = self
            .ctx
            .message_repo()
            .mark_visitor_messages_read(chat_id, Utc::now())
            .await?;

        info!(
            chat_id = %chat_id,
            admin_id = %admin_id,
            count = updated,
            "Visitor messages marked read"
        );

        Ok(updated)
    }

    /// Count unread visitor messages: across an admin's chats when an id is
    /// given, across unassigned WAITING chats otherwise
    #[instrument(skip(self))]
    pub async fn unread_count(&self, admin_id: Option<Uuid>) -> ServiceResult<i64> {
        Ok(self.ctx.message_repo().count_unread(admin_id).await?)
    }
}
