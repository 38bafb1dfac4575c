//! Chat service
//!
//! Handles chat lifecycle: creation by visitors, listing and assignment for
//! admins, status transitions, and visitor blocking.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use livechat_core::traits::ChatQuery;
use livechat_core::{Chat, Visitor};

use crate::dto::{
    ChatDetailResponse, ChatListResponse, ChatResponse, ChatSummaryResponse, CreateChatRequest,
    ListChatsRequest, Pagination, UpdateChatRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    /// Create a new ChatService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a chat for a visitor, creating the visitor record on first
    /// contact. Visitors are keyed by browser fingerprint, so a returning
    /// visitor gets a fresh chat attached to their existing record.
    #[instrument(skip(self, request))]
    pub async fn create_chat(&self, request: CreateChatRequest) -> ServiceResult<ChatDetailResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let visitor = match self
            .ctx
            .visitor_repo()
            .find_by_fingerprint(&request.fingerprint)
            .await?
        {
            Some(visitor) => visitor,
            None => {
                let mut visitor = Visitor::new(Uuid::new_v4(), request.fingerprint);
                visitor.name = request.name;
                visitor.email = request.email;
                visitor.ip_address = request.ip_address;
                visitor.user_agent = request.user_agent;
                self.ctx.visitor_repo().create(&visitor).await?;

                info!(visitor_id = %visitor.id, "Visitor created");
                visitor
            }
        };

        let chat = Chat::new(Uuid::new_v4(), visitor.id, request.subject);
        self.ctx.chat_repo().create(&chat).await?;

        info!(chat_id = %chat.id, visitor_id = %visitor.id, "Chat created");

        Ok(ChatDetailResponse::new(chat, visitor, Vec::new()))
    }

    /// Get a chat with its visitor and full message history
    #[instrument(skip(self))]
    pub async fn get_chat(&self, id: Uuid) -> ServiceResult<ChatDetailResponse> {
        let chat = self
            .ctx
            .chat_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chat", id.to_string()))?;

        let visitor = self
            .ctx
            .visitor_repo()
            .find_by_id(chat.visitor_id)
            .await?
            .ok_or_else(|| ServiceError::internal("Chat visitor missing"))?;

        let messages = self.ctx.message_repo().find_by_chat(id).await?;

        Ok(ChatDetailResponse::new(chat, visitor, messages))
    }

    /// List chats, most recently updated first, each row carrying its
    /// visitor and latest message
    #[instrument(skip(self, request))]
    pub async fn list_chats(&self, request: ListChatsRequest) -> ServiceResult<ChatListResponse> {
        let page = request.page.max(1);
        let limit = request.limit.clamp(1, 100);

        let query = ChatQuery {
            status: request.status,
            admin_id: request.admin_id,
            limit,
            offset: (page - 1) * limit,
        };

        let chats = self.ctx.chat_repo().list(&query).await?;
        let total = self.ctx.chat_repo().count(&query).await?;

        let mut rows = Vec::with_capacity(chats.len());
        for chat in chats {
            let visitor = self
                .ctx
                .visitor_repo()
                .find_by_id(chat.visitor_id)
                .await?
                .ok_or_else(|| ServiceError::internal("Chat visitor missing"))?;
            let last_message = self.ctx.message_repo().last_by_chat(chat.id).await?;
            rows.push(ChatSummaryResponse::new(chat, visitor, last_message));
        }

        Ok(ChatListResponse {
            chats: rows,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: (total as u64).div_ceil(limit as u64) as i64,
            },
        })
    }

    /// Apply status, priority, or assignment changes. Entering a terminal
    /// status stamps `closed_at`.
    #[instrument(skip(self, request))]
    pub async fn update_chat(
        &self,
        id: Uuid,
        request: UpdateChatRequest,
    ) -> ServiceResult<ChatResponse> {
        let mut chat = self
            .ctx
            .chat_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chat", id.to_string()))?;

        if let Some(admin_id) = request.admin_id {
            chat.admin_id = Some(admin_id);
        }
        if let Some(priority) = request.priority {
            chat.priority = priority;
        }
        if let Some(status) = request.status {
            chat.set_status(status);
        }
        chat.updated_at = Utc::now();

        self.ctx.chat_repo().update(&chat).await?;

        info!(chat_id = %chat.id, status = %chat.status, "Chat updated");

        Ok(ChatResponse::from(chat))
    }

    /// Assign an admin to a chat and move it to ACTIVE
    #[instrument(skip(self))]
    pub async fn assign_admin(&self, chat_id: Uuid, admin_id: Uuid) -> ServiceResult<ChatResponse> {
        let mut chat = self
            .ctx
            .chat_repo()
            .find_by_id(chat_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Chat", chat_id.to_string()))?;

        chat.assign(admin_id);
        self.ctx.chat_repo().update(&chat).await?;

        info!(chat_id = %chat_id, admin_id = %admin_id, "Admin assigned");

        Ok(ChatResponse::from(chat))
    }

    /// Block a visitor from starting new chats
    #[instrument(skip(self))]
    pub async fn block_visitor(&self, id: Uuid) -> ServiceResult<()> {
        self.ctx.visitor_repo().set_blocked(id, true).await?;
        info!(visitor_id = %id, "Visitor blocked");
        Ok(())
    }

    /// Lift a visitor block
    #[instrument(skip(self))]
    pub async fn unblock_visitor(&self, id: Uuid) -> ServiceResult<()> {
        self.ctx.visitor_repo().set_blocked(id, false).await?;
        info!(visitor_id = %id, "Visitor unblocked");
        Ok(())
    }
}
