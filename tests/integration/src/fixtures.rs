//! In-memory test doubles and data builders
//!
//! Vec-backed repository and provider implementations so the whole stack
//! runs in-process, without PostgreSQL, Redis, or FCM. Each fixture mirrors
//! the query semantics of its production counterpart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use livechat_core::traits::{
    ChatQuery, ChatRepository, DeviceRepository, MessageRepository, RepoResult, VisitorRepository,
};
use livechat_core::{
    AdminDevice, Chat, ChatStatus, DomainError, Message, MessageKind, SenderKind, Visitor,
};
use livechat_push::{PushError, PushNotification, PushProvider, PushReport, PushResult};
use livechat_service::dto::CreateChatRequest;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Entity Builders
// ============================================================================

/// A visitor with a unique fingerprint
pub fn unique_visitor() -> Visitor {
    Visitor::new(Uuid::new_v4(), format!("fp-{}", unique_suffix()))
}

/// A WAITING chat for the given visitor
pub fn waiting_chat(visitor_id: Uuid) -> Chat {
    Chat::new(Uuid::new_v4(), visitor_id, None)
}

/// An unread visitor text message in the given chat
pub fn unread_visitor_message(chat_id: Uuid, content: &str) -> Message {
    Message::new(
        Uuid::new_v4(),
        chat_id,
        None,
        SenderKind::Visitor,
        content.to_string(),
        MessageKind::Text,
    )
}

/// An admin device with a unique token
pub fn unique_device(admin_id: Uuid) -> AdminDevice {
    AdminDevice::new(
        Uuid::new_v4(),
        admin_id,
        format!("token-{}", unique_suffix()),
        "web".to_string(),
    )
}

/// A chat-creation request with a unique fingerprint
pub fn create_chat_request() -> CreateChatRequest {
    CreateChatRequest {
        fingerprint: format!("fp-{}", unique_suffix()),
        name: None,
        email: None,
        subject: None,
        ip_address: None,
        user_agent: None,
    }
}

// ============================================================================
// Wire Frames
// ============================================================================

/// A chat:join text frame
pub fn join_frame(chat_id: Uuid) -> String {
    serde_json::json!({ "event": "chat:join", "data": { "chatId": chat_id } }).to_string()
}

/// A chat:leave text frame
pub fn leave_frame(chat_id: Uuid) -> String {
    serde_json::json!({ "event": "chat:leave", "data": { "chatId": chat_id } }).to_string()
}

/// A chat:message text frame
pub fn message_frame(chat_id: Uuid, content: &str) -> String {
    serde_json::json!({
        "event": "chat:message",
        "data": { "chatId": chat_id, "content": content }
    })
    .to_string()
}

/// A chat:typing text frame
pub fn typing_frame(chat_id: Uuid) -> String {
    serde_json::json!({ "event": "chat:typing", "data": { "chatId": chat_id } }).to_string()
}

/// A chat:stop-typing text frame
pub fn stop_typing_frame(chat_id: Uuid) -> String {
    serde_json::json!({ "event": "chat:stop-typing", "data": { "chatId": chat_id } }).to_string()
}

// ============================================================================
// Chat Repository
// ============================================================================

/// Vec-backed ChatRepository
#[derive(Default)]
pub struct InMemoryChatRepository {
    chats: Mutex<Vec<Chat>>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored chat, for assertions
    pub fn snapshot(&self) -> Vec<Chat> {
        self.chats.lock().unwrap().clone()
    }
}

fn matches_query(chat: &Chat, query: &ChatQuery) -> bool {
    query.status.is_none_or(|status| chat.status == status)
        && query
            .admin_id
            .is_none_or(|admin_id| chat.admin_id == Some(admin_id))
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Chat>> {
        Ok(self.chats.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, query: &ChatQuery) -> RepoResult<Vec<Chat>> {
        let limit = query.limit.clamp(1, 100) as usize;
        let offset = query.offset.max(0) as usize;

        let mut rows: Vec<Chat> = self
            .chats
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches_query(c, query))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, query: &ChatQuery) -> RepoResult<i64> {
        let count = self
            .chats
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches_query(c, query))
            .count();
        Ok(count as i64)
    }

    async fn create(&self, chat: &Chat) -> RepoResult<()> {
        self.chats.lock().unwrap().push(chat.clone());
        Ok(())
    }

    async fn update(&self, chat: &Chat) -> RepoResult<()> {
        let mut chats = self.chats.lock().unwrap();
        match chats.iter_mut().find(|c| c.id == chat.id) {
            Some(row) => {
                *row = chat.clone();
                Ok(())
            }
            None => Err(DomainError::ChatNotFound(chat.id)),
        }
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()> {
        let mut chats = self.chats.lock().unwrap();
        match chats.iter_mut().find(|c| c.id == id) {
            Some(row) => {
                row.updated_at = at;
                Ok(())
            }
            None => Err(DomainError::ChatNotFound(id)),
        }
    }
}

// ============================================================================
// Message Repository
// ============================================================================

/// Vec-backed MessageRepository.
///
/// Holds a handle to the chat fixture so unread counting can apply the same
/// chat filters the SQL join does.
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<Message>>,
    chats: Arc<InMemoryChatRepository>,
}

impl InMemoryMessageRepository {
    pub fn new(chats: Arc<InMemoryChatRepository>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            chats,
        }
    }

    /// Copy of every stored message, for assertions
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn find_by_chat(&self, chat_id: Uuid) -> RepoResult<Vec<Message>> {
        let mut rows: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.created_at);
        Ok(rows)
    }

    async fn last_by_chat(&self, chat_id: Uuid) -> RepoResult<Option<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .max_by_key(|m| m.created_at)
            .cloned())
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn mark_visitor_messages_read(
        &self,
        chat_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let mut messages = self.messages.lock().unwrap();
        let mut flipped = 0;
        for message in messages.iter_mut().filter(|m| {
            m.chat_id == chat_id && m.sender_kind == SenderKind::Visitor && !m.is_read
        }) {
            message.is_read = true;
            message.read_at = Some(read_at);
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn count_unread(&self, admin_id: Option<Uuid>) -> RepoResult<i64> {
        let chats = self.chats.snapshot();
        let in_scope = |chat_id: Uuid| {
            chats.iter().any(|c| {
                c.id == chat_id
                    && match admin_id {
                        Some(admin_id) => c.admin_id == Some(admin_id),
                        None => c.status == ChatStatus::Waiting,
                    }
            })
        };

        let count = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.sender_kind == SenderKind::Visitor && !m.is_read && in_scope(m.chat_id))
            .count();
        Ok(count as i64)
    }
}

// ============================================================================
// Visitor Repository
// ============================================================================

/// Vec-backed VisitorRepository
#[derive(Default)]
pub struct InMemoryVisitorRepository {
    visitors: Mutex<Vec<Visitor>>,
}

impl InMemoryVisitorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored visitor, for assertions
    pub fn snapshot(&self) -> Vec<Visitor> {
        self.visitors.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisitorRepository for InMemoryVisitorRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Visitor>> {
        Ok(self
            .visitors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn find_by_fingerprint(&self, fingerprint: &str) -> RepoResult<Option<Visitor>> {
        Ok(self
            .visitors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.fingerprint == fingerprint)
            .cloned())
    }

    async fn create(&self, visitor: &Visitor) -> RepoResult<()> {
        let mut visitors = self.visitors.lock().unwrap();
        if visitors.iter().any(|v| v.fingerprint == visitor.fingerprint) {
            return Err(DomainError::Conflict(
                "Visitor fingerprint already registered".to_string(),
            ));
        }
        visitors.push(visitor.clone());
        Ok(())
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> RepoResult<()> {
        let mut visitors = self.visitors.lock().unwrap();
        match visitors.iter_mut().find(|v| v.id == id) {
            Some(visitor) => {
                visitor.is_blocked = blocked;
                visitor.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::VisitorNotFound(id)),
        }
    }
}

// ============================================================================
// Device Repository
// ============================================================================

/// Vec-backed DeviceRepository with token upsert
#[derive(Default)]
pub struct InMemoryDeviceRepository {
    devices: Mutex<Vec<AdminDevice>>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored device, for assertions
    pub fn snapshot(&self) -> Vec<AdminDevice> {
        self.devices.lock().unwrap().clone()
    }

    /// Registered tokens, oldest first
    pub fn tokens(&self) -> Vec<String> {
        let mut devices = self.devices.lock().unwrap().clone();
        devices.sort_by_key(|d| d.created_at);
        devices.into_iter().map(|d| d.device_token).collect()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn register(&self, device: &AdminDevice) -> RepoResult<()> {
        let mut devices = self.devices.lock().unwrap();
        match devices
            .iter_mut()
            .find(|d| d.device_token == device.device_token)
        {
            Some(existing) => {
                existing.admin_id = device.admin_id;
                existing.device_type = device.device_type.clone();
            }
            None => devices.push(device.clone()),
        }
        Ok(())
    }

    async fn find_all(&self) -> RepoResult<Vec<AdminDevice>> {
        let mut devices = self.devices.lock().unwrap().clone();
        devices.sort_by_key(|d| d.created_at);
        Ok(devices)
    }

    async fn delete_by_tokens(&self, tokens: &[String]) -> RepoResult<u64> {
        let mut devices = self.devices.lock().unwrap();
        let before = devices.len();
        devices.retain(|d| !tokens.contains(&d.device_token));
        Ok((before - devices.len()) as u64)
    }
}

// ============================================================================
// Failure Injection
// ============================================================================

fn storage_down() -> DomainError {
    DomainError::DatabaseError("connection refused".to_string())
}

/// MessageRepository that fails every call with a database error
#[derive(Debug, Default)]
pub struct FailingMessageRepository;

#[async_trait]
impl MessageRepository for FailingMessageRepository {
    async fn find_by_id(&self, _id: Uuid) -> RepoResult<Option<Message>> {
        Err(storage_down())
    }

    async fn find_by_chat(&self, _chat_id: Uuid) -> RepoResult<Vec<Message>> {
        Err(storage_down())
    }

    async fn last_by_chat(&self, _chat_id: Uuid) -> RepoResult<Option<Message>> {
        Err(storage_down())
    }

    async fn create(&self, _message: &Message) -> RepoResult<()> {
        Err(storage_down())
    }

    async fn mark_visitor_messages_read(
        &self,
        _chat_id: Uuid,
        _read_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        Err(storage_down())
    }

    async fn count_unread(&self, _admin_id: Option<Uuid>) -> RepoResult<i64> {
        Err(storage_down())
    }
}

// ============================================================================
// Push Provider
// ============================================================================

/// A delivery attempt captured by [`RecordingPushProvider`]
#[derive(Debug, Clone)]
pub struct RecordedPush {
    pub tokens: Vec<String>,
    pub notification: PushNotification,
}

enum PushOutcome {
    Succeed,
    Report(PushReport),
    Fail,
}

/// PushProvider that records every call instead of talking to a backend.
///
/// Reports all tokens as delivered by default; `respond_with` substitutes a
/// fixed report and `fail` makes every send error.
pub struct RecordingPushProvider {
    calls: Mutex<Vec<RecordedPush>>,
    outcome: Mutex<PushOutcome>,
}

impl RecordingPushProvider {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(PushOutcome::Succeed),
        }
    }

    /// Return this report from every subsequent send
    pub fn respond_with(&self, report: PushReport) {
        *self.outcome.lock().unwrap() = PushOutcome::Report(report);
    }

    /// Make every subsequent send fail
    pub fn fail(&self) {
        *self.outcome.lock().unwrap() = PushOutcome::Fail;
    }

    /// Every delivery attempt so far, failed ones included
    pub fn calls(&self) -> Vec<RecordedPush> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of delivery attempts so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for RecordingPushProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushProvider for RecordingPushProvider {
    async fn send_to_tokens(
        &self,
        tokens: &[String],
        notification: &PushNotification,
    ) -> PushResult<PushReport> {
        self.calls.lock().unwrap().push(RecordedPush {
            tokens: tokens.to_vec(),
            notification: notification.clone(),
        });

        match &*self.outcome.lock().unwrap() {
            PushOutcome::Succeed => Ok(PushReport {
                success: tokens.len() as u32,
                failure: 0,
                invalid_tokens: Vec::new(),
            }),
            PushOutcome::Report(report) => Ok(report.clone()),
            PushOutcome::Fail => Err(PushError::Endpoint {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}
