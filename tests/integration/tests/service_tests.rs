//! Service layer integration tests
//!
//! Exercise the chat, message, and push services against the in-memory
//! repositories: lifecycle transitions, pagination, read-state semantics,
//! and device registration.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use integration_tests::{
    create_chat_request, unread_visitor_message, InMemoryChatRepository, InMemoryDeviceRepository,
    InMemoryMessageRepository, InMemoryVisitorRepository, TestHarness,
};
use livechat_cache::InMemoryPresenceStore;
use livechat_core::{ChatPriority, ChatStatus, Message, MessageKind, SenderKind};
use livechat_push::PushNotification;
use livechat_service::dto::{
    CreateMessageRequest, ListChatsRequest, RegisterDeviceRequest, UpdateChatRequest,
};
use livechat_service::{ChatService, MessageService, PushService, ServiceContextBuilder};

// ============================================================================
// Chat Lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_chat_creates_visitor_on_first_contact() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());

    let mut request = create_chat_request();
    request.name = Some("Alice".to_string());
    request.subject = Some("Billing question".to_string());
    let fingerprint = request.fingerprint.clone();

    let detail = service.create_chat(request).await.unwrap();

    assert_eq!(detail.status, ChatStatus::Waiting);
    assert_eq!(detail.priority, ChatPriority::Normal);
    assert_eq!(detail.subject.as_deref(), Some("Billing question"));
    assert_eq!(detail.visitor.fingerprint, fingerprint);
    assert_eq!(detail.visitor.name.as_deref(), Some("Alice"));
    assert!(detail.messages.is_empty());

    assert_eq!(harness.visitors.snapshot().len(), 1);
    assert_eq!(harness.chats.snapshot().len(), 1);
}

#[tokio::test]
async fn test_create_chat_reuses_visitor_by_fingerprint() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());

    let request = create_chat_request();
    let mut returning = create_chat_request();
    returning.fingerprint = request.fingerprint.clone();

    let first = service.create_chat(request).await.unwrap();
    let second = service.create_chat(returning).await.unwrap();

    // same visitor record, fresh chat
    assert_eq!(first.visitor.id, second.visitor.id);
    assert_ne!(first.id, second.id);
    assert_eq!(harness.visitors.snapshot().len(), 1);
    assert_eq!(harness.chats.snapshot().len(), 2);
}

#[tokio::test]
async fn test_create_chat_rejects_invalid_input() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());

    let mut request = create_chat_request();
    request.email = Some("not-an-email".to_string());
    let err = service.create_chat(request).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");

    let mut request = create_chat_request();
    request.fingerprint = String::new();
    assert!(service.create_chat(request).await.is_err());

    assert!(harness.chats.snapshot().is_empty());
}

#[tokio::test]
async fn test_get_chat_returns_messages_oldest_first() {
    let harness = TestHarness::new();
    let chat = harness.seed_chat().await;

    let base = Utc::now();
    for (i, content) in ["first", "second", "third"].iter().enumerate() {
        let mut message = unread_visitor_message(chat.id, content);
        message.created_at = base + Duration::seconds(i as i64);
        harness
            .services()
            .message_repo()
            .create(&message)
            .await
            .unwrap();
    }

    let detail = ChatService::new(harness.services())
        .get_chat(chat.id)
        .await
        .unwrap();

    let contents: Vec<&str> = detail.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
    assert_eq!(detail.visitor.id, chat.visitor_id);
}

#[tokio::test]
async fn test_get_chat_unknown_id_is_not_found() {
    let harness = TestHarness::new();
    let err = ChatService::new(harness.services())
        .get_chat(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_list_chats_paginates_newest_first() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());

    let base = Utc::now();
    let mut ids = Vec::new();
    for i in 0..5 {
        let chat = harness.seed_chat().await;
        harness
            .services()
            .chat_repo()
            .touch(chat.id, base + Duration::seconds(i))
            .await
            .unwrap();
        ids.push(chat.id);
    }

    let page1 = service
        .list_chats(ListChatsRequest {
            page: 1,
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page1.chats.len(), 2);
    assert_eq!(page1.chats[0].id, ids[4]);
    assert_eq!(page1.chats[1].id, ids[3]);
    assert_eq!(page1.pagination.total, 5);
    assert_eq!(page1.pagination.total_pages, 3);

    let page3 = service
        .list_chats(ListChatsRequest {
            page: 3,
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page3.chats.len(), 1);
    assert_eq!(page3.chats[0].id, ids[0]);
}

#[tokio::test]
async fn test_list_chats_filters_by_status_and_admin() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());

    let waiting = harness.seed_chat().await;
    let assigned = harness.seed_chat().await;
    let closed = harness.seed_chat().await;
    let admin_id = Uuid::new_v4();

    service.assign_admin(assigned.id, admin_id).await.unwrap();
    service
        .update_chat(
            closed.id,
            UpdateChatRequest {
                status: Some(ChatStatus::Closed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let waiting_page = service
        .list_chats(ListChatsRequest {
            status: Some(ChatStatus::Waiting),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(waiting_page.chats.len(), 1);
    assert_eq!(waiting_page.chats[0].id, waiting.id);

    let mine = service
        .list_chats(ListChatsRequest {
            admin_id: Some(admin_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.chats.len(), 1);
    assert_eq!(mine.chats[0].id, assigned.id);
    assert_eq!(mine.chats[0].status, ChatStatus::Active);
}

#[tokio::test]
async fn test_list_chats_includes_latest_message() {
    let harness = TestHarness::new();
    let chat = harness.seed_chat().await;

    let base = Utc::now();
    let mut older = unread_visitor_message(chat.id, "older");
    older.created_at = base;
    let mut newer = unread_visitor_message(chat.id, "newer");
    newer.created_at = base + Duration::seconds(5);
    harness.services().message_repo().create(&older).await.unwrap();
    harness.services().message_repo().create(&newer).await.unwrap();

    let listing = ChatService::new(harness.services())
        .list_chats(ListChatsRequest::default())
        .await
        .unwrap();

    let last = listing.chats[0].last_message.as_ref().unwrap();
    assert_eq!(last.content, "newer");
}

#[tokio::test]
async fn test_update_chat_stamps_closed_at_on_terminal_status() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());

    let chat = harness.seed_chat().await;
    let response = service
        .update_chat(
            chat.id,
            UpdateChatRequest {
                status: Some(ChatStatus::Resolved),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status, ChatStatus::Resolved);
    assert!(response.closed_at.is_some());

    // a non-terminal change leaves closed_at alone
    let chat = harness.seed_chat().await;
    let response = service
        .update_chat(
            chat.id,
            UpdateChatRequest {
                priority: Some(ChatPriority::Urgent),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(response.priority, ChatPriority::Urgent);
    assert!(response.closed_at.is_none());
}

#[tokio::test]
async fn test_assign_admin_activates_chat() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());

    let chat = harness.seed_chat().await;
    let admin_id = Uuid::new_v4();
    let response = service.assign_admin(chat.id, admin_id).await.unwrap();

    assert_eq!(response.status, ChatStatus::Active);
    assert_eq!(response.admin_id, Some(admin_id));

    let stored = harness.chats.snapshot();
    assert_eq!(stored[0].status, ChatStatus::Active);
    assert_eq!(stored[0].admin_id, Some(admin_id));
}

#[tokio::test]
async fn test_block_and_unblock_visitor() {
    let harness = TestHarness::new();
    let service = ChatService::new(harness.services());
    let visitor = harness.seed_visitor().await;

    service.block_visitor(visitor.id).await.unwrap();
    assert!(harness.visitors.snapshot()[0].is_blocked);

    service.unblock_visitor(visitor.id).await.unwrap();
    assert!(!harness.visitors.snapshot()[0].is_blocked);

    assert!(service.block_visitor(Uuid::new_v4()).await.is_err());
}

// ============================================================================
// Messages and Read State
// ============================================================================

#[tokio::test]
async fn test_create_message_rejects_oversized_content() {
    let harness = TestHarness::new();
    let chat = harness.seed_chat().await;
    let service = MessageService::new(harness.services());

    let request = CreateMessageRequest {
        chat_id: chat.id,
        sender_id: None,
        sender_kind: SenderKind::Visitor,
        content: "x".repeat(4001),
        kind: MessageKind::Text,
    };

    let err = service.create_message(request).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(harness.messages.snapshot().is_empty());
}

#[tokio::test]
async fn test_mark_read_is_monotonic() {
    let harness = TestHarness::new();
    let chat = harness.seed_chat().await;
    let admin_id = Uuid::new_v4();

    harness.seed_visitor_message(chat.id, "one").await;
    harness.seed_visitor_message(chat.id, "two").await;
    // an admin reply, which read receipts never touch
    let reply = Message::new(
        Uuid::new_v4(),
        chat.id,
        Some(admin_id),
        SenderKind::Admin,
        "reply".to_string(),
        MessageKind::Text,
    );
    harness.services().message_repo().create(&reply).await.unwrap();

    let service = MessageService::new(harness.services());
    assert_eq!(service.mark_read(chat.id, admin_id).await.unwrap(), 2);

    let read: Vec<Message> = harness
        .messages
        .snapshot()
        .into_iter()
        .filter(|m| m.is_read)
        .collect();
    assert_eq!(read.len(), 2);
    let original_read_at = read[0].read_at;
    assert!(original_read_at.is_some());

    // a second pass flips nothing and keeps read_at stable
    assert_eq!(service.mark_read(chat.id, admin_id).await.unwrap(), 0);
    let stored = harness.messages.snapshot();
    let reread = stored.iter().find(|m| m.id == read[0].id).unwrap();
    assert_eq!(reread.read_at, original_read_at);

    assert!(stored
        .iter()
        .any(|m| m.sender_kind == SenderKind::Admin && !m.is_read));
}

#[tokio::test]
async fn test_unread_count_scopes_by_admin_or_waiting() {
    let harness = TestHarness::new();
    let service = MessageService::new(harness.services());
    let admin_id = Uuid::new_v4();

    let assigned = harness.seed_chat().await;
    ChatService::new(harness.services())
        .assign_admin(assigned.id, admin_id)
        .await
        .unwrap();
    harness.seed_visitor_message(assigned.id, "a1").await;
    harness.seed_visitor_message(assigned.id, "a2").await;

    let waiting = harness.seed_chat().await;
    harness.seed_visitor_message(waiting.id, "w1").await;

    assert_eq!(service.unread_count(Some(admin_id)).await.unwrap(), 2);
    // without an admin id the count covers unassigned WAITING chats
    assert_eq!(service.unread_count(None).await.unwrap(), 1);

    service.mark_read(assigned.id, admin_id).await.unwrap();
    assert_eq!(service.unread_count(Some(admin_id)).await.unwrap(), 0);
}

// ============================================================================
// Devices and Push
// ============================================================================

#[tokio::test]
async fn test_register_device_upserts_by_token() {
    let harness = TestHarness::new();
    let service = PushService::new(harness.services());
    let first_admin = Uuid::new_v4();
    let second_admin = Uuid::new_v4();

    service
        .register_device(RegisterDeviceRequest {
            admin_id: first_admin,
            device_token: "shared-token".to_string(),
            device_type: "web".to_string(),
        })
        .await
        .unwrap();
    service
        .register_device(RegisterDeviceRequest {
            admin_id: second_admin,
            device_token: "shared-token".to_string(),
            device_type: "android".to_string(),
        })
        .await
        .unwrap();

    // the token moved to the second admin instead of duplicating
    let devices = harness.devices.snapshot();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].admin_id, second_admin);
    assert_eq!(devices[0].device_type, "android");

    let err = service
        .register_device(RegisterDeviceRequest {
            admin_id: first_admin,
            device_token: String::new(),
            device_type: "web".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_notify_admins_without_provider_is_a_no_op() {
    let chats = Arc::new(InMemoryChatRepository::new());
    let ctx = ServiceContextBuilder::new()
        .chat_repo(Arc::clone(&chats) as _)
        .message_repo(Arc::new(InMemoryMessageRepository::new(chats)))
        .visitor_repo(Arc::new(InMemoryVisitorRepository::new()))
        .device_repo(Arc::new(InMemoryDeviceRepository::new()))
        .presence_store(Arc::new(InMemoryPresenceStore::new()))
        .build()
        .unwrap();

    // must return quietly with no provider configured
    PushService::new(&ctx)
        .notify_admins(PushNotification::new("New Message", "body"))
        .await;
}

#[tokio::test]
async fn test_context_builder_requires_every_repository() {
    let err = ServiceContextBuilder::new().build().unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}
