//! In-process test harness for the gateway
//!
//! Wires a `GatewayState` to the in-memory fixtures and connects fake
//! clients straight through the connection handlers, so tests drive the
//! same code paths as a real socket without any network or infrastructure.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use uuid::Uuid;

use livechat_cache::InMemoryPresenceStore;
use livechat_common::{AppError, JwtService};
use livechat_core::traits::{
    ChatRepository, DeviceRepository, MessageRepository, VisitorRepository,
};
use livechat_core::{AdminDevice, Chat, Message, Visitor};
use livechat_gateway::connection::{Connection, Participant};
use livechat_gateway::handlers::{ConnectHandler, ConnectParams, EventDispatcher, HandlerResult};
use livechat_gateway::protocol::ServerEvent;
use livechat_gateway::GatewayState;
use livechat_service::{ServiceContext, ServiceContextBuilder};

use crate::fixtures::{
    unique_device, unique_visitor, unread_visitor_message, waiting_chat, FailingMessageRepository,
    InMemoryChatRepository, InMemoryDeviceRepository, InMemoryMessageRepository,
    InMemoryVisitorRepository, RecordingPushProvider,
};

/// How long event assertions wait before giving up
const RECV_TIMEOUT: Duration = Duration::from_secs(1);

/// Buffer size for fake client channels
const CLIENT_BUFFER: usize = 32;

/// JWT service with a fixed test secret
pub fn test_jwt() -> JwtService {
    JwtService::new("integration-test-secret-key-0123456789", 900)
}

/// A signed admin token for the given id
pub fn admin_token(admin_id: Uuid) -> String {
    test_jwt().sign(&admin_id.to_string()).expect("sign token")
}

/// Gateway wired to in-memory fixtures
pub struct TestHarness {
    pub state: GatewayState,
    pub chats: Arc<InMemoryChatRepository>,
    pub messages: Arc<InMemoryMessageRepository>,
    pub visitors: Arc<InMemoryVisitorRepository>,
    pub devices: Arc<InMemoryDeviceRepository>,
    pub push: Arc<RecordingPushProvider>,
}

impl TestHarness {
    /// Build a harness with working fixtures and a recording push provider
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Build a harness whose message repository fails every call
    pub fn with_failing_messages() -> Self {
        Self::build(true)
    }

    fn build(failing_messages: bool) -> Self {
        let chats = Arc::new(InMemoryChatRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new(Arc::clone(&chats)));
        let visitors = Arc::new(InMemoryVisitorRepository::new());
        let devices = Arc::new(InMemoryDeviceRepository::new());
        let push = Arc::new(RecordingPushProvider::new());

        let message_repo: Arc<dyn MessageRepository> = if failing_messages {
            Arc::new(FailingMessageRepository)
        } else {
            Arc::clone(&messages) as Arc<dyn MessageRepository>
        };

        let services = ServiceContextBuilder::new()
            .chat_repo(Arc::clone(&chats) as Arc<dyn ChatRepository>)
            .message_repo(message_repo)
            .visitor_repo(Arc::clone(&visitors) as Arc<dyn VisitorRepository>)
            .device_repo(Arc::clone(&devices) as Arc<dyn DeviceRepository>)
            .presence_store(Arc::new(InMemoryPresenceStore::new()))
            .push_provider(Arc::clone(&push) as _)
            .build()
            .expect("service context");

        let state = GatewayState::new(services, test_jwt());

        Self {
            state,
            chats,
            messages,
            visitors,
            devices,
            push,
        }
    }

    /// The shared service context
    pub fn services(&self) -> &ServiceContext {
        self.state.services()
    }

    // === Sessions ===

    /// Authenticate handshake params and register the resulting participant
    pub async fn connect(&self, params: &ConnectParams) -> Result<TestClient, AppError> {
        let participant = ConnectHandler::authenticate(params, self.state.jwt())?;
        Ok(self.register(participant).await)
    }

    /// Connect an admin session
    pub async fn connect_admin(&self, admin_id: Uuid) -> TestClient {
        self.register(Participant::Admin { id: admin_id }).await
    }

    /// Connect a visitor session
    pub async fn connect_visitor(&self, visitor_id: &str) -> TestClient {
        self.register(Participant::Visitor {
            id: visitor_id.to_string(),
        })
        .await
    }

    /// Connect a session that presented no credentials
    pub async fn connect_unauthenticated(&self) -> TestClient {
        self.register(Participant::Unauthenticated).await
    }

    async fn register(&self, participant: Participant) -> TestClient {
        let (tx, rx) = mpsc::channel(CLIENT_BUFFER);
        let connection = ConnectHandler::register(&self.state, participant, tx).await;
        TestClient { connection, rx }
    }

    /// Run the disconnect path for a client
    pub async fn disconnect(&self, client: &TestClient) {
        ConnectHandler::disconnect(&self.state, &client.connection).await;
    }

    /// Feed a raw text frame through the event dispatcher
    pub async fn dispatch(&self, client: &TestClient, frame: &str) -> HandlerResult<()> {
        EventDispatcher::dispatch(&self.state, &client.connection, frame).await
    }

    // === Seeding, through the same repository traits production uses ===

    /// Seed a visitor row
    pub async fn seed_visitor(&self) -> Visitor {
        let visitor = unique_visitor();
        self.services()
            .visitor_repo()
            .create(&visitor)
            .await
            .expect("seed visitor");
        visitor
    }

    /// Seed a WAITING chat with a fresh visitor
    pub async fn seed_chat(&self) -> Chat {
        let visitor = self.seed_visitor().await;
        let chat = waiting_chat(visitor.id);
        self.services()
            .chat_repo()
            .create(&chat)
            .await
            .expect("seed chat");
        chat
    }

    /// Seed an unread visitor message
    pub async fn seed_visitor_message(&self, chat_id: Uuid, content: &str) -> Message {
        let message = unread_visitor_message(chat_id, content);
        self.services()
            .message_repo()
            .create(&message)
            .await
            .expect("seed message");
        message
    }

    /// Seed an admin device token
    pub async fn seed_device(&self, admin_id: Uuid) -> AdminDevice {
        let device = unique_device(admin_id);
        self.services()
            .device_repo()
            .register(&device)
            .await
            .expect("seed device");
        device
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A fake client holding a registered connection and its event channel
pub struct TestClient {
    pub connection: Arc<Connection>,
    rx: mpsc::Receiver<ServerEvent>,
}

impl TestClient {
    /// Wait for the next event, panicking after a timeout
    pub async fn recv(&mut self) -> ServerEvent {
        tokio::time::timeout(RECV_TIMEOUT, self.rx.recv())
            .await
            .expect("timed out waiting for an event")
            .expect("connection channel closed")
    }

    /// Take an already-delivered event without waiting
    pub fn try_recv(&mut self) -> Option<ServerEvent> {
        self.rx.try_recv().ok()
    }

    /// Throw away everything already delivered
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }

    /// Assert that nothing has been delivered
    pub fn assert_silent(&mut self) {
        if let Ok(event) = self.rx.try_recv() {
            panic!("expected no event, got {}", event.name());
        }
    }
}
