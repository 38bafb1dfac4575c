//! WebSocket handler
//!
//! Upgrades connections, runs the per-socket send and receive loops, and
//! cleans up on disconnect.

use crate::handlers::{ConnectHandler, ConnectParams, EventDispatcher};
use crate::protocol::ServerEvent;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::{header, HeaderMap},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::borrow::Cow;
use tokio::sync::mpsc;

/// Per-connection outbound queue size
const EVENT_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    Query(mut params): Query<ConnectParams>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    // The admin token may arrive as an Authorization header instead of a
    // query parameter
    if params.token.is_none() {
        params.token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
    }

    ws.on_upgrade(move |socket| handle_socket(state, params, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, params: ConnectParams, mut socket: WebSocket) {
    // Only a bad token closes the socket; absent credentials just mean an
    // unauthenticated session
    let participant = match ConnectHandler::authenticate(&params, state.jwt()) {
        Ok(participant) => participant,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting connection with invalid credentials");
            let _ = socket
                .send(Message::Close(Some(CloseFrame {
                    code: close_code::POLICY,
                    reason: Cow::from("Authentication failed"),
                })))
                .await;
            return;
        }
    };

    let (tx, mut rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER_SIZE);
    let connection = ConnectHandler::register(&state, participant, tx).await;
    let session_id = connection.session_id().to_string();

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Drain the outbound queue onto the socket
    let session_id_send = session_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::debug!(
                            session_id = %session_id_send,
                            "Socket closed while sending"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_send,
                        error = %e,
                        "Failed to serialize event"
                    );
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Dispatch inbound frames; handler failures never close the socket
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(result) = ws_stream.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    if let Err(e) =
                        EventDispatcher::dispatch(&state_recv, &connection_recv, &text).await
                    {
                        tracing::warn!(
                            session_id = %connection_recv.session_id(),
                            code = e.error_code(),
                            error = %e,
                            "Handler failed"
                        );
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        "Client closed connection"
                    );
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // axum answers pings itself
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        "Ignoring binary frame"
                    );
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %connection_recv.session_id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    // Either loop ending means the connection is done
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    ConnectHandler::disconnect(&state, &connection).await;

    tracing::info!(
        session_id = %session_id,
        uptime_secs = connection.uptime().as_secs(),
        "Session closed"
    );
}
