use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use super::AppState;
use crate::error::AppError;
use crate::events::ServerEvent;
use crate::models::SocketQuery;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<SocketQuery>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, query.username, state))
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), AppError> {
    let text = serde_json::to_string(event)?;
    sender
        .send(Message::Text(text))
        .await
        .map_err(|e| AppError::Internal(format!("WebSocket send failed: {}", e)))
}

async fn handle_socket(socket: WebSocket, username: String, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    // subscribe first so this client also sees its own join
    let mut events = state.ideas.events().subscribe();

    match state.ideas.initial_state().await {
        Ok(initial) => {
            if let Err(e) = send_event(&mut sender, &initial).await {
                warn!(error = %e, %username, "Could not send initial state");
                return;
            }
        }
        Err(e) => warn!(error = %e, %username, "Could not build initial state"),
    }

    state.ideas.register_user(&username).await;
    info!(%username, "Socket connected");

    let mut send_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if send_event(&mut sender, &event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Socket lagging, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.ideas.unregister_user(&username).await;
    info!(%username, "Socket disconnected");
}
