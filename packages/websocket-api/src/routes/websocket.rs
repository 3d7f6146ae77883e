use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    actions::{disconnect::handle_disconnect, dispatch_text},
    models::ServerMessage,
    state::AppState,
};

pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One task per connection: this loop reads and dispatches in arrival order,
/// a companion task drains the outbound channel into the socket.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let player_id = Uuid::new_v4().to_string();
    info!("WebSocket connection established: {}", player_id);

    let (mut sink, mut stream) = socket.split();
    let mut outbound = state.connections.register(&player_id).await;

    let writer_id = player_id.clone();
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize message for {}: {}", writer_id, e);
                    continue;
                }
            };
            if let Err(e) = sink.send(Message::Text(text)).await {
                debug!("Socket for {} closed while sending: {}", writer_id, e);
                break;
            }
        }
    });

    state
        .connections
        .notify(
            &player_id,
            ServerMessage::Connected {
                player_id: player_id.clone(),
            },
        )
        .await;

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => dispatch_text(&state, &player_id, &text).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("WebSocket error for {}: {}", player_id, e);
                break;
            }
        }
    }

    handle_disconnect(&state, &player_id).await;
    writer.abort();
}
