use std::{sync::Arc, time::Duration};

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use shared::services::game_summary_service::TracingSummarySink;
use websocket_api::{config::Config, create_app, state::AppState};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> String {
    let state = AppState::new(Config::default(), Arc::new(TracingSummarySink));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_app(state)).await.unwrap();
    });
    format!("ws://{}/ws", addr)
}

async fn next_json(socket: &mut Socket) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("server answered in time")
            .expect("socket still open")
            .unwrap();
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn send_json(socket: &mut Socket, value: Value) {
    socket.send(Message::Text(value.to_string())).await.unwrap();
}

#[tokio::test]
async fn test_two_players_over_real_sockets() {
    let url = spawn_server().await;

    let (mut alice, _) = connect_async(url.as_str()).await.unwrap();
    let greeting = next_json(&mut alice).await;
    assert_eq!(greeting["type"], "connected");
    assert!(greeting["playerId"].as_str().is_some());

    send_json(&mut alice, json!({"type": "create-room", "playerName": "Alice"})).await;
    let created = next_json(&mut alice).await;
    assert_eq!(created["type"], "room-created");
    assert_eq!(created["color"], "black");
    let room_id = created["roomId"].as_str().unwrap().to_string();
    assert_eq!(next_json(&mut alice).await["type"], "waiting-for-player");

    let (mut bob, _) = connect_async(url.as_str()).await.unwrap();
    assert_eq!(next_json(&mut bob).await["type"], "connected");
    send_json(&mut bob, json!({"type": "join-room", "roomId": room_id})).await;

    let ready = next_json(&mut bob).await;
    assert_eq!(ready["type"], "game-ready");
    assert_eq!(ready["gameState"]["currentPlayer"], "black");
    assert_eq!(ready["white"]["playerName"], "Player 2");
    assert_eq!(next_json(&mut alice).await["type"], "player-joined");
    assert_eq!(next_json(&mut alice).await["type"], "game-ready");

    send_json(&mut alice, json!({"type": "make-move", "row": 2, "col": 3})).await;
    let moved = next_json(&mut bob).await;
    assert_eq!(moved["type"], "move-made");
    assert_eq!(moved["blackScore"], 4);
    assert_eq!(moved["whiteScore"], 1);
    assert_eq!(moved["currentPlayer"], "white");
    assert_eq!(next_json(&mut bob).await["type"], "game-state");

    send_json(&mut bob, json!({"type": "make-move", "row": 0, "col": 0})).await;
    let rejected = next_json(&mut bob).await;
    assert_eq!(rejected["type"], "error");
    assert_eq!(rejected["code"], "validation");

    alice.close(None).await.unwrap();
    assert_eq!(next_json(&mut bob).await["type"], "player-disconnected");
    let over = next_json(&mut bob).await;
    assert_eq!(over["type"], "game-over");
    assert_eq!(over["winner"], "white");
    assert_eq!(over["reason"], "disconnect");
}
