use std::{collections::HashMap, sync::Arc};

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use crate::{errors::connection_errors::ConnectionError, models::ServerMessage};

pub type Outbound = mpsc::UnboundedReceiver<ServerMessage>;

/// Live connections keyed by participant id.
///
/// Each socket task owns the receiving half of its channel and forwards
/// whatever arrives to the client; everything else only ever sends.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    senders: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<ServerMessage>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, player_id: &str) -> Outbound {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.senders
            .write()
            .await
            .insert(player_id.to_string(), sender);
        debug!("Registered connection for {}", player_id);
        receiver
    }

    pub async fn unregister(&self, player_id: &str) {
        self.senders.write().await.remove(player_id);
        debug!("Unregistered connection for {}", player_id);
    }

    pub async fn send(&self, player_id: &str, message: ServerMessage) -> Result<(), ConnectionError> {
        let senders = self.senders.read().await;
        let sender = senders
            .get(player_id)
            .ok_or_else(|| ConnectionError::UnknownConnection(player_id.to_string()))?;
        sender
            .send(message)
            .map_err(|_| ConnectionError::Closed(player_id.to_string()))
    }

    /// Sends to the caller, logging rather than propagating transport failures.
    pub async fn notify(&self, player_id: &str, message: ServerMessage) {
        if let Err(e) = self.send(player_id, message).await {
            warn!("Dropping message: {}", e);
        }
    }

    pub async fn broadcast(&self, player_ids: &[String], message: &ServerMessage) {
        for player_id in player_ids {
            self.notify(player_id, message.clone()).await;
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.senders.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_reaches_registered_connection() {
        let registry = ConnectionRegistry::new();
        let mut outbound = registry.register("p1").await;

        registry
            .send(
                "p1",
                ServerMessage::WaitingForPlayer {
                    room_id: "ABCDEF".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(
            outbound.recv().await,
            Some(ServerMessage::WaitingForPlayer {
                room_id: "ABCDEF".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_send_to_unknown_connection_fails() {
        let registry = ConnectionRegistry::new();

        let result = registry
            .send(
                "ghost",
                ServerMessage::WaitingForPlayer {
                    room_id: "ABCDEF".to_string(),
                },
            )
            .await;

        assert_eq!(
            result,
            Err(ConnectionError::UnknownConnection("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_send_to_dropped_receiver_is_closed() {
        let registry = ConnectionRegistry::new();
        drop(registry.register("p1").await);

        let result = registry
            .send(
                "p1",
                ServerMessage::WaitingForPlayer {
                    room_id: "ABCDEF".to_string(),
                },
            )
            .await;

        assert_eq!(result, Err(ConnectionError::Closed("p1".to_string())));
    }

    #[tokio::test]
    async fn test_broadcast_skips_missing_connections() {
        let registry = ConnectionRegistry::new();
        let mut outbound = registry.register("p1").await;
        let message = ServerMessage::WaitingForPlayer {
            room_id: "ABCDEF".to_string(),
        };

        registry
            .broadcast(&["ghost".to_string(), "p1".to_string()], &message)
            .await;

        assert_eq!(outbound.recv().await, Some(message));
        assert_eq!(registry.connection_count().await, 1);
    }
}
