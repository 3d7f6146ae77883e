#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    UnknownConnection(String),
    Closed(String),
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::UnknownConnection(player_id) => {
                write!(f, "No open connection for {}", player_id)
            }
            ConnectionError::Closed(player_id) => {
                write!(f, "Connection for {} is closed", player_id)
            }
        }
    }
}

impl std::error::Error for ConnectionError {}
