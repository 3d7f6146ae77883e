use crate::services::errors::session_store_errors::SessionStoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchmakingServiceError {
    SessionStoreError(SessionStoreError),
}

impl std::fmt::Display for MatchmakingServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchmakingServiceError::SessionStoreError(err) => {
                write!(f, "Session store error: {}", err)
            }
        }
    }
}

impl std::error::Error for MatchmakingServiceError {}

impl From<SessionStoreError> for MatchmakingServiceError {
    fn from(err: SessionStoreError) -> Self {
        MatchmakingServiceError::SessionStoreError(err)
    }
}
