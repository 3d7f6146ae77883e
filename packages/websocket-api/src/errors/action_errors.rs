use serde::{Deserialize, Serialize};

use shared::{
    repositories::errors::room_repository_errors::RoomRepositoryError,
    services::errors::{
        matchmaking_service_errors::MatchmakingServiceError,
        othello_service_errors::OthelloServiceError, session_store_errors::SessionStoreError,
    },
};

use crate::models::ServerMessage;

/// Client-facing error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Internal,
}

/// Everything an action handler can fail with. Rendered to the caller only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    Othello(OthelloServiceError),
    Session(SessionStoreError),
    Matchmaking(MatchmakingServiceError),
    Malformed(String),
    GameNotActive,
    Internal(String),
}

impl ActionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ActionError::Othello(err) => match err {
                OthelloServiceError::OutOfBounds { .. }
                | OthelloServiceError::IllegalMove { .. }
                | OthelloServiceError::NotYourTurn => ErrorCategory::Validation,
                OthelloServiceError::GameOver
                | OthelloServiceError::GameInProgress
                | OthelloServiceError::NoDrawOffer
                | OthelloServiceError::OwnDrawOffer
                | OthelloServiceError::NoRematchOffer
                | OthelloServiceError::OwnRematchOffer => ErrorCategory::Conflict,
            },
            ActionError::Session(err) => session_category(err),
            ActionError::Matchmaking(MatchmakingServiceError::SessionStoreError(err)) => {
                session_category(err)
            }
            ActionError::Malformed(_) => ErrorCategory::Validation,
            ActionError::GameNotActive => ErrorCategory::Conflict,
            ActionError::Internal(_) => ErrorCategory::Internal,
        }
    }

    pub fn to_server_message(&self) -> ServerMessage {
        ServerMessage::Error {
            message: self.to_string(),
            code: self.category(),
        }
    }
}

fn session_category(err: &SessionStoreError) -> ErrorCategory {
    match err {
        SessionStoreError::RoomNotFound(_) | SessionStoreError::NotInRoom(_) => {
            ErrorCategory::NotFound
        }
        SessionStoreError::RoomFull(_)
        | SessionStoreError::RoomNotWaiting(_)
        | SessionStoreError::AlreadyInRoom(_)
        | SessionStoreError::RepositoryError(RoomRepositoryError::ParticipantAlreadyBound(_)) => {
            ErrorCategory::Conflict
        }
        SessionStoreError::RepositoryError(RoomRepositoryError::AlreadyExists(_)) => {
            ErrorCategory::Internal
        }
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::Othello(err) => write!(f, "{}", err),
            ActionError::Session(err) => write!(f, "{}", err),
            ActionError::Matchmaking(MatchmakingServiceError::SessionStoreError(err)) => {
                write!(f, "{}", err)
            }
            ActionError::Malformed(msg) => write!(f, "Malformed message: {}", msg),
            ActionError::GameNotActive => write!(f, "No game in progress"),
            ActionError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<OthelloServiceError> for ActionError {
    fn from(err: OthelloServiceError) -> Self {
        ActionError::Othello(err)
    }
}

impl From<SessionStoreError> for ActionError {
    fn from(err: SessionStoreError) -> Self {
        ActionError::Session(err)
    }
}

impl From<MatchmakingServiceError> for ActionError {
    fn from(err: MatchmakingServiceError) -> Self {
        ActionError::Matchmaking(err)
    }
}
