use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jukebox_collab::{DispatchError, RoomError};
use jukebox_core::StoreError;
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{resource}:{identifier} not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Unknown internal error: {0}")]
    Unknown(String),
}

impl ServerError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.as_status_code(), self.to_string()).into_response()
    }
}

impl From<RoomError> for ServerError {
    fn from(value: RoomError) -> Self {
        match value {
            RoomError::Store(StoreError::ItemNotFound(id)) => Self::NotFound {
                resource: "item",
                identifier: id.to_string(),
            },
            RoomError::Storage(e) => Self::Unknown(e.to_string()),
        }
    }
}

impl From<DispatchError> for ServerError {
    fn from(value: DispatchError) -> Self {
        match value {
            DispatchError::Room(e) => e.into(),
            DispatchError::InvalidPayload(reason) => Self::InvalidPayload(reason),
        }
    }
}
