//! Ticket domain errors

use shared::ticket::TicketStatus;
use thiserror::Error;

use crate::db::StoreError;
use crate::db::repository::RepoError;
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("Ticket not found: {0}")]
    NotFound(String),

    /// The transition table does not allow this step
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },

    /// The step exists but this actor may not trigger it
    #[error("{actor} may not move a ticket from {from} to {to}")]
    ForbiddenTransition {
        actor: &'static str,
        from: TicketStatus,
        to: TicketStatus,
    },

    #[error("Cart must contain at least one item")]
    EmptyCart,

    /// Items can only change while the kitchen has not started
    #[error("Items are locked once the ticket is {0}")]
    ItemsLocked(TicketStatus),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type TicketResult<T> = Result<T, TicketError>;

impl From<TicketError> for AppError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(msg) => AppError::NotFound(msg),
            TicketError::InvalidTransition { .. } => AppError::BusinessRule(err.to_string()),
            TicketError::ForbiddenTransition { .. } => AppError::Forbidden(err.to_string()),
            TicketError::EmptyCart => AppError::Validation(err.to_string()),
            TicketError::ItemsLocked(_) => AppError::BusinessRule(err.to_string()),
            TicketError::Validation(msg) => AppError::Validation(msg),
            TicketError::Store(e) => match e {
                StoreError::NotFound(msg) => AppError::NotFound(msg),
                StoreError::Conflict(msg) => AppError::Conflict(msg),
                other => AppError::Database(other.to_string()),
            },
            TicketError::Repo(e) => e.into(),
        }
    }
}
