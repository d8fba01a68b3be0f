//! Message-sequence validation
//!
//! The reasoner upstream rejects conversations that do not strictly
//! alternate between user and assistant, so those are refused here with a
//! structured code before any upstream call. The baseline chat model
//! accepts any turn sequence unchecked.

use thiserror::Error;

use crate::protocol::ollama::ChatTurn;
use crate::registry::ModelKind;

const ROLE_USER: &str = "user";
const ROLE_ASSISTANT: &str = "assistant";

/// Rejection of a conversation's turn sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The turn list is empty
    #[error("messages must not be empty")]
    EmptyMessages,

    /// The conversation does not open with a user turn
    #[error("the first message must come from the user")]
    FirstMessageNotUser,

    /// A turn carries a role other than user/assistant
    #[error("message {index} has unsupported role `{role}`")]
    InvalidRole {
        /// Index of the offending turn
        index: usize,
        /// The rejected role string
        role: String,
    },

    /// Two adjacent turns share a role
    #[error("messages {first} and {second} must not share the same role")]
    ConsecutiveRoles {
        /// Index of the first offending turn
        first: usize,
        /// Index of the second offending turn
        second: usize,
    },
}

impl ValidationError {
    /// Machine-readable rejection code, mirrored into the error response
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyMessages => "invalid_messages",
            Self::FirstMessageNotUser => "invalid_first_message",
            Self::InvalidRole { .. } => "invalid_role",
            Self::ConsecutiveRoles { .. } => "consecutive_messages",
        }
    }
}

/// Validate a conversation against the given model's constraints
///
/// Pure; never mutates its input. Only the reasoner kind enforces
/// anything — a non-user first turn is rejected outright rather than
/// silently discarded.
///
/// # Errors
///
/// Returns the first rule violation in declaration order.
pub fn validate_turns(turns: &[ChatTurn], kind: ModelKind) -> Result<(), ValidationError> {
    if kind != ModelKind::Reasoner {
        return Ok(());
    }

    let Some(first) = turns.first() else {
        return Err(ValidationError::EmptyMessages);
    };

    if first.role != ROLE_USER {
        return Err(ValidationError::FirstMessageNotUser);
    }

    for (index, turn) in turns.iter().enumerate() {
        if turn.role != ROLE_USER && turn.role != ROLE_ASSISTANT {
            return Err(ValidationError::InvalidRole {
                index,
                role: turn.role.clone(),
            });
        }
    }

    for (index, (current, next)) in turns.iter().zip(turns.iter().skip(1)).enumerate() {
        if current.role == next.role {
            return Err(ValidationError::ConsecutiveRoles {
                first: index,
                second: index + 1,
            });
        }
    }

    Ok(())
}
