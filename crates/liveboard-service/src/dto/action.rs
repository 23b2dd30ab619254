//! Typed actions handed to the engine

use liveboard_core::{Actor, DomainError, EventKind};

use super::requests::ActionRequest;

/// Kind-specific action data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPayload {
    Vote { selected_options: Vec<String> },
    LineUp { count: i32, note: Option<String> },
    Memo { content: String },
}

impl ActionPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Vote { .. } => EventKind::Vote,
            Self::LineUp { .. } => EventKind::LineUp,
            Self::Memo { .. } => EventKind::Memo,
        }
    }
}

impl TryFrom<ActionRequest> for ActionPayload {
    type Error = DomainError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let kind: EventKind = request
            .kind
            .parse()
            .map_err(DomainError::InvalidActionKind)?;
        let payload = request.payload;

        Ok(match kind {
            EventKind::Vote => Self::Vote {
                selected_options: payload.selected_options.unwrap_or_default(),
            },
            // A missing count is rejected downstream as count 0
            EventKind::LineUp => Self::LineUp {
                count: payload.count.unwrap_or(0),
                note: payload.note.filter(|n| !n.trim().is_empty()),
            },
            EventKind::Memo => {
                let content = payload.content.unwrap_or_default();
                if content.trim().is_empty() {
                    return Err(DomainError::ValidationError(
                        "memo content is required".into(),
                    ));
                }
                Self::Memo { content }
            }
        })
    }
}

/// An action by a verified participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub actor: Actor,
    pub payload: ActionPayload,
}

impl Action {
    pub fn new(actor: Actor, payload: ActionPayload) -> Self {
        Self { actor, payload }
    }

    /// Decode a wire request on behalf of `actor`
    pub fn from_request(actor: Actor, request: ActionRequest) -> Result<Self, DomainError> {
        Ok(Self::new(actor, ActionPayload::try_from(request)?))
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}
