//! Ticket lifecycle states and the actors allowed to move between them

use serde::{Deserialize, Serialize};

/// Kitchen ticket / order lifecycle status
///
/// Tickets move forward through `New → Preparing → Ready → Completed`.
/// `Cancelled` is reachable from any non-terminal state. `Completed` and
/// `Cancelled` are terminal: no further transition is ever accepted, so a
/// ticket's status never regresses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    New,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl TicketStatus {
    /// Whether no further transition is permitted
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Completed | TicketStatus::Cancelled)
    }

    /// Whether the ticket still appears in active-order views
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether `target` is reachable from `self` in one step
    ///
    /// This is the whole transition table: one forward step, or a jump to
    /// `Cancelled` from any non-terminal state.
    pub fn can_transition_to(&self, target: TicketStatus) -> bool {
        use TicketStatus::*;
        match (self, target) {
            (New, Preparing) => true,
            (Preparing, Ready) => true,
            (Ready, Completed) => true,
            (New | Preparing | Ready, Cancelled) => true,
            _ => false,
        }
    }

    /// The forward step that follows this status, if any
    pub fn next(&self) -> Option<TicketStatus> {
        use TicketStatus::*;
        match self {
            New => Some(Preparing),
            Preparing => Some(Ready),
            Ready => Some(Completed),
            Completed | Cancelled => None,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TicketStatus::New => "NEW",
            TicketStatus::Preparing => "PREPARING",
            TicketStatus::Ready => "READY",
            TicketStatus::Completed => "COMPLETED",
            TicketStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// Who triggered a transition
///
/// Every status change is attributable: kitchen staff drive preparation,
/// the cashier (or the system on their behalf) settles, and either staff or
/// the system may cancel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Actor {
    Kitchen { employee_id: String },
    Cashier { employee_id: String },
    System,
}

impl Actor {
    /// Employee behind the action, if it was a person
    pub fn employee_id(&self) -> Option<&str> {
        match self {
            Actor::Kitchen { employee_id } | Actor::Cashier { employee_id } => Some(employee_id),
            Actor::System => None,
        }
    }

    /// Short label used in logs and status history
    pub fn label(&self) -> &'static str {
        match self {
            Actor::Kitchen { .. } => "kitchen",
            Actor::Cashier { .. } => "cashier",
            Actor::System => "system",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path() {
        assert!(TicketStatus::New.can_transition_to(TicketStatus::Preparing));
        assert!(TicketStatus::Preparing.can_transition_to(TicketStatus::Ready));
        assert!(TicketStatus::Ready.can_transition_to(TicketStatus::Completed));
    }

    #[test]
    fn test_no_skipping_states() {
        assert!(!TicketStatus::New.can_transition_to(TicketStatus::Ready));
        assert!(!TicketStatus::New.can_transition_to(TicketStatus::Completed));
        assert!(!TicketStatus::Preparing.can_transition_to(TicketStatus::Completed));
    }

    #[test]
    fn test_no_regression() {
        assert!(!TicketStatus::Ready.can_transition_to(TicketStatus::New));
        assert!(!TicketStatus::Ready.can_transition_to(TicketStatus::Preparing));
        assert!(!TicketStatus::Preparing.can_transition_to(TicketStatus::New));
    }

    #[test]
    fn test_cancel_from_any_active_state() {
        assert!(TicketStatus::New.can_transition_to(TicketStatus::Cancelled));
        assert!(TicketStatus::Preparing.can_transition_to(TicketStatus::Cancelled));
        assert!(TicketStatus::Ready.can_transition_to(TicketStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for target in [
            TicketStatus::New,
            TicketStatus::Preparing,
            TicketStatus::Ready,
            TicketStatus::Completed,
            TicketStatus::Cancelled,
        ] {
            assert!(!TicketStatus::Completed.can_transition_to(target));
            assert!(!TicketStatus::Cancelled.can_transition_to(target));
        }
        assert!(TicketStatus::Completed.is_terminal());
        assert!(TicketStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_serde_screaming_snake() {
        let json = serde_json::to_string(&TicketStatus::Preparing).unwrap();
        assert_eq!(json, "\"PREPARING\"");
        let back: TicketStatus = serde_json::from_str("\"READY\"").unwrap();
        assert_eq!(back, TicketStatus::Ready);
    }
}
