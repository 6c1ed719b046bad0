//! Transition legality
//!
//! [`TicketStatus::can_transition_to`] answers whether a step exists at all;
//! [`check`] additionally answers whether this actor may take it. Both are
//! pure so the manager can re-run them under the store write lock.

use shared::ticket::{Actor, TicketStatus};

use super::{TicketError, TicketResult};

/// Validate one transition for one actor
///
/// Preparation steps (`New → Preparing`, `Preparing → Ready`) belong to the
/// kitchen. Completion belongs to the cashier, or to the system when
/// settlement closes the ticket. Cancellation is open to any actor as long
/// as the ticket is not terminal.
pub fn check(from: TicketStatus, to: TicketStatus, actor: &Actor) -> TicketResult<()> {
    if !from.can_transition_to(to) {
        return Err(TicketError::InvalidTransition { from, to });
    }

    let allowed = match to {
        TicketStatus::Preparing | TicketStatus::Ready => {
            matches!(actor, Actor::Kitchen { .. } | Actor::System)
        }
        TicketStatus::Completed => matches!(actor, Actor::Cashier { .. } | Actor::System),
        TicketStatus::Cancelled => true,
        // Unreachable through can_transition_to; kept total
        TicketStatus::New => false,
    };

    if !allowed {
        return Err(TicketError::ForbiddenTransition {
            actor: actor.label(),
            from,
            to,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen() -> Actor {
        Actor::Kitchen {
            employee_id: "e1".into(),
        }
    }

    fn cashier() -> Actor {
        Actor::Cashier {
            employee_id: "e2".into(),
        }
    }

    #[test]
    fn test_kitchen_drives_preparation() {
        assert!(check(TicketStatus::New, TicketStatus::Preparing, &kitchen()).is_ok());
        assert!(check(TicketStatus::Preparing, TicketStatus::Ready, &kitchen()).is_ok());
    }

    #[test]
    fn test_cashier_cannot_drive_preparation() {
        let err = check(TicketStatus::New, TicketStatus::Preparing, &cashier()).unwrap_err();
        assert!(matches!(err, TicketError::ForbiddenTransition { .. }));
    }

    #[test]
    fn test_completion_belongs_to_cashier_or_system() {
        assert!(check(TicketStatus::Ready, TicketStatus::Completed, &cashier()).is_ok());
        assert!(check(TicketStatus::Ready, TicketStatus::Completed, &Actor::System).is_ok());
        let err = check(TicketStatus::Ready, TicketStatus::Completed, &kitchen()).unwrap_err();
        assert!(matches!(err, TicketError::ForbiddenTransition { .. }));
    }

    #[test]
    fn test_anyone_may_cancel_active_ticket() {
        for actor in [kitchen(), cashier(), Actor::System] {
            assert!(check(TicketStatus::Preparing, TicketStatus::Cancelled, &actor).is_ok());
        }
    }

    #[test]
    fn test_unreachable_step_is_invalid_not_forbidden() {
        // Even for the right actor, a skipped step is rejected as invalid
        let err = check(TicketStatus::New, TicketStatus::Completed, &cashier()).unwrap_err();
        assert!(matches!(err, TicketError::InvalidTransition { .. }));
        let err = check(TicketStatus::Completed, TicketStatus::Cancelled, &cashier()).unwrap_err();
        assert!(matches!(err, TicketError::InvalidTransition { .. }));
    }
}
