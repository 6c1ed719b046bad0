//! Authenticated user context

use serde::Serialize;
use shared::ticket::{Actor, TicketStatus};

use super::Claims;

/// The authenticated caller, injected by [`require_auth`] as a request
/// extension and pulled out by handlers with `Extension<CurrentUser>`.
///
/// [`require_auth`]: super::require_auth
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub restaurant_id: String,
    /// Role name: "admin", "kitchen", "cashier", ...
    pub role: String,
}

impl CurrentUser {
    /// Map this user onto the state-machine actor for a requested transition
    ///
    /// Kitchen and cashier map directly. Admins act as whichever role the
    /// target requires. Any staff member (or the system) may cancel.
    pub fn actor_for(&self, target: TicketStatus) -> Actor {
        match self.role.as_str() {
            "kitchen" => Actor::Kitchen {
                employee_id: self.id.clone(),
            },
            "cashier" => Actor::Cashier {
                employee_id: self.id.clone(),
            },
            "admin" => match target {
                TicketStatus::Preparing | TicketStatus::Ready => Actor::Kitchen {
                    employee_id: self.id.clone(),
                },
                _ => Actor::Cashier {
                    employee_id: self.id.clone(),
                },
            },
            _ => Actor::Cashier {
                employee_id: self.id.clone(),
            },
        }
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            display_name: claims.display_name,
            restaurant_id: claims.restaurant_id,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> CurrentUser {
        CurrentUser {
            id: "e1".into(),
            username: "u".into(),
            display_name: "U".into(),
            restaurant_id: "r1".into(),
            role: role.into(),
        }
    }

    #[test]
    fn test_kitchen_role_maps_to_kitchen_actor() {
        let actor = user("kitchen").actor_for(TicketStatus::Preparing);
        assert!(matches!(actor, Actor::Kitchen { .. }));
    }

    #[test]
    fn test_admin_acts_per_target() {
        assert!(matches!(
            user("admin").actor_for(TicketStatus::Ready),
            Actor::Kitchen { .. }
        ));
        assert!(matches!(
            user("admin").actor_for(TicketStatus::Completed),
            Actor::Cashier { .. }
        ));
    }
}
