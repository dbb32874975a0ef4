//! User roles
//!
//! Table: users (column `user_role_id`)

use serde::{Deserialize, Serialize};

/// Closed set of account roles.
///
/// Stored in the database as the legacy integer discriminator
/// (1 = Admin, 2 = Feminine, 3 = Health Worker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Feminine,
    HealthWorker,
}

impl Role {
    /// Database discriminator value
    pub fn as_i32(self) -> i32 {
        match self {
            Role::Admin => 1,
            Role::Feminine => 2,
            Role::HealthWorker => 3,
        }
    }

    /// Parse the database discriminator
    pub fn from_i32(value: i32) -> Option<Role> {
        match value {
            1 => Some(Role::Admin),
            2 => Some(Role::Feminine),
            3 => Some(Role::HealthWorker),
            _ => None,
        }
    }

    /// Display label used in role badges
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Feminine => "Feminine",
            Role::HealthWorker => "Health Worker",
        }
    }

    /// Roles a visitor may pick at self-registration
    pub fn registrable(self) -> bool {
        matches!(self, Role::Feminine | Role::HealthWorker)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_round_trip() {
        for role in [Role::Admin, Role::Feminine, Role::HealthWorker] {
            assert_eq!(Role::from_i32(role.as_i32()), Some(role));
        }
        assert_eq!(Role::from_i32(0), None);
        assert_eq!(Role::from_i32(4), None);
    }

    #[test]
    fn test_registrable() {
        assert!(!Role::Admin.registrable());
        assert!(Role::Feminine.registrable());
        assert!(Role::HealthWorker.registrable());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Role::HealthWorker.label(), "Health Worker");
        assert_eq!(Role::Feminine.to_string(), "Feminine");
    }
}
