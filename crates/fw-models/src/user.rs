//! User model
//!
//! Table: users

use chrono::{DateTime, NaiveDate, Utc};
use fw_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::role::Role;

/// User entity
///
/// Represents an account in any of the three roles. Feminine accounts carry
/// a `menstruation_status`; for every other role the field stays `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<Id>,

    pub role: Role,

    pub first_name: String,

    pub last_name: String,

    pub middle_name: Option<String>,

    /// Email address (unique when present)
    pub email: Option<String>,

    /// Contact number (unique when present)
    pub contact_no: Option<String>,

    pub address: Option<String>,

    pub birthdate: NaiveDate,

    /// Admin verification flag; accounts start unverified
    pub is_active: bool,

    /// Secondary verification flag kept from the legacy data model
    pub is_verified: bool,

    /// Current period status, Feminine accounts only
    pub menstruation_status: Option<bool>,

    pub remarks: Option<String>,

    /// Opaque password hash managed by the external identity provider
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new unverified account.
    ///
    /// Role-conditional state is settled here: a non-Feminine account never
    /// carries a menstruation status, whatever the caller supplied.
    pub fn new(
        role: Role,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthdate: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            role,
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: None,
            email: None,
            contact_no: None,
            address: None,
            birthdate,
            is_active: false,
            is_verified: false,
            menstruation_status: None,
            remarks: None,
            password_hash: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the menstruation status; ignored for non-Feminine roles.
    pub fn with_menstruation_status(mut self, status: Option<bool>) -> Self {
        self.menstruation_status = if self.role == Role::Feminine {
            status
        } else {
            None
        };
        self
    }

    /// Display name in the portal's "Last, First Middle" format
    pub fn full_name(&self) -> String {
        display_name(
            &self.first_name,
            &self.last_name,
            self.middle_name.as_deref(),
        )
    }

    pub fn is_feminine(&self) -> bool {
        self.role == Role::Feminine
    }

    pub fn is_health_worker(&self) -> bool {
        self.role == Role::HealthWorker
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Pending accounts are awaiting admin verification
    pub fn is_pending(&self) -> bool {
        !self.is_active
    }
}

/// Format name parts into the portal's "Last, First Middle" display name
pub fn display_name(first_name: &str, last_name: &str, middle_name: Option<&str>) -> String {
    match middle_name.filter(|m| !m.is_empty()) {
        Some(middle) => format!("{}, {} {}", last_name, first_name, middle),
        None => format!("{}, {}", last_name, first_name),
    }
}

impl Identifiable for User {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for User {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for User {
    const TABLE_NAME: &'static str = "users";
    const TYPE_NAME: &'static str = "User";
}

/// Registration input for a new account
///
/// Simple shape constraints live on the derive; cross-field rules
/// (at-least-one-contact, birthdate in the past, registrable role) are
/// enforced by [`crate::contract::RegistrationContract`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    pub last_name: String,

    #[validate(length(max = 255))]
    pub middle_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub contact_no: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    pub birthdate: NaiveDate,

    pub role: Role,

    pub menstruation_status: Option<bool>,

    pub remarks: Option<String>,

    pub password_hash: Option<String>,
}

impl NewUser {
    /// Build the entity, settling role-conditional state.
    pub fn into_user(self) -> User {
        let mut user = User::new(self.role, self.first_name, self.last_name, self.birthdate)
            .with_menstruation_status(self.menstruation_status);
        user.middle_name = self.middle_name;
        user.email = self.email;
        user.contact_no = self.contact_no;
        user.address = self.address;
        user.remarks = self.remarks;
        user.password_hash = self.password_hash;
        user
    }
}
