//! Assignment model
//!
//! Table: feminine_health_worker_groups

use chrono::{DateTime, Utc};
use fw_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

/// Link record: health worker W monitors feminine F.
///
/// The (feminine_id, health_worker_id) pair is unique; the relation is
/// many-to-many in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Option<Id>,

    pub feminine_id: Id,

    pub health_worker_id: Id,

    pub created_at: Option<DateTime<Utc>>,
}

impl Assignment {
    pub fn new(feminine_id: Id, health_worker_id: Id) -> Self {
        Self {
            id: None,
            feminine_id,
            health_worker_id,
            created_at: None,
        }
    }

    /// The unique link pair
    pub fn pair(&self) -> (Id, Id) {
        (self.feminine_id, self.health_worker_id)
    }
}

impl Identifiable for Assignment {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Assignment {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl Entity for Assignment {
    const TABLE_NAME: &'static str = "feminine_health_worker_groups";
    const TYPE_NAME: &'static str = "Assignment";
}
