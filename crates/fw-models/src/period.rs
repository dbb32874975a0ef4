//! Menstruation period model
//!
//! Table: menstruation_periods

use chrono::{DateTime, NaiveDate, Utc};
use fw_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};

/// Display format for period dates in notifications, e.g. "Mar 5, 2024"
pub const NOTIFICATION_DATE_FORMAT: &str = "%b %-d, %Y";

/// One logged cycle-start date for a Feminine user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenstruationPeriod {
    pub id: Option<Id>,

    /// Owning Feminine user
    pub user_id: Id,

    pub menstruation_date: NaiveDate,

    /// Whether the notification for this entry has been acknowledged
    pub is_seen: bool,

    pub created_at: Option<DateTime<Utc>>,
}

impl MenstruationPeriod {
    pub fn new(user_id: Id, menstruation_date: NaiveDate) -> Self {
        Self {
            id: None,
            user_id,
            menstruation_date,
            is_seen: false,
            created_at: None,
        }
    }

    /// Date formatted for notification display
    pub fn formatted_date(&self) -> String {
        self.menstruation_date
            .format(NOTIFICATION_DATE_FORMAT)
            .to_string()
    }
}

impl Identifiable for MenstruationPeriod {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for MenstruationPeriod {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

impl Entity for MenstruationPeriod {
    const TABLE_NAME: &'static str = "menstruation_periods";
    const TYPE_NAME: &'static str = "MenstruationPeriod";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_unseen() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let period = MenstruationPeriod::new(9, date);
        assert!(!period.is_seen);
        assert_eq!(period.user_id, 9);
    }

    #[test]
    fn test_formatted_date_drops_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let period = MenstruationPeriod::new(1, date);
        assert_eq!(period.formatted_date(), "Mar 5, 2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        let period = MenstruationPeriod::new(1, date);
        assert_eq!(period.formatted_date(), "Dec 25, 2023");
    }
}
