//! Dashboard aggregator
//!
//! Point-in-time counts, pie-chart buckets, and the monthly histogram.
//! Every figure is computed fresh from the record store; there is no
//! cached aggregate state anywhere.

use std::sync::Arc;

use fw_core::traits::Id;
use fw_models::Role;
use serde::Serialize;

use crate::error::ServiceResult;
use crate::store::RecordStore;

/// Calendar month labels, chart order
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Pie-chart category labels
pub const ACTIVE_PERIOD_LABEL: &str = "Active Period";
pub const INACTIVE_PERIOD_LABEL: &str = "Inactive Period";
pub const PENDING_LABEL: &str = "Pending Feminine (Not verify yet)";

/// Admin dashboard snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Period entries logged this calendar year
    pub total_period_per_year: i64,
    pub health_worker_count: i64,
    /// All users excluding admins
    pub users_count: i64,
    pub inactive_count: i64,
    pub inactive_health_worker_count: i64,
    pub inactive_feminine_count: i64,
}

/// One labeled pie-chart slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieBucket {
    pub value: i64,
    pub category: String,
}

/// One month of the histogram series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: String,
    pub count: i64,
}

/// Dashboard service
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Admin-facing snapshot for one calendar year
    pub async fn summary(&self, year: i32) -> ServiceResult<DashboardSummary> {
        Ok(DashboardSummary {
            total_period_per_year: self.store.count_periods_in_year(year).await?,
            health_worker_count: self.store.count_by_role(Role::HealthWorker).await?,
            users_count: self.store.count_non_admin().await?,
            inactive_count: self.store.count_inactive(None).await?,
            inactive_health_worker_count: self
                .store
                .count_inactive(Some(Role::HealthWorker))
                .await?,
            inactive_feminine_count: self.store.count_inactive(Some(Role::Feminine)).await?,
        })
    }

    /// Feminine-user categories for the pie chart; empty buckets omitted
    pub async fn pie_chart(&self) -> ServiceResult<Vec<PieBucket>> {
        let active = self.store.count_feminine_by_status(true).await?;
        let inactive = self.store.count_feminine_by_status(false).await?;
        let pending = self.store.count_pending_feminine().await?;

        Ok(build_pie_buckets(active, inactive, pending))
    }

    /// Twelve-month histogram for one year; zero months included
    pub async fn monthly_histogram(&self, year: i32) -> ServiceResult<Vec<MonthBucket>> {
        let counts = self.store.monthly_period_counts(year).await?;
        Ok(fill_month_series(&counts))
    }

    /// True iff at least one assignment references this feminine user
    pub async fn assignment_status_of(&self, feminine_id: Id) -> ServiceResult<bool> {
        Ok(self.store.count_assignments_of_feminine(feminine_id).await? > 0)
    }
}

/// Build the pie-chart slices; a category appears only when nonzero.
pub fn build_pie_buckets(active: i64, inactive: i64, pending: i64) -> Vec<PieBucket> {
    let categories = [
        (active, ACTIVE_PERIOD_LABEL),
        (inactive, INACTIVE_PERIOD_LABEL),
        (pending, PENDING_LABEL),
    ];

    categories
        .into_iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, category)| PieBucket {
            value,
            category: category.to_string(),
        })
        .collect()
}

/// Expand sparse (month, count) pairs into the fixed January-December
/// series the chart consumes. Always exactly 12 entries.
pub fn fill_month_series(counts: &[(u32, i64)]) -> Vec<MonthBucket> {
    let mut series = [0i64; 12];
    for &(month, count) in counts {
        if (1..=12).contains(&month) {
            series[(month - 1) as usize] = count;
        }
    }

    MONTH_NAMES
        .iter()
        .zip(series)
        .map(|(&month, count)| MonthBucket {
            month: month.to_string(),
            count,
        })
        .collect()
}
