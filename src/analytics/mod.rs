mod advanced;
mod dashboard;
pub(crate) mod stats;

pub(crate) use advanced::{AdvancedAnalytics, WEEKDAYS};
pub(crate) use dashboard::{to_f64, DashboardSummary};
