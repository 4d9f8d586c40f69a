//! Property-wide occupancy figures

use crate::report::percent;
use crate::unit::{Unit, UnitStatus};
use serde::Serialize;

/// Occupancy counters over every unit of the property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of units
    pub total: usize,
    /// Units with a guest
    pub occupied: usize,
    /// Units ready for check-in
    pub available: usize,
    /// Units being cleaned
    pub cleaning: usize,
    /// Rounded percentage of occupied units, 0 without units
    pub occupancy_rate: u8,
}

impl DashboardStats {
    /// Compute the counters
    #[must_use]
    pub fn compute(units: &[Unit]) -> Self {
        let count = |status: UnitStatus| units.iter().filter(|u| u.status == status).count();
        let occupied = count(UnitStatus::Occupied);
        Self {
            total: units.len(),
            occupied,
            available: count(UnitStatus::Available),
            cleaning: count(UnitStatus::Cleaning),
            occupancy_rate: percent(occupied, units.len()),
        }
    }
}
