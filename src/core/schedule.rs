//! Schedule resolution for load calculations.
//!
//! Design-day calculations always evaluate schedules on their weekday
//! profile. Where a space names no schedule, or names one missing from the
//! building library, the built-in office occupancy profile below applies.

use crate::model::{Building, DayType};

/// Typical office occupancy fraction by hour of day. This table is part of
/// the output contract: default-load peaks depend on it verbatim.
pub const DEFAULT_OFFICE_SCHEDULE: [f64; 24] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // night
    0.1, 0.5, 0.9, 1.0, 1.0, 0.9, // morning
    0.5, 0.9, 1.0, 1.0, 1.0, 0.5, // afternoon
    0.2, 0.1, 0.0, 0.0, 0.0, 0.0, // evening
];

/// Occupancy fraction from the built-in office profile.
pub fn typical_schedule_value(hour: usize) -> f64 {
    DEFAULT_OFFICE_SCHEDULE[hour % 24]
}

/// Resolve a schedule reference against the building library, falling back to
/// the built-in office profile for absent or unknown ids.
pub fn schedule_value(building: &Building, schedule_id: Option<&str>, hour: usize) -> f64 {
    match schedule_id.and_then(|id| building.schedules.get(id)) {
        Some(schedule) => schedule.value_at(hour, DayType::Weekday),
        None => typical_schedule_value(hour),
    }
}
