pub mod calculator;
pub mod defaults;
pub mod design_day;
pub mod rollup;
pub mod schedule;
pub mod space_loads;
pub mod units;
