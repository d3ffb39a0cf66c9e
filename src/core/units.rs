//! Physical constants and unit conversions used throughout the load engine.
//!
//! The numeric values here are part of the output contract: sized capacities
//! and airflow figures in downstream reports depend on them exactly.

/// Specific heat of air, in J/(kg.K)
pub const CP_AIR: f64 = 1006.0;
/// Density of air at standard conditions, in kg/m3
pub const RHO_AIR: f64 = 1.2;
/// Specific heat of water, in J/(kg.K)
pub const CP_WATER: f64 = 4186.0;
/// Density of water, in kg/m3
pub const RHO_WATER: f64 = 1000.0;
/// Stefan-Boltzmann constant, in W/(m2.K4). Reserved for long-wave exchange.
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;
/// Standard gravity, in m/s2
pub const GRAVITY: f64 = 9.81;

pub const SECONDS_PER_HOUR: u32 = 3_600;
pub const HOURS_PER_DAY: usize = 24;

/// One ton of refrigeration, in W
pub const WATTS_PER_TON: f64 = 3_517.0;
pub const WATTS_PER_KILOWATT: f64 = 1_000.0;
/// Cubic feet per minute in one m3/s
pub const CFM_PER_M3S: f64 = 2_118.88;
pub const LITRES_PER_CUBIC_METRE: f64 = 1_000.0;

pub fn watts_to_tons(watts: f64) -> f64 {
    watts / WATTS_PER_TON
}

pub fn watts_to_kilowatts(watts: f64) -> f64 {
    watts / WATTS_PER_KILOWATT
}

pub fn m3s_to_cfm(flow: f64) -> f64 {
    flow * CFM_PER_M3S
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::*;

    #[rstest]
    fn should_convert_watts_to_tons() {
        assert_relative_eq!(watts_to_tons(3_517.0), 1.0);
        assert_relative_eq!(watts_to_tons(500.0 * 3_517.0), 500.0);
    }

    #[rstest]
    fn should_convert_airflow_to_cfm() {
        assert_relative_eq!(m3s_to_cfm(1.0), 2_118.88);
        assert_relative_eq!(m3s_to_cfm(0.471_947_4), 1_000.0, epsilon = 0.01);
    }
}
