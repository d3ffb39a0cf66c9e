//! Design-day outdoor conditions: hourly dry-bulb profile, simplified solar
//! irradiance and sol-air temperature.
//!
//! The solar model here is deliberately simple (hour-angle cosine with fixed
//! orientation factors). Peak loads in downstream reports depend on its exact
//! shape, so it is kept as-is; a full clear-sky model could replace it behind
//! the same function signatures.

use crate::model::{DesignDay, Surface, SurfaceType};

/// ASHRAE clear-day temperature profile: fraction of the daily range to
/// subtract from the maximum dry-bulb, by hour of day. Contract table.
pub const DRY_BULB_RANGE_PROFILE: [f64; 24] = [
    0.88, 0.92, 0.95, 0.98, 1.0, 0.98, // 0-5
    0.91, 0.74, 0.55, 0.38, 0.23, 0.13, // 6-11
    0.05, 0.00, 0.00, 0.06, 0.14, 0.24, // 12-17
    0.39, 0.50, 0.59, 0.68, 0.75, 0.82, // 18-23
];

/// Outside surface film coefficient, in W/(m2.K), for ~3.4 m/s wind
const H_OUTSIDE: f64 = 22.7;
/// Solar absorptance of a dark roof / typical wall
const ALPHA_ROOF: f64 = 0.7;
const ALPHA_WALL: f64 = 0.6;
/// Long-wave sky radiation correction for near-horizontal surfaces, in K
const DELTA_R_HORIZONTAL: f64 = 4.0;

/// Dry-bulb temperature at the given hour of a design day, in Celsius.
pub fn dry_bulb_at_hour(design_day: &DesignDay, hour: usize) -> f64 {
    design_day.dry_bulb_max - DRY_BULB_RANGE_PROFILE[hour % 24] * design_day.daily_range
}

/// Global horizontal solar irradiance, in W/m2. Zero outside 06:00-18:00.
pub fn horizontal_irradiance(design_day: &DesignDay, hour: usize) -> f64 {
    if !(6..=18).contains(&hour) {
        return 0.0;
    }
    let hour_angle = (hour as f64 - 12.0).abs() * 15.0;
    let solar = 800.0 * hour_angle.to_radians().cos() * design_day.clearness;
    solar.max(0.0)
}

/// Solar irradiance incident on a surface, in W/m2, using fixed orientation
/// factors for horizontal, vertical and intermediate tilts.
pub fn irradiance_on_surface(design_day: &DesignDay, surface: &Surface, hour: usize) -> f64 {
    if !(6..=18).contains(&hour) {
        return 0.0;
    }

    let hour_angle = (hour as f64 - 12.0).abs() * 15.0;
    let solar_altitude = 90.0 - hour_angle * 0.7;
    if solar_altitude <= 0.0 {
        return 0.0;
    }

    let dni = 800.0 * hour_angle.to_radians().cos() * design_day.clearness;

    let factor = if surface.tilt == 0.0 {
        solar_altitude.to_radians().sin()
    } else if surface.tilt == 90.0 {
        let sun_azimuth = 180.0 + (hour as f64 - 12.0) * 15.0;
        let mut angle_diff = (surface.azimuth - sun_azimuth).abs();
        if angle_diff > 180.0 {
            angle_diff = 360.0 - angle_diff;
        }
        if angle_diff > 90.0 {
            // Side facing away from the sun sees diffuse only
            0.1
        } else {
            angle_diff.to_radians().cos() * 0.7
        }
    } else {
        0.5
    };

    (dni * factor).max(0.0)
}

/// Sol-air temperature for an exterior opaque surface, in Celsius: outdoor
/// dry-bulb raised by absorbed solar flux and lowered by the long-wave sky
/// correction on near-horizontal surfaces.
pub fn sol_air_temperature(
    outdoor_temp: f64,
    surface: &Surface,
    design_day: &DesignDay,
    hour: usize,
) -> f64 {
    let alpha = if surface.surface_type == SurfaceType::Roof {
        ALPHA_ROOF
    } else {
        ALPHA_WALL
    };
    let solar = irradiance_on_surface(design_day, surface, hour);
    let delta_r = if surface.tilt < 45.0 {
        DELTA_R_HORIZONTAL
    } else {
        0.0
    };

    outdoor_temp + alpha * solar / H_OUTSIDE - delta_r
}
