//! Per-space design-day load calculation: hourly cooling components on the
//! cooling design day, steady-state heating on the heating design day, and
//! the derived airflow requirements.

use indexmap::IndexMap;

use crate::core::defaults::default_internal_loads;
use crate::core::design_day::{
    dry_bulb_at_hour, horizontal_irradiance, sol_air_temperature,
};
use crate::core::schedule::{schedule_value, typical_schedule_value};
use crate::core::units::{CP_AIR, RHO_AIR};
use crate::model::{
    Building, DesignDay, Glazing, InfiltrationMethod, Space, SurfaceType, Ventilation,
};
use crate::results::{
    ComponentKey, HourlyLoadProfile, LoadComponent, PeakLoadSummary, SpaceLoadResult,
};

/// U-value assumed for exterior surfaces without a construction, in W/(m2.K)
const U_VALUE_FALLBACK_WALL: f64 = 0.5;
/// U-value assumed for slabs without a construction, in W/(m2.K)
const U_VALUE_FALLBACK_SLAB: f64 = 0.3;
/// Ground temperature under slab-on-grade floors, in Celsius
const GROUND_TEMP: f64 = 10.0;
/// Latent heat coefficient for air moisture, in J/kg per kg/kg
const LATENT_HEAT_COEFF: f64 = 2500.0;
/// Assumed outdoor-indoor humidity ratio difference, in kg/kg. Placeholder
/// value the latent infiltration/ventilation figures depend on verbatim.
const HUMIDITY_RATIO_DIFF: f64 = 0.005;
/// Orientation-averaging factor applied to window solar gain. Part of the
/// output contract; do not replace with an incidence calculation.
const WINDOW_ORIENTATION_FACTOR: f64 = 0.5;

/// Settings shared by every space calculation in a run.
#[derive(Clone, Copy, Debug)]
pub struct CalculationSettings {
    pub timestep_minutes: u32,
    pub include_infiltration: bool,
    pub include_ventilation: bool,

    /// Safety factors carried from the project record; report tooling applies
    /// them, the calculator does not.
    pub cooling_safety_factor: f64,
    pub heating_safety_factor: f64,

    /// Supply air temperatures, in Celsius
    pub cooling_supply_air_temp: f64,
    pub heating_supply_air_temp: f64,

    /// Room design temperatures, in Celsius
    pub indoor_cooling_temp: f64,
    pub indoor_heating_temp: f64,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            timestep_minutes: 60,
            include_infiltration: true,
            include_ventilation: true,
            cooling_safety_factor: 1.1,
            heating_safety_factor: 1.1,
            cooling_supply_air_temp: 13.0,
            heating_supply_air_temp: 35.0,
            indoor_cooling_temp: 24.0,
            indoor_heating_temp: 21.0,
        }
    }
}

/// Calculate the full design-day result for one space.
pub fn calculate_space_loads(
    space: &Space,
    building: &Building,
    settings: &CalculationSettings,
    cooling_dd: &DesignDay,
    heating_dd: &DesignDay,
) -> SpaceLoadResult {
    let mut result = SpaceLoadResult {
        space_id: space.id.clone(),
        space_name: space.name.clone(),
        floor_area: space.floor_area,
        volume: space.volume,
        ..Default::default()
    };

    let mut cooling_profile = HourlyLoadProfile::default();
    for hour in 0..24 {
        let outdoor_temp = dry_bulb_at_hour(cooling_dd, hour);
        cooling_profile.outdoor_temp[hour] = outdoor_temp;

        let components = hourly_components(space, building, settings, outdoor_temp, hour, cooling_dd);
        let sensible: f64 = components.values().map(|c| c.sensible_cooling).sum();
        let latent: f64 = components.values().map(|c| c.latent_cooling).sum();

        cooling_profile.sensible_cooling[hour] = sensible;
        cooling_profile.latent_cooling[hour] = latent;
        cooling_profile.total_cooling[hour] = sensible + latent;
    }

    let mut heating_profile = HourlyLoadProfile::default();
    for hour in 0..24 {
        let outdoor_temp = dry_bulb_at_hour(heating_dd, hour);
        heating_profile.outdoor_temp[hour] = outdoor_temp;
        heating_profile.sensible_heating[hour] = heating_load(space, settings, outdoor_temp);
    }

    let peak_cooling_hour = cooling_profile.peak_cooling_hour();
    let peak_heating_hour = heating_profile.peak_heating_hour();
    let outdoor_temp_at_peak = cooling_profile.outdoor_temp[peak_cooling_hour];

    // Component breakdown reported is the breakdown at the peak hour, not the
    // per-component maxima.
    result.components = hourly_components(
        space,
        building,
        settings,
        outdoor_temp_at_peak,
        peak_cooling_hour,
        cooling_dd,
    );

    for surface in &space.surfaces {
        match surface.surface_type {
            SurfaceType::ExteriorWall => result.exterior_wall_area += surface.area,
            SurfaceType::Roof => result.roof_area += surface.area,
            _ => {}
        }
    }
    for fen in &space.fenestrations {
        result.window_area += fen.area;
    }

    let max_of = |values: &[f64; 24]| values.iter().cloned().fold(f64::MIN, f64::max);

    result.peak_summary = PeakLoadSummary {
        peak_sensible_cooling: max_of(&cooling_profile.sensible_cooling),
        peak_latent_cooling: cooling_profile.latent_cooling[peak_cooling_hour],
        peak_total_cooling: max_of(&cooling_profile.total_cooling),
        peak_sensible_heating: max_of(&heating_profile.sensible_heating),
        peak_cooling_month: cooling_dd.month,
        peak_cooling_day: cooling_dd.day,
        peak_cooling_hour,
        peak_heating_month: heating_dd.month,
        peak_heating_day: heating_dd.day,
        peak_heating_hour,
        outdoor_temp_at_cooling_peak: outdoor_temp_at_peak,
        outdoor_temp_at_heating_peak: heating_profile.outdoor_temp[peak_heating_hour],
        ..Default::default()
    };

    if result.floor_area > 0.0 {
        result.peak_summary.cooling_w_per_m2 =
            result.peak_summary.peak_total_cooling / result.floor_area;
        result.peak_summary.heating_w_per_m2 =
            result.peak_summary.peak_sensible_heating / result.floor_area;
    }

    result.supply_airflow_cooling = supply_airflow(
        result.peak_summary.peak_sensible_cooling,
        settings.cooling_supply_air_temp,
        settings.indoor_cooling_temp,
    );
    result.supply_airflow_heating = supply_airflow(
        result.peak_summary.peak_sensible_heating,
        settings.heating_supply_air_temp,
        settings.indoor_heating_temp,
    );

    result.outdoor_airflow = match &space.ventilation {
        Some(ventilation) => outdoor_air_flow(space, ventilation),
        None => default_outdoor_air(space.floor_area),
    };

    if result.peak_summary.peak_total_cooling > 0.0 {
        result.room_sensible_heat_ratio =
            result.peak_summary.peak_sensible_cooling / result.peak_summary.peak_total_cooling;
    }

    result.cooling_design_day_profile = cooling_profile;
    result.heating_design_day_profile = heating_profile;

    result
}

/// Assemble all cooling load components for one hour, in reporting order.
/// Negative sensible or latent contributions are clamped to zero before they
/// enter the map.
pub fn hourly_components(
    space: &Space,
    building: &Building,
    settings: &CalculationSettings,
    outdoor_temp: f64,
    hour: usize,
    design_day: &DesignDay,
) -> IndexMap<ComponentKey, LoadComponent> {
    let mut components = IndexMap::new();
    let indoor_temp = settings.indoor_cooling_temp;

    // Envelope conduction through opaque exterior surfaces, driven by the
    // sol-air temperature.
    let mut envelope_sensible = 0.0;
    for surface in &space.surfaces {
        if matches!(
            surface.surface_type,
            SurfaceType::ExteriorWall | SurfaceType::Roof
        ) {
            let u_value = surface
                .construction
                .as_ref()
                .map(|c| c.u_value())
                .unwrap_or(U_VALUE_FALLBACK_WALL);
            let t_sol_air = sol_air_temperature(outdoor_temp, surface, design_day, hour);
            let q = u_value * surface.area * (t_sol_air - indoor_temp);
            envelope_sensible += q.max(0.0);
        }
    }
    components.insert(
        ComponentKey::EnvelopeConduction,
        LoadComponent::cooling(
            "Envelope Conduction",
            envelope_sensible,
            0.0,
            "Heat gain through walls and roof",
        ),
    );

    // Fenestration: solar gain with the fixed orientation-averaging factor,
    // plus assembly conduction.
    let mut window_solar = 0.0;
    let mut window_conduction = 0.0;
    let default_glazing = Glazing::default();
    for fen in &space.fenestrations {
        let glazing = fen.glazing.as_ref().unwrap_or(&default_glazing);
        let solar_intensity = horizontal_irradiance(design_day, hour);
        window_solar += glazing.shgc * fen.area * solar_intensity * WINDOW_ORIENTATION_FACTOR;
        window_conduction += glazing.assembly_u_value() * fen.area * (outdoor_temp - indoor_temp);
    }
    components.insert(
        ComponentKey::WindowSolar,
        LoadComponent::cooling(
            "Window Solar",
            window_solar.max(0.0),
            0.0,
            "Solar heat gain through windows",
        ),
    );
    components.insert(
        ComponentKey::WindowConduction,
        LoadComponent::cooling(
            "Window Conduction",
            window_conduction.max(0.0),
            0.0,
            "Conduction through windows",
        ),
    );

    // Internal gains, either from the explicit load record or from the
    // space-type default intensities.
    if let Some(load) = &space.internal_load {
        let occupancy = schedule_value(building, load.people_schedule_id.as_deref(), hour);
        let num_people = if load.people_count > 0.0 {
            load.people_count
        } else {
            load.people_per_area * space.floor_area
        };
        let people_sensible =
            num_people * load.activity_level * load.sensible_fraction * occupancy;
        let people_latent =
            num_people * load.activity_level * (1.0 - load.sensible_fraction) * occupancy;
        components.insert(
            ComponentKey::People,
            LoadComponent::cooling(
                "People",
                people_sensible,
                people_latent,
                format!(
                    "{:.0} people at {} W/person",
                    num_people, load.activity_level
                ),
            ),
        );

        let light_fraction = schedule_value(building, load.lighting_schedule_id.as_deref(), hour);
        let lighting_power = load.lighting_power_density * space.floor_area * light_fraction;
        components.insert(
            ComponentKey::Lighting,
            LoadComponent::cooling(
                "Lighting",
                lighting_power,
                0.0,
                format!("{} W/m2", load.lighting_power_density),
            ),
        );

        let equip_fraction = schedule_value(building, load.equipment_schedule_id.as_deref(), hour);
        let equip_power = load.equipment_power_density * space.floor_area * equip_fraction;
        let equip_latent = equip_power * load.equipment_latent_fraction;
        components.insert(
            ComponentKey::Equipment,
            LoadComponent::cooling(
                "Equipment",
                equip_power - equip_latent,
                equip_latent,
                format!("{} W/m2", load.equipment_power_density),
            ),
        );
    } else {
        let intensities = default_internal_loads(space.space_type);
        let occupancy = typical_schedule_value(hour);

        components.insert(
            ComponentKey::People,
            LoadComponent::cooling(
                "People",
                intensities.people_sensible * space.floor_area * occupancy,
                intensities.people_latent * space.floor_area * occupancy,
                "",
            ),
        );
        components.insert(
            ComponentKey::Lighting,
            LoadComponent::cooling(
                "Lighting",
                intensities.lighting * space.floor_area * occupancy,
                0.0,
                "",
            ),
        );
        components.insert(
            ComponentKey::Equipment,
            LoadComponent::cooling(
                "Equipment",
                intensities.equipment * space.floor_area * occupancy,
                0.0,
                "",
            ),
        );
    }

    // Infiltration: explicit record when present, otherwise the built-in
    // 0.3 ACH assumption with its simpler latent approximation.
    match &space.infiltration {
        Some(infiltration) if settings.include_infiltration => {
            let flow = infiltration_flow(infiltration, space.volume);
            let sensible = flow * RHO_AIR * CP_AIR * (outdoor_temp - indoor_temp);
            let latent = flow * RHO_AIR * LATENT_HEAT_COEFF * HUMIDITY_RATIO_DIFF;
            components.insert(
                ComponentKey::Infiltration,
                LoadComponent::cooling(
                    "Infiltration",
                    sensible.max(0.0),
                    latent.max(0.0),
                    format!("{} ACH", infiltration.air_changes_per_hour),
                ),
            );
        }
        _ => {
            let flow = 0.3 * space.volume / 3600.0;
            let sensible = flow * RHO_AIR * CP_AIR * (outdoor_temp - indoor_temp);
            components.insert(
                ComponentKey::Infiltration,
                LoadComponent::cooling(
                    "Infiltration",
                    sensible.max(0.0),
                    (sensible * 0.3).max(0.0),
                    "",
                ),
            );
        }
    }

    // Ventilation is reported at space level only when an explicit record is
    // present; system-level outdoor air is handled in the roll-up.
    if let Some(ventilation) = &space.ventilation {
        if settings.include_ventilation {
            let flow = outdoor_air_flow(space, ventilation);
            let sensible = flow * RHO_AIR * CP_AIR * (outdoor_temp - indoor_temp);
            let latent = flow * RHO_AIR * LATENT_HEAT_COEFF * HUMIDITY_RATIO_DIFF;
            components.insert(
                ComponentKey::Ventilation,
                LoadComponent::cooling("Ventilation", sensible.max(0.0), latent.max(0.0), ""),
            );
        }
    }

    components
}

/// Steady-state heating load at the given outdoor temperature: envelope and
/// fenestration conduction, slab losses to ground, infiltration and
/// ventilation air heating. No solar, no internal gains.
pub fn heating_load(space: &Space, settings: &CalculationSettings, outdoor_temp: f64) -> f64 {
    let indoor_temp = settings.indoor_heating_temp;
    let mut load = 0.0;

    for surface in &space.surfaces {
        match surface.surface_type {
            SurfaceType::ExteriorWall | SurfaceType::Roof => {
                let u_value = surface
                    .construction
                    .as_ref()
                    .map(|c| c.u_value())
                    .unwrap_or(U_VALUE_FALLBACK_WALL);
                let q = u_value * surface.area * (indoor_temp - outdoor_temp);
                load += q.max(0.0);
            }
            SurfaceType::SlabOnGrade => {
                let u_value = surface
                    .construction
                    .as_ref()
                    .map(|c| c.u_value())
                    .unwrap_or(U_VALUE_FALLBACK_SLAB);
                let q = u_value * surface.area * (indoor_temp - GROUND_TEMP);
                load += q.max(0.0);
            }
            _ => {}
        }
    }

    let default_glazing = Glazing::default();
    for fen in &space.fenestrations {
        let glazing = fen.glazing.as_ref().unwrap_or(&default_glazing);
        let q = glazing.assembly_u_value() * fen.area * (indoor_temp - outdoor_temp);
        load += q.max(0.0);
    }

    let infiltration_rate = match &space.infiltration {
        Some(infiltration) => infiltration_flow(infiltration, space.volume),
        None => 0.3 * space.volume / 3600.0,
    };
    load += (infiltration_rate * RHO_AIR * CP_AIR * (indoor_temp - outdoor_temp)).max(0.0);

    let ventilation_rate = match &space.ventilation {
        Some(ventilation) => outdoor_air_flow(space, ventilation),
        None => default_outdoor_air(space.floor_area),
    };
    load += (ventilation_rate * RHO_AIR * CP_AIR * (indoor_temp - outdoor_temp)).max(0.0);

    load
}

/// Infiltration volume flow, in m3/s. Methods other than air-changes use the
/// absolute per-zone flow.
pub fn infiltration_flow(infiltration: &crate::model::Infiltration, volume: f64) -> f64 {
    match infiltration.method {
        InfiltrationMethod::AirChanges => infiltration.air_changes_per_hour * volume / 3600.0,
        _ => infiltration.flow_per_zone,
    }
}

/// Supply airflow required to meet a sensible load at the given supply and
/// room temperatures, in m3/s. The temperature difference is clamped to at
/// least 1 K to keep the figure finite.
pub fn supply_airflow(sensible_load: f64, supply_temp: f64, room_temp: f64) -> f64 {
    let delta_t = (room_temp - supply_temp).abs().max(1.0);
    let mass_flow = sensible_load / (CP_AIR * delta_t);
    mass_flow / RHO_AIR
}

/// Outdoor air requirement for a space, in m3/s: the explicit total override
/// when set, otherwise the 62.1 sum of per-person and per-area rates. The
/// occupant count falls back to one person per 10 m2.
pub fn outdoor_air_flow(space: &Space, ventilation: &Ventilation) -> f64 {
    if ventilation.total_outdoor_air > 0.0 {
        return ventilation.total_outdoor_air;
    }

    let mut people = space.floor_area / 10.0;
    if let Some(load) = &space.internal_load {
        if load.people_count > 0.0 {
            people = load.people_count;
        } else if load.people_per_area > 0.0 {
            people = load.people_per_area * space.floor_area;
        }
    }

    ventilation.outdoor_air_per_person * people + ventilation.outdoor_air_per_area * space.floor_area
}

/// Default outdoor air for spaces without a ventilation record, in m3/s.
pub fn default_outdoor_air(floor_area: f64) -> f64 {
    0.0025 * (floor_area / 10.0) + 0.0003 * floor_area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::defaults::{default_cooling_design_day, default_heating_design_day};
    use crate::model::{Fenestration, Infiltration, InternalLoad, Surface};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn office() -> Space {
        Space {
            id: "space-office".into(),
            name: "Office".into(),
            floor_area: 100.0,
            volume: 300.0,
            height: 3.0,
            surfaces: vec![
                Surface {
                    id: "srf-south".into(),
                    surface_type: SurfaceType::ExteriorWall,
                    area: 30.0,
                    azimuth: 180.0,
                    tilt: 90.0,
                    ..Default::default()
                },
                Surface {
                    id: "srf-roof".into(),
                    surface_type: SurfaceType::Roof,
                    area: 100.0,
                    tilt: 0.0,
                    ..Default::default()
                },
            ],
            fenestrations: vec![Fenestration {
                id: "fen-1".into(),
                area: 6.0,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[fixture]
    fn settings() -> CalculationSettings {
        CalculationSettings::default()
    }

    #[rstest]
    fn components_come_out_in_reporting_order(office: Space, settings: CalculationSettings) {
        let building = Building::default();
        let components = hourly_components(
            &office,
            &building,
            &settings,
            35.0,
            15,
            &default_cooling_design_day(),
        );
        let keys: Vec<ComponentKey> = components.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                ComponentKey::EnvelopeConduction,
                ComponentKey::WindowSolar,
                ComponentKey::WindowConduction,
                ComponentKey::People,
                ComponentKey::Lighting,
                ComponentKey::Equipment,
                ComponentKey::Infiltration,
            ]
        );
    }

    #[rstest]
    fn ventilation_component_requires_explicit_record(
        mut office: Space,
        settings: CalculationSettings,
    ) {
        let building = Building::default();
        office.ventilation = Some(Ventilation::default());
        let components = hourly_components(
            &office,
            &building,
            &settings,
            35.0,
            15,
            &default_cooling_design_day(),
        );
        assert!(components.contains_key(&ComponentKey::Ventilation));
        assert!(components[&ComponentKey::Ventilation].sensible_cooling > 0.0);
    }

    #[rstest]
    fn zero_shgc_kills_window_solar(mut office: Space, settings: CalculationSettings) {
        let building = Building::default();
        office.fenestrations[0].glazing = Some(Glazing {
            shgc: 0.0,
            ..Default::default()
        });
        for hour in 0..24 {
            let components = hourly_components(
                &office,
                &building,
                &settings,
                30.0,
                hour,
                &default_cooling_design_day(),
            );
            assert_eq!(components[&ComponentKey::WindowSolar].sensible_cooling, 0.0);
        }
    }

    #[rstest]
    fn no_fenestration_means_zero_window_components(
        mut office: Space,
        settings: CalculationSettings,
    ) {
        let building = Building::default();
        office.fenestrations.clear();
        let components = hourly_components(
            &office,
            &building,
            &settings,
            35.0,
            15,
            &default_cooling_design_day(),
        );
        assert_eq!(components[&ComponentKey::WindowSolar].total_cooling, 0.0);
        assert_eq!(
            components[&ComponentKey::WindowConduction].total_cooling,
            0.0
        );
    }

    #[rstest]
    fn night_window_conduction_clamps_to_zero(office: Space, settings: CalculationSettings) {
        // Outdoor colder than the room: negative gain never reaches the map.
        let building = Building::default();
        let components = hourly_components(
            &office,
            &building,
            &settings,
            18.0,
            3,
            &default_cooling_design_day(),
        );
        assert_eq!(
            components[&ComponentKey::WindowConduction].sensible_cooling,
            0.0
        );
    }

    #[rstest]
    fn explicit_people_count_beats_density(mut office: Space, settings: CalculationSettings) {
        let building = Building::default();
        office.internal_load = Some(InternalLoad {
            people_count: 8.0,
            people_per_area: 0.5,
            activity_level: 120.0,
            sensible_fraction: 0.6,
            ..Default::default()
        });
        let components = hourly_components(
            &office,
            &building,
            &settings,
            35.0,
            14,
            &default_cooling_design_day(),
        );
        // Hour 14 office schedule value is 1.0
        assert_relative_eq!(
            components[&ComponentKey::People].sensible_cooling,
            8.0 * 120.0 * 0.6
        );
        assert_relative_eq!(
            components[&ComponentKey::People].latent_cooling,
            8.0 * 120.0 * 0.4
        );
    }

    #[rstest]
    fn infiltration_flow_methods(office: Space) {
        let ach = Infiltration {
            method: InfiltrationMethod::AirChanges,
            air_changes_per_hour: 0.6,
            ..Default::default()
        };
        assert_relative_eq!(
            infiltration_flow(&ach, office.volume),
            0.6 * 300.0 / 3600.0
        );

        let absolute = Infiltration {
            method: InfiltrationMethod::FlowPerZone,
            flow_per_zone: 0.05,
            ..Default::default()
        };
        assert_relative_eq!(infiltration_flow(&absolute, office.volume), 0.05);
    }

    #[rstest]
    fn supply_airflow_clamps_small_delta_t() {
        let q = 1006.0 * 1.2; // picks volume flow of exactly 1 m3/s at 1 K
        assert_relative_eq!(supply_airflow(q, 23.8, 24.0), 1.0);
        assert_relative_eq!(supply_airflow(q, 13.0, 24.0), 1.0 / 11.0);
    }

    #[rstest]
    fn outdoor_air_override_and_62_1_sum(office: Space) {
        let override_vent = Ventilation {
            total_outdoor_air: 0.5,
            ..Default::default()
        };
        assert_relative_eq!(outdoor_air_flow(&office, &override_vent), 0.5);

        let rate_vent = Ventilation::default();
        // 10 default occupants (100 m2 / 10) plus the per-area term
        assert_relative_eq!(
            outdoor_air_flow(&office, &rate_vent),
            0.0025 * 10.0 + 0.0003 * 100.0
        );
    }

    #[rstest]
    fn space_peak_lands_in_the_afternoon(office: Space, settings: CalculationSettings) {
        let building = Building::default();
        let result = calculate_space_loads(
            &office,
            &building,
            &settings,
            &default_cooling_design_day(),
            &default_heating_design_day(),
        );
        let hour = result.peak_summary.peak_cooling_hour;
        assert!(
            (13..=17).contains(&hour),
            "peak hour {hour} outside expected window"
        );
        assert!(result.peak_summary.peak_total_cooling >= result.peak_summary.peak_sensible_cooling);
        assert!(result.peak_summary.peak_total_cooling >= result.peak_summary.peak_latent_cooling);
        assert!(result.room_sensible_heat_ratio > 0.0 && result.room_sensible_heat_ratio <= 1.0);
    }

    #[rstest]
    fn heating_profile_is_flat_on_zero_range_day(office: Space, settings: CalculationSettings) {
        let building = Building::default();
        let result = calculate_space_loads(
            &office,
            &building,
            &settings,
            &default_cooling_design_day(),
            &default_heating_design_day(),
        );
        let first = result.heating_design_day_profile.sensible_heating[0];
        assert!(first > 0.0);
        for hour in 1..24 {
            assert_relative_eq!(
                result.heating_design_day_profile.sensible_heating[hour],
                first
            );
        }
        // Supply airflow matches the peak sensible load over the 11 K approach
        assert_relative_eq!(
            result.supply_airflow_cooling,
            result.peak_summary.peak_sensible_cooling / (1006.0 * 11.0) / 1.2
        );
    }
}
