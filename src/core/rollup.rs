//! Aggregation of space results up the zone / system / plant hierarchy.
//!
//! Zones sum their member spaces. Systems distinguish the coincident block
//! load (maximum of the summed hourly profile) from the non-coincident sum of
//! zone sized loads, and size coils and fans from the block. Plants add
//! distribution uplift and split capacity across recommended equipment
//! counts.

use crate::core::space_loads::CalculationSettings;
use crate::core::units::{CP_AIR, CP_WATER, GRAVITY, RHO_AIR, RHO_WATER, WATTS_PER_TON};
use crate::model::{Plant, System, SystemType, Zone};
use crate::results::{
    HourlyLoadProfile, PeakLoadSummary, PlantLoadResult, SpaceLoadResult, SystemLoadResult,
    ZoneLoadResult,
};

/// Outdoor condition assumed for the mixed-air calculation, in Celsius.
const MIXED_AIR_OUTDOOR_TEMP: f64 = 35.0;
/// Uplift on coil sums for pump and piping heat at the plant.
const DISTRIBUTION_UPLIFT: f64 = 1.05;
/// Surcharge on block latent load for outdoor-air moisture at the coil.
const COIL_LATENT_SURCHARGE: f64 = 1.2;
/// Surcharge on block heating for ventilation at the heating coil.
const HEATING_COIL_SURCHARGE: f64 = 1.1;
/// Fraction of block sensible cooling assumed reheated in VAV systems.
const VAV_REHEAT_FRACTION: f64 = 0.2;

/// Loop design temperature differences, in K.
const CHW_DELTA_T: f64 = 5.5;
const HW_DELTA_T: f64 = 11.0;
const CW_DELTA_T: f64 = 5.5;

/// Aggregate member-space results into a zone result.
pub fn calculate_zone_loads(zone: &Zone, space_results: Vec<SpaceLoadResult>) -> ZoneLoadResult {
    let mut result = ZoneLoadResult {
        zone_id: zone.id.clone(),
        zone_name: zone.name.clone(),
        space_ids: zone.space_ids.clone(),
        cooling_diversity_factor: 1.0,
        heating_diversity_factor: 1.0,
        cooling_sizing_factor: zone.cooling_sizing_factor,
        heating_sizing_factor: zone.heating_sizing_factor,
        ..Default::default()
    };

    for sr in &space_results {
        result.total_floor_area += sr.floor_area;
        result.total_volume += sr.volume;
        result.zone_supply_airflow += sr.supply_airflow_cooling;
        result.zone_outdoor_airflow += sr.outdoor_airflow;
    }

    // Zone peaks are the non-coincident sums of space peaks.
    let peak_cooling: f64 = space_results
        .iter()
        .map(|sr| sr.peak_summary.peak_total_cooling)
        .sum();
    let peak_heating: f64 = space_results
        .iter()
        .map(|sr| sr.peak_summary.peak_sensible_heating)
        .sum();

    result.peak_summary = PeakLoadSummary {
        peak_total_cooling: peak_cooling,
        peak_sensible_cooling: space_results
            .iter()
            .map(|sr| sr.peak_summary.peak_sensible_cooling)
            .sum(),
        peak_latent_cooling: space_results
            .iter()
            .map(|sr| sr.peak_summary.peak_latent_cooling)
            .sum(),
        peak_sensible_heating: peak_heating,
        ..Default::default()
    };

    if result.total_floor_area > 0.0 {
        result.peak_summary.cooling_w_per_m2 = peak_cooling / result.total_floor_area;
        result.peak_summary.heating_w_per_m2 = peak_heating / result.total_floor_area;
    }

    result.sized_cooling_load = peak_cooling * zone.cooling_sizing_factor;
    result.sized_heating_load = peak_heating * zone.heating_sizing_factor;

    let mut profile = HourlyLoadProfile::default();
    for hour in 0..24 {
        profile.sensible_cooling[hour] = space_results
            .iter()
            .map(|sr| sr.cooling_design_day_profile.sensible_cooling[hour])
            .sum();
        profile.latent_cooling[hour] = space_results
            .iter()
            .map(|sr| sr.cooling_design_day_profile.latent_cooling[hour])
            .sum();
        profile.total_cooling[hour] = space_results
            .iter()
            .map(|sr| sr.cooling_design_day_profile.total_cooling[hour])
            .sum();
        profile.sensible_heating[hour] = space_results
            .iter()
            .map(|sr| sr.heating_design_day_profile.sensible_heating[hour])
            .sum();
    }
    result.hourly_profile = profile;
    result.space_results = space_results;

    result
}

/// Aggregate zone results into a system result with block loads, coil loads
/// and fan power.
pub fn calculate_system_loads(
    system: &System,
    zone_results: Vec<ZoneLoadResult>,
    settings: &CalculationSettings,
) -> SystemLoadResult {
    let mut result = SystemLoadResult {
        system_id: system.id.clone(),
        system_name: system.name.clone(),
        system_type: system.system_type.as_str().to_string(),
        zone_ids: system.zone_ids.clone(),
        cooling_diversity_factor: 1.0,
        heating_diversity_factor: 1.0,
        cooling_sizing_factor: system.cooling_sizing_factor,
        heating_sizing_factor: system.heating_sizing_factor,
        supply_air_temp: system.cooling_supply_air_temp,
        ..Default::default()
    };

    for zr in &zone_results {
        result.total_floor_area += zr.total_floor_area;
        result.total_supply_airflow += zr.zone_supply_airflow;
        result.total_outdoor_airflow += zr.zone_outdoor_airflow;
        result.sum_zone_cooling += zr.sized_cooling_load;
        result.sum_zone_heating += zr.sized_heating_load;
    }

    // Coincident block load: the peak of the summed hourly profiles, which is
    // never more than the sum of the individual zone peaks.
    let mut hourly_cooling = [0.0_f64; 24];
    let mut hourly_heating = [0.0_f64; 24];
    for zr in &zone_results {
        for hour in 0..24 {
            hourly_cooling[hour] += zr.hourly_profile.total_cooling[hour];
            hourly_heating[hour] += zr.hourly_profile.sensible_heating[hour];
        }
    }
    result.block_cooling_total = hourly_cooling.iter().cloned().fold(0.0, f64::max);
    result.block_heating = hourly_heating.iter().cloned().fold(0.0, f64::max);

    if result.sum_zone_cooling > 0.0 {
        result.cooling_diversity_factor = result.block_cooling_total / result.sum_zone_cooling;
    }
    if result.sum_zone_heating > 0.0 {
        result.heating_diversity_factor = result.block_heating / result.sum_zone_heating;
    }

    // Sensible/latent split of the block, estimated from the zone peaks.
    let total_sensible: f64 = zone_results
        .iter()
        .map(|zr| zr.peak_summary.peak_sensible_cooling)
        .sum();
    let total_latent: f64 = zone_results
        .iter()
        .map(|zr| zr.peak_summary.peak_latent_cooling)
        .sum();
    if result.block_cooling_total > 0.0 {
        let ratio = if total_sensible + total_latent > 0.0 {
            total_sensible / (total_sensible + total_latent)
        } else {
            0.75
        };
        result.block_cooling_sensible = result.block_cooling_total * ratio;
        result.block_cooling_latent = result.block_cooling_total * (1.0 - ratio);
    }

    result.sized_cooling_capacity = result.block_cooling_total * system.cooling_sizing_factor;
    result.sized_heating_capacity = result.block_heating * system.heating_sizing_factor;

    result.mixed_air_temp = mixed_air_temperature(
        result.total_supply_airflow,
        result.total_outdoor_airflow,
        MIXED_AIR_OUTDOOR_TEMP,
        settings.indoor_cooling_temp,
    );

    result.cooling_coil_sensible = result.total_supply_airflow
        * RHO_AIR
        * CP_AIR
        * (result.mixed_air_temp - system.cooling_supply_air_temp);
    result.cooling_coil_latent = result.block_cooling_latent * COIL_LATENT_SURCHARGE;
    result.cooling_coil_total = result.cooling_coil_sensible + result.cooling_coil_latent;

    result.heating_coil_load = result.block_heating * HEATING_COIL_SURCHARGE;
    if system.system_type == SystemType::Vav {
        result.reheat_coil_load = result.block_cooling_sensible * VAV_REHEAT_FRACTION;
    }

    result.supply_fan_power = fan_power(
        result.total_supply_airflow,
        system.fan_pressure_rise,
        system.fan_efficiency,
        system.fan_motor_efficiency,
    );

    let mut profile = HourlyLoadProfile::default();
    for hour in 0..24 {
        profile.sensible_cooling[hour] = zone_results
            .iter()
            .map(|zr| zr.hourly_profile.sensible_cooling[hour])
            .sum();
        profile.total_cooling[hour] = hourly_cooling[hour];
        profile.sensible_heating[hour] = hourly_heating[hour];
    }
    result.hourly_profile = profile;
    result.zone_results = zone_results;

    result
}

/// Aggregate system results into a plant result with equipment sizing, loop
/// flows and pump powers.
pub fn calculate_plant_loads(plant: &Plant, system_results: Vec<SystemLoadResult>) -> PlantLoadResult {
    let mut result = PlantLoadResult {
        plant_id: plant.id.clone(),
        plant_name: plant.name.clone(),
        plant_type: plant.plant_type.clone(),
        system_ids: plant.system_ids.clone(),
        cooling_sizing_factor: plant.cooling_sizing_factor,
        heating_sizing_factor: plant.heating_sizing_factor,
        ..Default::default()
    };

    let mut total_cooling_coil = 0.0;
    let mut total_heating_coil = 0.0;
    for sr in &system_results {
        result.total_floor_area += sr.total_floor_area;
        total_cooling_coil += sr.cooling_coil_total;
        total_heating_coil += sr.heating_coil_load + sr.reheat_coil_load;
    }

    result.total_chiller_load = total_cooling_coil * DISTRIBUTION_UPLIFT;
    result.total_boiler_load = total_heating_coil * DISTRIBUTION_UPLIFT;

    // The tower rejects the chiller load plus compressor heat.
    let compressor_heat = if plant.chiller_cop > 0.0 {
        result.total_chiller_load / plant.chiller_cop
    } else {
        0.0
    };
    result.total_cooling_tower_load = result.total_chiller_load + compressor_heat;

    result.chiller_capacity = result.total_chiller_load * plant.cooling_sizing_factor;
    result.boiler_capacity = result.total_boiler_load * plant.heating_sizing_factor;
    result.cooling_tower_capacity = result.total_cooling_tower_load * plant.cooling_sizing_factor;

    // Chillers top out at 500 tons each; smaller plants split at 200 tons.
    let max_chiller_size = 500.0 * WATTS_PER_TON;
    result.num_chillers_recommended = if result.chiller_capacity > max_chiller_size {
        (result.chiller_capacity / max_chiller_size).ceil() as u32
    } else {
        ((result.chiller_capacity / (200.0 * WATTS_PER_TON)).ceil() as u32).max(1)
    };
    result.chiller_size_each = result.chiller_capacity / result.num_chillers_recommended as f64;

    // Boilers top out at 3000 kW each; smaller plants split at 500 kW.
    let max_boiler_size = 3000.0 * 1000.0;
    result.num_boilers_recommended = if result.boiler_capacity > max_boiler_size {
        (result.boiler_capacity / max_boiler_size).ceil() as u32
    } else {
        ((result.boiler_capacity / (500.0 * 1000.0)).ceil() as u32).max(1)
    };
    result.boiler_size_each = result.boiler_capacity / result.num_boilers_recommended as f64;

    result.chw_flow_rate =
        result.total_chiller_load / (RHO_WATER * CP_WATER * CHW_DELTA_T) * 1000.0;
    result.hw_flow_rate = result.total_boiler_load / (RHO_WATER * CP_WATER * HW_DELTA_T) * 1000.0;
    result.cw_flow_rate =
        result.total_cooling_tower_load / (RHO_WATER * CP_WATER * CW_DELTA_T) * 1000.0;

    result.chw_pump_power = pump_power(
        result.chw_flow_rate / 1000.0,
        plant.chw_pump_head,
        plant.pump_efficiency,
    );
    result.hw_pump_power = pump_power(
        result.hw_flow_rate / 1000.0,
        plant.hw_pump_head,
        plant.pump_efficiency,
    );
    result.cw_pump_power = pump_power(
        result.cw_flow_rate / 1000.0,
        plant.cw_pump_head,
        plant.pump_efficiency,
    );

    result.chiller_energy_input = if plant.chiller_cop > 0.0 {
        result.total_chiller_load / plant.chiller_cop
    } else {
        0.0
    };
    result.boiler_energy_input = if plant.boiler_efficiency > 0.0 {
        result.total_boiler_load / plant.boiler_efficiency
    } else {
        0.0
    };

    result.system_results = system_results;
    result
}

/// Mixed-air temperature from the outdoor-air fraction, clamped to [0, 1].
pub fn mixed_air_temperature(
    total_flow: f64,
    outdoor_flow: f64,
    outdoor_temp: f64,
    return_temp: f64,
) -> f64 {
    if total_flow <= 0.0 {
        return return_temp;
    }
    let oa_fraction = (outdoor_flow / total_flow).clamp(0.0, 1.0);
    oa_fraction * outdoor_temp + (1.0 - oa_fraction) * return_temp
}

/// Fan shaft + motor electrical power, in W. Zero when either efficiency is
/// non-positive.
pub fn fan_power(
    flow_rate: f64,
    pressure_rise: f64,
    fan_efficiency: f64,
    motor_efficiency: f64,
) -> f64 {
    if fan_efficiency <= 0.0 || motor_efficiency <= 0.0 {
        return 0.0;
    }
    flow_rate * pressure_rise / (fan_efficiency * motor_efficiency)
}

/// Pump electrical power from flow (m3/s), head (kPa) and efficiency, in W.
/// Zero when the efficiency is non-positive.
pub fn pump_power(flow_rate: f64, head_kpa: f64, efficiency: f64) -> f64 {
    if efficiency <= 0.0 {
        return 0.0;
    }
    let head_m = head_kpa / GRAVITY;
    RHO_WATER * GRAVITY * flow_rate * head_m / efficiency
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn space_result_with_profile(id: &str, peak_hour: usize, magnitude: f64) -> SpaceLoadResult {
        let mut result = SpaceLoadResult {
            space_id: id.into(),
            space_name: id.into(),
            floor_area: 50.0,
            volume: 150.0,
            supply_airflow_cooling: 0.2,
            outdoor_airflow: 0.05,
            ..Default::default()
        };
        for hour in 0..24 {
            // Triangular profile peaking at `peak_hour`
            let distance = (hour as f64 - peak_hour as f64).abs();
            let load = (magnitude - distance * 100.0).max(0.0);
            result.cooling_design_day_profile.sensible_cooling[hour] = load * 0.8;
            result.cooling_design_day_profile.latent_cooling[hour] = load * 0.2;
            result.cooling_design_day_profile.total_cooling[hour] = load;
            result.heating_design_day_profile.sensible_heating[hour] = magnitude / 2.0;
        }
        result.peak_summary.peak_total_cooling = magnitude;
        result.peak_summary.peak_sensible_cooling = magnitude * 0.8;
        result.peak_summary.peak_latent_cooling = magnitude * 0.2;
        result.peak_summary.peak_sensible_heating = magnitude / 2.0;
        result
    }

    #[fixture]
    fn two_space_zone() -> ZoneLoadResult {
        let zone = Zone {
            id: "zone-1".into(),
            name: "Perimeter".into(),
            space_ids: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        calculate_zone_loads(
            &zone,
            vec![
                space_result_with_profile("a", 14, 2000.0),
                space_result_with_profile("b", 16, 1000.0),
            ],
        )
    }

    #[rstest]
    fn zone_profile_is_per_hour_sum_of_spaces(two_space_zone: ZoneLoadResult) {
        for hour in 0..24 {
            let expected: f64 = two_space_zone
                .space_results
                .iter()
                .map(|sr| sr.cooling_design_day_profile.total_cooling[hour])
                .sum();
            assert_relative_eq!(two_space_zone.hourly_profile.total_cooling[hour], expected);
        }
    }

    #[rstest]
    fn zone_peak_is_sum_of_space_peaks(two_space_zone: ZoneLoadResult) {
        assert_relative_eq!(two_space_zone.peak_summary.peak_total_cooling, 3000.0);
        assert_relative_eq!(two_space_zone.sized_cooling_load, 3000.0 * 1.15);
        assert_relative_eq!(two_space_zone.sized_heating_load, 1500.0 * 1.25);
        assert_relative_eq!(two_space_zone.zone_supply_airflow, 0.4);
    }

    #[rstest]
    fn block_load_does_not_exceed_sum_of_zone_peaks(two_space_zone: ZoneLoadResult) {
        let zone_a = two_space_zone;
        let zone_b = {
            let zone = Zone {
                id: "zone-2".into(),
                space_ids: vec!["c".into()],
                ..Default::default()
            };
            calculate_zone_loads(&zone, vec![space_result_with_profile("c", 10, 1500.0)])
        };
        let sum_of_sized = zone_a.sized_cooling_load + zone_b.sized_cooling_load;

        let system = System {
            id: "sys-1".into(),
            zone_ids: vec!["zone-1".into(), "zone-2".into()],
            ..Default::default()
        };
        let result = calculate_system_loads(
            &system,
            vec![zone_a, zone_b],
            &CalculationSettings::default(),
        );

        assert!(result.block_cooling_total <= sum_of_sized);
        assert!(result.cooling_diversity_factor <= 1.0);
        assert_relative_eq!(
            result.cooling_diversity_factor,
            result.block_cooling_total / sum_of_sized
        );
    }

    #[rstest]
    fn vav_gets_reheat_and_cav_does_not(two_space_zone: ZoneLoadResult) {
        let settings = CalculationSettings::default();
        let vav = System {
            id: "sys-vav".into(),
            system_type: SystemType::Vav,
            zone_ids: vec!["zone-1".into()],
            ..Default::default()
        };
        let cav = System {
            system_type: SystemType::Cav,
            ..vav.clone()
        };

        let vav_result = calculate_system_loads(&vav, vec![two_space_zone.clone()], &settings);
        let cav_result = calculate_system_loads(&cav, vec![two_space_zone], &settings);

        assert_relative_eq!(
            vav_result.reheat_coil_load,
            vav_result.block_cooling_sensible * 0.2
        );
        assert_eq!(cav_result.reheat_coil_load, 0.0);
        assert_relative_eq!(
            cav_result.block_cooling_sensible,
            vav_result.block_cooling_sensible
        );
    }

    #[rstest]
    fn mixed_air_clamps_outdoor_fraction() {
        assert_relative_eq!(mixed_air_temperature(1.0, 0.5, 35.0, 24.0), 29.5);
        // OA flow above supply flow behaves as 100% outdoor air
        assert_relative_eq!(mixed_air_temperature(1.0, 2.0, 35.0, 24.0), 35.0);
        assert_relative_eq!(mixed_air_temperature(0.0, 1.0, 35.0, 24.0), 24.0);
    }

    #[rstest]
    fn zero_efficiencies_give_zero_power_not_nan() {
        assert_eq!(fan_power(2.0, 1000.0, 0.0, 0.9), 0.0);
        assert_eq!(fan_power(2.0, 1000.0, 0.7, 0.0), 0.0);
        assert_eq!(pump_power(0.01, 150.0, 0.0), 0.0);
        assert_relative_eq!(fan_power(2.0, 1000.0, 0.7, 0.9), 2000.0 / 0.63);
    }

    #[rstest]
    fn plant_sizing_splits_large_chillers(two_space_zone: ZoneLoadResult) {
        let system = System {
            id: "sys-1".into(),
            ..Default::default()
        };
        let mut system_result = calculate_system_loads(
            &system,
            vec![two_space_zone],
            &CalculationSettings::default(),
        );
        // Force a 600-ton plant: capacity = coil * 1.05 * 1.1 = 600 tons
        system_result.cooling_coil_total = 600.0 * WATTS_PER_TON / (1.05 * 1.1);
        system_result.heating_coil_load = 0.0;
        system_result.reheat_coil_load = 0.0;

        let plant = Plant {
            id: "plant-1".into(),
            ..Default::default()
        };
        let result = calculate_plant_loads(&plant, vec![system_result]);

        assert_relative_eq!(result.chiller_capacity, 600.0 * WATTS_PER_TON, epsilon = 1e-6);
        assert_eq!(result.num_chillers_recommended, 2);
        assert_relative_eq!(
            result.chiller_size_each,
            300.0 * WATTS_PER_TON,
            epsilon = 1e-6
        );
        // Zero heating load still recommends a single minimum boiler
        assert_eq!(result.num_boilers_recommended, 1);
        assert_eq!(result.boiler_size_each, 0.0);
    }

    #[rstest]
    fn plant_flow_rates_and_pump_power(two_space_zone: ZoneLoadResult) {
        let system = System {
            id: "sys-1".into(),
            ..Default::default()
        };
        let system_result = calculate_system_loads(
            &system,
            vec![two_space_zone],
            &CalculationSettings::default(),
        );
        let plant = Plant {
            id: "plant-1".into(),
            ..Default::default()
        };
        let result = calculate_plant_loads(&plant, vec![system_result]);

        assert_relative_eq!(
            result.chw_flow_rate,
            result.total_chiller_load / (1000.0 * 4186.0 * 5.5) * 1000.0
        );
        assert_relative_eq!(
            result.chw_pump_power,
            1000.0 * 9.81 * (result.chw_flow_rate / 1000.0) * (150.0 / 9.81) / 0.7
        );
        assert_relative_eq!(
            result.chiller_energy_input,
            result.total_chiller_load / 6.0
        );
        assert_relative_eq!(
            result.total_cooling_tower_load,
            result.total_chiller_load * (1.0 + 1.0 / 6.0)
        );
    }
}
