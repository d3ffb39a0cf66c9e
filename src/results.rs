//! Result entities for load calculation outputs.
//!
//! The tree mirrors the entity hierarchy (space -> zone -> system -> plant)
//! and each level defines a canonical dictionary form used for reports and
//! the JSON output file. Dictionary key names carry unit suffixes and both SI
//! and IP projections where reports need them; the conversion factors live in
//! [`crate::core::units`].

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::units::{m3s_to_cfm, watts_to_kilowatts, watts_to_tons};

/// Keys of the load component breakdown. Declaration order is the order the
/// calculator assembles components in, and the order the JSON projection
/// preserves.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKey {
    EnvelopeConduction,
    WindowSolar,
    WindowConduction,
    People,
    Lighting,
    Equipment,
    Infiltration,
    Ventilation,
}

impl ComponentKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKey::EnvelopeConduction => "envelope_conduction",
            ComponentKey::WindowSolar => "window_solar",
            ComponentKey::WindowConduction => "window_conduction",
            ComponentKey::People => "people",
            ComponentKey::Lighting => "lighting",
            ComponentKey::Equipment => "equipment",
            ComponentKey::Infiltration => "infiltration",
            ComponentKey::Ventilation => "ventilation",
        }
    }
}

/// One named contribution to a space load.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LoadComponent {
    pub name: String,
    /// Sensible cooling contribution (unit: W)
    pub sensible_cooling: f64,
    /// Latent cooling contribution (unit: W)
    pub latent_cooling: f64,
    /// Total cooling contribution (unit: W)
    pub total_cooling: f64,
    /// Sensible heating contribution (unit: W)
    pub sensible_heating: f64,
    pub description: String,
}

impl LoadComponent {
    /// A cooling-mode component; the total is the sensible + latent sum.
    pub fn cooling(
        name: impl Into<String>,
        sensible: f64,
        latent: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sensible_cooling: sensible,
            latent_cooling: latent,
            total_cooling: sensible + latent,
            sensible_heating: 0.0,
            description: description.into(),
        }
    }
}

/// 24-hour load profile over a design day.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HourlyLoadProfile {
    /// Sensible cooling load per hour (unit: W)
    pub sensible_cooling: [f64; 24],
    /// Latent cooling load per hour (unit: W)
    pub latent_cooling: [f64; 24],
    /// Total cooling load per hour (unit: W)
    pub total_cooling: [f64; 24],
    /// Sensible heating load per hour (unit: W)
    pub sensible_heating: [f64; 24],
    /// Outdoor dry-bulb per hour (unit: Celsius)
    pub outdoor_temp: [f64; 24],
}

impl Default for HourlyLoadProfile {
    fn default() -> Self {
        Self {
            sensible_cooling: [0.0; 24],
            latent_cooling: [0.0; 24],
            total_cooling: [0.0; 24],
            sensible_heating: [0.0; 24],
            outdoor_temp: [20.0; 24],
        }
    }
}

fn argmax(values: &[f64; 24]) -> usize {
    let mut best = 0;
    for (hour, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = hour;
        }
    }
    best
}

impl HourlyLoadProfile {
    /// Hour of the peak total cooling load (first hour on ties).
    pub fn peak_cooling_hour(&self) -> usize {
        argmax(&self.total_cooling)
    }

    /// Hour of the peak sensible heating load (first hour on ties).
    pub fn peak_heating_hour(&self) -> usize {
        argmax(&self.sensible_heating)
    }
}

/// Peak load summary for one aggregation level.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PeakLoadSummary {
    /// (unit: W)
    pub peak_sensible_cooling: f64,
    /// Latent load at the peak-total hour (unit: W)
    pub peak_latent_cooling: f64,
    /// (unit: W)
    pub peak_total_cooling: f64,
    /// (unit: W)
    pub peak_sensible_heating: f64,

    pub peak_cooling_month: u32,
    pub peak_cooling_day: u32,
    pub peak_cooling_hour: usize,

    pub peak_heating_month: u32,
    pub peak_heating_day: u32,
    pub peak_heating_hour: usize,

    /// (unit: Celsius)
    pub outdoor_temp_at_cooling_peak: f64,
    /// (unit: Celsius)
    pub outdoor_temp_at_heating_peak: f64,

    /// (unit: W/m2)
    pub cooling_w_per_m2: f64,
    /// (unit: W/m2)
    pub heating_w_per_m2: f64,
}

impl Default for PeakLoadSummary {
    fn default() -> Self {
        Self {
            peak_sensible_cooling: 0.0,
            peak_latent_cooling: 0.0,
            peak_total_cooling: 0.0,
            peak_sensible_heating: 0.0,
            peak_cooling_month: 7,
            peak_cooling_day: 21,
            peak_cooling_hour: 15,
            peak_heating_month: 1,
            peak_heating_day: 21,
            peak_heating_hour: 7,
            outdoor_temp_at_cooling_peak: 35.0,
            outdoor_temp_at_heating_peak: -15.0,
            cooling_w_per_m2: 0.0,
            heating_w_per_m2: 0.0,
        }
    }
}

/// Detailed load results for a single space.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SpaceLoadResult {
    pub space_id: String,
    pub space_name: String,

    /// (unit: m2)
    pub floor_area: f64,
    /// (unit: m3)
    pub volume: f64,
    /// (unit: m2)
    pub exterior_wall_area: f64,
    /// (unit: m2)
    pub window_area: f64,
    /// (unit: m2)
    pub roof_area: f64,

    pub peak_summary: PeakLoadSummary,

    /// Component breakdown at the peak cooling hour, in assembly order
    pub components: IndexMap<ComponentKey, LoadComponent>,

    pub cooling_design_day_profile: HourlyLoadProfile,
    pub heating_design_day_profile: HourlyLoadProfile,

    /// (unit: m3/s)
    pub supply_airflow_cooling: f64,
    /// (unit: m3/s)
    pub supply_airflow_heating: f64,
    /// (unit: m3/s)
    pub outdoor_airflow: f64,

    pub room_sensible_heat_ratio: f64,
}

impl SpaceLoadResult {
    pub fn to_dict(&self) -> Value {
        json!({
            "space_id": self.space_id,
            "space_name": self.space_name,
            "geometry": {
                "floor_area_m2": self.floor_area,
                "volume_m3": self.volume,
                "exterior_wall_area_m2": self.exterior_wall_area,
                "window_area_m2": self.window_area,
                "roof_area_m2": self.roof_area,
            },
            "peak_cooling": {
                "sensible_w": self.peak_summary.peak_sensible_cooling,
                "latent_w": self.peak_summary.peak_latent_cooling,
                "total_w": self.peak_summary.peak_total_cooling,
                "w_per_m2": self.peak_summary.cooling_w_per_m2,
                "month": self.peak_summary.peak_cooling_month,
                "hour": self.peak_summary.peak_cooling_hour,
                "outdoor_temp_c": self.peak_summary.outdoor_temp_at_cooling_peak,
            },
            "peak_heating": {
                "sensible_w": self.peak_summary.peak_sensible_heating,
                "w_per_m2": self.peak_summary.heating_w_per_m2,
                "month": self.peak_summary.peak_heating_month,
                "hour": self.peak_summary.peak_heating_hour,
                "outdoor_temp_c": self.peak_summary.outdoor_temp_at_heating_peak,
            },
            "components": self.components.iter().map(|(key, comp)| {
                (key.as_str().to_string(), json!({
                    "sensible_cooling_w": comp.sensible_cooling,
                    "latent_cooling_w": comp.latent_cooling,
                    "total_cooling_w": comp.total_cooling,
                    "sensible_heating_w": comp.sensible_heating,
                }))
            }).collect::<serde_json::Map<_, _>>(),
            "airflow": {
                "supply_cooling_m3s": self.supply_airflow_cooling,
                "supply_heating_m3s": self.supply_airflow_heating,
                "outdoor_air_m3s": self.outdoor_airflow,
            },
        })
    }
}

/// Aggregated load results for an HVAC zone.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ZoneLoadResult {
    pub zone_id: String,
    pub zone_name: String,

    pub space_ids: Vec<String>,
    pub space_results: Vec<SpaceLoadResult>,

    /// (unit: m2)
    pub total_floor_area: f64,
    /// (unit: m3)
    pub total_volume: f64,

    pub peak_summary: PeakLoadSummary,

    pub cooling_diversity_factor: f64,
    pub heating_diversity_factor: f64,

    pub cooling_sizing_factor: f64,
    pub heating_sizing_factor: f64,

    /// Peak load after the sizing factor (unit: W)
    pub sized_cooling_load: f64,
    /// (unit: W)
    pub sized_heating_load: f64,

    /// (unit: m3/s)
    pub zone_supply_airflow: f64,
    /// (unit: m3/s)
    pub zone_outdoor_airflow: f64,

    pub hourly_profile: HourlyLoadProfile,
}

impl ZoneLoadResult {
    pub fn to_dict(&self) -> Value {
        json!({
            "zone_id": self.zone_id,
            "zone_name": self.zone_name,
            "space_ids": self.space_ids,
            "geometry": {
                "total_floor_area_m2": self.total_floor_area,
                "total_volume_m3": self.total_volume,
            },
            "peak_cooling": {
                "calculated_w": self.peak_summary.peak_total_cooling,
                "sized_w": self.sized_cooling_load,
                "diversity_factor": self.cooling_diversity_factor,
                "sizing_factor": self.cooling_sizing_factor,
            },
            "peak_heating": {
                "calculated_w": self.peak_summary.peak_sensible_heating,
                "sized_w": self.sized_heating_load,
                "diversity_factor": self.heating_diversity_factor,
                "sizing_factor": self.heating_sizing_factor,
            },
            "airflow": {
                "supply_m3s": self.zone_supply_airflow,
                "outdoor_air_m3s": self.zone_outdoor_airflow,
            },
        })
    }
}

/// Load results for an air-handling system.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SystemLoadResult {
    pub system_id: String,
    pub system_name: String,
    pub system_type: String,

    pub zone_ids: Vec<String>,
    pub zone_results: Vec<ZoneLoadResult>,

    /// (unit: m2)
    pub total_floor_area: f64,

    /// Coincident block loads (unit: W)
    pub block_cooling_sensible: f64,
    pub block_cooling_latent: f64,
    pub block_cooling_total: f64,
    pub block_heating: f64,

    /// Non-coincident sums of zone sized loads (unit: W)
    pub sum_zone_cooling: f64,
    pub sum_zone_heating: f64,

    pub cooling_diversity_factor: f64,
    pub heating_diversity_factor: f64,

    pub cooling_sizing_factor: f64,
    pub heating_sizing_factor: f64,
    /// (unit: W)
    pub sized_cooling_capacity: f64,
    /// (unit: W)
    pub sized_heating_capacity: f64,

    /// (unit: m3/s)
    pub total_supply_airflow: f64,
    /// (unit: m3/s)
    pub total_outdoor_airflow: f64,

    /// Coil loads (unit: W)
    pub cooling_coil_total: f64,
    pub cooling_coil_sensible: f64,
    pub cooling_coil_latent: f64,
    pub heating_coil_load: f64,
    pub reheat_coil_load: f64,

    /// (unit: W)
    pub supply_fan_power: f64,

    /// (unit: Celsius)
    pub mixed_air_temp: f64,
    /// (unit: Celsius)
    pub supply_air_temp: f64,

    pub hourly_profile: HourlyLoadProfile,
}

impl SystemLoadResult {
    pub fn to_dict(&self) -> Value {
        json!({
            "system_id": self.system_id,
            "system_name": self.system_name,
            "system_type": self.system_type,
            "zone_ids": self.zone_ids,
            "geometry": {
                "total_floor_area_m2": self.total_floor_area,
            },
            "block_loads": {
                "cooling_sensible_w": self.block_cooling_sensible,
                "cooling_latent_w": self.block_cooling_latent,
                "cooling_total_w": self.block_cooling_total,
                "heating_w": self.block_heating,
            },
            "diversity": {
                "cooling": self.cooling_diversity_factor,
                "heating": self.heating_diversity_factor,
                "sum_zone_cooling_w": self.sum_zone_cooling,
                "sum_zone_heating_w": self.sum_zone_heating,
            },
            "sized_capacity": {
                "cooling_w": self.sized_cooling_capacity,
                "heating_w": self.sized_heating_capacity,
                "cooling_tons": watts_to_tons(self.sized_cooling_capacity),
                "heating_kw": watts_to_kilowatts(self.sized_heating_capacity),
            },
            "airflow": {
                "supply_m3s": self.total_supply_airflow,
                "supply_cfm": m3s_to_cfm(self.total_supply_airflow),
                "outdoor_air_m3s": self.total_outdoor_airflow,
                "outdoor_air_cfm": m3s_to_cfm(self.total_outdoor_airflow),
            },
            "coil_loads": {
                "cooling_coil_total_w": self.cooling_coil_total,
                "cooling_coil_sensible_w": self.cooling_coil_sensible,
                "cooling_coil_latent_w": self.cooling_coil_latent,
                "heating_coil_w": self.heating_coil_load,
                "reheat_coil_w": self.reheat_coil_load,
            },
            "psychrometrics": {
                "mixed_air_temp_c": self.mixed_air_temp,
                "supply_air_temp_c": self.supply_air_temp,
            },
            "fan_power": {
                "supply_fan_w": self.supply_fan_power,
            },
        })
    }
}

/// Load results for central plant equipment.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PlantLoadResult {
    pub plant_id: String,
    pub plant_name: String,
    pub plant_type: String,

    pub system_ids: Vec<String>,
    pub system_results: Vec<SystemLoadResult>,

    /// (unit: m2)
    pub total_floor_area: f64,

    /// Plant thermal loads including distribution uplift (unit: W)
    pub total_chiller_load: f64,
    pub total_boiler_load: f64,
    pub total_cooling_tower_load: f64,

    pub cooling_sizing_factor: f64,
    pub heating_sizing_factor: f64,
    /// Sized capacities (unit: W)
    pub chiller_capacity: f64,
    pub boiler_capacity: f64,
    pub cooling_tower_capacity: f64,

    /// Pump shaft powers (unit: W)
    pub chw_pump_power: f64,
    pub hw_pump_power: f64,
    pub cw_pump_power: f64,

    /// Loop flow rates (unit: L/s)
    pub chw_flow_rate: f64,
    pub hw_flow_rate: f64,
    pub cw_flow_rate: f64,

    /// (unit: W electrical)
    pub chiller_energy_input: f64,
    /// (unit: W fuel)
    pub boiler_energy_input: f64,

    pub num_chillers_recommended: u32,
    pub num_boilers_recommended: u32,
    /// (unit: W)
    pub chiller_size_each: f64,
    /// (unit: W)
    pub boiler_size_each: f64,
}

impl PlantLoadResult {
    pub fn to_dict(&self) -> Value {
        json!({
            "plant_id": self.plant_id,
            "plant_name": self.plant_name,
            "plant_type": self.plant_type,
            "system_ids": self.system_ids,
            "geometry": {
                "total_floor_area_m2": self.total_floor_area,
            },
            "plant_loads": {
                "chiller_load_w": self.total_chiller_load,
                "chiller_load_tons": watts_to_tons(self.total_chiller_load),
                "boiler_load_w": self.total_boiler_load,
                "boiler_load_kw": watts_to_kilowatts(self.total_boiler_load),
                "cooling_tower_load_w": self.total_cooling_tower_load,
            },
            "sized_capacity": {
                "chiller_w": self.chiller_capacity,
                "chiller_tons": watts_to_tons(self.chiller_capacity),
                "boiler_w": self.boiler_capacity,
                "boiler_kw": watts_to_kilowatts(self.boiler_capacity),
            },
            "equipment_sizing": {
                "num_chillers": self.num_chillers_recommended,
                "chiller_size_each_tons": watts_to_tons(self.chiller_size_each),
                "num_boilers": self.num_boilers_recommended,
                "boiler_size_each_kw": watts_to_kilowatts(self.boiler_size_each),
            },
            "flow_rates": {
                "chw_Ls": self.chw_flow_rate,
                "hw_Ls": self.hw_flow_rate,
                "cw_Ls": self.cw_flow_rate,
            },
            "pump_power": {
                "chw_pump_w": self.chw_pump_power,
                "hw_pump_w": self.hw_pump_power,
                "cw_pump_w": self.cw_pump_power,
            },
            "energy_input": {
                "chiller_w": self.chiller_energy_input,
                "boiler_w": self.boiler_energy_input,
            },
        })
    }
}

/// Complete load calculation results for a project.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProjectLoadResult {
    pub project_id: String,
    pub project_name: String,
    /// Stamped by the caller after a successful run; the calculation itself
    /// never reads the clock.
    pub calculated_at: Option<DateTime<Utc>>,
    pub calculation_method: String,

    pub building_name: String,
    /// (unit: m2)
    pub total_floor_area: f64,
    /// (unit: m3)
    pub total_volume: f64,
    pub num_spaces: usize,
    pub num_zones: usize,
    pub num_systems: usize,

    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// (unit: Celsius)
    pub cooling_design_temp: f64,
    /// (unit: Celsius)
    pub heating_design_temp: f64,

    /// Sum of space cooling peaks, non-coincident (unit: W)
    pub total_cooling_load: f64,
    /// Sum of space heating peaks (unit: W)
    pub total_heating_load: f64,
    /// (unit: W/m2)
    pub cooling_w_per_m2: f64,
    /// (unit: W/m2)
    pub heating_w_per_m2: f64,

    pub space_results: Vec<SpaceLoadResult>,
    pub zone_results: Vec<ZoneLoadResult>,
    pub system_results: Vec<SystemLoadResult>,
    pub plant_results: Vec<PlantLoadResult>,

    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

impl ProjectLoadResult {
    pub fn to_dict(&self) -> Value {
        json!({
            "project_id": self.project_id,
            "project_name": self.project_name,
            "calculated_at": self.calculated_at.map(|t| t.to_rfc3339()),
            "calculation_method": self.calculation_method,
            "summary": {
                "building_name": self.building_name,
                "location": self.location,
                "total_floor_area_m2": self.total_floor_area,
                "total_volume_m3": self.total_volume,
                "num_spaces": self.num_spaces,
                "num_zones": self.num_zones,
                "num_systems": self.num_systems,
            },
            "design_conditions": {
                "cooling_design_temp_c": self.cooling_design_temp,
                "heating_design_temp_c": self.heating_design_temp,
            },
            "building_loads": {
                "total_cooling_w": self.total_cooling_load,
                "total_cooling_tons": watts_to_tons(self.total_cooling_load),
                "total_heating_w": self.total_heating_load,
                "total_heating_kw": watts_to_kilowatts(self.total_heating_load),
                "cooling_w_per_m2": self.cooling_w_per_m2,
                "heating_w_per_m2": self.heating_w_per_m2,
            },
            "space_results": self.space_results.iter().map(|r| r.to_dict()).collect::<Vec<_>>(),
            "zone_results": self.zone_results.iter().map(|r| r.to_dict()).collect::<Vec<_>>(),
            "system_results": self.system_results.iter().map(|r| r.to_dict()).collect::<Vec<_>>(),
            "plant_results": self.plant_results.iter().map(|r| r.to_dict()).collect::<Vec<_>>(),
            "warnings": self.warnings,
            "notes": self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn cooling_component_totals_sensible_plus_latent() {
        let comp = LoadComponent::cooling("People", 600.0, 400.0, "8 people");
        assert_relative_eq!(comp.total_cooling, 1000.0);
        assert_eq!(comp.sensible_heating, 0.0);
    }

    #[rstest]
    fn profile_peak_hours_pick_first_maximum() {
        let mut profile = HourlyLoadProfile::default();
        profile.total_cooling[15] = 5000.0;
        profile.total_cooling[16] = 5000.0;
        assert_eq!(profile.peak_cooling_hour(), 15);

        // Constant heating profile peaks at hour 0
        profile.sensible_heating = [3000.0; 24];
        assert_eq!(profile.peak_heating_hour(), 0);
    }

    #[rstest]
    fn component_projection_preserves_assembly_order() {
        let mut result = SpaceLoadResult::default();
        for key in [
            ComponentKey::EnvelopeConduction,
            ComponentKey::WindowSolar,
            ComponentKey::WindowConduction,
            ComponentKey::People,
            ComponentKey::Lighting,
            ComponentKey::Equipment,
            ComponentKey::Infiltration,
            ComponentKey::Ventilation,
        ] {
            result
                .components
                .insert(key, LoadComponent::cooling(key.as_str(), 1.0, 0.0, ""));
        }
        let dict = result.to_dict();
        let keys: Vec<&String> = dict["components"].as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec![
                "envelope_conduction",
                "window_solar",
                "window_conduction",
                "people",
                "lighting",
                "equipment",
                "infiltration",
                "ventilation",
            ]
        );
    }

    #[rstest]
    fn system_projection_converts_units() {
        let result = SystemLoadResult {
            sized_cooling_capacity: 3517.0,
            sized_heating_capacity: 2000.0,
            total_supply_airflow: 1.0,
            ..Default::default()
        };
        let dict = result.to_dict();
        assert_relative_eq!(dict["sized_capacity"]["cooling_tons"].as_f64().unwrap(), 1.0);
        assert_relative_eq!(dict["sized_capacity"]["heating_kw"].as_f64().unwrap(), 2.0);
        assert_relative_eq!(
            dict["airflow"]["supply_cfm"].as_f64().unwrap(),
            2118.88
        );
    }

    #[rstest]
    fn project_projection_reports_null_timestamp_until_stamped() {
        let result = ProjectLoadResult::default();
        assert!(result.to_dict()["calculated_at"].is_null());
    }
}
