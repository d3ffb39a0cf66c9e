//! Orchestration of a full project load calculation.
//!
//! Runs sequentially over one immutable building snapshot: every space, then
//! zones, systems and plants, synthesising the missing hierarchy levels where
//! the model defines none. The calculation is a pure function of the project
//! plus the built-in constant tables; repeated runs produce identical
//! results.

use tracing::{debug, info};

use crate::core::defaults::{
    default_cooling_design_day, default_heating_design_day, default_weather,
};
use crate::core::rollup::{calculate_plant_loads, calculate_system_loads, calculate_zone_loads};
use crate::core::space_loads::{calculate_space_loads, CalculationSettings};
use crate::errors::ModelError;
use crate::model::{Plant, Project, System};
use crate::results::{ProjectLoadResult, ZoneLoadResult};

/// Sizing factors applied to synthetic one-space zones.
const SYNTHETIC_ZONE_COOLING_FACTOR: f64 = 1.15;
const SYNTHETIC_ZONE_HEATING_FACTOR: f64 = 1.25;

#[derive(Debug, Default)]
pub struct LoadCalculator {
    settings: CalculationSettings,
}

impl LoadCalculator {
    pub fn new(settings: CalculationSettings) -> Self {
        Self { settings }
    }

    /// Calculate loads for an entire project, producing results at space,
    /// zone, system and plant level.
    pub fn calculate_project(&self, project: &Project) -> Result<ProjectLoadResult, ModelError> {
        let building = project.building.as_ref().ok_or(ModelError::MissingBuilding)?;
        if building.spaces.is_empty() {
            return Err(ModelError::EmptyModel);
        }

        let validation_warnings = building.validate()?;

        let mut result = ProjectLoadResult {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            building_name: building.name.clone(),
            calculation_method: project.calculation_method.as_str().to_string(),
            warnings: validation_warnings,
            ..Default::default()
        };

        let weather = match &building.weather_data {
            Some(weather) => weather.clone(),
            None => {
                result
                    .notes
                    .push("building has no weather data; default design conditions used".into());
                default_weather()
            }
        };
        result.location = format!("{}, {}, {}", weather.city, weather.state, weather.country);
        result.latitude = weather.latitude;
        result.longitude = weather.longitude;
        result.cooling_design_temp = weather.cooling_db_004;
        result.heating_design_temp = weather.heating_db_996;

        let cooling_dd = weather
            .cooling_design_days
            .first()
            .cloned()
            .unwrap_or_else(default_cooling_design_day);
        let heating_dd = weather
            .heating_design_days
            .first()
            .cloned()
            .unwrap_or_else(default_heating_design_day);

        info!(
            spaces = building.spaces.len(),
            zones = building.zones.len(),
            systems = building.systems.len(),
            plants = building.plants.len(),
            "calculating project loads"
        );

        for space in &building.spaces {
            if space.internal_load.is_none() {
                result.notes.push(format!(
                    "space '{}' has no internal load; {:?} defaults applied",
                    space.id, space.space_type
                ));
            }
            if space.infiltration.is_none() {
                result
                    .notes
                    .push(format!("space '{}' has no infiltration; 0.3 ACH assumed", space.id));
            }
            if space.ventilation.is_none() {
                result.notes.push(format!(
                    "space '{}' has no ventilation; default office outdoor air assumed",
                    space.id
                ));
            }

            let space_result =
                calculate_space_loads(space, building, &self.settings, &cooling_dd, &heating_dd);
            debug!(
                space = %space.id,
                peak_cooling_w = space_result.peak_summary.peak_total_cooling,
                peak_heating_w = space_result.peak_summary.peak_sensible_heating,
                "space calculated"
            );
            result.total_floor_area += space.floor_area * space.multiplier as f64;
            result.total_volume += space.volume * space.multiplier as f64;
            result.space_results.push(space_result);
        }
        result.num_spaces = building.spaces.len();

        for zone in &building.zones {
            let zone_spaces: Vec<_> = result
                .space_results
                .iter()
                .filter(|sr| zone.space_ids.contains(&sr.space_id))
                .cloned()
                .collect();
            result
                .zone_results
                .push(calculate_zone_loads(zone, zone_spaces));
        }
        result.num_zones = building.zones.len();

        if result.zone_results.is_empty() {
            result
                .notes
                .push("no zones defined; one synthetic zone created per space".into());
            for space_result in &result.space_results {
                result.zone_results.push(ZoneLoadResult {
                    zone_id: format!("zone-{}", space_result.space_id),
                    zone_name: space_result.space_name.clone(),
                    space_ids: vec![space_result.space_id.clone()],
                    total_floor_area: space_result.floor_area,
                    total_volume: space_result.volume,
                    peak_summary: space_result.peak_summary.clone(),
                    cooling_diversity_factor: 1.0,
                    heating_diversity_factor: 1.0,
                    cooling_sizing_factor: SYNTHETIC_ZONE_COOLING_FACTOR,
                    heating_sizing_factor: SYNTHETIC_ZONE_HEATING_FACTOR,
                    sized_cooling_load: space_result.peak_summary.peak_total_cooling
                        * SYNTHETIC_ZONE_COOLING_FACTOR,
                    sized_heating_load: space_result.peak_summary.peak_sensible_heating
                        * SYNTHETIC_ZONE_HEATING_FACTOR,
                    zone_supply_airflow: space_result.supply_airflow_cooling,
                    zone_outdoor_airflow: space_result.outdoor_airflow,
                    hourly_profile: combined_space_profile(space_result),
                    space_results: vec![space_result.clone()],
                });
            }
        }

        for system in &building.systems {
            let system_zones: Vec<_> = result
                .zone_results
                .iter()
                .filter(|zr| system.zone_ids.contains(&zr.zone_id))
                .cloned()
                .collect();
            result
                .system_results
                .push(calculate_system_loads(system, system_zones, &self.settings));
        }
        result.num_systems = building.systems.len();

        if result.system_results.is_empty() {
            result
                .notes
                .push("no systems defined; one synthetic system serves all zones".into());
            let default_system = System {
                id: "sys-default".into(),
                name: "Default System".into(),
                zone_ids: result
                    .zone_results
                    .iter()
                    .map(|zr| zr.zone_id.clone())
                    .collect(),
                ..Default::default()
            };
            let zones = result.zone_results.clone();
            result
                .system_results
                .push(calculate_system_loads(&default_system, zones, &self.settings));
        }

        for plant in &building.plants {
            let plant_systems: Vec<_> = result
                .system_results
                .iter()
                .filter(|sr| plant.system_ids.contains(&sr.system_id))
                .cloned()
                .collect();
            result
                .plant_results
                .push(calculate_plant_loads(plant, plant_systems));
        }

        if result.plant_results.is_empty() {
            result
                .notes
                .push("no plants defined; one synthetic central plant serves all systems".into());
            let default_plant = Plant {
                id: "plant-default".into(),
                name: "Central Plant".into(),
                system_ids: result
                    .system_results
                    .iter()
                    .map(|sr| sr.system_id.clone())
                    .collect(),
                ..Default::default()
            };
            let systems = result.system_results.clone();
            result
                .plant_results
                .push(calculate_plant_loads(&default_plant, systems));
        }

        // Building totals are the non-coincident sums of space peaks.
        result.total_cooling_load = result
            .space_results
            .iter()
            .map(|sr| sr.peak_summary.peak_total_cooling)
            .sum();
        result.total_heating_load = result
            .space_results
            .iter()
            .map(|sr| sr.peak_summary.peak_sensible_heating)
            .sum();
        if result.total_floor_area > 0.0 {
            result.cooling_w_per_m2 = result.total_cooling_load / result.total_floor_area;
            result.heating_w_per_m2 = result.total_heating_load / result.total_floor_area;
        }

        info!(
            total_cooling_w = result.total_cooling_load,
            total_heating_w = result.total_heating_load,
            "project calculation complete"
        );

        Ok(result)
    }
}

/// Hourly profile of a synthetic one-space zone: the space's own cooling and
/// heating design-day profiles merged into a single record.
fn combined_space_profile(
    space_result: &crate::results::SpaceLoadResult,
) -> crate::results::HourlyLoadProfile {
    let mut profile = space_result.cooling_design_day_profile.clone();
    profile.sensible_heating = space_result.heating_design_day_profile.sensible_heating;
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Building, Space, SpaceType, System, SystemType, Zone};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn office_space(id: &str) -> Space {
        Space {
            id: id.into(),
            name: format!("Office {id}"),
            space_type: SpaceType::OfficeEnclosed,
            floor_area: 100.0,
            volume: 300.0,
            height: 3.0,
            ..Default::default()
        }
    }

    fn project_with_spaces(spaces: Vec<Space>) -> Project {
        Project {
            id: "proj-1".into(),
            name: "Test".into(),
            building: Some(Building {
                id: "bldg-1".into(),
                name: "Test Building".into(),
                spaces,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[rstest]
    fn missing_building_and_empty_model_are_errors() {
        let calculator = LoadCalculator::default();
        assert!(matches!(
            calculator.calculate_project(&Project::default()),
            Err(ModelError::MissingBuilding)
        ));
        assert!(matches!(
            calculator.calculate_project(&project_with_spaces(vec![])),
            Err(ModelError::EmptyModel)
        ));
    }

    #[rstest]
    fn synthetic_hierarchy_is_created_for_bare_spaces() {
        let calculator = LoadCalculator::default();
        let project = project_with_spaces(vec![office_space("a"), office_space("b")]);
        let result = calculator.calculate_project(&project).unwrap();

        assert_eq!(result.num_spaces, 2);
        assert_eq!(result.zone_results.len(), 2);
        assert_eq!(result.system_results.len(), 1);
        assert_eq!(result.plant_results.len(), 1);
        assert_eq!(result.system_results[0].system_id, "sys-default");
        assert_eq!(result.plant_results[0].plant_name, "Central Plant");

        for (zone_result, space_result) in
            result.zone_results.iter().zip(result.space_results.iter())
        {
            assert_eq!(zone_result.zone_id, format!("zone-{}", space_result.space_id));
            assert_relative_eq!(
                zone_result.sized_cooling_load,
                space_result.peak_summary.peak_total_cooling * 1.15
            );
            assert_relative_eq!(
                zone_result.sized_heating_load,
                space_result.peak_summary.peak_sensible_heating * 1.25
            );
        }
    }

    #[rstest]
    fn project_total_is_sum_of_space_peaks() {
        let calculator = LoadCalculator::default();
        let project = project_with_spaces(vec![office_space("a"), office_space("b")]);
        let result = calculator.calculate_project(&project).unwrap();

        let expected: f64 = result
            .space_results
            .iter()
            .map(|sr| sr.peak_summary.peak_total_cooling)
            .sum();
        assert_relative_eq!(result.total_cooling_load, expected);
        assert_relative_eq!(result.cooling_w_per_m2, expected / 200.0);
    }

    #[rstest]
    fn calculation_is_deterministic() {
        let calculator = LoadCalculator::default();
        let project = project_with_spaces(vec![office_space("a"), office_space("b")]);
        let first = calculator.calculate_project(&project).unwrap();
        let second = calculator.calculate_project(&project).unwrap();
        assert_eq!(first.to_dict(), second.to_dict());
    }

    #[rstest]
    fn explicit_hierarchy_is_respected() {
        let calculator = LoadCalculator::default();
        let mut project = project_with_spaces(vec![office_space("a"), office_space("b")]);
        {
            let building = project.building.as_mut().unwrap();
            building.zones = vec![Zone {
                id: "zone-all".into(),
                name: "Whole floor".into(),
                space_ids: vec!["a".into(), "b".into()],
                ..Default::default()
            }];
            building.systems = vec![System {
                id: "sys-ahu1".into(),
                name: "AHU-1".into(),
                system_type: SystemType::Vav,
                zone_ids: vec!["zone-all".into()],
                ..Default::default()
            }];
        }
        let result = calculator.calculate_project(&project).unwrap();

        assert_eq!(result.num_zones, 1);
        assert_eq!(result.zone_results.len(), 1);
        assert_eq!(result.system_results[0].system_id, "sys-ahu1");
        // Zone profile is the per-hour sum of both spaces
        for hour in 0..24 {
            let expected: f64 = result
                .space_results
                .iter()
                .map(|sr| sr.cooling_design_day_profile.total_cooling[hour])
                .sum();
            assert_relative_eq!(
                result.zone_results[0].hourly_profile.total_cooling[hour],
                expected
            );
        }
    }

    #[rstest]
    fn default_substitutions_are_noted() {
        let calculator = LoadCalculator::default();
        let project = project_with_spaces(vec![office_space("a")]);
        let result = calculator.calculate_project(&project).unwrap();
        assert!(result.notes.iter().any(|n| n.contains("no internal load")));
        assert!(result.notes.iter().any(|n| n.contains("no weather data")));
        assert!(result.notes.iter().any(|n| n.contains("synthetic zone")));
    }
}
