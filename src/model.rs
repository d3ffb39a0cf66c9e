//! Building entity graph for design-day load calculations.
//!
//! Entities are value-like and constructed top-down; cross-references between
//! the hierarchy levels (zone -> space, system -> zone, plant -> system) are
//! stable string identifiers resolved at roll-up time, so the object graph is
//! a strict forest. The calculator consumes an immutable snapshot of a
//! [`Building`]; nothing here mutates after construction.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Types of building surface.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceType {
    #[default]
    ExteriorWall,
    InteriorWall,
    Roof,
    Ceiling,
    Floor,
    SlabOnGrade,
    UndergroundWall,
    UndergroundFloor,
}

/// Types of glazing assembly.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlazingType {
    #[default]
    Window,
    Skylight,
    Door,
    CurtainWall,
}

/// Space use types. Types without their own row in the default-loads table
/// fall back to the enclosed-office row.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    #[default]
    OfficeEnclosed,
    OfficeOpenPlan,
    ConferenceRoom,
    Lobby,
    Corridor,
    Restroom,
    Storage,
    Mechanical,
    Classroom,
    Auditorium,
    Retail,
    Restaurant,
    Kitchen,
    Laboratory,
    HospitalPatient,
    HospitalExam,
    Residential,
    Warehouse,
    Manufacturing,
    DataCenter,
    Custom,
}

/// What lies on the other side of a surface.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacentCondition {
    #[default]
    Outdoor,
    Ground,
    Adiabatic,
    Space,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfiltrationMethod {
    #[default]
    AirChanges,
    FlowPerArea,
    FlowPerZone,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    #[default]
    Fraction,
    Temperature,
    OnOff,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    #[default]
    Weekday,
    Weekend,
    Holiday,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    #[default]
    Vav,
    Cav,
    FanCoil,
    Ptac,
    Split,
    Vrf,
}

impl SystemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemType::Vav => "vav",
            SystemType::Cav => "cav",
            SystemType::FanCoil => "fan_coil",
            SystemType::Ptac => "ptac",
            SystemType::Split => "split",
            SystemType::Vrf => "vrf",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMethod {
    #[default]
    Coincident,
    NonCoincident,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    #[default]
    HeatBalance,
    Rts,
}

impl CalculationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMethod::HeatBalance => "heat_balance",
            CalculationMethod::Rts => "rts",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitSystem {
    #[default]
    Si,
    Ip,
}

/// Building material thermal properties.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Material {
    pub id: String,
    pub name: String,
    /// Thermal conductivity, in W/(m.K)
    pub conductivity: f64,
    /// Density, in kg/m3
    pub density: f64,
    /// Specific heat capacity, in J/(kg.K)
    pub specific_heat: f64,
    /// Layer thickness, in m
    pub thickness: f64,
    /// Surface roughness class, used for convection coefficients
    pub roughness: String,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            conductivity: 1.0,
            density: 2000.0,
            specific_heat: 1000.0,
            thickness: 0.1,
            roughness: "medium_rough".into(),
        }
    }
}

impl Material {
    /// Thermal resistance of the layer, in m2.K/W
    pub fn resistance(&self) -> f64 {
        if self.conductivity > 0.0 {
            self.thickness / self.conductivity
        } else {
            0.0
        }
    }

    /// Thermal mass per unit area, in J/(m2.K)
    pub fn thermal_mass(&self) -> f64 {
        self.density * self.specific_heat * self.thickness
    }
}

/// Multi-layer construction assembly with inside/outside air films.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Construction {
    pub id: String,
    pub name: String,
    pub layers: Vec<Material>,
    /// Inside air film resistance, in m2.K/W (vertical surface)
    pub inside_film_resistance: f64,
    /// Outside air film resistance, in m2.K/W
    pub outside_film_resistance: f64,
}

impl Default for Construction {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            layers: vec![],
            inside_film_resistance: 0.12,
            outside_film_resistance: 0.03,
        }
    }
}

impl Construction {
    /// Total R-value including air films, in m2.K/W
    pub fn total_resistance(&self) -> f64 {
        self.inside_film_resistance
            + self.outside_film_resistance
            + self.layers.iter().map(Material::resistance).sum::<f64>()
    }

    /// Overall U-value, in W/(m2.K)
    pub fn u_value(&self) -> f64 {
        let r_total = self.total_resistance();
        if r_total > 0.0 {
            1.0 / r_total
        } else {
            0.0
        }
    }

    /// Total construction thickness, in m
    pub fn total_thickness(&self) -> f64 {
        self.layers.iter().map(|layer| layer.thickness).sum()
    }
}

/// Glazing assembly properties (centre of glass plus frame).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Glazing {
    pub id: String,
    pub name: String,
    pub glazing_type: GlazingType,
    /// Centre-of-glass U-value, in W/(m2.K)
    pub u_value: f64,
    /// Solar heat gain coefficient, 0..1
    pub shgc: f64,
    /// Visible transmittance, 0..1
    pub visible_transmittance: f64,
    /// Frame U-value, in W/(m2.K)
    pub frame_u_value: f64,
    /// Frame area as a fraction of total window area, 0..1
    pub frame_fraction: f64,
    pub interior_shade_multiplier: f64,
    pub exterior_shade_multiplier: f64,
}

impl Default for Glazing {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "Double Clear".into(),
            glazing_type: GlazingType::Window,
            u_value: 2.8,
            shgc: 0.7,
            visible_transmittance: 0.75,
            frame_u_value: 3.5,
            frame_fraction: 0.15,
            interior_shade_multiplier: 1.0,
            exterior_shade_multiplier: 1.0,
        }
    }
}

impl Glazing {
    /// Area-weighted glazing + frame U-value, in W/(m2.K)
    pub fn assembly_u_value(&self) -> f64 {
        self.u_value * (1.0 - self.frame_fraction) + self.frame_u_value * self.frame_fraction
    }
}

/// A building surface: wall, roof, floor, slab.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Surface {
    pub id: String,
    pub name: String,
    pub surface_type: SurfaceType,
    /// Surface area, in m2
    pub area: f64,
    /// Azimuth in degrees, 0 = North, clockwise
    pub azimuth: f64,
    /// Tilt in degrees: 0 = horizontal facing up, 90 = vertical, 180 = facing down
    pub tilt: f64,
    pub construction: Option<Construction>,
    /// Referenced space for interior surfaces
    pub adjacent_space_id: Option<String>,
    pub adjacent_condition: AdjacentCondition,
    /// Optional explicit vertex loop, in m
    pub vertices: Vec<[f64; 3]>,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            surface_type: SurfaceType::ExteriorWall,
            area: 0.0,
            azimuth: 0.0,
            tilt: 90.0,
            construction: None,
            adjacent_space_id: None,
            adjacent_condition: AdjacentCondition::Outdoor,
            vertices: vec![],
        }
    }
}

/// A window, door or skylight hosted on a parent surface.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Fenestration {
    pub id: String,
    pub name: String,
    pub parent_surface_id: String,
    pub glazing: Option<Glazing>,
    /// Opening area, in m2
    pub area: f64,
    pub height: f64,
    pub width: f64,
    /// Sill height above floor, in m
    pub sill_height: f64,
    /// Overhang shading geometry, in m
    pub overhang_depth: f64,
    pub overhang_offset: f64,
    pub left_fin_depth: f64,
    pub right_fin_depth: f64,
}

impl Default for Fenestration {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            parent_surface_id: String::new(),
            glazing: None,
            area: 0.0,
            height: 1.5,
            width: 1.2,
            sill_height: 0.9,
            overhang_depth: 0.0,
            overhang_offset: 0.0,
            left_fin_depth: 0.0,
            right_fin_depth: 0.0,
        }
    }
}

/// Internal heat gains from people, lighting and equipment.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct InternalLoad {
    pub id: String,
    pub name: String,

    /// Absolute occupant count; when zero, `people_per_area` applies
    pub people_count: f64,
    /// Occupant density, in people/m2
    pub people_per_area: f64,
    /// Heat emission per person (sensible + latent), in W
    pub activity_level: f64,
    /// Sensible fraction of occupant heat, 0..1
    pub sensible_fraction: f64,
    /// Radiant fraction of the sensible part, 0..1
    pub radiant_fraction: f64,
    pub people_schedule_id: Option<String>,

    /// Lighting power density, in W/m2
    pub lighting_power_density: f64,
    pub lighting_radiant_fraction: f64,
    pub lighting_visible_fraction: f64,
    pub lighting_schedule_id: Option<String>,

    /// Equipment power density, in W/m2
    pub equipment_power_density: f64,
    pub equipment_radiant_fraction: f64,
    /// Fraction of equipment power released as latent heat, 0..1
    pub equipment_latent_fraction: f64,
    pub equipment_schedule_id: Option<String>,
}

impl Default for InternalLoad {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            people_count: 0.0,
            people_per_area: 0.0,
            activity_level: 120.0,
            sensible_fraction: 0.6,
            radiant_fraction: 0.3,
            people_schedule_id: None,
            lighting_power_density: 10.0,
            lighting_radiant_fraction: 0.37,
            lighting_visible_fraction: 0.18,
            lighting_schedule_id: None,
            equipment_power_density: 10.0,
            equipment_radiant_fraction: 0.3,
            equipment_latent_fraction: 0.0,
            equipment_schedule_id: None,
        }
    }
}

/// Air infiltration parameters.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Infiltration {
    pub id: String,
    pub name: String,
    pub method: InfiltrationMethod,
    /// Air changes per hour
    pub air_changes_per_hour: f64,
    /// Flow per exterior surface area, in m3/(s.m2)
    pub flow_per_exterior_area: f64,
    /// Absolute flow, in m3/s
    pub flow_per_zone: f64,
    pub schedule_id: Option<String>,
}

impl Default for Infiltration {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            method: InfiltrationMethod::AirChanges,
            air_changes_per_hour: 0.3,
            flow_per_exterior_area: 0.0003,
            flow_per_zone: 0.0,
            schedule_id: None,
        }
    }
}

/// Mechanical ventilation requirements (ASHRAE 62.1 style).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Ventilation {
    pub id: String,
    pub name: String,
    /// Outdoor air per person, in m3/(s.person)
    pub outdoor_air_per_person: f64,
    /// Outdoor air per floor area, in m3/(s.m2)
    pub outdoor_air_per_area: f64,
    /// Absolute outdoor air flow, in m3/s; when positive it overrides the
    /// per-person/per-area method
    pub total_outdoor_air: f64,
    pub schedule_id: Option<String>,
    pub heat_recovery_effectiveness: f64,
    pub sensible_effectiveness: f64,
    pub latent_effectiveness: f64,
}

impl Default for Ventilation {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            outdoor_air_per_person: 0.0025,
            outdoor_air_per_area: 0.0003,
            total_outdoor_air: 0.0,
            schedule_id: None,
            heat_recovery_effectiveness: 0.0,
            sensible_effectiveness: 0.0,
            latent_effectiveness: 0.0,
        }
    }
}

/// Hourly fraction schedule with weekday/weekend/holiday day profiles.
/// Array lengths are fixed at 24 by the type.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Schedule {
    pub id: String,
    pub name: String,
    pub schedule_type: ScheduleType,
    pub weekday_values: [f64; 24],
    pub weekend_values: [f64; 24],
    pub holiday_values: [f64; 24],
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            schedule_type: ScheduleType::Fraction,
            weekday_values: [1.0; 24],
            weekend_values: [0.5; 24],
            holiday_values: [0.0; 24],
        }
    }
}

impl Schedule {
    /// Schedule value for the given hour (wrapped modulo 24) and day type.
    pub fn value_at(&self, hour: usize, day_type: DayType) -> f64 {
        let hour = hour % 24;
        match day_type {
            DayType::Weekday => self.weekday_values[hour],
            DayType::Weekend => self.weekend_values[hour],
            DayType::Holiday => self.holiday_values[hour],
        }
    }
}

/// A room or space in the building.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Space {
    pub id: String,
    pub name: String,
    pub space_type: SpaceType,

    /// Floor area, in m2
    pub floor_area: f64,
    /// Volume, in m3
    pub volume: f64,
    /// Floor-to-ceiling height, in m
    pub height: f64,
    /// Origin of the space footprint, in m
    pub x: f64,
    pub y: f64,
    pub z: f64,

    pub surfaces: Vec<Surface>,
    pub fenestrations: Vec<Fenestration>,

    pub internal_load: Option<InternalLoad>,
    pub infiltration: Option<Infiltration>,
    pub ventilation: Option<Ventilation>,

    /// Cooling setpoint, in Celsius
    pub cooling_setpoint: f64,
    /// Heating setpoint, in Celsius
    pub heating_setpoint: f64,
    /// Humidity setpoint, in % RH
    pub humidity_setpoint: f64,

    /// Multiplier for repeated identical spaces
    pub multiplier: u32,
    pub zone_id: Option<String>,
}

impl Default for Space {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            space_type: SpaceType::OfficeEnclosed,
            floor_area: 0.0,
            volume: 0.0,
            height: 3.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            surfaces: vec![],
            fenestrations: vec![],
            internal_load: None,
            infiltration: None,
            ventilation: None,
            cooling_setpoint: 24.0,
            heating_setpoint: 21.0,
            humidity_setpoint: 50.0,
            multiplier: 1,
            zone_id: None,
        }
    }
}

/// HVAC zone grouping one or more spaces.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub space_ids: Vec<String>,

    pub cooling_setpoint: f64,
    pub heating_setpoint: f64,
    pub humidity_setpoint: f64,

    pub cooling_sizing_factor: f64,
    pub heating_sizing_factor: f64,

    pub system_id: Option<String>,
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            space_ids: vec![],
            cooling_setpoint: 24.0,
            heating_setpoint: 21.0,
            humidity_setpoint: 50.0,
            cooling_sizing_factor: 1.15,
            heating_sizing_factor: 1.25,
            system_id: None,
        }
    }
}

/// Air-handling system serving one or more zones.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct System {
    pub id: String,
    pub name: String,
    pub system_type: SystemType,
    pub zone_ids: Vec<String>,

    /// Supply air temperature in cooling, in Celsius
    pub cooling_supply_air_temp: f64,
    /// Supply air temperature in heating, in Celsius
    pub heating_supply_air_temp: f64,
    /// Relative humidity at the cooling coil, in % RH
    pub supply_air_humidity: f64,

    pub fan_efficiency: f64,
    /// Fan total pressure rise, in Pa
    pub fan_pressure_rise: f64,
    pub fan_motor_efficiency: f64,
    pub fan_motor_in_airstream: bool,

    pub sizing_method: SizingMethod,
    pub cooling_sizing_factor: f64,
    pub heating_sizing_factor: f64,

    pub plant_loop_id: Option<String>,
}

impl Default for System {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            system_type: SystemType::Vav,
            zone_ids: vec![],
            cooling_supply_air_temp: 13.0,
            heating_supply_air_temp: 35.0,
            supply_air_humidity: 90.0,
            fan_efficiency: 0.7,
            fan_pressure_rise: 1000.0,
            fan_motor_efficiency: 0.9,
            fan_motor_in_airstream: true,
            sizing_method: SizingMethod::Coincident,
            cooling_sizing_factor: 1.1,
            heating_sizing_factor: 1.1,
            plant_loop_id: None,
        }
    }
}

/// Central plant equipment serving one or more systems.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub plant_type: String,
    pub system_ids: Vec<String>,

    pub chiller_type: String,
    pub chiller_cop: f64,
    /// Chilled water supply temperature, in Celsius
    pub chilled_water_temp: f64,

    pub boiler_type: String,
    pub boiler_efficiency: f64,
    /// Hot water supply temperature, in Celsius
    pub hot_water_temp: f64,

    pub tower_type: String,
    /// Cooling tower approach, in K
    pub tower_approach: f64,

    /// Pump heads, in kPa
    pub chw_pump_head: f64,
    pub hw_pump_head: f64,
    pub cw_pump_head: f64,
    pub pump_efficiency: f64,

    pub cooling_sizing_factor: f64,
    pub heating_sizing_factor: f64,
}

impl Default for Plant {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            plant_type: "chiller_boiler".into(),
            system_ids: vec![],
            chiller_type: "water_cooled_centrifugal".into(),
            chiller_cop: 6.0,
            chilled_water_temp: 7.0,
            boiler_type: "hot_water".into(),
            boiler_efficiency: 0.85,
            hot_water_temp: 82.0,
            tower_type: "open".into(),
            tower_approach: 4.0,
            chw_pump_head: 150.0,
            hw_pump_head: 100.0,
            cw_pump_head: 200.0,
            pump_efficiency: 0.7,
            cooling_sizing_factor: 1.1,
            heating_sizing_factor: 1.1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignDayType {
    #[default]
    Cooling,
    Heating,
}

/// Design day weather conditions (ASHRAE climatic design data).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DesignDay {
    pub id: String,
    pub name: String,
    pub day_type: DesignDayType,

    pub month: u32,
    pub day: u32,

    /// Maximum dry-bulb temperature, in Celsius
    pub dry_bulb_max: f64,
    /// Minimum dry-bulb temperature, in Celsius
    pub dry_bulb_min: f64,
    /// Daily dry-bulb range, in K
    pub daily_range: f64,

    /// Wet-bulb temperature coincident with the dry-bulb maximum, in Celsius
    pub wet_bulb_coincident: f64,
    pub humidity_type: String,
    pub humidity_value: f64,

    /// Sky clearness multiplier for the solar model
    pub clearness: f64,
    pub solar_model: String,

    /// Wind speed, in m/s
    pub wind_speed: f64,
    /// Wind direction, in degrees from North
    pub wind_direction: f64,

    /// Barometric pressure, in Pa
    pub barometric_pressure: f64,
}

impl Default for DesignDay {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            day_type: DesignDayType::Cooling,
            month: 7,
            day: 21,
            dry_bulb_max: 35.0,
            dry_bulb_min: 24.0,
            daily_range: 11.0,
            wet_bulb_coincident: 24.0,
            humidity_type: "wet_bulb".into(),
            humidity_value: 24.0,
            clearness: 1.0,
            solar_model: "ashrae_clear_sky".into(),
            wind_speed: 4.0,
            wind_direction: 270.0,
            barometric_pressure: 101_325.0,
        }
    }
}

/// Location and climatic design data for load calculations.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherData {
    pub id: String,
    pub name: String,

    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation above sea level, in m
    pub elevation: f64,
    /// Offset from UTC, in hours
    pub timezone: f64,

    pub cooling_design_days: Vec<DesignDay>,
    pub heating_design_days: Vec<DesignDay>,

    /// Monthly mean dry-bulb temperatures, in Celsius
    pub monthly_dry_bulb_mean: [f64; 12],
    /// Monthly ground temperatures, in Celsius
    pub monthly_ground_temp: [f64; 12],

    /// 0.4% annual cooling design dry-bulb, in Celsius
    pub cooling_db_004: f64,
    /// 0.4% annual cooling design wet-bulb, in Celsius
    pub cooling_wb_004: f64,
    /// 0.4% annual cooling design dew-point, in Celsius
    pub cooling_dp_004: f64,
    /// 99.6% annual heating design dry-bulb, in Celsius
    pub heating_db_996: f64,
    /// 99.6% annual heating design wind speed, in m/s
    pub heating_wind_996: f64,
}

impl Default for WeatherData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            elevation: 0.0,
            timezone: 0.0,
            cooling_design_days: vec![],
            heating_design_days: vec![],
            monthly_dry_bulb_mean: [20.0; 12],
            monthly_ground_temp: [15.0; 12],
            cooling_db_004: 35.0,
            cooling_wb_004: 24.0,
            cooling_dp_004: 22.0,
            heating_db_996: -15.0,
            heating_wind_996: 5.0,
        }
    }
}

/// Complete building model: spaces with their zone/system/plant hierarchy
/// plus construction, glazing and schedule libraries.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub building_type: String,

    pub address: String,
    pub weather_data: Option<WeatherData>,
    /// Rotation from true North, in degrees
    pub orientation: f64,

    pub spaces: Vec<Space>,
    pub zones: Vec<Zone>,
    pub systems: Vec<System>,
    pub plants: Vec<Plant>,

    pub constructions: IndexMap<String, Construction>,
    pub glazings: IndexMap<String, Glazing>,
    pub schedules: IndexMap<String, Schedule>,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            building_type: "office".into(),
            address: String::new(),
            weather_data: None,
            orientation: 0.0,
            spaces: vec![],
            zones: vec![],
            systems: vec![],
            plants: vec![],
            constructions: IndexMap::new(),
            glazings: IndexMap::new(),
            schedules: IndexMap::new(),
        }
    }
}

impl Building {
    /// Total conditioned floor area, in m2
    pub fn total_floor_area(&self) -> f64 {
        self.spaces
            .iter()
            .map(|s| s.floor_area * s.multiplier as f64)
            .sum()
    }

    /// Total conditioned volume, in m3
    pub fn total_volume(&self) -> f64 {
        self.spaces
            .iter()
            .map(|s| s.volume * s.multiplier as f64)
            .sum()
    }

    /// Check the structural invariants of the model. Hard violations return a
    /// [`ModelError`]; soft findings (volume inconsistent with area x height)
    /// are returned as warning strings for the result's warnings list.
    pub fn validate(&self) -> Result<Vec<String>, ModelError> {
        let mut warnings: Vec<String> = vec![];

        for space in &self.spaces {
            if space.floor_area < 0.0 {
                return Err(ModelError::NegativeQuantity {
                    space_id: space.id.clone(),
                    quantity: "floor area",
                    value: space.floor_area,
                });
            }
            if space.volume < 0.0 {
                return Err(ModelError::NegativeQuantity {
                    space_id: space.id.clone(),
                    quantity: "volume",
                    value: space.volume,
                });
            }
            if space.heating_setpoint > space.cooling_setpoint {
                return Err(ModelError::SetpointsInverted {
                    space_id: space.id.clone(),
                    heating: space.heating_setpoint,
                    cooling: space.cooling_setpoint,
                });
            }
            for surface in &space.surfaces {
                if surface.area < 0.0 {
                    return Err(ModelError::NegativeSurfaceArea {
                        surface_id: surface.id.clone(),
                        area: surface.area,
                    });
                }
                if let Some(construction) = &surface.construction {
                    let resistance = construction.total_resistance();
                    if resistance <= 0.0 {
                        return Err(ModelError::NonPositiveResistance {
                            construction_id: construction.id.clone(),
                            resistance,
                        });
                    }
                }
            }
            if space.volume > 0.0
                && space.floor_area > 0.0
                && !is_close!(
                    space.volume,
                    space.floor_area * space.height,
                    rel_tol = 0.05
                )
            {
                warnings.push(format!(
                    "space '{}': volume {:.2} m3 is inconsistent with floor area x height ({:.2} m3)",
                    space.id,
                    space.volume,
                    space.floor_area * space.height,
                ));
            }
        }

        for construction in self.constructions.values() {
            let resistance = construction.total_resistance();
            if resistance <= 0.0 {
                return Err(ModelError::NonPositiveResistance {
                    construction_id: construction.id.clone(),
                    resistance,
                });
            }
        }

        for zone in &self.zones {
            for space_id in &zone.space_ids {
                if !self.spaces.iter().any(|s| &s.id == space_id) {
                    return Err(ModelError::DanglingReference {
                        referrer: "zone",
                        referrer_id: zone.id.clone(),
                        referent: "space",
                        referent_id: space_id.clone(),
                    });
                }
            }
        }
        for system in &self.systems {
            for zone_id in &system.zone_ids {
                if !self.zones.iter().any(|z| &z.id == zone_id) {
                    return Err(ModelError::DanglingReference {
                        referrer: "system",
                        referrer_id: system.id.clone(),
                        referent: "zone",
                        referent_id: zone_id.clone(),
                    });
                }
            }
        }
        for plant in &self.plants {
            for system_id in &plant.system_ids {
                if !self.systems.iter().any(|s| &s.id == system_id) {
                    return Err(ModelError::DanglingReference {
                        referrer: "plant",
                        referrer_id: plant.id.clone(),
                        referent: "system",
                        referent_id: system_id.clone(),
                    });
                }
            }
        }

        Ok(warnings)
    }
}

/// Top-level project: a building plus calculation settings and metadata.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub client: String,
    pub engineer: String,
    pub project_number: String,

    pub building: Option<Building>,

    pub calculation_method: CalculationMethod,
    pub timestep_minutes: u32,
    pub unit_system: UnitSystem,

    /// Safety factors carried on the project record; applied by report
    /// tooling, not by the calculator itself.
    pub cooling_safety_factor: f64,
    pub heating_safety_factor: f64,

    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            client: String::new(),
            engineer: String::new(),
            project_number: String::new(),
            building: None,
            calculation_method: CalculationMethod::HeatBalance,
            timestep_minutes: 60,
            unit_system: UnitSystem::Si,
            cooling_safety_factor: 1.1,
            heating_safety_factor: 1.1,
            created_at: None,
            modified_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn brick_wall() -> Construction {
        Construction {
            id: "con-brick".into(),
            name: "Brick cavity wall".into(),
            layers: vec![
                Material {
                    id: "mat-brick".into(),
                    name: "Brick".into(),
                    conductivity: 0.77,
                    density: 1700.0,
                    specific_heat: 800.0,
                    thickness: 0.102,
                    ..Default::default()
                },
                Material {
                    id: "mat-ins".into(),
                    name: "Mineral wool".into(),
                    conductivity: 0.038,
                    density: 25.0,
                    specific_heat: 1030.0,
                    thickness: 0.1,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[rstest]
    fn material_resistance_and_mass() {
        let mat = Material {
            conductivity: 0.5,
            density: 1200.0,
            specific_heat: 900.0,
            thickness: 0.2,
            ..Default::default()
        };
        assert_relative_eq!(mat.resistance(), 0.4);
        assert_relative_eq!(mat.thermal_mass(), 1200.0 * 900.0 * 0.2);

        let degenerate = Material {
            conductivity: 0.0,
            ..Default::default()
        };
        assert_eq!(degenerate.resistance(), 0.0);
    }

    #[rstest]
    fn construction_u_value_is_reciprocal_of_resistance(brick_wall: Construction) {
        let r = brick_wall.total_resistance();
        assert!(r > 0.0);
        assert_relative_eq!(brick_wall.u_value() * r, 1.0, epsilon = 1e-9);
        assert_relative_eq!(brick_wall.total_thickness(), 0.202);
    }

    #[rstest]
    fn glazing_assembly_u_value_weights_frame() {
        let glazing = Glazing::default();
        assert_relative_eq!(glazing.assembly_u_value(), 2.8 * 0.85 + 3.5 * 0.15);
    }

    #[rstest]
    fn schedule_lookup_wraps_hours_and_selects_day_type() {
        let schedule = Schedule {
            weekday_values: std::array::from_fn(|h| h as f64 / 24.0),
            ..Default::default()
        };
        assert_relative_eq!(
            schedule.value_at(25, DayType::Weekday),
            schedule.value_at(1, DayType::Weekday)
        );
        assert_relative_eq!(schedule.value_at(3, DayType::Weekend), 0.5);
        assert_relative_eq!(schedule.value_at(3, DayType::Holiday), 0.0);
    }

    #[fixture]
    fn simple_building() -> Building {
        Building {
            id: "bldg-1".into(),
            name: "Test".into(),
            spaces: vec![Space {
                id: "space-1".into(),
                name: "Office".into(),
                floor_area: 100.0,
                volume: 300.0,
                height: 3.0,
                ..Default::default()
            }],
            zones: vec![Zone {
                id: "zone-1".into(),
                space_ids: vec!["space-1".into()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[rstest]
    fn valid_building_passes_validation(simple_building: Building) {
        assert!(simple_building.validate().unwrap().is_empty());
    }

    #[rstest]
    fn dangling_zone_reference_is_rejected(mut simple_building: Building) {
        simple_building.zones[0].space_ids.push("space-404".into());
        assert!(matches!(
            simple_building.validate(),
            Err(ModelError::DanglingReference { .. })
        ));
    }

    #[rstest]
    fn inverted_setpoints_are_rejected(mut simple_building: Building) {
        simple_building.spaces[0].heating_setpoint = 26.0;
        simple_building.spaces[0].cooling_setpoint = 24.0;
        assert!(matches!(
            simple_building.validate(),
            Err(ModelError::SetpointsInverted { .. })
        ));
    }

    #[rstest]
    fn inconsistent_volume_is_a_warning_not_an_error(mut simple_building: Building) {
        simple_building.spaces[0].volume = 500.0;
        let warnings = simple_building.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("inconsistent"));
    }

    #[rstest]
    fn building_totals_respect_multipliers(mut simple_building: Building) {
        simple_building.spaces[0].multiplier = 3;
        assert_relative_eq!(simple_building.total_floor_area(), 300.0);
        assert_relative_eq!(simple_building.total_volume(), 900.0);
    }

    #[rstest]
    fn project_round_trips_through_json(simple_building: Building) {
        let project = Project {
            id: "proj-1".into(),
            name: "HQ refit".into(),
            building: Some(simple_building),
            ..Default::default()
        };
        let json = serde_json::to_string(&project).unwrap();
        let parsed: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "proj-1");
        assert_eq!(parsed.building.unwrap().spaces.len(), 1);
    }
}
