//! Built-in default tables: per-space-type internal load intensities and
//! fallback weather/design-day records.
//!
//! The intensity table is part of the output contract; peak results for
//! spaces without an explicit [`crate::model::InternalLoad`] depend on it
//! verbatim.

use crate::model::{DesignDay, DesignDayType, SpaceType, WeatherData};

/// Default internal load intensities, all in W/m2 of floor area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefaultLoadIntensities {
    pub people_sensible: f64,
    pub people_latent: f64,
    pub lighting: f64,
    pub equipment: f64,
}

const OFFICE_ENCLOSED_ROW: DefaultLoadIntensities = DefaultLoadIntensities {
    people_sensible: 5.0,
    people_latent: 3.5,
    lighting: 10.0,
    equipment: 10.0,
};

/// Default internal loads for a space type. Types without their own row use
/// the enclosed-office row.
pub fn default_internal_loads(space_type: SpaceType) -> DefaultLoadIntensities {
    match space_type {
        SpaceType::OfficeEnclosed => OFFICE_ENCLOSED_ROW,
        SpaceType::OfficeOpenPlan => DefaultLoadIntensities {
            people_sensible: 6.0,
            people_latent: 4.0,
            lighting: 12.0,
            equipment: 12.0,
        },
        SpaceType::ConferenceRoom => DefaultLoadIntensities {
            people_sensible: 25.0,
            people_latent: 18.0,
            lighting: 15.0,
            equipment: 5.0,
        },
        SpaceType::Lobby => DefaultLoadIntensities {
            people_sensible: 3.0,
            people_latent: 2.0,
            lighting: 10.0,
            equipment: 2.0,
        },
        SpaceType::Corridor => DefaultLoadIntensities {
            people_sensible: 1.0,
            people_latent: 0.7,
            lighting: 5.0,
            equipment: 0.0,
        },
        SpaceType::Restroom => DefaultLoadIntensities {
            people_sensible: 3.0,
            people_latent: 5.0,
            lighting: 8.0,
            equipment: 2.0,
        },
        SpaceType::Storage => DefaultLoadIntensities {
            people_sensible: 0.5,
            people_latent: 0.3,
            lighting: 5.0,
            equipment: 0.0,
        },
        SpaceType::Classroom => DefaultLoadIntensities {
            people_sensible: 20.0,
            people_latent: 14.0,
            lighting: 12.0,
            equipment: 5.0,
        },
        SpaceType::Retail => DefaultLoadIntensities {
            people_sensible: 8.0,
            people_latent: 5.5,
            lighting: 15.0,
            equipment: 5.0,
        },
        SpaceType::Restaurant => DefaultLoadIntensities {
            people_sensible: 15.0,
            people_latent: 10.0,
            lighting: 12.0,
            equipment: 20.0,
        },
        SpaceType::DataCenter => DefaultLoadIntensities {
            people_sensible: 1.0,
            people_latent: 0.5,
            lighting: 5.0,
            equipment: 500.0,
        },
        _ => OFFICE_ENCLOSED_ROW,
    }
}

/// Fallback weather record used when a building carries none.
pub fn default_weather() -> WeatherData {
    WeatherData {
        name: "Default".into(),
        city: "Default City".into(),
        latitude: 40.0,
        longitude: -100.0,
        elevation: 200.0,
        cooling_db_004: 35.0,
        cooling_wb_004: 24.0,
        heating_db_996: -15.0,
        ..Default::default()
    }
}

pub fn default_cooling_design_day() -> DesignDay {
    DesignDay {
        name: "Summer Design Day".into(),
        day_type: DesignDayType::Cooling,
        month: 7,
        day: 21,
        dry_bulb_max: 35.0,
        daily_range: 11.0,
        wet_bulb_coincident: 24.0,
        ..Default::default()
    }
}

pub fn default_heating_design_day() -> DesignDay {
    DesignDay {
        name: "Winter Design Day".into(),
        day_type: DesignDayType::Heating,
        month: 1,
        day: 21,
        dry_bulb_max: -15.0,
        daily_range: 0.0,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    // Contract rows, asserted verbatim.
    #[case(SpaceType::OfficeEnclosed, 5.0, 3.5, 10.0, 10.0)]
    #[case(SpaceType::OfficeOpenPlan, 6.0, 4.0, 12.0, 12.0)]
    #[case(SpaceType::ConferenceRoom, 25.0, 18.0, 15.0, 5.0)]
    #[case(SpaceType::Lobby, 3.0, 2.0, 10.0, 2.0)]
    #[case(SpaceType::Corridor, 1.0, 0.7, 5.0, 0.0)]
    #[case(SpaceType::Restroom, 3.0, 5.0, 8.0, 2.0)]
    #[case(SpaceType::Storage, 0.5, 0.3, 5.0, 0.0)]
    #[case(SpaceType::Classroom, 20.0, 14.0, 12.0, 5.0)]
    #[case(SpaceType::Retail, 8.0, 5.5, 15.0, 5.0)]
    #[case(SpaceType::Restaurant, 15.0, 10.0, 12.0, 20.0)]
    #[case(SpaceType::DataCenter, 1.0, 0.5, 5.0, 500.0)]
    fn default_load_table_rows(
        #[case] space_type: SpaceType,
        #[case] people_sensible: f64,
        #[case] people_latent: f64,
        #[case] lighting: f64,
        #[case] equipment: f64,
    ) {
        let row = default_internal_loads(space_type);
        assert_eq!(row.people_sensible, people_sensible);
        assert_eq!(row.people_latent, people_latent);
        assert_eq!(row.lighting, lighting);
        assert_eq!(row.equipment, equipment);
    }

    #[rstest]
    #[case(SpaceType::Mechanical)]
    #[case(SpaceType::Warehouse)]
    #[case(SpaceType::Custom)]
    fn unlisted_types_fall_back_to_enclosed_office(#[case] space_type: SpaceType) {
        assert_eq!(default_internal_loads(space_type), OFFICE_ENCLOSED_ROW);
    }

    #[rstest]
    fn default_design_days_bracket_the_year() {
        let cooling = default_cooling_design_day();
        let heating = default_heating_design_day();
        assert_eq!(cooling.month, 7);
        assert_eq!(cooling.daily_range, 11.0);
        assert_eq!(heating.month, 1);
        assert_eq!(heating.daily_range, 0.0);
        assert_eq!(heating.dry_bulb_max, -15.0);
    }
}
