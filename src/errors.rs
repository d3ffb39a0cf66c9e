use thiserror::Error;

/// Failures raised while validating a building model or running the load
/// calculation. No partial result is returned alongside any of these.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("project has no building defined")]
    MissingBuilding,
    #[error("building has no spaces, nothing to calculate")]
    EmptyModel,
    #[error("space '{space_id}': {quantity} is negative ({value})")]
    NegativeQuantity {
        space_id: String,
        quantity: &'static str,
        value: f64,
    },
    #[error("surface '{surface_id}' has negative area ({area})")]
    NegativeSurfaceArea { surface_id: String, area: f64 },
    #[error("construction '{construction_id}' has non-positive total resistance ({resistance})")]
    NonPositiveResistance {
        construction_id: String,
        resistance: f64,
    },
    #[error("space '{space_id}': heating setpoint {heating} exceeds cooling setpoint {cooling}")]
    SetpointsInverted {
        space_id: String,
        heating: f64,
        cooling: f64,
    },
    #[error("{referrer} '{referrer_id}' references unknown {referent} '{referent_id}'")]
    DanglingReference {
        referrer: &'static str,
        referrer_id: String,
        referent: &'static str,
        referent_id: String,
    },
}

/// Failures raised by the floorplan geometry extractor.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not decode image data: {0}")]
    InvalidInput(String),
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}
