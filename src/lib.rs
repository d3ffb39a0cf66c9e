//! Design-day heating and cooling load calculation for buildings, with
//! floorplan geometry extraction and building-energy-model export.
//!
//! Two independent engines share only the convention that a room is an
//! axis-aligned box with a floor polygon and a height:
//!
//! - [`core`]: the heat-balance load calculator. Feed it a [`model::Project`]
//!   and it produces sized capacities and 24-hour design-day profiles at
//!   space, zone, system and plant level.
//! - [`geometry`]: the floorplan extractor and the gbXML / OBJ writers.
//!
//! Both engines are synchronous, single-threaded and pure: identical inputs
//! produce identical outputs, byte for byte.

pub mod core;
pub mod errors;
pub mod geometry;
pub mod model;
pub mod results;

#[macro_use]
extern crate is_close;

pub use crate::core::calculator::LoadCalculator;
pub use crate::core::space_loads::CalculationSettings;
pub use crate::errors::{ExtractionError, ModelError};
pub use crate::geometry::extractor::{ExtractionParams, GeometryExtractor};
