//! Typed reading model for the Greenchoice portal.
//!
//! Readings come in per-product sub-sets with one optional value per field.
//! Each sub-set flattens into a [`Reading`] keyed by [`MeasurementName`].

pub mod agreement;
pub mod readings;
pub mod traits;
pub mod types;

pub use agreement::Agreement;
pub use readings::{ElectricityReading, GasReading, RetrievalResult, TariffReading};
pub use traits::{IntoReading, ReadingSource};
pub use types::{MeasurementName, MeasurementValue, Reading};
