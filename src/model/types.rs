use chrono::NaiveDateTime;
use serde_derive::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Keys of a [`Reading`].
///
/// The set is fixed; a reading holds a subset of these depending on which
/// products the agreement covers and which values the portal returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementName {
    /// Electricity meter, high tariff consumption (kWh)
    EnergyConsumptionHigh,
    /// Electricity meter, low tariff consumption (kWh)
    EnergyConsumptionLow,
    EnergyConsumptionTotal,
    /// Electricity meter, high tariff return (kWh)
    EnergyReturnHigh,
    /// Electricity meter, low tariff return (kWh)
    EnergyReturnLow,
    EnergyReturnTotal,
    EnergyMeasurementDate,
    /// Gas meter (m³)
    GasConsumption,
    GasMeasurementDate,
    PriceEnergyConsumptionHigh,
    PriceEnergyConsumptionLow,
    PriceEnergyReturnHigh,
    PriceEnergyReturnLow,
    /// Compensation paid for returned electricity
    PriceEnergyFeedIn,
    PriceGasConsumption,
    CostEnergyYearly,
    CostGasYearly,
    CostTotalYearly,
}

impl fmt::Display for MeasurementName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MeasurementName::EnergyConsumptionHigh => write!(f, "energy_consumption_high"),
            MeasurementName::EnergyConsumptionLow => write!(f, "energy_consumption_low"),
            MeasurementName::EnergyConsumptionTotal => write!(f, "energy_consumption_total"),
            MeasurementName::EnergyReturnHigh => write!(f, "energy_return_high"),
            MeasurementName::EnergyReturnLow => write!(f, "energy_return_low"),
            MeasurementName::EnergyReturnTotal => write!(f, "energy_return_total"),
            MeasurementName::EnergyMeasurementDate => write!(f, "energy_measurement_date"),
            MeasurementName::GasConsumption => write!(f, "gas_consumption"),
            MeasurementName::GasMeasurementDate => write!(f, "gas_measurement_date"),
            MeasurementName::PriceEnergyConsumptionHigh => {
                write!(f, "price_energy_consumption_high")
            }
            MeasurementName::PriceEnergyConsumptionLow => write!(f, "price_energy_consumption_low"),
            MeasurementName::PriceEnergyReturnHigh => write!(f, "price_energy_return_high"),
            MeasurementName::PriceEnergyReturnLow => write!(f, "price_energy_return_low"),
            MeasurementName::PriceEnergyFeedIn => write!(f, "price_energy_feed_in"),
            MeasurementName::PriceGasConsumption => write!(f, "price_gas_consumption"),
            MeasurementName::CostEnergyYearly => write!(f, "cost_energy_yearly"),
            MeasurementName::CostGasYearly => write!(f, "cost_gas_yearly"),
            MeasurementName::CostTotalYearly => write!(f, "cost_total_yearly"),
        }
    }
}

/// Value of a single measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Number(f64),
    Timestamp(NaiveDateTime),
}

impl MeasurementValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MeasurementValue::Number(value) => Some(*value),
            MeasurementValue::Timestamp(_) => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            MeasurementValue::Timestamp(value) => Some(*value),
            MeasurementValue::Number(_) => None,
        }
    }
}

impl From<f64> for MeasurementValue {
    fn from(value: f64) -> Self {
        MeasurementValue::Number(value)
    }
}

impl From<NaiveDateTime> for MeasurementValue {
    fn from(value: NaiveDateTime) -> Self {
        MeasurementValue::Timestamp(value)
    }
}

/// Flat, ordered view of one product's measurements. Absent values have no
/// entry.
pub type Reading = BTreeMap<MeasurementName, MeasurementValue>;

/// Inserts `value` under `name` when present.
pub(crate) fn insert_present<V: Into<MeasurementValue>>(
    reading: &mut Reading,
    name: MeasurementName,
    value: Option<V>,
) {
    if let Some(value) = value {
        reading.insert(name, value.into());
    }
}
