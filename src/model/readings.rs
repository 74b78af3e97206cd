use crate::model::traits::IntoReading;
use crate::model::types::{insert_present, MeasurementName, Reading};
use chrono::NaiveDateTime;
use serde_derive::Serialize;

fn sum_present(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? + b?)
}

/// Latest electricity meter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElectricityReading {
    pub consumption_high: Option<f64>,
    pub consumption_low: Option<f64>,
    pub return_high: Option<f64>,
    pub return_low: Option<f64>,
    pub measurement_date: Option<NaiveDateTime>,
}

impl ElectricityReading {
    /// High plus low consumption, when both registers were read.
    pub fn consumption_total(&self) -> Option<f64> {
        sum_present(self.consumption_high, self.consumption_low)
    }

    /// High plus low return, when both registers were read.
    pub fn return_total(&self) -> Option<f64> {
        sum_present(self.return_high, self.return_low)
    }
}

impl IntoReading for ElectricityReading {
    fn to_reading(&self) -> Reading {
        let mut reading = Reading::new();
        insert_present(&mut reading, MeasurementName::EnergyConsumptionHigh, self.consumption_high);
        insert_present(&mut reading, MeasurementName::EnergyConsumptionLow, self.consumption_low);
        insert_present(
            &mut reading,
            MeasurementName::EnergyConsumptionTotal,
            self.consumption_total(),
        );
        insert_present(&mut reading, MeasurementName::EnergyReturnHigh, self.return_high);
        insert_present(&mut reading, MeasurementName::EnergyReturnLow, self.return_low);
        insert_present(&mut reading, MeasurementName::EnergyReturnTotal, self.return_total());
        insert_present(&mut reading, MeasurementName::EnergyMeasurementDate, self.measurement_date);
        reading
    }
}

/// Latest gas meter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GasReading {
    pub consumption: Option<f64>,
    pub measurement_date: Option<NaiveDateTime>,
}

impl IntoReading for GasReading {
    fn to_reading(&self) -> Reading {
        let mut reading = Reading::new();
        insert_present(&mut reading, MeasurementName::GasConsumption, self.consumption);
        insert_present(&mut reading, MeasurementName::GasMeasurementDate, self.measurement_date);
        reading
    }
}

/// All-in tariffs and yearly cost estimates of an agreement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TariffReading {
    pub energy_consumption_high: Option<f64>,
    pub energy_consumption_low: Option<f64>,
    pub energy_return_high: Option<f64>,
    pub energy_return_low: Option<f64>,
    pub energy_feed_in: Option<f64>,
    pub gas_consumption: Option<f64>,
    pub energy_yearly_cost: Option<f64>,
    pub gas_yearly_cost: Option<f64>,
}

impl TariffReading {
    /// Electricity plus gas yearly cost, when both are known.
    pub fn total_yearly_cost(&self) -> Option<f64> {
        sum_present(self.energy_yearly_cost, self.gas_yearly_cost)
    }
}

impl IntoReading for TariffReading {
    fn to_reading(&self) -> Reading {
        let mut reading = Reading::new();
        insert_present(
            &mut reading,
            MeasurementName::PriceEnergyConsumptionHigh,
            self.energy_consumption_high,
        );
        insert_present(
            &mut reading,
            MeasurementName::PriceEnergyConsumptionLow,
            self.energy_consumption_low,
        );
        insert_present(
            &mut reading,
            MeasurementName::PriceEnergyReturnHigh,
            self.energy_return_high,
        );
        insert_present(&mut reading, MeasurementName::PriceEnergyReturnLow, self.energy_return_low);
        insert_present(&mut reading, MeasurementName::PriceEnergyFeedIn, self.energy_feed_in);
        insert_present(&mut reading, MeasurementName::PriceGasConsumption, self.gas_consumption);
        insert_present(&mut reading, MeasurementName::CostEnergyYearly, self.energy_yearly_cost);
        insert_present(&mut reading, MeasurementName::CostGasYearly, self.gas_yearly_cost);
        insert_present(&mut reading, MeasurementName::CostTotalYearly, self.total_yearly_cost());
        reading
    }
}

/// Outcome of one successful retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalResult {
    /// Absent when the agreement has no electricity or no reading was found
    pub electricity: Option<ElectricityReading>,
    /// Absent when the agreement has no gas or no reading was found
    pub gas: Option<GasReading>,
    pub tariffs: TariffReading,
}

/// Flattened JSON form: each sub-set as its [`Reading`], computed totals
/// included.
impl serde::Serialize for RetrievalResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("RetrievalResult", 3)?;
        state.serialize_field(
            "electricity",
            &self.electricity.as_ref().map(IntoReading::to_reading),
        )?;
        state.serialize_field("gas", &self.gas.as_ref().map(IntoReading::to_reading))?;
        state.serialize_field("tariffs", &self.tariffs.to_reading())?;
        state.end()
    }
}
