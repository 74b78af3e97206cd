use crate::error::DecodeError;
use crate::model::{ElectricityReading, GasReading};
use crate::portal::microbus::METER_READINGS_CALL;
use crate::portal::parsers::{decode_json, parse_timestamp};
use chrono::NaiveDateTime;
use serde_derive::Deserialize;

const ELECTRICITY_PRODUCT: usize = 0;
const GAS_PRODUCT: usize = 1;

const REGISTER_CONSUMPTION_HIGH: i64 = 1;
const REGISTER_CONSUMPTION_LOW: i64 = 2;
const REGISTER_RETURN_HIGH: i64 = 3;
const REGISTER_RETURN_LOW: i64 = 4;
const REGISTER_GAS: i64 = 5;

#[derive(Deserialize, Debug)]
struct MeterReadingsPayload {
    model: MeterReadingsModel,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MeterReadingsModel {
    heeft_stroom: bool,
    heeft_gas: bool,
    #[serde(default)]
    producten_opnames_model: Vec<ProductPayload>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProductPayload {
    #[serde(default)]
    opnames_jaar_maand_model: Vec<MonthPayload>,
}

#[derive(Deserialize, Debug)]
struct MonthPayload {
    jaar: i32,
    maand: u32,
    #[serde(default)]
    opnames: Vec<EntryPayload>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct EntryPayload {
    opname_datum: String,
    #[serde(default)]
    standen: Vec<RegisterValue>,
}

/// One meter register value ("stand").
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RegisterValue {
    /// Register code ("telwerk")
    pub telwerk: i64,
    pub waarde: Option<f64>,
}

/// One dated meter reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingEntry {
    pub timestamp: NaiveDateTime,
    pub registers: Vec<RegisterValue>,
}

impl ReadingEntry {
    /// Value of a register; a code listed twice resolves to its last listing.
    fn register(&self, code: i64) -> Option<f64> {
        self.registers
            .iter()
            .rev()
            .find(|register| register.telwerk == code)
            .and_then(|register| register.waarde)
    }
}

/// Readings of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<ReadingEntry>,
}

impl TryFrom<MonthPayload> for MonthBucket {
    type Error = DecodeError;

    fn try_from(payload: MonthPayload) -> Result<Self, Self::Error> {
        let entries = payload
            .opnames
            .into_iter()
            .map(|entry| {
                Ok(ReadingEntry {
                    timestamp: parse_timestamp(&entry.opname_datum)?,
                    registers: entry.standen,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(Self {
            year: payload.jaar,
            month: payload.maand,
            entries,
        })
    }
}

/// Latest meter state per product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeterReadings {
    pub electricity: Option<ElectricityReading>,
    pub gas: Option<GasReading>,
}

/// Picks the latest entry of the latest month that has any entries.
///
/// Months are ordered by (year, month), entries by timestamp. On ties the
/// element that comes last in source order wins.
pub fn select_latest_entry(buckets: &[MonthBucket]) -> Option<&ReadingEntry> {
    buckets
        .iter()
        .filter(|bucket| !bucket.entries.is_empty())
        .max_by_key(|bucket| (bucket.year, bucket.month))?
        .entries
        .iter()
        .max_by_key(|entry| entry.timestamp)
}

fn product_buckets(
    products: &mut [ProductPayload],
    index: usize,
) -> Result<Vec<MonthBucket>, DecodeError> {
    let product = products
        .get_mut(index)
        .ok_or(DecodeError::MissingProduct { index })?;
    std::mem::take(&mut product.opnames_jaar_maand_model)
        .into_iter()
        .map(MonthBucket::try_from)
        .collect()
}

fn electricity_reading(entry: &ReadingEntry) -> ElectricityReading {
    ElectricityReading {
        consumption_high: entry.register(REGISTER_CONSUMPTION_HIGH),
        consumption_low: entry.register(REGISTER_CONSUMPTION_LOW),
        return_high: entry.register(REGISTER_RETURN_HIGH),
        return_low: entry.register(REGISTER_RETURN_LOW),
        measurement_date: Some(entry.timestamp),
    }
}

fn gas_reading(entry: &ReadingEntry) -> GasReading {
    GasReading {
        consumption: entry.register(REGISTER_GAS),
        measurement_date: Some(entry.timestamp),
    }
}

/// Decodes an `OpnamesOphalen` response.
///
/// Products the agreement isn't flagged for are left out. A flagged product
/// without any dated reading is left out as well, with an error logged.
pub fn parse_meter_readings(body: &str) -> Result<MeterReadings, DecodeError> {
    let payload: MeterReadingsPayload = decode_json(METER_READINGS_CALL, body)?;
    let mut model = payload.model;
    let mut readings = MeterReadings::default();

    if model.heeft_stroom {
        let buckets = product_buckets(&mut model.producten_opnames_model, ELECTRICITY_PRODUCT)?;
        match select_latest_entry(&buckets) {
            Some(entry) => readings.electricity = Some(electricity_reading(entry)),
            None => tracing::error!("No current values for electricity found"),
        }
    } else {
        tracing::info!("Not parsing electricity meter, contract doesn't have electricity");
    }

    if model.heeft_gas {
        let buckets = product_buckets(&mut model.producten_opnames_model, GAS_PRODUCT)?;
        match select_latest_entry(&buckets) {
            Some(entry) => readings.gas = Some(gas_reading(entry)),
            None => tracing::error!("No current values for gas found"),
        }
    } else {
        tracing::info!("Not parsing gas meter, contract doesn't have gas");
    }

    Ok(readings)
}
