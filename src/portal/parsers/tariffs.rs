use crate::error::DecodeError;
use crate::model::TariffReading;
use crate::portal::microbus::TARIFFS_CALL;
use crate::portal::parsers::decode_json;
use serde_derive::Deserialize;

#[derive(Deserialize, Debug, Default)]
struct TariffPayload {
    stroom: Option<ElectricityTariffs>,
    gas: Option<GasTariffs>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ElectricityTariffs {
    levering_hoog_allin: Option<f64>,
    levering_laag_allin: Option<f64>,
    teruglevering_hoog_allin: Option<f64>,
    teruglevering_laag_allin: Option<f64>,
    teruglever_vergoeding: Option<f64>,
    totale_jaarlijkse_kosten_inc_btw: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GasTariffs {
    levering_allin: Option<f64>,
    totale_jaarlijkse_kosten_inc_btw: Option<f64>,
}

/// Decodes a `GetTariefOvereenkomst` response.
///
/// Missing or `null` product objects and fields become absent values.
pub fn parse_tariffs(body: &str) -> Result<TariffReading, DecodeError> {
    let payload: TariffPayload = decode_json(TARIFFS_CALL, body)?;
    let stroom = payload.stroom.unwrap_or_default();
    let gas = payload.gas.unwrap_or_default();

    Ok(TariffReading {
        energy_consumption_high: stroom.levering_hoog_allin,
        energy_consumption_low: stroom.levering_laag_allin,
        energy_return_high: stroom.teruglevering_hoog_allin,
        energy_return_low: stroom.teruglevering_laag_allin,
        energy_feed_in: stroom.teruglever_vergoeding,
        gas_consumption: gas.levering_allin,
        energy_yearly_cost: stroom.totale_jaarlijkse_kosten_inc_btw,
        gas_yearly_cost: gas.totale_jaarlijkse_kosten_inc_btw,
    })
}
