use crate::error::RetrievalError;
use crate::model::agreement::capitalize_city;
use crate::model::Agreement;
use crate::portal::microbus::INIT_CALL;
use crate::portal::parsers::decode_json;
use serde_derive::Deserialize;

#[derive(Deserialize, Debug)]
struct InitPayload {
    profile: Profile,
    #[serde(default)]
    klantgegevens: Vec<CustomerDetails>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Profile {
    voorkeurs_overeenkomst: PreferredAgreement,
}

#[derive(Deserialize, Debug)]
struct PreferredAgreement {
    klantnummer: i64,
}

#[derive(Deserialize, Debug)]
struct CustomerDetails {
    klantnummer: i64,
    #[serde(default)]
    adressen: Vec<Address>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Address {
    postcode: Option<String>,
    huisnummer: Option<i64>,
    plaats: Option<String>,
    overeenkomst_id: i64,
}

impl From<Address> for Agreement {
    fn from(address: Address) -> Self {
        Self {
            postal_code: address.postcode.unwrap_or_default(),
            house_number: address.huisnummer,
            city: capitalize_city(address.plaats.as_deref().unwrap_or_default()),
            agreement_id: address.overeenkomst_id,
        }
    }
}

/// Decodes the agreements of the preferred customer from a `/microbus/init`
/// response.
pub fn parse_agreements(body: &str) -> Result<Vec<Agreement>, RetrievalError> {
    let payload: InitPayload = decode_json(INIT_CALL, body)?;
    let customer_number = payload.profile.voorkeurs_overeenkomst.klantnummer;

    let Some(customer) = payload
        .klantgegevens
        .into_iter()
        .find(|customer| customer.klantnummer == customer_number)
    else {
        tracing::error!("Could not find customer details with ID {}", customer_number);
        return Err(RetrievalError::CustomerNotFound { customer_number });
    };

    Ok(customer.adressen.into_iter().map(Agreement::from).collect())
}
