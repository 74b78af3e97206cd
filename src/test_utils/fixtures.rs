//! Test fixtures for portal pages and payloads.

/// HTML pages of the login flow.
pub mod html {
    /// Login form carrying the given anti-forgery token.
    pub fn login_page(token: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="nl">
<head><title>Inloggen - Mijn Greenchoice</title></head>
<body>
  <form method="post" action="/Account/Login">
    <input type="hidden" name="ReturnUrl" value="/connect/authorize/callback">
    <input type="email" name="Username" value="">
    <input type="password" name="Password">
    <input type="checkbox" name="RememberLogin" value="true">
    <button type="submit">Inloggen</button>
    <input name="__RequestVerificationToken" type="hidden" value="{}">
  </form>
</body>
</html>"#,
            token
        )
    }

    /// Self-submitting form the identity provider renders after a successful
    /// login.
    pub fn oidc_callback_page(code: &str, scope: &str, state: &str, session_state: &str) -> String {
        format!(
            r#"<html>
<head><title>Submit this form</title></head>
<body>
  <form method="post" action="https://mijn.greenchoice.nl/signin-oidc">
    <input type="hidden" name="code" value="{}" />
    <input type="hidden" name="scope" value="{}" />
    <input type="hidden" name="state" value="{}" />
    <input type="hidden" name="session_state" value="{}" />
    <noscript><button>Click to continue</button></noscript>
  </form>
  <script>window.addEventListener('load', function(){{document.forms[0].submit();}});</script>
</body>
</html>"#,
            code, scope, state, session_state
        )
    }
}

/// JSON payloads of the microbus endpoints.
pub mod json {
    use serde_json::json;

    /// `OpnamesOphalen` response with electricity and gas products.
    ///
    /// The latest entry of both products is dated 2023-03-10; electricity
    /// registers hold 5000.5 / 4000.25 / 1000.0 / 500.75, gas holds 2500.123.
    pub fn meter_readings(has_electricity: bool, has_gas: bool) -> String {
        json!({
            "model": {
                "heeftStroom": has_electricity,
                "heeftGas": has_gas,
                "productenOpnamesModel": [
                    {
                        "productType": "Stroom",
                        "opnamesJaarMaandModel": [
                            {"jaar": 2023, "maand": 1, "opnames": []},
                            {"jaar": 2023, "maand": 3, "opnames": [
                                {"opnameDatum": "2023-03-05T00:00:00", "standen": [
                                    {"telwerk": 1, "waarde": 4990.0},
                                    {"telwerk": 2, "waarde": 3990.0},
                                    {"telwerk": 3, "waarde": 995.0},
                                    {"telwerk": 4, "waarde": 500.0}
                                ]},
                                {"opnameDatum": "2023-03-10T00:00:00", "standen": [
                                    {"telwerk": 1, "waarde": 5000.5},
                                    {"telwerk": 2, "waarde": 4000.25},
                                    {"telwerk": 3, "waarde": 1000.0},
                                    {"telwerk": 4, "waarde": 500.75}
                                ]}
                            ]},
                            {"jaar": 2023, "maand": 2, "opnames": [
                                {"opnameDatum": "2023-02-01T00:00:00", "standen": [
                                    {"telwerk": 1, "waarde": 4800.0},
                                    {"telwerk": 2, "waarde": 3800.0}
                                ]}
                            ]}
                        ]
                    },
                    {
                        "productType": "Gas",
                        "opnamesJaarMaandModel": [
                            {"jaar": 2023, "maand": 2, "opnames": [
                                {"opnameDatum": "2023-02-01T00:00:00", "standen": [
                                    {"telwerk": 5, "waarde": 2400.0}
                                ]}
                            ]},
                            {"jaar": 2023, "maand": 3, "opnames": [
                                {"opnameDatum": "2023-03-10T00:00:00", "standen": [
                                    {"telwerk": 5, "waarde": 2500.123}
                                ]}
                            ]}
                        ]
                    }
                ]
            }
        })
        .to_string()
    }

    /// `GetTariefOvereenkomst` response with the given yearly costs.
    pub fn tariffs(energy_yearly_cost: f64, gas_yearly_cost: f64) -> String {
        json!({
            "stroom": {
                "leveringHoogAllin": 0.41,
                "leveringLaagAllin": 0.39,
                "terugleveringHoogAllin": 0.21,
                "terugleveringLaagAllin": 0.19,
                "terugleverVergoeding": 0.09,
                "totaleJaarlijkseKostenIncBtw": energy_yearly_cost
            },
            "gas": {
                "leveringAllin": 1.45,
                "totaleJaarlijkseKostenIncBtw": gas_yearly_cost
            }
        })
        .to_string()
    }

    /// `/microbus/init` response; the preferred customer 1001 has two
    /// agreements, another customer has one.
    pub fn init() -> String {
        json!({
            "profile": {
                "voornaam": "Jan",
                "voorkeursOvereenkomst": {"klantnummer": 1001, "overeenkomstId": 7654321}
            },
            "klantgegevens": [
                {"klantnummer": 999, "adressen": [
                    {"postcode": "9999ZZ", "huisnummer": 1, "plaats": "GRONINGEN", "overeenkomstId": 1111111}
                ]},
                {"klantnummer": 1001, "adressen": [
                    {"postcode": "1234AB", "huisnummer": 12, "plaats": "AMSTERDAM", "overeenkomstId": 7654321},
                    {"postcode": "3511AA", "plaats": "utrecht", "overeenkomstId": 7654322}
                ]}
            ]
        })
        .to_string()
    }
}
