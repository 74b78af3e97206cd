//! Hidden form field extraction for the portal's login pages.
//!
//! The login flow hands its state from page to page through
//! `<input type="hidden">` fields. These helpers look the fields up by their
//! `name` attribute and return their `value`.

use crate::error::{AuthError, ParseError};
use scraper::{Html, Selector};

pub const VERIFICATION_TOKEN_FIELD: &str = "__RequestVerificationToken";

const CODE_FIELD: &str = "code";
const SCOPE_FIELD: &str = "scope";
const STATE_FIELD: &str = "state";
const SESSION_STATE_FIELD: &str = "session_state";

/// Parameters the identity provider posts back to `/signin-oidc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcParams {
    pub code: String,
    /// Space separated scopes with every space replaced by `+`
    pub scope: String,
    pub state: String,
    pub session_state: String,
}

impl OidcParams {
    /// Form fields in the order the portal's callback expects them.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            (CODE_FIELD.to_string(), self.code.clone()),
            (SCOPE_FIELD.to_string(), self.scope.clone()),
            (STATE_FIELD.to_string(), self.state.clone()),
            (SESSION_STATE_FIELD.to_string(), self.session_state.clone()),
        ]
    }
}

fn input_selector(name: &str) -> Result<(String, Selector), ParseError> {
    let selector = format!(r#"input[name="{}"]"#, name);
    let parsed =
        Selector::parse(&selector).map_err(|e| ParseError::invalid_selector(&selector, e))?;
    Ok((selector, parsed))
}

/// Returns the `value` attribute of the first input named `name`.
///
/// `Ok(None)` means the input is not on the page at all; an input without a
/// `value` attribute is an error.
fn find_input_value(document: &Html, name: &str) -> Result<Option<String>, ParseError> {
    let (selector, parsed) = input_selector(name)?;
    let Some(element) = document.select(&parsed).next() else {
        return Ok(None);
    };
    element
        .value()
        .attr("value")
        .map(|value| Some(value.to_string()))
        .ok_or_else(|| ParseError::missing_attribute(selector, "value"))
}

/// Extracts the anti-forgery token from the login page.
pub fn extract_verification_token(html: &str) -> Result<String, ParseError> {
    let document = Html::parse_document(html);
    find_input_value(&document, VERIFICATION_TOKEN_FIELD)?.ok_or_else(|| {
        ParseError::element_not_found(format!(r#"input[name="{}"]"#, VERIFICATION_TOKEN_FIELD))
    })
}

fn oidc_field(document: &Html, name: &str) -> Result<String, AuthError> {
    let (selector, parsed) = input_selector(name)?;
    match document.select(&parsed).next() {
        Some(element) => Ok(element.value().attr("value").unwrap_or_default().to_string()),
        None => {
            tracing::error!("Login failed, no {} on the callback page", selector);
            Err(AuthError::CredentialsRejected)
        }
    }
}

/// Extracts the OIDC callback parameters from the page returned after
/// posting the credentials.
///
/// The portal renders the login form again instead of the callback form when
/// the credentials are wrong, so a missing field means the login was rejected.
pub fn extract_oidc_params(html: &str) -> Result<OidcParams, AuthError> {
    let document = Html::parse_document(html);

    Ok(OidcParams {
        code: oidc_field(&document, CODE_FIELD)?,
        scope: oidc_field(&document, SCOPE_FIELD)?.replace(' ', "+"),
        state: oidc_field(&document, STATE_FIELD)?,
        session_state: oidc_field(&document, SESSION_STATE_FIELD)?,
    })
}
