use serde_derive::Serialize;
use std::fmt;

/// A supply contract tied to one address (an "overeenkomst" on the portal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Agreement {
    pub postal_code: String,
    pub house_number: Option<i64>,
    pub city: String,
    pub agreement_id: i64,
}

impl Agreement {
    /// Short address, e.g. `1234AB nr 12, Amsterdam`.
    pub fn location(&self) -> String {
        match self.house_number {
            Some(number) => format!("{} nr {}, {}", self.postal_code, number, self.city),
            None => format!("{}, {}", self.postal_code, self.city),
        }
    }
}

impl fmt::Display for Agreement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:<30})", self.agreement_id, self.location())
    }
}

/// Capitalizes the first character and lower-cases the rest.
pub fn capitalize_city(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
