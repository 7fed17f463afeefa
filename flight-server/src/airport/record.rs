//! Airport record type.

use serde::{Deserialize, Serialize};

/// A single airport, from the local table or a remote lookup.
///
/// `code` identifies the record within its data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportRecord {
    /// IATA-style code (the provider's `skyId`).
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub full_name: String,
    /// Provider entity id, required to start a flight search.
    pub provider_id: Option<String>,
}

impl AirportRecord {
    /// Label shown in suggestion lists and submitted by the search form.
    pub fn display_value(&self) -> String {
        format!("{} ({})", self.city, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_value_is_city_and_code() {
        let record = AirportRecord {
            code: "EZE".into(),
            name: "Aeropuerto Internacional Ezeiza".into(),
            city: "Buenos Aires".into(),
            country: "Argentina".into(),
            full_name: "Aeropuerto Internacional Ministro Pistarini".into(),
            provider_id: Some("95565041".into()),
        };
        assert_eq!(record.display_value(), "Buenos Aires (EZE)");
    }

    #[test]
    fn serializes_camel_case() {
        let record = AirportRecord {
            code: "MAD".into(),
            name: "Aeropuerto de Madrid-Barajas".into(),
            city: "Madrid".into(),
            country: "España".into(),
            full_name: "Aeropuerto Adolfo Suárez Madrid-Barajas".into(),
            provider_id: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fullName"], "Aeropuerto Adolfo Suárez Madrid-Barajas");
        assert!(json["providerId"].is_null());
    }
}
