//! Query string construction for `searchFlights`.

use reqwest::Url;

use super::error::SearchError;
use super::types::SearchParams;

/// Path of the flight search endpoint, relative to the provider base URL.
pub const SEARCH_FLIGHTS_PATH: &str = "/api/v2/flights/searchFlights";

/// One `searchFlights` request: the search parameters plus, for the second
/// step, the session token.
///
/// Both steps send every search parameter; the token is the only
/// difference. The first request starts the search on the provider side,
/// the second retrieves results for that search.
#[derive(Debug, Clone, Copy)]
pub struct FlightQuery<'a> {
    pub params: &'a SearchParams,
    pub session_id: Option<&'a str>,
}

impl<'a> FlightQuery<'a> {
    /// First request of a session: no token.
    pub fn start(params: &'a SearchParams) -> Self {
        Self {
            params,
            session_id: None,
        }
    }

    /// Follow-up request carrying the session token.
    pub fn poll(params: &'a SearchParams, session_id: &'a str) -> Self {
        Self {
            params,
            session_id: Some(session_id),
        }
    }

    /// Query parameters in wire order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let p = self.params;
        let mut pairs = vec![
            ("originSkyId", p.origin_code.clone()),
            ("destinationSkyId", p.destination_code.clone()),
            ("originEntityId", p.origin_id.clone()),
            ("destinationEntityId", p.destination_id.clone()),
            ("date", p.date.format("%Y-%m-%d").to_string()),
            ("cabinClass", p.cabin_class.as_str().to_string()),
            ("adults", p.passenger_count.to_string()),
            ("sortBy", p.sort_order.as_str().to_string()),
            ("currency", p.currency.clone()),
            ("market", p.market.clone()),
            ("countryCode", p.country_code.clone()),
        ];

        if let Some(return_date) = p.return_date {
            pairs.push(("returnDate", return_date.format("%Y-%m-%d").to_string()));
        }

        if let Some(session_id) = self.session_id {
            pairs.push(("sessionId", session_id.to_string()));
        }

        pairs
    }

    /// Full request URL against `base_url`.
    pub fn url(&self, base_url: &str) -> Result<Url, SearchError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), SEARCH_FLIGHTS_PATH);
        Url::parse_with_params(&endpoint, self.pairs())
            .map_err(|e| SearchError::Transport(format!("invalid request URL {endpoint}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flights::{CabinClass, SortOrder};
    use chrono::NaiveDate;

    fn params(return_date: Option<NaiveDate>) -> SearchParams {
        SearchParams {
            origin_code: "EZE".into(),
            destination_code: "MAD".into(),
            origin_id: "95565041".into(),
            destination_id: "95565077".into(),
            date: NaiveDate::from_ymd_opt(2025, 7, 23).unwrap(),
            return_date,
            cabin_class: CabinClass::PremiumEconomy,
            passenger_count: 2,
            sort_order: SortOrder::Best,
            currency: "USD".into(),
            market: "en-US".into(),
            country_code: "US".into(),
        }
    }

    #[test]
    fn start_query_has_no_token() {
        let p = params(None);
        let url = FlightQuery::start(&p).url("https://api.example").unwrap();
        assert_eq!(url.path(), "/api/v2/flights/searchFlights");
        assert_eq!(
            url.query().unwrap(),
            "originSkyId=EZE&destinationSkyId=MAD&originEntityId=95565041\
             &destinationEntityId=95565077&date=2025-07-23&cabinClass=premium_economy\
             &adults=2&sortBy=best&currency=USD&market=en-US&countryCode=US"
        );
    }

    #[test]
    fn poll_query_appends_return_date_and_token() {
        let p = params(NaiveDate::from_ymd_opt(2025, 7, 27));
        let start = FlightQuery::start(&p).pairs();
        let poll = FlightQuery::poll(&p, "abc123").pairs();

        assert_eq!(&poll[..start.len()], &start[..]);
        assert_eq!(poll.len(), start.len() + 1);
        assert_eq!(poll.last().unwrap(), &("sessionId", "abc123".to_string()));
        assert!(start.contains(&("returnDate", "2025-07-27".to_string())));
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let p = params(None);
        let url = FlightQuery::start(&p).url("http://localhost:8080/").unwrap();
        assert_eq!(url.path(), "/api/v2/flights/searchFlights");
    }

    #[test]
    fn token_is_url_encoded() {
        let p = params(None);
        let url = FlightQuery::poll(&p, "a b/c").url("http://localhost").unwrap();
        assert!(url.query().unwrap().ends_with("sessionId=a+b%2Fc"));
    }
}
