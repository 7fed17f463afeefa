//! Turn form input into provider search parameters.

use chrono::NaiveDate;

use crate::airport::data;

use super::error::SearchError;
use super::types::{SearchDefaults, SearchParams, TripType, UserSearchParams};

/// Largest party the provider accepts in one search.
pub const MAX_PASSENGERS: u8 = 9;

/// Validate user input and resolve airports to provider ids.
///
/// Airports may be given as a bare code ("MAD") or as a suggestion label
/// ("Madrid (MAD)"). When the form did not carry a provider id, the local
/// table supplies it; an airport that cannot be resolved either way is a
/// validation error.
pub fn resolve(
    user: &UserSearchParams,
    defaults: &SearchDefaults,
) -> Result<SearchParams, SearchError> {
    if user.from.trim().is_empty() {
        return Err(invalid("Please enter the origin city"));
    }
    if user.to.trim().is_empty() {
        return Err(invalid("Please enter the destination city"));
    }
    if user.departure_date.trim().is_empty() {
        return Err(invalid("Please select the departure date"));
    }

    let return_date = non_empty(user.return_date.as_deref());
    if user.trip_type == TripType::RoundTrip && return_date.is_none() {
        return Err(invalid("Please select the return date"));
    }

    let date = parse_date(&user.departure_date, "departure")?;
    let return_date = match user.trip_type {
        TripType::OneWay => None,
        TripType::RoundTrip => return_date.map(|d| parse_date(d, "return")).transpose()?,
    };
    if let Some(ret) = return_date
        && ret < date
    {
        return Err(invalid("Return date must not be before the departure date"));
    }

    let passengers = user.passengers.unwrap_or(1);
    if !(1..=MAX_PASSENGERS).contains(&passengers) {
        return Err(invalid(&format!(
            "Passengers must be between 1 and {MAX_PASSENGERS}"
        )));
    }

    let (origin_code, origin_id) = resolve_airport(&user.from, user.from_id.as_deref(), "origin")?;
    let (destination_code, destination_id) =
        resolve_airport(&user.to, user.to_id.as_deref(), "destination")?;

    if origin_code == destination_code {
        return Err(invalid("Origin and destination must differ"));
    }

    Ok(SearchParams {
        origin_code,
        destination_code,
        origin_id,
        destination_id,
        date,
        return_date,
        cabin_class: user.cabin_class,
        passenger_count: passengers,
        sort_order: defaults.sort_order,
        currency: defaults.currency.clone(),
        market: defaults.market.clone(),
        country_code: defaults.country_code.clone(),
    })
}

fn invalid(message: &str) -> SearchError {
    SearchError::Validation(message.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &str, which: &str) -> Result<NaiveDate, SearchError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid(&format!("Invalid {which} date: {value}")))
}

/// Pull the airport code out of "City (CODE)" or a bare code.
pub fn extract_code(input: &str) -> &str {
    let input = input.trim();
    if let Some(open) = input.rfind('(')
        && let Some(close) = input[open..].find(')')
    {
        return input[open + 1..open + close].trim();
    }
    input
}

fn resolve_airport(
    input: &str,
    provider_id: Option<&str>,
    which: &str,
) -> Result<(String, String), SearchError> {
    let code = extract_code(input).to_uppercase();
    if code.is_empty() {
        return Err(invalid(&format!("Invalid {which} airport: {input}")));
    }

    if let Some(id) = non_empty(provider_id) {
        return Ok((code, id.to_string()));
    }

    data::find_by_code(&code)
        .and_then(|a| a.provider_id.clone())
        .map(|id| (code, id))
        .ok_or_else(|| {
            invalid(&format!(
                "Unknown {which} airport: {input}. Pick one from the suggestions"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flights::CabinClass;

    fn form() -> UserSearchParams {
        UserSearchParams {
            from: "EZE".into(),
            to: "Madrid (MAD)".into(),
            departure_date: "2025-07-23".into(),
            return_date: Some("2025-07-27".into()),
            passengers: Some(2),
            cabin_class: CabinClass::Business,
            ..Default::default()
        }
    }

    fn message(err: SearchError) -> String {
        match err {
            SearchError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn resolves_from_local_table() {
        let params = resolve(&form(), &SearchDefaults::default()).unwrap();
        assert_eq!(params.origin_code, "EZE");
        assert_eq!(params.origin_id, "95565041");
        assert_eq!(params.destination_code, "MAD");
        assert_eq!(params.destination_id, "95565077");
        assert_eq!(params.date, NaiveDate::from_ymd_opt(2025, 7, 23).unwrap());
        assert_eq!(params.return_date, NaiveDate::from_ymd_opt(2025, 7, 27));
        assert_eq!(params.passenger_count, 2);
        assert_eq!(params.cabin_class, CabinClass::Business);
        assert_eq!(params.currency, "USD");
        assert_eq!(params.market, "en-US");
        assert_eq!(params.country_code, "US");
    }

    #[test]
    fn explicit_provider_id_wins() {
        let mut user = form();
        user.to = "Tokyo (HND)".into();
        user.to_id = Some("128667143".into());
        let params = resolve(&user, &SearchDefaults::default()).unwrap();
        assert_eq!(params.destination_code, "HND");
        assert_eq!(params.destination_id, "128667143");
    }

    #[test]
    fn unknown_airport_without_id_is_rejected() {
        let mut user = form();
        user.to = "HND".into();
        user.to_id = Some("  ".into());
        assert!(message(resolve(&user, &SearchDefaults::default()).unwrap_err())
            .starts_with("Unknown destination airport"));
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let defaults = SearchDefaults::default();

        let mut user = form();
        user.from = " ".into();
        assert_eq!(message(resolve(&user, &defaults).unwrap_err()), "Please enter the origin city");

        let mut user = form();
        user.to.clear();
        assert_eq!(
            message(resolve(&user, &defaults).unwrap_err()),
            "Please enter the destination city"
        );

        let mut user = form();
        user.departure_date.clear();
        assert_eq!(
            message(resolve(&user, &defaults).unwrap_err()),
            "Please select the departure date"
        );

        let mut user = form();
        user.return_date = Some(String::new());
        assert_eq!(
            message(resolve(&user, &defaults).unwrap_err()),
            "Please select the return date"
        );
    }

    #[test]
    fn one_way_ignores_return_date() {
        let mut user = form();
        user.trip_type = TripType::OneWay;
        user.return_date = Some("garbage".into());
        let params = resolve(&user, &SearchDefaults::default()).unwrap();
        assert_eq!(params.return_date, None);
    }

    #[test]
    fn return_before_departure_is_rejected() {
        let mut user = form();
        user.return_date = Some("2025-07-01".into());
        assert!(resolve(&user, &SearchDefaults::default()).is_err());
    }

    #[test]
    fn passenger_bounds() {
        let mut user = form();
        user.passengers = Some(0);
        assert!(resolve(&user, &SearchDefaults::default()).is_err());
        user.passengers = Some(10);
        assert!(resolve(&user, &SearchDefaults::default()).is_err());
        user.passengers = None;
        assert_eq!(
            resolve(&user, &SearchDefaults::default()).unwrap().passenger_count,
            1
        );
    }

    #[test]
    fn same_origin_and_destination_is_rejected() {
        let mut user = form();
        user.to = "eze".into();
        assert!(resolve(&user, &SearchDefaults::default()).is_err());
    }

    #[test]
    fn invalid_date_is_rejected() {
        let mut user = form();
        user.departure_date = "23/07/2025".into();
        assert_eq!(
            message(resolve(&user, &SearchDefaults::default()).unwrap_err()),
            "Invalid departure date: 23/07/2025"
        );
    }

    #[test]
    fn extract_code_forms() {
        assert_eq!(extract_code("MAD"), "MAD");
        assert_eq!(extract_code("  Madrid (MAD) "), "MAD");
        assert_eq!(extract_code("Rio de Janeiro (GIG)"), "GIG");
        assert_eq!(extract_code("Madrid ("), "Madrid (");
    }
}
