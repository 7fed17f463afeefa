//! Display formatting for flight search results.
//!
//! Pure transformations from the provider payload into the shapes the
//! templates and the JSON API render. Times are formatted with a fixed
//! contract (24-hour `HH:MM`, day-first `DD/MM`) taken from the provider's
//! local timestamps as-is, with no time zone conversion.

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;

use crate::flights::{RawFilterStats, RawItinerary, RawItineraryPayload, RawLeg, RawPlace};

/// Shown when a timestamp cannot be parsed.
const UNKNOWN_TIME: &str = "--:--";
const UNKNOWN_DATE: &str = "--/--";

/// One itinerary ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedFlight {
    pub id: String,
    pub price: Price,
    pub outbound: FormattedLeg,
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_leg: Option<FormattedLeg>,
    pub total_duration: String,
    pub airline: Airline,
    /// Maximum stop count over the itinerary's legs
    pub stops: u32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    pub amount: f64,
    pub formatted: String,
}

/// Primary carrier of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airline {
    pub name: String,
    pub logo: String,
    pub code: String,
}

/// One direction of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedLeg {
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub duration: String,
    pub flight_number: String,
    pub airline: LegAirline,
    pub stops: u32,
}

/// Departure or arrival point of a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub airport: String,
    pub city: String,
    pub code: String,
    pub time: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegAirline {
    pub name: String,
    pub code: String,
}

/// Local time and date of a timestamp, as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAndDate {
    pub time: String,
    pub date: String,
}

/// Summary of a result set, from the provider's filter statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStats {
    pub total_results: u32,
    pub price_range: PriceRange,
    pub duration_range: Option<DurationRange>,
    pub airlines: Vec<AirlineStat>,
    pub airports: AirportStats,
}

/// Cheapest direct fare, if the provider reported one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub min_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationRange {
    pub min: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineStat {
    pub name: String,
    pub code: String,
    pub logo: String,
    pub min_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportStats {
    pub origin: Vec<String>,
    pub destination: Vec<String>,
}

/// Format minutes as `"{h}h {m}m"`.
///
/// ```
/// use flight_server::format::format_duration;
///
/// assert_eq!(format_duration(740), "12h 20m");
/// assert_eq!(format_duration(45), "0h 45m");
/// ```
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Split a provider timestamp into display time and date.
///
/// Accepts local timestamps without offset (`2025-07-23T13:05:00`) and
/// RFC 3339. Offsets are ignored: the wall-clock time is shown as given.
pub fn format_date_time(timestamp: &str) -> TimeAndDate {
    let parsed = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(timestamp)
                .ok()
                .map(|dt| dt.naive_local())
        });

    match parsed {
        Some(dt) => TimeAndDate {
            time: dt.format("%H:%M").to_string(),
            date: dt.format("%d/%m").to_string(),
        },
        None => TimeAndDate {
            time: UNKNOWN_TIME.to_string(),
            date: UNKNOWN_DATE.to_string(),
        },
    }
}

fn endpoint(place: &RawPlace, timestamp: &str) -> Endpoint {
    let TimeAndDate { time, date } = format_date_time(timestamp);
    Endpoint {
        airport: place.name.clone(),
        city: place.city.clone().unwrap_or_default(),
        code: place.display_code.clone(),
        time,
        date,
    }
}

/// Format one leg.
pub fn format_leg(leg: &RawLeg) -> FormattedLeg {
    let carrier = leg.carriers.marketing.first();
    FormattedLeg {
        departure: endpoint(&leg.origin, &leg.departure),
        arrival: endpoint(&leg.destination, &leg.arrival),
        duration: format_duration(leg.duration_in_minutes),
        flight_number: leg
            .segments
            .first()
            .and_then(|s| s.flight_number.clone())
            .unwrap_or_default(),
        airline: LegAirline {
            name: carrier.map(|c| c.name.clone()).unwrap_or_default(),
            code: carrier
                .and_then(|c| c.alternate_id.clone())
                .unwrap_or_default(),
        },
        stops: leg.stop_count,
    }
}

/// Format one itinerary. `None` if it has no legs.
pub fn format_itinerary(itinerary: &RawItinerary) -> Option<FormattedFlight> {
    let first = itinerary.legs.first()?;
    let carrier = first.carriers.marketing.first();
    let total_minutes = itinerary.legs.iter().map(|l| l.duration_in_minutes).sum();
    let stops = itinerary
        .legs
        .iter()
        .map(|l| l.stop_count)
        .max()
        .unwrap_or(0);

    Some(FormattedFlight {
        id: itinerary.id.clone(),
        price: Price {
            amount: itinerary.price.raw,
            formatted: itinerary.price.formatted.clone(),
        },
        outbound: format_leg(first),
        return_leg: itinerary.legs.get(1).map(format_leg),
        total_duration: format_duration(total_minutes),
        airline: Airline {
            name: carrier.map(|c| c.name.clone()).unwrap_or_default(),
            logo: carrier.and_then(|c| c.logo_url.clone()).unwrap_or_default(),
            code: carrier
                .and_then(|c| c.alternate_id.clone())
                .unwrap_or_default(),
        },
        stops,
        tags: itinerary.tags.clone(),
    })
}

/// Format every itinerary of a payload, preserving provider order.
pub fn format_itineraries(payload: &RawItineraryPayload) -> Vec<FormattedFlight> {
    payload
        .itineraries
        .iter()
        .filter_map(format_itinerary)
        .collect()
}

/// Summarize the provider's filter statistics, if present.
pub fn flight_stats(payload: &RawItineraryPayload) -> Option<FlightStats> {
    payload.filter_stats.as_ref().map(stats_from)
}

fn stats_from(stats: &RawFilterStats) -> FlightStats {
    let direct = stats.stop_prices.as_ref().and_then(|p| p.direct.as_ref());
    let airport_names = |idx: usize| -> Vec<String> {
        stats
            .airports
            .get(idx)
            .map(|g| g.airports.iter().map(|a| a.name.clone()).collect())
            .unwrap_or_default()
    };

    FlightStats {
        total_results: stats.total.unwrap_or(0),
        price_range: PriceRange {
            min: direct.and_then(|d| d.raw_price).unwrap_or(0.0),
            min_formatted: direct
                .and_then(|d| d.formatted_price.clone())
                .unwrap_or_default(),
        },
        duration_range: stats.duration.as_ref().map(|d| DurationRange {
            min: format_duration(d.min),
            max: format_duration(d.max),
        }),
        airlines: stats
            .carriers
            .iter()
            .map(|c| AirlineStat {
                name: c.name.clone(),
                code: c.alternate_id.clone().unwrap_or_default(),
                logo: c.logo_url.clone().unwrap_or_default(),
                min_price: c.min_price.clone().unwrap_or_default(),
            })
            .collect(),
        airports: AirportStats {
            origin: airport_names(0),
            destination: airport_names(1),
        },
    }
}
