//! Flight search parameter types and provider response DTOs.
//!
//! Response types map directly to the provider's `searchFlights` JSON and
//! use `Option` and `#[serde(default)]` liberally: the provider omits fields
//! freely, especially in the first (incomplete) response of a session.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cabin class requested for the trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 4] = [
        CabinClass::Economy,
        CabinClass::PremiumEconomy,
        CabinClass::Business,
        CabinClass::First,
    ];

    /// Wire value for the `cabinClass` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium_economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result ordering requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Best,
    PriceHigh,
    Fastest,
    OutboundTakeOffTime,
    OutboundLandingTime,
    ReturnTakeOffTime,
    ReturnLandingTime,
}

impl SortOrder {
    /// Wire value for the `sortBy` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Best => "best",
            SortOrder::PriceHigh => "price_high",
            SortOrder::Fastest => "fastest",
            SortOrder::OutboundTakeOffTime => "outbound_take_off_time",
            SortOrder::OutboundLandingTime => "outbound_landing_time",
            SortOrder::ReturnTakeOffTime => "return_take_off_time",
            SortOrder::ReturnLandingTime => "return_landing_time",
        }
    }

    /// Parse a wire value.
    pub fn parse(s: &str) -> Option<Self> {
        [
            SortOrder::Best,
            SortOrder::PriceHigh,
            SortOrder::Fastest,
            SortOrder::OutboundTakeOffTime,
            SortOrder::OutboundLandingTime,
            SortOrder::ReturnTakeOffTime,
            SortOrder::ReturnLandingTime,
        ]
        .into_iter()
        .find(|o| o.as_str() == s)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-way or return trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    #[default]
    RoundTrip,
}

/// Search parameters as entered in the form.
///
/// Values are kept as raw strings; `resolve` validates them and turns them
/// into `SearchParams`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserSearchParams {
    /// Origin: an airport code or a suggestion label like "Madrid (MAD)"
    pub from: String,

    /// Destination, same forms as `from`
    pub to: String,

    /// Provider entity id of the origin, when picked from suggestions
    pub from_id: Option<String>,

    /// Provider entity id of the destination, when picked from suggestions
    pub to_id: Option<String>,

    /// Departure date, `YYYY-MM-DD`
    pub departure_date: String,

    /// Return date, `YYYY-MM-DD`; required for round trips
    pub return_date: Option<String>,

    pub trip_type: TripType,

    /// Number of adult passengers
    pub passengers: Option<u8>,

    pub cabin_class: CabinClass,
}

/// Market-level settings shared by every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDefaults {
    pub sort_order: SortOrder,
    pub currency: String,
    pub market: String,
    pub country_code: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::Best,
            currency: "USD".to_string(),
            market: "en-US".to_string(),
            country_code: "US".to_string(),
        }
    }
}

/// Fully resolved parameters for one provider search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Origin airport code (provider `skyId`)
    pub origin_code: String,
    pub destination_code: String,
    /// Origin provider entity id
    pub origin_id: String,
    pub destination_id: String,
    pub date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub cabin_class: CabinClass,
    pub passenger_count: u8,
    pub sort_order: SortOrder,
    pub currency: String,
    pub market: String,
    pub country_code: String,
}

// ============================================================================
// Provider response DTOs
// ============================================================================

/// Response from `searchFlights`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFlightsResponse {
    pub status: Option<bool>,
    pub data: Option<SearchFlightsData>,
}

impl SearchFlightsResponse {
    /// Session token at `data.context.sessionId`, if present and non-empty.
    pub fn session_id(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .context
            .as_ref()?
            .session_id
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFlightsData {
    pub context: Option<SearchContext>,
    pub itineraries: Option<Vec<RawItinerary>>,
    pub filter_stats: Option<RawFilterStats>,
}

/// Search session context.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchContext {
    /// "incomplete" while the provider is still collecting results
    pub status: Option<String>,
    pub session_id: Option<String>,
    pub total_results: Option<u32>,
}

/// One bookable itinerary (one leg for one-way, two for return).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItinerary {
    pub id: String,
    pub price: RawPrice,
    #[serde(default)]
    pub legs: Vec<RawLeg>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    pub raw: f64,
    pub formatted: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeg {
    pub id: Option<String>,
    pub origin: RawPlace,
    pub destination: RawPlace,
    pub duration_in_minutes: u32,
    #[serde(default)]
    pub stop_count: u32,
    /// Local departure time, ISO 8601 without offset
    pub departure: String,
    /// Local arrival time, ISO 8601 without offset
    pub arrival: String,
    #[serde(default)]
    pub carriers: RawCarriers,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub id: Option<String>,
    pub name: String,
    pub display_code: String,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCarriers {
    #[serde(default)]
    pub marketing: Vec<RawCarrier>,
    pub operation_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCarrier {
    pub id: Option<i64>,
    pub name: String,
    pub alternate_id: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub flight_number: Option<String>,
}

/// Aggregate statistics over the whole result set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFilterStats {
    pub total: Option<u32>,
    pub duration: Option<RawDurationStats>,
    #[serde(default)]
    pub airports: Vec<RawAirportGroup>,
    #[serde(default)]
    pub carriers: Vec<RawCarrierStat>,
    pub stop_prices: Option<RawStopPrices>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDurationStats {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAirportGroup {
    pub city: String,
    #[serde(default)]
    pub airports: Vec<RawStatAirport>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatAirport {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCarrierStat {
    pub id: Option<i64>,
    pub name: String,
    pub alternate_id: Option<String>,
    pub logo_url: Option<String>,
    pub min_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStopPrices {
    pub direct: Option<RawStopPrice>,
    pub one: Option<RawStopPrice>,
    pub two_or_more: Option<RawStopPrice>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStopPrice {
    #[serde(default)]
    pub is_present: bool,
    pub raw_price: Option<f64>,
    pub formatted_price: Option<String>,
}

/// Final search result handed to the formatter.
#[derive(Debug, Clone)]
pub struct RawItineraryPayload {
    /// Session the results belong to
    pub session_id: String,
    /// Provider completion status ("complete" / "incomplete")
    pub context_status: Option<String>,
    pub total_results: Option<u32>,
    pub itineraries: Vec<RawItinerary>,
    pub filter_stats: Option<RawFilterStats>,
}
