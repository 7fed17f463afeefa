//! Askama templates for the web frontend.

use askama::Template;

use crate::flights::{CabinClass, MAX_PASSENGERS, TripType, UserSearchParams};
use crate::format::{FlightStats, FormattedFlight};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub form: SearchFormView,
}

/// Search results page.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub form: SearchFormView,
    pub flights: Vec<FormattedFlight>,
    pub stats: Option<FlightStats>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
    pub form: SearchFormView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Search form contents, prefilled from a previous submission.
#[derive(Debug, Clone)]
pub struct SearchFormView {
    pub from: String,
    pub from_id: String,
    pub to: String,
    pub to_id: String,
    pub departure_date: String,
    pub return_date: String,
    pub one_way: bool,
    pub passengers: u8,
    pub cabin_class: CabinClass,
}

impl SearchFormView {
    /// Cabin choices for the select box.
    pub fn cabins(&self) -> Vec<OptionView> {
        CabinClass::ALL
            .iter()
            .map(|c| OptionView {
                value: c.as_str().to_string(),
                label: c.label().to_string(),
                selected: *c == self.cabin_class,
            })
            .collect()
    }

    /// Passenger count choices for the select box.
    pub fn passenger_options(&self) -> Vec<OptionView> {
        (1..=MAX_PASSENGERS)
            .map(|n| OptionView {
                value: n.to_string(),
                label: if n == 1 {
                    "1 adult".to_string()
                } else {
                    format!("{n} adults")
                },
                selected: n == self.passengers,
            })
            .collect()
    }

    /// One-line description of the search, e.g. "Buenos Aires (EZE) → Madrid (MAD)".
    pub fn route_summary(&self) -> String {
        format!("{} → {}", self.from, self.to)
    }
}

impl Default for SearchFormView {
    fn default() -> Self {
        Self::from(&UserSearchParams::default())
    }
}

impl From<&UserSearchParams> for SearchFormView {
    fn from(user: &UserSearchParams) -> Self {
        Self {
            from: user.from.clone(),
            from_id: user.from_id.clone().unwrap_or_default(),
            to: user.to.clone(),
            to_id: user.to_id.clone().unwrap_or_default(),
            departure_date: user.departure_date.clone(),
            return_date: user.return_date.clone().unwrap_or_default(),
            one_way: user.trip_type == TripType::OneWay,
            passengers: user.passengers.unwrap_or(1).clamp(1, MAX_PASSENGERS),
            cabin_class: user.cabin_class,
        }
    }
}

/// One `<option>` of a select box.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}
