//! Static local airport table.
//!
//! Used for local-only mode and as the fallback whenever the remote
//! provider cannot be used. Order is significant: local search returns
//! matches in table order.

use std::sync::LazyLock;

use super::record::AirportRecord;

/// (code, name, city, country, full name, provider entity id)
const ENTRIES: &[(&str, &str, &str, &str, &str, &str)] = &[
    // Argentina
    ("EZE", "Aeropuerto Internacional Ezeiza", "Buenos Aires", "Argentina", "Aeropuerto Internacional Ministro Pistarini", "95565041"),
    ("AEP", "Aeropuerto Jorge Newbery", "Buenos Aires", "Argentina", "Aeropuerto Jorge Newbery Airfield", "95565042"),
    ("COR", "Aeropuerto Córdoba", "Córdoba", "Argentina", "Aeropuerto Internacional Ingeniero Aeronáutico Ambrosio Taravella", "95565043"),
    ("MDZ", "Aeropuerto Mendoza", "Mendoza", "Argentina", "Aeropuerto Internacional Governor Francisco Gabrielli", "95565044"),
    ("BRC", "Aeropuerto Bariloche", "Bariloche", "Argentina", "Aeropuerto Teniente Luis Candelaria", "95565045"),
    ("SLA", "Aeropuerto Salta", "Salta", "Argentina", "Aeropuerto Internacional Martín Miguel de Güemes", "95565046"),
    ("IGU", "Aeropuerto Iguazú", "Iguazú", "Argentina", "Aeropuerto Internacional Cataratas del Iguazú", "95565047"),
    ("USH", "Aeropuerto Ushuaia", "Ushuaia", "Argentina", "Aeropuerto Internacional Malvinas Argentinas", "95565048"),
    // Brasil
    ("GRU", "Aeroporto de Guarulhos", "São Paulo", "Brasil", "Aeroporto Internacional de São Paulo-Guarulhos", "95673406"),
    ("CGH", "Aeroporto de Congonhas", "São Paulo", "Brasil", "Aeroporto de São Paulo-Congonhas", "95673407"),
    ("GIG", "Aeroporto do Galeão", "Rio de Janeiro", "Brasil", "Aeroporto Internacional do Rio de Janeiro-Galeão", "95673408"),
    ("SDU", "Aeroporto Santos Dumont", "Rio de Janeiro", "Brasil", "Aeroporto Santos Dumont", "95673409"),
    ("BSB", "Aeroporto de Brasília", "Brasília", "Brasil", "Aeroporto Internacional de Brasília", "95673410"),
    // Chile
    ("SCL", "Aeropuerto de Santiago", "Santiago", "Chile", "Aeropuerto Internacional Arturo Merino Benítez", "95565049"),
    // Estados Unidos
    ("LAX", "Los Angeles International", "Los Angeles", "Estados Unidos", "Los Angeles International Airport", "95565050"),
    ("JFK", "John F. Kennedy International", "New York", "Estados Unidos", "John F. Kennedy International Airport", "95565051"),
    ("MIA", "Miami International", "Miami", "Estados Unidos", "Miami International Airport", "95565052"),
    // España
    ("MAD", "Aeropuerto de Madrid-Barajas", "Madrid", "España", "Aeropuerto Adolfo Suárez Madrid-Barajas", "95565077"),
    ("BCN", "Aeropuerto de Barcelona-El Prat", "Barcelona", "España", "Aeropuerto Josep Tarradellas Barcelona-El Prat", "95565078"),
    // Francia
    ("CDG", "Aéroport Paris-Charles de Gaulle", "París", "Francia", "Aéroport Paris-Charles de Gaulle", "95565079"),
    ("ORY", "Aéroport Paris-Orly", "París", "Francia", "Aéroport Paris-Orly", "95565080"),
    // Reino Unido
    ("LHR", "London Heathrow", "Londres", "Reino Unido", "London Heathrow Airport", "95565081"),
    ("LGW", "London Gatwick", "Londres", "Reino Unido", "London Gatwick Airport", "95565082"),
];

static AIRPORTS: LazyLock<Vec<AirportRecord>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|&(code, name, city, country, full_name, provider_id)| AirportRecord {
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            country: country.to_string(),
            full_name: full_name.to_string(),
            provider_id: Some(provider_id.to_string()),
        })
        .collect()
});

/// All local airports, in table order.
pub fn all() -> &'static [AirportRecord] {
    &AIRPORTS
}

/// Find a local airport by code, ignoring case.
pub fn find_by_code(code: &str) -> Option<&'static AirportRecord> {
    let code = code.trim();
    all().iter().find(|a| a.code.eq_ignore_ascii_case(code))
}
