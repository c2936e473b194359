use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::airports::AirportTable;
use crate::errors::{PanelError, Result};
use crate::geo::{self, Coordinates};
use crate::status::{StatusCategory, classify};
use crate::telemetry::{NOT_AVAILABLE, Telemetry};

const UNKNOWN_FLIGHT_NUMBER: &str = "Unknown";
const UNKNOWN_AIRLINE: &str = "Unknown Airline";
const UNKNOWN_STATUS: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightRecord {
    pub flight_number: Option<String>,
    pub airline_name: Option<String>,
    pub origin_code: Option<String>,
    pub destination_code: Option<String>,
    pub raw_status: Option<String>,
}

// upstream flight schedule item, only the fields we use

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightItem {
    pub number: Option<String>,
    pub status: Option<String>,
    pub airline: Option<Airline>,
    pub departure: Option<Movement>,
    pub arrival: Option<Movement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Airline {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Movement {
    pub airport: Option<AirportRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirportRef {
    pub iata: Option<String>,
}

impl Movement {
    fn iata(self) -> Option<String> {
        self.airport.and_then(|a| a.iata)
    }
}

impl From<FlightItem> for FlightRecord {
    fn from(item: FlightItem) -> Self {
        FlightRecord {
            flight_number: item.number,
            airline_name: item.airline.and_then(|a| a.name),
            origin_code: item.departure.and_then(Movement::iata),
            destination_code: item.arrival.and_then(Movement::iata),
            raw_status: item.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteGeometry {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub center: Coordinates,
    /// only set while the plane marker is shown
    pub plane: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub flight_number: String,
    pub airline: String,
    pub origin_code: String,
    pub destination_code: String,
    pub status: StatusCategory,
    pub status_label: String,
    pub status_color: &'static str,
    pub progress: f64,
    pub progress_percent: u32,
    pub show_plane_marker: bool,
    pub show_progress_bar: bool,
    pub distance_total_km: u32,
    pub distance_flown_km: u32,
    pub distance_remaining_km: u32,
    pub telemetry: Option<Telemetry>,
    pub route: RouteGeometry,
}

impl DisplayState {
    pub fn altitude(&self) -> &str {
        self.telemetry.as_ref().map_or(NOT_AVAILABLE, |t| t.altitude.as_str())
    }

    pub fn speed(&self) -> &str {
        self.telemetry.as_ref().map_or(NOT_AVAILABLE, |t| t.speed.as_str())
    }

    pub fn eta(&self) -> &str {
        self.telemetry.as_ref().map_or(NOT_AVAILABLE, |t| t.eta.as_str())
    }

    pub fn distance_text(&self) -> String {
        format!("{} km", self.distance_total_km)
    }

    pub fn distance_flown_text(&self) -> String {
        format!("{} km flown", self.distance_flown_km)
    }

    pub fn distance_remaining_text(&self) -> String {
        format!("{} km remaining", self.distance_remaining_km)
    }
}

/// Split a total distance at `progress`. flown + remaining == total always holds.
pub fn split_distance(total_km: u32, progress: f64) -> (u32, u32) {
    let flown = ((f64::from(total_km) * progress.clamp(0.0, 1.0)).round() as u32).min(total_km);
    (flown, total_km - flown)
}

fn required_code(code: &Option<String>, missing: PanelError) -> Result<String> {
    match code.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => Ok(c.to_uppercase()),
        _ => Err(missing),
    }
}

/// Compute the display state for one flight. Fails only if an airport code is
/// missing or not in `airports`; any status text is accepted.
pub fn derive<R: Rng>(record: &FlightRecord, airports: &AirportTable, rng: &mut R) -> Result<DisplayState> {
    let origin_code = required_code(&record.origin_code, PanelError::MissingOrigin)?;
    let destination_code = required_code(&record.destination_code, PanelError::MissingDestination)?;

    let status = classify(record.raw_status.as_deref().unwrap_or(UNKNOWN_STATUS));

    let origin = airports.coordinates_for(&origin_code)?;
    let destination = airports.coordinates_for(&destination_code)?;

    let distance_total_km = geo::distance_km(origin, destination).round() as u32;
    let (distance_flown_km, distance_remaining_km) = split_distance(distance_total_km, status.progress);

    let telemetry = status.show_plane.then(|| Telemetry::synthesize(rng));
    let route = RouteGeometry {
        origin,
        destination,
        center: geo::midpoint(origin, destination),
        plane: status.show_plane.then(|| geo::interpolate(origin, destination, status.progress)),
    };

    debug!(
        "derived {}->{} status={:?} total={}km flown={}km",
        origin_code, destination_code, status.category, distance_total_km, distance_flown_km
    );

    Ok(DisplayState {
        flight_number: record.flight_number.clone().unwrap_or_else(|| UNKNOWN_FLIGHT_NUMBER.to_string()),
        airline: record.airline_name.clone().unwrap_or_else(|| UNKNOWN_AIRLINE.to_string()),
        origin_code,
        destination_code,
        status_label: status.category.label().to_string(),
        status_color: status.category.color(),
        status: status.category,
        progress: status.progress,
        progress_percent: (status.progress * 100.0) as u32,
        show_plane_marker: status.show_plane,
        show_progress_bar: status.show_progress,
        distance_total_km,
        distance_flown_km,
        distance_remaining_km,
        telemetry,
        route,
    })
}
