use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::errors::{PanelError, Result};
use crate::geo::Coordinates;

const BUILTIN_AIRPORTS: [(&str, f64, f64); 15] = [
    ("DEL", 28.5562, 77.1000),
    ("BOM", 19.0896, 72.8656),
    ("MAA", 12.9941, 80.1709),
    ("BLR", 13.1986, 77.7066),
    ("HYD", 17.2403, 78.4294),
    ("CCU", 22.6547, 88.4467),
    ("JFK", 40.6413, -73.7781),
    ("LAX", 33.9416, -118.4085),
    ("LHR", 51.4700, -0.4543),
    ("DXB", 25.2532, 55.3657),
    ("SIN", 1.3644, 103.9915),
    ("HND", 35.5494, 139.7798),
    ("CDG", 49.0097, 2.5479),
    ("FRA", 50.0379, 8.5622),
    ("AMS", 52.3086, 4.7639),
];

#[derive(Debug, Clone)]
pub struct AirportTable {
    airports: HashMap<String, Coordinates>,
}

impl Default for AirportTable {
    fn default() -> Self {
        let airports = BUILTIN_AIRPORTS
            .iter()
            .map(|(code, lat, lon)| (code.to_string(), Coordinates::new(*lat, *lon)))
            .collect();
        Self { airports }
    }
}

impl AirportTable {
    /// Case-insensitive exact match on the IATA code.
    pub fn coordinates_for(&self, iata_code: &str) -> Result<Coordinates> {
        let code = iata_code.trim().to_uppercase();
        match self.airports.get(&code) {
            Some(coords) => Ok(*coords),
            None => {
                warn!("no location for airport {:?}", iata_code);
                Err(PanelError::UnknownAirport(code))
            }
        }
    }

    pub fn insert(&mut self, iata_code: &str, coords: Coordinates) -> Result<()> {
        let (code, coords) = validate(iata_code, coords)?;
        self.airports.insert(code, coords);
        Ok(())
    }

    /// Merge `{ "IATA": [lat, lon], .. }` over the current table. Nothing is
    /// merged unless every entry is valid.
    pub fn merge_json(&mut self, json: &str) -> Result<usize> {
        let entries: HashMap<String, (f64, f64)> = serde_json::from_str(json)?;
        let validated = entries
            .into_iter()
            .map(|(code, (lat, lon))| validate(&code, Coordinates::new(lat, lon)))
            .collect::<Result<Vec<_>>>()?;
        let n = validated.len();
        self.airports.extend(validated);
        Ok(n)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let n = self.merge_json(&json)?;
        info!("loaded {} airports from {}", n, path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

fn validate(iata_code: &str, coords: Coordinates) -> Result<(String, Coordinates)> {
    let code = normalize_code(iata_code)?;
    if !(-90.0..=90.0).contains(&coords.lat) || !(-180.0..=180.0).contains(&coords.lon) {
        return Err(PanelError::Config(format!("{} location out of range: {:?}", code, coords)));
    }
    Ok((code, coords))
}

fn normalize_code(iata_code: &str) -> Result<String> {
    let code = iata_code.trim().to_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(PanelError::InvalidCode(iata_code.to_string()))
    }
}
