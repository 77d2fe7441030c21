// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::Coordinate;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Queries shorter than this return nothing.
pub const MIN_QUERY_LEN: usize = 2;
pub const SEARCH_LIMIT: usize = 5;

/// An airport as the session sees it. Never mutated once chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub display_name: String,
    pub city: String,
    pub country: String,
    pub location: Coordinate,
}

impl Airport {
    pub fn new(code: &str, display_name: &str, location: Coordinate) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            city: String::new(),
            country: String::new(),
            location,
        }
    }

    /// "City (CODE)", falling back to the airport name when the city is unknown.
    pub fn label(&self) -> String {
        let place = if self.city.is_empty() {
            &self.display_name
        } else {
            &self.city
        };
        format!("{} ({})", place, self.code)
    }
}

/// One record of the keyed-object airport dataset
/// (`{"KJFK": {"icao": .., "iata": .., "lat": .., ...}, ...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRecord {
    #[serde(default)]
    pub icao: String,
    #[serde(default)]
    pub iata: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl AirportRecord {
    fn has_iata(&self) -> bool {
        self.iata.len() == 3 && self.iata.chars().all(|c| c.is_ascii_alphanumeric())
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.city.to_lowercase().contains(query_lower)
            || self.iata.to_lowercase().contains(query_lower)
            || self.name.to_lowercase().contains(query_lower)
    }

    pub fn to_airport(&self) -> Airport {
        Airport {
            code: self.iata.clone(),
            display_name: self.name.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            location: Coordinate::new(self.lat, self.lon),
        }
    }
}

/// Read-only airport lookup backing the route search.
pub struct AirportDirectory {
    records: Vec<AirportRecord>,
}

impl AirportDirectory {
    /// The small dataset shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(include_str!("airports.json"))
            .context("Failed to parse built-in airports.json")
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading airport dataset from {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read airport dataset {:?}", path))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse airport dataset {:?}", path))
    }

    /// Keeps only airports with a three-letter IATA code, in the order they appear
    /// in the file.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        let total = raw.len();
        let mut records = Vec::with_capacity(total);
        for (key, value) in raw {
            let record: AirportRecord = serde_json::from_value(value)
                .with_context(|| format!("Invalid airport record '{}'", key))?;
            if record.has_iata() {
                records.push(record);
            }
        }

        if records.len() < total {
            log::debug!(
                "Dropped {} airport records without an IATA code",
                total - records.len()
            );
        }
        if records.is_empty() {
            log::warn!("Airport dataset contains no usable records");
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Free-text search over city, code and name. Case-insensitive substring match,
    /// at most [`SEARCH_LIMIT`] results.
    pub fn search(&self, query: &str) -> Vec<Airport> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        let q = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.matches(&q))
            .take(SEARCH_LIMIT)
            .map(AirportRecord::to_airport)
            .collect()
    }

    /// Exact (case-insensitive) IATA lookup.
    pub fn find_by_code(&self, code: &str) -> Option<Airport> {
        let code = code.trim();
        self.records
            .iter()
            .find(|r| r.iata.eq_ignore_ascii_case(code))
            .map(AirportRecord::to_airport)
    }

    /// Resolves a code first, then falls back to the best search hit.
    pub fn resolve(&self, query: &str) -> Option<Airport> {
        self.find_by_code(query)
            .or_else(|| self.search(query).into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loads() {
        let dir = AirportDirectory::builtin().unwrap();
        assert!(!dir.is_empty());
        // 00AK has no IATA code and must be dropped
        assert!(dir.records.iter().all(|r| r.iata.len() == 3));
        assert!(dir.records.iter().all(|r| r.icao != "00AK"));
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let dir = AirportDirectory::builtin().unwrap();
        assert!(dir.search("").is_empty());
        assert!(dir.search("l").is_empty());
        assert!(dir.search("  l ").is_empty());
    }

    #[test]
    fn test_search_by_city() {
        let dir = AirportDirectory::builtin().unwrap();
        let codes: Vec<String> = dir.search("London").into_iter().map(|a| a.code).collect();
        assert_eq!(codes, vec!["LHR", "LGW", "LCY"]);
    }

    #[test]
    fn test_search_by_code_and_name() {
        let dir = AirportDirectory::builtin().unwrap();
        let by_code = dir.search("hnd");
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].city, "Tokyo");

        let by_name = dir.search("schiphol");
        assert_eq!(by_name[0].code, "AMS");
    }

    #[test]
    fn test_search_is_capped() {
        let dir = AirportDirectory::builtin().unwrap();
        assert_eq!(dir.search("international").len(), SEARCH_LIMIT);
    }

    #[test]
    fn test_find_by_code() {
        let dir = AirportDirectory::builtin().unwrap();
        let jfk = dir.find_by_code("jfk").unwrap();
        assert_eq!(jfk.city, "New York");
        assert!((jfk.location.latitude - 40.6398).abs() < 1e-9);
        assert!(dir.find_by_code("ZZZ").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_search() {
        let dir = AirportDirectory::builtin().unwrap();
        assert_eq!(dir.resolve("CDG").unwrap().city, "Paris");
        assert_eq!(dir.resolve("reykjavik").unwrap().code, "KEF");
        assert!(dir.resolve("atlantis").is_none());
    }

    #[test]
    fn test_label() {
        let mut a = Airport::new("XYZ", "Nowhere Field", Coordinate::new(0.0, 0.0));
        assert_eq!(a.label(), "Nowhere Field (XYZ)");
        a.city = "Nowhere".to_string();
        assert_eq!(a.label(), "Nowhere (XYZ)");
    }

    #[test]
    fn test_parse_partial_records() {
        let json = r#"{
            "AAAA": {"iata": "AAA", "name": "Alpha", "lat": 1.0, "lon": 2.0},
            "BBBB": {"iata": "", "name": "Bravo", "lat": 3.0, "lon": 4.0}
        }"#;
        let dir = AirportDirectory::from_json_str(json).unwrap();
        assert_eq!(dir.len(), 1);
        let a = dir.find_by_code("AAA").unwrap();
        assert_eq!(a.city, "");
        assert_eq!(a.location, Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_search_keeps_file_order() {
        let json = r#"{
            "ZZZZ": {"icao": "ZZZZ", "iata": "LHR", "name": "Heathrow", "city": "London",
                     "country": "GB", "lat": 51.47, "lon": -0.45},
            "AAAA": {"icao": "AAAA", "iata": "LGW", "name": "Gatwick", "city": "London",
                     "country": "GB", "lat": 51.15, "lon": -0.18}
        }"#;
        let dir = AirportDirectory::from_json_str(json).unwrap();
        let codes: Vec<String> = dir.search("london").into_iter().map(|a| a.code).collect();
        assert_eq!(codes, vec!["LHR", "LGW"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(AirportDirectory::from_json_str("[1, 2, 3]").is_err());
    }
}
