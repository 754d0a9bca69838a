//! Bear records and the data provider boundary
//!
//! The game only needs ids for ordering; names, sizes and colors ride along
//! for the view. When the catalogue API is unreachable the game falls back
//! to a fixed four-bear roster.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A color attached to a bear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearColor {
    pub id: u32,
    pub name: String,
    /// CSS hex string, e.g. `#8B4513`
    #[serde(rename = "hexa")]
    pub hex_color: String,
}

/// A bear as served by `GET /bear`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bear {
    pub id: u32,
    pub name: String,
    pub size: u32,
    #[serde(default)]
    pub colors: Vec<BearColor>,
}

impl Bear {
    pub fn new(id: u32, name: &str, size: u32, colors: &[(u32, &str, &str)]) -> Self {
        Self {
            id,
            name: name.to_string(),
            size,
            colors: colors
                .iter()
                .map(|&(id, name, hex)| BearColor {
                    id,
                    name: name.to_string(),
                    hex_color: hex.to_string(),
                })
                .collect(),
        }
    }

    /// First listed color, used to tint the marker
    pub fn primary_color(&self) -> Option<&str> {
        self.colors.first().map(|c| c.hex_color.as_str())
    }
}

/// The bear catalogue could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataUnavailable {
    /// Request never completed (network, CORS, no window)
    Transport(String),
    /// Server answered with a non-success status
    Status(u16),
    /// Body was not a bear list
    Decode(String),
}

impl fmt::Display for DataUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataUnavailable::Transport(err) => write!(f, "bear data transport error: {err}"),
            DataUnavailable::Status(status) => write!(f, "bear data upstream error {status}"),
            DataUnavailable::Decode(err) => write!(f, "bear data decode error: {err}"),
        }
    }
}

impl std::error::Error for DataUnavailable {}

/// Source of the bear roster
pub trait BearProvider {
    fn fetch_all(&mut self) -> Result<Vec<Bear>, DataUnavailable>;
}

impl<F> BearProvider for F
where
    F: FnMut() -> Result<Vec<Bear>, DataUnavailable>,
{
    fn fetch_all(&mut self) -> Result<Vec<Bear>, DataUnavailable> {
        self()
    }
}

/// Decode a `GET /bear` response body
pub fn parse_roster(json: &str) -> Result<Vec<Bear>, DataUnavailable> {
    serde_json::from_str(json).map_err(|e| DataUnavailable::Decode(e.to_string()))
}

/// Built-in roster used whenever the catalogue is unavailable
pub fn fallback_roster() -> Vec<Bear> {
    vec![
        Bear::new(1, "Teddy", 10, &[(1, "Brown", "#8B4513")]),
        Bear::new(2, "Polar", 15, &[(2, "White", "#FFFFFF")]),
        Bear::new(3, "Grizzly", 20, &[(3, "Dark Brown", "#654321")]),
        Bear::new(
            4,
            "Panda",
            12,
            &[(4, "Black", "#000000"), (2, "White", "#FFFFFF")],
        ),
    ]
}

/// Resolve a fetch result into a playable roster, substituting the fallback on failure
pub fn load_roster(fetched: Result<Vec<Bear>, DataUnavailable>) -> Vec<Bear> {
    match fetched {
        Ok(bears) => {
            log::info!("Loaded {} bears", bears.len());
            bears
        }
        Err(err) => {
            log::warn!("Failed to load bears ({err}), using built-in roster");
            fallback_roster()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_roster_is_fixed() {
        let roster = fallback_roster();
        let ids: Vec<u32> = roster.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let names: Vec<&str> = roster.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Teddy", "Polar", "Grizzly", "Panda"]);

        let sizes: Vec<u32> = roster.iter().map(|b| b.size).collect();
        assert_eq!(sizes, vec![10, 15, 20, 12]);

        let panda = &roster[3];
        assert_eq!(panda.colors.len(), 2);
        assert_eq!(panda.colors[0].hex_color, "#000000");
        assert_eq!(panda.colors[1].name, "White");
        assert_eq!(roster[2].primary_color(), Some("#654321"));
    }

    #[test]
    fn test_load_roster_falls_back_on_error() {
        let roster = load_roster(Err(DataUnavailable::Status(503)));
        assert_eq!(roster, fallback_roster());
    }

    #[test]
    fn test_load_roster_keeps_fetched_bears() {
        let fetched = vec![Bear::new(7, "Kodiak", 30, &[])];
        assert_eq!(load_roster(Ok(fetched.clone())), fetched);
    }

    #[test]
    fn test_parse_roster_reads_api_payload() {
        let json = r##"[
            {"id": 5, "name": "Sun", "size": 8,
             "colors": [{"id": 9, "name": "Gold", "hexa": "#FFD700"}]},
            {"id": 2, "name": "Moon", "size": 11}
        ]"##;
        let bears = parse_roster(json).unwrap();
        assert_eq!(bears.len(), 2);
        assert_eq!(bears[0].primary_color(), Some("#FFD700"));
        assert!(bears[1].colors.is_empty());
    }

    #[test]
    fn test_parse_roster_rejects_garbage() {
        let err = parse_roster("{\"not\": \"a list\"}").unwrap_err();
        assert!(matches!(err, DataUnavailable::Decode(_)));
    }

    #[test]
    fn test_closure_provider() {
        let mut calls = 0;
        let mut provider = || -> Result<Vec<Bear>, DataUnavailable> {
            calls += 1;
            Err(DataUnavailable::Transport("offline".into()))
        };
        assert!(provider.fetch_all().is_err());
        assert_eq!(calls, 1);
    }
}
