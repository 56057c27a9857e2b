use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Text used when the provider gives no condition description.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Highest value on the US EPA air-quality scale.
pub const MAX_EPA_INDEX: u8 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Icon reference as returned by the provider (usually a protocol-relative URL).
    pub icon: String,
}

impl Default for Condition {
    fn default() -> Self {
        Self { text: UNKNOWN_CONDITION.to_string(), icon: String::new() }
    }
}

/// Air-quality readings.
///
/// Pollutant concentrations are `None` when the provider did not report them.
/// They are never defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// 1 (good) ..= 6 (hazardous); 0 means unknown.
    pub us_epa_index: u8,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
}

impl AirQuality {
    pub fn is_known(&self) -> bool {
        self.us_epa_index != 0
    }
}

/// Current conditions after normalization. Every field is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub condition: Condition,
    pub humidity: u8,
    pub wind_kph: f64,
    pub precip_mm: f64,
    pub uv: f64,
    pub vis_km: f64,
    pub pressure_mb: f64,
    pub air_quality: AirQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSample {
    pub time: DateTime<Utc>,
    pub temp_c: f64,
    /// Percent, 0..=100.
    pub chance_of_rain: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: Condition,
    pub hours: Vec<HourSample>,
}

/// Day 0 is the reference day of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn today(&self) -> Option<&ForecastDay> {
        self.days.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl PlaceCandidate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// "Name, Region, Country" without empty parts.
    pub fn label(&self) -> String {
        [self.name.as_str(), self.region.as_str(), self.country.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar distance in degree space. Only meaningful for ranking nearby points.
    pub fn degree_distance(&self, other: &Coordinates) -> f64 {
        (self.lat - other.lat).hypot(self.lon - other.lon)
    }
}

/// Renders as the provider's `"lat,lon"` query form.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Current conditions and forecast fetched together for one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place: String,
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_render_as_query() {
        assert_eq!(Coordinates::new(22.15, 113.55).to_string(), "22.15,113.55");
        assert_eq!(Coordinates::new(-33.9, 18.4).to_string(), "-33.9,18.4");
    }

    #[test]
    fn degree_distance_is_planar() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(3.0, 4.0);
        assert!((a.degree_distance(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.degree_distance(&a), 0.0);
    }

    #[test]
    fn label_skips_empty_parts() {
        let place = PlaceCandidate {
            name: "Taipa".into(),
            region: String::new(),
            country: "Macao".into(),
            lat: 22.16,
            lon: 113.56,
        };
        assert_eq!(place.label(), "Taipa, Macao");
    }

    #[test]
    fn default_condition_is_unknown_without_icon() {
        let cond = Condition::default();
        assert_eq!(cond.text, "Unknown");
        assert!(cond.icon.is_empty());
    }
}
