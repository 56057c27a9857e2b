//! Payload shapes as the provider sends them.
//!
//! Anything the provider has been seen to omit or null out is an `Option`.
//! Turning these into the types in [`crate::model`] is the job of
//! [`crate::normalize`] and [`crate::forecast`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `current.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCurrentResponse {
    pub location: Option<RawLocation>,
    pub current: Option<RawCurrent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    pub name: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCondition {
    pub text: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAirQuality {
    #[serde(rename = "us-epa-index")]
    pub us_epa_index: Option<i64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCurrent {
    pub temp_c: Option<f64>,
    pub feelslike_c: Option<f64>,
    pub condition: Option<RawCondition>,
    pub humidity: Option<f64>,
    pub wind_kph: Option<f64>,
    pub precip_mm: Option<f64>,
    pub uv: Option<f64>,
    pub vis_km: Option<f64>,
    pub pressure_mb: Option<f64>,
    pub air_quality: Option<RawAirQuality>,
}

/// Body of `forecast.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecastResponse {
    pub location: Option<RawLocation>,
    pub forecast: Option<RawForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    pub forecastday: Option<Vec<RawForecastDay>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub day: Option<RawDaySummary>,
    /// Absent and `null` both mean no hourly samples.
    #[serde(default)]
    pub hour: Option<Vec<RawHour>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDaySummary {
    pub maxtemp_c: Option<f64>,
    pub mintemp_c: Option<f64>,
    pub condition: Option<RawCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHour {
    pub time_epoch: Option<i64>,
    pub temp_c: Option<f64>,
    pub chance_of_rain: Option<f64>,
}

/// One element of the `search.json` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlace {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_payload_tolerates_nulls_and_gaps() {
        let body = r#"{
            "location": { "name": "Kharkiv", "country": "Ukraine" },
            "current": { "temp_c": 21, "condition": null, "humidity": 60 }
        }"#;

        let parsed: RawCurrentResponse = serde_json::from_str(body).expect("payload should parse");
        let current = parsed.current.expect("current container present");

        assert_eq!(current.temp_c, Some(21.0));
        assert_eq!(current.condition, None);
        assert_eq!(current.feelslike_c, None);
        assert_eq!(current.air_quality, None);
    }

    #[test]
    fn air_quality_reads_hyphenated_epa_key() {
        let body = r#"{ "us-epa-index": 2, "pm2_5": 12.5, "gb-defra-index": 3 }"#;
        let aq: RawAirQuality = serde_json::from_str(body).expect("air quality should parse");

        assert_eq!(aq.us_epa_index, Some(2));
        assert_eq!(aq.pm2_5, Some(12.5));
        assert_eq!(aq.pm10, None);
    }

    #[test]
    fn forecast_day_tolerates_null_hours_and_fields() {
        let body = r#"{
            "date": "2025-04-07",
            "day": { "maxtemp_c": null, "mintemp_c": 3.1, "condition": null },
            "hour": null
        }"#;
        let day: RawForecastDay = serde_json::from_str(body).expect("day should parse");

        assert_eq!(day.hour, None);
        let summary = day.day.expect("summary present");
        assert_eq!(summary.maxtemp_c, None);
        assert_eq!(summary.mintemp_c, Some(3.1));

        let hour: RawHour = serde_json::from_str(r#"{ "time_epoch": 1744005600, "temp_c": null }"#)
            .expect("hour should parse");
        assert_eq!(hour.temp_c, None);
    }

    #[test]
    fn forecast_day_without_hours_is_accepted() {
        let body = r#"{
            "date": "2025-04-07",
            "day": { "maxtemp_c": 14.2, "mintemp_c": 3.1 }
        }"#;
        let day: RawForecastDay = serde_json::from_str(body).expect("day should parse");

        assert_eq!(day.hour, None);
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2025, 4, 7).expect("valid date"));
    }
}
