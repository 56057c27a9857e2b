//! Defaulting of partial current-conditions payloads.
//!
//! | field            | default when absent or null        |
//! |------------------|------------------------------------|
//! | numeric scalars  | `0`                                |
//! | `condition`      | `{ text: "Unknown", icon: "" }`    |
//! | `air_quality`    | index `0`, all pollutants `None`   |
//!
//! Pollutant concentrations stay `None`: zero is a real reading.

use crate::{
    model::{AirQuality, Condition, CurrentConditions, MAX_EPA_INDEX, UNKNOWN_CONDITION},
    raw::{RawAirQuality, RawCondition, RawCurrent},
};

/// Turn a raw `current` record into a fully populated one. Never fails.
pub fn normalize(raw: RawCurrent) -> CurrentConditions {
    CurrentConditions {
        temp_c: raw.temp_c.unwrap_or_default(),
        feelslike_c: raw.feelslike_c.unwrap_or_default(),
        condition: raw.condition.map(normalize_condition).unwrap_or_default(),
        humidity: raw.humidity.map(percent).unwrap_or_default(),
        wind_kph: raw.wind_kph.unwrap_or_default(),
        precip_mm: raw.precip_mm.unwrap_or_default(),
        uv: raw.uv.unwrap_or_default(),
        vis_km: raw.vis_km.unwrap_or_default(),
        pressure_mb: raw.pressure_mb.unwrap_or_default(),
        air_quality: raw.air_quality.map(normalize_air_quality).unwrap_or_default(),
    }
}

pub(crate) fn normalize_condition(raw: RawCondition) -> Condition {
    Condition {
        text: raw.text.unwrap_or_else(|| UNKNOWN_CONDITION.to_string()),
        icon: raw.icon.unwrap_or_default(),
    }
}

fn normalize_air_quality(raw: RawAirQuality) -> AirQuality {
    AirQuality {
        us_epa_index: raw.us_epa_index.map(epa_index).unwrap_or_default(),
        pm2_5: raw.pm2_5,
        pm10: raw.pm10,
        o3: raw.o3,
        no2: raw.no2,
    }
}

// Out-of-scale values are as good as unknown.
fn epa_index(value: i64) -> u8 {
    match u8::try_from(value) {
        Ok(idx) if idx <= MAX_EPA_INDEX => idx,
        _ => 0,
    }
}

/// Round and clamp into 0..=100.
pub(crate) fn percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
