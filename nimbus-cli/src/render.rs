//! Plain-text rendering of core records.

use std::fmt::{self, Write};

use chrono::Local;
use nimbus_core::{AirQuality, CurrentConditions, Forecast, PlaceCandidate, WeatherSnapshot};

pub fn current(place: &str, c: &CurrentConditions) -> String {
    collect(|out| write_current(out, place, c))
}

fn write_current(out: &mut String, place: &str, c: &CurrentConditions) -> fmt::Result {
    writeln!(out, "{place}")?;
    writeln!(
        out,
        "  {:.0}°C, feels like {:.0}°C, {}",
        c.temp_c, c.feelslike_c, c.condition.text
    )?;
    writeln!(
        out,
        "  Humidity {}%  Wind {:.1} km/h  Precip {:.1} mm",
        c.humidity, c.wind_kph, c.precip_mm
    )?;
    writeln!(
        out,
        "  UV {:.0}  Visibility {:.0} km  Pressure {:.0} hPa",
        c.uv, c.vis_km, c.pressure_mb
    )?;
    write!(out, "  Air quality: {}", air_quality(&c.air_quality))
}

pub fn forecast(f: &Forecast) -> String {
    if f.is_empty() {
        return "No forecast days returned.".to_string();
    }

    collect(|out| write_forecast(out, f)).trim_end().to_string()
}

fn write_forecast(out: &mut String, f: &Forecast) -> fmt::Result {
    for (i, day) in f.days.iter().enumerate() {
        let label = match i {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            _ => day.date.format("%A, %b %-d").to_string(),
        };
        writeln!(
            out,
            "{label:<20} {:>4.0}° / {:>4.0}°  {}",
            day.max_temp_c, day.min_temp_c, day.condition.text
        )?;
    }

    if let Some(today) = f.today().filter(|d| !d.hours.is_empty()) {
        writeln!(out, "\nRain chance today:")?;
        for hour in &today.hours {
            let local = hour.time.with_timezone(&Local);
            writeln!(
                out,
                "  {}  {:>3}%  {:.0}°",
                local.format("%H:%M"),
                hour.chance_of_rain,
                hour.temp_c
            )?;
        }
    }

    Ok(())
}

/// Writing into a `String` cannot fail, so the result is only checked in debug builds.
fn collect(render: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    let written = render(&mut out);
    debug_assert!(written.is_ok());
    out
}

pub fn snapshot(s: &WeatherSnapshot) -> String {
    format!("{}\n\n{}", current(&s.place, &s.current), forecast(&s.forecast))
}

pub fn places(places: &[PlaceCandidate]) -> String {
    if places.is_empty() {
        return "No matching places.".to_string();
    }

    places
        .iter()
        .map(|p| format!("{}  ({:.2}, {:.2})", p.label(), p.lat, p.lon))
        .collect::<Vec<_>>()
        .join("\n")
}

fn air_quality(aq: &AirQuality) -> String {
    let band = match aq.us_epa_index {
        1 => "good",
        2 => "moderate",
        3 => "unhealthy for sensitive groups",
        4 => "unhealthy",
        5 => "very unhealthy",
        6 => "hazardous",
        _ => return "not reported".to_string(),
    };

    let readings = [("PM2.5", aq.pm2_5), ("PM10", aq.pm10), ("O3", aq.o3), ("NO2", aq.no2)];
    let pollutants: Vec<String> = readings
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| format!("{name} {v:.1}")))
        .collect();

    if pollutants.is_empty() {
        band.to_string()
    } else {
        format!("{band} ({})", pollutants.join(", "))
    }
}
