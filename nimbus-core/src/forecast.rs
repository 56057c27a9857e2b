use chrono::DateTime;

use crate::{
    WeatherError,
    model::{Forecast, ForecastDay, HourSample},
    normalize::{normalize_condition, percent},
    raw::{RawForecastDay, RawForecastResponse, RawHour},
};

/// Check the forecast structure and convert it.
///
/// Unlike current conditions, a forecast without its container or day list is
/// rejected: a partial trend cannot be rendered. Inside the list nothing is
/// validated beyond shape. An empty day list, or a day with no (or `null`)
/// hourly samples, is accepted as is.
pub fn validate(raw: RawForecastResponse) -> Result<Forecast, WeatherError> {
    let container = raw.forecast.ok_or_else(|| {
        WeatherError::MalformedResponse("payload has no `forecast` container".to_string())
    })?;

    let days = container.forecastday.ok_or_else(|| {
        WeatherError::MalformedResponse("`forecast` has no `forecastday` list".to_string())
    })?;

    let days = days.into_iter().map(convert_day).collect::<Result<Vec<_>, _>>()?;

    Ok(Forecast { days })
}

fn convert_day(raw: RawForecastDay) -> Result<ForecastDay, WeatherError> {
    let hours = raw
        .hour
        .unwrap_or_default()
        .into_iter()
        .filter_map(|h| convert_hour(h).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    let summary = raw.day.unwrap_or_default();

    Ok(ForecastDay {
        date: raw.date,
        max_temp_c: summary.maxtemp_c.unwrap_or_default(),
        min_temp_c: summary.mintemp_c.unwrap_or_default(),
        condition: summary.condition.map(normalize_condition).unwrap_or_default(),
        hours,
    })
}

/// Hours without a timestamp cannot be placed on the timeline and are skipped.
fn convert_hour(raw: RawHour) -> Result<Option<HourSample>, WeatherError> {
    let Some(epoch) = raw.time_epoch else {
        return Ok(None);
    };

    let time = DateTime::from_timestamp(epoch, 0).ok_or_else(|| {
        WeatherError::MalformedResponse(format!("hour timestamp {epoch} out of range"))
    })?;

    Ok(Some(HourSample {
        time,
        temp_c: raw.temp_c.unwrap_or_default(),
        chance_of_rain: raw.chance_of_rain.map(percent).unwrap_or_default(),
    }))
}
