use tracing::debug;

use crate::{
    WeatherError,
    model::{Coordinates, PlaceCandidate},
    provider::WeatherProvider,
    raw::RawPlace,
};

/// How a search string is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceQuery {
    Text(String),
    Coordinates(Coordinates),
}

impl PlaceQuery {
    /// `"<lat>,<lon>"` with two finite decimals is a coordinate query;
    /// anything else is free text.
    pub fn parse(query: &str) -> Self {
        let coords = query.split_once(',').and_then(|(lat, lon)| {
            let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
            let lon = lon.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
            Some(Coordinates::new(lat, lon))
        });

        match coords {
            Some(c) => PlaceQuery::Coordinates(c),
            None => PlaceQuery::Text(query.to_string()),
        }
    }
}

/// Look up places. Coordinate queries come back nearest first; free-text
/// queries keep the provider's order. No match is an empty list, not an error.
pub async fn search(
    provider: &dyn WeatherProvider,
    query: &str,
) -> Result<Vec<PlaceCandidate>, WeatherError> {
    let raw = provider.search(query).await?;
    let mut candidates: Vec<PlaceCandidate> = raw.into_iter().map(PlaceCandidate::from).collect();

    if let PlaceQuery::Coordinates(origin) = PlaceQuery::parse(query) {
        sort_by_proximity(&mut candidates, origin);
    }

    debug!(query, found = candidates.len(), "place search finished");
    Ok(candidates)
}

/// Stable ascending sort by degree-space distance from `origin`.
pub fn sort_by_proximity(candidates: &mut [PlaceCandidate], origin: Coordinates) {
    candidates.sort_by(|a, b| {
        let da = a.coordinates().degree_distance(&origin);
        let db = b.coordinates().degree_distance(&origin);
        da.total_cmp(&db)
    });
}

impl From<RawPlace> for PlaceCandidate {
    fn from(raw: RawPlace) -> Self {
        Self {
            name: raw.name,
            region: raw.region.unwrap_or_default(),
            country: raw.country.unwrap_or_default(),
            lat: raw.lat,
            lon: raw.lon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, lat: f64, lon: f64) -> PlaceCandidate {
        let (region, country) = (String::new(), String::new());
        PlaceCandidate { name: name.into(), region, country, lat, lon }
    }

    #[test]
    fn parse_detects_coordinate_pairs() {
        assert_eq!(
            PlaceQuery::parse("22.15,113.55"),
            PlaceQuery::Coordinates(Coordinates::new(22.15, 113.55))
        );
        assert_eq!(
            PlaceQuery::parse(" -33.92 , 18.42 "),
            PlaceQuery::Coordinates(Coordinates::new(-33.92, 18.42))
        );
    }

    #[test]
    fn parse_treats_names_as_text() {
        for q in ["Paris", "Kharkiv, Ukraine", "1,2,3", "NaN,1", "", "50.0,"] {
            assert_eq!(PlaceQuery::parse(q), PlaceQuery::Text(q.to_string()), "query {q:?}");
        }
    }

    #[test]
    fn proximity_sort_orders_by_distance() {
        let origin = Coordinates::new(22.15, 113.55);
        let mut places = vec![
            place("far", 22.18, 113.55),
            place("near", 22.16, 113.55),
            place("mid", 22.15, 113.57),
        ];

        sort_by_proximity(&mut places, origin);

        let names: Vec<_> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["near", "mid", "far"]);
    }

    #[test]
    fn proximity_sort_is_stable_on_ties() {
        let origin = Coordinates::new(0.0, 0.0);
        let mut places =
            vec![place("east", 0.0, 1.0), place("north", 1.0, 0.0), place("west", 0.0, -1.0)];

        sort_by_proximity(&mut places, origin);

        let names: Vec<_> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["east", "north", "west"]);
    }

    #[test]
    fn raw_place_fills_missing_region_and_country() {
        let raw = RawPlace {
            name: "Taipa".into(),
            region: None,
            country: Some("Macao".into()),
            lat: 22.16,
            lon: 113.56,
        };
        let c = PlaceCandidate::from(raw);
        assert_eq!(c.region, "");
        assert_eq!(c.country, "Macao");
    }
}
