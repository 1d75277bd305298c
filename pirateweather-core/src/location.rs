use tracing::{debug, info};

use crate::{
    error::ResolutionError,
    geocoding::GeocodingClient,
    model::{Coordinates, GeocodeHit},
};

/// Parse a literal "lat,lon" string.
///
/// `None` means "not coordinates" and is the signal to fall back to geocoding,
/// so malformed and out-of-range input are treated the same way.
pub fn parse_coordinates(raw: &str) -> Option<Coordinates> {
    let (lat, lon) = raw.split_once(',')?;
    if lon.contains(',') {
        return None;
    }

    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lon.trim().parse().ok()?;

    Coordinates::new(latitude, longitude)
}

/// Turns user-supplied location text into coordinates.
#[derive(Debug, Clone, Copy)]
pub struct LocationResolver<'a> {
    geocoder: &'a dyn GeocodingClient,
}

impl<'a> LocationResolver<'a> {
    pub fn new(geocoder: &'a dyn GeocodingClient) -> Self {
        Self { geocoder }
    }

    /// Literal coordinates first; otherwise a single forward-geocoding call.
    pub async fn resolve(&self, raw_location: &str) -> Result<Coordinates, ResolutionError> {
        if let Some(coords) = parse_coordinates(raw_location) {
            debug!(%coords, "Location is a literal coordinate pair");
            return Ok(coords);
        }

        let hit = self
            .geocoder
            .forward_geocode(raw_location)
            .await
            .map_err(|cause| ResolutionError::GeocodingFailed { cause })?;

        let coords = coordinates_from_hit(&hit)?;
        info!(
            query = raw_location,
            place = hit.display_name.as_deref().unwrap_or("-"),
            %coords,
            "Geocoded location"
        );
        Ok(coords)
    }
}

fn coordinates_from_hit(hit: &GeocodeHit) -> Result<Coordinates, ResolutionError> {
    let invalid = || ResolutionError::InvalidGeocodeResult { lat: hit.lat.clone(), lon: hit.lon.clone() };

    let latitude: f64 = hit.lat.trim().parse().map_err(|_| invalid())?;
    let longitude: f64 = hit.lon.trim().parse().map_err(|_| invalid())?;

    Coordinates::new(latitude, longitude).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::GeocodingError, model::AddressInfo};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct StubGeocoder {
        answer: Result<GeocodeHit, String>,
        queries: Mutex<Vec<String>>,
    }

    impl StubGeocoder {
        fn hit(lat: &str, lon: &str) -> Self {
            Self {
                answer: Ok(GeocodeHit { lat: lat.into(), lon: lon.into(), display_name: None }),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self { answer: Err(msg.into()), queries: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GeocodingClient for StubGeocoder {
        async fn forward_geocode(&self, query: &str) -> Result<GeocodeHit, GeocodingError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.answer.clone().map_err(GeocodingError::Request)
        }

        async fn reverse_geocode(&self, _: f64, _: f64) -> Result<AddressInfo, GeocodingError> {
            unreachable!("resolver never reverse geocodes")
        }
    }

    #[test]
    fn parses_well_formed_pairs() {
        let c = parse_coordinates("37.7749,-122.4194").expect("valid pair");
        assert_eq!(c.latitude(), 37.7749);
        assert_eq!(c.longitude(), -122.4194);

        let c = parse_coordinates("  -33.8688 ,  151.2093 ").expect("whitespace is trimmed");
        assert_eq!(c.latitude(), -33.8688);
        assert_eq!(c.longitude(), 151.2093);

        assert!(parse_coordinates("0,0").is_some());
        assert!(parse_coordinates("90,180").is_some());
    }

    #[test]
    fn rejects_non_coordinates() {
        for raw in [
            "hello",
            "91,200",
            "45,181",
            "Paris, France",
            "1,2,3",
            "12.5",
            "",
            ",",
            "NaN,0",
            "inf,0",
        ] {
            assert!(parse_coordinates(raw).is_none(), "{raw:?} should not parse");
        }
    }

    #[tokio::test]
    async fn literal_coordinates_skip_geocoding() {
        let geo = StubGeocoder::failing("must not be called");
        let coords = LocationResolver::new(&geo).resolve("37.7749,-122.4194").await.unwrap();

        assert_eq!(coords, Coordinates::new(37.7749, -122.4194).unwrap());
        assert!(geo.calls().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_pair_falls_through_to_geocoding() {
        let geo = StubGeocoder::hit("10.5", "20.25");
        let coords = LocationResolver::new(&geo).resolve("91,200").await.unwrap();

        assert_eq!(coords, Coordinates::new(10.5, 20.25).unwrap());
        assert_eq!(geo.calls(), vec!["91,200".to_string()]);
    }

    #[tokio::test]
    async fn geocoder_failure_is_geocoding_failed() {
        let geo = StubGeocoder::failing("connection refused");
        let err = LocationResolver::new(&geo).resolve("Paris").await.unwrap_err();

        assert!(matches!(err, ResolutionError::GeocodingFailed { .. }));
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(geo.calls().len(), 1);
    }

    #[tokio::test]
    async fn unparsable_geocode_result_is_rejected() {
        let geo = StubGeocoder::hit("forty-eight", "2.35");
        let err = LocationResolver::new(&geo).resolve("Paris").await.unwrap_err();

        assert!(matches!(err, ResolutionError::InvalidGeocodeResult { ref lat, .. } if lat == "forty-eight"));
    }

    #[tokio::test]
    async fn out_of_range_geocode_result_is_rejected() {
        let geo = StubGeocoder::hit("123.0", "2.35");
        let err = LocationResolver::new(&geo).resolve("Paris").await.unwrap_err();

        assert!(matches!(err, ResolutionError::InvalidGeocodeResult { .. }));
    }
}
